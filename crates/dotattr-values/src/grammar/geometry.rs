use winnow::ascii::multispace0;
use winnow::combinator::{cut_err, opt, repeat, separated, terminated};
use winnow::token::one_of;
use winnow::{ModalResult, Parser};

use super::number::number;
use super::{label, run, Input, SyntaxError};
use crate::value::{Point, Rect, Spline, SplineType};

fn point_alphabet(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E' | ',' | '!')
}

fn spline_alphabet(c: char) -> bool {
    point_alphabet(c) || matches!(c, ';' | 's')
}

fn comma(input: &mut Input<'_>) -> ModalResult<()> {
    (multispace0, cut_err(',').context(label("','")), multispace0)
        .void()
        .parse_next(input)
}

/// `x,y[!]`
fn point_value(input: &mut Input<'_>) -> ModalResult<Point> {
    let x = number.parse_next(input)?;
    comma.parse_next(input)?;
    let y = cut_err(number).parse_next(input)?;
    let pinned = opt((multispace0, '!')).parse_next(input)?.is_some();
    Ok(Point { x, y, pinned })
}

fn rect_value(input: &mut Input<'_>) -> ModalResult<Rect> {
    let llx = number.parse_next(input)?;
    comma.parse_next(input)?;
    let lly = cut_err(number).parse_next(input)?;
    comma.parse_next(input)?;
    let urx = cut_err(number).parse_next(input)?;
    comma.parse_next(input)?;
    let ury = cut_err(number).parse_next(input)?;
    Ok(Rect { llx, lly, urx, ury })
}

/// `s,x,y` or `e,x,y`
fn marker(input: &mut Input<'_>) -> ModalResult<(char, Point)> {
    let kind = one_of(['s', 'e']).parse_next(input)?;
    comma.parse_next(input)?;
    let point = cut_err(point_value).parse_next(input)?;
    let _ = multispace0.parse_next(input)?;
    Ok((kind, point))
}

fn spline(input: &mut Input<'_>) -> ModalResult<Spline> {
    let first = opt(marker).parse_next(input)?;
    let second = match first {
        Some((kind, _)) => opt(marker.verify(move |m: &(char, Point)| m.0 != kind)).parse_next(input)?,
        None => None,
    };

    let mut start = None;
    let mut end = None;
    for (kind, point) in first.into_iter().chain(second) {
        if kind == 's' {
            start = Some(point);
        } else {
            end = Some(point);
        }
    }

    let points: Vec<Point> = repeat(1.., terminated(point_value, multispace0)).parse_next(input)?;
    Ok(Spline { start, end, points })
}

fn spline_type_value(input: &mut Input<'_>) -> ModalResult<SplineType> {
    separated(1.., spline, (multispace0, ';', multispace0))
        .map(|splines: Vec<Spline>| SplineType { splines })
        .parse_next(input)
}

pub(crate) fn point(text: &str) -> Result<Point, SyntaxError> {
    run(text, point_alphabet, point_value)
}

pub(crate) fn rect(text: &str) -> Result<Rect, SyntaxError> {
    run(text, point_alphabet, rect_value)
}

pub(crate) fn spline_type(text: &str) -> Result<SplineType, SyntaxError> {
    run(text, spline_alphabet, spline_type_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points() {
        assert_eq!(point("33.0,54.6"), Ok(Point::new(33.0, 54.6)));
        assert_eq!(point("33 , 54.6 !"), Ok(Point::pinned(33.0, 54.6)));
        assert_eq!(
            point("1,").unwrap_err().detail,
            "Mismatched input '<EOF>' expecting RULE_DOUBLE."
        );
        assert_eq!(
            point("1;2").unwrap_err().detail,
            "No viable alternative at character ';'."
        );
    }

    #[test]
    fn rects() {
        assert_eq!(
            rect("10.1, 20.2,30.3 ,40.4"),
            Ok(Rect {
                llx: 10.1,
                lly: 20.2,
                urx: 30.3,
                ury: 40.4
            })
        );
        assert_eq!(
            rect("1,2,3").unwrap_err().detail,
            "Mismatched input '<EOF>' expecting ','."
        );
    }

    #[test]
    fn spline_with_markers_in_either_order() {
        let a = spline_type("s,10,11 e,20,21 0,0 1,1").unwrap();
        let b = spline_type("e,20,21 s,10,11 0,0 1,1").unwrap();
        assert_eq!(a, b);
        let spline = &a.splines[0];
        assert_eq!(spline.start, Some(Point::new(10.0, 11.0)));
        assert_eq!(spline.end, Some(Point::new(20.0, 21.0)));
        assert_eq!(spline.points.len(), 2);
    }

    #[test]
    fn multiple_splines() {
        let st = spline_type("0,0 1,1;e,5,5 2,2 3,3").unwrap();
        assert_eq!(st.splines.len(), 2);
        assert_eq!(st.splines[1].end, Some(Point::new(5.0, 5.0)));
    }

    #[test]
    fn spline_rejections() {
        assert_eq!(
            spline_type("s,1,2").unwrap_err().detail,
            "Mismatched input '<EOF>' expecting RULE_DOUBLE."
        );
        assert!(spline_type("s,1,2 s,3,4 5,6").is_err());
        assert_eq!(
            spline_type("1,2 3").unwrap_err().detail,
            "Mismatched input '<EOF>' expecting ','."
        );
    }
}
