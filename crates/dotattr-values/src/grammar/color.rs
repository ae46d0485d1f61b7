use winnow::ascii::{multispace0, multispace1};
use winnow::combinator::{alt, cut_err, opt, preceded, separated};
use winnow::token::take_while;
use winnow::{ModalResult, Parser};

use super::number::number;
use super::{label, run, Input, SyntaxError, RULE_HEXADECIMAL_DIGIT, RULE_STRING};
use crate::value::{Color, ColorList, HsvColor, NamedColor, RgbColor, WeightedColor};

fn color_alphabet(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '#' | '/' | ',' | '.' | '+' | '-' | '_')
}

fn color_list_alphabet(c: char) -> bool {
    color_alphabet(c) || matches!(c, ':' | ';')
}

fn hex_pair(input: &mut Input<'_>) -> ModalResult<u8> {
    take_while(2, |c: char| c.is_ascii_hexdigit())
        .try_map(|s: &str| u8::from_str_radix(s, 16))
        .context(label(RULE_HEXADECIMAL_DIGIT))
        .parse_next(input)
}

/// `#rrggbb[aa]`, either case.
fn rgb(input: &mut Input<'_>) -> ModalResult<RgbColor> {
    let _ = '#'.parse_next(input)?;
    let (r, g, b) = cut_err((hex_pair, hex_pair, hex_pair)).parse_next(input)?;
    let a = opt(hex_pair).parse_next(input)?;
    Ok(RgbColor { r, g, b, a })
}

/// Comma, whitespace, or a comma surrounded by whitespace.
fn hsv_separator(input: &mut Input<'_>) -> ModalResult<()> {
    alt(((multispace0, ',', multispace0).void(), multispace1.void())).parse_next(input)
}

/// `h,s,v` / `h s v`. Commits only once two components have been read, so
/// that a lone number falls through to a color name.
fn hsv(input: &mut Input<'_>) -> ModalResult<HsvColor> {
    let h = number.parse_next(input)?;
    let s = preceded(hsv_separator, number).parse_next(input)?;
    cut_err(hsv_separator)
        .context(label("','"))
        .parse_next(input)?;
    let v = cut_err(number).parse_next(input)?;
    Ok(HsvColor { h, s, v })
}

fn color_name<'i>(input: &mut Input<'i>) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_')
        .context(label(RULE_STRING))
        .parse_next(input)
}

/// `name`, `/name` or `/scheme/name`.
fn named(input: &mut Input<'_>) -> ModalResult<NamedColor> {
    if opt('/').parse_next(input)?.is_none() {
        return color_name
            .map(|name: &str| NamedColor::new(name))
            .parse_next(input);
    }
    let first = cut_err(color_name).parse_next(input)?;
    match opt(preceded('/', cut_err(color_name))).parse_next(input)? {
        Some(name) => Ok(NamedColor::in_scheme(first, name)),
        None => Ok(NamedColor::new(first)),
    }
}

pub(crate) fn color_value(input: &mut Input<'_>) -> ModalResult<Color> {
    alt((
        rgb.map(Color::Rgb),
        hsv.map(Color::Hsv),
        named.map(Color::Named),
    ))
    .parse_next(input)
}

fn weighted(input: &mut Input<'_>) -> ModalResult<WeightedColor> {
    let color = color_value.parse_next(input)?;
    let weight =
        opt(preceded((multispace0, ';', multispace0), cut_err(number))).parse_next(input)?;
    Ok(WeightedColor { color, weight })
}

fn color_list_value(input: &mut Input<'_>) -> ModalResult<ColorList> {
    separated(1.., weighted, (multispace0, ':', multispace0))
        .map(|entries: Vec<WeightedColor>| ColorList { entries })
        .parse_next(input)
}

pub(crate) fn color(text: &str) -> Result<Color, SyntaxError> {
    run(text, color_alphabet, color_value)
}

pub(crate) fn color_list(text: &str) -> Result<ColorList, SyntaxError> {
    run(text, color_list_alphabet, color_list_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors() {
        assert_eq!(color("#ffffff"), Ok(Color::Rgb(RgbColor::new(255, 255, 255))));
        assert_eq!(
            color("#FF0000bb"),
            Ok(Color::Rgb(RgbColor::new(255, 0, 0).with_alpha(0xbb)))
        );
        assert_eq!(
            color("#ff00").unwrap_err().detail,
            "Mismatched input '<EOF>' expecting RULE_HEXADECIMAL_DIGIT."
        );
    }

    #[test]
    fn hsv_colors_with_mixed_separators() {
        let expected = Ok(Color::Hsv(HsvColor {
            h: 0.482,
            s: 0.714,
            v: 0.878,
        }));
        assert_eq!(color("0.482 0.714 0.878"), expected);
        assert_eq!(color("0.482,0.714,0.878"), expected);
        assert_eq!(color("0.482, 0.714 0.878"), expected);
    }

    #[test]
    fn named_colors() {
        assert_eq!(color("white"), Ok(Color::Named(NamedColor::new("white"))));
        assert_eq!(color("/white"), Ok(Color::Named(NamedColor::new("white"))));
        assert_eq!(
            color("/svg/white"),
            Ok(Color::Named(NamedColor::in_scheme("svg", "white")))
        );
        assert_eq!(color("5"), Ok(Color::Named(NamedColor::new("5"))));
        assert_eq!(
            color("/svg/").unwrap_err().detail,
            "Mismatched input '<EOF>' expecting RULE_STRING."
        );
        assert_eq!(
            color("red!").unwrap_err().detail,
            "No viable alternative at character '!'."
        );
    }

    #[test]
    fn color_lists() {
        let list = color_list("red;0.3:blue").unwrap();
        assert_eq!(list.entries.len(), 2);
        assert_eq!(list.entries[0].weight, Some(0.3));
        assert_eq!(list.entries[1].weight, None);
        assert_eq!(
            list.entries[1].color,
            Color::Named(NamedColor::new("blue"))
        );

        let single = color_list("#00ff00").unwrap();
        assert_eq!(single.entries.len(), 1);

        assert_eq!(
            color_list("red;").unwrap_err().detail,
            "Mismatched input '<EOF>' expecting RULE_DOUBLE."
        );
    }
}
