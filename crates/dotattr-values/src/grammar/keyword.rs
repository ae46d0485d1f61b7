//! Grammars over closed keyword sets.

use super::{SyntaxError, RULE_STRING};
use crate::value::{
    ClusterMode, CompassPoint, DirType, Layout, OutputMode, PageDir, PortPos, RankDir, RankType,
    Shape, Splines,
};

fn lookup<T>(
    text: &str,
    from_keyword: fn(&str) -> Option<T>,
    keywords: impl IntoIterator<Item = &'static str>,
) -> Result<T, SyntaxError> {
    from_keyword(text.trim()).ok_or_else(|| SyntaxError::one_of(keywords))
}

pub(crate) fn shape(text: &str) -> Result<Shape, SyntaxError> {
    lookup(text, Shape::from_keyword, Shape::keywords())
}

pub(crate) fn dir_type(text: &str) -> Result<DirType, SyntaxError> {
    lookup(text, DirType::from_keyword, DirType::keywords())
}

pub(crate) fn cluster_mode(text: &str) -> Result<ClusterMode, SyntaxError> {
    lookup(text, ClusterMode::from_keyword, ClusterMode::keywords())
}

pub(crate) fn rank_dir(text: &str) -> Result<RankDir, SyntaxError> {
    lookup(text, RankDir::from_keyword, RankDir::keywords())
}

pub(crate) fn page_dir(text: &str) -> Result<PageDir, SyntaxError> {
    lookup(text, PageDir::from_keyword, PageDir::keywords())
}

pub(crate) fn layout(text: &str) -> Result<Layout, SyntaxError> {
    lookup(text, Layout::from_keyword, Layout::keywords())
}

pub(crate) fn output_mode(text: &str) -> Result<OutputMode, SyntaxError> {
    lookup(text, OutputMode::from_keyword, OutputMode::keywords())
}

pub(crate) fn rank_type(text: &str) -> Result<RankType, SyntaxError> {
    lookup(text, RankType::from_keyword, RankType::keywords())
}

/// Bool-like words first (any case), then the spline keywords.
pub(crate) fn splines(text: &str) -> Result<Splines, SyntaxError> {
    let t = text.trim();
    if t.eq_ignore_ascii_case("true") || t.eq_ignore_ascii_case("yes") {
        return Ok(Splines::True);
    }
    if t.eq_ignore_ascii_case("false") || t.eq_ignore_ascii_case("no") {
        return Ok(Splines::False);
    }
    lookup(t, Splines::from_keyword, Splines::keywords())
}

/// `port[:compass]` or a bare compass point.
pub(crate) fn port_pos(text: &str) -> Result<PortPos, SyntaxError> {
    let t = text.trim();
    if t.is_empty() {
        return Err(SyntaxError::new(
            0,
            format!("Mismatched input '<EOF>' expecting {RULE_STRING}."),
        ));
    }
    match t.split_once(':') {
        Some(("", _)) => Err(SyntaxError::new(
            0,
            format!("Mismatched input ':' expecting {RULE_STRING}."),
        )),
        Some((port, compass)) => {
            let compass = CompassPoint::from_keyword(compass)
                .ok_or_else(|| SyntaxError::one_of(CompassPoint::keywords()))?;
            Ok(PortPos {
                port: Some(port.to_string()),
                compass: Some(compass),
            })
        }
        None => Ok(match CompassPoint::from_keyword(t) {
            Some(compass) => PortPos {
                port: None,
                compass: Some(compass),
            },
            None => PortPos {
                port: Some(t.to_string()),
                compass: None,
            },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::PolygonShape;

    #[test]
    fn keyword_failures_list_every_value() {
        assert_eq!(
            rank_dir("XY").unwrap_err().detail,
            "Value has to be one of 'TB', 'LR', 'BT', 'RL'."
        );
        assert_eq!(
            dir_type("forwards").unwrap_err().detail,
            "Value has to be one of 'forward', 'back', 'both', 'none'."
        );
    }

    #[test]
    fn shapes() {
        assert_eq!(shape("box"), Ok(Shape::Polygon(PolygonShape::Box)));
        let detail = shape("blob").unwrap_err().detail;
        assert!(detail.starts_with("Value has to be one of 'box', 'polygon', 'ellipse'"));
        assert!(detail.ends_with("'record', 'Mrecord'."));
    }

    #[test]
    fn splines_accept_bool_words() {
        assert_eq!(splines("YES"), Ok(Splines::True));
        assert_eq!(splines("no"), Ok(Splines::False));
        assert_eq!(splines(""), Ok(Splines::Empty));
        assert_eq!(splines("ortho"), Ok(Splines::Ortho));
        assert!(splines("curvy").is_err());
    }

    #[test]
    fn port_positions() {
        assert_eq!(
            port_pos("p1:ne"),
            Ok(PortPos {
                port: Some("p1".into()),
                compass: Some(CompassPoint::Ne)
            })
        );
        assert_eq!(
            port_pos("sw"),
            Ok(PortPos {
                port: None,
                compass: Some(CompassPoint::Sw)
            })
        );
        assert_eq!(
            port_pos("in"),
            Ok(PortPos {
                port: Some("in".into()),
                compass: None
            })
        );
        assert!(port_pos("p1:up").is_err());
        assert!(port_pos(":n").is_err());
    }
}
