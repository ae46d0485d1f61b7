use winnow::combinator::{alt, opt, repeat};
use winnow::token::literal;
use winnow::{ModalResult, Parser};

use super::{label, run, Input, SyntaxError, RULE_SHAPE};
use crate::value::{ArrowShape, ArrowType, DeprecatedShape, Primitive, Side};

fn arrow_alphabet(c: char) -> bool {
    c.is_ascii_lowercase()
}

fn deprecated(input: &mut Input<'_>) -> ModalResult<DeprecatedShape> {
    // Longest first: `invempty` must win over `inv` + `empty`.
    alt((
        literal("invempty").value(DeprecatedShape::Invempty),
        literal("ediamond").value(DeprecatedShape::Ediamond),
        literal("halfopen").value(DeprecatedShape::Halfopen),
        literal("empty").value(DeprecatedShape::Empty),
        literal("open").value(DeprecatedShape::Open),
    ))
    .parse_next(input)
}

fn primitive(input: &mut Input<'_>) -> ModalResult<Primitive> {
    alt((
        literal("box").value(Primitive::Box),
        literal("crow").value(Primitive::Crow),
        literal("curve").value(Primitive::Curve),
        literal("icurve").value(Primitive::Icurve),
        literal("diamond").value(Primitive::Diamond),
        literal("dot").value(Primitive::Dot),
        literal("inv").value(Primitive::Inv),
        literal("none").value(Primitive::None),
        literal("normal").value(Primitive::Normal),
        literal("tee").value(Primitive::Tee),
        literal("vee").value(Primitive::Vee),
    ))
    .context(label(RULE_SHAPE))
    .parse_next(input)
}

fn side(input: &mut Input<'_>) -> ModalResult<Side> {
    alt(('l'.value(Side::Left), 'r'.value(Side::Right))).parse_next(input)
}

/// `[o][l|r]primitive` or a deprecated token.
fn arrow_shape(input: &mut Input<'_>) -> ModalResult<ArrowShape> {
    alt((
        deprecated.map(ArrowShape::Deprecated),
        (opt('o'), opt(side), primitive).map(|(open, side, primitive)| ArrowShape::Modern {
            open: open.is_some(),
            side,
            primitive,
        }),
    ))
    .parse_next(input)
}

fn arrow_type_value(input: &mut Input<'_>) -> ModalResult<ArrowType> {
    repeat(1..=4, arrow_shape)
        .map(|shapes: Vec<ArrowShape>| ArrowType { shapes })
        .parse_next(input)
}

pub(crate) fn arrow_type(text: &str) -> Result<ArrowType, SyntaxError> {
    run(text, arrow_alphabet, arrow_type_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modern(open: bool, side: Option<Side>, primitive: Primitive) -> ArrowShape {
        ArrowShape::Modern {
            open,
            side,
            primitive,
        }
    }

    #[test]
    fn single_and_multi_shapes() {
        assert_eq!(
            arrow_type("normal").unwrap().shapes,
            vec![ArrowShape::primitive(Primitive::Normal)]
        );
        assert_eq!(
            arrow_type("olboxdot").unwrap().shapes,
            vec![
                modern(true, Some(Side::Left), Primitive::Box),
                ArrowShape::primitive(Primitive::Dot)
            ]
        );
        assert_eq!(
            arrow_type("boxnone").unwrap().shapes,
            vec![
                ArrowShape::primitive(Primitive::Box),
                ArrowShape::primitive(Primitive::None)
            ]
        );
    }

    #[test]
    fn deprecated_tokens_mix_with_modern_shapes() {
        assert_eq!(
            arrow_type("invempty").unwrap().shapes,
            vec![ArrowShape::Deprecated(DeprecatedShape::Invempty)]
        );
        assert_eq!(
            arrow_type("ediamondopen").unwrap().shapes,
            vec![
                ArrowShape::Deprecated(DeprecatedShape::Ediamond),
                ArrowShape::Deprecated(DeprecatedShape::Open)
            ]
        );
        assert_eq!(
            arrow_type("onormal").unwrap().shapes,
            vec![modern(true, None, Primitive::Normal)]
        );
    }

    #[test]
    fn at_most_four_shapes() {
        assert!(arrow_type("dotdotdotdot").is_ok());
        assert_eq!(
            arrow_type("dotdotdotdotdot").unwrap_err().detail,
            "Extraneous input 'dot' expecting <EOF>."
        );
    }

    #[test]
    fn rejections() {
        assert_eq!(
            arrow_type("").unwrap_err().detail,
            "Mismatched input '<EOF>' expecting RULE_SHAPE."
        );
        assert_eq!(
            arrow_type("Normal").unwrap_err().detail,
            "No viable alternative at character 'N'."
        );
        assert_eq!(
            arrow_type("o").unwrap_err().detail,
            "Mismatched input '<EOF>' expecting RULE_SHAPE."
        );
    }
}
