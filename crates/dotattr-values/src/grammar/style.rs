use winnow::ascii::multispace0;
use winnow::combinator::{cut_err, delimited, opt, preceded, separated, terminated};
use winnow::token::take_while;
use winnow::{ModalResult, Parser};

use super::{label, run, Input, SyntaxError, RULE_STRING};
use crate::value::{Style, StyleItem};

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.')
}

fn style_alphabet(c: char) -> bool {
    is_name_char(c) || matches!(c, '(' | ')' | ',')
}

fn style_name<'i>(input: &mut Input<'i>) -> ModalResult<&'i str> {
    take_while(1.., is_name_char)
        .context(label(RULE_STRING))
        .parse_next(input)
}

fn style_arg<'i>(input: &mut Input<'i>) -> ModalResult<&'i str> {
    delimited(multispace0, style_name, multispace0).parse_next(input)
}

/// `name` or `name(arg, ...)`
fn style_item(input: &mut Input<'_>) -> ModalResult<StyleItem> {
    let name = style_name.parse_next(input)?;
    let args: Option<Vec<&str>> = opt(preceded(
        (multispace0, '('),
        cut_err(terminated(
            separated(0.., style_arg, ','),
            (multispace0, ')').context(label("')'")),
        )),
    ))
    .parse_next(input)?;
    Ok(StyleItem::with_args(name, args.unwrap_or_default()))
}

fn style_value(input: &mut Input<'_>) -> ModalResult<Style> {
    let items: Option<Vec<StyleItem>> = opt(separated(
        1..,
        delimited(multispace0, style_item, multispace0),
        ',',
    ))
    .parse_next(input)?;
    Ok(Style {
        items: items.unwrap_or_default(),
    })
}

pub(crate) fn style(text: &str) -> Result<Style, SyntaxError> {
    run(text, style_alphabet, style_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_style() {
        assert_eq!(style(""), Ok(Style::default()));
        assert_eq!(style("  "), Ok(Style::default()));
    }

    #[test]
    fn items_and_arguments() {
        let s = style("bold, dashed,setlinewidth(4)").unwrap();
        assert_eq!(
            s.items,
            vec![
                StyleItem::new("bold"),
                StyleItem::new("dashed"),
                StyleItem::with_args("setlinewidth", ["4"]),
            ]
        );
        let s = style("custom( a , b )").unwrap();
        assert_eq!(s.items[0].args, ["a", "b"]);
    }

    #[test]
    fn rejections() {
        assert_eq!(
            style("bold;dashed").unwrap_err().detail,
            "No viable alternative at character ';'."
        );
        assert_eq!(
            style("setlinewidth(4").unwrap_err().detail,
            "Mismatched input '<EOF>' expecting ')'."
        );
    }
}
