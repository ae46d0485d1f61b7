use winnow::ascii::{digit0, digit1};
use winnow::combinator::{alt, opt};
use winnow::token::one_of;
use winnow::{ModalResult, Parser};

use super::{label, run, Input, SyntaxError, RULE_DOUBLE, RULE_INT};

fn double_alphabet(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E')
}

fn int_alphabet(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-')
}

/// Decimal literal: optional sign, digits with optional fraction or a
/// leading `.`, optional exponent. Values that overflow to infinity are
/// rejected.
pub(crate) fn number(input: &mut Input<'_>) -> ModalResult<f64> {
    (
        opt(one_of(['+', '-'])),
        alt(((digit1, opt(('.', digit0))).void(), ('.', digit1).void())),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .try_map(|s: &str| s.parse::<f64>())
        .verify(|d: &f64| d.is_finite())
        .context(label(RULE_DOUBLE))
        .parse_next(input)
}

fn integer(input: &mut Input<'_>) -> ModalResult<i64> {
    (opt(one_of(['+', '-'])), digit1)
        .take()
        .try_map(|s: &str| s.parse::<i64>())
        .context(label(RULE_INT))
        .parse_next(input)
}

pub(crate) fn double(text: &str) -> Result<f64, SyntaxError> {
    run(text, double_alphabet, number)
}

pub(crate) fn int(text: &str) -> Result<i64, SyntaxError> {
    run(text, int_alphabet, integer)
}

/// `true`/`yes`/`false`/`no` in any case, or an integer (non-zero is true).
pub(crate) fn bool(text: &str) -> Result<bool, SyntaxError> {
    let t = text.trim();
    if t.eq_ignore_ascii_case("true") || t.eq_ignore_ascii_case("yes") {
        return Ok(true);
    }
    if t.eq_ignore_ascii_case("false") || t.eq_ignore_ascii_case("no") {
        return Ok(false);
    }
    match t.parse::<i64>() {
        Ok(i) => Ok(i != 0),
        Err(_) => Err(SyntaxError::new(
            0,
            format!(
                "The given value '{text}' does not (case-insensitively) equal 'true', 'yes', 'false' or 'no' and is also not parsable as an integer value."
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles() {
        assert_eq!(double("0.02"), Ok(0.02));
        assert_eq!(double(" -100.0 "), Ok(-100.0));
        assert_eq!(double(".5"), Ok(0.5));
        assert_eq!(double("3."), Ok(3.0));
        assert_eq!(double("+1e3"), Ok(1000.0));
        assert_eq!(double("2E-2"), Ok(0.02));
    }

    #[test]
    fn overflowing_doubles_are_rejected() {
        assert!(double("1e400").is_err());
        assert!(double("-1e400").is_err());
        assert_eq!(double("1e308"), Ok(1e308));
        assert_eq!(double("1e-400"), Ok(0.0));
    }

    #[test]
    fn double_rejections() {
        assert_eq!(
            double("1.5.3").unwrap_err().detail,
            "Extraneous input '.3' expecting <EOF>."
        );
        assert_eq!(
            double("-").unwrap_err().detail,
            "Mismatched input '<EOF>' expecting RULE_DOUBLE."
        );
        assert_eq!(
            double("1,5").unwrap_err().detail,
            "No viable alternative at character ','."
        );
    }

    #[test]
    fn ints() {
        assert_eq!(int("0"), Ok(0));
        assert_eq!(int("-1"), Ok(-1));
        assert_eq!(
            int("1.5").unwrap_err().detail,
            "No viable alternative at character '.'."
        );
        assert_eq!(
            int("").unwrap_err().detail,
            "Mismatched input '<EOF>' expecting RULE_INT."
        );
    }

    #[test]
    fn bools() {
        assert_eq!(bool("TRUE"), Ok(true));
        assert_eq!(bool("Yes"), Ok(true));
        assert_eq!(bool("no"), Ok(false));
        assert_eq!(bool("0"), Ok(false));
        assert_eq!(bool("-3"), Ok(true));
        assert_eq!(
            bool("maybe").unwrap_err().detail,
            "The given value 'maybe' does not (case-insensitively) equal 'true', 'yes', 'false' or 'no' and is also not parsable as an integer value."
        );
    }
}
