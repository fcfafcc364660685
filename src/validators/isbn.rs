//! ISBN checksum rules.
//!
//! ISBN-10: weighted digit sum (weights 1..=10, final `X` counting as ten)
//! must be divisible by 11. ISBN-13: alternating 1/3-weighted digit sum
//! determines the check digit. The generic `isbn` rule dispatches on the
//! stripped length.

use crate::context::ValidationContext;
use crate::descriptor::Params;
use crate::error::EngineError;
use crate::field::Field;
use crate::rules::Outcome;
use crate::validators::named_violation;
use crate::value_ext::ValueExt;

const INVALID_ISBN: &str = "{name} should be a valid ISBN";

/// Keeps digits and `X`/`x`, dropping separators.
fn strip(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == 'X' || *c == 'x')
        .collect()
}

fn fail(field: &Field) -> Outcome {
    Outcome::Fail(named_violation(field, INVALID_ISBN))
}

fn check_isbn10(isbn: &str) -> bool {
    if isbn.len() != 10 {
        return false;
    }
    let bytes = isbn.as_bytes();
    let mut sum: u32 = 0;
    for (i, b) in bytes[..9].iter().enumerate() {
        if !b.is_ascii_digit() {
            return false;
        }
        sum += (i as u32 + 1) * u32::from(b - b'0');
    }
    let last = bytes[9].to_ascii_uppercase();
    if last == b'X' {
        sum += 10 * 10;
    } else if last.is_ascii_digit() {
        sum += 10 * u32::from(last - b'0');
    } else {
        return false;
    }
    sum % 11 == 0
}

fn check_isbn13(isbn: &str) -> bool {
    if isbn.len() != 13 {
        return false;
    }
    let bytes = isbn.as_bytes();
    if !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let sum: u32 = bytes[..12]
        .iter()
        .enumerate()
        .map(|(i, b)| u32::from(b - b'0') * if i % 2 == 0 { 1 } else { 3 })
        .sum();
    let check = (10 - (sum % 10)) % 10;
    check == u32::from(bytes[12] - b'0')
}

/// `isbn10`: ISBN-10 checksum.
pub fn isbn10(
    field: &Field,
    _params: &Params,
    _ctx: &ValidationContext,
) -> Result<Outcome, EngineError> {
    let stripped = strip(&field.value().coerce_str());
    if check_isbn10(&stripped) {
        Ok(Outcome::Pass)
    } else {
        Ok(fail(field))
    }
}

/// `isbn13`: ISBN-13 checksum.
pub fn isbn13(
    field: &Field,
    _params: &Params,
    _ctx: &ValidationContext,
) -> Result<Outcome, EngineError> {
    let stripped = strip(&field.value().coerce_str());
    if check_isbn13(&stripped) {
        Ok(Outcome::Pass)
    } else {
        Ok(fail(field))
    }
}

/// `isbn`: dispatches to whichever variant matches the stripped length.
pub fn isbn(
    field: &Field,
    params: &Params,
    ctx: &ValidationContext,
) -> Result<Outcome, EngineError> {
    let stripped = strip(&field.value().coerce_str());
    match stripped.len() {
        10 => isbn10(field, params, ctx),
        13 => isbn13(field, params, ctx),
        _ => Ok(fail(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn run(
        rule: fn(&Field, &Params, &ValidationContext) -> Result<Outcome, EngineError>,
        value: &str,
    ) -> bool {
        let field = Field::with_value("book", json!(value));
        rule(&field, &Params::None, &ValidationContext::empty())
            .unwrap()
            .is_pass()
    }

    #[rstest]
    #[case("0-19-852663-6", true)] // real ISBN-10
    #[case("0198526636", true)]
    #[case("080442957X", true)] // X check digit
    #[case("0-19-852663-5", false)] // mutated digit
    #[case("123456789", false)] // wrong length
    fn isbn10_cases(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(run(isbn10, input), expected);
    }

    #[rstest]
    #[case("978-0-306-40615-7", true)]
    #[case("9780306406157", true)]
    #[case("978-0-306-40615-8", false)] // bad check digit
    #[case("978030640615", false)] // wrong length
    fn isbn13_cases(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(run(isbn13, input), expected);
    }

    #[test]
    fn generic_isbn_dispatches_on_length() {
        assert!(run(isbn, "0-19-852663-6"));
        assert!(run(isbn, "978-0-306-40615-7"));
        assert!(!run(isbn, "12345"));
    }

    #[test]
    fn any_single_digit_mutation_breaks_isbn10() {
        let valid = "0198526636";
        for i in 0..valid.len() {
            let mut chars: Vec<char> = valid.chars().collect();
            let original = chars[i].to_digit(10).unwrap();
            chars[i] = char::from_digit((original + 1) % 10, 10).unwrap();
            let mutated: String = chars.iter().collect();
            assert!(!run(isbn10, &mutated), "mutation at {i} still validated");
        }
    }
}
