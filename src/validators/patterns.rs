//! Regex- and format-backed method rules.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::context::ValidationContext;
use crate::descriptor::Params;
use crate::error::EngineError;
use crate::field::Field;
use crate::rules::Outcome;
use crate::validators::named_violation;
use crate::value_ext::ValueExt;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9_.\-])+@(([a-zA-Z0-9\-])+\.)+([a-zA-Z0-9]{2,4})+$")
        .expect("email pattern is valid")
});

static ALPHA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]*$").expect("alpha pattern is valid"));

static ALPHA_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("alphanumeric pattern is valid"));

static ALPHA_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z ]*$").expect("alphaspace pattern is valid"));

static MOBILE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6789]\d{9}$").expect("mobile pattern is valid"));

// Deliberately unanchored: any embedded 5+6 digit group matches.
static LANDLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{5}([- ]*)\d{6}").expect("landline pattern is valid"));

fn check(
    field: &Field,
    pattern: &Regex,
    template: &str,
) -> Result<Outcome, EngineError> {
    if pattern.is_match(&field.value().coerce_str()) {
        Ok(Outcome::Pass)
    } else {
        Ok(Outcome::Fail(named_violation(field, template)))
    }
}

/// `email`: simple address shape with a 2-4 character top-level domain.
pub fn email(
    field: &Field,
    _params: &Params,
    _ctx: &ValidationContext,
) -> Result<Outcome, EngineError> {
    check(field, &EMAIL, "{name} should be a valid email id")
}

/// `alpha`: ASCII letters only (the empty string passes).
pub fn alpha(
    field: &Field,
    _params: &Params,
    _ctx: &ValidationContext,
) -> Result<Outcome, EngineError> {
    check(field, &ALPHA, "{name} should be alphabetic")
}

/// `alphaNumeric`: ASCII letters and digits, at least one character.
pub fn alpha_numeric(
    field: &Field,
    _params: &Params,
    _ctx: &ValidationContext,
) -> Result<Outcome, EngineError> {
    check(field, &ALPHA_NUMERIC, "{name} should be alphanumeric")
}

/// `alphaspace`: ASCII letters and spaces (the empty string passes).
pub fn alpha_space(
    field: &Field,
    _params: &Params,
    _ctx: &ValidationContext,
) -> Result<Outcome, EngineError> {
    check(field, &ALPHA_SPACE, "{name} should be alphabetic with spaces")
}

/// `mobileNumber`: ten digits starting with 6-9.
pub fn mobile_number(
    field: &Field,
    _params: &Params,
    _ctx: &ValidationContext,
) -> Result<Outcome, EngineError> {
    check(field, &MOBILE_NUMBER, "{name} should be a valid Mobile Number")
}

/// `landline`: a 5-digit area code and 6-digit number, with optional
/// separators.
pub fn landline(
    field: &Field,
    _params: &Params,
    _ctx: &ValidationContext,
) -> Result<Outcome, EngineError> {
    check(field, &LANDLINE, "{name} should be the valid Landline number")
}

/// `url`: parseable absolute URL with a host.
pub fn url_rule(
    field: &Field,
    _params: &Params,
    _ctx: &ValidationContext,
) -> Result<Outcome, EngineError> {
    let ok = Url::parse(&field.value().coerce_str()).is_ok_and(|u| u.has_host());
    if ok {
        Ok(Outcome::Pass)
    } else {
        Ok(Outcome::Fail(named_violation(
            field,
            "{name} should be a valid URL",
        )))
    }
}

/// `regex`: matches the caller-supplied pattern from the parameter bag.
///
/// An absent or invalid pattern is a construction mistake, not a data
/// failure, and surfaces as [`EngineError::Construction`].
pub fn regex_rule(
    field: &Field,
    params: &Params,
    _ctx: &ValidationContext,
) -> Result<Outcome, EngineError> {
    let pattern = params
        .arg_str(0, "expression")
        .ok_or_else(|| EngineError::construction("regex", "missing pattern parameter"))?;
    let compiled = Regex::new(pattern)
        .map_err(|e| EngineError::construction("regex", e.to_string()))?;

    if compiled.is_match(&field.value().coerce_str()) {
        Ok(Outcome::Pass)
    } else {
        Ok(Outcome::Fail(
            named_violation(field, "{name} should match the regex format : {pattern}")
                .with_param("pattern", pattern),
        ))
    }
}
