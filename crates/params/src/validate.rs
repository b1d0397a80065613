//! Per-type validation routines.
//!
//! Every routine receives the raw text extracted for a parameter and either stores the
//! coerced value on it or returns the first [`Rejection`] hit. Later checks are skipped
//! once one fails.

use crate::param::{Param, ParamType, ParamValue};
use thiserror::Error;

/// Why a parameter failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("required value is missing")]
    Missing,

    #[error("value is shorter than {min} bytes")]
    TooShort { min: usize },

    #[error("value is longer than {max} bytes")]
    TooLong { max: usize },

    #[error("value is not a valid {data_type}")]
    Malformed { data_type: ParamType },
}

/// Parses the canonical boolean tokens: `1, t, T, TRUE, true, True` and `0, f, F, FALSE, false`.
///
/// # Example
/// ```
/// use micro_params::validate::parse_bool;
///
/// assert_eq!(parse_bool("True"), Some(true));
/// assert_eq!(parse_bool("F"), Some(false));
/// assert_eq!(parse_bool("yes"), None);
/// ```
pub fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" => Some(false),
        _ => None,
    }
}

/// Runs the routine matching the parameter's type against `raw`.
pub(crate) fn validate_param(param: &mut Param, raw: String) -> Result<(), Rejection> {
    param.set_raw(raw);
    match param.data_type() {
        ParamType::Int => validate_parsed(param, |raw| raw.parse::<i64>().ok().map(ParamValue::Int)),
        ParamType::Float => validate_parsed(param, |raw| raw.parse::<f64>().ok().map(ParamValue::Float)),
        ParamType::Bool => validate_parsed(param, |raw| parse_bool(raw).map(ParamValue::Bool)),
        ParamType::String => validate_string(param),
    }
}

fn validate_parsed<F>(param: &mut Param, coerce: F) -> Result<(), Rejection>
where
    F: FnOnce(&str) -> Option<ParamValue>,
{
    if param.raw().is_empty() {
        return if param.required() { Err(Rejection::Missing) } else { Ok(()) };
    }

    let value = coerce(param.raw()).ok_or(Rejection::Malformed { data_type: param.data_type() })?;
    param.set_present_value(value);
    Ok(())
}

// Optional strings are never length checked.
fn validate_string(param: &mut Param) -> Result<(), Rejection> {
    let len = param.raw().len();
    if len == 0 {
        return if param.required() { Err(Rejection::Missing) } else { Ok(()) };
    }

    if param.required() {
        if param.min_length() > 0 && len < param.min_length() {
            return Err(Rejection::TooShort { min: param.min_length() });
        }
        if param.max_length() > 0 && len > param.max_length() {
            return Err(Rejection::TooLong { max: param.max_length() });
        }
    }

    let value = ParamValue::String(param.raw().to_owned());
    param.set_present_value(value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param::ParamSource;

    fn param(data_type: ParamType, required: bool) -> Param {
        Param::new("p", "E_P", ParamSource::Query, data_type, required)
    }

    #[test]
    fn canonical_bool_tokens() {
        for token in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(token), Some(true), "token {token}");
        }
        for token in ["0", "f", "F", "FALSE", "false"] {
            assert_eq!(parse_bool(token), Some(false), "token {token}");
        }
        for token in ["yes", "no", "tRuE", "False ", "2", ""] {
            assert_eq!(parse_bool(token), None, "token {token:?}");
        }
    }

    #[test]
    fn int_coercion() {
        let mut p = param(ParamType::Int, true);
        assert_eq!(validate_param(&mut p, "42".into()), Ok(()));
        assert!(p.present());
        assert_eq!(p.as_int(), 42);

        let mut p = param(ParamType::Int, true);
        assert_eq!(validate_param(&mut p, "-7".into()), Ok(()));
        assert_eq!(p.as_int(), -7);

        let mut p = param(ParamType::Int, true);
        assert_eq!(validate_param(&mut p, "abc".into()), Err(Rejection::Malformed { data_type: ParamType::Int }));
        assert!(!p.present());
        assert_eq!(p.raw(), "abc");
    }

    #[test]
    fn float_coercion() {
        let mut p = param(ParamType::Float, false);
        assert_eq!(validate_param(&mut p, "2.5".into()), Ok(()));
        assert!((p.as_float() - 2.5).abs() < f64::EPSILON);

        let mut p = param(ParamType::Float, false);
        assert_eq!(validate_param(&mut p, "2.5.1".into()), Err(Rejection::Malformed { data_type: ParamType::Float }));
    }

    #[test]
    fn bool_coercion() {
        let mut p = param(ParamType::Bool, true);
        assert_eq!(validate_param(&mut p, "T".into()), Ok(()));
        assert!(p.as_bool());

        let mut p = param(ParamType::Bool, true);
        assert_eq!(validate_param(&mut p, "yes".into()), Err(Rejection::Malformed { data_type: ParamType::Bool }));
    }

    #[test]
    fn required_and_empty_is_missing() {
        for data_type in [ParamType::Int, ParamType::Float, ParamType::Bool, ParamType::String] {
            let mut p = param(data_type, true);
            assert_eq!(validate_param(&mut p, String::new()), Err(Rejection::Missing), "{data_type}");
            assert!(!p.present());
        }
    }

    #[test]
    fn optional_and_empty_is_absent() {
        for data_type in [ParamType::Int, ParamType::Float, ParamType::Bool, ParamType::String] {
            let mut p = param(data_type, false);
            assert_eq!(validate_param(&mut p, String::new()), Ok(()), "{data_type}");
            assert!(!p.present());
            assert!(p.valid());
        }
    }

    #[test]
    fn string_length_bounds() {
        let bounded = || param(ParamType::String, true).with_length(3, 5);

        let mut p = bounded();
        assert_eq!(validate_param(&mut p, "ab".into()), Err(Rejection::TooShort { min: 3 }));
        let mut p = bounded();
        assert_eq!(validate_param(&mut p, "abcdef".into()), Err(Rejection::TooLong { max: 5 }));

        for ok in ["abc", "abcde"] {
            let mut p = bounded();
            assert_eq!(validate_param(&mut p, ok.into()), Ok(()));
            assert_eq!(p.as_str(), ok);
        }
    }

    #[test]
    fn optional_string_skips_length_bounds() {
        let mut p = param(ParamType::String, false).with_length(3, 5);
        assert_eq!(validate_param(&mut p, "abcdefgh".into()), Ok(()));
        assert_eq!(p.as_str(), "abcdefgh");
    }

    #[test]
    fn zero_bounds_are_unbounded() {
        let mut p = param(ParamType::String, true);
        assert_eq!(validate_param(&mut p, "x".repeat(1024)), Ok(()));
    }
}
