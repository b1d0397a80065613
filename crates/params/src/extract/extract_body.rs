use crate::error::ExtractError;
use http::HeaderMap;
use serde_json::{Map, Number, Value};

/// Parses `bytes` as JSON, requiring an object at the top level.
pub(crate) fn decode_json_object(bytes: &[u8]) -> Result<Map<String, Value>, ExtractError> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(map) => Ok(map),
        _ => Err(ExtractError::NotJsonObject),
    }
}

pub(crate) fn decode_form(bytes: &[u8]) -> Result<Vec<(String, String)>, ExtractError> {
    Ok(serde_urlencoded::from_bytes::<Vec<(String, String)>>(bytes)?)
}

/// Whether the request declares an `application/x-www-form-urlencoded` body.
pub(crate) fn is_form_content(headers: &HeaderMap) -> bool {
    headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<mime::Mime>().ok())
        .is_some_and(|mime| mime.essence_str() == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str())
}

/// Renders a top level JSON field as text so it can be coerced like any other source.
///
/// Nested values, `null` and missing fields all become the empty string.
pub(crate) fn json_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => number_text(n),
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(float_text).unwrap_or_default()
    }
}

// 2^63, the first integral f64 outside i64.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

// Integral values drop their fraction so `30.0` still coerces as an int. Anything else
// uses f64's Debug text: shortest round-trip digits, in exponent form at extreme magnitudes.
fn float_text(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < I64_BOUND {
        #[allow(clippy::cast_possible_truncation, reason = "integral and within i64 range")]
        let i = f as i64;
        i.to_string()
    } else {
        format!("{f:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use serde_json::json;

    #[test]
    fn json_object_required() {
        let map = decode_json_object(br#"{"age": 30, "name": "Ann"}"#).unwrap();
        assert_eq!(map.len(), 2);

        assert!(matches!(decode_json_object(b"[1, 2]"), Err(ExtractError::NotJsonObject)));
        assert!(matches!(decode_json_object(b"null"), Err(ExtractError::NotJsonObject)));
        assert!(matches!(decode_json_object(b"{\"age\":"), Err(ExtractError::InvalidJson { .. })));
        assert!(matches!(decode_json_object(b""), Err(ExtractError::InvalidJson { .. })));
    }

    #[test]
    fn json_text_conversion() {
        assert_eq!(json_text(Some(&json!(true))), "true");
        assert_eq!(json_text(Some(&json!(false))), "false");
        assert_eq!(json_text(Some(&json!(30))), "30");
        assert_eq!(json_text(Some(&json!(-12))), "-12");
        assert_eq!(json_text(Some(&json!(u64::MAX))), "18446744073709551615");
        assert_eq!(json_text(Some(&json!(30.0))), "30");
        assert_eq!(json_text(Some(&json!(2.5))), "2.5");
        assert_eq!(json_text(Some(&json!(0.1))), "0.1");
        assert_eq!(json_text(Some(&json!(1.5e300))), "1.5e300");
        assert_eq!(json_text(Some(&json!(1e-7))), "1e-7");
        assert_eq!(json_text(Some(&json!(-2.5e-9))), "-2.5e-9");
        assert_eq!(json_text(Some(&json!(1e21))), "1e21");
        assert_eq!(json_text(Some(&json!("a \"quoted\" name"))), "a \"quoted\" name");
        assert_eq!(json_text(Some(&json!(null))), "");
        assert_eq!(json_text(Some(&json!([1, 2]))), "");
        assert_eq!(json_text(Some(&json!({"nested": 1}))), "");
        assert_eq!(json_text(None), "");
    }

    #[test]
    fn form_fields() {
        let fields = decode_form(b"name=Ann+Lee&age=30&name=Bob").unwrap();
        assert_eq!(fields[0], ("name".to_owned(), "Ann Lee".to_owned()));
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn form_content_type() {
        let mut headers = HeaderMap::new();
        assert!(!is_form_content(&headers));

        headers.insert(http::header::CONTENT_TYPE, HeaderValue::from_static("application/x-www-form-urlencoded"));
        assert!(is_form_content(&headers));

        headers.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded; charset=UTF-8"),
        );
        assert!(is_form_content(&headers));

        headers.insert(http::header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert!(!is_form_content(&headers));
    }
}
