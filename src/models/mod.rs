//! Data models
//!
//! Three families of types live here:
//! - rows as stored in SQLite and returned verbatim by the admin API
//! - request bodies accepted by the admin API, which validate into `New*` values
//! - public views, the fixed JSON shapes served (obfuscated) to client apps

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub mod catalog;
pub mod event;
pub mod public;

pub use catalog::*;
pub use event::*;
pub use public::*;

/// Stream type used when none (or 0) is supplied
pub const DEFAULT_URL_TYPE: i64 = 3;

/// User agent reported to clients for streams stored without one
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Loose truthiness for boolean-as-integer fields: `true`, non-zero numbers,
/// non-empty strings, arrays and objects are truthy.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Coerce a truthy value to the stored `0`/`1` flag
pub fn flag(value: &Value) -> i64 {
    i64::from(truthy(value))
}

/// Integer view of a loosely typed JSON value: numbers (truncated), numeric
/// strings and booleans. Anything else is `None`.
pub fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f as i64)
            })
        }
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// `deserialize_with` helper for optional integer fields that clients may
/// send as strings. Values with no integer reading count as absent.
pub fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(integer))
}

/// Parse stored `headers` text. Empty or malformed text yields `{}`.
pub fn parse_headers(text: Option<&str>) -> Value {
    match text {
        Some(text) if !text.is_empty() => {
            serde_json::from_str(text).unwrap_or_else(|_| Value::Object(Default::default()))
        }
        _ => Value::Object(Default::default()),
    }
}

/// `Some` only for non-empty strings
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthy_coercion() {
        assert!(truthy(&json!(true)));
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!(2)));
        assert!(truthy(&json!("yes")));
        assert!(truthy(&json!("0")));
        assert!(truthy(&json!({})));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!(0.0)));
        assert!(!truthy(&json!("")));
        assert!(!truthy(&Value::Null));
        assert_eq!(flag(&json!("on")), 1);
        assert_eq!(flag(&json!(0)), 0);
    }

    #[test]
    fn test_integer_coercion() {
        assert_eq!(integer(&json!(5)), Some(5));
        assert_eq!(integer(&json!("5")), Some(5));
        assert_eq!(integer(&json!(" 12 ")), Some(12));
        assert_eq!(integer(&json!(7.9)), Some(7));
        assert_eq!(integer(&json!("2.5")), Some(2));
        assert_eq!(integer(&json!(true)), Some(1));
        assert_eq!(integer(&json!("high")), None);
        assert_eq!(integer(&json!("")), None);
        assert_eq!(integer(&Value::Null), None);
        assert_eq!(integer(&json!([1])), None);
    }

    #[test]
    fn test_parse_headers() {
        assert_eq!(parse_headers(Some(r#"{"Origin":"x"}"#)), json!({"Origin": "x"}));
        assert_eq!(parse_headers(Some("")), json!({}));
        assert_eq!(parse_headers(None), json!({}));
        assert_eq!(parse_headers(Some("{not json")), json!({}));
    }

    #[test]
    fn test_parse_headers_keeps_key_order() {
        let parsed = parse_headers(Some(r#"{"b":"1","a":"2"}"#));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), r#"{"b":"1","a":"2"}"#);
    }
}
