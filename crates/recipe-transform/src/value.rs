//! Rendering loosely-typed document values as table cells.
//!
//! An absent field or JSON `null` renders as an empty cell. Strings pass
//! through untouched; numbers and booleans use their JSON spelling; arrays
//! and objects are kept as compact JSON so nothing is silently dropped.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use recipe_ingest::Document;

/// Render any JSON value as cell text.
pub fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Cell text of `field`, or an empty string when absent.
pub fn text_cell(document: &Document, field: &str) -> String {
    document.get(field).map(render).unwrap_or_default()
}

/// Cell text of `field`, or `None` when absent.
pub fn optional_cell(document: &Document, field: &str) -> Option<String> {
    document.get(field).map(render)
}

/// Cell text of a timestamp-like field in RFC 3339 form.
///
/// Accepted shapes:
/// - a string, kept verbatim
/// - a number of seconds since the Unix epoch
/// - an object with `seconds`/`nanos` (or `_seconds`/`_nanoseconds`)
///
/// Anything else falls back to [`render`].
pub fn timestamp_cell(document: &Document, field: &str) -> String {
    document.get(field).map(render_timestamp).unwrap_or_default()
}

fn render_timestamp(value: &Value) -> String {
    let instant = match value {
        Value::Number(number) => number.as_i64().map_or_else(
            || number.as_f64().and_then(from_fractional_seconds),
            |seconds| DateTime::from_timestamp(seconds, 0),
        ),
        Value::Object(fields) => {
            let seconds = fields
                .get("seconds")
                .or_else(|| fields.get("_seconds"))
                .and_then(Value::as_i64);
            let nanos = fields
                .get("nanos")
                .or_else(|| fields.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .and_then(|nanos| u32::try_from(nanos).ok())
                .unwrap_or(0);
            seconds.and_then(|seconds| DateTime::from_timestamp(seconds, nanos))
        }
        _ => None,
    };
    match instant {
        Some(instant) => format_instant(instant),
        None => render(value),
    }
}

fn from_fractional_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1_000_000_000.0).round() as u32;
    DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
}

fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        Document::from_value(value).0
    }

    #[test]
    fn test_render_scalars() {
        assert_eq!(render(&json!(null)), "");
        assert_eq!(render(&json!("Soup")), "Soup");
        assert_eq!(render(&json!(35)), "35");
        assert_eq!(render(&json!(0.5)), "0.5");
        assert_eq!(render(&json!(true)), "true");
        assert_eq!(render(&json!(["a", 1])), r#"["a",1]"#);
    }

    #[test]
    fn test_missing_and_null_fields_are_empty() {
        let document = doc(json!({"title": null}));
        assert_eq!(text_cell(&document, "title"), "");
        assert_eq!(text_cell(&document, "absent"), "");
        assert_eq!(optional_cell(&document, "title"), None);
    }

    #[test]
    fn test_timestamp_shapes() {
        let document = doc(json!({
            "text": "2024-05-01 10:00:00+00:00",
            "epoch": 1_700_000_000,
            "fractional": 1_700_000_000.5,
            "object": {"seconds": 1_700_000_000, "nanos": 0},
            "export": {"_seconds": 1_700_000_000, "_nanoseconds": 250_000_000},
            "odd": {"when": "later"},
        }));
        assert_eq!(timestamp_cell(&document, "text"), "2024-05-01 10:00:00+00:00");
        assert_eq!(timestamp_cell(&document, "epoch"), "2023-11-14T22:13:20Z");
        assert_eq!(
            timestamp_cell(&document, "fractional"),
            "2023-11-14T22:13:20.500Z"
        );
        assert_eq!(timestamp_cell(&document, "object"), "2023-11-14T22:13:20Z");
        assert_eq!(
            timestamp_cell(&document, "export"),
            "2023-11-14T22:13:20.250Z"
        );
        assert_eq!(timestamp_cell(&document, "odd"), r#"{"when":"later"}"#);
        assert_eq!(timestamp_cell(&document, "missing"), "");
    }
}
