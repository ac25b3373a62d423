//! Tolerant extraction of a JSON object from raw model output.
//!
//! Models asked for strict JSON still wrap it in markdown fences or preface
//! it with commentary. Bounding the parse by the first `{` and the last `}`
//! recovers the common case (one object, extraneous text around it) without
//! attempting repair of malformed JSON. Out of scope: multiple independent
//! objects in one reply, top-level arrays, and brace characters inside
//! string literals before the real object starts.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ExtractionError {
    #[error("model output was empty")]
    Empty,

    #[error("no JSON object boundary found in model output")]
    NoJsonBoundary,

    #[error("malformed JSON between object boundaries: {raw}")]
    MalformedJson { raw: String },
}

/// Locates and parses the JSON object embedded in `raw`.
///
/// The result is always an object. `MalformedJson` carries the full raw
/// text so the failure can be diagnosed at the response boundary; a partial
/// or empty object is never substituted.
pub fn extract_object(raw: &str) -> Result<Map<String, Value>, ExtractionError> {
    if raw.trim().is_empty() {
        return Err(ExtractionError::Empty);
    }

    let start = raw.find('{').ok_or(ExtractionError::NoJsonBoundary)?;
    let end = raw.rfind('}').ok_or(ExtractionError::NoJsonBoundary)?;
    if end <= start {
        return Err(ExtractionError::NoJsonBoundary);
    }

    // `{` and `}` are ASCII, so byte indices land on char boundaries.
    let span = &raw[start..=end];
    serde_json::from_str::<Map<String, Value>>(span).map_err(|_| ExtractionError::MalformedJson {
        raw: raw.to_string(),
    })
}

/// Fills fields the model omitted. A key present with a non-null value is
/// never overwritten; absent or `null` keys take the default. Idempotent.
pub fn backfill_defaults(object: &mut Map<String, Value>, defaults: &Map<String, Value>) {
    for (key, value) in defaults {
        let absent = matches!(object.get(key), None | Some(Value::Null));
        if absent {
            object.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn defaults_from(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_extract_bare_object() {
        let object = extract_object(r#"{"a": 1, "b": "two"}"#).unwrap();
        assert_eq!(object.get("a"), Some(&json!(1)));
        assert_eq!(object.get("b"), Some(&json!("two")));
    }

    #[test]
    fn test_extract_object_inside_code_fence() {
        let raw = "Sure! ```json\n{\"a\":1}\n```";
        let object = extract_object(raw).unwrap();
        assert_eq!(object.get("a"), Some(&json!(1)));
        assert_eq!(object.len(), 1);
    }

    #[test]
    fn test_extract_object_with_prose_prefix_and_suffix() {
        let raw = "Here is the analysis you asked for:\n{\"score\": 7}\nLet me know if you need more.";
        let object = extract_object(raw).unwrap();
        assert_eq!(object.get("score"), Some(&json!(7)));
    }

    #[test]
    fn test_extract_nested_object_uses_outermost_braces() {
        let raw = "result: {\"outer\": {\"inner\": 2}} done";
        let object = extract_object(raw).unwrap();
        assert_eq!(object.get("outer"), Some(&json!({"inner": 2})));
    }

    #[test]
    fn test_extract_empty_input() {
        assert_eq!(extract_object(""), Err(ExtractionError::Empty));
        assert_eq!(extract_object("   \n\t"), Err(ExtractionError::Empty));
    }

    #[test]
    fn test_extract_no_braces() {
        assert_eq!(
            extract_object("no braces here"),
            Err(ExtractionError::NoJsonBoundary)
        );
    }

    #[test]
    fn test_extract_close_brace_before_open_brace() {
        assert_eq!(
            extract_object("} backwards {"),
            Err(ExtractionError::NoJsonBoundary)
        );
    }

    #[test]
    fn test_extract_only_open_brace() {
        assert_eq!(extract_object("{"), Err(ExtractionError::NoJsonBoundary));
    }

    #[test]
    fn test_extract_truncated_object_is_malformed() {
        let raw = "{ valid text } trailing { malformed";
        // Span runs from the first `{` to the last `}`, and `{ valid text }`
        // is not JSON. Must fail, never return a partial object.
        match extract_object(raw) {
            Err(ExtractionError::MalformedJson { raw: carried }) => assert_eq!(carried, raw),
            other => panic!("expected MalformedJson, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_stray_open_brace_after_complete_object() {
        // The last `}` closes the first object, so the span excludes the
        // trailing garbage and parses cleanly.
        let raw = "{ \"valid\": true } trailing { malformed";
        let object = extract_object(raw).unwrap();
        assert_eq!(object.get("valid"), Some(&json!(true)));
    }

    #[test]
    fn test_extract_two_objects_in_one_reply_is_malformed() {
        // Known heuristic limit: the first-{/last-} span covers both objects
        // and the prose between them, which is not valid JSON.
        let raw = "{\"a\":1} and also {\"b\":2}";
        assert!(matches!(
            extract_object(raw),
            Err(ExtractionError::MalformedJson { .. })
        ));
    }

    #[test]
    fn test_extract_object_inside_top_level_array() {
        // The boundary scan ignores the array brackets and recovers the
        // embedded object, so the object-shaped invariant still holds.
        let raw = "[{\"a\":1}]";
        let object = extract_object(raw).unwrap();
        assert_eq!(object.get("a"), Some(&json!(1)));
    }

    #[test]
    fn test_extract_braceless_array_has_no_boundary() {
        // Callers require object-shaped output to merge defaults into; a
        // bare array is never promoted to one.
        assert_eq!(
            extract_object("[1, 2]"),
            Err(ExtractionError::NoJsonBoundary)
        );
    }

    #[test]
    fn test_backfill_fills_absent_and_null_keys() {
        let mut object = defaults_from(json!({"summary": "packed", "trip": null}));
        let defaults = defaults_from(json!({
            "trip": {"destination": "Osaka"},
            "disclaimer": "not professional advice"
        }));

        backfill_defaults(&mut object, &defaults);

        assert_eq!(object.get("summary"), Some(&json!("packed")));
        assert_eq!(object.get("trip"), Some(&json!({"destination": "Osaka"})));
        assert_eq!(
            object.get("disclaimer"),
            Some(&json!("not professional advice"))
        );
    }

    #[test]
    fn test_backfill_never_overwrites_present_values() {
        let mut object = defaults_from(json!({"disclaimer": "model wrote its own"}));
        let defaults = defaults_from(json!({"disclaimer": "default"}));

        backfill_defaults(&mut object, &defaults);

        assert_eq!(object.get("disclaimer"), Some(&json!("model wrote its own")));
    }

    #[test]
    fn test_backfill_is_idempotent() {
        let mut object = defaults_from(json!({"a": 1}));
        let defaults = defaults_from(json!({"b": 2, "c": null}));

        backfill_defaults(&mut object, &defaults);
        let once = object.clone();
        backfill_defaults(&mut object, &defaults);

        assert_eq!(object, once);
    }
}
