//! Resolution of one logical field from several producer-specific names.
//!
//! Precedence per concept is fixed here and nowhere else.

use serde_json::{Map, Value};

/// Study group topic label.
pub const GROUP_TOPIC: &[&str] = &["focus", "topic"];
/// Study group meeting time.
pub const GROUP_MEETING: &[&str] = &["next_meeting", "meeting_time"];
/// Study group capacity, free text before a seat count.
pub const GROUP_CAPACITY: &[&str] = &["availability", "available_seats"];
/// Priority task urgency label.
pub const TASK_URGENCY: &[&str] = &["urgency", "priority"];
/// Priority task ordering number.
pub const TASK_RANK: &[&str] = &["rank", "priority"];
/// Calendar event time, in the order the representations are preferred.
pub const EVENT_TIME: &[&str] = &["date", "date_time", "time"];

/// First field in `keys` that is present and non-null.
pub fn coalesce<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|value| !value.is_null())
}

/// Like [`coalesce`], but skips candidates `convert` cannot use. Lets `priority`
/// feed the urgency label when it is text and the rank when it is a number.
pub fn coalesce_with<T>(
    record: &Map<String, Value>,
    keys: &[&str],
    convert: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .filter(|value| !value.is_null())
        .find_map(convert)
}

/// Like [`coalesce_with`], for concepts where the winning name changes meaning.
/// `convert` sees each candidate's key, and a candidate it rejects falls
/// through to the next name.
pub fn coalesce_keyed<T>(
    record: &Map<String, Value>,
    keys: &[&str],
    convert: impl Fn(&str, &Value) -> Option<T>,
) -> Option<T> {
    keys.iter().find_map(|key| {
        record
            .get(*key)
            .filter(|value| !value.is_null())
            .and_then(|value| convert(*key, value))
    })
}

/// Scalars rendered as text; arrays, objects and null are not text.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Numbers, or strings that parse as numbers.
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

pub fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float as i64)),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

pub fn text(record: &Map<String, Value>, key: &str) -> Option<String> {
    coalesce_with(record, &[key], as_text)
}

pub fn text_or_empty(record: &Map<String, Value>, key: &str) -> String {
    text(record, key).unwrap_or_default()
}

pub fn number(record: &Map<String, Value>, key: &str) -> Option<f64> {
    coalesce_with(record, &[key], as_f64)
}

pub fn integer(record: &Map<String, Value>, key: &str) -> Option<i64> {
    coalesce_with(record, &[key], as_i64)
}

/// Array under `key`; absent or non-array values read as empty.
pub fn array<'a>(record: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    record
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Object under `key`, if it is one.
pub fn object<'a>(record: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    record.get(key).and_then(Value::as_object)
}

/// Scalar entries of an array as text. A lone scalar reads as a one-item list.
pub fn text_list(record: &Map<String, Value>, key: &str) -> Vec<String> {
    match record.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(as_text).collect(),
        Some(value) => as_text(value).into_iter().collect(),
        None => Vec::new(),
    }
}

/// Free text that some producers send as a list of lines.
pub fn paragraph(record: &Map<String, Value>, key: &str) -> String {
    match record.get(key) {
        Some(Value::Array(_)) => text_list(record, key).join("\n"),
        Some(value) => as_text(value).unwrap_or_default(),
        None => String::new(),
    }
}

/// Key/text pairs of an object in source order.
pub fn text_pairs(record: &Map<String, Value>, key: &str) -> Vec<(String, String)> {
    object(record, key)
        .map(|map| {
            map.iter()
                .map(|(name, value)| (name.clone(), as_text(value).unwrap_or_default()))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn empty_record_resolves_to_none() {
        assert_eq!(coalesce(&Map::new(), &["a", "b"]), None);
    }

    #[test]
    fn falls_through_to_later_key() {
        let rec = record(json!({ "b": "x" }));
        assert_eq!(coalesce(&rec, &["a", "b"]), Some(&json!("x")));
    }

    #[test]
    fn first_listed_key_wins() {
        let rec = record(json!({ "a": "y", "b": "x" }));
        assert_eq!(coalesce(&rec, &["a", "b"]), Some(&json!("y")));
    }

    #[test]
    fn null_counts_as_absent() {
        let rec = record(json!({ "a": null, "b": "x" }));
        assert_eq!(coalesce(&rec, &["a", "b"]), Some(&json!("x")));
        assert_eq!(
            coalesce_keyed(&rec, &["a", "b"], |key, _| Some(key.to_string())),
            Some("b".to_string())
        );
    }

    #[test]
    fn keyed_coalescing_falls_through_rejected_candidates() {
        let rec = record(json!({ "date": { "d": 1 }, "time": "9:00" }));
        let picked = coalesce_keyed(&rec, EVENT_TIME, |key, value| {
            as_text(value).map(|text| format!("{key}={text}"))
        });
        assert_eq!(picked, Some("time=9:00".to_string()));
    }

    #[test]
    fn typed_coalescing_skips_unusable_candidates() {
        let rec = record(json!({ "priority": 2, "task": "Review notes" }));
        assert_eq!(coalesce_with(&rec, TASK_URGENCY, |v| v.as_str().map(String::from)), None);
        assert_eq!(coalesce_with(&rec, TASK_RANK, as_i64), Some(2));

        let rec = record(json!({ "priority": "HIGH" }));
        assert_eq!(
            coalesce_with(&rec, TASK_URGENCY, |v| v.as_str().map(String::from)),
            Some("HIGH".to_string())
        );
        assert_eq!(coalesce_with(&rec, TASK_RANK, |v| v.as_i64()), None);
    }

    #[test]
    fn lenient_readers() {
        let rec = record(json!({
            "seats": "4",
            "score": 78.5,
            "members": 6,
            "tags": ["a", 1, null, {"x": 1}],
            "plan": { "Monday": "Graphs", "Tuesday": 3 }
        }));
        assert_eq!(integer(&rec, "seats"), Some(4));
        assert_eq!(number(&rec, "score"), Some(78.5));
        assert_eq!(text(&rec, "members"), Some("6".to_string()));
        assert_eq!(text_list(&rec, "tags"), vec!["a".to_string(), "1".to_string()]);
        assert_eq!(
            text_pairs(&rec, "plan"),
            vec![
                ("Monday".to_string(), "Graphs".to_string()),
                ("Tuesday".to_string(), "3".to_string())
            ]
        );
        assert!(array(&rec, "missing").is_empty());
        assert!(array(&rec, "score").is_empty());
        assert_eq!(text_or_empty(&rec, "missing"), "");

        let rec = record(json!({ "one": "Join a group", "many": ["a", "b"] }));
        assert_eq!(text_list(&rec, "one"), vec!["Join a group".to_string()]);
        assert_eq!(paragraph(&rec, "many"), "a\nb");
        assert_eq!(paragraph(&rec, "one"), "Join a group");
    }
}
