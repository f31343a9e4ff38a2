//! Change summaries for audit entries

use serde::Serialize;
use serde_json::Value;

/// Summarize which top-level fields differ between two records
///
/// Returns None when nothing changed or a record cannot be serialized.
/// Fields are listed in key order.
pub fn summarize_changes<T: Serialize>(before: &T, after: &T) -> Option<String> {
    let before = serde_json::to_value(before).ok()?;
    let after = serde_json::to_value(after).ok()?;

    let (Value::Object(old), Value::Object(new)) = (&before, &after) else {
        return (before != after).then(|| format!("{} -> {}", render(&before), render(&after)));
    };

    let changes: Vec<String> = old
        .iter()
        .filter_map(|(field, old_value)| {
            let new_value = new.get(field).unwrap_or(&Value::Null);
            (old_value != new_value)
                .then(|| format!("{}: {} -> {}", field, render(old_value), render(new_value)))
        })
        .collect();

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_changes() {
        let value = json!({"name": "Makan", "budget": 100});
        assert!(summarize_changes(&value, &value).is_none());
    }

    #[test]
    fn test_changed_fields_listed() {
        let before = json!({"name": "Makan", "budget": 100});
        let after = json!({"name": "Jajan", "budget": 100});
        assert_eq!(
            summarize_changes(&before, &after).unwrap(),
            "name: \"Makan\" -> \"Jajan\""
        );
    }

    #[test]
    fn test_scalar_values() {
        assert_eq!(summarize_changes(&1, &2).unwrap(), "1 -> 2");
    }
}
