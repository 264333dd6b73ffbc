//! Change summaries for audit entries

use std::collections::BTreeSet;

use serde_json::Value;

/// Bookkeeping fields that change on every update
const IGNORED_FIELDS: &[&str] = &["updated_at"];

/// Longest string shown verbatim in a summary
const MAX_STRING_CHARS: usize = 48;

/// Summarize the differences between two serialized states
///
/// Nested objects are walked and reported by dotted path
/// (`category.named: "Transport" -> "Dining"`). Returns `None` when nothing
/// but ignored bookkeeping fields changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let mut changes = Vec::new();
    collect_changes("", before, after, &mut changes);
    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn collect_changes(path: &str, before: &Value, after: &Value, changes: &mut Vec<String>) {
    match (before, after) {
        (Value::Object(old), Value::Object(new)) => {
            let keys: BTreeSet<&String> = old.keys().chain(new.keys()).collect();
            for key in keys {
                if path.is_empty() && IGNORED_FIELDS.contains(&key.as_str()) {
                    continue;
                }
                let child = join_path(path, key);
                match (old.get(key), new.get(key)) {
                    (Some(a), Some(b)) => collect_changes(&child, a, b, changes),
                    (Some(a), None) => {
                        changes.push(format!("{}: {} -> (removed)", child, format_value(a)))
                    }
                    (None, Some(b)) => {
                        changes.push(format!("{}: (added) -> {}", child, format_value(b)))
                    }
                    (None, None) => {}
                }
            }
        }
        _ if before != after => {
            let label = if path.is_empty() { "value" } else { path };
            changes.push(format!(
                "{}: {} -> {}",
                label,
                format_value(before),
                format_value(after)
            ));
        }
        _ => {}
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_STRING_CHARS => {
            let head: String = s.chars().take(MAX_STRING_CHARS - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}
