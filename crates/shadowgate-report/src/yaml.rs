//! Line-oriented YAML emitter.
//!
//! Emits the subset of YAML the alert-policy document needs: mappings,
//! sequences, and JSON-quoted scalars. Mapping key order follows the input.

use serde_json::Value;

fn scalar(value: &Value) -> String {
    match value {
        // JSON string encoding is always valid YAML double-quoted style.
        Value::String(text) => serde_json::to_string(text).unwrap_or_else(|_| format!("{text:?}")),
        other => other.to_string(),
    }
}

fn emit_into(value: &Value, indent: usize, lines: &mut Vec<String>) {
    let space = " ".repeat(indent);
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if child.is_object() || child.is_array() {
                    lines.push(format!("{space}{key}:"));
                    emit_into(child, indent + 2, lines);
                } else {
                    lines.push(format!("{space}{key}: {}", scalar(child)));
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                if item.is_object() || item.is_array() {
                    lines.push(format!("{space}-"));
                    emit_into(item, indent + 2, lines);
                } else {
                    lines.push(format!("{space}- {}", scalar(item)));
                }
            }
        }
        _ => {}
    }
}

/// Render a mapping or sequence. Bare top-level scalars render as nothing.
pub fn emit_yaml(value: &Value) -> String {
    let mut lines = Vec::new();
    emit_into(value, 0, &mut lines);
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_mappings_and_sequences() {
        let doc = json!({
            "version": "1.0.0",
            "count": 3,
            "limits": {"soft": 0.5, "hard": 1},
            "tags": ["a", "b \"quoted\""],
            "rules": [{"name": "r1", "for": "5m"}, {"name": "r2", "for": "1m"}],
            "empty": {},
        });
        insta::assert_snapshot!(emit_yaml(&doc), @r###"
        version: "1.0.0"
        count: 3
        limits:
          soft: 0.5
          hard: 1
        tags:
          - "a"
          - "b \"quoted\""
        rules:
          -
            name: "r1"
            for: "5m"
          -
            name: "r2"
            for: "1m"
        empty:
        "###);
    }

    #[test]
    fn top_level_scalar_renders_empty_document() {
        assert_eq!(emit_yaml(&json!("alone")), "\n");
    }
}
