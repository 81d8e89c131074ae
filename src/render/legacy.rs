//! legacy 格式的值渲染（普通 JSON 值）

use serde_json::Value;

use super::ValueRenderer;
use super::escape::escape_html;
use crate::session::scalar_to_string;

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyValueRenderer;

impl ValueRenderer for LegacyValueRenderer {
    type Value = Value;

    fn render(&self, value: &Value) -> String {
        match value {
            Value::Null => "null".to_string(),
            Value::String(s) if s == "undefined" => "undefined".to_string(),
            Value::Object(map) if map.get("type").and_then(Value::as_str) == Some("Error") => {
                let message = map
                    .get("message")
                    .and_then(scalar_to_string)
                    .unwrap_or_else(|| "undefined".to_string());
                let stack = map.get("stack").and_then(scalar_to_string).unwrap_or_default();
                escape_html(&format!("{message}\n{stack}"))
            }
            Value::Object(_) | Value::Array(_) => match serde_json::to_string(value) {
                Ok(json) => escape_html(&json),
                Err(_) => escape_html(&value.to_string()),
            },
            other => escape_html(&scalar_to_string(other).unwrap_or_default()),
        }
    }
}
