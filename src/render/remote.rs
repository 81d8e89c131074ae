//! capture 格式的值渲染（RemoteObject）

use serde_json::Value;

use super::ValueRenderer;
use super::escape::escape_html;
use crate::session::{ObjectPreview, PropertyPreview, RemoteObject, RemoteType, number_text};

/// 预览嵌套的最大深度。采集端本身只给一层嵌套，这里不依赖这个假设。
pub const MAX_PREVIEW_DEPTH: usize = 10;

const UNDEFINED: &str = r#"<span class="ro-undefined">undefined</span>"#;
const NULL: &str = r#"<span class="ro-null">null</span>"#;

fn span(class: &str, text: &str) -> String {
    format!(r#"<span class="{class}">{text}</span>"#)
}

fn value_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Copy)]
pub struct RemoteObjectRenderer {
    max_depth: usize,
}

impl Default for RemoteObjectRenderer {
    fn default() -> Self {
        Self {
            max_depth: MAX_PREVIEW_DEPTH,
        }
    }
}

impl ValueRenderer for RemoteObjectRenderer {
    /// 非对象参数（如 `null`）在归一化时已变成 `None`。
    type Value = Option<RemoteObject>;

    fn render(&self, value: &Option<RemoteObject>) -> String {
        match value {
            Some(obj) => self.render_object(obj),
            None => "undefined".to_string(),
        }
    }
}

impl RemoteObjectRenderer {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// 字面量：description 优先（采集端已格式化好的文本），其次 value、unserializableValue。
    fn literal(obj: &RemoteObject) -> String {
        non_empty(obj.description.as_deref())
            .map(str::to_string)
            .or_else(|| obj.value.as_ref().and_then(value_text))
            .or_else(|| obj.unserializable_value.clone())
            .unwrap_or_default()
    }

    pub fn render_object(&self, obj: &RemoteObject) -> String {
        match obj.remote_type() {
            RemoteType::Undefined => UNDEFINED.to_string(),
            RemoteType::Boolean => {
                let text = obj
                    .value
                    .as_ref()
                    .and_then(value_text)
                    .unwrap_or_else(|| Self::literal(obj));
                span("ro-boolean", &escape_html(&text))
            }
            RemoteType::Number => span("ro-number", &escape_html(&Self::literal(obj))),
            RemoteType::Bigint => {
                let text = Self::literal(obj);
                let digits = text.strip_suffix('n').unwrap_or(&text);
                span("ro-number", &format!("{}n", escape_html(digits)))
            }
            RemoteType::String => {
                let text = match &obj.value {
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => value_text(other).unwrap_or_default(),
                    None => obj.description.clone().unwrap_or_default(),
                };
                span("ro-string", &escape_html(&text))
            }
            RemoteType::Symbol => {
                let desc = non_empty(obj.description.as_deref()).unwrap_or("Symbol()");
                span("ro-symbol", &escape_html(desc))
            }
            RemoteType::Function => {
                let desc = non_empty(obj.description.as_deref()).unwrap_or("anonymous");
                span("ro-function", &format!("\u{0192} {}", escape_html(desc)))
            }
            RemoteType::Object => self.render_object_like(obj),
            RemoteType::Unknown(_) => {
                let text = non_empty(obj.description.as_deref())
                    .map(str::to_string)
                    .or_else(|| obj.value.as_ref().and_then(value_text))
                    .unwrap_or_else(|| "undefined".to_string());
                escape_html(&text)
            }
        }
    }

    fn render_object_like(&self, obj: &RemoteObject) -> String {
        // null 必须在通用对象路径之前判定
        if obj.is_subtype("null") {
            return NULL.to_string();
        }
        for (subtype, fallback) in [("error", "Error"), ("regexp", ""), ("date", "")] {
            if obj.is_subtype(subtype) {
                let desc = non_empty(obj.description.as_deref()).unwrap_or(fallback);
                return span(&format!("ro-{subtype}"), &escape_html(desc));
            }
        }
        if let Some(preview) = &obj.preview {
            return self.render_preview(preview, obj.class_name.as_deref(), 0);
        }
        let label = non_empty(obj.description.as_deref())
            .or(non_empty(obj.class_name.as_deref()))
            .unwrap_or("Object");
        span("ro-object", &escape_html(label))
    }

    /// `[a, b]` / `ClassName {k: v}` / `{k: v, ...}`
    pub fn render_preview(&self, preview: &ObjectPreview, class_name: Option<&str>, depth: usize) -> String {
        let is_array = preview.is_array();
        let (open, close) = if is_array {
            ("[".to_string(), "]")
        } else {
            match non_empty(class_name).filter(|c| *c != "Object") {
                Some(class) => (format!("{} {{", escape_html(class)), "}"),
                None => ("{".to_string(), "}"),
            }
        };

        // 超过深度上限按 overflow 处理
        if depth >= self.max_depth {
            return format!("{open}...{close}");
        }
        if preview.properties.is_empty() {
            let body = if preview.overflow { "..." } else { "" };
            return format!("{open}{body}{close}");
        }

        let props = preview
            .properties
            .iter()
            .map(|p| {
                let val = self.render_property_value(p, depth);
                if is_array {
                    val
                } else {
                    let name = escape_html(p.name.as_deref().unwrap_or(""));
                    format!(r#"<span class="ro-prop-name">{name}</span>: {val}"#)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        let overflow = if preview.overflow { ", ..." } else { "" };
        format!("{open}{props}{overflow}{close}")
    }

    /// 属性值：有嵌套预览则递归，否则按叶子渲染；叶子对象只给标签，不再展开。
    pub fn render_property_value(&self, prop: &PropertyPreview, depth: usize) -> String {
        if let Some(nested) = &prop.value_preview {
            return self.render_preview(nested, nested.description.as_deref(), depth + 1);
        }
        let value = prop.value.as_deref().unwrap_or("");
        match prop.remote_type() {
            RemoteType::String => span("ro-string", &format!("\"{}\"", escape_html(value))),
            RemoteType::Number | RemoteType::Bigint => span("ro-number", &escape_html(value)),
            RemoteType::Boolean => span("ro-boolean", &escape_html(value)),
            RemoteType::Undefined => UNDEFINED.to_string(),
            RemoteType::Function => span("ro-function", "\u{0192}"),
            RemoteType::Object if prop.subtype.as_deref() == Some("null") => NULL.to_string(),
            RemoteType::Object => span("ro-object", &escape_html(non_empty(Some(value)).unwrap_or("Object"))),
            RemoteType::Symbol | RemoteType::Unknown(_) => escape_html(value),
        }
    }

    /// 详情面板里的展开形式：每个属性一行，overflow 单独一行。
    pub fn render_expanded(&self, value: &Option<RemoteObject>) -> String {
        let Some(obj) = value else {
            return UNDEFINED.to_string();
        };
        let preview = match (&obj.preview, obj.remote_type()) {
            (Some(preview), RemoteType::Object) if !obj.is_subtype("null") => preview,
            _ => return self.render_object(obj),
        };

        let label = if preview.is_array() {
            "Array"
        } else {
            non_empty(obj.class_name.as_deref()).unwrap_or("Object")
        };
        let mut html = format!(
            r#"<div class="ro-expanded"><span class="ro-object-label">{}</span><div class="ro-properties">"#,
            escape_html(label)
        );
        for prop in &preview.properties {
            html.push_str(&format!(
                r#"<div class="ro-prop-row"><span class="ro-prop-name">{}</span>: {}</div>"#,
                escape_html(prop.name.as_deref().unwrap_or("")),
                self.render_property_value(prop, 0)
            ));
        }
        if preview.overflow {
            html.push_str(r#"<div class="ro-prop-row ro-overflow">...</div>"#);
        }
        html.push_str("</div></div>");
        html
    }
}
