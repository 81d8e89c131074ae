//! 源码位置与调用栈帧
//!
//! `original*` 字段是 source map 还原后的位置，展示时优先于原始字段。
//! 行号/列号在数据中从 0 开始，展示时加 1。

use serde::Deserialize;
use serde_json::Value;

use super::lenient::{objects, opt_f64, opt_object, opt_string};

/// 一处源码位置（原始 + 可选的 source map 还原结果）
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeLocation {
    #[serde(default, deserialize_with = "opt_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub line_number: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub column_number: Option<f64>,
    #[serde(default, deserialize_with = "opt_string")]
    pub original_source: Option<String>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub original_line: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub original_column: Option<f64>,
}

fn one_based(n: f64) -> i64 {
    (n as i64).saturating_add(1)
}

impl CodeLocation {
    fn source(&self) -> Option<(&str, Option<f64>, Option<f64>)> {
        if let Some(src) = self.original_source.as_deref().filter(|s| !s.is_empty()) {
            return Some((src, self.original_line, self.original_column));
        }
        self.url
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|url| (url, self.line_number, self.column_number))
    }

    /// `src[:line][:col]`，缺失的行列不输出。用于日志条目本身的位置。
    pub fn short_label(&self) -> Option<String> {
        let (src, line, col) = self.source()?;
        let mut out = src.to_string();
        if let Some(line) = line {
            out.push_str(&format!(":{}", one_based(line)));
        }
        if let Some(col) = col {
            out.push_str(&format!(":{}", one_based(col)));
        }
        Some(out)
    }

    /// `src:line:col`，缺失的行列按 0 处理。用于调用栈帧。
    pub fn frame_label(&self) -> Option<String> {
        let (src, line, col) = self.source()?;
        Some(format!(
            "{src}:{}:{}",
            one_based(line.unwrap_or(0.0)),
            one_based(col.unwrap_or(0.0))
        ))
    }
}

/// 调用帧
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallFrame {
    #[serde(default, deserialize_with = "opt_string")]
    pub function_name: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub original_name: Option<String>,
    #[serde(flatten)]
    pub location: CodeLocation,
}

impl CallFrame {
    /// source map 还原的名字优先；两者都缺失时返回 `None`。
    pub fn display_name(&self) -> Option<&str> {
        self.original_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.function_name.as_deref())
    }
}

/// 栈帧：调用帧或异步边界标记，二者互斥。
#[derive(Debug, Clone, PartialEq)]
pub enum StackFrame {
    Call(CallFrame),
    AsyncBoundary(String),
}

impl StackFrame {
    pub fn from_value(v: Value) -> Option<StackFrame> {
        if let Some(boundary) = v.get("asyncBoundary").and_then(super::lenient::scalar_to_string) {
            if !boundary.is_empty() {
                return Some(StackFrame::AsyncBoundary(boundary));
            }
        }
        super::lenient::object(v).map(StackFrame::Call)
    }

    pub fn list_from_value(v: Option<Value>) -> Vec<StackFrame> {
        match v {
            Some(Value::Array(items)) => items.into_iter().filter_map(Self::from_value).collect(),
            _ => Vec::new(),
        }
    }
}

/// 网络请求发起方的调用栈，`parent` 链表示跨越异步边界的上游栈。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiatorStack {
    #[serde(default, deserialize_with = "opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "objects")]
    pub call_frames: Vec<CallFrame>,
    #[serde(default, deserialize_with = "opt_object")]
    pub parent: Option<Box<InitiatorStack>>,
}

/// 网络请求发起方
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Initiator {
    #[serde(rename = "type", default, deserialize_with = "opt_string")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub location: CodeLocation,
    #[serde(default, deserialize_with = "opt_object")]
    pub stack: Option<InitiatorStack>,
}
