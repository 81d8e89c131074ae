//! 控制台日志条目
//!
//! 两种历史采集格式并存：
//! - legacy：`{level, args: [普通 JSON 值], message?}`
//! - capture：带 `source` 字段，`args` 是 [`RemoteObject`] 引用
//!
//! 格式在归一化时判定一次，之后只按 [`ConsolePayload`] 分派。

use serde::Deserialize;
use serde_json::Value;

use super::lenient::{opt_f64, opt_string, present};
use super::location::{CodeLocation, StackFrame};
use super::normalize::Timed;
use super::remote_object::RemoteObject;

/// capture 格式的来源标签
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureSource {
    Console,
    Exception,
    Browser,
    Other(String),
}

impl CaptureSource {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "console" => Self::Console,
            "exception" => Self::Exception,
            "browser" => Self::Browser,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Console => "console",
            Self::Exception => "exception",
            Self::Browser => "browser",
            Self::Other(s) => s,
        }
    }
}

/// `args` 字段：正常是数组，但历史数据里也出现过标量或缺失。
#[derive(Debug, Clone, PartialEq)]
pub enum ArgList<T> {
    Items(Vec<T>),
    Scalar(Value),
    Missing,
}

impl<T> ArgList<T> {
    fn from_value(v: Option<Value>, item: impl Fn(Value) -> T) -> Self {
        match v {
            None | Some(Value::Null) => ArgList::Missing,
            Some(Value::Array(items)) => ArgList::Items(items.into_iter().map(item).collect()),
            Some(other) => ArgList::Scalar(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConsolePayload {
    Legacy {
        args: ArgList<Value>,
    },
    Capture {
        source: CaptureSource,
        args: ArgList<Option<RemoteObject>>,
    },
}

/// 归一化后的一条控制台日志
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleEntry {
    /// 相对录制开始的毫秒偏移
    pub relative_ms: i64,
    pub level: Option<String>,
    pub message: Option<String>,
    pub location: CodeLocation,
    pub stack_trace: Vec<StackFrame>,
    pub payload: ConsolePayload,
}

impl Timed for ConsoleEntry {
    fn relative_ms(&self) -> i64 {
        self.relative_ms
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawConsoleRecord {
    #[serde(default, deserialize_with = "opt_f64")]
    pub timestamp: Option<f64>,
    /// 出现即为 capture 格式，值为 `null` 也算
    #[serde(default, deserialize_with = "present")]
    pub source: Option<Value>,
    #[serde(default, deserialize_with = "opt_string")]
    pub level: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub message: Option<String>,
    #[serde(default)]
    pub args: Option<Value>,
    #[serde(default)]
    pub stack_trace: Option<Value>,
    #[serde(flatten)]
    pub location: CodeLocation,
}

impl ConsoleEntry {
    pub(crate) fn from_raw(raw: RawConsoleRecord, relative_ms: i64) -> ConsoleEntry {
        let payload = match raw.source {
            Some(source) => {
                let source = super::lenient::scalar_to_string(&source).unwrap_or_default();
                ConsolePayload::Capture {
                    source: CaptureSource::parse(&source),
                    args: ArgList::from_value(raw.args, RemoteObject::from_arg),
                }
            }
            None => ConsolePayload::Legacy {
                args: ArgList::from_value(raw.args, |v| v),
            },
        };
        ConsoleEntry {
            relative_ms,
            level: raw.level.filter(|l| !l.is_empty()),
            message: raw.message,
            location: raw.location,
            stack_trace: StackFrame::list_from_value(raw.stack_trace),
            payload,
        }
    }

    pub fn capture_source(&self) -> Option<&CaptureSource> {
        match &self.payload {
            ConsolePayload::Capture { source, .. } => Some(source),
            ConsolePayload::Legacy { .. } => None,
        }
    }

    pub fn is_exception(&self) -> bool {
        matches!(self.capture_source(), Some(CaptureSource::Exception))
    }

    pub fn is_browser(&self) -> bool {
        matches!(self.capture_source(), Some(CaptureSource::Browser))
    }

    /// 展示级别：exception 视为 error，browser 缺省 info，其余缺省 log。
    pub fn display_level(&self) -> &str {
        match self.capture_source() {
            Some(CaptureSource::Exception) => "error",
            Some(CaptureSource::Browser) => self.level.as_deref().unwrap_or("info"),
            _ => self.level.as_deref().unwrap_or("log"),
        }
    }

    pub fn level_label(&self) -> String {
        match self.capture_source() {
            Some(CaptureSource::Exception) => "EXCEPTION".to_string(),
            Some(CaptureSource::Browser) => "BROWSER".to_string(),
            _ => self.display_level().to_uppercase(),
        }
    }

    /// 第一个参数的 description（用于时间轴标记的标题）。
    pub fn first_arg_description(&self) -> Option<&str> {
        match &self.payload {
            ConsolePayload::Capture {
                args: ArgList::Items(items),
                ..
            } => items
                .first()
                .and_then(|a| a.as_ref())
                .and_then(|a| a.description.as_deref()),
            _ => None,
        }
    }
}
