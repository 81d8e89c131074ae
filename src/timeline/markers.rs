//! 时间轴标记
//!
//! 进度条上的彩色点：控制台错误为红色，网络请求为蓝色。

use serde::Serialize;

use crate::session::{ConsoleEntry, NetworkEntry};

pub const ERROR_COLOR: &str = "#f85149";
pub const REQUEST_COLOR: &str = "#58a6ff";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineMarker {
    pub time_ms: i64,
    pub color: &'static str,
    pub label: String,
}

impl TimelineMarker {
    /// 在进度条上的百分比位置；时长未知或超出范围时返回 `None`。
    pub fn position_pct(&self, duration_ms: Option<i64>) -> Option<f64> {
        let duration = duration_ms.filter(|d| *d > 0)? as f64;
        let pct = self.time_ms as f64 / duration * 100.0;
        (0.0..=100.0).contains(&pct).then_some(pct)
    }
}

fn prefix(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// 先列控制台错误，再列所有网络请求。
pub fn build_markers(
    console: &[ConsoleEntry],
    network: &[NetworkEntry],
    label_limit: usize,
) -> Vec<TimelineMarker> {
    let mut markers = Vec::new();
    for entry in console.iter().filter(|e| e.display_level() == "error") {
        let text = entry
            .message
            .as_deref()
            .filter(|m| !m.is_empty())
            .or_else(|| entry.first_arg_description())
            .unwrap_or("");
        markers.push(TimelineMarker {
            time_ms: entry.relative_ms,
            color: ERROR_COLOR,
            label: format!("Error: {}", prefix(text, label_limit)),
        });
    }
    for entry in network {
        let label = format!("{} {}", entry.request.method, entry.request.url);
        markers.push(TimelineMarker {
            time_ms: entry.relative_ms,
            color: REQUEST_COLOR,
            label: prefix(&label, label_limit),
        });
    }
    markers
}
