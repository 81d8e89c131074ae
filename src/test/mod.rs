mod markers;
mod network_panel;
mod normalize;
mod reveal;
mod sync;

use serde_json::{Value, json};

use crate::session::{ConsoleEntry, NetworkEntry, normalize_console, normalize_network};

/// 按 `(timestamp_ms, level, message)` 构造 legacy 控制台流（起点为 0）。
pub(crate) fn console_stream(records: &[(i64, &str, &str)]) -> Vec<ConsoleEntry> {
    let raw = Value::Array(
        records
            .iter()
            .map(|(ts, level, msg)| json!({ "timestamp": ts, "level": level, "message": msg, "args": [msg] }))
            .collect(),
    );
    normalize_console(&raw, 0)
}

/// 按 `(wall_time_ms, resource_type, url)` 构造网络流（起点为 0）。
pub(crate) fn network_stream(records: &[(i64, &str, &str)]) -> Vec<NetworkEntry> {
    let raw = Value::Array(
        records
            .iter()
            .map(|(ms, kind, url)| {
                json!({
                    "wallTime": *ms as f64 / 1000.0,
                    "resourceType": kind,
                    "request": { "method": "GET", "url": url },
                    "response": { "status": 200 }
                })
            })
            .collect(),
    );
    normalize_network(&raw, 0)
}
