//! 流归一化
//!
//! 把各自带时间戳的原始记录映射到统一的相对时间轴（毫秒，相对录制开始），
//! 并按相对时间稳定排序。顶层形状不对时返回空流，从不报错；
//! 缺少时间信息的记录偏移记为 0，不丢弃。

use serde_json::Value;
use tracing::{debug, warn};

use super::console::{ConsoleEntry, RawConsoleRecord};
use super::network::{NetworkEntry, RawNetworkRecord};
use super::websocket::WebSocketLog;

/// 带相对时间的条目
pub trait Timed {
    fn relative_ms(&self) -> i64;
}

fn round_ms(ms: f64) -> i64 {
    if ms.is_finite() { ms.round() as i64 } else { 0 }
}

/// 稳定排序：相同时间保持原始输入顺序。
fn sort_by_time<T: Timed>(entries: &mut [T]) {
    entries.sort_by_key(|e| e.relative_ms());
}

/// 控制台记录：`relative = timestamp(ms) - start`。
#[tracing::instrument(skip(raw))]
pub fn normalize_console(raw: &Value, start_time_ms: i64) -> Vec<ConsoleEntry> {
    let Some(records) = raw.as_array() else {
        if !raw.is_null() {
            warn!("console logs are not an array; showing an empty stream");
        }
        return Vec::new();
    };

    let mut entries = Vec::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        if !record.is_object() {
            warn!(idx, "skipping console record that is not an object");
            continue;
        }
        let parsed: RawConsoleRecord = match serde_json::from_value(record.clone()) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(idx, %err, "unreadable console record; rendering it empty");
                RawConsoleRecord::default()
            }
        };
        let relative_ms = parsed
            .timestamp
            .map(|ts| round_ms(ts - start_time_ms as f64))
            .unwrap_or(0);
        entries.push(ConsoleEntry::from_raw(parsed, relative_ms));
    }
    sort_by_time(&mut entries);

    debug!(count = entries.len(), "console stream normalized");
    entries
}

/// 取出网络记录数组：HAR `log.entries` 或直接数组。
fn network_records(raw: &Value) -> Option<&Vec<Value>> {
    if let Some(entries) = raw
        .get("log")
        .and_then(|log| log.get("entries"))
        .and_then(Value::as_array)
    {
        return Some(entries);
    }
    raw.as_array()
}

/// 网络记录：优先 `wallTime`，其次 `timestamp`（都是秒），乘 1000 后减去 start。
/// 两者都缺失（或为 0）时偏移为 0。
#[tracing::instrument(skip(raw))]
pub fn normalize_network(raw: &Value, start_time_ms: i64) -> Vec<NetworkEntry> {
    let Some(records) = network_records(raw) else {
        debug!("no network entries found");
        return Vec::new();
    };

    let mut entries = Vec::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        let parsed: RawNetworkRecord = match record {
            Value::Object(_) => serde_json::from_value(record.clone()).unwrap_or_else(|err| {
                warn!(idx, %err, "unreadable network record; rendering it empty");
                RawNetworkRecord::default()
            }),
            _ => {
                warn!(idx, "network record is not an object");
                RawNetworkRecord::default()
            }
        };
        let seconds = parsed
            .wall_time
            .filter(|t| *t != 0.0)
            .or(parsed.timestamp.filter(|t| *t != 0.0));
        let relative_ms = seconds
            .map(|s| round_ms(s * 1000.0 - start_time_ms as f64))
            .unwrap_or(0);
        entries.push(NetworkEntry::from_raw(parsed, relative_ms));
    }
    sort_by_time(&mut entries);

    debug!(count = entries.len(), "network stream normalized");
    entries
}

/// WebSocket 日志不参与时间揭示，只做形状容错。
pub fn normalize_websockets(raw: &Value) -> Vec<WebSocketLog> {
    match raw.as_array() {
        Some(items) => items
            .iter()
            .filter_map(|v| super::lenient::object(v.clone()))
            .collect(),
        None => Vec::new(),
    }
}
