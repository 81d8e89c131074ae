//! 录制会话
//!
//! [`RecordingSnapshot`] 是取回的原始数据（不透明 JSON），
//! [`RecordingSession`] 是归一化后的不可变会话。

use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::console::ConsoleEntry;
use super::lenient::{opt_f64, opt_string, value_to_f64};
use super::network::NetworkEntry;
use super::normalize::{normalize_console, normalize_network, normalize_websockets};
use super::websocket::WebSocketLog;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingMetadata {
    #[serde(default, deserialize_with = "opt_string")]
    pub id: Option<String>,
    /// 录制开始的绝对时间（epoch 毫秒）
    #[serde(default, deserialize_with = "opt_f64")]
    pub start_time: Option<f64>,
    /// 旧数据只有 ISO 8601 时间戳
    #[serde(default)]
    pub timestamp: Option<Value>,
    #[serde(default, deserialize_with = "opt_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "opt_string")]
    pub created_at: Option<String>,
}

impl RecordingMetadata {
    /// `startTime` 优先；否则解析 `timestamp`（RFC 3339 字符串或 epoch 毫秒）；都没有则为 0。
    pub fn start_time_ms(&self) -> i64 {
        if let Some(ms) = self.start_time.filter(|ms| *ms != 0.0) {
            return ms.round() as i64;
        }
        match &self.timestamp {
            Some(Value::String(s)) => DateTime::parse_from_rfc3339(s.trim())
                .map(|dt| dt.timestamp_millis())
                .unwrap_or(0),
            Some(other) => value_to_f64(other).map(|ms| ms.round() as i64).unwrap_or(0),
            None => 0,
        }
    }

    pub fn duration_ms(&self) -> Option<i64> {
        self.duration.filter(|d| *d > 0.0).map(|d| d.round() as i64)
    }
}

/// 取回的一份录制数据（形状与 `GET /api/recordings/:id` 的响应一致）。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingSnapshot {
    #[serde(default)]
    pub metadata: Value,
    #[serde(default)]
    pub console_logs: Value,
    #[serde(default)]
    pub network_requests: Value,
    #[serde(default)]
    pub web_socket_logs: Value,
}

/// 归一化后的录制会话，加载后不再变化。
#[derive(Debug, Clone, Default)]
pub struct RecordingSession {
    pub metadata: RecordingMetadata,
    pub start_time_ms: i64,
    pub console: Vec<ConsoleEntry>,
    pub network: Vec<NetworkEntry>,
    pub websockets: Vec<WebSocketLog>,
}

impl RecordingSession {
    #[tracing::instrument(skip(snapshot))]
    pub fn from_snapshot(snapshot: &RecordingSnapshot) -> RecordingSession {
        let metadata: RecordingMetadata = match &snapshot.metadata {
            Value::Object(_) => serde_json::from_value(snapshot.metadata.clone()).unwrap_or_default(),
            _ => RecordingMetadata::default(),
        };
        let start_time_ms = metadata.start_time_ms();
        debug!(start_time_ms, "resolved recording start");

        let session = RecordingSession {
            console: normalize_console(&snapshot.console_logs, start_time_ms),
            network: normalize_network(&snapshot.network_requests, start_time_ms),
            websockets: normalize_websockets(&snapshot.web_socket_logs),
            metadata,
            start_time_ms,
        };
        info!(
            console = session.console.len(),
            network = session.network.len(),
            websockets = session.websockets.len(),
            "recording session loaded"
        );
        session
    }

    pub fn duration_ms(&self) -> Option<i64> {
        self.metadata.duration_ms()
    }

    pub fn url(&self) -> &str {
        self.metadata.url.as_deref().unwrap_or("")
    }
}
