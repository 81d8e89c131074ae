//! WebSocket 连接日志

use serde::Deserialize;

use super::lenient::{flag, objects, opt_string};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDirection {
    Sent,
    Received,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSocketFrame {
    #[serde(default, deserialize_with = "opt_string")]
    direction: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub payload_data: Option<String>,
}

impl WebSocketFrame {
    pub fn new(direction: FrameDirection, payload: &str) -> Self {
        let direction = match direction {
            FrameDirection::Sent => "sent",
            FrameDirection::Received => "received",
        };
        Self {
            direction: Some(direction.to_string()),
            payload_data: Some(payload.to_string()),
        }
    }

    /// 只有明确标记为 `sent` 的帧算发送，其余都按接收处理。
    pub fn direction(&self) -> FrameDirection {
        match self.direction.as_deref() {
            Some("sent") => FrameDirection::Sent,
            _ => FrameDirection::Received,
        }
    }

    pub fn payload(&self) -> &str {
        self.payload_data.as_deref().unwrap_or("")
    }
}

/// 一条 WebSocket 连接及其帧
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSocketLog {
    #[serde(default, deserialize_with = "opt_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub closed: bool,
    #[serde(default, deserialize_with = "objects")]
    pub frames: Vec<WebSocketFrame>,
}
