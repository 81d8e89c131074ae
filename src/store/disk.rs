//! 磁盘上的录制目录
//!
//! 布局：`<root>/<id>/{metadata.json, console-logs.json, network-requests.json,
//! websocket-logs.json?, recording.webm?}`。只读。

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use super::StoreError;
use crate::session::RecordingSnapshot;

const METADATA_FILE: &str = "metadata.json";
const CONSOLE_FILE: &str = "console-logs.json";
const NETWORK_FILE: &str = "network-requests.json";
const WEBSOCKET_FILE: &str = "websocket-logs.json";
const VIDEO_FILE: &str = "recording.webm";

/// id 只允许小写十六进制，防止路径穿越。
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn dir(&self, id: &str) -> Result<PathBuf, StoreError> {
        if !is_valid_id(id) {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        Ok(self.root.join(id))
    }

    /// 录制存在当且仅当 id 合法且目录下有 `metadata.json`。
    pub fn exists(&self, id: &str) -> bool {
        self.dir(id)
            .map(|dir| dir.join(METADATA_FILE).is_file())
            .unwrap_or(false)
    }

    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    pub fn load(&self, id: &str) -> Result<RecordingSnapshot, StoreError> {
        let dir = self.dir(id)?;
        if !dir.join(METADATA_FILE).is_file() {
            return Err(StoreError::NotFound(id.to_string()));
        }

        let metadata = read_json(&dir.join(METADATA_FILE))?;
        let console_logs = read_json(&dir.join(CONSOLE_FILE))?;
        let network_requests = read_json(&dir.join(NETWORK_FILE))?;
        let ws_path = dir.join(WEBSOCKET_FILE);
        let web_socket_logs = if ws_path.is_file() {
            read_json(&ws_path)?
        } else {
            debug!("no websocket log");
            Value::Array(Vec::new())
        };

        info!(id, "recording loaded from disk");
        Ok(RecordingSnapshot {
            metadata,
            console_logs,
            network_requests,
            web_socket_logs,
        })
    }

    /// 录像文件路径；没有录像时返回 `None`。
    pub fn video_path(&self, id: &str) -> Option<PathBuf> {
        if !self.exists(id) {
            return None;
        }
        let path = self.dir(id).ok()?.join(VIDEO_FILE);
        path.is_file().then_some(path)
    }
}

fn read_json(path: &Path) -> Result<Value, StoreError> {
    let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| StoreError::Json {
        path: path.display().to_string(),
        source,
    })
}
