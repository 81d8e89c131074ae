//! 查看器配置
//!
//! 可调常量集中在这里；所有字段都有默认值，JSON 配置文件只需写要覆盖的项。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::render::MAX_PREVIEW_DEPTH;
use crate::timeline::{ACTIVE_PROXIMITY_MS, TIME_UPDATE_THROTTLE_MS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// 活跃条目的距离阈值（毫秒）
    pub active_proximity_ms: i64,
    /// time-update 限流间隔（墙钟毫秒）
    pub time_update_throttle_ms: u64,
    /// 对象预览的最大嵌套深度
    pub max_preview_depth: usize,
    /// 响应正文的展示上限（字符）
    pub response_body_limit: usize,
    /// 网络行里 URL 的截断长度
    pub url_truncate: usize,
    /// WebSocket 详情最多列出的帧数
    pub ws_frame_limit: usize,
    /// 单帧负载的截断长度
    pub ws_payload_limit: usize,
    /// 时间轴标记标题的截断长度
    pub marker_label_limit: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            active_proximity_ms: ACTIVE_PROXIMITY_MS,
            time_update_throttle_ms: TIME_UPDATE_THROTTLE_MS,
            max_preview_depth: MAX_PREVIEW_DEPTH,
            response_body_limit: 10 * 1024,
            url_truncate: 60,
            ws_frame_limit: 100,
            ws_payload_limit: 200,
            marker_label_limit: 80,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ViewerConfig {
    pub fn load(path: &Path) -> Result<ViewerConfig, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}
