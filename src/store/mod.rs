//! 录制存储（读取端）

// 子模块声明
mod disk;

use thiserror::Error;

// 重新导出公共接口
pub use disk::{DiskStore, is_valid_id};

/// 取回录制失败。这是查看器唯一会向外报告的错误。
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid recording id {0:?}")]
    InvalidId(String),
    #[error("recording {0} not found")]
    NotFound(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed json in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
