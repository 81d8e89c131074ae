//! 日志面板
//!
//! 控制台面板与网络面板：构建时渲染每一行，之后每个时钟事件只重算
//! 可见性（揭示 × 分面），不重新渲染内容。

// 子模块声明
mod console;
mod facet;
mod network;
mod network_detail;
mod snapshot;
mod state;
mod viewport;
mod websocket;

use thiserror::Error;

// 重新导出公共接口
pub use console::{ConsolePanel, ConsoleRow, render_console_message};
pub use facet::{Facet, NetworkFacet, console_facet};
pub use network::{CopyAction, NetworkPanel, NetworkRow};
pub use network_detail::{curl_command, render_response_body};
pub use snapshot::{PanelSnapshot, RowSnapshot, WebSocketSnapshot};
pub use state::{PanelState, RowVisibility, project_row};
pub use viewport::{ScrollLog, Viewport};
pub use websocket::{render_ws_detail, render_ws_section};

/// 面板操作错误
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("row {index} out of range ({len} rows)")]
    RowOutOfRange { index: usize, len: usize },
    #[error("viewport could not scroll to row {row}: {reason}")]
    Viewport { row: usize, reason: String },
}
