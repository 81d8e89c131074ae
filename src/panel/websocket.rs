//! WebSocket 连接区块

use crate::render::escape_html;
use crate::render::format::truncate_chars;
use crate::session::{FrameDirection, WebSocketLog};

/// 连接列表；没有连接时返回空串。
pub fn render_ws_section(logs: &[WebSocketLog]) -> String {
    if logs.is_empty() {
        return String::new();
    }
    let mut html = format!(
        r#"<div class="ws-section-header"><h3>WebSocket Connections ({})</h3></div>"#,
        logs.len()
    );
    for log in logs {
        let url = escape_html(log.url.as_deref().unwrap_or(""));
        let (class, label) = if log.closed {
            ("ws-closed", "Closed")
        } else {
            ("ws-open", "Open")
        };
        html.push_str(&format!(
            r#"<div class="ws-entry"><span class="ws-url" title="{url}">{url}</span><span class="ws-frame-count">{} frames</span><span class="ws-status {class}">{label}</span></div>"#,
            log.frames.len()
        ));
    }
    html
}

/// 单个连接的帧列表：最多 `frame_limit` 帧，每帧负载截断到 `payload_limit` 字符。
pub fn render_ws_detail(log: &WebSocketLog, frame_limit: usize, payload_limit: usize) -> String {
    let mut html = format!(
        r#"<div class="detail-section"><h4>URL</h4><pre>{}</pre></div>"#,
        escape_html(log.url.as_deref().unwrap_or(""))
    );
    if !log.frames.is_empty() {
        html.push_str(&format!(
            r#"<div class="detail-section"><h4>Frames ({})</h4><div class="ws-frames-table"><div class="ws-frame-header"><span>Dir</span><span>Data</span></div>"#,
            log.frames.len()
        ));
        for frame in log.frames.iter().take(frame_limit) {
            let (class, arrow) = match frame.direction() {
                FrameDirection::Sent => ("ws-dir-sent", "↑"),
                FrameDirection::Received => ("ws-dir-recv", "↓"),
            };
            html.push_str(&format!(
                r#"<div class="ws-frame-row"><span class="{class}">{arrow}</span><span class="ws-frame-data">{}</span></div>"#,
                escape_html(&truncate_chars(frame.payload(), payload_limit))
            ));
        }
        if log.frames.len() > frame_limit {
            html.push_str(&format!(
                r#"<div class="ws-frame-row"><span></span><span class="ws-frame-data">... {} more frames</span></div>"#,
                log.frames.len() - frame_limit
            ));
        }
        html.push_str("</div></div>");
    }
    format!(r#"<div class="ws-detail">{html}</div>"#)
}
