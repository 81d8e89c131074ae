//! 面板状态快照（JSON 导出）

use serde::Serialize;

use super::console::ConsolePanel;
use super::network::NetworkPanel;
use super::state::RowVisibility;
use super::viewport::Viewport;
use crate::session::WebSocketLog;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowSnapshot {
    pub index: usize,
    pub relative_ms: i64,
    pub facet: String,
    pub text: String,
    /// 行的渲染标记
    pub html: String,
    #[serde(flatten)]
    pub visibility: RowVisibility,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebSocketSnapshot {
    pub url: String,
    pub frames: usize,
    pub closed: bool,
}

impl From<&WebSocketLog> for WebSocketSnapshot {
    fn from(log: &WebSocketLog) -> Self {
        Self {
            url: log.url.clone().unwrap_or_default(),
            frames: log.frames.len(),
            closed: log.closed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSnapshot {
    pub stream: &'static str,
    pub clock_ms: Option<i64>,
    pub facet: String,
    pub total: usize,
    pub time_visible: usize,
    pub displayed: usize,
    pub active: Option<usize>,
    pub open_detail: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub rows: Vec<RowSnapshot>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub websockets: Vec<WebSocketSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_section_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_detail_html: Option<String>,
}

impl PanelSnapshot {
    fn assemble(stream: &'static str, rows: Vec<RowSnapshot>, base: &super::state::PanelState) -> Self {
        Self {
            stream,
            clock_ms: base.reveal.clock_ms,
            facet: base.facet.to_string(),
            total: rows.len(),
            time_visible: rows.iter().filter(|r| !r.visibility.time_hidden).count(),
            displayed: rows.iter().filter(|r| r.visibility.is_displayed()).count(),
            active: base.reveal.active,
            open_detail: base.open_detail,
            detail_html: None,
            summary: None,
            rows,
            websockets: Vec::new(),
            ws_section_html: None,
            ws_detail_html: None,
        }
    }

    pub fn of_console<V: Viewport>(panel: &ConsolePanel<V>) -> Self {
        let rows = panel
            .rows()
            .iter()
            .enumerate()
            .map(|(index, row)| RowSnapshot {
                index,
                relative_ms: row.relative_ms,
                facet: row.facet.clone(),
                text: format!("{} {}", row.time, row.label),
                html: row.html(),
                visibility: panel.visibility(index),
            })
            .collect();
        let mut snapshot = Self::assemble("console", rows, panel.state());
        snapshot.detail_html = panel.detail_html();
        snapshot
    }

    pub fn of_network<V: Viewport>(panel: &NetworkPanel<V>) -> Self {
        let rows = panel
            .rows()
            .iter()
            .enumerate()
            .map(|(index, row)| RowSnapshot {
                index,
                relative_ms: row.relative_ms,
                facet: row.facet.as_str().to_string(),
                text: format!("{} {} {}", row.method, row.url_title, row.status),
                html: row.html(),
                visibility: panel.visibility(index),
            })
            .collect();
        let mut snapshot = Self::assemble("network", rows, panel.state());
        snapshot.detail_html = panel.detail_html();
        snapshot.summary = Some(panel.summary());
        snapshot.websockets = panel.websockets().iter().map(WebSocketSnapshot::from).collect();
        snapshot.ws_section_html = Some(panel.ws_section_html()).filter(|h| !h.is_empty());
        snapshot.ws_detail_html = panel.ws_detail_html();
        snapshot
    }
}
