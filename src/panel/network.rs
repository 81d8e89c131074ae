//! 网络面板
//!
//! 与控制台面板共用揭示/分面逻辑，区别在于详情粘滞：打开详情的行
//! 即使时钟倒回到它之前也保持可见。WebSocket 连接跟在请求列表后面，
//! 不参与时间揭示。

use std::any::Any;

use tracing::{debug, trace};

use super::PanelError;
use super::facet::{Facet, NetworkFacet};
use super::network_detail::{curl_command, render_network_detail};
use super::state::{PanelState, RowVisibility, project_row};
use super::viewport::{ScrollLog, Viewport};
use super::websocket::{render_ws_detail, render_ws_section};
use crate::config::ViewerConfig;
use crate::render::escape_html;
use crate::render::format::{format_size, status_class, truncate_url};
use crate::session::{NetworkEntry, Timed, WebSocketLog};
use crate::timeline::{ClockEvent, StreamHandler};

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkRow {
    pub relative_ms: i64,
    pub method: String,
    pub url: String,
    pub url_title: String,
    pub status: String,
    pub status_class: &'static str,
    pub kind: String,
    pub size: String,
    pub facet: NetworkFacet,
}

impl Timed for NetworkRow {
    fn relative_ms(&self) -> i64 {
        self.relative_ms
    }
}

impl NetworkRow {
    fn build(entry: &NetworkEntry, url_limit: usize) -> NetworkRow {
        let status = match (entry.response.status, &entry.error) {
            (Some(code), _) => code.to_string(),
            (None, Some(_)) => "ERR".to_string(),
            (None, None) => "-".to_string(),
        };
        let kind = entry
            .resource_type
            .clone()
            .or_else(|| entry.response.content.mime_type.clone().filter(|m| !m.is_empty()))
            .unwrap_or_else(|| "-".to_string());
        NetworkRow {
            relative_ms: entry.relative_ms,
            method: entry.request.method.clone(),
            url: truncate_url(&entry.request.url, url_limit),
            url_title: entry.request.url.clone(),
            status,
            status_class: status_class(entry.response.status),
            kind,
            size: format_size(entry.display_size()),
            facet: NetworkFacet::classify(entry.resource_type.as_deref()),
        }
    }

    pub fn html(&self) -> String {
        format!(
            r#"<div class="network-entry" data-filter-type="{facet}"><span class="net-method">{method}</span><span class="net-url" title="{title}">{url}</span><span class="net-status {class}">{status}</span><span class="net-type">{kind}</span><span class="net-size">{size}</span></div>"#,
            facet = self.facet.as_str(),
            method = escape_html(&self.method),
            title = escape_html(&self.url_title),
            url = escape_html(&self.url),
            class = self.status_class,
            status = escape_html(&self.status),
            kind = escape_html(&self.kind),
            size = self.size,
        )
    }
}

/// 详情面板里的复制按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyAction {
    Curl,
    Response,
    All,
}

pub struct NetworkPanel<V: Viewport = ScrollLog> {
    entries: Vec<NetworkEntry>,
    rows: Vec<NetworkRow>,
    websockets: Vec<WebSocketLog>,
    state: PanelState,
    /// 当前详情的响应正文是否已展开
    show_full_body: bool,
    open_ws: Option<usize>,
    proximity_ms: i64,
    body_limit: usize,
    ws_frame_limit: usize,
    ws_payload_limit: usize,
    viewport: V,
}

impl NetworkPanel<ScrollLog> {
    pub fn new(entries: Vec<NetworkEntry>, websockets: Vec<WebSocketLog>, config: &ViewerConfig) -> Self {
        Self::with_viewport(entries, websockets, config, ScrollLog::default())
    }
}

impl<V: Viewport> NetworkPanel<V> {
    pub fn with_viewport(
        entries: Vec<NetworkEntry>,
        websockets: Vec<WebSocketLog>,
        config: &ViewerConfig,
        viewport: V,
    ) -> Self {
        let rows = entries
            .iter()
            .map(|e| NetworkRow::build(e, config.url_truncate))
            .collect::<Vec<_>>();
        debug!(rows = rows.len(), websockets = websockets.len(), "network panel built");
        Self {
            entries,
            rows,
            websockets,
            state: PanelState::new(true),
            show_full_body: false,
            open_ws: None,
            proximity_ms: config.active_proximity_ms,
            body_limit: config.response_body_limit,
            ws_frame_limit: config.ws_frame_limit,
            ws_payload_limit: config.ws_payload_limit,
            viewport,
        }
    }

    pub fn entries(&self) -> &[NetworkEntry] {
        &self.entries
    }

    pub fn rows(&self) -> &[NetworkRow] {
        &self.rows
    }

    pub fn websockets(&self) -> &[WebSocketLog] {
        &self.websockets
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn facet(&self) -> &Facet {
        &self.state.facet
    }

    pub fn reveal_at(&mut self, clock_ms: i64) -> Result<(), PanelError> {
        if let Some(row) = self.state.recompute(&self.rows, clock_ms, self.proximity_ms) {
            trace!(row, "network scroll");
            self.viewport.scroll_into_view(row)?;
        }
        Ok(())
    }

    pub fn set_facet(&mut self, facet: Facet) {
        self.state.facet = facet;
    }

    pub fn toggle_detail(&mut self, index: usize) -> Result<bool, PanelError> {
        let open = self.state.toggle_detail(index, self.rows.len())?;
        self.show_full_body = false;
        Ok(open)
    }

    /// 展开被截断的响应正文；没有打开的详情时无效果。
    pub fn expand_response_body(&mut self) {
        if self.state.open_detail.is_some() {
            self.show_full_body = true;
        }
    }

    pub fn visibility(&self, index: usize) -> RowVisibility {
        match self.rows.get(index) {
            Some(row) => project_row(&self.state, index, row.relative_ms, row.facet.as_str()),
            None => RowVisibility::default(),
        }
    }

    pub fn displayed_indices(&self) -> Vec<usize> {
        (0..self.rows.len())
            .filter(|i| self.visibility(*i).is_displayed())
            .collect()
    }

    /// 当前实际显示的请求数（时间可见且匹配分面，含打开详情的行）。
    pub fn filtered_count(&self) -> usize {
        self.displayed_indices().len()
    }

    pub fn summary(&self) -> String {
        let mut text = format!("{}/{} requests", self.filtered_count(), self.rows.len());
        if !self.state.facet.is_all() {
            text.push_str(&format!(" ({})", self.state.facet));
        }
        if !self.websockets.is_empty() {
            text.push_str(&format!(" | {} WS", self.websockets.len()));
        }
        text
    }

    pub fn detail_html(&self) -> Option<String> {
        let entry = self.entries.get(self.state.open_detail?)?;
        Some(render_network_detail(entry, self.body_limit, self.show_full_body))
    }

    /// 复制按钮对应的文本；没有打开的详情返回 `None`。
    pub fn copy_text(&self, action: CopyAction) -> Option<String> {
        let entry = self.entries.get(self.state.open_detail?)?;
        let body = entry.response.content.text.as_deref().unwrap_or("");
        Some(match action {
            CopyAction::Curl => curl_command(entry),
            CopyAction::Response => body.to_string(),
            CopyAction::All => format!("{}\n\n--- Response ---\n\n{body}", curl_command(entry)),
        })
    }

    pub fn ws_section_html(&self) -> String {
        render_ws_section(&self.websockets)
    }

    /// 同一时刻最多展开一个连接
    pub fn toggle_ws_detail(&mut self, index: usize) -> Result<bool, PanelError> {
        if index >= self.websockets.len() {
            return Err(PanelError::RowOutOfRange {
                index,
                len: self.websockets.len(),
            });
        }
        if self.open_ws == Some(index) {
            self.open_ws = None;
            Ok(false)
        } else {
            self.open_ws = Some(index);
            Ok(true)
        }
    }

    pub fn ws_detail_html(&self) -> Option<String> {
        let log = self.websockets.get(self.open_ws?)?;
        Some(render_ws_detail(log, self.ws_frame_limit, self.ws_payload_limit))
    }
}

impl<V: Viewport + 'static> StreamHandler for NetworkPanel<V> {
    fn name(&self) -> &str {
        "network"
    }

    fn on_clock(&mut self, event: ClockEvent) -> Result<(), PanelError> {
        self.reveal_at(event.clock_ms())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
