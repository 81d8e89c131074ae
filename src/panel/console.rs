//! 控制台面板

use std::any::Any;

use tracing::debug;

use super::PanelError;
use super::facet::{Facet, console_facet};
use super::state::{PanelState, RowVisibility, project_row};
use super::viewport::{ScrollLog, Viewport};
use crate::config::ViewerConfig;
use crate::render::format::format_clock_millis;
use crate::render::{
    LegacyValueRenderer, RemoteObjectRenderer, StackStyle, ValueRenderer, escape_html,
    render_stack_trace,
};
use crate::session::{ArgList, CaptureSource, ConsoleEntry, ConsolePayload, Timed, scalar_to_string};
use crate::timeline::{ClockEvent, StreamHandler};

/// 消息列：按条目格式分派一次。exception/browser 只展示 message。
pub fn render_console_message(entry: &ConsoleEntry, remote: &RemoteObjectRenderer) -> String {
    let message = || escape_html(entry.message.as_deref().unwrap_or(""));
    match &entry.payload {
        ConsolePayload::Capture {
            source: CaptureSource::Exception | CaptureSource::Browser,
            ..
        } => message(),
        ConsolePayload::Capture { args, .. } => match args {
            ArgList::Items(items) => remote.render_all(items),
            ArgList::Scalar(v) => escape_html(&scalar_to_string(v).unwrap_or_else(|| v.to_string())),
            ArgList::Missing => message(),
        },
        ConsolePayload::Legacy { args } => match args {
            ArgList::Items(items) => LegacyValueRenderer.render_all(items),
            ArgList::Scalar(v) => LegacyValueRenderer.render(v),
            ArgList::Missing => message(),
        },
    }
}

/// 构建时渲染好的一行
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleRow {
    pub relative_ms: i64,
    pub time: String,
    /// 展示级别（决定 `level-*` 样式）
    pub level: String,
    pub label: String,
    /// 分面标签
    pub facet: String,
    pub message_html: String,
    pub stack_html: String,
    /// 仅 exception/browser 条目展示
    pub location: Option<String>,
    kind_class: Option<&'static str>,
}

impl Timed for ConsoleRow {
    fn relative_ms(&self) -> i64 {
        self.relative_ms
    }
}

impl ConsoleRow {
    fn build(entry: &ConsoleEntry, remote: &RemoteObjectRenderer) -> ConsoleRow {
        let kind_class = match entry.capture_source() {
            Some(CaptureSource::Exception) => Some("exception-entry"),
            Some(CaptureSource::Browser) => Some("browser-entry"),
            _ => None,
        };
        let location = if kind_class.is_some() {
            entry.location.short_label()
        } else {
            None
        };
        ConsoleRow {
            relative_ms: entry.relative_ms,
            time: format_clock_millis(entry.relative_ms),
            level: entry.display_level().to_string(),
            label: entry.level_label(),
            facet: console_facet(entry),
            message_html: render_console_message(entry, remote),
            stack_html: render_stack_trace(&entry.stack_trace, StackStyle::Collapsible),
            location,
            kind_class,
        }
    }

    pub fn html(&self) -> String {
        let mut class = String::from("console-entry");
        if let Some(kind) = self.kind_class {
            class.push(' ');
            class.push_str(kind);
        }
        let mut msg = self.message_html.clone();
        if !self.stack_html.is_empty() {
            msg.push_str(&format!(
                r#"<div class="console-stack-container">{}</div>"#,
                self.stack_html
            ));
        }
        if let Some(loc) = &self.location {
            msg.push_str(&format!(
                r#"<span class="console-source-location">{}</span>"#,
                escape_html(loc)
            ));
        }
        format!(
            r#"<div class="{class}" data-level="{facet}"><span class="console-time">{time}</span><span class="console-level level-{level}">{label}</span><span class="console-msg">{msg}</span></div>"#,
            facet = escape_html(&self.facet),
            time = self.time,
            level = escape_html(&self.level),
            label = escape_html(&self.label),
        )
    }
}

fn section(title: &str, body: &str) -> String {
    format!(r#"<div class="detail-section"><h4>{title}</h4>{body}</div>"#)
}

fn pre(text: &str) -> String {
    format!("<pre>{}</pre>", escape_html(text))
}

/// 控制台面板。详情不粘滞：打开的详情不会让未到时间的行保持可见。
pub struct ConsolePanel<V: Viewport = ScrollLog> {
    entries: Vec<ConsoleEntry>,
    rows: Vec<ConsoleRow>,
    state: PanelState,
    proximity_ms: i64,
    remote: RemoteObjectRenderer,
    viewport: V,
}

impl ConsolePanel<ScrollLog> {
    pub fn new(entries: Vec<ConsoleEntry>, config: &ViewerConfig) -> Self {
        Self::with_viewport(entries, config, ScrollLog::default())
    }
}

impl<V: Viewport> ConsolePanel<V> {
    pub fn with_viewport(entries: Vec<ConsoleEntry>, config: &ViewerConfig, viewport: V) -> Self {
        let remote = RemoteObjectRenderer::with_max_depth(config.max_preview_depth);
        let rows = entries.iter().map(|e| ConsoleRow::build(e, &remote)).collect::<Vec<_>>();
        debug!(rows = rows.len(), "console panel built");
        Self {
            entries,
            rows,
            state: PanelState::new(false),
            proximity_ms: config.active_proximity_ms,
            remote,
            viewport,
        }
    }

    pub fn entries(&self) -> &[ConsoleEntry] {
        &self.entries
    }

    pub fn rows(&self) -> &[ConsoleRow] {
        &self.rows
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

    /// 按时钟重算可见前缀；最后可见行变化时滚动一次。
    pub fn reveal_at(&mut self, clock_ms: i64) -> Result<(), PanelError> {
        if let Some(row) = self.state.recompute(&self.rows, clock_ms, self.proximity_ms) {
            self.viewport.scroll_into_view(row)?;
        }
        Ok(())
    }

    /// 只改分面，不动揭示状态。
    pub fn set_facet(&mut self, facet: Facet) {
        self.state.facet = facet;
    }

    pub fn toggle_detail(&mut self, index: usize) -> Result<bool, PanelError> {
        self.state.toggle_detail(index, self.rows.len())
    }

    pub fn visibility(&self, index: usize) -> RowVisibility {
        match self.rows.get(index) {
            Some(row) => project_row(&self.state, index, row.relative_ms, &row.facet),
            None => RowVisibility::default(),
        }
    }

    pub fn displayed_indices(&self) -> Vec<usize> {
        (0..self.rows.len())
            .filter(|i| self.visibility(*i).is_displayed())
            .collect()
    }

    pub fn time_visible_indices(&self) -> Vec<usize> {
        (0..self.rows.len())
            .filter(|i| !self.visibility(*i).time_hidden)
            .collect()
    }

    /// 当前打开的详情内容
    pub fn detail_html(&self) -> Option<String> {
        let index = self.state.open_detail?;
        let entry = self.entries.get(index)?;
        Some(self.render_detail(entry))
    }

    fn render_detail(&self, entry: &ConsoleEntry) -> String {
        let mut html = section("Time", &pre(&format_clock_millis(entry.relative_ms)));

        let source = entry
            .capture_source()
            .map(|s| format!(" ({})", s.as_str()))
            .unwrap_or_default();
        html.push_str(&section("Level", &pre(&format!("{}{source}", entry.level_label()))));

        match &entry.payload {
            ConsolePayload::Capture {
                args: ArgList::Items(items),
                ..
            } => {
                let mut body = String::new();
                for (i, arg) in items.iter().enumerate() {
                    body.push_str(&format!(
                        r#"<div class="console-detail-arg"><span class="detail-arg-index">[{i}]</span> {}</div>"#,
                        self.remote.render_expanded(arg)
                    ));
                }
                html.push_str(&section("Arguments", &body));
            }
            _ => {
                if let Some(message) = entry.message.as_deref().filter(|m| !m.is_empty()) {
                    html.push_str(&section("Message", &pre(message)));
                }
            }
        }

        if let Some(loc) = entry.location.short_label() {
            html.push_str(&section("Source", &pre(&loc)));
        }

        let stack = render_stack_trace(&entry.stack_trace, StackStyle::Expanded);
        if !stack.is_empty() {
            html.push_str(&section("Stack Trace", &stack));
        }
        format!(r#"<div class="console-detail">{html}</div>"#)
    }
}

impl<V: Viewport + 'static> StreamHandler for ConsolePanel<V> {
    fn name(&self) -> &str {
        "console"
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
