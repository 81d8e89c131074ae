//! 查看器装配
//!
//! 一次加载：归一化录制 → 构建两个面板并按固定顺序订阅（控制台在前，
//! 网络在后）→ 生成时间轴标记。之后所有交互都经由时钟事件驱动。

use serde::Serialize;
use tracing::{debug, info};

use crate::config::ViewerConfig;
use crate::panel::{ConsolePanel, NetworkPanel, PanelSnapshot};
use crate::render::format::format_duration;
use crate::session::{RecordingSession, RecordingSnapshot};
use crate::timeline::{
    ClockEvent, ClockSource, DispatchReport, PlaybackClock, SyncCoordinator, TimelineMarker,
    build_markers,
};

/// 整个查看器的 JSON 快照
#[derive(Debug, Clone, Serialize)]
pub struct ViewerSnapshot {
    pub title: String,
    pub url: String,
    pub duration: String,
    pub clock_ms: i64,
    pub markers: Vec<TimelineMarker>,
    pub console: Option<PanelSnapshot>,
    pub network: Option<PanelSnapshot>,
}

pub struct Viewer {
    session_url: String,
    duration_ms: Option<i64>,
    clock: PlaybackClock,
    coordinator: SyncCoordinator,
    markers: Vec<TimelineMarker>,
}

impl Viewer {
    pub fn new(session: RecordingSession, config: &ViewerConfig) -> Self {
        let markers = build_markers(&session.console, &session.network, config.marker_label_limit);
        let duration_ms = session.duration_ms();
        let session_url = session.url().to_string();

        let mut coordinator = SyncCoordinator::default();
        coordinator.subscribe(ConsolePanel::new(session.console, config));
        coordinator.subscribe(NetworkPanel::new(session.network, session.websockets, config));

        let clock = PlaybackClock::new(duration_ms).with_throttle_ms(config.time_update_throttle_ms);
        info!(markers = markers.len(), ?duration_ms, "viewer ready");
        Self {
            session_url,
            duration_ms,
            clock,
            coordinator,
            markers,
        }
    }

    pub fn from_snapshot(snapshot: &RecordingSnapshot, config: &ViewerConfig) -> Self {
        Self::new(RecordingSession::from_snapshot(snapshot), config)
    }

    pub fn title(&self) -> String {
        let url = if self.session_url.is_empty() {
            "Recording"
        } else {
            &self.session_url
        };
        format!("replay - {url}")
    }

    pub fn duration_ms(&self) -> Option<i64> {
        self.duration_ms
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut PlaybackClock {
        &mut self.clock
    }

    pub fn markers(&self) -> &[TimelineMarker] {
        &self.markers
    }

    pub fn coordinator_mut(&mut self) -> &mut SyncCoordinator {
        &mut self.coordinator
    }

    pub fn dispatch(&mut self, event: ClockEvent) -> DispatchReport {
        self.coordinator.dispatch(event)
    }

    /// 跳转并立即分发 `Seeked`。
    pub fn seek(&mut self, ms: i64) -> DispatchReport {
        let event = self.clock.seek_to(ms);
        self.dispatch(event)
    }

    /// 模拟播放 `wall_ms` 墙钟毫秒，每 `step_ms` 推进一次；返回实际分发的事件数。
    /// 播放到结尾会提前停止。
    pub fn play_for(&mut self, wall_ms: u64, step_ms: u64) -> usize {
        let step_ms = step_ms.max(1);
        let mut elapsed = 0;
        let mut emitted = 0;
        self.clock.play();
        while elapsed < wall_ms && self.clock.is_playing() {
            let step = step_ms.min(wall_ms - elapsed);
            elapsed += step;
            if let Some(event) = self.clock.advance(step) {
                self.dispatch(event);
                emitted += 1;
            }
        }
        self.clock.pause();
        debug!(elapsed, emitted, clock_ms = self.clock.current_time_ms(), "playback stopped");
        emitted
    }

    pub fn console(&self) -> Option<&ConsolePanel> {
        self.coordinator.handler::<ConsolePanel>()
    }

    pub fn console_mut(&mut self) -> Option<&mut ConsolePanel> {
        self.coordinator.handler_mut::<ConsolePanel>()
    }

    pub fn network(&self) -> Option<&NetworkPanel> {
        self.coordinator.handler::<NetworkPanel>()
    }

    pub fn network_mut(&mut self) -> Option<&mut NetworkPanel> {
        self.coordinator.handler_mut::<NetworkPanel>()
    }

    pub fn snapshot(&self) -> ViewerSnapshot {
        ViewerSnapshot {
            title: self.title(),
            url: self.session_url.clone(),
            duration: format_duration(self.duration_ms),
            clock_ms: self.clock.current_time_ms(),
            markers: self.markers.clone(),
            console: self.console().map(PanelSnapshot::of_console),
            network: self.network().map(PanelSnapshot::of_network),
        }
    }
}
