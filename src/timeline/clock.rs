//! 时钟源
//!
//! 播放器对核心只暴露四样东西：`timeUpdate(ms)` / `seeked(ms)` 两种事件，
//! 以及 `current_time_ms`、`seek_to`、`duration_ms`。

use tracing::trace;

/// 默认的 time-update 限流间隔（墙钟毫秒）
pub const TIME_UPDATE_THROTTLE_MS: u64 = 250;

/// 时钟事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// 播放中的周期性时间更新（已限流）
    TimeUpdate(i64),
    /// 离散跳转，可能向后
    Seeked(i64),
}

impl ClockEvent {
    pub fn clock_ms(self) -> i64 {
        match self {
            ClockEvent::TimeUpdate(ms) | ClockEvent::Seeked(ms) => ms,
        }
    }
}

/// 时钟源接口
pub trait ClockSource {
    fn current_time_ms(&self) -> i64;
    /// 跳转并立即返回对应的 `Seeked` 事件
    fn seek_to(&mut self, ms: i64) -> ClockEvent;
    fn duration_ms(&self) -> Option<i64>;
}

/// 合成的媒体时钟：按墙钟增量和播放速率推进，用于离线驱动与测试。
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    current_ms: f64,
    duration_ms: Option<i64>,
    rate: f64,
    playing: bool,
    throttle_ms: u64,
    /// 距上次发出 TimeUpdate 的墙钟时间；`None` 表示还没发过
    since_emit_ms: Option<u64>,
}

impl PlaybackClock {
    pub fn new(duration_ms: Option<i64>) -> Self {
        Self {
            current_ms: 0.0,
            duration_ms: duration_ms.filter(|d| *d > 0),
            rate: 1.0,
            playing: false,
            throttle_ms: TIME_UPDATE_THROTTLE_MS,
            since_emit_ms: None,
        }
    }

    pub fn with_throttle_ms(mut self, throttle_ms: u64) -> Self {
        self.throttle_ms = throttle_ms;
        self
    }

    pub fn set_rate(&mut self, rate: f64) {
        if rate.is_finite() && rate > 0.0 {
            self.rate = rate;
        }
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    fn clamp(&self, ms: f64) -> f64 {
        let ms = ms.max(0.0);
        match self.duration_ms {
            Some(d) => ms.min(d as f64),
            None => ms,
        }
    }

    /// 墙钟前进 `elapsed_ms`。播放中则推进媒体时间；到达时长末尾后停止播放，
    /// 并且无视限流发出最后一次更新。距上次发出事件不足限流间隔时返回 `None`。
    pub fn advance(&mut self, elapsed_ms: u64) -> Option<ClockEvent> {
        if !self.playing {
            return None;
        }
        self.current_ms = self.clamp(self.current_ms + elapsed_ms as f64 * self.rate);
        let ended = self.duration_ms.is_some_and(|d| self.current_ms >= d as f64);
        if ended {
            self.playing = false;
        }

        let since = self.since_emit_ms.map(|s| s.saturating_add(elapsed_ms));
        match since {
            Some(s) if s < self.throttle_ms && !ended => {
                self.since_emit_ms = Some(s);
                trace!(since_emit_ms = s, "time update throttled");
                None
            }
            _ => {
                self.since_emit_ms = Some(0);
                Some(ClockEvent::TimeUpdate(self.current_time_ms()))
            }
        }
    }
}

impl ClockSource for PlaybackClock {
    fn current_time_ms(&self) -> i64 {
        self.current_ms.round() as i64
    }

    fn seek_to(&mut self, ms: i64) -> ClockEvent {
        self.current_ms = self.clamp(ms as f64);
        ClockEvent::Seeked(self.current_time_ms())
    }

    fn duration_ms(&self) -> Option<i64> {
        self.duration_ms
    }
}
