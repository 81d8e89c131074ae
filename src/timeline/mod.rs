//! 时间轴同步核心
//!
//! 此模块包含时钟源、揭示引擎、同步协调器以及时间轴标记。

// 子模块声明
mod clock;
mod markers;
mod reveal;
mod sync;

// 重新导出公共接口
pub use clock::{ClockEvent, ClockSource, PlaybackClock, TIME_UPDATE_THROTTLE_MS};
pub use markers::{ERROR_COLOR, REQUEST_COLOR, TimelineMarker, build_markers};
pub use reveal::{ACTIVE_PROXIMITY_MS, RevealState, RevealStep, reveal_at};
pub use sync::{DispatchReport, StreamHandler, SyncCoordinator};
