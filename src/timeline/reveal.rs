//! 揭示引擎：播放时钟 → 每条流的可见前缀
//!
//! 每次时钟事件都从头计算一遍（线性扫描），结果只取决于条目和当前时钟，
//! 与到达该时钟的路径（逐帧前进还是一次跳转）无关。

use crate::session::Timed;

/// 活跃条目的距离阈值（毫秒）。长时间无事件时不高亮早已过去的条目。
pub const ACTIVE_PROXIMITY_MS: i64 = 1500;

/// 单条流的揭示状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevealState {
    /// 最近一次时钟；`None` 表示还没有收到任何时钟事件
    pub clock_ms: Option<i64>,
    /// 最后一个按时间可见的下标
    pub visible_up_to: Option<usize>,
    /// 按时间可见的条目数
    pub visible_count: usize,
    /// 离时钟最近且在阈值内的条目
    pub active: Option<usize>,
}

impl RevealState {
    /// 尚无时钟时不按时间隐藏任何条目。
    pub fn is_time_visible(&self, relative_ms: i64) -> bool {
        self.clock_ms.is_none_or(|clock| relative_ms <= clock)
    }

    pub fn has_clock(&self) -> bool {
        self.clock_ms.is_some()
    }
}

/// 一次重算的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealStep {
    pub state: RevealState,
    /// 最后可见下标相对上一次发生变化时，需要滚动到的行（每次至多一次）
    pub scroll_to: Option<usize>,
}

/// 在 `clock_ms` 处重算揭示状态。
pub fn reveal_at<T: Timed>(
    entries: &[T],
    clock_ms: i64,
    prev: &RevealState,
    proximity_ms: i64,
) -> RevealStep {
    let mut last_visible = None;
    let mut visible_count = 0;
    let mut closest: Option<(usize, u64)> = None;

    for (idx, entry) in entries.iter().enumerate() {
        let rel = entry.relative_ms();
        if rel > clock_ms {
            continue;
        }
        last_visible = Some(idx);
        visible_count += 1;

        let dist = rel.abs_diff(clock_ms);
        // 严格小于：距离相同时保留先出现的条目
        if closest.is_none_or(|(_, best)| dist < best) {
            closest = Some((idx, dist));
        }
    }

    let active = closest
        .filter(|(_, dist)| i64::try_from(*dist).is_ok_and(|d| d < proximity_ms))
        .map(|(idx, _)| idx);
    let scroll_to = last_visible.filter(|idx| prev.visible_up_to != Some(*idx));

    RevealStep {
        state: RevealState {
            clock_ms: Some(clock_ms),
            visible_up_to: last_visible,
            visible_count,
            active,
        },
        scroll_to,
    }
}
