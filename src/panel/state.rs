//! 面板状态与行可见性投影
//!
//! 面板的全部可变状态都在 [`PanelState`] 里；行是否展示由
//! [`project_row`] 这个纯函数决定：按时间可见 且 匹配分面。

use serde::Serialize;

use super::PanelError;
use super::facet::Facet;
use crate::session::Timed;
use crate::timeline::{RevealState, reveal_at};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RowVisibility {
    pub time_hidden: bool,
    pub filter_hidden: bool,
    pub active: bool,
    pub detail_open: bool,
}

impl RowVisibility {
    pub fn is_displayed(self) -> bool {
        !self.time_hidden && !self.filter_hidden
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelState {
    pub reveal: RevealState,
    pub facet: Facet,
    /// 当前打开详情的行（同一时刻至多一个）
    pub open_detail: Option<usize>,
    /// 打开详情的行不受时间隐藏。只有网络面板开启。
    pub sticky_detail: bool,
}

impl PanelState {
    pub fn new(sticky_detail: bool) -> Self {
        Self {
            sticky_detail,
            ..Self::default()
        }
    }

    /// 重算揭示状态，返回需要滚动到的行。
    pub fn recompute<R: Timed>(&mut self, rows: &[R], clock_ms: i64, proximity_ms: i64) -> Option<usize> {
        let step = reveal_at(rows, clock_ms, &self.reveal, proximity_ms);
        self.reveal = step.state;
        step.scroll_to
    }

    /// 切换详情：再次点击同一行关闭；打开新行会关闭其他行。返回切换后是否打开。
    pub fn toggle_detail(&mut self, index: usize, len: usize) -> Result<bool, PanelError> {
        if index >= len {
            return Err(PanelError::RowOutOfRange { index, len });
        }
        if self.open_detail == Some(index) {
            self.open_detail = None;
            Ok(false)
        } else {
            self.open_detail = Some(index);
            Ok(true)
        }
    }
}

pub fn project_row(state: &PanelState, index: usize, relative_ms: i64, facet_tag: &str) -> RowVisibility {
    let detail_open = state.open_detail == Some(index);
    let time_visible =
        state.reveal.is_time_visible(relative_ms) || (state.sticky_detail && detail_open);
    RowVisibility {
        time_hidden: !time_visible,
        filter_hidden: !state.facet.matches(facet_tag),
        active: state.reveal.active == Some(index),
        detail_open,
    }
}
