//! 滚动目标
//!
//! 面板不直接接触渲染表面，只在最后可见行变化时请求滚动。
//! 滚动约定：不带动画，滚到视口内最近的位置。

use super::PanelError;

pub trait Viewport {
    fn scroll_into_view(&mut self, row: usize) -> Result<(), PanelError>;
}

/// 只记录滚动请求的视口（离线导出和测试用）
#[derive(Debug, Clone, Default)]
pub struct ScrollLog {
    rows: Vec<usize>,
}

impl ScrollLog {
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn last(&self) -> Option<usize> {
        self.rows.last().copied()
    }
}

impl Viewport for ScrollLog {
    fn scroll_into_view(&mut self, row: usize) -> Result<(), PanelError> {
        self.rows.push(row);
        Ok(())
    }
}
