//! 同步协调器
//!
//! 没有自己的状态：把每个时钟事件按订阅顺序交给所有流处理器。
//! 单个处理器出错（或 panic）只记录日志，不影响其他处理器。

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{trace, warn};

use super::clock::ClockEvent;
use crate::panel::PanelError;

/// 流处理器：由各面板实现。
pub trait StreamHandler: Any {
    fn name(&self) -> &str;
    fn on_clock(&mut self, event: ClockEvent) -> Result<(), PanelError>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// 一次分发的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub delivered: usize,
    /// 失败的处理器名
    pub failed: Vec<String>,
}

#[derive(Default)]
pub struct SyncCoordinator {
    handlers: Vec<Box<dyn StreamHandler>>,
}

impl SyncCoordinator {
    /// 订阅：返回处理器在分发顺序中的位置。
    pub fn subscribe<H: StreamHandler>(&mut self, handler: H) -> usize {
        self.handlers.push(Box::new(handler));
        self.handlers.len() - 1
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    #[tracing::instrument(skip(self), fields(handlers = self.handlers.len()))]
    pub fn dispatch(&mut self, event: ClockEvent) -> DispatchReport {
        let mut report = DispatchReport::default();
        for handler in &mut self.handlers {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler.on_clock(event)));
            match outcome {
                Ok(Ok(())) => {
                    trace!(stream = handler.name(), "recomputed");
                    report.delivered += 1;
                }
                Ok(Err(err)) => {
                    warn!(stream = handler.name(), %err, "stream recompute failed");
                    report.failed.push(handler.name().to_string());
                }
                Err(_) => {
                    warn!(stream = handler.name(), "stream recompute panicked");
                    report.failed.push(handler.name().to_string());
                }
            }
        }
        report
    }

    /// 按类型取出第一个匹配的处理器
    pub fn handler<T: StreamHandler>(&self) -> Option<&T> {
        self.handlers
            .iter()
            .find_map(|h| h.as_any().downcast_ref::<T>())
    }

    pub fn handler_mut<T: StreamHandler>(&mut self) -> Option<&mut T> {
        self.handlers
            .iter_mut()
            .find_map(|h| h.as_any_mut().downcast_mut::<T>())
    }
}
