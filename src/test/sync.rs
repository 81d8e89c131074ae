use std::any::Any;

use super::{console_stream, network_stream};
use crate::config::ViewerConfig;
use crate::panel::{ConsolePanel, NetworkPanel, PanelError, Viewport};
use crate::timeline::{ClockEvent, StreamHandler, SyncCoordinator};

/// 每次都失败的处理器
struct Failing {
    panic: bool,
    calls: usize,
}

impl StreamHandler for Failing {
    fn name(&self) -> &str {
        if self.panic { "panicking" } else { "failing" }
    }

    fn on_clock(&mut self, _event: ClockEvent) -> Result<(), PanelError> {
        self.calls += 1;
        if self.panic {
            panic!("handler blew up");
        }
        Err(PanelError::RowOutOfRange { index: 9, len: 0 })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// 拒绝滚动的视口
#[derive(Default)]
struct StuckViewport;

impl Viewport for StuckViewport {
    fn scroll_into_view(&mut self, row: usize) -> Result<(), PanelError> {
        Err(PanelError::Viewport {
            row,
            reason: "detached".into(),
        })
    }
}

#[test]
fn failing_handlers_do_not_block_the_others() {
    let config = ViewerConfig::default();
    let mut coordinator = SyncCoordinator::default();
    coordinator.subscribe(Failing { panic: true, calls: 0 });
    coordinator.subscribe(ConsolePanel::new(console_stream(&[(0, "log", "a"), (800, "log", "b")]), &config));
    coordinator.subscribe(Failing { panic: false, calls: 0 });
    coordinator.subscribe(NetworkPanel::new(network_stream(&[(500, "XHR", "https://a.test/")]), Vec::new(), &config));
    assert_eq!(coordinator.len(), 4);

    let report = coordinator.dispatch(ClockEvent::TimeUpdate(600));
    assert_eq!(report.delivered, 2);
    assert_eq!(report.failed, vec!["panicking".to_string(), "failing".to_string()]);

    let console = coordinator.handler::<ConsolePanel>().unwrap();
    assert_eq!(console.state().reveal.visible_up_to, Some(0));
    let network = coordinator.handler::<NetworkPanel>().unwrap();
    assert_eq!(network.state().reveal.visible_up_to, Some(0));

    let report = coordinator.dispatch(ClockEvent::Seeked(1000));
    assert_eq!(report.delivered, 2);
    assert_eq!(
        coordinator.handler::<ConsolePanel>().unwrap().state().reveal.visible_up_to,
        Some(1)
    );
    assert_eq!(coordinator.handler::<Failing>().unwrap().calls, 2);
}

#[test]
fn viewport_errors_surface_as_handler_failures_but_state_advances() {
    let config = ViewerConfig::default();
    let mut coordinator = SyncCoordinator::default();
    let panel = ConsolePanel::with_viewport(console_stream(&[(0, "log", "a")]), &config, StuckViewport);
    coordinator.subscribe(panel);

    let report = coordinator.dispatch(ClockEvent::Seeked(10));
    assert_eq!(report.failed, vec!["console".to_string()]);
    let panel = coordinator.handler::<ConsolePanel<StuckViewport>>().unwrap();
    assert_eq!(panel.state().reveal.visible_up_to, Some(0));
    assert_eq!(panel.displayed_indices(), vec![0]);
}

#[test]
fn handlers_are_dispatched_in_subscription_order() {
    let config = ViewerConfig::default();
    let mut coordinator = SyncCoordinator::default();
    assert!(coordinator.is_empty());
    let first = coordinator.subscribe(ConsolePanel::new(Vec::new(), &config));
    let second = coordinator.subscribe(NetworkPanel::new(Vec::new(), Vec::new(), &config));
    assert_eq!((first, second), (0, 1));
    assert!(coordinator.handler_mut::<NetworkPanel>().is_some());
    assert!(coordinator.handler::<Failing>().is_none());
}
