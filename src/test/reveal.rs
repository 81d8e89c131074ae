use super::console_stream;
use crate::config::ViewerConfig;
use crate::panel::{ConsolePanel, Facet};
use crate::session::Timed;
use crate::timeline::{ACTIVE_PROXIMITY_MS, RevealState, reveal_at};

struct At(i64);

impl Timed for At {
    fn relative_ms(&self) -> i64 {
        self.0
    }
}

fn visible_set(entries: &[At], state: &RevealState) -> Vec<usize> {
    (0..entries.len())
        .filter(|i| state.is_time_visible(entries[*i].0))
        .collect()
}

#[test]
fn visible_set_is_independent_of_the_path_to_the_clock() {
    let entries = [At(0), At(40), At(40), At(900), At(1200), At(5000)];
    let target = 1000;

    // 逐步推进
    let mut stepped = RevealState::default();
    for t in (0..=target).step_by(250) {
        stepped = reveal_at(&entries, t, &stepped, ACTIVE_PROXIMITY_MS).state;
    }
    // 先跳到末尾再跳回
    let mut jumped = reveal_at(&entries, 6000, &RevealState::default(), ACTIVE_PROXIMITY_MS).state;
    jumped = reveal_at(&entries, target, &jumped, ACTIVE_PROXIMITY_MS).state;
    // 直接跳转
    let direct = reveal_at(&entries, target, &RevealState::default(), ACTIVE_PROXIMITY_MS).state;

    assert_eq!(stepped, direct);
    assert_eq!(jumped, direct);
    assert_eq!(visible_set(&entries, &direct), vec![0, 1, 2, 3]);
    assert_eq!(direct.visible_up_to, Some(3));
    assert_eq!(direct.visible_count, 4);
}

#[test]
fn seeking_backwards_shrinks_and_forwards_grows() {
    let entries = [At(100), At(200), At(300), At(400)];
    let mut prev = RevealState::default();
    let mut last_count = None;
    for t in [450, 350, 250, 150, 50] {
        prev = reveal_at(&entries, t, &prev, ACTIVE_PROXIMITY_MS).state;
        if let Some(c) = last_count {
            assert!(prev.visible_count < c);
        }
        last_count = Some(prev.visible_count);
    }
    assert_eq!(prev.visible_count, 0);
    for t in [150, 250, 350, 450] {
        let before = prev.visible_count;
        prev = reveal_at(&entries, t, &prev, ACTIVE_PROXIMITY_MS).state;
        assert!(prev.visible_count > before);
    }
    assert_eq!(prev.visible_count, 4);
}

#[test]
fn extreme_offsets_do_not_overflow_the_distance() {
    let entries = [At(i64::MIN), At(0), At(i64::MAX)];
    let s = reveal_at(&entries, 1000, &RevealState::default(), ACTIVE_PROXIMITY_MS).state;
    assert_eq!(s.visible_count, 2);
    assert_eq!(s.active, Some(1));

    let s = reveal_at(&entries[..1], i64::MAX, &RevealState::default(), ACTIVE_PROXIMITY_MS).state;
    assert_eq!(s.visible_up_to, Some(0));
    assert_eq!(s.active, None);
}

#[test]
fn active_entry_is_nearest_within_threshold() {
    let entries = [At(0), At(1000), At(4000)];
    let s = reveal_at(&entries, 1400, &RevealState::default(), ACTIVE_PROXIMITY_MS).state;
    assert_eq!(s.active, Some(1));

    // 最近的条目也超出阈值：没有活跃条目
    let s = reveal_at(&entries, 3000, &RevealState::default(), ACTIVE_PROXIMITY_MS).state;
    assert_eq!(s.visible_up_to, Some(1));
    assert_eq!(s.active, None);

    // 恰好等于阈值不算
    let s = reveal_at(&entries, 2500, &RevealState::default(), ACTIVE_PROXIMITY_MS).state;
    assert_eq!(s.active, None);
    let s = reveal_at(&entries, 2499, &RevealState::default(), ACTIVE_PROXIMITY_MS).state;
    assert_eq!(s.active, Some(1));
}

#[test]
fn scroll_is_requested_only_when_last_visible_changes() {
    let entries = [At(0), At(500), At(2000)];
    let first = reveal_at(&entries, 100, &RevealState::default(), ACTIVE_PROXIMITY_MS);
    assert_eq!(first.scroll_to, Some(0));
    let same = reveal_at(&entries, 300, &first.state, ACTIVE_PROXIMITY_MS);
    assert_eq!(same.scroll_to, None);
    let next = reveal_at(&entries, 600, &same.state, ACTIVE_PROXIMITY_MS);
    assert_eq!(next.scroll_to, Some(1));
    let back = reveal_at(&entries, 100, &next.state, ACTIVE_PROXIMITY_MS);
    assert_eq!(back.scroll_to, Some(0));
}

#[test]
fn rewinding_to_a_filtered_timeline_round_trips() {
    let entries = console_stream(&[(0, "log", "boot"), (500, "error", "bad"), (2000, "log", "late")]);
    let mut panel = ConsolePanel::new(entries, &ViewerConfig::default());

    panel.reveal_at(600).unwrap();
    panel.set_facet(Facet::parse("error"));
    assert_eq!(panel.displayed_indices(), vec![1]);
    assert_eq!(panel.state().reveal.active, Some(1));

    panel.reveal_at(2500).unwrap();
    assert_eq!(panel.displayed_indices(), vec![1]);
    assert_eq!(panel.time_visible_indices(), vec![0, 1, 2]);

    panel.reveal_at(600).unwrap();
    assert_eq!(panel.displayed_indices(), vec![1]);
    assert_eq!(panel.time_visible_indices(), vec![0, 1]);
    assert_eq!(panel.state().reveal.active, Some(1));

    panel.set_facet(Facet::All);
    assert_eq!(panel.displayed_indices(), vec![0, 1]);
}

#[test]
fn panel_without_a_clock_hides_nothing() {
    let entries = console_stream(&[(0, "log", "a"), (90_000, "log", "b")]);
    let panel = ConsolePanel::new(entries, &ViewerConfig::default());
    assert_eq!(panel.displayed_indices(), vec![0, 1]);
    assert!(panel.viewport().rows().is_empty());
}
