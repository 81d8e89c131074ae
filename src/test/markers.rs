use super::network_stream;
use crate::session::normalize_console;
use crate::timeline::{ERROR_COLOR, REQUEST_COLOR, build_markers};
use serde_json::json;

#[test]
fn errors_and_requests_become_markers() {
    let console = normalize_console(
        &json!([
            { "timestamp": 100, "level": "log", "message": "fine" },
            { "timestamp": 200, "level": "error", "message": "broken" },
            { "timestamp": 300, "source": "exception", "args": [{ "type": "object", "subtype": "error", "description": "RangeError: nope" }] }
        ]),
        0,
    );
    let long_url = format!("https://a.test/{}", "p".repeat(100));
    let network = network_stream(&[(50, "XHR", long_url.as_str())]);

    let markers = build_markers(&console, &network, 80);
    assert_eq!(markers.len(), 3);

    assert_eq!(markers[0].time_ms, 200);
    assert_eq!(markers[0].color, ERROR_COLOR);
    assert_eq!(markers[0].label, "Error: broken");
    assert_eq!(markers[1].label, "Error: RangeError: nope");

    assert_eq!(markers[2].color, REQUEST_COLOR);
    assert_eq!(markers[2].time_ms, 50);
    assert_eq!(markers[2].label.chars().count(), 80);
    assert!(markers[2].label.starts_with("GET https://a.test/ppp"));
}

#[test]
fn marker_position_needs_a_known_duration() {
    let network = network_stream(&[(2500, "Fetch", "https://a.test/")]);
    let markers = build_markers(&[], &network, 80);
    assert_eq!(markers[0].position_pct(Some(10_000)), Some(25.0));
    assert_eq!(markers[0].position_pct(None), None);
    assert_eq!(markers[0].position_pct(Some(1000)), None);
}
