use crate::session::{
    ArgList, CaptureSource, ConsolePayload, Headers, RecordingSession, RecordingSnapshot,
    StackFrame, normalize_console, normalize_network, normalize_websockets,
};
use serde_json::json;

#[test]
fn console_entries_are_sorted_and_ties_keep_input_order() {
    let raw = json!([
        { "timestamp": 1300, "level": "log", "message": "c" },
        { "timestamp": 1100, "level": "log", "message": "a" },
        { "timestamp": 1300, "level": "warn", "message": "d" },
        { "timestamp": 1100, "level": "log", "message": "b" }
    ]);
    let entries = normalize_console(&raw, 1000);
    let order = entries
        .iter()
        .map(|e| (e.relative_ms, e.message.clone().unwrap_or_default()))
        .collect::<Vec<_>>();
    assert_eq!(
        order,
        vec![
            (100, "a".to_string()),
            (100, "b".to_string()),
            (300, "c".to_string()),
            (300, "d".to_string()),
        ]
    );
}

#[test]
fn console_offsets_are_rounded_and_missing_timestamps_map_to_zero() {
    let raw = json!([
        { "timestamp": 1000.6, "message": "late" },
        { "message": "no time" }
    ]);
    let entries = normalize_console(&raw, 1000);
    assert_eq!(entries[0].relative_ms, 0);
    assert_eq!(entries[0].message.as_deref(), Some("no time"));
    assert_eq!(entries[1].relative_ms, 1);
}

#[test]
fn malformed_console_input_degrades_to_empty_or_skips() {
    assert!(normalize_console(&json!({ "not": "an array" }), 0).is_empty());
    assert!(normalize_console(&json!(null), 0).is_empty());

    let entries = normalize_console(&json!([42, "text", { "timestamp": 5, "message": "kept" }]), 0);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message.as_deref(), Some("kept"));
}

#[test]
fn source_field_selects_the_capture_format() {
    let raw = json!([
        { "timestamp": 0, "level": "log", "args": ["plain"] },
        { "timestamp": 1, "source": "console", "level": "log", "args": [{ "type": "string", "value": "x" }] },
        { "timestamp": 2, "source": "exception", "message": "boom" },
        { "timestamp": 3, "source": null, "args": [1] }
    ]);
    let entries = normalize_console(&raw, 0);
    assert!(matches!(entries[0].payload, ConsolePayload::Legacy { .. }));
    match &entries[1].payload {
        ConsolePayload::Capture { source, args } => {
            assert_eq!(*source, CaptureSource::Console);
            assert!(matches!(args, ArgList::Items(items) if items.len() == 1));
        }
        other => panic!("expected capture payload, got {other:?}"),
    }
    assert!(entries[2].is_exception());
    assert_eq!(entries[2].display_level(), "error");
    assert_eq!(entries[2].level_label(), "EXCEPTION");
    match &entries[3].payload {
        ConsolePayload::Capture { source, .. } => assert_eq!(*source, CaptureSource::Other(String::new())),
        other => panic!("expected capture payload, got {other:?}"),
    }
    assert_eq!(entries[3].display_level(), "log");
}

#[test]
fn stack_trace_keeps_async_boundaries() {
    let raw = json!([{
        "timestamp": 0,
        "source": "console",
        "stackTrace": [
            { "functionName": "inner", "url": "app.js", "lineNumber": 9, "columnNumber": 2 },
            { "asyncBoundary": "Promise.then" },
            "garbage"
        ]
    }]);
    let entries = normalize_console(&raw, 0);
    let stack = &entries[0].stack_trace;
    assert_eq!(stack.len(), 2);
    match &stack[0] {
        StackFrame::Call(frame) => {
            assert_eq!(frame.display_name(), Some("inner"));
            assert_eq!(frame.location.frame_label().as_deref(), Some("app.js:10:3"));
        }
        other => panic!("expected call frame, got {other:?}"),
    }
    assert_eq!(stack[1], StackFrame::AsyncBoundary("Promise.then".into()));
}

#[test]
fn network_accepts_har_and_bare_arrays() {
    let entry = json!({ "wallTime": 2.5, "request": { "method": "POST", "url": "https://a.test/x" } });
    let har = normalize_network(&json!({ "log": { "entries": [entry.clone()] } }), 2000);
    let bare = normalize_network(&json!([entry]), 2000);
    assert_eq!(har, bare);
    assert_eq!(har[0].relative_ms, 500);
    assert_eq!(har[0].request.method, "POST");
}

#[test]
fn network_prefers_wall_time_over_timestamp() {
    let raw = json!([
        { "wallTime": 3.0, "timestamp": 99.0, "url": "https://a.test/a" },
        { "wallTime": 0, "timestamp": 2.0, "url": "https://a.test/b" },
        { "url": "https://a.test/c" }
    ]);
    let entries = normalize_network(&raw, 1000);
    let by_url = entries
        .iter()
        .map(|e| (e.request.url.as_str(), e.relative_ms))
        .collect::<Vec<_>>();
    assert_eq!(
        by_url,
        vec![("https://a.test/c", 0), ("https://a.test/b", 1000), ("https://a.test/a", 2000)]
    );
}

#[test]
fn network_flat_fields_fill_missing_request_and_response() {
    let raw = json!([{
        "timestamp": 1.0,
        "url": "https://a.test/flat",
        "status": 404,
        "requestHeaders": { "Accept": "*/*" },
        "postData": { "text": "a=1" },
        "error": ""
    }]);
    let entries = normalize_network(&raw, 0);
    let e = &entries[0];
    assert_eq!(e.request.method, "GET");
    assert_eq!(e.request.url, "https://a.test/flat");
    assert_eq!(e.response.status, Some(404));
    assert_eq!(
        e.request.headers,
        Some(Headers::Pairs(vec![("Accept".into(), "*/*".into())]))
    );
    assert_eq!(e.request.post_data.as_deref(), Some("a=1"));
    assert_eq!(e.error, None);
}

#[test]
fn network_timings_keep_capture_order() {
    let raw = json!([{ "timings": { "wait": 5, "dns": -1, "connect": "2.5" } }]);
    let entries = normalize_network(&raw, 0);
    assert_eq!(
        entries[0].timings,
        vec![
            ("wait".to_string(), Some(5.0)),
            ("dns".to_string(), Some(-1.0)),
            ("connect".to_string(), Some(2.5)),
        ]
    );
}

#[test]
fn network_non_object_records_are_kept_as_empty_entries() {
    let entries = normalize_network(&json!([7, { "timestamp": 1.0, "url": "u" }]), 0);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].request.url, "");
    assert_eq!(entries[0].request.method, "GET");
    assert!(normalize_network(&json!("nope"), 0).is_empty());
}

#[test]
fn websocket_logs_tolerate_bad_shapes() {
    let logs = normalize_websockets(&json!([
        { "url": "wss://a.test", "closed": true, "frames": [{ "direction": "sent", "payloadData": "hi" }, 3] },
        "junk"
    ]));
    assert_eq!(logs.len(), 1);
    assert!(logs[0].closed);
    assert_eq!(logs[0].frames.len(), 1);
    assert!(normalize_websockets(&json!({})).is_empty());
}

#[test]
fn session_start_time_falls_back_to_iso_timestamp() {
    let snapshot: RecordingSnapshot = serde_json::from_value(json!({
        "metadata": { "timestamp": "2024-01-01T00:00:00Z", "url": "https://a.test", "duration": 5000 },
        "consoleLogs": [{ "timestamp": 1704067200250i64, "message": "x" }],
        "networkRequests": [],
        "webSocketLogs": []
    }))
    .unwrap();
    let session = RecordingSession::from_snapshot(&snapshot);
    assert_eq!(session.start_time_ms, 1_704_067_200_000);
    assert_eq!(session.console[0].relative_ms, 250);
    assert_eq!(session.duration_ms(), Some(5000));
    assert_eq!(session.url(), "https://a.test");
}
