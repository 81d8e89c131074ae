use super::{console_stream, network_stream};
use crate::config::ViewerConfig;
use crate::panel::{
    ConsolePanel, CopyAction, NetworkPanel, render_response_body, render_ws_detail,
    render_ws_section,
};
use crate::session::{FrameDirection, ResponseContent, WebSocketFrame, WebSocketLog, normalize_network};
use serde_json::json;

#[test]
fn base64_bodies_are_never_decoded() {
    let content = ResponseContent {
        text: Some("A".repeat(4000)),
        mime_type: Some("image/png".into()),
        encoding: Some("base64".into()),
        size: None,
    };
    let html = render_response_body(&content, 10240, false);
    assert!(html.contains("(binary data, ~2.9 KB)"));
    assert!(!html.contains("AAAA"));
    assert!(!html.contains("Show full"));
}

#[test]
fn rows_show_status_type_and_size() {
    let entries = normalize_network(
        &json!([
            {
                "wallTime": 1.0,
                "resourceType": "XHR",
                "request": { "method": "POST", "url": "https://api.test/v1/items?page=2" },
                "response": { "status": 201, "content": { "size": 2048, "mimeType": "application/json" } }
            },
            { "wallTime": 2.0, "url": "https://api.test/down", "error": "net::ERR_FAILED" },
            { "wallTime": 3.0, "url": "https://api.test/pending", "response": { "content": { "mimeType": "text/html" } }, "encodedDataLength": 300 }
        ]),
        0,
    );
    let panel = NetworkPanel::new(entries, Vec::new(), &ViewerConfig::default());
    let rows = panel.rows();

    assert_eq!(rows[0].method, "POST");
    assert_eq!(rows[0].url, "/v1/items?page=2");
    assert_eq!(rows[0].status, "201");
    assert_eq!(rows[0].status_class, "status-2xx");
    assert_eq!(rows[0].kind, "XHR");
    assert_eq!(rows[0].size, "2.0 KB");
    assert_eq!(rows[0].facet.as_str(), "fetch");

    assert_eq!(rows[1].status, "ERR");
    assert_eq!(rows[1].status_class, "status-0");
    assert_eq!(rows[1].kind, "-");
    assert_eq!(rows[1].size, "-");

    assert_eq!(rows[2].status, "-");
    assert_eq!(rows[2].kind, "text/html");
    assert_eq!(rows[2].size, "300 B");
    assert_eq!(rows[2].facet.as_str(), "other");

    let html = rows[0].html();
    assert!(html.contains(r#"data-filter-type="fetch""#));
    assert!(html.contains(r#"title="https://api.test/v1/items?page=2""#));
}

#[test]
fn open_network_detail_stays_visible_after_rewind() {
    let entries = network_stream(&[(100, "XHR", "https://a.test/1"), (3000, "XHR", "https://a.test/2")]);
    let mut panel = NetworkPanel::new(entries, Vec::new(), &ViewerConfig::default());
    panel.reveal_at(3500).unwrap();
    assert!(panel.toggle_detail(1).unwrap());

    panel.reveal_at(500).unwrap();
    let vis = panel.visibility(1);
    assert!(!vis.time_hidden);
    assert!(vis.detail_open);
    assert_eq!(panel.displayed_indices(), vec![0, 1]);

    // 关闭详情后恢复按时间隐藏
    assert!(!panel.toggle_detail(1).unwrap());
    assert_eq!(panel.displayed_indices(), vec![0]);
}

#[test]
fn open_console_detail_does_not_pin_the_row() {
    let entries = console_stream(&[(100, "log", "a"), (3000, "log", "b")]);
    let mut panel = ConsolePanel::new(entries, &ViewerConfig::default());
    panel.reveal_at(3500).unwrap();
    panel.toggle_detail(1).unwrap();

    panel.reveal_at(500).unwrap();
    let vis = panel.visibility(1);
    assert!(vis.time_hidden);
    assert!(vis.detail_open);
    assert_eq!(panel.displayed_indices(), vec![0]);
}

#[test]
fn opening_one_detail_closes_the_other() {
    let entries = network_stream(&[(0, "XHR", "https://a.test/1"), (10, "XHR", "https://a.test/2")]);
    let mut panel = NetworkPanel::new(entries, Vec::new(), &ViewerConfig::default());
    panel.toggle_detail(0).unwrap();
    panel.toggle_detail(1).unwrap();
    assert_eq!(panel.state().open_detail, Some(1));
    assert!(!panel.visibility(0).detail_open);
    assert!(panel.toggle_detail(7).is_err());
}

#[test]
fn detail_pane_lists_sections_in_order() {
    let entries = normalize_network(
        &json!([{
            "wallTime": 65.0,
            "request": {
                "method": "POST",
                "url": "https://a.test/final",
                "headers": [{ "name": "Content-Type", "value": "application/json" }],
                "postData": { "text": "{\"q\":1}" }
            },
            "response": {
                "status": 200,
                "headers": { "Server": "x" },
                "content": { "text": "{\"ok\":true}", "mimeType": "application/json" }
            },
            "redirectChain": [{ "status": 302, "url": "https://a.test/start" }],
            "timings": { "blocked": -1, "wait": 12.25 },
            "initiator": {
                "type": "script",
                "url": "https://a.test/app.js",
                "lineNumber": 0,
                "stack": {
                    "callFrames": [{ "functionName": "load", "url": "https://a.test/app.js", "lineNumber": 1, "columnNumber": 4 }],
                    "parent": { "description": "setTimeout", "callFrames": [{ "url": "https://a.test/boot.js" }] }
                }
            }
        }]),
        0,
    );
    let mut panel = NetworkPanel::new(entries, Vec::new(), &ViewerConfig::default());
    panel.toggle_detail(0).unwrap();
    let html = panel.detail_html().unwrap();

    let order = [
        "<h4>Time</h4><pre>01:05</pre>",
        "<h4>Redirect Chain</h4>",
        "<h4>URL</h4>",
        "<h4>Request Headers</h4><pre>Content-Type: application/json</pre>",
        "<h4>Request Body</h4>",
        "<h4>Response Headers</h4><pre>Server: x</pre>",
        "<h4>Response Body</h4>",
        "<h4>Timing</h4>",
        "<h4>Initiator</h4><pre>script</pre>",
        r#"data-action="copy-all""#,
    ];
    let mut at = 0;
    for needle in order {
        let pos = html[at..].find(needle).unwrap_or_else(|| panic!("missing {needle}"));
        at += pos + needle.len();
    }
    assert!(html.contains(r#"<span class="redirect-status status-3xx">302</span>"#));
    assert!(html.contains("{\n  &quot;ok&quot;: true\n}"));
    assert!(!html.contains("blocked"));
    assert!(html.contains("12.2ms") || html.contains("12.3ms"));
    assert!(html.contains(r#"<pre class="initiator-location">https://a.test/app.js:1</pre>"#));
    assert!(html.contains("--- setTimeout ---"));
    assert!(html.contains("(anonymous)"));
}

#[test]
fn show_full_expands_only_until_the_detail_changes() {
    let config = ViewerConfig {
        response_body_limit: 4,
        ..ViewerConfig::default()
    };
    let entries = normalize_network(
        &json!([{ "request": { "url": "https://a.test/" }, "response": { "content": { "text": "abcdefgh", "mimeType": "text/plain" } } }]),
        0,
    );
    let mut panel = NetworkPanel::new(entries, Vec::new(), &config);
    panel.expand_response_body();
    panel.toggle_detail(0).unwrap();
    assert!(panel.detail_html().unwrap().contains("Show full (8 B)"));

    panel.expand_response_body();
    let html = panel.detail_html().unwrap();
    assert!(html.contains(">abcdefgh</pre>"));
    assert!(!html.contains("Show full"));

    panel.toggle_detail(0).unwrap();
    panel.toggle_detail(0).unwrap();
    assert!(panel.detail_html().unwrap().contains("Show full"));
}

#[test]
fn copy_actions_combine_curl_and_response() {
    let entries = normalize_network(
        &json!([{ "request": { "method": "DELETE", "url": "https://a.test/x" }, "response": { "content": { "text": "gone" } } }]),
        0,
    );
    let mut panel = NetworkPanel::new(entries, Vec::new(), &ViewerConfig::default());
    assert_eq!(panel.copy_text(CopyAction::Curl), None);
    panel.toggle_detail(0).unwrap();
    let curl = panel.copy_text(CopyAction::Curl).unwrap();
    assert_eq!(curl, "curl 'https://a.test/x' \\\n  -X DELETE");
    assert_eq!(panel.copy_text(CopyAction::Response).unwrap(), "gone");
    assert_eq!(
        panel.copy_text(CopyAction::All).unwrap(),
        format!("{curl}\n\n--- Response ---\n\ngone")
    );
}

#[test]
fn websocket_section_and_detail() {
    let mut frames = vec![
        WebSocketFrame::new(FrameDirection::Sent, "<hello>"),
        WebSocketFrame::new(FrameDirection::Received, &"z".repeat(250)),
    ];
    frames.extend((0..5).map(|i| WebSocketFrame::new(FrameDirection::Received, &i.to_string())));
    let log = WebSocketLog {
        url: Some("wss://a.test/live".into()),
        closed: false,
        frames,
    };

    let section = render_ws_section(std::slice::from_ref(&log));
    assert!(section.contains("WebSocket Connections (1)"));
    assert!(section.contains("7 frames"));
    assert!(section.contains(r#"<span class="ws-status ws-open">Open</span>"#));
    assert_eq!(render_ws_section(&[]), "");

    let detail = render_ws_detail(&log, 3, 200);
    assert!(detail.contains(r#"<span class="ws-dir-sent">↑</span><span class="ws-frame-data">&lt;hello&gt;</span>"#));
    assert!(detail.contains(&format!("{}...", "z".repeat(200))));
    assert!(detail.contains("... 4 more frames"));
    assert_eq!(detail.matches(r#"class="ws-dir-recv""#).count(), 2);

    let mut panel = NetworkPanel::new(Vec::new(), vec![log], &ViewerConfig::default());
    assert!(panel.ws_detail_html().is_none());
    assert!(panel.toggle_ws_detail(0).unwrap());
    assert!(panel.ws_detail_html().unwrap().contains("Frames (7)"));
    assert!(panel.toggle_ws_detail(3).is_err());
}
