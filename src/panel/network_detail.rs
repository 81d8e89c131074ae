//! 网络请求详情面板与 cURL 生成

use serde_json::Value;

use crate::render::format::{format_clock, format_headers, format_size};
use crate::render::{escape_html, render_initiator_stack};
use crate::session::{Initiator, NetworkEntry, ResponseContent};

/// 发起方调用栈沿 `parent` 链展开的最大层数
const INITIATOR_PARENT_LIMIT: usize = 32;

fn section(title: &str, body: &str) -> String {
    format!(r#"<div class="detail-section"><h4>{title}</h4>{body}</div>"#)
}

fn pre(text: &str) -> String {
    format!("<pre>{}</pre>", escape_html(text))
}

fn shell_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}

/// 生成可复制的 cURL 命令；各部分以 ` \` 换行续接。
pub fn curl_command(entry: &NetworkEntry) -> String {
    let request = &entry.request;
    let mut parts = vec![format!("curl {}", shell_quote(&request.url))];
    if request.method != "GET" {
        parts.push(format!("-X {}", request.method));
    }
    if let Some(headers) = &request.headers {
        for (name, value) in headers.pairs() {
            parts.push(format!("-H {}", shell_quote(&format!("{name}: {value}"))));
        }
    }
    if let Some(body) = &request.post_data {
        parts.push(format!("--data-raw {}", shell_quote(body)));
    }
    parts.join(" \\\n  ")
}

/// 响应正文。base64 正文只给出估算大小；JSON 正文格式化后再截断到 `limit` 字符。
pub fn render_response_body(content: &ResponseContent, limit: usize, show_full: bool) -> String {
    let text = content.text.as_deref().unwrap_or("");
    if content.is_binary() {
        let estimate = (text.len() as f64 * 0.75).round();
        return section(
            "Response Body",
            &format!(
                r#"<pre class="response-body-content">(binary data, ~{})</pre>"#,
                format_size(Some(estimate))
            ),
        );
    }

    let is_json = content
        .mime_type
        .as_deref()
        .is_some_and(|m| m.contains("json"));
    let body = if is_json {
        serde_json::from_str::<Value>(text)
            .ok()
            .and_then(|v| serde_json::to_string_pretty(&v).ok())
            .unwrap_or_else(|| text.to_string())
    } else {
        text.to_string()
    };

    let truncated = !show_full && body.chars().count() > limit;
    let shown = if truncated {
        body.chars().take(limit).collect::<String>()
    } else {
        body.clone()
    };

    let mut html = format!(
        r#"<pre class="response-body-content{}">{}</pre>"#,
        if truncated { " truncated" } else { "" },
        escape_html(&shown)
    );
    if truncated {
        html.push_str(&format!(
            r#"<button class="response-body-show-full">Show full ({})</button>"#,
            format_size(Some(body.chars().count() as f64))
        ));
    }
    section("Response Body", &html)
}

fn render_redirects(entry: &NetworkEntry) -> String {
    let mut html = String::from(r#"<div class="redirect-chain">"#);
    for step in &entry.redirect_chain {
        html.push_str(&format!(
            r#"<div class="redirect-step"><span class="redirect-status status-3xx">{}</span> <span class="redirect-url">{}</span></div>"#,
            escape_html(step.status.as_deref().unwrap_or("")),
            escape_html(step.url.as_deref().unwrap_or(""))
        ));
    }
    let final_status = entry
        .response
        .status
        .map(|s| s.to_string())
        .unwrap_or_default();
    html.push_str(&format!(
        r#"<div class="redirect-step redirect-final"><span class="redirect-status status-2xx">{final_status}</span> <span class="redirect-url">{}</span></div>"#,
        escape_html(&entry.request.url)
    ));
    html.push_str("</div>");
    html
}

fn render_timings(timings: &[(String, Option<f64>)]) -> String {
    let items: String = timings
        .iter()
        .filter_map(|(key, val)| val.filter(|v| *v >= 0.0).map(|v| (key, v)))
        .map(|(key, v)| {
            format!(
                r#"<span class="timing-item">{}: <span class="timing-value">{v:.1}ms</span></span>"#,
                escape_html(key)
            )
        })
        .collect();
    format!(r#"<div class="timing-bar">{items}</div>"#)
}

fn render_initiator(initiator: &Initiator) -> String {
    let mut html = pre(initiator.kind.as_deref().unwrap_or("other"));
    if let Some(loc) = initiator.location.short_label() {
        html.push_str(&format!(
            r#"<pre class="initiator-location">{}</pre>"#,
            escape_html(&loc)
        ));
    }
    if let Some(stack) = &initiator.stack {
        html.push_str(&render_initiator_stack(stack, INITIATOR_PARENT_LIMIT));
    }
    section("Initiator", &html)
}

fn render_actions(has_body: bool) -> String {
    let mut html = String::from(r#"<div class="detail-actions">"#);
    html.push_str(r#"<button class="detail-action-btn" data-action="copy-curl">Copy cURL</button>"#);
    if has_body {
        html.push_str(r#"<button class="detail-action-btn" data-action="copy-response">Copy Response</button>"#);
        html.push_str(r#"<button class="detail-action-btn" data-action="copy-all">Copy cURL + Response</button>"#);
    }
    html.push_str("</div>");
    html
}

/// 详情面板全文
pub(crate) fn render_network_detail(entry: &NetworkEntry, body_limit: usize, show_full: bool) -> String {
    let request = &entry.request;
    let content = &entry.response.content;
    let has_body = content.text.as_deref().is_some_and(|t| !t.is_empty());

    let mut html = section("Time", &pre(&format_clock(entry.relative_ms)));
    if !entry.redirect_chain.is_empty() {
        html.push_str(&section("Redirect Chain", &render_redirects(entry)));
    }
    let url = if request.url.is_empty() { "-" } else { &request.url };
    html.push_str(&section("URL", &pre(url)));
    html.push_str(&section("Request Headers", &pre(&format_headers(request.headers.as_ref()))));
    if let Some(body) = &request.post_data {
        html.push_str(&section("Request Body", &pre(body)));
    }
    html.push_str(&section(
        "Response Headers",
        &pre(&format_headers(entry.response.headers.as_ref())),
    ));
    if has_body {
        html.push_str(&render_response_body(content, body_limit, show_full));
    }
    if !entry.timings.is_empty() {
        html.push_str(&section("Timing", &render_timings(&entry.timings)));
    }
    if let Some(initiator) = &entry.initiator {
        html.push_str(&render_initiator(initiator));
    }
    if let Some(error) = &entry.error {
        html.push_str(&section(
            "Error",
            &format!(r#"<pre class="network-error">{}</pre>"#, escape_html(error)),
        ));
    }
    html.push_str(&render_actions(has_body));
    format!(r#"<div class="network-detail">{html}</div>"#)
}
