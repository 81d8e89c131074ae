//! 展示格式化：时间、大小、URL、请求头

use url::Url;

use crate::session::Headers;

/// `mm:ss.mmm`（控制台行）；负偏移按 0 显示。
pub fn format_clock_millis(relative_ms: i64) -> String {
    let ms = relative_ms.max(0);
    let total_sec = ms / 1000;
    format!("{:02}:{:02}.{:03}", total_sec / 60, total_sec % 60, ms % 1000)
}

/// `mm:ss`（网络详情、播放器）
pub fn format_clock(relative_ms: i64) -> String {
    let total_sec = relative_ms.max(0) / 1000;
    format!("{:02}:{:02}", total_sec / 60, total_sec % 60)
}

/// 录制时长：`{m}m {s}s`；缺失或 0 返回空串。
pub fn format_duration(ms: Option<i64>) -> String {
    match ms {
        Some(ms) if ms > 0 => {
            let total_sec = ms / 1000;
            format!("{}m {}s", total_sec / 60, total_sec % 60)
        }
        _ => String::new(),
    }
}

pub fn format_size(bytes: Option<f64>) -> String {
    let Some(bytes) = bytes.filter(|b| b.is_finite() && *b > 0.0) else {
        return "-".to_string();
    };
    if bytes < 1024.0 {
        if bytes.fract() == 0.0 {
            format!("{} B", bytes as i64)
        } else {
            format!("{bytes} B")
        }
    } else if bytes < 1024.0 * 1024.0 {
        format!("{:.1} KB", bytes / 1024.0)
    } else {
        format!("{:.1} MB", bytes / (1024.0 * 1024.0))
    }
}

/// 按字符截断，超出时追加 `...`。
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// 只保留路径和查询串；解析失败时截断原文。
pub fn truncate_url(raw: &str, max: usize) -> String {
    match Url::parse(raw) {
        Ok(url) => {
            let mut path = url.path().to_string();
            if let Some(q) = url.query().filter(|q| !q.is_empty()) {
                path.push('?');
                path.push_str(q);
            }
            truncate_chars(&path, max)
        }
        Err(_) => truncate_chars(raw, max),
    }
}

pub fn format_headers(headers: Option<&Headers>) -> String {
    match headers {
        None => "(none)".to_string(),
        Some(Headers::Raw(text)) => text.clone(),
        Some(Headers::Pairs(pairs)) => pairs
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn status_class(status: Option<i64>) -> &'static str {
    match status {
        None => "status-0",
        Some(s) if (200..300).contains(&s) => "status-2xx",
        Some(s) if (300..400).contains(&s) => "status-3xx",
        Some(s) if (400..500).contains(&s) => "status-4xx",
        Some(_) => "status-5xx",
    }
}
