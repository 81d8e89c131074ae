//! HTML 转义
//!
//! 所有来自录制数据的文本在进入标记前都必须经过这里。

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html(r#"a & "b""#), "a &amp; &quot;b&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn escaping_is_not_idempotent_on_entities() {
        // 已经是实体的文本会被再次转义，保证原样显示
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }
}
