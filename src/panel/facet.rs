//! 分面过滤
//!
//! 每个面板独立维护一个分面（默认 `all`）。分面只决定“是否展示”，
//! 从不改变按时间揭示的状态。

use std::fmt;

use crate::session::{CaptureSource, ConsoleEntry};

/// 当前选中的分面
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Facet {
    #[default]
    All,
    Tag(String),
}

impl Facet {
    /// 空串与 `all` 都视为不过滤。
    pub fn parse(raw: &str) -> Facet {
        match raw.trim() {
            "" | "all" => Facet::All,
            tag => Facet::Tag(tag.to_string()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Facet::All)
    }

    pub fn matches(&self, tag: &str) -> bool {
        match self {
            Facet::All => true,
            Facet::Tag(t) => t == tag,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Facet::All => "all",
            Facet::Tag(t) => t,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 控制台分面标签：capture 格式的 exception/browser 来源优先于级别。
pub fn console_facet(entry: &ConsoleEntry) -> String {
    match entry.capture_source() {
        Some(CaptureSource::Exception) => "exception".to_string(),
        Some(CaptureSource::Browser) => "browser".to_string(),
        _ => entry.display_level().to_string(),
    }
}

/// 网络请求的资源类型粗分桶
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkFacet {
    Fetch,
    Js,
    Css,
    Img,
    Doc,
    Font,
    Media,
    Ws,
    Other,
}

const RESOURCE_TYPES: &[(NetworkFacet, &[&str])] = &[
    (NetworkFacet::Fetch, &["XHR", "Fetch"]),
    (NetworkFacet::Js, &["Script"]),
    (NetworkFacet::Css, &["Stylesheet"]),
    (NetworkFacet::Img, &["Image"]),
    (NetworkFacet::Doc, &["Document"]),
    (NetworkFacet::Font, &["Font"]),
    (NetworkFacet::Media, &["Media"]),
    (NetworkFacet::Ws, &["WebSocket"]),
];

impl NetworkFacet {
    /// 未登记的资源类型（含缺失）归入 `other`。
    pub fn classify(resource_type: Option<&str>) -> NetworkFacet {
        let resource_type = resource_type.unwrap_or("");
        RESOURCE_TYPES
            .iter()
            .find(|(_, types)| types.contains(&resource_type))
            .map(|(facet, _)| *facet)
            .unwrap_or(NetworkFacet::Other)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NetworkFacet::Fetch => "fetch",
            NetworkFacet::Js => "js",
            NetworkFacet::Css => "css",
            NetworkFacet::Img => "img",
            NetworkFacet::Doc => "doc",
            NetworkFacet::Font => "font",
            NetworkFacet::Media => "media",
            NetworkFacet::Ws => "ws",
            NetworkFacet::Other => "other",
        }
    }
}
