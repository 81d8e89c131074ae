//! 网络请求条目
//!
//! 输入有两种形状：HAR 包装（`log.entries`）或扁平数组；条目内部也可能
//! 只有顶层的 `method/url/status/...` 字段。这里统一成一种结构。

use serde::Deserialize;
use serde_json::Value;

use super::lenient::{objects, opt_f64, opt_object, opt_string, scalar_to_string, value_to_f64};
use super::location::Initiator;
use super::normalize::Timed;

/// 请求/响应头：有序的 (name, value) 列表；无法识别的形状原样保留为文本。
#[derive(Debug, Clone, PartialEq)]
pub enum Headers {
    Pairs(Vec<(String, String)>),
    Raw(String),
}

impl Headers {
    pub fn from_value(v: Option<&Value>) -> Option<Headers> {
        let text_of = |v: &Value| scalar_to_string(v).unwrap_or_else(|| v.to_string());
        match v? {
            Value::Null => None,
            Value::Array(items) => Some(Headers::Pairs(
                items
                    .iter()
                    .map(|h| {
                        let name = h.get("name").map(text_of).unwrap_or_else(|| "undefined".into());
                        let value = h.get("value").map(text_of).unwrap_or_else(|| "undefined".into());
                        (name, value)
                    })
                    .collect(),
            )),
            Value::Object(map) => Some(Headers::Pairs(
                map.iter().map(|(k, v)| (k.clone(), text_of(v))).collect(),
            )),
            other => Some(Headers::Raw(text_of(other))),
        }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        match self {
            Headers::Pairs(p) => p,
            Headers::Raw(_) => &[],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestInfo {
    pub method: String,
    pub url: String,
    pub headers: Option<Headers>,
    pub post_data: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseContent {
    #[serde(default, deserialize_with = "opt_string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub mime_type: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub encoding: Option<String>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub size: Option<f64>,
}

impl ResponseContent {
    /// base64 编码的正文是二进制数据，永远不解码展示。
    pub fn is_binary(&self) -> bool {
        self.encoding.as_deref() == Some("base64")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseInfo {
    /// 0 视为缺失
    pub status: Option<i64>,
    pub headers: Option<Headers>,
    pub content: ResponseContent,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectStep {
    #[serde(default, deserialize_with = "opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub url: Option<String>,
}

/// 归一化后的一条网络请求
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkEntry {
    pub relative_ms: i64,
    pub request: RequestInfo,
    pub response: ResponseInfo,
    /// 保持采集时的键顺序
    pub timings: Vec<(String, Option<f64>)>,
    pub initiator: Option<Initiator>,
    pub redirect_chain: Vec<RedirectStep>,
    pub resource_type: Option<String>,
    pub error: Option<String>,
    pub encoded_data_length: Option<f64>,
}

impl Timed for NetworkEntry {
    fn relative_ms(&self) -> i64 {
        self.relative_ms
    }
}

impl NetworkEntry {
    /// 展示用大小：`content.size` 优先，其次 `encodedDataLength`。
    pub fn display_size(&self) -> Option<f64> {
        self.response
            .content
            .size
            .filter(|s| *s != 0.0)
            .or(self.encoded_data_length)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawRequest {
    #[serde(default, deserialize_with = "opt_string")]
    method: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    url: Option<String>,
    #[serde(default)]
    headers: Option<Value>,
    #[serde(default)]
    post_data: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawResponse {
    #[serde(default, deserialize_with = "opt_f64")]
    status: Option<f64>,
    #[serde(default)]
    headers: Option<Value>,
    #[serde(default, deserialize_with = "opt_object")]
    content: Option<ResponseContent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawNetworkRecord {
    #[serde(default, deserialize_with = "opt_f64")]
    pub wall_time: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub timestamp: Option<f64>,
    #[serde(default, deserialize_with = "opt_object")]
    request: Option<RawRequest>,
    #[serde(default, deserialize_with = "opt_object")]
    response: Option<RawResponse>,
    #[serde(default)]
    timings: Option<Value>,
    #[serde(default, deserialize_with = "opt_object")]
    initiator: Option<Initiator>,
    #[serde(default, deserialize_with = "objects")]
    redirect_chain: Vec<RedirectStep>,
    #[serde(default, deserialize_with = "opt_string")]
    resource_type: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    error: Option<String>,
    #[serde(default, deserialize_with = "opt_f64")]
    encoded_data_length: Option<f64>,

    // 扁平形状的回退字段
    #[serde(default, deserialize_with = "opt_string")]
    method: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    url: Option<String>,
    #[serde(default, deserialize_with = "opt_f64")]
    status: Option<f64>,
    #[serde(default)]
    request_headers: Option<Value>,
    #[serde(default)]
    response_headers: Option<Value>,
    #[serde(default)]
    post_data: Option<Value>,
}

fn post_data_text(v: Option<&Value>) -> Option<String> {
    let text = match v? {
        Value::Object(map) => map.get("text").and_then(scalar_to_string),
        other => scalar_to_string(other),
    };
    text.filter(|s| !s.is_empty())
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

impl NetworkEntry {
    pub(crate) fn from_raw(raw: RawNetworkRecord, relative_ms: i64) -> NetworkEntry {
        let req = raw.request.unwrap_or_default();
        let resp = raw.response.unwrap_or_default();

        let request = RequestInfo {
            method: non_empty(req.method)
                .or(non_empty(raw.method))
                .unwrap_or_else(|| "GET".to_string()),
            url: non_empty(req.url).or(raw.url).unwrap_or_default(),
            headers: Headers::from_value(req.headers.as_ref())
                .or_else(|| Headers::from_value(raw.request_headers.as_ref())),
            post_data: post_data_text(req.post_data.as_ref())
                .or_else(|| post_data_text(raw.post_data.as_ref())),
        };

        let status = resp
            .status
            .or(raw.status)
            .map(|s| s as i64)
            .filter(|s| *s != 0);
        let response = ResponseInfo {
            status,
            headers: Headers::from_value(resp.headers.as_ref())
                .or_else(|| Headers::from_value(raw.response_headers.as_ref())),
            content: resp.content.unwrap_or_default(),
        };

        let timings = match raw.timings {
            Some(Value::Object(map)) => map
                .into_iter()
                .map(|(k, v)| {
                    let ms = value_to_f64(&v);
                    (k, ms)
                })
                .collect(),
            _ => Vec::new(),
        };

        NetworkEntry {
            relative_ms,
            request,
            response,
            timings,
            initiator: raw.initiator,
            redirect_chain: raw.redirect_chain,
            resource_type: non_empty(raw.resource_type),
            error: non_empty(raw.error),
            encoded_data_length: raw.encoded_data_length,
        }
    }
}
