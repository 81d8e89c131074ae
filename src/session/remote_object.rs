//! 运行时值引用（RemoteObject）
//!
//! 采集协议把控制台参数序列化为带类型标签的引用，对象类型额外带一份
//! 有界的属性预览。所有字段都可能缺失。

use serde::Deserialize;
use serde_json::Value;

use super::lenient::{flag, objects, opt_object, opt_string};

/// 一个被序列化的运行时值。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteObject {
    #[serde(rename = "type", default, deserialize_with = "opt_string")]
    pub type_tag: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub subtype: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub class_name: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default, deserialize_with = "opt_string")]
    pub unserializable_value: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "opt_object")]
    pub preview: Option<ObjectPreview>,
}

/// 对象属性的有界快照。`overflow` 表示还有未采集的属性。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectPreview {
    #[serde(rename = "type", default, deserialize_with = "opt_string")]
    pub type_tag: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub subtype: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub overflow: bool,
    #[serde(default, deserialize_with = "objects")]
    pub properties: Vec<PropertyPreview>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPreview {
    #[serde(default, deserialize_with = "opt_string")]
    pub name: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "opt_string")]
    pub type_tag: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub subtype: Option<String>,
    /// 预览里的值总是字符串化的。
    #[serde(default, deserialize_with = "opt_string")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "opt_object")]
    pub value_preview: Option<ObjectPreview>,
}

/// 类型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteType<'a> {
    Undefined,
    Boolean,
    Number,
    Bigint,
    String,
    Symbol,
    Function,
    Object,
    /// 未识别的标签（含缺失）
    Unknown(&'a str),
}

impl<'a> RemoteType<'a> {
    pub fn parse(tag: Option<&'a str>) -> Self {
        match tag.unwrap_or("") {
            "undefined" => Self::Undefined,
            "boolean" => Self::Boolean,
            "number" => Self::Number,
            "bigint" => Self::Bigint,
            "string" => Self::String,
            "symbol" => Self::Symbol,
            "function" => Self::Function,
            "object" => Self::Object,
            other => Self::Unknown(other),
        }
    }
}

impl RemoteObject {
    pub fn remote_type(&self) -> RemoteType<'_> {
        RemoteType::parse(self.type_tag.as_deref())
    }

    pub fn is_subtype(&self, subtype: &str) -> bool {
        self.subtype.as_deref() == Some(subtype)
    }

    /// 从原始参数构造；非对象参数（如 `null`）视为缺失。
    pub fn from_arg(v: Value) -> Option<RemoteObject> {
        super::lenient::object(v)
    }
}

impl ObjectPreview {
    pub fn is_array(&self) -> bool {
        self.subtype.as_deref() == Some("array")
    }
}

impl PropertyPreview {
    pub fn remote_type(&self) -> RemoteType<'_> {
        RemoteType::parse(self.type_tag.as_deref())
    }
}
