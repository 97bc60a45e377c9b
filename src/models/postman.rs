//! Postman Collection v2.1 output model
//!
//! Only the subset of the format this tool emits is modelled.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const COLLECTION_SCHEMA: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

pub const SCRIPT_TYPE: &str = "text/javascript";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanCollection {
    pub info: PostmanInfo,
    pub item: Vec<PostmanItem>,
    pub event: Vec<PostmanEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanInfo {
    pub name: String,
    pub schema: String,
}

impl PostmanInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: COLLECTION_SCHEMA.to_string(),
        }
    }
}

/// Top-level entry: either a folder of requests or a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostmanItem {
    Folder(PostmanFolder),
    Request(PostmanRequestItem),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanFolder {
    pub name: String,
    pub item: Vec<PostmanRequestItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanRequestItem {
    pub name: String,
    pub event: Vec<PostmanEvent>,
    pub request: PostmanRequest,
    pub response: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanEvent {
    pub listen: String,
    pub script: PostmanScript,
}

impl PostmanEvent {
    pub fn new(listen: impl Into<String>, exec: Vec<String>) -> Self {
        Self {
            listen: listen.into(),
            script: PostmanScript {
                script_type: SCRIPT_TYPE.to_string(),
                exec,
            },
        }
    }

    /// Event with a single empty script line
    pub fn empty(listen: impl Into<String>) -> Self {
        Self::new(listen, vec![String::new()])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanScript {
    #[serde(rename = "type")]
    pub script_type: String,
    pub exec: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanRequest {
    pub auth: PostmanAuth,
    pub method: String,
    pub header: Vec<PostmanKeyValue>,
    pub url: PostmanUrl,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<PostmanBody>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanAuth {
    #[serde(rename = "type")]
    pub auth_type: String,
}

impl PostmanAuth {
    pub fn noauth() -> Self {
        Self {
            auth_type: "noauth".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanKeyValue {
    pub key: String,
    pub value: String,
}

impl PostmanKeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanUrl {
    pub raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default)]
    pub path: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Vec<PostmanKeyValue>>,
}

/// Non-empty `/` segments of a path
pub fn path_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanBody {
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formdata: Option<Vec<PostmanFormParam>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urlencoded: Option<Vec<PostmanUrlEncodedParam>>,
}

impl PostmanBody {
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            mode: "raw".to_string(),
            raw: Some(text.into()),
            formdata: None,
            urlencoded: None,
        }
    }
}

/// Form-data field: `text` fields carry `value`, `file` fields carry `src`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanFormParam {
    pub key: String,
    #[serde(rename = "type")]
    pub param_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

impl PostmanFormParam {
    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            param_type: "text".to_string(),
            value: Some(value.into()),
            src: None,
        }
    }

    pub fn file(key: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            param_type: "file".to_string(),
            value: None,
            src: Some(src.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostmanUrlEncodedParam {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub param_type: String,
}
