//! Resolved request cases and collection-level lifecycle scripts

use super::template::{BodyMode, ParameterRow};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Key of the form-data field whose value maps field names to file paths
pub const FILES_KEY: &str = "files";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    /// Case-insensitive lookup; only GET and POST are synthesized
    pub fn parse(method: &str) -> Option<Self> {
        match method.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a synthesized request, one variant per encoding
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    None,
    FormData(ParameterRow),
    UrlEncoded(ParameterRow),
    Raw(Value),
}

/// Wire-ready content of a [`RequestBody`]
#[derive(Debug, Clone, PartialEq)]
pub enum BodyContent<'a> {
    Empty,
    /// Form fields as declared, including the `files` sub-mapping
    Fields(&'a ParameterRow),
    Text(String),
}

impl RequestBody {
    pub fn from_row(mode: BodyMode, row: ParameterRow) -> Self {
        match mode {
            BodyMode::None => RequestBody::None,
            BodyMode::Formdata => RequestBody::FormData(row),
            BodyMode::Urlencoded => RequestBody::UrlEncoded(row),
            BodyMode::Raw => RequestBody::Raw(Value::Object(row.into_iter().collect())),
        }
    }

    pub fn mode(&self) -> BodyMode {
        match self {
            RequestBody::None => BodyMode::None,
            RequestBody::FormData(_) => BodyMode::Formdata,
            RequestBody::UrlEncoded(_) => BodyMode::Urlencoded,
            RequestBody::Raw(_) => BodyMode::Raw,
        }
    }

    pub fn content(&self) -> BodyContent<'_> {
        match self {
            RequestBody::None => BodyContent::Empty,
            RequestBody::FormData(fields) => BodyContent::Fields(fields),
            RequestBody::UrlEncoded(fields) => BodyContent::Text(join_pairs(fields)),
            // compact serde_json text (`{"a":1}`), without a space after `:` or `,`
            RequestBody::Raw(data) => BodyContent::Text(data.to_string()),
        }
    }
}

/// A fully resolved request ready for emission
#[derive(Debug, Clone, PartialEq)]
pub struct RequestCase {
    pub name: String,
    pub host: String,
    pub uri: String,
    pub method: HttpMethod,
    pub headers: IndexMap<String, Value>,
    pub query: Option<IndexMap<String, Value>>,
    pub params: Option<ParameterRow>,
    pub body: Option<RequestBody>,
    /// `true` when the request is expected to succeed
    pub expect_result: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventScript {
    #[serde(rename = "type", default)]
    pub script_type: String,

    #[serde(rename = "exec", default)]
    pub lines: Vec<String>,
}

/// Collection-level lifecycle hook (`prerequest` or `test`)
#[derive(Debug, Clone, PartialEq)]
pub struct RequestPre {
    pub event: String,
    pub script: EventScript,
}

/// Synthesized cases of one conversion run
#[derive(Debug, Clone, Default)]
pub struct CaseGroups {
    /// Scripts loaded from the reserved `prerequest` file
    pub prerequest: Option<Vec<RequestPre>>,

    /// Group key (`{uri}@{content hash}`) to cases, in load order
    pub groups: IndexMap<String, Vec<RequestCase>>,
}

impl CaseGroups {
    pub fn case_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Render a JSON value the way it appears in a query string or form field
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `k=v` pairs joined with `&`, in map order
pub fn join_pairs(fields: &IndexMap<String, Value>) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, value_text(v)))
        .collect::<Vec<_>>()
        .join("&")
}
