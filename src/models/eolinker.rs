//! eolinker API export input model

use super::request::HttpMethod;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEntry {
    pub base_info: BaseInfo,
    #[serde(default)]
    pub header_info: Vec<HeaderInfo>,
    #[serde(default)]
    pub request_info: Vec<ParamInfo>,
    #[serde(default)]
    pub url_param: Vec<ParamInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseInfo {
    /// 0 is POST, anything else GET
    #[serde(default)]
    pub api_request_type: i64,
    /// 0 is form data, anything else raw
    #[serde(default)]
    pub api_request_param_type: i64,
    /// 0 marks an active (non-archived) API
    #[serde(default)]
    pub api_status: i64,
    #[serde(rename = "apiURI")]
    pub api_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderInfo {
    pub header_name: String,
    #[serde(default)]
    pub header_value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamInfo {
    pub param_key: String,
    #[serde(default)]
    pub param_value: Value,
}

impl ExportEntry {
    pub fn method(&self) -> HttpMethod {
        if self.base_info.api_request_type == 0 {
            HttpMethod::Post
        } else {
            HttpMethod::Get
        }
    }

    pub fn is_active(&self) -> bool {
        self.base_info.api_status == 0
    }
}
