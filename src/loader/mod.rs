pub mod foreign;
pub mod templates;

pub use foreign::{load_export, load_har};
pub use templates::{PREREQUEST_STEM, content_hash, load_case_groups, parse_event_data, template_uri};

use crate::error::{ApiCaseError, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Read and deserialize a JSON file, failing fast on a missing or wrong-kind path
pub fn load_json_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ApiCaseError::InputNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(ApiCaseError::InputNotAFile(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| ApiCaseError::ParseError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
