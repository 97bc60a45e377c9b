//! Postman collection emitter
//!
//! Renders synthesized case groups into a Postman v2.1 collection: one
//! folder per group, one request per case, and a `test` script asserting
//! the response envelope's `code` field.

use crate::error::Result;
use crate::models::postman::{
    PostmanAuth, PostmanBody, PostmanCollection, PostmanEvent, PostmanFolder, PostmanFormParam,
    PostmanInfo, PostmanItem, PostmanKeyValue, PostmanRequest, PostmanRequestItem, PostmanScript,
    PostmanUrl, PostmanUrlEncodedParam, path_segments,
};
use crate::models::request::{FILES_KEY, join_pairs, value_text};
use crate::models::{BodyContent, CaseGroups, ParameterRow, RequestBody, RequestCase, RequestPre};
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub struct CollectionEmitter {
    name: String,
}

impl CollectionEmitter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn build(&self, groups: CaseGroups) -> PostmanCollection {
        let event = collection_events(groups.prerequest);

        let item = groups
            .groups
            .into_iter()
            .map(|(name, cases)| {
                PostmanItem::Folder(PostmanFolder {
                    name,
                    item: cases.iter().map(request_item).collect(),
                })
            })
            .collect();

        PostmanCollection {
            info: PostmanInfo::new(&self.name),
            item,
            event,
        }
    }

    /// Build the collection and write it under `target`
    pub fn emit(&self, groups: CaseGroups, target: &Path) -> Result<PathBuf> {
        write_collection(&self.build(groups), &self.name, target)
    }
}

/// Collection-level events; both hooks default to an empty script
pub fn collection_events(prerequest: Option<Vec<RequestPre>>) -> Vec<PostmanEvent> {
    match prerequest {
        Some(scripts) => scripts
            .into_iter()
            .map(|pre| PostmanEvent {
                listen: pre.event,
                script: PostmanScript {
                    script_type: pre.script.script_type,
                    exec: pre.script.lines,
                },
            })
            .collect(),
        None => default_events(),
    }
}

pub fn default_events() -> Vec<PostmanEvent> {
    vec![PostmanEvent::empty("prerequest"), PostmanEvent::empty("test")]
}

fn request_item(case: &RequestCase) -> PostmanRequestItem {
    PostmanRequestItem {
        name: case.name.clone(),
        event: vec![result_code_event(case.expect_result)],
        request: request_for(case),
        response: Vec::new(),
    }
}

/// `test` script asserting the response `code` is 1 for valid cases, 0 otherwise
pub fn result_code_event(expect_result: bool) -> PostmanEvent {
    let code = if expect_result { 1 } else { 0 };
    PostmanEvent::new(
        "test",
        vec![
            format!("pm.test(\"response code is {}\", function () {{", code),
            "    var jsonData = pm.response.json();".to_string(),
            format!("    pm.expect(jsonData.code).to.eql({});", code),
            "});".to_string(),
        ],
    )
}

pub fn request_for(case: &RequestCase) -> PostmanRequest {
    let raw = match &case.query {
        Some(query) => format!("{}{}?{}", case.host, case.uri, join_pairs(query)),
        None => format!("{}{}", case.host, case.uri),
    };

    // query entries first, then params; never merged
    let query = match (&case.query, &case.params) {
        (None, None) => None,
        (query, params) => Some(
            query
                .iter()
                .chain(params.iter())
                .flat_map(key_values)
                .collect(),
        ),
    };

    PostmanRequest {
        auth: PostmanAuth::noauth(),
        method: case.method.to_string(),
        header: key_values(&case.headers),
        url: PostmanUrl {
            raw,
            host: Some(case.host.clone()),
            port: None,
            protocol: None,
            path: path_segments(&case.uri),
            query,
        },
        body: case.body.as_ref().and_then(body_for),
    }
}

fn key_values(map: &IndexMap<String, Value>) -> Vec<PostmanKeyValue> {
    map.iter()
        .map(|(k, v)| PostmanKeyValue::new(k, value_text(v)))
        .collect()
}

/// Postman body for `body`; `None` when the body has no content
pub fn body_for(body: &RequestBody) -> Option<PostmanBody> {
    let mode = body.mode().as_str().to_string();
    match (body, body.content()) {
        (_, BodyContent::Empty) => None,
        (RequestBody::UrlEncoded(_), BodyContent::Text(text)) => Some(PostmanBody {
            mode,
            raw: None,
            formdata: None,
            urlencoded: Some(split_urlencoded(&text)),
        }),
        (_, BodyContent::Text(text)) => Some(PostmanBody::raw(text)),
        (_, BodyContent::Fields(fields)) => Some(PostmanBody {
            mode,
            raw: None,
            formdata: Some(form_data_params(fields)),
            urlencoded: None,
        }),
    }
}

/// File entries from the `files` sub-mapping first, then one text entry per field
pub fn form_data_params(fields: &ParameterRow) -> Vec<PostmanFormParam> {
    let files = match fields.get(FILES_KEY) {
        Some(Value::Object(files)) => Some(files),
        _ => None,
    };

    let mut params: Vec<PostmanFormParam> = files
        .into_iter()
        .flatten()
        .map(|(key, src)| PostmanFormParam::file(key, value_text(src)))
        .collect();

    params.extend(
        fields
            .iter()
            .filter(|(key, _)| !(files.is_some() && key.as_str() == FILES_KEY))
            .map(|(key, value)| PostmanFormParam::text(key, value_text(value))),
    );
    params
}

/// Split `a=1&b` into key/value entries; a pair without `=` gets an empty value
pub fn split_urlencoded(text: &str) -> Vec<PostmanUrlEncodedParam> {
    text.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            PostmanUrlEncodedParam {
                key: key.to_string(),
                value: value.to_string(),
                param_type: "text".to_string(),
            }
        })
        .collect()
}

/// Where a collection named `stem` lands for the requested `target`
///
/// An existing directory receives `{stem}.json`; any other target is used as
/// the file path, with `.json` appended when missing.
pub fn resolve_output_path(stem: &str, target: &Path) -> PathBuf {
    if target.is_dir() {
        return target.join(format!("{}.json", stem));
    }
    if target.extension().and_then(|e| e.to_str()) == Some("json") {
        return target.to_path_buf();
    }
    let mut path = target.as_os_str().to_owned();
    path.push(".json");
    PathBuf::from(path)
}

/// Serialize `collection` and overwrite the resolved output file
pub fn write_collection(
    collection: &PostmanCollection,
    stem: &str,
    target: &Path,
) -> Result<PathBuf> {
    let path = resolve_output_path(stem, target);
    fs::write(&path, serde_json::to_string_pretty(collection)?)?;
    tracing::info!("wrote collection {}", path.display());
    Ok(path)
}
