//! HAR capture adapter
//!
//! Every recorded request except static assets becomes either a template
//! (observed values as the only valid values) or a collection request.

use super::{Converter, TemplateFile, is_static_resource};
use crate::error::Result;
use crate::models::har::{HarFile, HarNameValue, HarRequest};
use crate::models::postman::{
    PostmanAuth, PostmanBody, PostmanCollection, PostmanEvent, PostmanInfo, PostmanItem,
    PostmanKeyValue, PostmanRequest, PostmanRequestItem, PostmanUrl, path_segments,
};
use crate::models::{BodyMode, BodySpec, HttpMethod, ParameterSpec, TemplateDocument, ValuePools};
use indexmap::IndexMap;
use serde_json::Value;
use url::Url;

#[derive(Debug, Clone, Default)]
pub struct HarConverter;

impl HarConverter {
    pub fn new() -> Self {
        Self
    }

    /// Requests worth converting, paired with their parsed URL
    fn api_requests<'a>(har: &'a HarFile) -> impl Iterator<Item = (&'a HarRequest, Url)> + 'a {
        har.log.entries.iter().filter_map(|entry| {
            let request = &entry.request;
            let url = match Url::parse(&request.url) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("skipping entry with invalid url {}: {}", request.url, e);
                    return None;
                }
            };
            if is_static_resource(url.path()) {
                tracing::debug!("skipping static resource {}", url.path());
                return None;
            }
            Some((request, url))
        })
    }

    fn template_for(request: &HarRequest) -> TemplateDocument {
        let mut template = TemplateDocument {
            method: Some(request.method.clone()),
            headers: string_map(&request.headers),
            ..Default::default()
        };

        match HttpMethod::parse(&request.method) {
            Some(HttpMethod::Get) => {
                template.params = Some(
                    request
                        .query_string
                        .iter()
                        .map(|q| (q.name.clone(), ValuePools::observed(Value::String(q.value.clone()))))
                        .collect(),
                );
            }
            Some(HttpMethod::Post) => {
                template.query = Some(string_map(&request.query_string));
                // a body that is not a JSON object is dropped, leaving no `body`
                template.body = match &request.post_data {
                    Some(post) => {
                        let mode = body_mode(&post.mime_type);
                        body_fields(mode, &post.text).map(|fields| BodySpec {
                            mode: Some(mode),
                            data: fields
                                .into_iter()
                                .map(|(k, v)| (k, ValuePools::observed(v)))
                                .collect(),
                        })
                    }
                    None => Some(BodySpec {
                        mode: Some(BodyMode::None),
                        data: ParameterSpec::new(),
                    }),
                };
            }
            None => {}
        }

        template
    }

    fn collection_item(request: &HarRequest, url: &Url) -> PostmanRequestItem {
        let body = match HttpMethod::parse(&request.method) {
            Some(HttpMethod::Post) => Some(PostmanBody::raw(
                request
                    .post_data
                    .as_ref()
                    .map(|post| post.text.clone())
                    .unwrap_or_default(),
            )),
            _ => None,
        };

        PostmanRequestItem {
            name: request.url.clone(),
            event: vec![PostmanEvent::empty("test")],
            request: PostmanRequest {
                auth: PostmanAuth::noauth(),
                method: request.method.clone(),
                header: key_values(&request.headers),
                url: PostmanUrl {
                    raw: request.url.clone(),
                    host: url.host_str().map(str::to_string),
                    port: url.port(),
                    protocol: Some(url.scheme().to_string()),
                    path: path_segments(url.path()),
                    query: Some(key_values(&request.query_string)),
                },
                body,
            },
            response: Vec::new(),
        }
    }
}

impl Converter for HarConverter {
    type Source = HarFile;

    fn convert_templates(&self, har: &HarFile) -> Result<Vec<TemplateFile>> {
        Ok(Self::api_requests(har)
            .map(|(request, url)| TemplateFile {
                uri: url.path().to_string(),
                document: Self::template_for(request),
            })
            .collect())
    }

    fn convert_collection(&self, har: &HarFile, name: &str) -> Result<PostmanCollection> {
        Ok(PostmanCollection {
            info: PostmanInfo::new(name),
            item: Self::api_requests(har)
                .map(|(request, url)| PostmanItem::Request(Self::collection_item(request, &url)))
                .collect(),
            event: super::postman::default_events(),
        })
    }
}

/// Template body mode for a HAR `postData.mimeType`
pub fn body_mode(mime_type: &str) -> BodyMode {
    let mime_type = mime_type.to_ascii_lowercase();
    if mime_type.starts_with("text/plain") {
        BodyMode::Raw
    } else if mime_type.starts_with("application/x-www-form-urlencoded") {
        BodyMode::Urlencoded
    } else {
        BodyMode::Formdata
    }
}

/// Fields of a recorded body; `None` when the text is not a JSON object
/// (or, for url-encoded bodies, always the decoded pairs)
fn body_fields(mode: BodyMode, text: &str) -> Option<IndexMap<String, Value>> {
    if mode == BodyMode::Urlencoded {
        return Some(
            url::form_urlencoded::parse(text.as_bytes())
                .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
                .collect(),
        );
    }

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map.into_iter().collect()),
        _ => {
            tracing::debug!("dropping body that is not a JSON object");
            None
        }
    }
}

fn string_map(pairs: &[HarNameValue]) -> IndexMap<String, Value> {
    pairs
        .iter()
        .map(|p| (p.name.clone(), Value::String(p.value.clone())))
        .collect()
}

fn key_values(pairs: &[HarNameValue]) -> Vec<PostmanKeyValue> {
    pairs
        .iter()
        .map(|p| PostmanKeyValue::new(&p.name, &p.value))
        .collect()
}
