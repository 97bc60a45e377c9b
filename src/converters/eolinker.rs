//! eolinker export adapter

use super::{Converter, TemplateFile};
use crate::error::Result;
use crate::models::eolinker::{ExportEntry, ParamInfo};
use crate::models::postman::{
    PostmanAuth, PostmanBody, PostmanCollection, PostmanEvent, PostmanInfo, PostmanItem,
    PostmanKeyValue, PostmanRequest, PostmanRequestItem, PostmanUrl, path_segments,
};
use crate::models::request::value_text;
use crate::models::{BodyMode, BodySpec, HttpMethod, ParameterSpec, TemplateDocument, ValuePools};
use indexmap::IndexMap;
use serde_json::Value;
use url::Url;

/// Host variable used for every exported request
pub const EXPORT_HOST: &str = "{{eolinker_host}}";

#[derive(Debug, Clone, Default)]
pub struct ExportConverter;

impl ExportConverter {
    pub fn new() -> Self {
        Self
    }

    fn template_for(entry: &ExportEntry) -> TemplateDocument {
        let method = entry.method();
        let mut template = TemplateDocument {
            method: Some(method.to_string()),
            headers: entry
                .header_info
                .iter()
                .map(|h| (h.header_name.clone(), Value::String(h.header_value.clone())))
                .collect(),
            ..Default::default()
        };

        match method {
            HttpMethod::Get => {
                // url parameters win over request parameters with the same key
                template.params = Some(
                    observed_spec(&entry.request_info)
                        .into_iter()
                        .chain(observed_spec(&entry.url_param))
                        .collect(),
                );
            }
            HttpMethod::Post => {
                let mode = if entry.base_info.api_request_param_type == 0 {
                    BodyMode::Formdata
                } else {
                    BodyMode::Raw
                };
                template.query = Some(param_map(&entry.url_param));
                template.body = Some(BodySpec {
                    mode: Some(mode),
                    data: observed_spec(&entry.request_info),
                });
            }
        }

        template
    }

    fn collection_item(entry: &ExportEntry) -> Result<PostmanRequestItem> {
        let api_uri = &entry.base_info.api_uri;
        let parsed = Url::parse(api_uri).ok();
        let method = entry.method();

        let body = match method {
            HttpMethod::Post => Some(PostmanBody::raw(serde_json::to_string(&param_map(
                &entry.request_info,
            ))?)),
            HttpMethod::Get => None,
        };

        Ok(PostmanRequestItem {
            name: api_uri.clone(),
            event: vec![PostmanEvent::empty("test")],
            request: PostmanRequest {
                auth: PostmanAuth::noauth(),
                method: method.to_string(),
                header: entry
                    .header_info
                    .iter()
                    .map(|h| PostmanKeyValue::new(&h.header_name, &h.header_value))
                    .collect(),
                url: PostmanUrl {
                    raw: api_uri.clone(),
                    host: Some(EXPORT_HOST.to_string()),
                    port: parsed.as_ref().and_then(Url::port),
                    protocol: parsed.as_ref().map(|url| url.scheme().to_string()),
                    path: path_segments(&request_path(api_uri)),
                    query: Some(
                        entry
                            .url_param
                            .iter()
                            .map(|p| PostmanKeyValue::new(&p.param_key, value_text(&p.param_value)))
                            .collect(),
                    ),
                },
                body,
            },
            response: Vec::new(),
        })
    }
}

impl Converter for ExportConverter {
    type Source = Vec<ExportEntry>;

    /// Only active APIs become templates
    fn convert_templates(&self, entries: &Vec<ExportEntry>) -> Result<Vec<TemplateFile>> {
        Ok(entries
            .iter()
            .filter(|entry| {
                let active = entry.is_active();
                if !active {
                    tracing::debug!("skipping inactive api {}", entry.base_info.api_uri);
                }
                active
            })
            .map(|entry| TemplateFile {
                uri: request_path(&entry.base_info.api_uri),
                document: Self::template_for(entry),
            })
            .collect())
    }

    fn convert_collection(&self, entries: &Vec<ExportEntry>, name: &str) -> Result<PostmanCollection> {
        Ok(PostmanCollection {
            info: PostmanInfo::new(name),
            item: entries
                .iter()
                .map(|entry| Self::collection_item(entry).map(PostmanItem::Request))
                .collect::<Result<_>>()?,
            event: super::postman::default_events(),
        })
    }
}

/// Request path of an exported API URI
///
/// Absolute URLs contribute their path; a `{{host}}`-style variable prefix
/// is dropped; query and fragment are removed and a leading `/` enforced.
pub fn request_path(api_uri: &str) -> String {
    let path = match Url::parse(api_uri) {
        Ok(url) if url.has_host() => url.path().to_string(),
        _ => api_uri
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    let path = match path.rfind("}}") {
        Some(end) if path.contains("{{") => path[end + 2..].to_string(),
        _ => path,
    };

    if path.starts_with('/') {
        path
    } else {
        format!("/{}", path)
    }
}

fn observed_spec(params: &[ParamInfo]) -> ParameterSpec {
    params
        .iter()
        .map(|p| (p.param_key.clone(), ValuePools::observed(p.param_value.clone())))
        .collect()
}

fn param_map(params: &[ParamInfo]) -> IndexMap<String, Value> {
    params
        .iter()
        .map(|p| (p.param_key.clone(), p.param_value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entries() -> Vec<ExportEntry> {
        serde_json::from_value(json!([
            {
                "baseInfo": {"apiRequestType": 1, "apiStatus": 0, "apiURI": "{{host}}/user/info"},
                "headerInfo": [{"headerName": "token", "headerValue": "abc"}],
                "requestInfo": [{"paramKey": "id", "paramValue": "1"}],
                "urlParam": [{"paramKey": "id", "paramValue": "2"}, {"paramKey": "v", "paramValue": "3"}]
            },
            {
                "baseInfo": {"apiRequestType": 0, "apiRequestParamType": 1, "apiStatus": 0,
                             "apiURI": "http://api.test:8080/user/login?x=1"},
                "requestInfo": [{"paramKey": "name", "paramValue": "bob"}],
                "urlParam": [{"paramKey": "v", "paramValue": "2"}]
            },
            {
                "baseInfo": {"apiRequestType": 0, "apiStatus": 1, "apiURI": "user/old"}
            }
        ]))
        .unwrap()
    }

    #[test]
    fn test_request_path() {
        assert_eq!(request_path("{{host}}/user/info"), "/user/info");
        assert_eq!(request_path("http://api.test/a/b?x=1"), "/a/b");
        assert_eq!(request_path("user/old"), "/user/old");
        assert_eq!(request_path("/a?b=1#c"), "/a");
    }

    #[test]
    fn test_templates_only_active() {
        let files = ExportConverter::new().convert_templates(&entries()).unwrap();
        let uris: Vec<&str> = files.iter().map(|f| f.uri.as_str()).collect();
        assert_eq!(uris, vec!["/user/info", "/user/login"]);
    }

    #[test]
    fn test_get_template_merges_params() {
        let files = ExportConverter::new().convert_templates(&entries()).unwrap();
        let doc = &files[0].document;

        assert_eq!(doc.method.as_deref(), Some("GET"));
        assert_eq!(doc.headers["token"], json!("abc"));
        let params = doc.params.as_ref().unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params["id"].valid, vec![json!("2")]);
    }

    #[test]
    fn test_post_template() {
        let files = ExportConverter::new().convert_templates(&entries()).unwrap();
        let doc = &files[1].document;

        assert_eq!(doc.method.as_deref(), Some("POST"));
        assert_eq!(doc.query.as_ref().unwrap()["v"], json!("2"));
        let body = doc.body.as_ref().unwrap();
        assert_eq!(body.mode, Some(BodyMode::Raw));
        assert_eq!(body.data["name"].valid, vec![json!("bob")]);
    }

    #[test]
    fn test_collection_includes_every_entry() {
        let collection = ExportConverter::new()
            .convert_collection(&entries(), "api_eolinker_to_postman")
            .unwrap();
        assert_eq!(collection.item.len(), 3);

        let PostmanItem::Request(post) = &collection.item[1] else {
            panic!("expected a request item");
        };
        assert_eq!(post.request.method, "POST");
        assert_eq!(post.request.url.host.as_deref(), Some(EXPORT_HOST));
        assert_eq!(post.request.url.port, Some(8080));
        assert_eq!(post.request.url.path, vec!["user", "login"]);
        assert_eq!(
            post.request.body.as_ref().unwrap().raw.as_deref(),
            Some(r#"{"name":"bob"}"#)
        );
    }
}
