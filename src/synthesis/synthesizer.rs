//! Case synthesizer
//!
//! Turns one [`TemplateDocument`] into the ordered list of [`RequestCase`]s
//! it describes. GET templates are expanded over `params`, POST templates
//! over `body.data`; valid cases always precede invalid ones.

use super::clock::{Clock, SystemClock};
use super::combinator::combine;
use crate::error::{ApiCaseError, Result};
use crate::models::{
    HttpMethod, ParameterRow, Polarity, RequestBody, RequestCase, TemplateDocument,
};
use rand::Rng;
use rand::rngs::ThreadRng;

/// Timestamp suffix of synthesized case names, second granularity
pub const NAME_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

pub struct CaseSynthesizer<R = ThreadRng, C = SystemClock> {
    host: String,
    rng: R,
    clock: C,
}

impl CaseSynthesizer {
    /// Synthesizer backed by the thread RNG and the system clock
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_sources(host, rand::rng(), SystemClock)
    }
}

impl<R: Rng, C: Clock> CaseSynthesizer<R, C> {
    pub fn with_sources(host: impl Into<String>, rng: R, clock: C) -> Self {
        Self {
            host: host.into(),
            rng,
            clock,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Synthesize every case described by `template`
    ///
    /// `name` and `uri` are used unless the template declares its own.
    pub fn synthesize(
        &mut self,
        name: &str,
        uri: &str,
        template: &TemplateDocument,
    ) -> Result<Vec<RequestCase>> {
        let method = template
            .method
            .as_deref()
            .ok_or_else(|| ApiCaseError::malformed(name, "missing method"))?;

        match HttpMethod::parse(method) {
            Some(HttpMethod::Get) => self.synthesize_get(name, uri, template),
            Some(HttpMethod::Post) => self.synthesize_post(name, uri, template),
            None => Err(ApiCaseError::malformed(
                name,
                format!("unsupported method {}", method),
            )),
        }
    }

    fn synthesize_get(
        &mut self,
        name: &str,
        uri: &str,
        template: &TemplateDocument,
    ) -> Result<Vec<RequestCase>> {
        let params = template
            .params
            .as_ref()
            .ok_or_else(|| ApiCaseError::malformed(name, "missing params for GET"))?;

        // Nothing to vary: a single always-valid request
        if params.is_empty() {
            return Ok(vec![RequestCase {
                params: Some(ParameterRow::new()),
                ..self.base_case(name, uri, template, HttpMethod::Get, Polarity::Valid)
            }]);
        }

        let mut cases = Vec::new();
        for polarity in Polarity::ALL {
            for row in combine(params, polarity, &mut self.rng) {
                cases.push(RequestCase {
                    params: Some(row),
                    ..self.base_case(name, uri, template, HttpMethod::Get, polarity)
                });
            }
        }
        Ok(cases)
    }

    fn synthesize_post(
        &mut self,
        name: &str,
        uri: &str,
        template: &TemplateDocument,
    ) -> Result<Vec<RequestCase>> {
        let body = template
            .body
            .as_ref()
            .ok_or_else(|| ApiCaseError::malformed(name, "missing body for POST"))?;
        let mode = body
            .mode
            .ok_or_else(|| ApiCaseError::malformed(name, "missing body mode"))?;

        let mut cases = Vec::new();
        for polarity in Polarity::ALL {
            for row in combine(&body.data, polarity, &mut self.rng) {
                cases.push(RequestCase {
                    body: Some(RequestBody::from_row(mode, row)),
                    ..self.base_case(name, uri, template, HttpMethod::Post, polarity)
                });
            }
        }
        Ok(cases)
    }

    /// Case carrying the template's static fields, without params or body
    fn base_case(
        &self,
        name: &str,
        uri: &str,
        template: &TemplateDocument,
        method: HttpMethod,
        polarity: Polarity,
    ) -> RequestCase {
        let base = template.name.as_deref().unwrap_or(name);
        RequestCase {
            name: format!(
                "{}_{}_{}",
                base,
                polarity.as_str(),
                self.clock.now().format(NAME_TIMESTAMP_FORMAT)
            ),
            host: self.host.clone(),
            uri: template.uri.clone().unwrap_or_else(|| uri.to_string()),
            method,
            headers: template.headers.clone(),
            query: template.query.clone(),
            params: None,
            body: None,
            expect_result: polarity.expect_result(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BodyContent, BodyMode};
    use crate::synthesis::clock::FixedClock;
    use chrono::{Local, TimeZone};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    fn synthesizer() -> CaseSynthesizer<StdRng, FixedClock> {
        let instant = Local.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        CaseSynthesizer::with_sources("{{api}}", StdRng::seed_from_u64(1), FixedClock(instant))
    }

    fn template(value: serde_json::Value) -> TemplateDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_method() {
        let result = synthesizer().synthesize("/a", "/a", &template(json!({"params": {}})));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("missing method"), "unexpected message: {message}");
    }

    #[test]
    fn test_unsupported_method() {
        let result = synthesizer().synthesize("/a", "/a", &template(json!({"method": "PUT"})));
        assert!(matches!(result, Err(ApiCaseError::MalformedTemplate { .. })));
    }

    #[test]
    fn test_get_without_params_fails() {
        let result = synthesizer().synthesize("/a", "/a", &template(json!({"method": "GET"})));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("missing params"), "unexpected message: {message}");
    }

    #[test]
    fn test_get_with_empty_params_yields_one_valid_case() {
        let cases = synthesizer()
            .synthesize("/user/list", "/user/list", &template(json!({"method": "GET", "params": {}})))
            .unwrap();

        assert_eq!(cases.len(), 1);
        let case = &cases[0];
        assert_eq!(case.method, HttpMethod::Get);
        assert!(case.expect_result);
        assert_eq!(case.params, Some(ParameterRow::new()));
        assert_eq!(case.name, "/user/list_true_2024-05-06-07-08-09");
        assert_eq!(case.host, "{{api}}");
        assert!(case.body.is_none());
    }

    #[test]
    fn test_get_orders_valid_before_invalid() {
        let doc = template(json!({
            "method": "get",
            "headers": {"token": "t"},
            "query": {"v": "2"},
            "params": {
                "id": {"true": [1, 2], "false": [-1, "x"]}
            }
        }));
        let cases = synthesizer().synthesize("/user", "/user", &doc).unwrap();

        let flags: Vec<bool> = cases.iter().map(|c| c.expect_result).collect();
        assert_eq!(flags, vec![true, true, false, false]);
        assert_eq!(cases[2].params.as_ref().unwrap()["id"], json!(-1));
        assert!(cases[3].name.starts_with("/user_false_"));
        for case in &cases {
            assert_eq!(case.headers["token"], json!("t"));
            assert_eq!(case.query.as_ref().unwrap()["v"], json!("2"));
        }
    }

    #[test]
    fn test_template_name_and_uri_override() {
        let doc = template(json!({
            "method": "GET",
            "name": "login",
            "uri": "/api/v2/login",
            "params": {}
        }));
        let cases = synthesizer().synthesize("/login", "/login", &doc).unwrap();

        assert!(cases[0].name.starts_with("login_true_"));
        assert_eq!(cases[0].uri, "/api/v2/login");
    }

    #[test]
    fn test_post_without_body_fails() {
        let result = synthesizer().synthesize("/a", "/a", &template(json!({"method": "POST"})));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("missing body"), "unexpected message: {message}");
    }

    #[test]
    fn test_post_without_mode_fails() {
        let doc = template(json!({"method": "POST", "body": {"data": {}}}));
        let message = synthesizer().synthesize("/a", "/a", &doc).unwrap_err().to_string();
        assert!(message.contains("missing body mode"), "unexpected message: {message}");
    }

    #[test]
    fn test_post_urlencoded_single_valid_value() {
        let doc = template(json!({
            "method": "POST",
            "body": {"mode": "urlencoded", "data": {"a": {"true": ["1"], "false": []}}}
        }));
        let cases = synthesizer().synthesize("/form", "/form", &doc).unwrap();

        assert_eq!(cases.len(), 1);
        let case = &cases[0];
        assert!(case.expect_result);
        assert_eq!(case.method, HttpMethod::Post);
        assert!(case.params.is_none());
        let body = case.body.as_ref().unwrap();
        assert_eq!(body.mode(), BodyMode::Urlencoded);
        assert_eq!(body.content(), BodyContent::Text("a=1".to_string()));
    }

    #[test]
    fn test_post_body_variant_follows_mode() {
        let doc = template(json!({
            "method": "POST",
            "body": {"mode": "raw", "data": {
                "name": {"true": ["bob"], "false": [""]},
                "age": {"true": [3], "false": [-3]}
            }}
        }));
        let cases = synthesizer().synthesize("/user", "/user", &doc).unwrap();

        assert!(!cases.is_empty());
        assert!(cases.iter().all(|c| matches!(c.body, Some(RequestBody::Raw(_)))));
        let invalid: Vec<&RequestCase> = cases.iter().filter(|c| !c.expect_result).collect();
        assert!(!invalid.is_empty());
        assert!(cases.iter().position(|c| !c.expect_result).unwrap() > 0);
    }
}
