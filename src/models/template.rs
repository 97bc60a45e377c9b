//! Template document schema
//!
//! A template describes one endpoint together with pools of valid and
//! invalid values for each of its parameters. The case synthesizer expands
//! it into concrete request cases.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which value pool a synthesized case draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Valid,
    Invalid,
}

impl Polarity {
    /// Synthesis order: every valid case precedes every invalid case
    pub const ALL: [Polarity; 2] = [Polarity::Valid, Polarity::Invalid];

    pub fn expect_result(self) -> bool {
        matches!(self, Polarity::Valid)
    }

    /// Label used in case names and as the pool key in template files
    pub fn as_str(self) -> &'static str {
        match self {
            Polarity::Valid => "true",
            Polarity::Invalid => "false",
        }
    }
}

/// Valid and invalid values declared for a single parameter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuePools {
    #[serde(rename = "true", default)]
    pub valid: Vec<Value>,

    #[serde(rename = "false", default)]
    pub invalid: Vec<Value>,
}

impl ValuePools {
    /// Pools holding one observed value as the only valid value
    pub fn observed(value: Value) -> Self {
        Self {
            valid: vec![value],
            invalid: Vec::new(),
        }
    }

    pub fn pool(&self, polarity: Polarity) -> &[Value] {
        match polarity {
            Polarity::Valid => &self.valid,
            Polarity::Invalid => &self.invalid,
        }
    }
}

/// Parameter name to value pools, in declaration order
pub type ParameterSpec = IndexMap<String, ValuePools>;

/// One concrete assignment of a value to every parameter of a spec
pub type ParameterRow = IndexMap<String, Value>;

/// Encoding of a request body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyMode {
    None,
    Formdata,
    Urlencoded,
    Raw,
}

impl BodyMode {
    pub fn as_str(self) -> &'static str {
        match self {
            BodyMode::None => "none",
            BodyMode::Formdata => "formdata",
            BodyMode::Urlencoded => "urlencoded",
            BodyMode::Raw => "raw",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<BodyMode>,

    #[serde(default)]
    pub data: ParameterSpec,
}

/// A single template file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Overrides the path-derived case name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Overrides the path-derived request URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    #[serde(default)]
    pub headers: IndexMap<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<IndexMap<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<ParameterSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<BodySpec>,
}
