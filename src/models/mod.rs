pub mod eolinker;
pub mod har;
pub mod postman;
pub mod request;
pub mod template;

pub use request::{
    BodyContent, CaseGroups, EventScript, HttpMethod, RequestBody, RequestCase, RequestPre,
};
pub use template::{
    BodyMode, BodySpec, ParameterRow, ParameterSpec, Polarity, TemplateDocument, ValuePools,
};
