//! Converters between foreign formats, templates and Postman collections
//!
//! The collection emitter renders synthesized cases; the format adapters
//! map HAR captures and eolinker exports onto template files or directly
//! onto collection items.

pub mod eolinker;
pub mod har;
pub mod postman;
pub mod templates;

pub use eolinker::ExportConverter;
pub use har::HarConverter;
pub use postman::{CollectionEmitter, write_collection};
pub use templates::{TemplateFile, write_templates};

use crate::error::Result;
use crate::models::postman::PostmanCollection;

/// URL path suffixes of static assets that never become API cases
pub const STATIC_SUFFIXES: [&str; 6] = [".png", ".ico", ".gif", ".css", ".js", "/"];

pub fn is_static_resource(path: &str) -> bool {
    STATIC_SUFFIXES.iter().any(|suffix| path.ends_with(suffix))
}

/// Trait for adapters that read a foreign document
pub trait Converter {
    /// The parsed foreign document
    type Source;

    /// Template documents, one per endpoint, keyed by request URI
    fn convert_templates(&self, source: &Self::Source) -> Result<Vec<TemplateFile>>;

    /// A flat collection with one request per source entry
    fn convert_collection(&self, source: &Self::Source, name: &str) -> Result<PostmanCollection>;
}
