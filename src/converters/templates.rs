//! Template file output
//!
//! Templates are laid out like the URL paths they describe and are never
//! overwritten, so repeated runs against a growing capture only add files.

use crate::error::Result;
use crate::models::TemplateDocument;
use std::fs;
use std::path::{Path, PathBuf};

/// A template document and the request URI it was derived from
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateFile {
    pub uri: String,
    pub document: TemplateDocument,
}

/// File path of the template for `uri`: path segments become directories,
/// the last one the file name. `None` for a URI without segments.
pub fn template_path(root: &Path, uri: &str) -> Option<PathBuf> {
    let mut segments: Vec<&str> = uri.split('/').filter(|s| !s.is_empty()).collect();
    let file_name = segments.pop()?;

    let mut path = root.to_path_buf();
    path.extend(segments);
    path.push(format!("{}.json", file_name));
    Some(path)
}

/// Write templates under `root`, skipping files that already exist
///
/// Returns the number of files written.
pub fn write_templates(files: &[TemplateFile], root: &Path) -> Result<usize> {
    fs::create_dir_all(root)?;

    let mut written = 0;
    for file in files {
        let Some(path) = template_path(root, &file.uri) else {
            tracing::warn!("skipping template without a path: {:?}", file.uri);
            continue;
        };

        if path.exists() {
            tracing::debug!("template exists, keeping {}", path.display());
            continue;
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(&file.document)?)?;
        tracing::info!("wrote template {}", path.display());
        written += 1;
    }

    Ok(written)
}
