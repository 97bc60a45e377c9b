//! Template tree loader
//!
//! Walks a directory of `*.json` template files and synthesizes the cases
//! of each one. The path of a file relative to the tree root becomes the
//! request URI; a file named `prerequest` holds collection-level scripts.

use super::load_json_file;
use crate::error::{ApiCaseError, Result};
use crate::models::{CaseGroups, EventScript, RequestPre, TemplateDocument};
use crate::synthesis::{CaseSynthesizer, Clock};
use rand::Rng;
use serde_json::Value;
use sha1::{Digest, Sha1};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// File stem reserved for collection-level lifecycle scripts
pub const PREREQUEST_STEM: &str = "prerequest";

const SCRIPT_EVENTS: [&str; 2] = ["prerequest", "test"];

/// Load every template under `root` and synthesize its cases
///
/// Any malformed template aborts the whole run.
pub fn load_case_groups<R: Rng, C: Clock>(
    root: &Path,
    synthesizer: &mut CaseSynthesizer<R, C>,
) -> Result<CaseGroups> {
    if !root.exists() {
        return Err(ApiCaseError::InputNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ApiCaseError::InputNotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    collect_template_files(root, &mut files)?;

    let mut groups = CaseGroups::default();
    for path in files {
        let relative = path.strip_prefix(root).unwrap_or(&path);
        let uri = template_uri(relative);
        let document: Value = load_json_file(&path)?;

        if path.file_stem().and_then(|s| s.to_str()) == Some(PREREQUEST_STEM) {
            if groups.prerequest.is_some() {
                tracing::warn!("multiple prerequest files, {} replaces the earlier one", uri);
            }
            groups.prerequest = Some(parse_event_data(&uri, &document)?);
            continue;
        }

        let template: TemplateDocument = serde_json::from_value(document.clone())
            .map_err(|e| ApiCaseError::malformed(&uri, e.to_string()))?;
        let cases = synthesizer.synthesize(&uri, &uri, &template)?;
        tracing::debug!(cases = cases.len(), "synthesized {}", uri);

        groups
            .groups
            .insert(format!("{}@{}", uri, content_hash(&document)), cases);
    }

    Ok(groups)
}

/// Recursively gather `.json` files, visiting entries in name order
fn collect_template_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_template_files(&path, files)?;
        } else if path.extension().and_then(|e| e.to_str()) == Some("json") {
            files.push(path);
        }
    }
    Ok(())
}

/// Request URI for a template path relative to the tree root
///
/// `user/info.json` becomes `/user/info` on every platform.
pub fn template_uri(relative: &Path) -> String {
    let stripped = relative.with_extension("");
    let segments: Vec<String> = stripped
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    format!("/{}", segments.join("/"))
}

/// Hex SHA-1 of the canonical form of a parsed document
///
/// Keys are sorted recursively so formatting or key order never changes
/// the hash.
pub fn content_hash(document: &Value) -> String {
    let mut hasher = Sha1::new();
    hasher.update(canonicalize(document).to_string().as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect()
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), canonicalize(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

/// Parse a `prerequest` document into lifecycle scripts, in document order
pub fn parse_event_data(uri: &str, document: &Value) -> Result<Vec<RequestPre>> {
    let map = document
        .as_object()
        .ok_or_else(|| ApiCaseError::malformed(uri, "script file must be a JSON object"))?;

    if !SCRIPT_EVENTS.iter().any(|event| map.contains_key(*event)) {
        return Err(ApiCaseError::malformed(
            uri,
            "missing lifecycle-script markers (prerequest or test)",
        ));
    }

    map.iter()
        .map(|(event, script)| {
            let script: EventScript = serde_json::from_value(script.clone())
                .map_err(|e| ApiCaseError::malformed(uri, format!("script {}: {}", event, e)))?;
            Ok(RequestPre {
                event: event.clone(),
                script,
            })
        })
        .collect()
}
