//! Case command implementation
//!
//! Synthesizes every template under a directory into one Postman collection.

use crate::cli::{CaseTarget, Extension};
use crate::converters::CollectionEmitter;
use crate::error::{ApiCaseError, Result};
use crate::loader::load_case_groups;
use crate::synthesis::CaseSynthesizer;
use colored::*;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CaseOptions {
    pub target: CaseTarget,
    pub dir: PathBuf,
    /// Collection name; the template directory's name when absent
    pub name: Option<String>,
    pub extension: Option<Extension>,
    pub output: PathBuf,
}

/// Execute the case command, returning the written collection path
pub fn execute_case(options: &CaseOptions) -> Result<PathBuf> {
    if let Some(extension) = options.extension {
        tracing::warn!("extension {:?} is not implemented, ignoring it", extension);
    }

    let name = match &options.name {
        Some(name) => name.clone(),
        None => default_group_name(&options.dir)?,
    };

    println!("{}", "Loading templates...".bright_blue());
    println!("  Path: {}", options.dir.display());

    let mut synthesizer = CaseSynthesizer::new(format!("{{{{{}}}}}", name));
    let groups = load_case_groups(&options.dir, &mut synthesizer)?;
    println!(
        "{} Synthesized {} cases in {} groups",
        "✓".green(),
        groups.case_count(),
        groups.groups.len()
    );

    let path = match options.target {
        CaseTarget::Postman => CollectionEmitter::new(&name).emit(groups, &options.output)?,
    };
    println!("{} Generated collection: {}", "✓".green(), path.display());

    Ok(path)
}

/// Base name of the canonical template directory
fn default_group_name(dir: &Path) -> Result<String> {
    let canonical = dir.canonicalize().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ApiCaseError::InputNotFound(dir.to_path_buf()),
        _ => ApiCaseError::IoError(e),
    })?;

    Ok(canonical
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cases".to_string()))
}
