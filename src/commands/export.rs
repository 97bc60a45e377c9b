//! Export command implementation
//!
//! Converts an eolinker API export into templates or a collection.

use super::har::{file_stem, template_root};
use crate::cli::ConvertTarget;
use crate::converters::{Converter, ExportConverter, write_collection, write_templates};
use crate::error::Result;
use crate::loader::load_export;
use colored::*;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub target: ConvertTarget,
    pub file: PathBuf,
    pub output: Option<PathBuf>,
}

pub fn execute_export(options: &ExportOptions) -> Result<PathBuf> {
    let entries = load_export(&options.file)?;
    println!(
        "{} Loaded export file: {} ({} apis)",
        "✓".green(),
        options.file.display(),
        entries.len()
    );

    let converter = ExportConverter::new();
    match options.target {
        ConvertTarget::Template => {
            let root = options
                .output
                .clone()
                .unwrap_or_else(|| template_root(&options.file));
            let files = converter.convert_templates(&entries)?;
            let written = write_templates(&files, &root)?;
            println!(
                "{} Wrote {} of {} templates under {}",
                "✓".green(),
                written,
                files.len(),
                root.display()
            );
            Ok(root)
        }
        ConvertTarget::Postman => {
            let stem = collection_stem(&options.file);
            let collection = converter.convert_collection(&entries, &stem)?;
            let target = options.output.as_deref().unwrap_or(Path::new("."));
            let path = write_collection(&collection, &stem, target)?;
            println!("{} Generated collection: {}", "✓".green(), path.display());
            Ok(path)
        }
    }
}

fn collection_stem(file: &Path) -> String {
    format!("{}_eolinker_to_postman", file_stem(file))
}
