//! HAR command implementation

use crate::cli::ConvertTarget;
use crate::converters::{Converter, HarConverter, write_collection, write_templates};
use crate::error::Result;
use crate::loader::load_har;
use colored::*;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct HarOptions {
    pub target: ConvertTarget,
    pub file: PathBuf,
    pub output: Option<PathBuf>,
}

/// Execute the har command, returning the written collection file or
/// template directory
pub fn execute_har(options: &HarOptions) -> Result<PathBuf> {
    let har = load_har(&options.file)?;
    println!(
        "{} Loaded HAR file: {} ({} entries)",
        "✓".green(),
        options.file.display(),
        har.log.entries.len()
    );

    let converter = HarConverter::new();
    match options.target {
        ConvertTarget::Template => {
            let root = options
                .output
                .clone()
                .unwrap_or_else(|| template_root(&options.file));
            let files = converter.convert_templates(&har)?;
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
            let stem = file_stem(&options.file);
            let collection = converter.convert_collection(&har, &stem)?;
            let target = options.output.as_deref().unwrap_or(Path::new("."));
            let path = write_collection(&collection, &stem, target)?;
            println!("{} Generated collection: {}", "✓".green(), path.display());
            Ok(path)
        }
    }
}

/// Default template directory: the input path without its extension
pub fn template_root(file: &Path) -> PathBuf {
    if file.extension().is_some() {
        file.with_extension("")
    } else {
        let mut root = file.as_os_str().to_owned();
        root.push("_templates");
        PathBuf::from(root)
    }
}

pub(crate) fn file_stem(file: &Path) -> String {
    file.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "collection".to_string())
}
