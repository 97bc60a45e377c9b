use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "apicase")]
#[command(version)]
#[command(about = "Synthesize API test cases into Postman collections", long_about = None)]
pub struct Cli {
    /// Verbose logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Synthesize test cases from a directory of templates
    Case {
        /// Target format
        #[arg(short, long)]
        to: CaseTarget,

        /// Template directory
        #[arg(short, long)]
        dir: PathBuf,

        /// Collection name (directory name if not specified)
        #[arg(short, long)]
        name: Option<String>,

        /// Extension to apply while synthesizing
        #[arg(short, long)]
        ex: Option<Extension>,

        /// Output directory or file
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Convert a HAR capture
    Har {
        /// Target format
        #[arg(short, long)]
        to: ConvertTarget,

        /// Path to HAR file
        #[arg(short, long)]
        file: PathBuf,

        /// Output directory or file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert an eolinker API export
    Export {
        /// Target format
        #[arg(short, long)]
        to: ConvertTarget,

        /// Path to export JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Output directory or file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CaseTarget {
    /// Postman v2.1 collection
    Postman,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConvertTarget {
    /// Postman v2.1 collection
    Postman,
    /// Template tree
    Template,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Extension {
    /// OpenAPI enrichment (not implemented)
    Openapi,
}
