/// Crate filter used when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "apicase=warn";
const VERBOSE_FILTER: &str = "apicase=debug";

#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    pub filter: String,
}

impl LogConfig {
    pub fn from_env(verbose: bool) -> Self {
        Self::resolve(std::env::var("RUST_LOG").ok(), verbose)
    }

    /// `RUST_LOG` wins when set and non-empty, otherwise `--verbose` picks the level
    pub fn resolve(env_filter: Option<String>, verbose: bool) -> Self {
        let filter = match env_filter {
            Some(filter) if !filter.trim().is_empty() => filter,
            _ if verbose => VERBOSE_FILTER.to_string(),
            _ => DEFAULT_FILTER.to_string(),
        };

        Self { filter }
    }
}
