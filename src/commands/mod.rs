pub mod case;
pub mod export;
pub mod har;

pub use case::{CaseOptions, execute_case};
pub use export::{ExportOptions, execute_export};
pub use har::{HarOptions, execute_har};
