//! Request-case synthesis
//!
//! The combinator expands parameter value pools into rows; the synthesizer
//! turns a template document into request cases using those rows.

pub mod clock;
pub mod combinator;
pub mod synthesizer;

pub use clock::{Clock, FixedClock, SystemClock};
pub use combinator::{combine, dedup_rows};
pub use synthesizer::{CaseSynthesizer, NAME_TIMESTAMP_FORMAT};
