//! Title extraction.
//!
//! [`TitleExtractor`] rips one selected title with `makemkvcon mkv`, decides
//! whether it worked by watching the output for MakeMKV's success line, and
//! moves the result to its final name. Each title goes through
//! `NotStarted -> Running -> Succeeded | Failed` exactly once; nothing is
//! retried here.

mod extractor;
mod monitor;
mod types;

pub use extractor::TitleExtractor;
pub use monitor::OutputMonitor;
pub use types::{ConversionResult, ExtractionJob, ExtractionState, FinalName};
