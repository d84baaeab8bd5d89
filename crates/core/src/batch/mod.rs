//! Whole-download conversion.
//!
//! [`ConversionBatch`] ties the other modules together the way NZBGet runs
//! the post-processing script: find the discs of a download, pick the movie
//! titles of each disc, then extract them one after the other.

mod driver;
mod error;
mod types;

pub use driver::ConversionBatch;
pub use error::BatchError;
pub use types::{
    BatchJob, BatchReport, DiscReport, PostProcessStatus, SUCCESSFUL_DOWNLOAD_STATUS,
};
