//! Blu-Ray disc discovery.
//!
//! A downloaded disc is either a directory tree (`<disc>/BDMV/index.bdmv`) or
//! an ISO image. [`find_blu_ray_discs`] walks a download directory and returns
//! typed [`Disc`] handles ready to be handed to MakeMKV.

mod error;
mod locator;
mod types;

pub use error::DiscError;
pub use locator::{find_blu_ray_discs, DISC_INDEX_DIRECTORY, DISC_INDEX_FILE};
pub use types::{Disc, DiscKind};
