//! Title discovery and selection.
//!
//! MakeMKV reports every playable stream of a disc as a "title": the movie,
//! but also menus, trailers, bonus features and duplicates differing only by
//! their audio tracks. This module turns the `makemkvcon -r info` output into
//! [`TitleRecord`]s ([`TitleStreamParser`]) and decides which of them are the
//! movie ([`TitleSelector`]). [`TitleScanner`] ties both to a [`ToolRunner`].
//!
//! [`ToolRunner`]: crate::makemkv::ToolRunner

mod parser;
mod scanner;
mod selector;
mod types;

pub use parser::{parse_title_stream, TitleScan, TitleStreamParser};
pub use scanner::TitleScanner;
pub use selector::{sort_titles, TitleSelector, ALTERNATE_CUT_SIZE_RATIO};
pub use types::{TitleField, TitleRecord, TitleSelection};
