//! MakeMKV command line tool (`makemkvcon`) plumbing.
//!
//! This module locates the binary, builds its command lines and runs it,
//! exposing the merged stdout/stderr as a stream of lines. Interpreting those
//! lines is left to [`crate::titles`] and [`crate::extraction`].
//!
//! # Example
//!
//! ```ignore
//! use bdrip_core::makemkv::{find_makemkv_binary, MakemkvRunner, ToolRunner};
//!
//! let binary = find_makemkv_binary(None).ok_or("makemkvcon is not installed")?;
//! let runner = MakemkvRunner::new(binary);
//!
//! let mut output = runner.spawn(vec!["-r".into(), "info".into(), "iso:/discs/movie.iso".into()]).await?;
//! while let Some(line) = output.next_line().await {
//!     println!("{}", line);
//! }
//! let exit_code = output.finish().await?;
//! ```

mod command;
mod error;
mod locator;
mod runner;
mod traits;

pub use command::{extract_args, info_args, SUCCESS_MARKER};
pub use error::MakemkvError;
pub use locator::{find_makemkv_binary, MAKEMKV_BINARY};
pub use runner::{MakemkvRunner, ToolOutput};
pub use traits::ToolRunner;
