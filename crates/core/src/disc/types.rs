//! Types for the disc module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// How a disc is stored on the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscKind {
    /// Unpacked disc tree containing a `BDMV` directory.
    Directory,
    /// Single `.iso` image.
    Image,
}

impl DiscKind {
    /// Returns the source type keyword understood by `makemkvcon`.
    pub fn makemkv_keyword(&self) -> &'static str {
        match self {
            Self::Directory => "file",
            Self::Image => "iso",
        }
    }
}

impl fmt::Display for DiscKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.makemkv_keyword())
    }
}

/// One disc selected for conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disc {
    kind: DiscKind,
    location: PathBuf,
    ordinal: usize,
}

impl Disc {
    /// Creates a disc handle. `ordinal` is 1-based.
    pub fn new(kind: DiscKind, location: impl Into<PathBuf>, ordinal: usize) -> Self {
        Self {
            kind,
            location: location.into(),
            ordinal,
        }
    }

    pub fn kind(&self) -> DiscKind {
        self.kind
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Position of this disc among the discs selected for the job.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Returns the `<type>:<path>` source argument for `makemkvcon`.
    pub fn makemkv_source(&self) -> String {
        format!("{}:{}", self.kind.makemkv_keyword(), self.location.display())
    }
}
