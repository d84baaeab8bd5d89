//! Types for the titles module.

use serde::{Serialize, Serializer};
use std::time::Duration;

/// Title attributes read from `TINFO` lines, by MakeMKV attribute id.
///
/// Variants are declared in ascending id order, which is also the order in
/// which `makemkvcon` prints them for a given title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TitleField {
    /// Number of chapters (attribute 8).
    ChapterCount,
    /// Duration as `H:MM:SS` (attribute 9).
    Duration,
    /// Human readable size, e.g. `31.8 GB` (attribute 10).
    DiskSize,
    /// Name of the file MakeMKV writes when extracting (attribute 27).
    OutputFileName,
}

impl TitleField {
    /// The field whose arrival finalizes a title.
    pub const LAST: TitleField = TitleField::OutputFileName;

    /// Returns the MakeMKV attribute id of this field.
    pub fn id(&self) -> u32 {
        match self {
            Self::ChapterCount => 8,
            Self::Duration => 9,
            Self::DiskSize => 10,
            Self::OutputFileName => 27,
        }
    }

    /// Maps a MakeMKV attribute id to a field, if it is one we track.
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            8 => Some(Self::ChapterCount),
            9 => Some(Self::Duration),
            10 => Some(Self::DiskSize),
            27 => Some(Self::OutputFileName),
            _ => None,
        }
    }
}

/// A fully described title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleRecord {
    /// MakeMKV title id, unique within a disc.
    pub index: u32,
    pub chapter_count: u32,
    #[serde(rename = "duration_secs", serialize_with = "serialize_secs")]
    pub duration: Duration,
    pub size_gib: f64,
    /// File name MakeMKV uses when extracting this title.
    pub output_file_name: String,
}

fn serialize_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_secs())
}

/// Titles judged to be movie content, longest first.
///
/// An empty selection means "nothing usable", including the case where the
/// disc was too ambiguous to pick anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TitleSelection {
    titles: Vec<TitleRecord>,
}

impl TitleSelection {
    pub(crate) fn new(titles: Vec<TitleRecord>) -> Self {
        Self { titles }
    }

    /// An empty selection.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn titles(&self) -> &[TitleRecord] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TitleRecord> {
        self.titles.iter()
    }
}

impl IntoIterator for TitleSelection {
    type Item = TitleRecord;
    type IntoIter = std::vec::IntoIter<TitleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.titles.into_iter()
    }
}

impl<'a> IntoIterator for &'a TitleSelection {
    type Item = &'a TitleRecord;
    type IntoIter = std::slice::Iter<'a, TitleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.titles.iter()
    }
}
