//! Incremental parser for `makemkvcon -r info` output.
//!
//! Only `TINFO:<title>,<attribute>,<code>,"<value>"` lines carry title data;
//! everything else is skipped. Each title index owns a small automaton that
//! accepts the tracked attributes in ascending id order and completes when
//! the output file name (the last attribute MakeMKV prints) shows up.

use std::collections::HashMap;
use std::time::Duration;

use super::types::{TitleField, TitleRecord};

const TINFO_PREFIX: &str = "TINFO:";
const GIGABYTE_UNIT: &str = "GB";

/// Result of parsing a whole info stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleScan {
    /// Complete titles, in the order they were completed.
    pub records: Vec<TitleRecord>,
    /// Indices of titles that were described only partially.
    pub discarded: Vec<u32>,
}

/// Parses a complete info stream.
pub fn parse_title_stream<I, S>(lines: I) -> TitleScan
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = TitleStreamParser::new();
    for line in lines {
        parser.feed(line.as_ref());
    }
    parser.finish()
}

/// A parsed `TINFO` value for one of the tracked fields.
#[derive(Debug, Clone, PartialEq)]
enum FieldValue {
    ChapterCount(u32),
    Duration(Duration),
    /// `None` when the size is not expressed in gigabytes.
    DiskSize(Option<f64>),
    OutputFileName(String),
}

impl FieldValue {
    fn parse(field: TitleField, raw: &str) -> Option<Self> {
        match field {
            TitleField::ChapterCount => raw.parse().ok().map(Self::ChapterCount),
            TitleField::Duration => parse_duration(raw).map(Self::Duration),
            TitleField::DiskSize => parse_size_gib(raw).map(Self::DiskSize),
            TitleField::OutputFileName => {
                (!raw.is_empty()).then(|| Self::OutputFileName(raw.to_string()))
            }
        }
    }
}

/// Fields collected so far for one title index.
#[derive(Debug, Default)]
struct PartialTitle {
    last_field: Option<TitleField>,
    chapter_count: Option<u32>,
    duration: Option<Duration>,
    size_gib: Option<f64>,
    output_file_name: Option<String>,
}

impl PartialTitle {
    fn accepts(&self, field: TitleField) -> bool {
        self.last_field.is_none_or(|last| field > last)
    }

    fn record(&mut self, field: TitleField, value: FieldValue) {
        match value {
            FieldValue::ChapterCount(count) => self.chapter_count = Some(count),
            FieldValue::Duration(duration) => self.duration = Some(duration),
            FieldValue::DiskSize(size) => self.size_gib = size,
            FieldValue::OutputFileName(name) => self.output_file_name = Some(name),
        }
        self.last_field = Some(field);
    }

    fn complete(self, index: u32) -> Option<TitleRecord> {
        Some(TitleRecord {
            index,
            chapter_count: self.chapter_count?,
            duration: self.duration?,
            size_gib: self.size_gib?,
            output_file_name: self.output_file_name?,
        })
    }
}

/// Incremental title parser.
///
/// Feed it lines as they arrive; [`finish`](Self::finish) returns the
/// completed records once the stream is closed. The parser keeps no state
/// beyond what it was fed, so the same lines always give the same records.
#[derive(Debug, Default)]
pub struct TitleStreamParser {
    pending: HashMap<u32, PartialTitle>,
    records: Vec<TitleRecord>,
    discarded: Vec<u32>,
}

impl TitleStreamParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one output line.
    pub fn feed(&mut self, line: &str) {
        let Some((index, field, raw)) = parse_tinfo(line) else {
            return;
        };
        let Some(value) = FieldValue::parse(field, raw) else {
            return;
        };

        let partial = self.pending.entry(index).or_default();
        if !partial.accepts(field) {
            // Attribute order went backwards: MakeMKV started describing this
            // title again, the earlier description is incomplete.
            *partial = PartialTitle::default();
            self.discarded.push(index);
        }
        partial.record(field, value);

        if field == TitleField::LAST {
            self.finalize(index);
        }
    }

    /// Titles completed so far.
    pub fn records(&self) -> &[TitleRecord] {
        &self.records
    }

    /// Closes the stream. Titles still waiting for fields are discarded.
    pub fn finish(mut self) -> TitleScan {
        let mut unfinished: Vec<u32> = self.pending.into_keys().collect();
        unfinished.sort_unstable();
        self.discarded.extend(unfinished);

        TitleScan {
            records: self.records,
            discarded: self.discarded,
        }
    }

    fn finalize(&mut self, index: u32) {
        let Some(partial) = self.pending.remove(&index) else {
            return;
        };

        match partial.complete(index) {
            Some(record) if !self.records.iter().any(|r| r.index == index) => {
                self.records.push(record);
            }
            _ => self.discarded.push(index),
        }
    }
}

/// Splits a `TINFO:<title>,<attribute>,<code>,"<value>"` line.
fn parse_tinfo(line: &str) -> Option<(u32, TitleField, &str)> {
    let rest = line.trim_end().strip_prefix(TINFO_PREFIX)?;
    let mut parts = rest.splitn(4, ',');

    let index = parts.next()?.parse().ok()?;
    let field = TitleField::from_id(parts.next()?.parse().ok()?)?;
    parts.next()?.parse::<u32>().ok()?;
    let value = parts.next()?.strip_prefix('"')?.strip_suffix('"')?;

    Some((index, field, value))
}

/// Parses `H:MM:SS` into whole seconds.
fn parse_duration(raw: &str) -> Option<Duration> {
    let mut parts = raw.split(':');
    let hours: u64 = parts.next()?.parse().ok()?;
    let minutes: u64 = parts.next()?.parse().ok()?;
    let seconds: u64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || minutes >= 60 || seconds >= 60 {
        return None;
    }
    Some(Duration::from_secs(hours * 3600 + minutes * 60 + seconds))
}

/// Parses `<number> <unit>`. The inner value is `None` for non-GB units.
///
/// Sizes must be finite and non-negative to be comparable.
fn parse_size_gib(raw: &str) -> Option<Option<f64>> {
    let (number, unit) = raw.split_once(' ')?;
    let size: f64 = number.parse().ok()?;
    if !size.is_finite() || size < 0.0 {
        return None;
    }
    Some((unit.trim() == GIGABYTE_UNIT).then_some(size))
}
