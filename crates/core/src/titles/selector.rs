//! Movie title selection heuristics.

use std::cmp::Ordering;

use super::types::{TitleRecord, TitleSelection};
use crate::reporter::Reporter;

/// Minimum size of an alternate cut relative to the previously selected
/// title. Bonus features are disproportionately smaller than the movie.
pub const ALTERNATE_CUT_SIZE_RATIO: f64 = 0.6;

/// Descending (duration, size) order, ties broken by ascending index.
fn compare_titles(a: &TitleRecord, b: &TitleRecord) -> Ordering {
    b.duration
        .cmp(&a.duration)
        .then_with(|| b.size_gib.total_cmp(&a.size_gib))
        .then_with(|| a.index.cmp(&b.index))
}

/// Sorts titles longest first, then biggest first.
pub fn sort_titles(titles: &mut [TitleRecord]) {
    titles.sort_by(compare_titles);
}

fn indistinguishable(a: &TitleRecord, b: &TitleRecord) -> bool {
    a.duration == b.duration && a.size_gib.total_cmp(&b.size_gib) == Ordering::Equal
}

/// Decides which titles of a disc are the movie.
#[derive(Debug, Clone, Copy)]
pub struct TitleSelector {
    size_ratio: f64,
}

impl Default for TitleSelector {
    fn default() -> Self {
        Self::new(ALTERNATE_CUT_SIZE_RATIO)
    }
}

impl TitleSelector {
    /// Creates a selector with a custom alternate cut size ratio.
    pub fn new(size_ratio: f64) -> Self {
        Self { size_ratio }
    }

    pub fn size_ratio(&self) -> f64 {
        self.size_ratio
    }

    /// Selects movie titles among `records`.
    ///
    /// With `max_count > 0` the caller knows how many titles it wants: the
    /// `max_count` longest titles are returned, unless two titles share the
    /// same duration and size, in which case the disc is ambiguous and the
    /// selection is empty. With `max_count == 0` the selector decides on its
    /// own: it starts from the longest title and keeps alternate cuts while
    /// each one is bigger than [`size_ratio`](Self::size_ratio) times the
    /// previous one.
    pub fn select(
        &self,
        records: &[TitleRecord],
        max_count: usize,
        reporter: &dyn Reporter,
    ) -> TitleSelection {
        if records.is_empty() {
            return TitleSelection::empty();
        }

        let mut sorted = records.to_vec();
        sort_titles(&mut sorted);

        if max_count > 0 {
            // Same movie with different audio tracks: no way to tell which one to keep.
            if let Some(pair) = sorted.windows(2).find(|w| indistinguishable(&w[0], &w[1])) {
                reporter.warning(&format!(
                    "Identical movie titles were found: titles {} and {} both last {}s and weigh {} GB",
                    pair[0].index,
                    pair[1].index,
                    pair[0].duration.as_secs(),
                    pair[0].size_gib
                ));
                return TitleSelection::empty();
            }

            sorted.truncate(max_count);
            return TitleSelection::new(sorted);
        }

        let mut selected: Vec<TitleRecord> = Vec::with_capacity(sorted.len());
        for record in sorted {
            match selected.last() {
                None => selected.push(record),
                Some(previous) if record.size_gib > previous.size_gib * self.size_ratio => {
                    selected.push(record)
                }
                Some(_) => break,
            }
        }

        reporter.debug(&format!(
            "{} movie titles selected automatically (size ratio {})",
            selected.len(),
            self.size_ratio()
        ));
        TitleSelection::new(selected)
    }
}
