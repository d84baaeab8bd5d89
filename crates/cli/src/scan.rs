use serde::Serialize;

use bdrip_core::titles::TitleScan;
use bdrip_core::{Disc, TitleRecord, TitleSelection};

/// What `bdrip scan` found on one disc.
#[derive(Debug, Serialize)]
pub struct DiscScan {
    pub disc: Disc,
    pub titles: Vec<TitleRecord>,
    /// Titles MakeMKV described only partially.
    pub discarded: Vec<u32>,
    /// Indices the automatic selection would extract.
    pub selected: Vec<u32>,
}

impl DiscScan {
    pub fn new(disc: Disc, scan: TitleScan, selection: &TitleSelection) -> Self {
        Self {
            disc,
            titles: scan.records,
            discarded: scan.discarded,
            selected: selection.iter().map(|t| t.index).collect(),
        }
    }
}

/// Renders scans as a plain text table.
pub fn render_table(scans: &[DiscScan]) -> String {
    let mut out = String::new();
    for scan in scans {
        out.push_str(&format!(
            "Disc {} ({}): {}\n",
            scan.disc.ordinal(),
            scan.disc.kind(),
            scan.disc.location().display()
        ));
        out.push_str("    TITLE  DURATION   SIZE (GB)  CHAPTERS  FILE\n");
        for title in &scan.titles {
            let marker = if scan.selected.contains(&title.index) {
                '*'
            } else {
                ' '
            };
            let secs = title.duration.as_secs();
            out.push_str(&format!(
                "  {} {:>5}  {:>8}  {:>10.1}  {:>8}  {}\n",
                marker,
                title.index,
                format!("{}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60),
                title.size_gib,
                title.chapter_count,
                title.output_file_name
            ));
        }
        if !scan.discarded.is_empty() {
            let discarded: Vec<String> = scan.discarded.iter().map(u32::to_string).collect();
            out.push_str(&format!("    ignored: {}\n", discarded.join(", ")));
        }
    }
    out
}
