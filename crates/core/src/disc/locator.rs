//! Finds discs below a download directory.

use std::cmp::Reverse;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::error::DiscError;
use super::types::{Disc, DiscKind};
use crate::reporter::Reporter;

/// Directory holding the index file of an unpacked Blu-Ray.
pub const DISC_INDEX_DIRECTORY: &str = "BDMV";

/// Index file marking the root of an unpacked Blu-Ray.
pub const DISC_INDEX_FILE: &str = "index.bdmv";

/// Searches `root` for Blu-Ray discs.
///
/// Unpacked disc trees win over ISO images: when at least one
/// `BDMV/index.bdmv` exists, images are ignored. Directory discs are sorted by
/// path, images by descending size (bigger images are more likely to hold the
/// movie). At most `disc_set` discs are returned; `disc_set <= 0` returns none.
pub fn find_blu_ray_discs(
    root: &Path,
    disc_set: i32,
    reporter: &dyn Reporter,
) -> Result<Vec<Disc>, DiscError> {
    if disc_set <= 0 {
        return Ok(Vec::new());
    }

    if !root.is_dir() {
        return Err(DiscError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut directories: Vec<PathBuf> = Vec::new();
    let mut images: Vec<(u64, PathBuf)> = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if is_disc_index(path) {
            // <disc>/BDMV/index.bdmv
            if let Some(disc_root) = path.parent().and_then(Path::parent) {
                directories.push(disc_root.to_path_buf());
            }
        } else if is_iso_image(path) {
            images.push((entry.metadata()?.len(), path.to_path_buf()));
        }
    }

    let (kind, mut found) = if !directories.is_empty() {
        directories.sort();
        (DiscKind::Directory, directories)
    } else {
        images.sort_by(|(size_a, path_a), (size_b, path_b)| {
            Reverse(size_a).cmp(&Reverse(size_b)).then_with(|| path_a.cmp(path_b))
        });
        (
            DiscKind::Image,
            images.into_iter().map(|(_, path)| path).collect(),
        )
    };

    if found.is_empty() {
        reporter.debug(&format!("No disc was found in {}", root.display()));
        return Ok(Vec::new());
    }

    reporter.debug(&format!(
        "{} discs were found in {}",
        found.len(),
        root.display()
    ));
    found.truncate(disc_set as usize);

    Ok(found
        .into_iter()
        .enumerate()
        .map(|(i, location)| Disc::new(kind, location, i + 1))
        .collect())
}

fn is_disc_index(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == DISC_INDEX_FILE)
        && path
            .parent()
            .and_then(Path::file_name)
            .is_some_and(|name| name == DISC_INDEX_DIRECTORY)
}

fn is_iso_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("iso"))
}
