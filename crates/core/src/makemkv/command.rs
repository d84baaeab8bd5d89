//! Command lines understood by `makemkvcon`.

use std::path::Path;

use crate::disc::Disc;

/// Line printed by `makemkvcon` once a title was fully written.
///
/// The process exit code is not reliable (it is often 0 after a failed copy),
/// so this marker is the only success signal.
pub const SUCCESS_MARKER: &str = "Copy complete. 1 titles saved.";

/// Arguments for a robot-mode info scan of `disc`.
pub fn info_args(disc: &Disc, profile: Option<&Path>) -> Vec<String> {
    let mut args = vec!["-r".to_string()];
    if let Some(profile) = profile {
        args.push(profile_arg(profile));
    }
    args.extend(["info".to_string(), disc.makemkv_source()]);
    args
}

/// Arguments to extract title `title_index` of `disc` into `destination`.
pub fn extract_args(
    disc: &Disc,
    title_index: u32,
    destination: &Path,
    profile: Option<&Path>,
) -> Vec<String> {
    let mut args = Vec::with_capacity(5);
    if let Some(profile) = profile {
        args.push(profile_arg(profile));
    }
    args.extend([
        "mkv".to_string(),
        disc.makemkv_source(),
        title_index.to_string(),
        destination.to_string_lossy().to_string(),
    ]);
    args
}

fn profile_arg(profile: &Path) -> String {
    format!("--profile={}", profile.display())
}
