//! Source image discovery.
//!
//! Only numbered slides take part in a timed background: a file qualifies when
//! a digit sits right before a lowercase `.jpg` or `.png` extension. Slides are
//! ordered by the first number in their name, so `bg2.jpg` comes before
//! `bg10.jpg`.

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use natord::compare;
use regex::Regex;

/// Matches `<anything><digit>.jpg` and `<anything><digit>.png`.
static SLIDE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]\.(?:jpg|png)$").expect("slide pattern is a valid regex"));

/// First run of digits in a file name.
static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("number pattern is a valid regex"));

/// Whether `file_name` is a numbered slide.
#[must_use]
pub fn is_slide(file_name: &str) -> bool { SLIDE_PATTERN.is_match(file_name) }

/// The first number in `file_name`, used as the slide's sort key.
///
/// Numbers too large for `u128` saturate instead of failing.
#[must_use]
pub fn slide_number(file_name: &str) -> Option<u128> {
    FIRST_NUMBER
        .find(file_name)
        .map(|digits| digits.as_str().parse::<u128>().unwrap_or(u128::MAX))
}

/// Orders two slide file names by their first number, then naturally.
#[must_use]
pub fn compare_slides(a: &str, b: &str) -> Ordering {
    slide_number(a).cmp(&slide_number(b)).then_with(|| compare(a, b))
}

/// Lists the numbered slides directly inside `dir`, in display order.
///
/// Subdirectories are not searched. Hidden files (leading `.`) and
/// non-matching files are skipped.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn discover_slides(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut slides: Vec<(String, PathBuf)> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };

        if file_name.starts_with('.') {
            tracing::trace!(file = %file_name, "skipping hidden file");
        } else if is_slide(file_name) {
            slides.push((file_name.to_string(), path));
        } else {
            tracing::trace!(file = %file_name, "skipping non-slide file");
        }
    }

    slides.sort_by(|(a, _), (b, _)| compare_slides(a, b));
    tracing::debug!(dir = %dir.display(), count = slides.len(), "discovered slides");

    Ok(slides.into_iter().map(|(_, path)| path).collect())
}
