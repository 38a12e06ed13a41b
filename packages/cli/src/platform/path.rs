//! Path helpers.
//!
//! - [`expand`] resolves `~` in configured paths
//! - [`derive_background_name`] turns the `register` argument into a name

use std::path::PathBuf;

/// Expands a leading `~` to the user's home directory.
///
/// Absolute and relative paths are returned unchanged. Surrounding
/// whitespace is trimmed.
#[must_use]
pub fn expand(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return PathBuf::new();
    }

    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Final component of `path`, split on the last `/`.
fn basename(path: &str) -> &str { path.rfind('/').map_or(path, |idx| &path[idx + 1..]) }

/// Everything before the last `/`, trailing slashes trimmed unless the head
/// is only slashes.
fn dirname(path: &str) -> &str {
    let head = path.rfind('/').map_or("", |idx| &path[..=idx]);
    if head.is_empty() || head.bytes().all(|b| b == b'/') {
        head
    } else {
        head.trim_end_matches('/')
    }
}

/// Derives a background name from the directory argument as typed.
///
/// The name is the basename of the argument's *parent*, lowercased: for
/// `~/pics/mojave` it is `pics`, while `~/pics/mojave/` yields `mojave`.
/// Returns `None` when nothing usable remains (`mojave`, `/mojave`, `./x`).
#[must_use]
pub fn derive_background_name(directory: &str) -> Option<String> {
    let name = basename(dirname(directory));
    match name {
        "" | "." | ".." => None,
        name => Some(name.to_lowercase()),
    }
}

/// Uppercases the first character and lowercases the rest.
#[must_use]
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}
