//! Filesystem operations used while installing a background.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Mode given to files we create from scratch, readable by the desktop session.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Recursively copies `src` into `dst`, creating `dst` as needed.
///
/// Existing files in `dst` are overwritten and symlinks are followed.
/// Returns the number of files copied.
///
/// # Errors
///
/// Returns the first I/O error encountered; files copied before it stay.
pub fn copy_dir_all(src: &Path, dst: &Path) -> io::Result<u64> {
    fs::create_dir_all(dst)?;

    let mut copied = 0u64;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let from = entry.path();
        let to = dst.join(entry.file_name());

        if from.is_dir() {
            copied += copy_dir_all(&from, &to)?;
        } else {
            fs::copy(&from, &to)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Replaces `path` with `contents` through a temp file and a rename.
///
/// Readers see either the old or the new file, never a partial one. The
/// permissions of an existing file are kept; new files get `0644`.
///
/// # Errors
///
/// Returns an error if the temp file cannot be created, written or renamed.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let parent = parent_dir(path);
    let permissions = fs::metadata(path).ok().map(|meta| meta.permissions());

    let mut temp = NamedTempFile::new_in(&parent)?;
    temp.write_all(contents)?;
    temp.as_file().sync_all()?;

    match permissions {
        Some(permissions) => fs::set_permissions(temp.path(), permissions)?,
        None => set_new_file_permissions(temp.path())?,
    }

    temp.persist(path).map_err(|err| err.error)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote file atomically");
    Ok(())
}

#[cfg(unix)]
fn set_new_file_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(NEW_FILE_MODE))
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn set_new_file_permissions(_path: &Path) -> io::Result<()> { Ok(()) }

/// Checks that files can be created in `dir`.
///
/// When `dir` does not exist yet, its nearest existing ancestor is checked,
/// since that is where it would be created. The check creates a temp file that is
/// removed right away.
///
/// # Errors
///
/// Returns the I/O error of the temp file, typically `PermissionDenied`.
pub fn ensure_writable(dir: &Path) -> io::Result<()> {
    let target = nearest_existing(dir);
    tempfile::tempfile_in(&target).map(drop).inspect_err(|err| {
        tracing::debug!(dir = %target.display(), error = %err, "directory is not writable");
    })
}

fn nearest_existing(dir: &Path) -> PathBuf {
    dir.ancestors()
        .find(|ancestor| !ancestor.as_os_str().is_empty() && ancestor.exists())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
