//! Reading and writing of the files aliasctl owns or edits.
//!
//! Writes are whole-file and atomic: the new contents go to a temporary file in
//! the destination directory, which is then renamed over the destination. A
//! destination that is a symlink is written through, so the link survives.

use std::fs::{self, DirBuilder, Permissions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

fn display(path: &Path) -> String {
    path.display().to_string()
}

/// Reads a whole file, returning `None` when it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn read_optional(file_description: &str, path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io_error(file_description, &display(path), e)),
    }
}

/// Reads a whole file as raw bytes, returning `None` when it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn read_optional_bytes(file_description: &str, path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io_error(file_description, &display(path), e)),
    }
}

/// Creates the parent directory of `path` when it is missing.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_directory(file_description: &str, path: &Path) -> Result<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };

    if parent.is_dir() {
        return Ok(());
    }

    debug!("Creating directory `{}`", parent.display());

    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    builder
        .create(parent)
        .map_err(|e| Error::io_error(file_description, &display(parent), e))
}

fn target_permissions(path: &Path) -> Option<Permissions> {
    if let Ok(metadata) = fs::metadata(path) {
        return Some(metadata.permissions());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(Permissions::from_mode(0o644))
    }
    #[cfg(not(unix))]
    {
        None
    }
}

/// The file a write to `path` lands in: the final target when `path` is a
/// symlink, otherwise `path` itself.
fn write_target(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => match fs::canonicalize(path) {
            Ok(target) => {
                debug!("Writing through symlink `{}` to `{}`", path.display(), target.display());
                target
            }
            Err(_) => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Replaces the contents of `path` with `contents`.
///
/// An existing file keeps its permissions. If anything fails, the previous
/// contents are left untouched.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be written.
pub fn write_atomically(
    file_description: &str,
    path: &Path,
    contents: impl AsRef<[u8]>,
) -> Result<()> {
    ensure_parent_directory(file_description, path)?;

    let target = write_target(path);
    let io_error = |e: std::io::Error| Error::io_error(file_description, &display(path), e);
    let directory = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temporary = NamedTempFile::new_in(directory).map_err(io_error)?;
    temporary.write_all(contents.as_ref()).map_err(io_error)?;
    temporary.as_file().sync_all().map_err(io_error)?;

    if let Some(permissions) = target_permissions(&target) {
        fs::set_permissions(temporary.path(), permissions).map_err(io_error)?;
    }

    temporary
        .persist(&target)
        .map_err(|e| Error::io_error(file_description, &display(path), e.error))?;

    debug!("Wrote {} file `{}`", file_description, path.display());
    Ok(())
}
