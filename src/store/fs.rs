//! File I/O adapter: scoped load and atomic save of the backing file.
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use crate::error::{IniError, Result};

/// Read `path` as UTF-8 text.
///
/// Returns `Ok(None)` when the file does not exist; every other failure is
/// an error.
///
/// # Errors
///
/// Returns [`IniError::Io`] if the file exists but cannot be read, or
/// [`IniError::Encoding`] if it is not valid UTF-8.
pub fn read_text(path: &Path) -> Result<Option<String>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(IniError::io(path, e)),
    };
    String::from_utf8(bytes)
        .map(Some)
        .map_err(|e| IniError::encoding(path, e))
}

/// Replace the contents of `path` with `contents` atomically.
///
/// The text is written to a temporary file next to the target, synced, and
/// renamed over it. Readers see either the old file or the new one, never a
/// partial write; on failure the old file is left untouched. When `path` is a
/// symlink the file it points at is replaced and the link is kept. A
/// read-only target is refused rather than replaced.
///
/// # Errors
///
/// Returns [`IniError::Io`] if the parent directory cannot be created, the
/// target is read-only, or the temporary file cannot be written or renamed.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    let target = resolve_target(path)?;
    if let Ok(meta) = std::fs::metadata(&target)
        && meta.permissions().readonly()
    {
        return Err(IniError::io(
            path,
            io::Error::new(io::ErrorKind::PermissionDenied, "file is read-only"),
        ));
    }
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".inifile")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| IniError::io(dir, e))?;
    tmp.write_all(contents.as_bytes())
        .and_then(|()| copy_permissions(tmp.as_file(), &target))
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| IniError::io(tmp.path(), e))?;
    tmp.persist(&target).map_err(|e| IniError::io(path, e.error))?;

    tracing::debug!("wrote {} bytes to {}", contents.len(), target.display());
    Ok(())
}

/// The file a write to `path` should land on: `path` itself, or the end of
/// its symlink chain.
fn resolve_target(path: &Path) -> Result<PathBuf> {
    match std::fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            // Dangling link: write where it points.
            match (std::fs::read_link(path), path.parent()) {
                (Ok(dest), Some(parent)) => Ok(parent.join(dest)),
                (Ok(dest), None) => Ok(dest),
                (Err(_), _) => Ok(path.to_path_buf()),
            }
        }
        Err(e) => Err(IniError::io(path, e)),
    }
}

/// Give the replacement file the permissions of the file it replaces, or
/// the usual `0644` for a new file on Unix.
fn copy_permissions(file: &std::fs::File, path: &Path) -> io::Result<()> {
    match std::fs::metadata(path) {
        Ok(meta) => file.set_permissions(meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => set_new_file_permissions(file),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn set_new_file_permissions(file: &std::fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt as _;
    file.set_permissions(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
const fn set_new_file_permissions(_file: &std::fs::File) -> io::Result<()> {
    Ok(())
}

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| IniError::io(parent, e))?;
    }
    Ok(())
}
