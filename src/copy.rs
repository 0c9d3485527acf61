//! Tree replication for the `copy files` directive
//!
//! A physical depth-first walk: every path is classified through
//! `fs::symlink_metadata`, so symlinks are inspected rather than followed,
//! and a symlink to a directory is recreated as a link instead of being
//! descended into. Root entries under the version-control metadata prefix
//! are pruned entirely. The first hard error aborts the whole walk; entries
//! already copied are left in place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{ErrorKind, ShellError};

/// Prefix of the relative path excluded from the walk — never copied,
/// never descended. A plain string prefix, so every walk-root entry whose
/// name begins with it (`.git`, `.gitignore`, `.github`, ...) is excluded.
const METADATA_PREFIX: &str = ".git";

/// What one filesystem entry is, as seen without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file — content and mode are replicated
    Regular,
    /// A directory — recreated, then descended into
    Directory,
    /// A symlink, or a special/unreadable entry treated as one
    Link,
}

/// One classified entry in the walk.
#[derive(Debug, Clone, Copy)]
pub struct Entry {
    pub kind: EntryKind,
    /// Permission bits of the source entry (meaningless for `Link`)
    pub mode: u32,
}

/// Classify `path` without following symlinks.
///
/// Entries whose metadata cannot be read, and special files (fifos,
/// sockets, devices), are classified as `Link`: their true nature cannot be
/// determined through this path, and recreating them as a symlink is the
/// conservative fallback — the subsequent readlink fails loudly if the
/// entry was not a link after all.
pub fn classify(path: &Path) -> Entry {
    match fs::symlink_metadata(path) {
        Ok(meta) => {
            let kind = if meta.file_type().is_file() {
                EntryKind::Regular
            } else if meta.file_type().is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::Link
            };
            Entry {
                kind,
                mode: mode_bits(&meta),
            }
        }
        Err(_) => Entry {
            kind: EntryKind::Link,
            mode: 0,
        },
    }
}

/// Read the full target of the symlink at `path`.
///
/// Returns the complete target string or a failure naming the path; there
/// is no truncation to worry about at this level.
pub fn read_link_target(path: &Path) -> Result<PathBuf, ShellError> {
    fs::read_link(path).map_err(|e| {
        ShellError::new(ErrorKind::Io, format!("readlink {}: {}", path.display(), e))
    })
}

/// Replicate the tree rooted at `source_root` under `dest_root`.
///
/// `source_root` is conventionally the current directory (`.`). Destination
/// paths are `dest_root` joined with each entry's path relative to the walk
/// root. Directory creation tolerates "already exists"; every other failure
/// aborts the walk and is surfaced to the caller. Nothing is rolled back.
pub fn copy_tree(source_root: &Path, dest_root: &Path) -> Result<(), ShellError> {
    copy_entry(source_root, Path::new(""), dest_root)
}

/// Visit one entry: copy, create directory and recurse, recreate link, or
/// prune the metadata subtree.
fn copy_entry(source: &Path, rel: &Path, dest_root: &Path) -> Result<(), ShellError> {
    if rel.to_string_lossy().starts_with(METADATA_PREFIX) {
        return Ok(());
    }
    let dest = if rel.as_os_str().is_empty() {
        dest_root.to_path_buf()
    } else {
        dest_root.join(rel)
    };

    let entry = classify(source);
    match entry.kind {
        EntryKind::Regular => copy_file(source, &dest, entry.mode),
        EntryKind::Directory => {
            make_dir(&dest, entry.mode)?;
            let children = fs::read_dir(source).map_err(|e| {
                ShellError::new(ErrorKind::Io, format!("read dir {}: {}", source.display(), e))
            })?;
            for child in children {
                let child = child.map_err(|e| {
                    ShellError::new(ErrorKind::Io, format!("read dir {}: {}", source.display(), e))
                })?;
                let name = child.file_name();
                copy_entry(&child.path(), &rel.join(&name), dest_root)?;
            }
            Ok(())
        }
        EntryKind::Link => {
            let target = read_link_target(source)?;
            make_link(&target, &dest)
        }
    }
}

/// Whole-file copy, creating (or truncating) `dest` with `mode`.
fn copy_file(source: &Path, dest: &Path, mode: u32) -> Result<(), ShellError> {
    let mut input = fs::File::open(source).map_err(|e| {
        ShellError::new(ErrorKind::Io, format!("open {}: {}", source.display(), e))
    })?;
    let mut output = open_for_write(dest, mode).map_err(|e| {
        ShellError::new(ErrorKind::Io, format!("create {}: {}", dest.display(), e))
    })?;
    io::copy(&mut input, &mut output).map_err(|e| {
        ShellError::new(
            ErrorKind::Io,
            format!("copy {} to {}: {}", source.display(), dest.display(), e),
        )
    })?;

    // The open mode only applies when the file is created; re-apply it so
    // an overwritten destination ends up with the source's bits too.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dest, fs::Permissions::from_mode(mode)).map_err(|e| {
            ShellError::new(ErrorKind::Io, format!("chmod {}: {}", dest.display(), e))
        })?;
    }
    Ok(())
}

#[cfg(unix)]
fn open_for_write(dest: &Path, mode: u32) -> io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode)
        .open(dest)
}

#[cfg(not(unix))]
fn open_for_write(dest: &Path, _mode: u32) -> io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(dest)
}

/// Create `dest` with `mode`, tolerating a directory that already exists.
fn make_dir(dest: &Path, mode: u32) -> Result<(), ShellError> {
    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    match builder.create(dest) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(ShellError::new(
            ErrorKind::Io,
            format!("mkdir {}: {}", dest.display(), e),
        )),
    }
}

/// Recreate a symlink at `dest` pointing at the same target string.
fn make_link(target: &Path, dest: &Path) -> Result<(), ShellError> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, dest).map_err(|e| {
            ShellError::new(ErrorKind::Io, format!("symlink {}: {}", dest.display(), e))
        })
    }
    #[cfg(windows)]
    {
        // Pick the link flavor by probing what the target resolves to from
        // the link's own directory.
        let resolved = if target.is_absolute() {
            target.to_path_buf()
        } else {
            dest.parent().unwrap_or(Path::new(".")).join(target)
        };
        let result = if resolved.is_dir() {
            std::os::windows::fs::symlink_dir(target, dest)
        } else {
            std::os::windows::fs::symlink_file(target, dest)
        };
        result.map_err(|e| {
            ShellError::new(ErrorKind::Io, format!("symlink {}: {}", dest.display(), e))
        })
    }
}

#[cfg(unix)]
fn mode_bits(meta: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o777
}

#[cfg(not(unix))]
fn mode_bits(_meta: &fs::Metadata) -> u32 {
    0o755
}
