//! Copy strategies shared by the adapters.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// How an agent's config is laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// A whole directory, mirrored. Names in `exclude` are skipped at any
    /// depth and never deleted from the destination.
    Tree { exclude: &'static [&'static str] },
    /// Only the named top-level entries of a directory
    Subset { entries: &'static [&'static str] },
    /// A single file
    File,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub copied: usize,
    pub removed: usize,
}

impl CopyStats {
    fn add(&mut self, other: CopyStats) {
        self.copied += other.copied;
        self.removed += other.removed;
    }
}

impl fmt::Display for CopyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.copied == 1 { "file" } else { "files" };
        write!(f, "{} {} copied", self.copied, noun)?;
        if self.removed > 0 {
            write!(f, ", {} removed", self.removed)?;
        }
        Ok(())
    }
}

impl Layout {
    /// Copy `source` onto `dest` following this layout.
    ///
    /// Returns `Ok(None)` when there is nothing to copy: the source is
    /// missing, or for a subset none of its entries exist.
    pub fn sync(&self, source: &Path, dest: &Path) -> io::Result<Option<CopyStats>> {
        match self {
            Layout::Tree { exclude } => {
                if !source.is_dir() {
                    return Ok(None);
                }
                mirror_dir(source, dest, exclude).map(Some)
            }
            Layout::Subset { entries } => sync_subset(source, dest, entries),
            Layout::File => {
                if !source.is_file() {
                    return Ok(None);
                }
                let copied = usize::from(copy_file(source, dest)?);
                Ok(Some(CopyStats { copied, removed: 0 }))
            }
        }
    }
}

fn sync_subset(source: &Path, dest: &Path, entries: &[&str]) -> io::Result<Option<CopyStats>> {
    if !source.is_dir() {
        return Ok(None);
    }

    let mut stats = CopyStats::default();
    let mut found = false;

    for entry in entries {
        let from = source.join(entry);
        let to = dest.join(entry);

        if from.is_dir() {
            found = true;
            stats.add(mirror_dir(&from, &to, &[])?);
        } else if from.is_file() {
            found = true;
            stats.copied += usize::from(copy_file(&from, &to)?);
        } else {
            tracing::debug!(entry = %from.display(), "skipping missing entry");
        }
    }

    Ok(found.then_some(stats))
}

/// Make `dest` an exact copy of `source`, apart from excluded names
pub fn mirror_dir(source: &Path, dest: &Path, exclude: &[&str]) -> io::Result<CopyStats> {
    let is_excluded = |name: &std::ffi::OsStr| exclude.iter().any(|e| name == *e);
    let mut stats = CopyStats::default();

    clear_non_dir(dest)?;
    fs::create_dir_all(dest)?;

    let mut seen: HashSet<PathBuf> = HashSet::new();
    let walker = WalkDir::new(source)
        .follow_links(true)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !is_excluded(e.file_name()));

    for entry in walker {
        let entry = entry.map_err(io::Error::other)?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(io::Error::other)?
            .to_path_buf();
        let target = dest.join(&relative);

        if entry.file_type().is_dir() {
            clear_non_dir(&target)?;
            fs::create_dir_all(&target)?;
        } else {
            stats.copied += usize::from(copy_file(entry.path(), &target)?);
        }
        seen.insert(relative);
    }

    // Remove what the source no longer has. Children come before parents,
    // so excluded paths are matched on every component, not pruned.
    let stale = WalkDir::new(dest).min_depth(1).contents_first(true);

    for entry in stale {
        let entry = entry.map_err(io::Error::other)?;
        let relative = entry.path().strip_prefix(dest).map_err(io::Error::other)?;
        if seen.contains(relative) || relative.components().any(|c| is_excluded(c.as_os_str())) {
            continue;
        }
        if entry.file_type().is_dir() {
            // Kept when it still holds excluded entries
            if fs::read_dir(entry.path())?.next().is_none() {
                fs::remove_dir(entry.path())?;
            }
        } else {
            fs::remove_file(entry.path())?;
            stats.removed += 1;
        }
    }

    Ok(stats)
}

/// Copy one file, creating parent directories and replacing whatever
/// currently sits at `dest` (directory or symlink) instead of writing
/// through it.
///
/// Returns `false` without writing when `source` already resolves to
/// `dest`: copying a file onto itself truncates it.
pub fn copy_file(source: &Path, dest: &Path) -> io::Result<bool> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    if let Ok(meta) = fs::symlink_metadata(dest) {
        if meta.file_type().is_symlink() {
            fs::remove_file(dest)?;
        } else if meta.is_dir() {
            fs::remove_dir_all(dest)?;
        }
    }

    if same_location(source, dest) {
        tracing::debug!(path = %dest.display(), "source already resolves to destination");
        return Ok(false);
    }

    fs::copy(source, dest)?;
    Ok(true)
}

/// Whether both paths exist and resolve to the same place on disk,
/// e.g. a home dotfile symlinked into the repository
pub fn same_location(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Remove a file or symlink sitting where a directory should be
fn clear_non_dir(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if !meta.is_dir() => fs::remove_file(path),
        _ => Ok(()),
    }
}
