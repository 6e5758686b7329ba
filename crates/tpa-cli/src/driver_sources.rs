//! Source discovery and file reading.

use anyhow::{Context, Result, bail};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directories never descended into during discovery.
const SKIPPED_DIRECTORIES: &[&str] = &["bin", "obj", "node_modules"];

/// Result of reading a source file.
#[derive(Debug, Clone)]
pub enum FileReadResult {
    Text(String),
    /// Looks like binary content; not analyzed.
    Binary,
    /// The file could not be read (I/O error text).
    Error(String),
}

/// Read a source file, decoding UTF-16 when a BOM is present.
pub fn read_source_file(path: &Path) -> FileReadResult {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => return FileReadResult::Error(err.to_string()),
    };

    match bytes.as_slice() {
        [0xFE, 0xFF, rest @ ..] => {
            let words: Vec<u16> = rest
                .chunks_exact(2)
                .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
                .collect();
            return FileReadResult::Text(String::from_utf16_lossy(&words));
        }
        [0xFF, 0xFE, rest @ ..] => {
            let words: Vec<u16> = rest
                .chunks_exact(2)
                .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
                .collect();
            return FileReadResult::Text(String::from_utf16_lossy(&words));
        }
        _ => {}
    }

    if is_binary_file(&bytes) {
        return FileReadResult::Binary;
    }

    match String::from_utf8(bytes) {
        Ok(text) => FileReadResult::Text(text),
        Err(_) => FileReadResult::Binary,
    }
}

/// Heuristic binary check over the first kilobyte: null runs or stray control bytes.
pub fn is_binary_file(bytes: &[u8]) -> bool {
    if bytes.is_empty() {
        return false;
    }

    let head = &bytes[..bytes.len().min(1024)];
    if head.iter().filter(|&&b| b == 0).count() > 10 {
        return true;
    }

    let mut consecutive_nulls = 0;
    for &byte in head.iter().take(512) {
        if byte == 0 {
            consecutive_nulls += 1;
            if consecutive_nulls >= 4 {
                return true;
            }
        } else {
            consecutive_nulls = 0;
        }
    }

    let control_count = head
        .iter()
        .filter(|&&b| b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r' | b'\x0C' | b'\x0B'))
        .count();
    control_count >= 4
}

pub fn build_exclude_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("invalid exclude pattern '{pattern}'"))?;
        builder.add(glob);
    }
    builder.build().context("failed to build exclude patterns")
}

fn is_excluded(path: &Path, cwd: &Path, exclude: &GlobSet) -> bool {
    if exclude.is_empty() {
        return false;
    }
    let relative = path.strip_prefix(cwd).unwrap_or(path);
    exclude.is_match(relative) || exclude.is_match(path)
}

fn is_skipped_directory(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRECTORIES.contains(&name.as_ref())
}

fn is_csharp_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("cs"))
}

/// Collect the `.cs` files under `paths` (relative to `cwd`), sorted and deduplicated.
///
/// Explicit file arguments are kept regardless of extension; directories are
/// walked, skipping hidden, `bin` and `obj` directories.
pub fn discover_sources(paths: &[PathBuf], cwd: &Path, exclude: &GlobSet) -> Result<Vec<PathBuf>> {
    let roots: Vec<PathBuf> = if paths.is_empty() {
        vec![cwd.to_path_buf()]
    } else {
        paths
            .iter()
            .map(|path| if path.is_absolute() { path.clone() } else { cwd.join(path) })
            .collect()
    };

    let mut files = Vec::new();
    for root in roots {
        if root.is_file() {
            if !is_excluded(&root, cwd, exclude) {
                files.push(root);
            }
            continue;
        }
        if !root.is_dir() {
            bail!("path not found: {}", root.display());
        }

        for entry in WalkDir::new(&root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !is_skipped_directory(entry))
        {
            let entry =
                entry.with_context(|| format!("failed to walk {}", root.display()))?;
            let path = entry.path();
            if entry.file_type().is_file() && is_csharp_file(path) && !is_excluded(path, cwd, exclude)
            {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();
    tracing::debug!(count = files.len(), "discovered sources");
    Ok(files)
}

/// Display name for a path: relative to `cwd` when possible, with `/` separators.
pub fn display_name(path: &Path, cwd: &Path) -> String {
    let relative = path.strip_prefix(cwd).unwrap_or(path);
    relative.to_string_lossy().replace('\\', "/")
}
