//! Yearly export discovery

use bora_types::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Check if a file name looks like a yearly export (`2024y.csv`, `2024y.xlsx`)
pub fn is_source_file<S: AsRef<str>>(path: &Path, suffixes: &[S]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let name = name.to_lowercase();
    suffixes
        .iter()
        .any(|suffix| name.ends_with(&suffix.as_ref().to_lowercase()))
}

/// Find yearly exports directly inside `dir`, sorted by file name so merge
/// runs see the same order every time
pub fn scan_source_files<S: AsRef<str>>(dir: &Path, suffixes: &[S]) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::FileNotFound(dir.display().to_string()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_source_file(p, suffixes))
        .collect();

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
