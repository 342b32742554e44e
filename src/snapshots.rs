//! Snapshot discovery: find dated feed files already present in a local base directory.

use crate::locator::FeedLocator;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One dated feed file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub date: NaiveDate,
    pub path: PathBuf,
}

/// Glob for candidate names; the date itself is validated by the locator.
fn build_glob(prefix: &str) -> Result<globset::GlobMatcher> {
    let pattern = format!("{}*.json", globset::escape(prefix));
    Ok(globset::Glob::new(&pattern)
        .with_context(|| format!("invalid snapshot pattern: {}", pattern))?
        .compile_matcher())
}

/// List snapshots directly under `dir`, newest first. Ties (same date, both formats) sort by path.
/// A missing directory yields an empty list.
pub fn discover(dir: &Path, locator: &FeedLocator) -> Result<Vec<Snapshot>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let matcher = build_glob(&locator.prefix)?;
    let mut out = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let name = match entry.file_name().to_str() {
            Some(n) => n,
            None => continue,
        };
        if !matcher.is_match(name) {
            continue;
        }
        if let Some(date) = locator.date_of(name) {
            out.push(Snapshot {
                date,
                path: entry.path().to_path_buf(),
            });
        }
    }
    out.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.path.cmp(&b.path)));
    Ok(out)
}
