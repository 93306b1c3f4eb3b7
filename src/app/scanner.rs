use crate::app::models::{RuntimeConfig, SourceFile};
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, WalkBuilder};
use pathdiff::diff_paths;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Extensions listed when neither CLI nor preset names any.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".c", ".cpp", ".h", ".hpp", ".py"];

/// Name prefixes that are always skipped, for directories and files alike.
pub const DEFAULT_EXCLUDE_PREFIXES: &[&str] = &["_", ".", "cmake"];

pub struct Scanner {
    root: PathBuf,
    extensions: Vec<String>,
    exclude_prefixes: Arc<[String]>,
    exclude_files: HashSet<String>,
    exclude_set: Arc<GlobSet>,
}

impl Scanner {
    pub fn new(root: PathBuf, config: &RuntimeConfig) -> Result<Self> {
        Ok(Self {
            root,
            extensions: config.extensions.clone(),
            exclude_prefixes: config.exclude_prefixes.clone().into(),
            exclude_files: config.exclude_files.iter().cloned().collect(),
            exclude_set: Arc::new(build_globset(&config.exclude)?),
        })
    }

    /// Walks the root and returns every matching file sorted by relative path.
    /// Traversal errors abort the scan.
    pub fn scan(&self) -> Result<Vec<SourceFile>> {
        let mut entries = Vec::new();

        let prefixes = Arc::clone(&self.exclude_prefixes);
        let exclude_set = Arc::clone(&self.exclude_set);
        let root = self.root.clone();

        // Only our own rules apply: no gitignore, no hidden-file handling.
        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .filter_entry(move |entry| keep_directory(entry, &root, &prefixes, &exclude_set))
            .build();

        for result in walker {
            let entry = result
                .with_context(|| format!("Failed to walk {}", self.root.display()))?;

            if !entry.path().is_file() {
                continue;
            }

            if let Some(file) = self.process_entry(entry.path()) {
                entries.push(file);
            }
        }

        entries.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(entries)
    }

    fn process_entry(&self, path: &Path) -> Option<SourceFile> {
        let name = path.file_name()?.to_string_lossy();

        if !self.extensions.iter().any(|ext| name.ends_with(ext.as_str())) {
            return None;
        }
        if has_excluded_prefix(&name, &self.exclude_prefixes) {
            return None;
        }
        if self.exclude_files.contains(name.as_ref()) {
            return None;
        }

        let relative = diff_paths(path, &self.root)?;
        if self.exclude_set.is_match(&relative) {
            return None;
        }

        Some(SourceFile {
            path: path.to_path_buf(),
            relative_path: relative.to_string_lossy().to_string(),
        })
    }
}

/// Decides whether the walker descends into a directory. Files always pass
/// here and are filtered in `process_entry`.
fn keep_directory(
    entry: &DirEntry,
    root: &Path,
    prefixes: &[String],
    exclude_set: &GlobSet,
) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_dir()) {
        return true;
    }

    let name = entry.file_name().to_string_lossy();
    if has_excluded_prefix(&name, prefixes) {
        log::debug!("Skipping directory {}", entry.path().display());
        return false;
    }

    match diff_paths(entry.path(), root) {
        Some(relative) => !exclude_set.is_match(relative),
        None => true,
    }
}

fn has_excluded_prefix(name: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| name.starts_with(prefix.as_str()))
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        builder.add(Glob::new(pat).context(format!("Invalid glob pattern: {}", pat))?);
    }
    Ok(builder.build()?)
}
