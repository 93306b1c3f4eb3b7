use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::app::sink::Destination;

/// Represents the final configuration after merging presets and CLI args.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub extensions: Vec<String>,
    pub exclude_prefixes: Vec<String>,
    pub exclude_files: Vec<String>,
    pub exclude: Vec<String>,
    pub render: RenderOptions,
    pub destination: Destination,
}

/// Everything the LaTeX generator needs besides the file list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    /// Empty means no `\section` is emitted.
    pub section_title: String,
    pub folder: String,
    pub language_override: Option<String>,
    /// Keys are lowercase extensions with a leading dot.
    pub lang_map: BTreeMap<String, String>,
}

/// Represents a single source file discovered during the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub relative_path: String,
}
