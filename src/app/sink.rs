use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const TEX_EXTENSION: &str = ".tex";

/// Where the generated document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Console,
    File(PathBuf),
}

impl Destination {
    /// File destination with the `.tex` extension enforced.
    pub fn file(path: &Path) -> Self {
        Destination::File(normalize_output_path(path))
    }

    pub fn from_output(output: Option<PathBuf>) -> Self {
        match output {
            Some(path) => Destination::file(&path),
            None => Destination::Console,
        }
    }
}

/// Appends `.tex` unless the path already ends with it.
pub fn normalize_output_path(path: &Path) -> PathBuf {
    if path.to_string_lossy().ends_with(TEX_EXTENSION) {
        return path.to_path_buf();
    }
    let mut raw = path.as_os_str().to_os_string();
    raw.push(TEX_EXTENSION);
    PathBuf::from(raw)
}

/// Delivers the document. Write failures are reported and turned into
/// `false`; they never abort the program.
pub fn emit(document: &str, destination: &Destination) -> bool {
    match destination {
        Destination::Console => {
            println!("{}", document);
            true
        }
        Destination::File(path) => match write_document(document, path) {
            Ok(()) => {
                log::info!("LaTeX code saved to: {}", path.display());
                true
            }
            Err(err) => {
                log::error!("Error saving to file: {:#}", err);
                false
            }
        },
    }
}

fn write_document(document: &str, path: &Path) -> Result<()> {
    fs::write(path, document).context(format!("Failed to write {}", path.display()))
}
