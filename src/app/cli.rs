use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate LaTeX minted listings for the source files of a project"
)]
pub struct Cli {
    /// Directory to scan (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Output .tex file (if not specified, prints to console)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Folder name used in front of every path in the LaTeX (default: Kode)
    #[arg(long)]
    pub folder: Option<String>,

    /// Section title (if empty, no section is added)
    #[arg(long)]
    pub section: Option<String>,

    /// Force one minted language for every file (e.g. 'cpp' or 'python')
    #[arg(long)]
    pub language_override: Option<String>,

    /// Per-extension languages, e.g. '.h=cpp,.py=python'
    #[arg(long)]
    pub lang_map: Option<String>,

    /// File extensions to include (replaces the defaults)
    #[arg(long = "ext", num_args = 1..)]
    pub extensions: Option<Vec<String>>,

    /// Extra name prefixes for files and directories to skip
    #[arg(long = "exclude-prefix", num_args = 1..)]
    pub exclude_prefixes: Option<Vec<String>>,

    /// File names to skip
    #[arg(long = "exclude-file", num_args = 1..)]
    pub exclude_files: Option<Vec<String>>,

    /// Glob patterns (relative to the root) for files or directories to skip
    #[arg(long, num_args = 1..)]
    pub exclude: Option<Vec<String>>,

    /// Use a predefined set of options from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Read presets from this file instead of ~/.config/texcode/presets.toml
    #[arg(long)]
    pub presets_file: Option<PathBuf>,
}
