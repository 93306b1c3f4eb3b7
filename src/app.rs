// Declare modules
pub mod cli;
pub mod config;
pub mod formatter;
pub mod language;
pub mod models;
pub mod scanner;
pub mod sink;

use anyhow::Result;
use clap::Parser;

use self::cli::Cli;
use self::config::resolve_config;
use self::formatter::LatexGenerator;
use self::scanner::Scanner;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Resolve Configuration
    let config = resolve_config(args)?;
    log::debug!("Resolved configuration: {:?}", config);

    // 3. Scan Directory
    let scanner = Scanner::new(config.root.clone(), &config)?;
    let files = scanner.scan()?;

    if files.is_empty() {
        log::warn!("No source files found under {}", config.root.display());
    } else {
        log::info!("Found {} source files", files.len());
    }
    for file in &files {
        log::debug!("Listing {}", file.path.display());
    }

    // 4. Generate LaTeX
    let document = LatexGenerator::generate(&files, &config.render);

    // 5. Deliver. A failed write is already reported and keeps exit status 0.
    sink::emit(&document, &config.destination);

    Ok(())
}
