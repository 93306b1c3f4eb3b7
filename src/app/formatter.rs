use crate::app::language::LanguageResolver;
use crate::app::models::{RenderOptions, SourceFile};
use std::path::MAIN_SEPARATOR;

pub struct LatexGenerator;

impl LatexGenerator {
    /// Builds the appendix: an optional `\section` followed by one listing
    /// block per file, in the order given. Blocks are separated by one empty
    /// line and the document has no trailing newline.
    pub fn generate(files: &[SourceFile], options: &RenderOptions) -> String {
        let resolver =
            LanguageResolver::new(options.language_override.as_deref(), &options.lang_map);
        let mut blocks = Vec::with_capacity(files.len() + 1);

        if !options.section_title.is_empty() {
            blocks.push(format!("\\section{{{}}}", options.section_title));
        }

        for file in files {
            let path = &file.relative_path;
            blocks.push(format!(
                "\\newpage\n\\label{{sec:{}}}\n\\subsection{{{}}}\n\\inputminted{{{}}}{{{}/{}}}",
                Self::label_for(path),
                Self::escape_underscores(path),
                resolver.resolve(path),
                options.folder,
                path
            ));
        }

        blocks.join("\n\n")
    }

    /// Two paths that differ only in `.` vs separator map to the same label;
    /// LaTeX reports the duplicate.
    pub fn label_for(path: &str) -> String {
        path.chars()
            .map(|c| match c {
                '.' | '/' => '_',
                c if c == MAIN_SEPARATOR => '_',
                c => c,
            })
            .collect()
    }

    pub fn escape_underscores(path: &str) -> String {
        path.replace('_', "\\_")
    }
}
