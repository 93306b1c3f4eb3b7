use std::collections::BTreeMap;
use std::path::Path;

/// Identifier used when nothing else matches.
pub const PLAIN_TEXT: &str = "text";

/// Built-in extension -> minted language table.
pub const DEFAULT_LANGUAGES: &[(&str, &str)] = &[
    (".py", "python"),
    (".c", "c"),
    (".h", "c"),
    (".cpp", "cpp"),
    (".cc", "cpp"),
    (".cxx", "cpp"),
    (".hpp", "cpp"),
];

/// Picks the minted language for each listed file.
#[derive(Debug, Clone, Copy)]
pub struct LanguageResolver<'a> {
    global_override: Option<&'a str>,
    overrides: &'a BTreeMap<String, String>,
}

impl<'a> LanguageResolver<'a> {
    pub fn new(
        global_override: Option<&'a str>,
        overrides: &'a BTreeMap<String, String>,
    ) -> Self {
        Self {
            global_override: global_override.filter(|lang| !lang.is_empty()),
            overrides,
        }
    }

    pub fn resolve(&self, path: &str) -> &'a str {
        if let Some(lang) = self.global_override {
            return lang;
        }

        let Some(ext) = extension_of(path) else {
            return PLAIN_TEXT;
        };

        if let Some(lang) = self.overrides.get(&ext) {
            return lang.as_str();
        }

        DEFAULT_LANGUAGES
            .iter()
            .find(|(known, _)| *known == ext)
            .map(|(_, lang)| *lang)
            .unwrap_or(PLAIN_TEXT)
    }
}

/// Lowercased extension with its leading dot, `None` for names like `.bashrc`.
fn extension_of(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

/// Lowercases an extension and makes sure it starts with a dot.
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}

/// Parses `ext=language` pairs separated by commas. Entries without `=`
/// or with an empty side are skipped.
pub fn parse_lang_map(spec: &str) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();

    for entry in spec.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        let Some((ext, lang)) = entry.split_once('=') else {
            log::debug!("Skipping lang-map entry without '=': {}", entry);
            continue;
        };

        let (ext, lang) = (ext.trim(), lang.trim());
        if ext.is_empty() || ext == "." || lang.is_empty() {
            log::debug!("Skipping incomplete lang-map entry: {}", entry);
            continue;
        }

        map.insert(normalize_extension(ext), lang.to_string());
    }

    map
}
