use crate::app::cli::Cli;
use crate::app::language::{normalize_extension, parse_lang_map};
use crate::app::models::{RenderOptions, RuntimeConfig};
use crate::app::scanner::{DEFAULT_EXCLUDE_PREFIXES, DEFAULT_EXTENSIONS};
use crate::app::sink::Destination;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_FOLDER: &str = "Kode";

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
struct PresetConfig {
    folder: Option<String>,
    section: Option<String>,
    language_override: Option<String>,
    extensions: Option<Vec<String>>,
    exclude_prefixes: Option<Vec<String>>,
    exclude_files: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    lang_map: Option<BTreeMap<String, String>>,
}

fn default_presets_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("texcode").join("presets.toml"))
}

/// Without a presets location (no `--presets-file` and no home directory)
/// there are simply no presets.
fn load_presets(path: Option<&Path>) -> Result<HashMap<String, PresetConfig>> {
    match path {
        Some(path) => load_presets_file(path),
        None => {
            log::debug!("Could not determine home directory, presets disabled");
            Ok(HashMap::new())
        }
    }
}

fn load_presets_file(path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(path)
        .context(format!("Failed to read presets at {:?}", path))?;

    let parsed: PresetsFile = toml::from_str(&content)
        .context(format!("Failed to parse {:?}", path))?;

    Ok(parsed.presets)
}

fn merge_vecs(preset_vec: Option<Vec<String>>, cli_vec: Option<Vec<String>>) -> Vec<String> {
    let mut combined = preset_vec.unwrap_or_default();
    if let Some(mut cli_items) = cli_vec {
        combined.append(&mut cli_items);
    }
    // Deduplicate while keeping order
    let mut seen = std::collections::HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

fn defaults(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Extensions keep their case (matching is case-sensitive) but always get a dot.
fn dotted(ext: String) -> String {
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}

pub fn resolve_config(cli: Cli) -> Result<RuntimeConfig> {
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let presets_path = cli.presets_file.or_else(default_presets_path);
    let presets = load_presets(presets_path.as_deref())?;

    // Determine preset to use: CLI flag > Auto-detect > None
    let project_name = root
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()));
    let preset_key = cli.preset.as_deref().or(project_name.as_deref());
    if let Some(name) = cli.preset.as_deref() {
        if !presets.contains_key(name) {
            match presets_path.as_deref() {
                Some(path) => log::warn!("Preset '{}' not found in {}", name, path.display()),
                None => log::warn!("Preset '{}' not found: no presets file", name),
            }
        }
    }
    let preset = preset_key
        .and_then(|k| presets.get(k))
        .cloned()
        .unwrap_or_default();

    let extensions = if preset.extensions.is_none() && cli.extensions.is_none() {
        defaults(DEFAULT_EXTENSIONS)
    } else {
        merge_vecs(preset.extensions, cli.extensions)
            .into_iter()
            .map(dotted)
            .collect()
    };

    let exclude_prefixes = merge_vecs(
        Some(defaults(DEFAULT_EXCLUDE_PREFIXES)),
        Some(merge_vecs(preset.exclude_prefixes, cli.exclude_prefixes)),
    );

    let mut lang_map: BTreeMap<String, String> = preset
        .lang_map
        .unwrap_or_default()
        .into_iter()
        .map(|(ext, lang)| (normalize_extension(&ext), lang))
        .collect();
    if let Some(spec) = cli.lang_map.as_deref() {
        lang_map.extend(parse_lang_map(spec));
    }

    let render = RenderOptions {
        section_title: cli.section.or(preset.section).unwrap_or_default(),
        folder: cli
            .folder
            .or(preset.folder)
            .unwrap_or_else(|| DEFAULT_FOLDER.to_string()),
        language_override: cli
            .language_override
            .or(preset.language_override)
            .filter(|lang| !lang.is_empty()),
        lang_map,
    };

    Ok(RuntimeConfig {
        root,
        extensions,
        exclude_prefixes,
        exclude_files: merge_vecs(preset.exclude_files, cli.exclude_files),
        exclude: merge_vecs(preset.exclude, cli.exclude),
        render,
        destination: Destination::from_output(cli.output),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    const PRESETS: &str = r#"
[thesis]
folder = "Vedlegg/Kode"
section = "Kildekode"
extensions = ["rs", ".toml"]
exclude_files = ["build.rs"]
exclude_prefixes = ["test"]

[thesis.lang_map]
RS = "rust"
".toml" = "ini"

[plain]
language_override = "text"
"#;

    fn cli(tmp: &TempDir, extra: &[&str]) -> Cli {
        let presets = tmp.path().join("presets.toml");
        fs::write(&presets, PRESETS).unwrap();

        let mut args = vec![
            "texcode".to_string(),
            "--root".to_string(),
            tmp.path().display().to_string(),
            "--presets-file".to_string(),
            presets.display().to_string(),
        ];
        args.extend(extra.iter().map(|s| s.to_string()));
        Cli::parse_from(args)
    }

    #[test]
    fn defaults_without_preset() {
        let tmp = TempDir::new().unwrap();
        let config = resolve_config(cli(&tmp, &[])).unwrap();

        assert_eq!(config.extensions, defaults(DEFAULT_EXTENSIONS));
        assert_eq!(config.exclude_prefixes, defaults(DEFAULT_EXCLUDE_PREFIXES));
        assert_eq!(config.render.folder, DEFAULT_FOLDER);
        assert_eq!(config.render.section_title, "");
        assert_eq!(config.render.language_override, None);
        assert_eq!(config.destination, Destination::Console);
    }

    #[test]
    fn preset_values_fill_in_and_cli_wins() {
        let tmp = TempDir::new().unwrap();
        let config = resolve_config(cli(
            &tmp,
            &[
                "--preset",
                "thesis",
                "--section",
                "Appendix",
                "--lang-map",
                ".rs=rust2021",
                "--ext",
                "py",
            ],
        ))
        .unwrap();

        assert_eq!(config.render.folder, "Vedlegg/Kode");
        assert_eq!(config.render.section_title, "Appendix");
        assert_eq!(config.extensions, vec![".rs", ".toml", ".py"]);
        assert_eq!(config.exclude_files, vec!["build.rs"]);
        assert_eq!(config.exclude_prefixes, vec!["_", ".", "cmake", "test"]);
        assert_eq!(config.render.lang_map.get(".rs").map(String::as_str), Some("rust2021"));
        assert_eq!(config.render.lang_map.get(".toml").map(String::as_str), Some("ini"));
    }

    #[test]
    fn empty_language_override_is_unset() {
        let tmp = TempDir::new().unwrap();
        let config = resolve_config(cli(&tmp, &["--language-override", ""])).unwrap();
        assert_eq!(config.render.language_override, None);

        let config = resolve_config(cli(&tmp, &["--preset", "plain"])).unwrap();
        assert_eq!(config.render.language_override.as_deref(), Some("text"));
    }

    #[test]
    fn output_path_gets_tex_extension() {
        let tmp = TempDir::new().unwrap();
        let config = resolve_config(cli(&tmp, &["-o", "vedlegg"])).unwrap();
        assert_eq!(config.destination, Destination::File(PathBuf::from("vedlegg.tex")));
    }

    #[test]
    fn no_presets_location_means_no_presets() {
        assert!(load_presets(None).unwrap().is_empty());
    }

    #[test]
    fn missing_presets_file_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(load_presets_file(&tmp.path().join("nope.toml")).unwrap().is_empty());
    }

    #[test]
    fn broken_presets_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("presets.toml");
        fs::write(&path, "[thesis]\nfolder = 3\n").unwrap();
        assert!(load_presets_file(&path).is_err());
    }
}
