//! Configuration file loading and structures

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use cbo_core::config::DEFAULT_CONFIG_FILE;
use cbo_core::{CboConfig, StyleSettings};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::cli::{Args, OutputFormat};

/// Binary-level settings read from the same file as the style table.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ConfigFile {
    pub format: Option<OutputFormat>,
}

pub fn load_config(path: Option<&Utf8PathBuf>) -> Result<ConfigFile> {
    let config_path = path
        .cloned()
        .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CONFIG_FILE));

    if config_path.exists() {
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("cannot read config {config_path}"))?;
        Ok(toml::from_str(&content)?)
    } else {
        Ok(ConfigFile::default())
    }
}

/// Style settings from the config file with command line overrides applied.
pub fn resolve_settings(args: &Args) -> Result<StyleSettings> {
    let config = match args.config.as_deref() {
        Some(path) => Some(load_style_file(path)?),
        None => CboConfig::load_default_strict()?,
    };
    let mut settings = config.map(|c| c.style).unwrap_or_default();
    if let Some(max) = args.max_line_length {
        settings.max_line_length = max;
    }
    settings.ensure_valid()?;
    tracing::info!(
        "style: max_line_length={} indent_width={} disabled={:?}",
        settings.max_line_length,
        settings.indent_width,
        settings.disabled
    );
    Ok(settings)
}

fn load_style_file(path: &Utf8Path) -> Result<CboConfig> {
    CboConfig::from_file(path.as_std_path()).with_context(|| format!("invalid config {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(config: Option<Utf8PathBuf>, max_line_length: Option<usize>) -> Args {
        Args {
            paths: vec![Utf8PathBuf::from(".")],
            list_file: false,
            json: false,
            config,
            max_line_length,
        }
    }

    fn write_config(content: &str) -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("cbo.toml")).unwrap();
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn format_is_read_from_file() {
        let (_dir, path) = write_config("format = \"json\"\n[style]\nindent_width = 4\n");
        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.format, Some(OutputFormat::Json));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = load_config(Some(&Utf8PathBuf::from("/nonexistent/cbo.toml"))).unwrap();
        assert_eq!(cfg.format, None);
    }

    #[test]
    fn command_line_overrides_file() {
        let (_dir, path) = write_config("[style]\nmax_line_length = 100\nindent_width = 4\n");
        let settings = resolve_settings(&args(Some(path), Some(120))).unwrap();
        assert_eq!(settings.max_line_length, 120);
        assert_eq!(settings.indent_width, 4);
    }

    #[test]
    fn overrides_are_validated() {
        let (_dir, path) = write_config("");
        assert!(resolve_settings(&args(Some(path), Some(5))).is_err());
    }

    #[test]
    fn invalid_file_is_an_error() {
        let (_dir, path) = write_config("[style]\ndisabled = [\"nope\"]\n");
        let err = resolve_settings(&args(Some(path), None)).unwrap_err();
        assert!(format!("{err:#}").contains("nope"));
    }
}
