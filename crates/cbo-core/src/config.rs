//! Configuration loading for .cbo.toml

use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::diagnostic::RuleKind;

pub const DEFAULT_CONFIG_FILE: &str = ".cbo.toml";
pub const DEFAULT_MAX_LINE_LENGTH: usize = 79;
pub const DEFAULT_INDENT_WIDTH: usize = 2;

/// Root configuration from .cbo.toml
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CboConfig {
    #[serde(default)]
    pub style: StyleSettings,
}

/// Settings consumed by the rules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(default)]
#[garde(context(()))]
pub struct StyleSettings {
    #[garde(custom(validate_max_line_length))]
    pub max_line_length: usize,
    /// Columns per indent level.
    #[garde(custom(validate_indent_width))]
    pub indent_width: usize,
    /// Rule identifiers that never run.
    #[garde(custom(validate_rule_ids))]
    pub disabled: Vec<String>,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            indent_width: DEFAULT_INDENT_WIDTH,
            disabled: Vec::new(),
        }
    }
}

impl StyleSettings {
    #[must_use]
    pub fn is_enabled(&self, kind: RuleKind) -> bool {
        !self.disabled.iter().any(|id| id == kind.id())
    }

    /// Check ranges and rule identifiers.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` describing the failing fields.
    pub fn ensure_valid(&self) -> Result<(), ConfigError> {
        self.validate()
            .map_err(|e| ConfigError::Validation(format!("style: {e}")))
    }

    /// Indent level converted to columns.
    #[must_use]
    pub const fn columns(&self, level: usize) -> usize {
        level * self.indent_width
    }
}

// ============================================================================
// Custom Validators
// Note: garde passes `&T` and `&()` - clippy lints suppressed
// ============================================================================

#[allow(clippy::trivially_copy_pass_by_ref)]
fn validate_max_line_length(value: &usize, _ctx: &()) -> garde::Result {
    if (40..=500).contains(value) {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "{value} is outside the range 40-500 - common values are 79, 100, or 120"
        )))
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn validate_indent_width(value: &usize, _ctx: &()) -> garde::Result {
    if (1..=16).contains(value) {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "{value} is outside the range 1-16 - common values are 2, 4, or 8"
        )))
    }
}

#[allow(clippy::trivially_copy_pass_by_ref, clippy::ptr_arg)]
fn validate_rule_ids(value: &Vec<String>, _ctx: &()) -> garde::Result {
    match value.iter().find(|id| RuleKind::from_id(id).is_none()) {
        Some(id) => Err(garde::Error::new(format!(
            "'{id}' is not a known rule - try e.g. 'line-too-long' or 'bad-indent'"
        ))),
        None => Ok(()),
    }
}

// ============================================================================
// Config Error
// ============================================================================

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config read error: {0}")]
    Io(String),
    #[error("config parse error: {0}")]
    Parse(String),
    #[error("config validation error: {0}")]
    Validation(String),
}

// ============================================================================
// Config Loading
// ============================================================================

impl CboConfig {
    /// Parse and validate configuration text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the TOML content is invalid.
    /// Returns `ConfigError::Validation` if style settings fail validation.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.style.ensure_valid()?;
        Ok(config)
    }

    /// Load configuration from a TOML file with validation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise the
    /// errors of [`Self::from_toml`].
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Load from default location, returning error details on failure.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` with details if loading or validation fails.
    pub fn load_default_strict() -> Result<Option<Self>, ConfigError> {
        let cwd = std::env::current_dir().map_err(|e| ConfigError::Io(e.to_string()))?;
        let config_path = cwd.join(DEFAULT_CONFIG_FILE);

        if !config_path.exists() {
            return Ok(None);
        }

        Self::from_file(&config_path).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_config() {
        let toml = r#"
format = "json"

[style]
max_line_length = 100
indent_width = 4
disabled = ["multiple-args-per-line", "unaligned-args"]
"#;
        let config = CboConfig::from_toml(toml).unwrap();
        assert_eq!(config.style.max_line_length, 100);
        assert_eq!(config.style.indent_width, 4);
        assert!(!config.style.is_enabled(RuleKind::MultipleArgsPerLine));
        assert!(config.style.is_enabled(RuleKind::BadIndent));
        assert_eq!(config.style.columns(3), 12);
    }

    #[test]
    fn missing_style_table_uses_defaults() {
        let config = CboConfig::from_toml("").unwrap();
        assert_eq!(config.style, StyleSettings::default());
        assert_eq!(config.style.max_line_length, 79);
        assert_eq!(config.style.indent_width, 2);
    }

    #[test]
    fn partial_style_table_keeps_other_defaults() {
        let config = CboConfig::from_toml("[style]\nindent_width = 3\n").unwrap();
        assert_eq!(config.style.indent_width, 3);
        assert_eq!(config.style.max_line_length, DEFAULT_MAX_LINE_LENGTH);
    }

    #[test]
    fn rejects_invalid_max_line_length() {
        let settings = StyleSettings {
            max_line_length: 10,
            ..Default::default()
        };
        let err = settings.validate().unwrap_err().to_string();
        assert!(err.contains("40-500"));
    }

    #[test]
    fn rejects_indent_width_out_of_range() {
        let err = CboConfig::from_toml("[style]\nindent_width = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("1-16"));
    }

    #[test]
    fn ensure_valid_checks_overrides() {
        let mut settings = StyleSettings::default();
        assert!(settings.ensure_valid().is_ok());
        settings.max_line_length = 1000;
        assert!(matches!(
            settings.ensure_valid(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn rejects_unknown_rule_id() {
        let err = CboConfig::from_toml("[style]\ndisabled = [\"no-tabs\"]\n").unwrap_err();
        assert!(err.to_string().contains("no-tabs"));
    }

    #[test]
    fn rejects_negative_value_at_parse() {
        let err = CboConfig::from_toml("[style]\nmax_line_length = -3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn from_file_reports_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = CboConfig::from_file(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
