#![warn(rust_2024_compatibility, clippy::all)]

//! Core model of the CBo style checker: lines, files, the structural scanner,
//! indent inference and the regime that runs rules over a file.

pub mod config;
pub mod diagnostic;
pub mod file;
pub mod indent;
pub mod line;
pub mod preprocessor;
pub mod report;
pub mod scanner;

pub use config::{CboConfig, ConfigError, StyleSettings};
pub use diagnostic::{Diagnostic, Diagnostics, RuleKind};
pub use file::{FileType, LoadError, MAX_LINE_BUFFER, SourceFile};
pub use line::Line;
pub use report::Tally;

/// A single style check. Implementations never stop at the first violation.
pub trait Rule: Send + Sync {
    fn kind(&self) -> RuleKind;

    /// Scan `file` and return every violation found.
    fn check(&self, file: &SourceFile, settings: &StyleSettings) -> Diagnostics;

    /// Only run when every earlier rule passed on the file.
    fn requires_clean_file(&self) -> bool {
        false
    }
}

/// Boxed rule for dynamic dispatch.
pub type BoxRule = Box<dyn Rule>;

/// The Regime: owns rule instances and enforces them, in order, over files.
pub struct Regime {
    rules: Vec<BoxRule>,
    settings: StyleSettings,
}

impl Default for Regime {
    fn default() -> Self {
        Self::new(StyleSettings::default())
    }
}

impl Regime {
    #[must_use]
    pub const fn new(settings: StyleSettings) -> Self {
        Self {
            rules: Vec::new(),
            settings,
        }
    }

    #[must_use]
    pub fn with_rule(mut self, rule: BoxRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn add_rule(&mut self, rule: BoxRule) {
        self.rules.push(rule);
    }

    #[must_use]
    pub const fn settings(&self) -> &StyleSettings {
        &self.settings
    }

    /// Rule kinds in the order they run.
    pub fn kinds(&self) -> impl Iterator<Item = RuleKind> + '_ {
        self.rules.iter().map(|rule| rule.kind())
    }

    /// Run every enabled rule over `file` and record the diagnostics on it.
    ///
    /// Previous diagnostics are discarded first, so enforcing twice gives the
    /// same result. Files of unknown type are left untouched. Returns whether
    /// the file passed every rule that ran.
    pub fn enforce(&self, file: &mut SourceFile) -> bool {
        file.clear_diagnostics();
        if !file.file_type().is_checked() {
            tracing::debug!("skipping {} ({})", file.path(), file.file_type());
            return true;
        }

        let mut success = true;
        for rule in &self.rules {
            let kind = rule.kind();
            if !self.settings.is_enabled(kind) || (rule.requires_clean_file() && !success) {
                continue;
            }
            let diags = rule.check(file, &self.settings);
            tracing::trace!("{}: {kind} raised {}", file.path(), diags.len());
            success &= diags.is_empty();
            for diag in diags {
                file.add_diagnostic(diag);
            }
        }
        tracing::debug!(
            "checked {}: {} diagnostic(s)",
            file.path(),
            file.diagnostics().len()
        );
        success
    }
}
