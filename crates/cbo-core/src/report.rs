//! Rendering of diagnostics and run-wide counts.

use serde::Serialize;
use std::io::{self, Write};

use crate::file::SourceFile;

/// Write one block per diagnostic of `file`:
/// `path:line Message.` then the related line if any, then the offending line.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render(file: &SourceFile, out: &mut dyn Write) -> io::Result<()> {
    for diag in file.diagnostics() {
        writeln!(out, "{}:{} {}.", file.path(), diag.line, diag.rule.message())?;
        if let Some(related) = diag
            .related_line
            .and_then(|line| file.line(line.saturating_sub(1)))
        {
            writeln!(out, "{}", related.text())?;
        }
        if let Some(line) = file.line(diag.index()) {
            writeln!(out, "{}", line.text())?;
        }
    }
    Ok(())
}

/// Counts aggregated over every file of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Files supplied to the run, loaded or not.
    pub files: usize,
    /// Files that failed to load or raised at least one diagnostic.
    pub files_with_errors: usize,
    pub load_failures: usize,
    /// Diagnostics over all files.
    pub errors: usize,
}

impl Tally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, file: &SourceFile) {
        self.files += 1;
        let errors = file.diagnostics().len();
        if errors > 0 {
            self.files_with_errors += 1;
            self.errors += errors;
        }
    }

    pub const fn record_load_failure(&mut self) {
        self.files += 1;
        self.files_with_errors += 1;
        self.load_failures += 1;
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.files_with_errors == 0
    }

    /// Exit code for the process: 0 on success, 1 otherwise.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        if self.success() { 0 } else { 1 }
    }

    /// One-line summary of the run.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.success() {
            return format!("All {} file(s) were checked successfully.", self.files);
        }
        let mut text = format!(
            "{} error(s) in {} out of {} file(s).",
            self.errors, self.files_with_errors, self.files
        );
        if self.load_failures > 0 {
            text.push_str(&format!(" {} file(s) could not be loaded.", self.load_failures));
        }
        text
    }
}
