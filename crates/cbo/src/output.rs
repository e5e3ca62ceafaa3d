//! Output formatting and diagnostic display

use cbo_core::SourceFile;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SerializableDiagnostic {
    pub path: String,
    pub line: usize,
    pub rule: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_line: Option<usize>,
    /// The offending source line.
    pub text: String,
}

impl SerializableDiagnostic {
    pub fn from_file(file: &SourceFile) -> Vec<Self> {
        file.diagnostics()
            .iter()
            .map(|diag| Self {
                path: file.path().to_string(),
                line: diag.line,
                rule: diag.rule.id().to_string(),
                message: diag.rule.message().to_string(),
                related_line: diag.related_line,
                text: file
                    .line(diag.index())
                    .map(|line| line.text().to_string())
                    .unwrap_or_default(),
            })
            .collect()
    }
}

pub fn print_file_header(path: &str, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "=== Check file [{path}] ===")
}

pub fn print_file(file: &SourceFile, out: &mut dyn Write) -> io::Result<()> {
    print_file_header(file.path().as_str(), out)?;
    cbo_core::report::render(file, out)
}
