//! Source files, their lines and their diagnostics.

use camino::{Utf8Path, Utf8PathBuf};
use memchr::memchr_iter;
use serde::Serialize;
use std::fmt;

use crate::diagnostic::{Diagnostic, Diagnostics};
use crate::indent;
use crate::line::Line;
use crate::preprocessor;

/// Longest physical line the loader accepts, in bytes.
pub const MAX_LINE_BUFFER: usize = 1024;

/// Kind of file, derived from the extension only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileType {
    Unknown,
    CHeader,
    CBody,
}

impl FileType {
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension() {
            Some("h") => Self::CHeader,
            Some("c") => Self::CBody,
            _ => Self::Unknown,
        }
    }

    /// Rules only run against headers and bodies.
    #[must_use]
    pub const fn is_checked(self) -> bool {
        matches!(self, Self::CHeader | Self::CBody)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::CHeader => "C header",
            Self::CBody => "C body",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A file could not be turned into a [`SourceFile`]. Nothing of it is checked.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}:{line} is {len} bytes long, lines are limited to {max} bytes")]
    LineTooLong {
        path: Utf8PathBuf,
        line: usize,
        len: usize,
        max: usize,
    },
}

/// One loaded file: its ordered lines and the diagnostics raised against it.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: Utf8PathBuf,
    file_type: FileType,
    lines: Vec<Line>,
    diagnostics: Diagnostics,
}

impl SourceFile {
    /// Read `path` from disk. Invalid UTF-8 is replaced, not rejected.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Io` if the file cannot be read and
    /// `LoadError::LineTooLong` if any line exceeds [`MAX_LINE_BUFFER`].
    pub fn load(path: &Utf8Path) -> Result<Self, LoadError> {
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_source(path, &String::from_utf8_lossy(&bytes))
    }

    /// Split `source` into lines and run the per-file passes.
    ///
    /// A final line terminator does not start an extra empty line, and one
    /// trailing `\r` is stripped from each line.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::LineTooLong` if any line exceeds [`MAX_LINE_BUFFER`].
    pub fn from_source(path: impl Into<Utf8PathBuf>, source: &str) -> Result<Self, LoadError> {
        let path = path.into();
        let bytes = source.as_bytes();

        let mut texts: Vec<&str> = Vec::new();
        let mut line_start = 0;
        for nl in memchr_iter(b'\n', bytes) {
            texts.push(strip_cr(&source[line_start..nl]));
            line_start = nl + 1;
        }
        if line_start < bytes.len() {
            texts.push(strip_cr(&source[line_start..]));
        }

        for (idx, text) in texts.iter().enumerate() {
            if text.len() > MAX_LINE_BUFFER {
                return Err(LoadError::LineTooLong {
                    path,
                    line: idx + 1,
                    len: text.len(),
                    max: MAX_LINE_BUFFER,
                });
            }
        }

        let flags = preprocessor::classify_lines(&texts);
        let mut lines: Vec<Line> = texts
            .iter()
            .zip(flags)
            .map(|(text, flag)| {
                let mut line = Line::new(*text);
                line.set_preprocessor(flag);
                line
            })
            .collect();
        let levels = indent::expected_indents(&lines);
        for (line, level) in lines.iter_mut().zip(levels) {
            line.set_expected_indent(level);
        }

        Ok(Self {
            file_type: FileType::from_path(&path),
            path,
            lines,
            diagnostics: Diagnostics::new(),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    #[must_use]
    pub const fn file_type(&self) -> FileType {
        self.file_type
    }

    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    #[must_use]
    pub fn is_preprocessor_line(&self, index: usize) -> bool {
        self.lines.get(index).is_some_and(Line::is_preprocessor)
    }

    /// Diagnostics sorted by line; same-line diagnostics keep insertion order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        let at = self
            .diagnostics
            .partition_point(|existing| existing.line <= diagnostic.line);
        self.diagnostics.insert(at, diagnostic);
    }

    pub fn clear_diagnostics(&mut self) {
        self.diagnostics.clear();
    }
}

fn strip_cr(text: &str) -> &str {
    text.strip_suffix('\r').unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::RuleKind;

    #[test]
    fn file_type_from_extension() {
        assert_eq!(FileType::from_path(Utf8Path::new("a/b.h")), FileType::CHeader);
        assert_eq!(FileType::from_path(Utf8Path::new("b.c")), FileType::CBody);
        assert_eq!(FileType::from_path(Utf8Path::new("b.cpp")), FileType::Unknown);
        assert_eq!(FileType::from_path(Utf8Path::new("Makefile")), FileType::Unknown);
        assert!(!FileType::Unknown.is_checked());
    }

    #[test]
    fn splits_lines_without_trailing_empty_line() {
        let file = SourceFile::from_source("x.c", "int x;\r\nint y;\n").unwrap();
        let texts: Vec<&str> = file.lines().iter().map(Line::text).collect();
        assert_eq!(texts, vec!["int x;", "int y;"]);

        let file = SourceFile::from_source("x.c", "a\n\n").unwrap();
        assert_eq!(file.lines().len(), 2);

        let file = SourceFile::from_source("x.c", "no newline").unwrap();
        assert_eq!(file.lines().len(), 1);
    }

    #[test]
    fn overlong_line_is_a_load_error() {
        let source = format!("int x;\n{}\n", "y".repeat(MAX_LINE_BUFFER + 1));
        let err = SourceFile::from_source("big.c", &source).unwrap_err();
        assert!(matches!(err, LoadError::LineTooLong { line: 2, .. }));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("absent.c")).unwrap();
        assert!(matches!(
            SourceFile::load(&path),
            Err(LoadError::Io { .. })
        ));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("ok.h")).unwrap();
        std::fs::write(&path, "int x;\n").unwrap();
        let file = SourceFile::load(&path).unwrap();
        assert_eq!(file.file_type(), FileType::CHeader);
        assert_eq!(file.lines().len(), 1);
    }

    #[test]
    fn passes_are_cached_per_line() {
        let file = SourceFile::from_source("m.c", "#define A \\\n  1\nint f() {\n\n}\n").unwrap();
        assert!(file.is_preprocessor_line(0));
        assert!(file.is_preprocessor_line(1));
        assert!(!file.is_preprocessor_line(2));
        assert!(!file.is_preprocessor_line(99));
        let levels: Vec<usize> = file.lines().iter().map(Line::expected_indent).collect();
        assert_eq!(levels, vec![0, 0, 0, 1, 0]);
    }

    #[test]
    fn diagnostics_stay_sorted_and_stable() {
        let mut file = SourceFile::from_source("s.c", "a\nb\nc\n").unwrap();
        file.add_diagnostic(Diagnostic::new(RuleKind::BadIndent, 2));
        file.add_diagnostic(Diagnostic::new(RuleKind::LineTooLong, 0));
        file.add_diagnostic(Diagnostic::new(RuleKind::TabIndent, 2));
        file.add_diagnostic(Diagnostic::new(RuleKind::TrailingWhitespace, 1));
        let order: Vec<(usize, RuleKind)> =
            file.diagnostics().iter().map(|d| (d.line, d.rule)).collect();
        assert_eq!(
            order,
            vec![
                (1, RuleKind::LineTooLong),
                (2, RuleKind::TrailingWhitespace),
                (3, RuleKind::BadIndent),
                (3, RuleKind::TabIndent),
            ]
        );
    }
}
