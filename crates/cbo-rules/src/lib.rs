#![warn(rust_2024_compatibility, clippy::all)]

//! The CBo rule set: every style check run against C sources and headers.

mod args;
mod blanks;
mod braces;
mod indentation;
mod lines;
mod macros;
mod spacing;

use cbo_core::scanner::{self, CharClass};
use cbo_core::{
    Diagnostic, Diagnostics, Line, LoadError, Regime, RuleKind, SourceFile, StyleSettings,
};

pub use args::{MultipleArgsPerLine, UnalignedArgs};
pub use blanks::{
    MissingBlankAfterClosingBrace, MissingBlankAfterOpeningBrace, MissingBlankBeforeCase,
    MissingBlankBeforeClosingBrace, MissingBlankBeforeComment, MultipleBlankLines,
};
pub use braces::{BraceAtLineHead, BraceAtLineTail};
pub use indentation::BadIndent;
pub use lines::{LineTooLong, TabIndent, TrailingWhitespace};
pub use macros::MacroNameNotCapitalized;
pub use spacing::{
    CharBeforeDot, SpaceAroundComma, SpaceAroundOperator, SpaceAroundSemicolon,
    SpaceBeforeOpeningBrace,
};

/// Build the regime with every rule in its fixed order. `bad-indent` runs
/// last and only on files that passed everything else.
#[must_use]
pub fn init_regime(settings: StyleSettings) -> Regime {
    let regime = Regime::new(settings)
        .with_rule(Box::new(LineTooLong))
        .with_rule(Box::new(TrailingWhitespace))
        .with_rule(Box::new(TabIndent))
        .with_rule(Box::new(MultipleBlankLines))
        .with_rule(Box::new(MissingBlankBeforeClosingBrace))
        .with_rule(Box::new(MissingBlankAfterOpeningBrace))
        .with_rule(Box::new(MissingBlankAfterClosingBrace))
        .with_rule(Box::new(MissingBlankBeforeComment))
        .with_rule(Box::new(MissingBlankBeforeCase))
        .with_rule(Box::new(SpaceAroundComma))
        .with_rule(Box::new(SpaceAroundSemicolon))
        .with_rule(Box::new(SpaceAroundOperator))
        .with_rule(Box::new(SpaceBeforeOpeningBrace))
        .with_rule(Box::new(CharBeforeDot))
        .with_rule(Box::new(BraceAtLineHead))
        .with_rule(Box::new(BraceAtLineTail))
        .with_rule(Box::new(MultipleArgsPerLine))
        .with_rule(Box::new(UnalignedArgs))
        .with_rule(Box::new(MacroNameNotCapitalized))
        .with_rule(Box::new(BadIndent));
    tracing::debug!(
        "regime ready: {} rule(s), {} disabled",
        regime.kinds().count(),
        regime.settings().disabled.len()
    );
    regime
}

/// Load `source` as the file `path` and check it with default settings.
///
/// # Errors
///
/// Returns `LoadError::LineTooLong` if any line exceeds the loader's buffer.
pub fn lint_source(path: &str, source: &str) -> Result<SourceFile, LoadError> {
    lint_source_with_settings(path, source, StyleSettings::default())
}

/// Same as [`lint_source`] with explicit settings.
///
/// # Errors
///
/// Returns `LoadError::LineTooLong` if any line exceeds the loader's buffer.
pub fn lint_source_with_settings(
    path: &str,
    source: &str,
    settings: StyleSettings,
) -> Result<SourceFile, LoadError> {
    let mut file = SourceFile::from_source(path, source)?;
    init_regime(settings).enforce(&mut file);
    Ok(file)
}

// ============================================================================
// Helpers shared by the rules
// ============================================================================

/// Code bytes of a line, stopping at any trailing comment.
pub(crate) fn code_bytes(line: &Line) -> impl Iterator<Item = (usize, u8)> + '_ {
    let end = line.code_end();
    scanner::classify(line.text())
        .take_while(move |&(idx, _, _)| idx < end)
        .filter(|&(_, _, class)| class == CharClass::Code)
        .map(|(idx, byte, _)| (idx, byte))
}

/// One diagnostic per line matching `pred`.
pub(crate) fn flag_lines(
    file: &SourceFile,
    kind: RuleKind,
    pred: impl Fn(&Line) -> bool,
) -> Diagnostics {
    file.lines()
        .iter()
        .enumerate()
        .filter(|(_, line)| pred(line))
        .map(|(idx, _)| Diagnostic::new(kind, idx))
        .collect()
}

/// One diagnostic per offending position reported by `count`.
pub(crate) fn flag_occurrences(
    file: &SourceFile,
    kind: RuleKind,
    count: impl Fn(&Line) -> usize,
) -> Diagnostics {
    file.lines()
        .iter()
        .enumerate()
        .flat_map(|(idx, line)| std::iter::repeat_n(Diagnostic::new(kind, idx), count(line)))
        .collect()
}

/// Identifier character.
pub(crate) const fn is_ident(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Where a parenthesis left open at the end of a line is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParenClose {
    pub line: usize,
    /// Position of the closing parenthesis, `None` if the file ends first.
    pub column: Option<usize>,
}

fn net_parens(line: &Line) -> i32 {
    code_bytes(line)
        .map(|(_, byte)| match byte {
            b'(' => 1,
            b')' => -1,
            _ => 0,
        })
        .sum()
}

/// Follow a line that leaves parentheses open to the line closing them.
pub(crate) fn paren_close(lines: &[Line], start: usize) -> Option<ParenClose> {
    let mut depth = net_parens(lines.get(start)?);
    if depth <= 0 {
        return None;
    }
    for (idx, line) in lines.iter().enumerate().skip(start + 1) {
        if line.is_comment() {
            continue;
        }
        for (column, byte) in code_bytes(line) {
            match byte {
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(ParenClose {
                            line: idx,
                            column: Some(column),
                        });
                    }
                }
                _ => {}
            }
        }
    }
    Some(ParenClose {
        line: lines.len() - 1,
        column: None,
    })
}
