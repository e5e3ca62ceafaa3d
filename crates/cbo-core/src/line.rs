//! A single physical line of source text.

use crate::scanner;

/// One line as read from disk, without its line terminator.
///
/// The text never changes after creation. The preprocessor flag and the
/// expected indent level are filled in once by [`crate::SourceFile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    text: String,
    preprocessor: bool,
    expected_indent: usize,
}

impl Line {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            preprocessor: false,
            expected_indent: 0,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        scanner::length(&self.text)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Empty or made only of spaces and tabs.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.head() == self.len()
    }

    #[must_use]
    pub fn head(&self) -> usize {
        scanner::pos_head(&self.text)
    }

    #[must_use]
    pub fn head_byte(&self) -> Option<u8> {
        self.bytes().get(self.head()).copied()
    }

    /// Text starting at the head position.
    #[must_use]
    pub fn rest(&self) -> &str {
        &self.text[self.head()..]
    }

    #[must_use]
    pub fn is_comment(&self) -> bool {
        scanner::is_comment(&self.text)
    }

    /// Directive line or backslash continuation of one.
    #[must_use]
    pub const fn is_preprocessor(&self) -> bool {
        self.preprocessor
    }

    /// Indent level inferred for this line, in indent units.
    #[must_use]
    pub const fn expected_indent(&self) -> usize {
        self.expected_indent
    }

    /// The line ends with a backslash continuation.
    #[must_use]
    pub fn is_continued(&self) -> bool {
        self.bytes().last() == Some(&b'\\')
    }

    #[must_use]
    pub fn code_end(&self) -> usize {
        scanner::code_end(&self.text)
    }

    /// Source text before any trailing comment.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.text[..self.code_end()]
    }

    /// Position of the last non-blank byte before any trailing comment.
    #[must_use]
    pub fn code_tail(&self) -> Option<usize> {
        self.code().bytes().rposition(|b| !scanner::is_blank(b))
    }

    /// Last non-blank byte of the code, when it lies outside literals.
    #[must_use]
    pub fn code_tail_byte(&self) -> Option<u8> {
        let tail = self.code_tail()?;
        scanner::is_code_at(&self.text, tail).then(|| self.bytes()[tail])
    }

    #[must_use]
    pub fn ends_with_code(&self, ch: u8) -> bool {
        self.code_tail_byte() == Some(ch)
    }

    /// `case …:` or `default:` label.
    #[must_use]
    pub fn is_case_label(&self) -> bool {
        let rest = self.rest();
        rest.starts_with("case ")
            || rest.starts_with("case(")
            || rest.starts_with("default:")
            || rest.starts_with("default :")
    }

    pub(crate) const fn set_preprocessor(&mut self, preprocessor: bool) {
        self.preprocessor = preprocessor;
    }

    pub(crate) const fn set_expected_indent(&mut self, level: usize) {
        self.expected_indent = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines() {
        assert!(Line::new("").is_blank());
        assert!(Line::new(" \t ").is_blank());
        assert!(!Line::new("  x").is_blank());
        assert!(Line::new("").is_empty());
        assert!(!Line::new(" ").is_empty());
    }

    #[test]
    fn code_tail_stops_before_trailing_comment() {
        let line = Line::new("  if (a) { // open  ");
        assert_eq!(line.code_tail_byte(), Some(b'{'));
        assert!(line.ends_with_code(b'{'));
        assert_eq!(line.code(), "  if (a) { ");
    }

    #[test]
    fn tail_inside_literal_is_not_code() {
        let line = Line::new(r#"  puts("{"#);
        assert_eq!(line.code_tail(), Some(8));
        assert_eq!(line.code_tail_byte(), None);
    }

    #[test]
    fn comment_line_has_no_code_tail() {
        assert_eq!(Line::new("  // note").code_tail(), None);
    }

    #[test]
    fn case_labels() {
        assert!(Line::new("  case 1:").is_case_label());
        assert!(Line::new("  default:").is_case_label());
        assert!(!Line::new("  casework();").is_case_label());
        assert!(!Line::new("  defaults = 1;").is_case_label());
    }

    #[test]
    fn continuation_uses_last_byte() {
        assert!(Line::new("#define A \\").is_continued());
        assert!(!Line::new("#define A \\ ").is_continued());
    }
}
