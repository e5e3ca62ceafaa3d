//! Single-pass inference of the expected indent level of every line.
//!
//! The engine is a heuristic keyed off the last code character of each line
//! plus a handful of sticky flags. It is not a grammar: constructs such as
//! nested `case` blocks or a `break;` outside any `case` are handled by the
//! same decision table as everything else.

use crate::line::Line;

/// State carried from one line to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct IndentState {
    /// Current level, in indent units.
    pub level: usize,
    pub in_multiline_assignment: bool,
    pub in_paren_continuation: bool,
    pub in_for_header: bool,
    pub in_case_block: bool,
}

#[derive(Debug, Clone, Default)]
pub struct IndentEngine {
    state: IndentState,
}

impl IndentEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from an arbitrary state.
    #[must_use]
    pub const fn with_state(state: IndentState) -> Self {
        Self { state }
    }

    #[must_use]
    pub const fn state(&self) -> IndentState {
        self.state
    }

    /// Feed the next line and return its expected level.
    pub fn step(&mut self, line: &Line) -> usize {
        let state = &mut self.state;
        let preprocessor = line.is_preprocessor();

        if !preprocessor {
            let rest = line.rest();
            if rest.starts_with("for (") || rest.starts_with("for(") {
                state.in_for_header = true;
            }
            if line.head_byte() == Some(b'}') {
                state.level = state.level.saturating_sub(1);
            }
        }

        let expected = state.level;
        if line.is_blank() || line.is_comment() || preprocessor {
            return expected;
        }

        match line.code_tail_byte() {
            Some(b'{') => {
                if state.in_paren_continuation {
                    state.in_paren_continuation = false;
                } else {
                    state.level += 1;
                }
                state.in_for_header = false;
            }
            Some(b'(') => {
                state.level += 1;
                state.in_paren_continuation = true;
            }
            Some(b'=') => {
                state.in_multiline_assignment = true;
                state.level += 1;
            }
            Some(b';') => {
                if state.in_multiline_assignment {
                    state.in_multiline_assignment = false;
                    state.level = state.level.saturating_sub(1);
                }
                if state.in_paren_continuation && !state.in_for_header {
                    state.in_paren_continuation = false;
                    state.level = state.level.saturating_sub(1);
                }
                if state.in_case_block && line.code().trim() == "break;" {
                    state.in_case_block = false;
                    state.level = state.level.saturating_sub(1);
                }
            }
            Some(b':') => {
                state.in_case_block = true;
                state.level += 1;
            }
            _ => {}
        }
        expected
    }
}

/// Expected level of every line, in order.
#[must_use]
pub fn expected_indents(lines: &[Line]) -> Vec<usize> {
    let mut engine = IndentEngine::new();
    lines.iter().map(|line| engine.step(line)).collect()
}
