use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed input. `start..end` is the character-offset range of the
    /// offending construct; `end == start` marks a point fault such as a
    /// single missing token.
    #[error("syntax error at {start}..{end}: {message}")]
    Syntax {
        start: usize,
        end: usize,
        message: &'static str,
    },

    /// An intermediate or final value reached the 2^53 safety bound.
    #[error("arithmetic overflow")]
    Overflow,

    /// The homogeneous system admits only the trivial all-zero coefficient
    /// vector; no valid balancing exists.
    #[error("equation has only the all-zero solution")]
    AllZeroSolution,

    /// The system is underdetermined; the balancing is ambiguous.
    #[error("equation has multiple independent solutions")]
    MultipleIndependentSolutions,

    /// A post-solve consistency check failed. This indicates a defect in the
    /// elimination engine, not a problem with the input.
    #[error("verification failed: {0}")]
    Verification(&'static str),
}

impl Error {
    pub(crate) fn syntax_at(pos: usize, message: &'static str) -> Self {
        Error::Syntax {
            start: pos,
            end: pos,
            message,
        }
    }

    pub(crate) fn syntax_span(start: usize, end: usize, message: &'static str) -> Self {
        Error::Syntax {
            start,
            end,
            message,
        }
    }

    /// Computes a display span for interactive highlighting of a syntax
    /// error against the original input: trailing whitespace is trimmed from
    /// the range, and an empty range is widened to a single character (which
    /// may point one past the end of the input when the fault is there).
    ///
    /// Returns `None` for non-syntax errors. The underlying offsets carried
    /// by [`Error::Syntax`] are left untouched.
    pub fn highlight(&self, input: &str) -> Option<(usize, usize)> {
        let Error::Syntax { start, mut end, .. } = *self else {
            return None;
        };
        let chars: Vec<char> = input.chars().collect();
        while end > start && matches!(chars.get(end - 1).copied(), Some(' ' | '\t')) {
            end -= 1;
        }
        if end == start {
            end += 1;
        }
        Some((start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_widens_empty_range() {
        let err = Error::syntax_at(3, "plus or equal sign expected");
        assert_eq!(err.highlight("H2 O2"), Some((3, 4)));
    }

    #[test]
    fn highlight_trims_trailing_whitespace() {
        let err = Error::syntax_span(0, 5, "electron must stand alone");
        assert_eq!(err.highlight("Fe e = Fe"), Some((0, 4)));
    }

    #[test]
    fn highlight_at_end_of_input() {
        let err = Error::syntax_at(3, "element, group, or closing parenthesis expected");
        assert_eq!(err.highlight("(OH"), Some((3, 4)));
    }

    #[test]
    fn highlight_ignores_non_syntax_errors() {
        assert_eq!(Error::Overflow.highlight("H2"), None);
    }
}
