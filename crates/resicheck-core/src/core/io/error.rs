use thiserror::Error;

/// Errors produced while turning raw structure bytes into a [`Structure`](crate::core::models::structure::Structure).
///
/// Every variant describes a problem with the caller's input and is recoverable by
/// resubmitting corrected data. Each variant maps to a short, stable code through
/// [`ParseError::code`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A record could not be tokenized according to the format's grammar.
    #[error("Malformed {format} input on line {line}: {details}")]
    Malformed {
        format: &'static str,
        line: usize,
        details: String,
    },

    /// The input ended in the middle of a record.
    #[error("Truncated {format} input at line {line}: {details}")]
    Truncated {
        format: &'static str,
        line: usize,
        details: String,
    },

    /// The declared format is not one the engine can read.
    #[error("Unsupported structure format: '{0}'")]
    UnsupportedFormat(String),
}

impl ParseError {
    pub const MALFORMED: &'static str = "MALFORMED";
    pub const TRUNCATED: &'static str = "TRUNCATED";
    pub const UNSUPPORTED_FORMAT: &'static str = "UNSUPPORTED_FORMAT";

    pub(crate) fn malformed(format: &'static str, line: usize, details: impl Into<String>) -> Self {
        Self::Malformed {
            format,
            line,
            details: details.into(),
        }
    }

    pub(crate) fn truncated(format: &'static str, line: usize, details: impl Into<String>) -> Self {
        Self::Truncated {
            format,
            line,
            details: details.into(),
        }
    }

    /// The stable error code handed to callers.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::Malformed { .. } => Self::MALFORMED,
            ParseError::Truncated { .. } => Self::TRUNCATED,
            ParseError::UnsupportedFormat(_) => Self::UNSUPPORTED_FORMAT,
        }
    }

    /// The 1-based line the error refers to, when there is one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Malformed { line, .. } | ParseError::Truncated { line, .. } => Some(*line),
            ParseError::UnsupportedFormat(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ParseError::malformed("PDB", 3, "bad").code(), "MALFORMED");
        assert_eq!(ParseError::truncated("PDB", 3, "cut").code(), "TRUNCATED");
        assert_eq!(
            ParseError::UnsupportedFormat("xyz".into()).code(),
            "UNSUPPORTED_FORMAT"
        );
    }

    #[test]
    fn display_includes_format_line_and_details() {
        let err = ParseError::malformed("mmCIF", 12, "unterminated quoted value");
        assert_eq!(
            err.to_string(),
            "Malformed mmCIF input on line 12: unterminated quoted value"
        );
        assert_eq!(err.line(), Some(12));
    }

    #[test]
    fn unsupported_format_has_no_line() {
        let err = ParseError::UnsupportedFormat("psf".into());
        assert_eq!(err.line(), None);
        assert_eq!(err.to_string(), "Unsupported structure format: 'psf'");
    }
}
