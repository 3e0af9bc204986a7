//! Crate-level error types.

use std::fmt;

/// Errors produced by the molrep crate.
#[derive(Debug)]
pub enum RepError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// A construction parameter is outside the range a group can build with.
    InvalidParameter(String),
    /// A group was requested over a selection that produced no chunks.
    EmptySelection(&'static str),
}

impl fmt::Display for RepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidParameter(msg) => {
                write!(f, "invalid parameter: {msg}")
            }
            Self::EmptySelection(kind) => {
                write!(f, "empty selection for {kind} group")
            }
        }
    }
}

impl std::error::Error for RepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RepError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = RepError::InvalidParameter("poly complexity 2".to_owned());
        assert_eq!(err.to_string(), "invalid parameter: poly complexity 2");
        assert_eq!(
            RepError::EmptySelection("bonds").to_string(),
            "empty selection for bonds group"
        );
    }

    #[test]
    fn io_error_is_the_source() {
        use std::error::Error;
        let err: RepError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.source().is_some());
        assert!(RepError::OptionsParse("x".to_owned()).source().is_none());
    }
}
