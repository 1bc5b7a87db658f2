//! The error type returned by the fallible parsing entry points.

/// Reports that some text is not a valid instance of a VHDL construct.
///
/// Parsing is all-or-nothing, so the error names only the construct that was
/// expected. Positional information is available separately through
/// `vesta_vhdl::diagnose`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("input is not a valid {construct}")]
pub struct ParseError {
    /// Name of the construct the parser was asked to recognize.
    pub construct: &'static str,
}

impl ParseError {
    /// Creates an error for the named construct.
    pub fn new(construct: &'static str) -> Self {
        Self { construct }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_construct() {
        let err = ParseError::new("Entity");
        assert_eq!(err.to_string(), "input is not a valid Entity");
    }

    #[test]
    fn errors_compare_by_construct() {
        assert_eq!(ParseError::new("Record"), ParseError::new("Record"));
        assert_ne!(ParseError::new("Record"), ParseError::new("Entity"));
    }
}
