//! Error types for the page range library

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the page range library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Atom does not match the range grammar
    #[error("Malformed page range '{atom}': {reason}")]
    MalformedAtom { atom: String, reason: String },

    /// Handle not present in the page-count mapping
    #[error("Unknown handle: {handle}")]
    UnknownHandle { handle: String },

    /// Atom has no handle and no single default document exists
    #[error("Page range '{atom}' has no handle and the default document is ambiguous (documents: {})", .handles.join(", "))]
    AmbiguousDefaultHandle { atom: String, handles: Vec<String> },

    /// Resolved page outside 1..=total
    #[error("Page {page} in '{atom}' is out of range (document has {total} pages)")]
    PageOutOfRange { atom: String, page: i64, total: usize },

    /// Range and qualifier select no pages at all
    #[error("Page range '{atom}' selects no pages")]
    EmptyResolution { atom: String },

    /// Bad `HANDLE=COUNT` document argument
    #[error("Invalid document argument: {0}")]
    InvalidDocumentArg(String),

    /// Same handle given to two documents
    #[error("Duplicate handle: {0}")]
    DuplicateHandle(String),
}

impl Error {
    pub(crate) fn malformed(atom: &str, reason: impl Into<String>) -> Self {
        Error::MalformedAtom {
            atom: atom.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::malformed("1-x", "invalid page number 'x'");
        assert_eq!(err.to_string(), "Malformed page range '1-x': invalid page number 'x'");

        let err = Error::AmbiguousDefaultHandle {
            atom: "1-5".to_string(),
            handles: vec!["A".to_string(), "B".to_string()],
        };
        assert!(err.to_string().contains("documents: A, B"));

        let err = Error::PageOutOfRange {
            atom: "11-15".to_string(),
            page: 11,
            total: 10,
        };
        assert_eq!(
            err.to_string(),
            "Page 11 in '11-15' is out of range (document has 10 pages)"
        );
    }
}
