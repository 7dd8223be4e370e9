//! Document arguments
//!
//! Documents are given on the command line as `HANDLE=COUNT` (e.g. `A=10`) or
//! as bare page counts, in which case handles `A`, `B`, ... are assigned in
//! order.

use crate::error::{Error, Result};
use crate::range::PageCounts;

/// Parse document arguments into a page-count mapping
///
/// Handles are upper-cased. Either every argument names a handle or none
/// does; mixing the two forms is rejected.
///
/// # Example
///
/// ```
/// use pdf_ranges::inputs::parse_document_args;
///
/// let counts = parse_document_args(&["12", "4"]).unwrap();
/// assert_eq!(counts.get("A"), Some(12));
/// assert_eq!(counts.get("B"), Some(4));
/// ```
pub fn parse_document_args<S: AsRef<str>>(args: &[S]) -> Result<PageCounts> {
    let mut named = Vec::new();
    let mut unnamed = Vec::new();

    for arg in args {
        let arg = arg.as_ref().trim();
        match arg.split_once('=') {
            Some((handle, count)) => {
                named.push((parse_handle(arg, handle)?, parse_count(arg, count)?))
            }
            None => unnamed.push(parse_count(arg, arg)?),
        }
    }

    if !named.is_empty() && !unnamed.is_empty() {
        return Err(Error::InvalidDocumentArg(
            "either every document has a handle (A=10) or none does".to_string(),
        ));
    }

    let documents: Vec<(String, usize)> = if named.is_empty() {
        unnamed
            .into_iter()
            .enumerate()
            .map(|(index, pages)| (handle_for_index(index), pages))
            .collect()
    } else {
        named
    };

    let mut counts = PageCounts::new();
    for (handle, pages) in documents {
        if counts.insert(handle.clone(), pages).is_some() {
            return Err(Error::DuplicateHandle(handle));
        }
    }
    Ok(counts)
}

/// Handle assigned to the document at `index`: A..Z, then AA, AB, ...
pub fn handle_for_index(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(char::from(b'A' + (index % 26) as u8));
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.into_iter().rev().collect()
}

fn parse_handle(arg: &str, handle: &str) -> Result<String> {
    let handle = handle.trim();
    if handle.is_empty() || !handle.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(Error::InvalidDocumentArg(format!(
            "handle must be letters only: {}",
            arg
        )));
    }
    Ok(handle.to_ascii_uppercase())
}

fn parse_count(arg: &str, count: &str) -> Result<usize> {
    count
        .trim()
        .parse()
        .map_err(|_| Error::InvalidDocumentArg(format!("invalid page count: {}", arg)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_documents() {
        let counts = parse_document_args(&["B=20", "a=10"]).unwrap();
        assert_eq!(counts.handles().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(counts.get("A"), Some(10));
        assert_eq!(counts.get("B"), Some(20));
    }

    #[test]
    fn test_unnamed_documents_get_letters() {
        let counts = parse_document_args(&["3", "5", "7"]).unwrap();
        let documents: Vec<(&str, usize)> = counts.iter().collect();
        assert_eq!(documents, vec![("A", 3), ("B", 5), ("C", 7)]);
    }

    #[test]
    fn test_handle_for_index() {
        let cases = vec![
            (0, "A"),
            (1, "B"),
            (25, "Z"),
            (26, "AA"),
            (27, "AB"),
            (51, "AZ"),
            (52, "BA"),
            (701, "ZZ"),
            (702, "AAA"),
        ];
        for (index, expected) in cases {
            assert_eq!(handle_for_index(index), expected, "index {}", index);
        }
    }

    #[test]
    fn test_invalid_arguments() {
        let cases: Vec<Vec<&str>> = vec![
            vec!["A=ten"],
            vec!["=10"],
            vec!["A1=10"],
            vec!["abc"],
            vec!["A=10", "5"],
            vec!["-3"],
        ];

        for args in cases {
            let result = parse_document_args(&args);
            assert!(
                matches!(result, Err(Error::InvalidDocumentArg(_))),
                "Expected InvalidDocumentArg for {:?}, got {:?}",
                args,
                result
            );
        }
    }

    #[test]
    fn test_duplicate_handle() {
        let err = parse_document_args(&["A=1", "a=2"]).unwrap_err();
        assert_eq!(err, Error::DuplicateHandle("A".to_string()));
    }

    #[test]
    fn test_no_documents() {
        let counts = parse_document_args::<&str>(&[]).unwrap();
        assert!(counts.is_empty());
    }
}
