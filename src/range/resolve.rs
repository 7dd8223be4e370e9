//! Page resolution
//!
//! Turns parsed atoms into concrete page lists against the page counts of the
//! input documents, and emits them as an ordered [`PageSpec`] sequence.

use crate::error::{Error, Result};
use crate::range::atom::{tokenize, Atom, Bound, Position, Rotation};

/// Page counts of the input documents, keyed by handle
///
/// Documents keep the order they were registered in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCounts {
    documents: Vec<(String, usize)>,
}

impl PageCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document, returning the previous page count if the handle
    /// was already present
    pub fn insert(&mut self, handle: impl Into<String>, pages: usize) -> Option<usize> {
        let handle = handle.into();
        match self.documents.iter_mut().find(|(h, _)| *h == handle) {
            Some((_, existing)) => Some(std::mem::replace(existing, pages)),
            None => {
                self.documents.push((handle, pages));
                None
            }
        }
    }

    /// Page count of the document with this handle
    pub fn get(&self, handle: &str) -> Option<usize> {
        self.documents
            .iter()
            .find(|(h, _)| h == handle)
            .map(|&(_, pages)| pages)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn handles(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|(h, _)| h.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.documents.iter().map(|(h, pages)| (h.as_str(), *pages))
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for PageCounts {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        let mut counts = PageCounts::new();
        for (handle, pages) in iter {
            counts.insert(handle, pages);
        }
        counts
    }
}

/// One resolved range/rotation instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpec {
    /// Handle as written in the atom; `None` means the default document
    pub handle: Option<String>,
    /// 1-based page numbers in output order, never empty
    pub pages: Vec<usize>,
    /// Clockwise rotation in degrees: 0, 90, 180 or 270
    pub rotation: u16,
}

/// Resolves atoms against a fixed set of page counts
///
/// Holds no mutable state, so one resolver can serve any number of calls.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    counts: &'a PageCounts,
    default_handle: Option<&'a str>,
}

impl<'a> Resolver<'a> {
    pub fn new(counts: &'a PageCounts, default_handle: Option<&'a str>) -> Self {
        Self {
            counts,
            default_handle,
        }
    }

    /// The document that handle-less atoms bind to, if there is exactly one
    ///
    /// An explicit default handle wins (when it names a known document);
    /// otherwise the only document is used.
    pub fn bound_default(&self) -> Option<(&'a str, usize)> {
        if let Some(handle) = self.default_handle {
            return self.counts.get(handle).map(|pages| (handle, pages));
        }

        let mut documents = self.counts.iter();
        match (documents.next(), documents.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    /// Like [`Resolver::bound_default`], but failing with the reason there is
    /// no binding for the handle-less `atom`
    pub fn default_document(&self, atom: &str) -> Result<(&'a str, usize)> {
        self.bound_default().ok_or_else(|| match self.default_handle {
            Some(handle) => Error::UnknownHandle {
                handle: handle.to_string(),
            },
            None => Error::AmbiguousDefaultHandle {
                atom: atom.to_string(),
                handles: self.counts.handles().map(str::to_string).collect(),
            },
        })
    }

    /// Resolve every atom of several range strings, in order
    pub fn resolve_all<I>(&self, range_strings: I) -> Result<Vec<PageSpec>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut specs = Vec::new();
        for range_str in range_strings {
            specs.extend(self.resolve_str(range_str.as_ref())?);
        }
        Ok(specs)
    }

    /// Resolve every atom of one range string, in order
    pub fn resolve_str(&self, range_str: &str) -> Result<Vec<PageSpec>> {
        tokenize(range_str)
            .map(|atom| self.resolve_atom(atom))
            .collect()
    }

    /// Resolve a single atom
    pub fn resolve_atom(&self, text: &str) -> Result<PageSpec> {
        let atom: Atom = text.parse()?;

        let total = match &atom.handle {
            Some(handle) => self.counts.get(handle).ok_or_else(|| Error::UnknownHandle {
                handle: handle.clone(),
            })?,
            None => self.default_document(text)?.1,
        };

        let mut pages = expand_position(text, atom.position, total)?;
        if let Some(qualifier) = atom.qualifier {
            pages.retain(|&page| qualifier.matches(page));
        }
        if pages.is_empty() {
            return Err(Error::EmptyResolution {
                atom: text.to_string(),
            });
        }

        Ok(PageSpec {
            handle: atom.handle,
            pages,
            rotation: atom.rotation.map_or(0, Rotation::degrees),
        })
    }
}

/// Resolve a list of range strings into one flat, ordered spec sequence
///
/// Specs are emitted in input order with no deduplication. The first bad atom
/// fails the whole call.
///
/// # Example
///
/// ```
/// use pdf_ranges::range::{resolve, PageCounts};
///
/// let counts: PageCounts = [("A", 3), ("B", 2)].into_iter().collect();
/// let specs = resolve(["A", "Bend-1"], &counts, None).unwrap();
///
/// assert_eq!(specs[0].pages, vec![1, 2, 3]);
/// assert_eq!(specs[1].pages, vec![2, 1]);
/// ```
pub fn resolve<I>(
    range_strings: I,
    counts: &PageCounts,
    default_handle: Option<&str>,
) -> Result<Vec<PageSpec>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Resolver::new(counts, default_handle).resolve_all(range_strings)
}

/// Resolve a bound to a page number in `1..=total`
pub fn resolve_bound(atom: &str, bound: Bound, total: usize) -> Result<usize> {
    let total_signed = i64::try_from(total).unwrap_or(i64::MAX);
    let page = match bound {
        Bound::Number(n) => i64::try_from(n).unwrap_or(i64::MAX),
        Bound::End => total_signed,
        Bound::Reverse(n) => total_signed - i64::try_from(n).unwrap_or(i64::MAX) + 1,
        Bound::ReverseEnd => 1,
    };

    if page < 1 || page > total_signed {
        return Err(Error::PageOutOfRange {
            atom: atom.to_string(),
            page,
            total,
        });
    }
    Ok(page as usize)
}

/// Enumerate the pages of a position, following the traversal direction
fn expand_position(atom: &str, position: Position, total: usize) -> Result<Vec<usize>> {
    match position {
        Position::All => Ok((1..=total).collect()),
        Position::Single(bound) => Ok(vec![resolve_bound(atom, bound, total)?]),
        Position::Range(start, end) => {
            let start = resolve_bound(atom, start, total)?;
            let end = resolve_bound(atom, end, total)?;
            if start <= end {
                Ok((start..=end).collect())
            } else {
                Ok((end..=start).rev().collect())
            }
        }
    }
}
