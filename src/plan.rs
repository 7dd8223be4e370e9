//! Assembly plans
//!
//! Each operation turns range strings into the exact sequence of output pages
//! the document assembler should produce. The assembler fetches `page` from the
//! document named by `handle`, rotates it by `rotation` and appends it.

use crate::error::{Error, Result};
use crate::range::{PageCounts, PageSpec, Resolver};

/// One page of the output document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInstruction {
    /// Source document; `None` only when a handle-less spec was flattened
    /// without a default document
    pub handle: Option<String>,
    /// 1-based page number in the source document
    pub page: usize,
    /// Clockwise rotation in degrees
    pub rotation: u16,
}

impl PageInstruction {
    fn new(handle: Option<&str>, page: usize, rotation: u16) -> Self {
        Self {
            handle: handle.map(str::to_string),
            page,
            rotation,
        }
    }

    fn from_spec(spec: &PageSpec, default_handle: Option<&str>, page: usize) -> Self {
        Self::new(spec.handle.as_deref().or(default_handle), page, spec.rotation)
    }
}

/// Expand specs into output pages: each spec's pages in order, with its rotation
///
/// Specs written without a handle are bound to `default_handle`.
pub fn flatten(specs: &[PageSpec], default_handle: Option<&str>) -> Vec<PageInstruction> {
    specs
        .iter()
        .flat_map(|spec| {
            spec.pages
                .iter()
                .map(move |&page| PageInstruction::from_spec(spec, default_handle, page))
        })
        .collect()
}

/// Concatenate the selected pages
///
/// With no ranges (or only blank ones), every page of every document is
/// taken in registration order.
pub fn cat<I>(
    range_strings: I,
    counts: &PageCounts,
    default_handle: Option<&str>,
) -> Result<Vec<PageInstruction>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let resolver = Resolver::new(counts, default_handle);
    let specs = resolver.resolve_all(range_strings)?;
    if !specs.is_empty() {
        let bound = resolver.bound_default().map(|(handle, _)| handle);
        return Ok(flatten(&specs, bound));
    }

    Ok(counts
        .iter()
        .flat_map(|(handle, pages)| {
            (1..=pages).map(move |page| PageInstruction::new(Some(handle), page, 0))
        })
        .collect())
}

/// Rotate pages of a single document in place
///
/// The rotated document is the default one, or when there is none, the
/// document named by the first range. Every page of it is kept in its
/// original order. Pages selected by a spec take that spec's rotation; when
/// specs overlap the later one wins. Unselected pages get 0. With no ranges
/// and no default document there is nothing to rotate and the plan is empty.
pub fn rotate<I>(
    range_strings: I,
    counts: &PageCounts,
    default_handle: Option<&str>,
) -> Result<Vec<PageInstruction>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let resolver = Resolver::new(counts, default_handle);
    let specs = resolver.resolve_all(range_strings)?;

    let target = match resolver.bound_default() {
        Some((handle, _)) => handle,
        None => match specs.first().and_then(|spec| spec.handle.as_deref()) {
            Some(handle) => handle,
            None => return Ok(Vec::new()),
        },
    };
    let total = counts.get(target).unwrap_or(0);

    let mut rotations = vec![0u16; total];
    for spec in &specs {
        if let Some(handle) = spec.handle.as_deref().filter(|h| *h != target) {
            return Err(Error::UnknownHandle {
                handle: handle.to_string(),
            });
        }
        for &page in &spec.pages {
            rotations[page - 1] = spec.rotation;
        }
    }

    Ok(rotations
        .into_iter()
        .enumerate()
        .map(|(index, rotation)| PageInstruction::new(Some(target), index + 1, rotation))
        .collect())
}

/// Collate the selected pages round-robin
///
/// Takes the first page of every spec, then the second page of every spec,
/// and so on. Specs that run out of pages are skipped.
pub fn shuffle<I>(
    range_strings: I,
    counts: &PageCounts,
    default_handle: Option<&str>,
) -> Result<Vec<PageInstruction>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let resolver = Resolver::new(counts, default_handle);
    let specs = resolver.resolve_all(range_strings)?;
    let bound = resolver.bound_default().map(|(handle, _)| handle);
    Ok(collate(&specs, bound))
}

fn collate(specs: &[PageSpec], default_handle: Option<&str>) -> Vec<PageInstruction> {
    let rounds = specs.iter().map(|spec| spec.pages.len()).max().unwrap_or(0);
    (0..rounds)
        .flat_map(|round| {
            specs.iter().filter_map(move |spec| {
                spec.pages
                    .get(round)
                    .map(|&page| PageInstruction::from_spec(spec, default_handle, page))
            })
        })
        .collect()
}
