//! PDF Ranges Library
//!
//! Interprets pdftk-style page range strings into ordered page instructions.
//! This library provides functionality to:
//! - Parse range atoms such as `A1-10east`, `Bend-1odd` and `r3-r1`
//! - Resolve them against the page counts of one or more documents
//! - Build cat, rotate and shuffle plans for a document assembler
//! - Parse `HANDLE=COUNT` document arguments
//!
//! No PDF is ever opened here: page counts come from the caller, and the
//! resulting instructions are handed back to it.
//!
//! # Example
//!
//! ```
//! use pdf_ranges::range::{resolve, PageCounts};
//!
//! let counts: PageCounts = [("A", 10), ("B", 20)].into_iter().collect();
//! let specs = resolve(["A1-10east B5-20odd"], &counts, None).unwrap();
//!
//! assert_eq!(specs[0].rotation, 90);
//! assert_eq!(specs[1].pages, vec![5, 7, 9, 11, 13, 15, 17, 19]);
//! ```

pub mod error;
pub mod inputs;
pub mod plan;
pub mod range;

// Re-export commonly used items
pub use error::{Error, Result};
pub use plan::PageInstruction;
pub use range::{resolve, PageCounts, PageSpec};
