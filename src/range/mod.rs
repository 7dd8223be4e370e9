//! Page range language

pub mod atom;
pub mod resolve;

// Re-export commonly used items
pub use atom::{parse_atom, tokenize, Atom, Bound, Position, Qualifier, Rotation};
pub use resolve::{resolve, PageCounts, PageSpec, Resolver};
