// Engine - walks a remote tree and reduces it to leaf directories.
// Sits between the Lister capability (types) and persistence (index).

mod error;
mod leaves;
mod walker;

pub use error::{Error, Result};
pub use leaves::extract_leaves;
pub use walker::{RawTree, walk};
