pub mod entry;
pub mod error;
pub mod lister;
mod util;

pub use entry::{Entry, EntryKind, LeafDir};
pub use error::ListingError;
pub use lister::Lister;
pub use util::*;
