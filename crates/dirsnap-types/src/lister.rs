use crate::{Entry, ListingError};

/// Capability to list one remote directory.
///
/// Implementations hold the session for a single site. The walker borrows
/// it mutably for the duration of one crawl, so no listing state is global.
pub trait Lister {
    /// Entries directly under `path`, in server order.
    ///
    /// May include `.`/`..` markers; callers filter them.
    fn list(&mut self, path: &str) -> Result<Vec<Entry>, ListingError>;
}

impl<L: Lister + ?Sized> Lister for &mut L {
    fn list(&mut self, path: &str) -> Result<Vec<Entry>, ListingError> {
        (**self).list(path)
    }
}

impl<L: Lister + ?Sized> Lister for Box<L> {
    fn list(&mut self, path: &str) -> Result<Vec<Entry>, ListingError> {
        (**self).list(path)
    }
}
