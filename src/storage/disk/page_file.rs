use crate::errors::Result;
use crate::storage::page::Page;
use crate::PageId;
use std::sync::Arc;

/// A file of fixed-size pages addressed by page number.
///
/// The buffer pool only ever talks to storage through this trait. Two handles
/// whose `filename` is equal are treated as the same file, so they must be
/// backed by the same storage and agree on page numbering. Handles that each
/// keep their own numbering can hand out page numbers the pool already
/// caches, which makes `new_page` fail with `AlreadyPresent`.
pub trait PageFile: Send + Sync {
    fn filename(&self) -> &str;

    /// Reads the page stored under `page_id`. Fails if it was never allocated
    /// or has been deleted.
    fn read_page(&self, page_id: PageId) -> Result<Page>;

    /// Persists `page` at its own page number.
    fn write_page(&self, page: &Page) -> Result<()>;

    /// Creates a new zeroed page and returns it with its assigned number.
    fn allocate_page(&self) -> Result<Page>;

    fn delete_page(&self, page_id: PageId) -> Result<()>;
}

pub type FileRef = Arc<dyn PageFile>;
