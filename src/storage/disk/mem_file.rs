use crate::errors::Result;
use crate::storage::disk::page_file::PageFile;
use crate::storage::page::Page;
use crate::{PageId, INVALID_PAGE_ID};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard};

/// A page file kept entirely in memory.
///
/// Follows the same numbering and failure rules as [`DiskFile`](crate::DiskFile)
/// and counts reads and writes, which makes it handy for observing what the
/// buffer pool sends to storage. Each `MemFile` is its own store, so share one
/// through `Arc` rather than creating a second one under the same name.
pub struct MemFile {
    filename: String,
    pages: Mutex<HashMap<PageId, Page>>,
    next_page_id: AtomicU32,
    num_reads: AtomicU32,
    num_writes: AtomicU32,
}

impl MemFile {
    pub fn new(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            pages: Mutex::new(HashMap::new()),
            next_page_id: AtomicU32::new(INVALID_PAGE_ID),
            num_reads: AtomicU32::new(0),
            num_writes: AtomicU32::new(0),
        }
    }

    pub fn num_reads(&self) -> u32 {
        self.num_reads.load(Ordering::SeqCst)
    }

    pub fn num_writes(&self) -> u32 {
        self.num_writes.load(Ordering::SeqCst)
    }

    /// Returns the stored image of a page without counting it as a read.
    pub fn peek(&self, page_id: PageId) -> Option<Page> {
        self.lock().ok()?.get(&page_id).cloned()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<PageId, Page>>> {
        self.pages
            .lock()
            .map_err(|_| anyhow!("lock on {} poisoned", self.filename))
    }
}

impl PageFile for MemFile {
    fn filename(&self) -> &str {
        &self.filename
    }

    fn read_page(&self, page_id: PageId) -> Result<Page> {
        let pages = self.lock()?;
        let page = pages
            .get(&page_id)
            .ok_or_else(|| anyhow!("{}: page {} does not exist", self.filename, page_id))?;
        self.num_reads.fetch_add(1, Ordering::SeqCst);
        Ok(page.clone())
    }

    fn write_page(&self, page: &Page) -> Result<()> {
        let mut pages = self.lock()?;
        match pages.get_mut(&page.get_id()) {
            Some(stored) => {
                stored.put_data(page.data());
                self.num_writes.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
            None => bail!(
                "{}: can not write page {}, it does not exist",
                self.filename,
                page.get_id()
            ),
        }
    }

    fn allocate_page(&self) -> Result<Page> {
        let mut pages = self.lock()?;
        let page_id = self.next_page_id.fetch_add(1, Ordering::SeqCst) + 1;
        let page = Page::new(page_id);
        pages.insert(page_id, page.clone());
        Ok(page)
    }

    fn delete_page(&self, page_id: PageId) -> Result<()> {
        let mut pages = self.lock()?;
        if pages.remove(&page_id).is_none() {
            bail!("{}: can not delete page {}, it does not exist", self.filename, page_id)
        }
        Ok(())
    }
}
