use crate::errors::Result;
use crate::storage::disk::page_file::PageFile;
use crate::storage::page::Page;
use crate::{PageId, INVALID_PAGE_ID, PAGE_SIZE};
use slog::Logger;
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

// DiskFile stores the pages of one database file on disk. Page `n` lives at byte offset
// `n * PAGE_SIZE`; slot 0 is never handed out so that INVALID_PAGE_ID can not alias a real page.
// New pages are numbered from the file length, so handles opened on the same path agree.
pub struct DiskFile {
    filename: String,
    inner: Mutex<Inner>,
    logger: Logger,
}

struct Inner {
    db_file: File,
    num_writes: u32,
    // deleted pages are remembered for the lifetime of the handle only
    deleted: HashSet<PageId>,
}

impl DiskFile {
    // Creates a new, empty database file. Fails if the file already exists.
    pub fn create(filename: &str, logger: &Logger) -> Result<Self> {
        let db_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(filename)?;
        debug!(logger, "created db file"; "filename" => filename);
        Ok(Self::with_file(filename, db_file, logger))
    }

    // Opens an existing database file. Page numbering resumes after its last page.
    pub fn open(filename: &str, logger: &Logger) -> Result<Self> {
        let db_file = OpenOptions::new().read(true).write(true).open(filename)?;
        let len = db_file.metadata()?.len();
        ensure!(
            len % PAGE_SIZE as u64 == 0,
            "{} is not a page file, length {} is not a multiple of {}",
            filename,
            len,
            PAGE_SIZE
        );
        debug!(logger, "opened db file"; "filename" => filename, "len" => len);
        Ok(Self::with_file(filename, db_file, logger))
    }

    pub fn remove(filename: &str) -> Result<()> {
        fs::remove_file(filename)?;
        Ok(())
    }

    pub fn exists(filename: &str) -> bool {
        Path::new(filename).exists()
    }

    pub fn num_writes(&self) -> u32 {
        self.lock().map(|inner| inner.num_writes).unwrap_or(0)
    }

    fn with_file(filename: &str, db_file: File, logger: &Logger) -> Self {
        Self {
            filename: filename.to_string(),
            inner: Mutex::new(Inner {
                db_file,
                num_writes: 0,
                deleted: HashSet::new(),
            }),
            logger: logger.clone(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| anyhow!("lock on {} poisoned", self.filename))
    }

    fn check_readable(&self, inner: &Inner, page_id: PageId) -> Result<u64> {
        ensure!(
            page_id != INVALID_PAGE_ID,
            "{}: page {} is not a valid page number",
            self.filename,
            page_id
        );
        ensure!(
            !inner.deleted.contains(&page_id),
            "{}: page {} has been deleted",
            self.filename,
            page_id
        );
        let offset = page_id as u64 * PAGE_SIZE as u64;
        let file_len = inner.db_file.metadata()?.len();
        if offset + PAGE_SIZE as u64 > file_len {
            bail!(
                "{}: I/O error reading page {} past end of file",
                self.filename,
                page_id
            )
        }
        Ok(offset)
    }

    fn write_at(&self, inner: &mut Inner, offset: u64, page_data: &[u8]) -> Result<()> {
        inner.num_writes += 1;
        debug!(self.logger, "num_writes: {:?}", inner.num_writes);
        inner.db_file.seek(SeekFrom::Start(offset))?;
        inner.db_file.write_all(page_data)?;
        inner.db_file.flush()?;
        Ok(())
    }
}

impl PageFile for DiskFile {
    fn filename(&self) -> &str {
        &self.filename
    }

    // Read the contents of the specified page into a fresh page image
    fn read_page(&self, page_id: PageId) -> Result<Page> {
        let mut inner = self.lock()?;
        let offset = self.check_readable(&inner, page_id)?;

        let mut page = Page::new(page_id);
        inner.db_file.seek(SeekFrom::Start(offset))?;
        inner.db_file.read_exact(page.data_mut())?;
        Ok(page)
    }

    // Write the contents of the page into disk file
    fn write_page(&self, page: &Page) -> Result<()> {
        let mut inner = self.lock()?;
        let page_id = page.get_id();
        self.check_readable(&inner, page_id)?;
        self.write_at(&mut inner, page_id as u64 * PAGE_SIZE as u64, page.data())
    }

    fn allocate_page(&self) -> Result<Page> {
        let mut inner = self.lock()?;
        let len = inner.db_file.metadata()?.len();
        let page_id = (len / PAGE_SIZE as u64).max(1) as PageId;
        let page = Page::new(page_id);
        self.write_at(&mut inner, page_id as u64 * PAGE_SIZE as u64, page.data())?;
        debug!(self.logger, "allocated page";
            "filename" => &self.filename, "page_id" => page_id);
        Ok(page)
    }

    fn delete_page(&self, page_id: PageId) -> Result<()> {
        let mut inner = self.lock()?;
        let offset = self.check_readable(&inner, page_id)?;
        self.write_at(&mut inner, offset, &[0u8; PAGE_SIZE])?;
        inner.deleted.insert(page_id);
        debug!(self.logger, "deleted page";
            "filename" => &self.filename, "page_id" => page_id);
        Ok(())
    }
}
