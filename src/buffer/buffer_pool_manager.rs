use crate::buffer::clock_replacer::ClockState;
use crate::buffer::error::{BufferError, BufferResult};
use crate::buffer::page_table::PageTable;
use crate::buffer::pool::BufferPool;
use crate::buffer::replace::Replacer;
use crate::buffer::report::PoolReport;
use crate::storage::disk::page_file::FileRef;
use crate::storage::page::Page;
use crate::{FrameId, PageId};
use slog::Logger;
use std::sync::{Arc, Mutex};

pub type SharedBufferPool = Arc<Mutex<BufferPoolManager>>;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BufStats {
    pub accesses: u64,
    pub disk_reads: u64,
    pub disk_writes: u64,
}

/// Pinned page returned by [`BufferPoolManager::fetch_page`] and
/// [`BufferPoolManager::new_page`].
///
/// Resolve it with [`BufferPoolManager::page`] / [`BufferPoolManager::page_mut`].
/// Once the frame is released, evicted or reused the handle stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageHandle {
    frame_id: FrameId,
    generation: u64,
    page_id: PageId,
}

impl PageHandle {
    pub fn page_id(&self) -> PageId {
        self.page_id
    }
    pub fn frame_id(&self) -> FrameId {
        self.frame_id
    }
}

pub struct BufferPoolManager {
    // Number of frames in the buffer pool
    num_bufs: usize,
    // Frame descriptors and the clock hand sweeping over them
    clock: ClockState,
    // Page images, indexed like the descriptors
    pool: BufferPool,
    // Page table for keeping track of resident pages
    page_table: PageTable,
    stats: BufStats,
    logger: Logger,
}

impl BufferPoolManager {
    pub fn new(num_bufs: usize, logger: &Logger) -> Self {
        Self {
            num_bufs,
            clock: ClockState::new(num_bufs),
            pool: BufferPool::new(num_bufs),
            page_table: PageTable::new(num_bufs),
            stats: BufStats::default(),
            logger: logger.clone(),
        }
    }

    pub fn into_shared(self) -> SharedBufferPool {
        Arc::new(Mutex::new(self))
    }

    pub fn num_bufs(&self) -> usize {
        self.num_bufs
    }

    pub fn stats(&self) -> BufStats {
        self.stats
    }

    pub fn clear_stats(&mut self) {
        self.stats = BufStats::default();
    }

    /// Pins `page_id` of `file`, reading it from the file if it is not resident.
    pub fn fetch_page(&mut self, file: &FileRef, page_id: PageId) -> BufferResult<PageHandle> {
        if let Some(frame_id) = self.page_table.lookup(file.filename(), page_id) {
            self.clock.frame_mut(frame_id).pin();
            self.stats.accesses += 1;
            return Ok(self.handle(frame_id));
        }

        let frame_id = self.alloc_buf()?;
        let page = file.read_page(page_id)?;
        self.stats.disk_reads += 1;
        self.stats.accesses += 1;
        self.install(frame_id, file, page)
    }

    /// Drops one pin on a resident page. A dirty release sticks until the page is written back.
    pub fn unpin_page(
        &mut self,
        file: &FileRef,
        page_id: PageId,
        is_dirty: bool,
    ) -> BufferResult<()> {
        let frame_id = self.lookup(file, page_id)?;
        let desc = self.clock.frame_mut(frame_id);
        if desc.pin_cnt() == 0 {
            return Err(BufferError::PageNotPinned {
                filename: file.filename().to_string(),
                page_id,
                frame_id,
            });
        }
        desc.unpin(is_dirty);
        Ok(())
    }

    /// Allocates a new page in `file` and pins it in the pool.
    pub fn new_page(&mut self, file: &FileRef) -> BufferResult<(PageHandle, PageId)> {
        let frame_id = self.alloc_buf()?;
        let page = file.allocate_page()?;
        let page_id = page.get_id();

        debug!(self.logger, "page_id: {:?}", page_id);

        self.stats.accesses += 1;
        let handle = self.install(frame_id, file, page)?;
        Ok((handle, page_id))
    }

    /// Writes back and evicts every resident page of `file`.
    ///
    /// Stops at the first frame that is still pinned; frames visited before it
    /// have already been written back and evicted.
    pub fn flush_file(&mut self, file: &FileRef) -> BufferResult<()> {
        let filename = file.filename();
        for frame_id in 0..self.num_bufs as FrameId {
            let desc = self.clock.frame(frame_id);
            if !desc.belongs_to(filename) {
                continue;
            }
            if desc.pin_cnt() != 0 {
                return Err(BufferError::PagePinned {
                    filename: filename.to_string(),
                    page_id: desc.page_id(),
                    frame_id,
                });
            }
            if !desc.is_valid() {
                return Err(BufferError::BadBuffer {
                    frame_id,
                    dirty: desc.is_dirty(),
                    valid: desc.is_valid(),
                    refbit: desc.refbit(),
                });
            }
            self.write_back(frame_id)?;
            self.retire(frame_id)?;
        }
        debug_assert_eq!(self.page_table.entries_for(filename), 0);
        debug!(self.logger, "flushed file"; "filename" => filename);
        Ok(())
    }

    /// Drops `page_id` from the pool, if resident, and deletes it from `file`.
    pub fn dispose_page(&mut self, file: &FileRef, page_id: PageId) -> BufferResult<()> {
        if let Some(frame_id) = self.page_table.lookup(file.filename(), page_id) {
            self.retire(frame_id)?;
        }
        file.delete_page(page_id)?;
        debug!(self.logger, "disposed page";
            "filename" => file.filename(), "page_id" => page_id);
        Ok(())
    }

    /// Writes back every dirty page without evicting anything, pinned pages included.
    /// Keeps going past failures and reports the first one.
    pub fn flush_all(&mut self) -> BufferResult<()> {
        let mut first_err = None;
        for frame_id in 0..self.num_bufs as FrameId {
            if let Err(e) = self.write_back(frame_id) {
                warn!(self.logger, "write back failed"; "frame_id" => frame_id, "error" => %e);
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    pub fn inspect(&self) -> PoolReport {
        let report = PoolReport::from_frames(self.clock.frames(), self.clock.size());
        debug_assert_eq!(report.valid_frames, self.page_table.len());
        report
    }

    pub fn page(&self, handle: &PageHandle) -> BufferResult<&Page> {
        self.check_handle(handle)?;
        Ok(self.pool.get(handle.frame_id))
    }

    pub fn page_mut(&mut self, handle: &PageHandle) -> BufferResult<&mut Page> {
        self.check_handle(handle)?;
        Ok(self.pool.get_mut(handle.frame_id))
    }

    fn lookup(&self, file: &FileRef, page_id: PageId) -> BufferResult<FrameId> {
        self.page_table
            .lookup(file.filename(), page_id)
            .ok_or_else(|| BufferError::NotFound {
                filename: file.filename().to_string(),
                page_id,
            })
    }

    // Hands out an empty frame, evicting the clock's victim if it still holds a page.
    fn alloc_buf(&mut self) -> BufferResult<FrameId> {
        let frame_id = self.clock.victim().ok_or(BufferError::PoolExhausted {
            num_bufs: self.num_bufs,
        })?;
        if self.clock.frame(frame_id).is_valid() {
            self.write_back(frame_id)?;
            debug!(self.logger, "evicting page";
                "filename" => self.clock.frame(frame_id).filename(),
                "page_id" => self.clock.frame(frame_id).page_id(),
                "frame_id" => frame_id);
            self.retire(frame_id)?;
        }
        Ok(frame_id)
    }

    // Writes the frame's page to its file if it is valid and dirty.
    fn write_back(&mut self, frame_id: FrameId) -> BufferResult<()> {
        let desc = self.clock.frame(frame_id);
        let file = match desc.file() {
            Some(file) if desc.is_valid() && desc.is_dirty() => file,
            _ => return Ok(()),
        };
        file.write_page(self.pool.get(frame_id))?;
        debug!(self.logger, "wrote back page";
            "filename" => file.filename(), "page_id" => desc.page_id(), "frame_id" => frame_id);
        self.stats.disk_writes += 1;
        self.clock.frame_mut(frame_id).mark_clean();
        Ok(())
    }

    // Removes the frame's page table entry and resets its descriptor, always together.
    fn retire(&mut self, frame_id: FrameId) -> BufferResult<()> {
        let desc = self.clock.frame_mut(frame_id);
        let removed = self.page_table.remove(desc.filename(), desc.page_id());
        desc.clear();
        removed.map(|_| ())
    }

    // `frame_id` must come from alloc_buf: empty and not in the page table.
    fn install(
        &mut self,
        frame_id: FrameId,
        file: &FileRef,
        page: Page,
    ) -> BufferResult<PageHandle> {
        let page_id = page.get_id();
        self.page_table.insert(file.filename(), page_id, frame_id)?;
        self.pool.install(frame_id, page);
        self.clock.frame_mut(frame_id).set(Arc::clone(file), page_id);
        debug!(self.logger, "installed page";
            "filename" => file.filename(), "page_id" => page_id, "frame_id" => frame_id);
        Ok(self.handle(frame_id))
    }

    fn handle(&self, frame_id: FrameId) -> PageHandle {
        let desc = self.clock.frame(frame_id);
        PageHandle {
            frame_id,
            generation: desc.generation(),
            page_id: desc.page_id(),
        }
    }

    fn check_handle(&self, handle: &PageHandle) -> BufferResult<()> {
        let live = self
            .clock
            .frames()
            .get(handle.frame_id as usize)
            .map_or(false, |desc| {
                desc.is_valid()
                    && desc.pin_cnt() > 0
                    && desc.generation() == handle.generation
                    && desc.page_id() == handle.page_id
            });
        if live {
            Ok(())
        } else {
            Err(BufferError::StaleHandle {
                frame_id: handle.frame_id,
                page_id: handle.page_id,
            })
        }
    }
}

impl Drop for BufferPoolManager {
    fn drop(&mut self) {
        if self.flush_all().is_err() {
            warn!(self.logger, "dirty pages were lost on shutdown");
        }
    }
}
