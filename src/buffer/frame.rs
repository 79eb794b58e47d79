use crate::buffer::report::FrameInfo;
use crate::storage::disk::page_file::FileRef;
use crate::{FrameId, PageId, INVALID_PAGE_ID};
use std::fmt;

/// Bookkeeping for one frame of the buffer pool.
///
/// The descriptor outlives whatever page it holds: `frame_id` is fixed at
/// construction, everything else is reset by [`FrameDesc::clear`] when the
/// page leaves the pool.
pub(crate) struct FrameDesc {
    frame_id: FrameId,
    file: Option<FileRef>,
    page_id: PageId,
    pin_cnt: u32,
    dirty: bool,
    valid: bool,
    refbit: bool,
    // bumped on every install, never reset
    generation: u64,
}

impl FrameDesc {
    pub(crate) fn new(frame_id: FrameId) -> Self {
        Self {
            frame_id,
            file: None,
            page_id: INVALID_PAGE_ID,
            pin_cnt: 0,
            dirty: false,
            valid: false,
            refbit: false,
            generation: 0,
        }
    }

    pub fn frame_id(&self) -> FrameId {
        self.frame_id
    }
    pub fn file(&self) -> Option<&FileRef> {
        self.file.as_ref()
    }
    pub fn filename(&self) -> &str {
        self.file.as_ref().map_or("", |f| f.filename())
    }
    pub fn page_id(&self) -> PageId {
        self.page_id
    }
    pub fn pin_cnt(&self) -> u32 {
        self.pin_cnt
    }
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
    pub fn is_valid(&self) -> bool {
        self.valid
    }
    pub fn refbit(&self) -> bool {
        self.refbit
    }
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn belongs_to(&self, filename: &str) -> bool {
        self.file.as_ref().map_or(false, |f| f.filename() == filename)
    }

    /// Installs a freshly loaded page: pinned once, clean, recently used.
    pub(crate) fn set(&mut self, file: FileRef, page_id: PageId) {
        self.file = Some(file);
        self.page_id = page_id;
        self.pin_cnt = 1;
        self.dirty = false;
        self.valid = true;
        self.refbit = true;
        self.generation += 1;
    }

    pub(crate) fn clear(&mut self) {
        self.file = None;
        self.page_id = INVALID_PAGE_ID;
        self.pin_cnt = 0;
        self.dirty = false;
        self.valid = false;
        self.refbit = false;
    }

    pub(crate) fn pin(&mut self) {
        self.pin_cnt += 1;
        self.refbit = true;
    }

    // caller checks pin_cnt > 0
    pub(crate) fn unpin(&mut self, is_dirty: bool) {
        self.pin_cnt -= 1;
        if is_dirty {
            self.dirty = true;
        }
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub(crate) fn set_refbit(&mut self, refbit: bool) {
        self.refbit = refbit;
    }
}

impl fmt::Display for FrameDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&FrameInfo::of(self), f)
    }
}
