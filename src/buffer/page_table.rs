use crate::buffer::error::{BufferError, BufferResult};
use crate::{FrameId, PageId};
use std::collections::HashMap;

// about 1.2 slots per frame, always odd
fn hashtable_sz(num_bufs: usize) -> usize {
    ((num_bufs * 6 / 5) & !1) + 1
}

type FileId = u32;

struct FileSlot {
    id: FileId,
    resident: usize,
}

/// Maps `(filename, page_id)` to the frame caching that page.
///
/// Entries of all files share one map sized once from the pool size. Filenames
/// are interned to a small id, so a lookup borrows the filename instead of
/// building an owned key.
pub(crate) struct PageTable {
    files: HashMap<String, FileSlot>,
    frames: HashMap<(FileId, PageId), FrameId>,
    next_file_id: FileId,
}

impl PageTable {
    pub fn new(num_bufs: usize) -> Self {
        Self {
            files: HashMap::new(),
            frames: HashMap::with_capacity(hashtable_sz(num_bufs)),
            next_file_id: 0,
        }
    }

    /// A miss is an ordinary outcome, not an error.
    pub fn lookup(&self, filename: &str, page_id: PageId) -> Option<FrameId> {
        let slot = self.files.get(filename)?;
        self.frames.get(&(slot.id, page_id)).copied()
    }

    pub fn insert(
        &mut self,
        filename: &str,
        page_id: PageId,
        frame_id: FrameId,
    ) -> BufferResult<()> {
        if let Some(existing) = self.lookup(filename, page_id) {
            return Err(BufferError::AlreadyPresent {
                filename: filename.to_string(),
                page_id,
                frame_id: existing,
            });
        }
        let id = match self.files.get_mut(filename) {
            Some(slot) => {
                slot.resident += 1;
                slot.id
            }
            None => {
                let id = self.next_file_id;
                self.next_file_id += 1;
                self.files.insert(filename.to_string(), FileSlot { id, resident: 1 });
                id
            }
        };
        self.frames.insert((id, page_id), frame_id);
        Ok(())
    }

    pub fn remove(&mut self, filename: &str, page_id: PageId) -> BufferResult<FrameId> {
        let not_found = || BufferError::NotFound {
            filename: filename.to_string(),
            page_id,
        };
        let slot = self.files.get_mut(filename).ok_or_else(not_found)?;
        let frame_id = self.frames.remove(&(slot.id, page_id)).ok_or_else(not_found)?;
        slot.resident -= 1;
        if slot.resident == 0 {
            self.files.remove(filename);
        }
        Ok(frame_id)
    }

    pub fn entries_for(&self, filename: &str) -> usize {
        self.files.get(filename).map_or(0, |slot| slot.resident)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[cfg(test)]
    fn capacity(&self) -> usize {
        self.frames.capacity()
    }
}
