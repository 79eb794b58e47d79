use crate::storage::page::Page;
use crate::FrameId;

// Page images of the buffer pool, indexed like the frame descriptors.
pub(crate) struct BufferPool {
    pages: Vec<Page>,
}

impl BufferPool {
    pub fn new(num_bufs: usize) -> Self {
        Self {
            pages: (0..num_bufs).map(|_| Page::default()).collect(),
        }
    }

    pub fn get(&self, frame_id: FrameId) -> &Page {
        &self.pages[frame_id as usize]
    }

    pub fn get_mut(&mut self, frame_id: FrameId) -> &mut Page {
        &mut self.pages[frame_id as usize]
    }

    pub fn install(&mut self, frame_id: FrameId, page: Page) {
        self.pages[frame_id as usize] = page;
    }
}
