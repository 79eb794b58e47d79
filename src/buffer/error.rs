use crate::{FrameId, PageId};

pub type BufferResult<T> = std::result::Result<T, BufferError>;

#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("page {page_id} of {filename} is not resident in the buffer pool")]
    NotFound { filename: String, page_id: PageId },

    #[error("page {page_id} of {filename} is already mapped to frame {frame_id}")]
    AlreadyPresent {
        filename: String,
        page_id: PageId,
        frame_id: FrameId,
    },

    #[error("buffer pool exhausted: all {num_bufs} frames are pinned")]
    PoolExhausted { num_bufs: usize },

    #[error("page {page_id} of {filename} in frame {frame_id} is not pinned")]
    PageNotPinned {
        filename: String,
        page_id: PageId,
        frame_id: FrameId,
    },

    #[error("page {page_id} of {filename} in frame {frame_id} is still pinned")]
    PagePinned {
        filename: String,
        page_id: PageId,
        frame_id: FrameId,
    },

    #[error("bad buffer in frame {frame_id} (dirty: {dirty}, valid: {valid}, refbit: {refbit})")]
    BadBuffer {
        frame_id: FrameId,
        dirty: bool,
        valid: bool,
        refbit: bool,
    },

    #[error("handle to page {page_id} in frame {frame_id} no longer refers to a pinned page")]
    StaleHandle { frame_id: FrameId, page_id: PageId },

    #[error(transparent)]
    Io(#[from] anyhow::Error),
}
