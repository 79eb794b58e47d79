mod buffer;
mod storage;

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate slog;
extern crate slog_async;
extern crate slog_term;

pub use self::buffer::buffer_pool_manager::{
    BufStats, BufferPoolManager, PageHandle, SharedBufferPool,
};
pub use self::buffer::report::{FrameInfo, PoolReport};
pub use self::storage::disk::disk_file::DiskFile;
pub use self::storage::disk::mem_file::MemFile;
pub use self::storage::disk::page_file::{FileRef, PageFile};
pub use self::storage::page::Page;

pub mod errors {
    pub use crate::buffer::error::{BufferError, BufferResult};
    pub use anyhow::Error;
    pub use anyhow::Result;
}

pub fn default_logger() -> slog::Logger {
    use slog::Drain;

    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    slog::Logger::root(drain, o!())
}

pub const PAGE_SIZE: usize = 4096;
pub const INVALID_PAGE_ID: PageId = 0;

pub type FrameId = u32;
pub type PageId = u32;
