pub mod buffer_pool_manager;
pub mod clock_replacer;
pub mod error;
pub mod frame;
mod page_table;
mod pool;
mod replace;
pub mod report;
