pub mod disk_file;
pub mod mem_file;
pub mod page_file;
