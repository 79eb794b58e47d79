use crate::errors::Result;
use crate::{PageId, INVALID_PAGE_ID, PAGE_SIZE};
use std::convert::TryInto;
use std::fmt;

/// Fixed-size page image together with the page number it belongs to.
#[derive(Clone, PartialEq, Eq)]
pub struct Page {
    data: Box<[u8; PAGE_SIZE]>,
    page_id: PageId,
}

impl Page {
    pub fn new(page_id: PageId) -> Self {
        Self {
            data: Box::new([0; PAGE_SIZE]),
            page_id,
        }
    }

    pub fn from_bytes(page_id: PageId, bytes: &[u8]) -> Result<Self> {
        ensure!(
            bytes.len() == PAGE_SIZE,
            "page image must be {} bytes, got {}",
            PAGE_SIZE,
            bytes.len()
        );
        let mut page = Self::new(page_id);
        page.put_data(bytes);
        Ok(page)
    }

    pub fn get_id(&self) -> PageId {
        self.page_id
    }
    pub fn get_data(&self) -> Vec<u8> {
        self.data.to_vec()
    }
    // panics if `data` is not exactly PAGE_SIZE bytes
    pub fn put_data(&mut self, data: &[u8]) {
        self.data.copy_from_slice(data)
    }
    pub fn data(&self) -> &[u8] {
        &self.data[..]
    }
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data[..]
    }

    pub fn read_bytes(&self, offset: usize, len: usize) -> Result<&[u8]> {
        check_range(offset, len)?;
        Ok(&self.data[offset..offset + len])
    }

    pub fn write_bytes(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        check_range(offset, bytes.len())?;
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    pub fn read_u32(&self, offset: usize) -> Result<u32> {
        let bytes: [u8; 4] = self.read_bytes(offset, 4)?.try_into()?;
        Ok(u32::from_le_bytes(bytes))
    }

    pub fn write_u32(&mut self, offset: usize, value: u32) -> Result<()> {
        self.write_bytes(offset, &value.to_le_bytes())
    }
}

fn check_range(offset: usize, len: usize) -> Result<()> {
    match offset.checked_add(len) {
        Some(end) if end <= PAGE_SIZE => Ok(()),
        _ => bail!(
            "range {}..{}+{} is outside of a {} byte page",
            offset,
            offset,
            len,
            PAGE_SIZE
        ),
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(INVALID_PAGE_ID)
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("page_id", &self.page_id)
            .field("head", &&self.data[..16])
            .finish()
    }
}
