use crate::buffer::frame::FrameDesc;
use crate::{FrameId, PageId};
use std::fmt;

/// Snapshot of one frame descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameInfo {
    pub frame_id: FrameId,
    pub filename: Option<String>,
    pub page_id: PageId,
    pub valid: bool,
    pub pin_cnt: u32,
    pub dirty: bool,
    pub refbit: bool,
}

impl FrameInfo {
    pub(crate) fn of(desc: &FrameDesc) -> Self {
        Self {
            frame_id: desc.frame_id(),
            filename: desc.file().map(|f| f.filename().to_string()),
            page_id: desc.page_id(),
            valid: desc.is_valid(),
            pin_cnt: desc.pin_cnt(),
            dirty: desc.is_dirty(),
            refbit: desc.refbit(),
        }
    }
}

impl fmt::Display for FrameInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.filename, self.valid) {
            (Some(filename), true) => write!(f, "file:{} pageNo:{} ", filename, self.page_id)?,
            _ => write!(f, "file:NULL ")?,
        }
        write!(
            f,
            "valid:{} pinCnt:{} dirty:{} refbit:{}",
            self.valid, self.pin_cnt, self.dirty, self.refbit
        )
    }
}

/// What [`BufferPoolManager::inspect`](crate::BufferPoolManager::inspect) sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolReport {
    pub frames: Vec<FrameInfo>,
    pub valid_frames: usize,
    // empty or unpinned, i.e. what the clock could hand out right now
    pub evictable_frames: usize,
}

impl PoolReport {
    pub(crate) fn from_frames<'a>(
        descs: impl IntoIterator<Item = &'a FrameDesc>,
        evictable_frames: usize,
    ) -> Self {
        let frames: Vec<FrameInfo> = descs.into_iter().map(FrameInfo::of).collect();
        let valid_frames = frames.iter().filter(|f| f.valid).count();
        Self {
            frames,
            valid_frames,
            evictable_frames,
        }
    }
}

impl fmt::Display for PoolReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in &self.frames {
            writeln!(f, "FrameNo:{} {}", frame.frame_id, frame)?;
        }
        writeln!(f, "Total Number of Valid Frames:{}", self.valid_frames)
    }
}
