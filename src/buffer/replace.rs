use crate::FrameId;

pub trait Replacer {
    /// Picks the frame the next page goes into, or `None` when nothing can be evicted.
    fn victim(&mut self) -> Option<FrameId>;
    /// Number of frames `victim` could currently hand out.
    fn size(&self) -> usize;
}
