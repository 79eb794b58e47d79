use crate::buffer::frame::FrameDesc;
use crate::buffer::replace::Replacer;
use crate::FrameId;

/// Second-chance clock over the frame descriptors.
///
/// The hand only ever moves inside [`Replacer::victim`]; callers can read and
/// update descriptors but never reposition the hand.
pub(crate) struct ClockState {
    hand: usize,
    frames: Vec<FrameDesc>,
}

impl ClockState {
    pub fn new(num_bufs: usize) -> Self {
        assert!(num_bufs > 0, "buffer pool needs at least one frame");
        Self {
            hand: 0,
            frames: (0..num_bufs).map(|i| FrameDesc::new(i as FrameId)).collect(),
        }
    }

    fn advance(&mut self) {
        self.hand = (self.hand + 1) % self.frames.len();
    }

    pub fn frames(&self) -> &[FrameDesc] {
        &self.frames
    }

    pub fn frame(&self, frame_id: FrameId) -> &FrameDesc {
        &self.frames[frame_id as usize]
    }

    pub fn frame_mut(&mut self, frame_id: FrameId) -> &mut FrameDesc {
        &mut self.frames[frame_id as usize]
    }
}

impl Replacer for ClockState {
    // An empty frame is taken as is. A valid frame with its refbit set loses the bit and is
    // passed over once; a pinned frame is always passed over. Two revolutions are enough:
    // the first can only clear refbits, the second visits every frame with its bit clear.
    //
    // The returned frame may still hold an unpinned page, evicting it is up to the caller.
    // When nothing qualifies, the cleared refbits and the hand are put back as they were.
    fn victim(&mut self) -> Option<FrameId> {
        let start = self.hand;
        let mut cleared = Vec::new();

        for _ in 0..2 * self.frames.len() {
            let frame = &mut self.frames[self.hand];
            if !frame.is_valid() {
                return Some(self.hand as FrameId);
            }
            if frame.refbit() {
                frame.set_refbit(false);
                cleared.push(self.hand);
                self.advance();
            } else if frame.pin_cnt() > 0 {
                self.advance();
            } else {
                return Some(self.hand as FrameId);
            }
        }

        for i in cleared {
            self.frames[i].set_refbit(true);
        }
        self.hand = start;
        None
    }

    fn size(&self) -> usize {
        self.frames
            .iter()
            .filter(|f| !f.is_valid() || f.pin_cnt() == 0)
            .count()
    }
}
