//! ECM partial page frame store
//!
//! One block of error corrected image data is up to 256 frames. On the
//! sending side each slot holds a complete FCD frame ready for the wire; on
//! the receiving side it holds the frame's image payload. An empty slot is
//! simply absent, which on the sending side means "the far end has this
//! frame already" once a PPR has been processed.

use crate::t30::fcf;

/// Frames per partial page block.
pub const MAX_ECM_FRAMES: usize = 256;

/// Octets in the PPR bitmap of wanted frames.
pub const PPR_MAP_LEN: usize = 32;

#[derive(Debug)]
pub struct EcmFrameStore {
    frames: Vec<Option<Vec<u8>>>,
    /// Frames in the current block; None until a PPS or page fill tells us.
    pub frames_in_block: Option<usize>,
    /// Next frame index the sender will look at.
    pub current_frame: usize,
    pub page: u32,
    pub block: u32,
    /// The block ends at the end of the page, not just a partial page.
    pub at_page_end: bool,
}

impl Default for EcmFrameStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EcmFrameStore {
    pub fn new() -> Self {
        Self {
            frames: (0..MAX_ECM_FRAMES).map(|_| None).collect(),
            frames_in_block: None,
            current_frame: 0,
            page: 0,
            block: 0,
            at_page_end: false,
        }
    }

    /// Drop all frames, as happens at each partial page boundary.
    pub fn clear(&mut self) {
        for slot in &mut self.frames {
            *slot = None;
        }
        self.frames_in_block = None;
    }

    pub fn set_frame(&mut self, index: usize, data: Vec<u8>) {
        self.frames[index] = Some(data);
    }

    pub fn frame(&self, index: usize) -> Option<&Vec<u8>> {
        self.frames[index].as_ref()
    }

    pub fn drop_frame(&mut self, index: usize) {
        self.frames[index] = None;
    }

    /// Take every stored frame in order, for committing a received block to
    /// the page decoder.
    pub fn take_frames(&mut self) -> Vec<Vec<u8>> {
        let count = self.frames_in_block.unwrap_or(0);
        let mut out = Vec::new();
        for slot in self.frames.iter_mut().take(count) {
            if let Some(data) = slot.take() {
                out.push(data);
            }
        }
        self.clear();
        out
    }

    /// Receiver side: the PPR bitmap of frames still wanted. Bit k of byte
    /// j names frame j*8+k; a set bit means the frame is missing.
    pub fn missing_map(&self) -> [u8; PPR_MAP_LEN] {
        let mut map = [0u8; PPR_MAP_LEN];
        for (i, slot) in self.frames.iter().enumerate() {
            if slot.is_none() {
                map[i >> 3] |= 1 << (i & 7);
            }
        }
        map
    }

    /// Receiver side: index of the first missing frame, or the block size
    /// if everything arrived.
    pub fn first_missing(&self) -> usize {
        let count = self.frames_in_block.unwrap_or(0);
        for i in 0..count {
            if self.frames[i].is_none() {
                return i;
            }
        }
        count
    }

    /// Sender side: apply a received PPR bitmap. Frames the far end did not
    /// ask for again are released; the ones it wants stay queued, and the
    /// retransmission cursor rewinds to the start.
    pub fn apply_ppr(&mut self, map: &[u8]) -> usize {
        let mut wanted = 0;
        for i in 0..MAX_ECM_FRAMES {
            let byte = map.get(i >> 3).copied().unwrap_or(0);
            if byte & (1 << (i & 7)) == 0 {
                self.frames[i] = None;
            } else if self.frames[i].is_some() {
                wanted += 1;
            }
        }
        self.current_frame = 0;
        wanted
    }

    /// Sender side: the next still-queued frame at or after the cursor.
    pub fn next_to_send(&mut self) -> Option<(usize, Vec<u8>)> {
        let count = self.frames_in_block?;
        for i in self.current_frame..count {
            if let Some(data) = &self.frames[i] {
                self.current_frame = i + 1;
                return Some((i, data.clone()));
            }
        }
        None
    }

    /// Build the wire form of one FCD frame: address, control, FCD, frame
    /// number, then the payload.
    pub fn wire_frame(frame_no: usize, payload: &[u8]) -> Vec<u8> {
        let mut frame = Vec::with_capacity(payload.len() + 4);
        frame.push(fcf::ADDRESS);
        frame.push(fcf::CONTROL_NON_FINAL);
        frame.push(fcf::FCD);
        frame.push(frame_no as u8);
        frame.extend_from_slice(payload);
        frame
    }
}
