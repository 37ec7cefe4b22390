//! T.4/T.6 page decoder
//!
//! Decodes MH/MR/MMR bit streams back into page bitmaps, one bit at a time
//! as they arrive from the modem or the ECM layer. The decoder keeps a
//! 13-bit shift register; the first-received bit sits at the bottom, and the
//! lookup tables in `tables` are keyed directly by the register contents.
//!
//! Damaged rows are detected by checking the accumulated run lengths against
//! the page width at each EOL. A bad row is replaced by a copy of the row
//! above it, and the reference run list is left describing that repaired row
//! so 2-D decoding of the following row stays coherent.

use tracing::{debug, trace, warn};

use crate::t4::image::{Document, ImageError, PageImage};
use crate::t4::tables::{Decoded, BLACK_LUT, TWO_D_LUT, WHITE_LUT};
use crate::t4::{Compression, CopyQuality, T4Stats};

/// Page decoder state; one per receiving document.
pub struct T4Decoder {
    path: String,
    doc: Document,
    encoding: Compression,
    image_width: usize,
    x_resolution: u32,
    y_resolution: u32,

    // Shift register; first received bit at bit 0
    window: u32,
    bits_avail: i32,
    first_eol_seen: bool,
    consecutive_eols: u32,

    // Row assembly
    row_bits: Vec<bool>,
    cur_runs: Vec<u32>,
    ref_runs: Vec<u32>,
    pb: usize,
    a0: i64,
    b1: i64,
    run_length: i64,
    row_len: i64,
    its_black: bool,
    black_white: u8,
    row_is_2d: bool,

    // Completed rows
    image: Vec<u8>,
    image_length: usize,
    last_row: Vec<u8>,

    bad_rows: usize,
    curr_bad_row_run: usize,
    longest_bad_row_run: usize,

    pages_transferred: usize,
}

impl T4Decoder {
    /// Open a receive document destined for `path`.
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            doc: Document::new(),
            encoding: Compression::T4OneD,
            image_width: 1728,
            x_resolution: 8037,
            y_resolution: 3850,
            window: 0,
            bits_avail: 0,
            first_eol_seen: false,
            consecutive_eols: 0,
            row_bits: Vec::new(),
            cur_runs: Vec::new(),
            ref_runs: Vec::new(),
            pb: 0,
            a0: 0,
            b1: 0,
            run_length: 0,
            row_len: 0,
            its_black: false,
            black_white: 0,
            row_is_2d: false,
            image: Vec::new(),
            image_length: 0,
            last_row: Vec::new(),
            bad_rows: 0,
            curr_bad_row_run: 0,
            longest_bad_row_run: 0,
            pages_transferred: 0,
        }
    }

    pub fn set_encoding(&mut self, encoding: Compression) {
        self.encoding = encoding;
    }

    pub fn set_image_width(&mut self, width: usize) {
        self.image_width = width;
    }

    pub fn set_x_resolution(&mut self, resolution: u32) {
        self.x_resolution = resolution;
    }

    pub fn set_y_resolution(&mut self, resolution: u32) {
        self.y_resolution = resolution;
    }

    pub fn set_far_ident(&mut self, ident: &str) {
        self.doc.remote_ident = ident.to_string();
    }

    pub fn set_sub_address(&mut self, sub_address: &str) {
        self.doc.sub_address = sub_address.to_string();
    }

    pub fn pages_transferred(&self) -> usize {
        self.pages_transferred
    }

    /// Reset the decoder for a fresh page.
    pub fn start_page(&mut self) {
        debug!(
            page = self.pages_transferred,
            width = self.image_width,
            encoding = ?self.encoding,
            "start rx page"
        );
        self.window = 0;
        self.bits_avail = 0;
        // T.6 streams carry no EOL markers, so there is nothing to gate on.
        self.first_eol_seen = self.encoding == Compression::T6;
        self.consecutive_eols = 0;
        self.row_bits.clear();
        self.cur_runs.clear();
        self.ref_runs = vec![self.image_width as u32];
        self.pb = 1;
        self.a0 = 0;
        self.b1 = self.image_width as i64;
        self.run_length = 0;
        self.row_len = 0;
        self.its_black = false;
        self.black_white = 0;
        self.row_is_2d = self.encoding == Compression::T6;
        self.image.clear();
        self.image_length = 0;
        self.last_row.clear();
        self.bad_rows = 0;
        self.curr_bad_row_run = 0;
        self.longest_bad_row_run = 0;
    }

    fn bytes_per_row(&self) -> usize {
        (self.image_width + 7) / 8
    }

    /// Reference row run at index `i`; out-of-range reads act like one huge
    /// run so the b1 tracking loops always terminate.
    fn ref_run(&self, i: usize) -> i64 {
        self.ref_runs.get(i).copied().unwrap_or(self.image_width as u32) as i64
    }

    /// Advance b1 past a0, per the changing-element rules.
    fn sync_b1(&mut self) {
        if self.cur_runs.is_empty() {
            return;
        }
        while self.b1 <= self.a0 && self.b1 < self.image_width as i64 {
            let step = self.ref_run(self.pb) + self.ref_run(self.pb + 1);
            self.b1 += step;
            self.pb += 2;
        }
    }

    /// Commit the accumulated run to the row.
    fn put_run(&mut self, black: bool) {
        self.row_len += self.run_length;
        if self.row_len <= self.image_width as i64 && self.run_length >= 0 {
            self.cur_runs.push(self.run_length as u32);
            for _ in 0..self.run_length {
                self.row_bits.push(black);
            }
        }
        self.run_length = 0;
    }

    /// Finish the current row: verify its length, repair it if damaged, and
    /// set up the reference state for the next row.
    fn put_eol(&mut self) {
        if self.run_length > 0 {
            self.put_run(false);
        }
        let bpr = self.bytes_per_row();
        if self.row_len != self.image_width as i64 {
            trace!(
                row = self.image_length,
                row_len = self.row_len,
                two_d = self.row_is_2d,
                "bad row"
            );
            // Copy the row above over the damaged one. Its run list is
            // already in ref_runs, which therefore stays valid as the
            // reference for the next row.
            let repaired = if self.last_row.is_empty() {
                vec![0u8; bpr]
            } else {
                self.last_row.clone()
            };
            self.image.extend_from_slice(&repaired);
            self.last_row = repaired;
            if self.ref_runs.is_empty() {
                self.ref_runs = vec![self.image_width as u32];
            }
            self.bad_rows += 1;
            self.curr_bad_row_run += 1;
        } else {
            if self.curr_bad_row_run > self.longest_bad_row_run {
                self.longest_bad_row_run = self.curr_bad_row_run;
            }
            self.curr_bad_row_run = 0;
            let mut bytes = vec![0u8; bpr];
            for (i, bit) in self.row_bits.iter().enumerate() {
                if *bit {
                    bytes[i >> 3] |= 0x80 >> (i & 7);
                }
            }
            self.image.extend_from_slice(&bytes);
            self.last_row = bytes;
            std::mem::swap(&mut self.ref_runs, &mut self.cur_runs);
        }
        self.image_length += 1;
        self.cur_runs.clear();
        self.row_bits.clear();
        self.pb = 0;
        self.a0 = 0;
        self.b1 = self.ref_run(0);
        self.pb = 1;
        self.row_len = 0;
        self.run_length = 0;
    }

    /// Push one received bit through the decoder.
    ///
    /// Returns true once the end of the page has been seen (five consecutive
    /// EOLs in T.4 modes).
    pub fn put_bit(&mut self, bit: u8) -> bool {
        self.window = (self.window >> 1) | (((bit & 1) as u32) << 12);
        self.bits_avail += 1;
        if self.bits_avail < 13 {
            return false;
        }
        if !self.first_eol_seen {
            // Nothing reaches the decoder until the first EOL arrives.
            if self.window & 0xFFF != 0x800 {
                self.bits_avail -= 1;
                return false;
            }
            self.bits_avail = if self.encoding == Compression::T4OneD { 1 } else { 0 };
            self.first_eol_seen = true;
            return false;
        }
        if self.consecutive_eols >= 5 {
            return true;
        }

        if self.row_is_2d && self.black_white == 0 {
            self.decode_2d_step()
        } else if self.its_black {
            self.decode_black_step()
        } else {
            self.decode_white_step()
        }
    }

    /// Push a whole received octet, MSB first.
    pub fn put_byte(&mut self, byte: u8) -> bool {
        let mut ended = false;
        for i in (0..8).rev() {
            if self.put_bit((byte >> i) & 1) {
                ended = true;
            }
        }
        ended
    }

    fn decode_2d_step(&mut self) -> bool {
        if self.window & 0xFFF == 0x800 {
            // EOL, with the tag bit for the next row's mode behind it
            if self.row_len == 0 {
                self.consecutive_eols += 1;
                if self.consecutive_eols >= 5 {
                    return true;
                }
            } else {
                self.consecutive_eols = 0;
                self.put_eol();
            }
            self.row_is_2d = self.window & 0x1000 == 0;
            self.bits_avail -= 13;
            self.its_black = false;
            self.row_len = 0;
            return false;
        }
        let entry = TWO_D_LUT[(self.window & 0x7F) as usize];
        match entry.decoded {
            Decoded::Pass => {
                if self.row_len < self.image_width as i64 {
                    self.sync_b1();
                    self.b1 += self.ref_run(self.pb);
                    self.pb += 1;
                    self.run_length += self.b1 - self.a0;
                    self.a0 = self.b1;
                    self.b1 += self.ref_run(self.pb);
                    self.pb += 1;
                }
            }
            Decoded::Horizontal => {
                self.its_black = self.cur_runs.len() & 1 == 1;
                self.black_white = 2;
            }
            Decoded::Vertical(d) => {
                if self.row_len < self.image_width as i64 {
                    self.sync_b1();
                    let new_a0 = self.b1 + d as i64;
                    self.run_length += new_a0 - self.a0;
                    self.a0 = new_a0;
                    let black = self.cur_runs.len() & 1 == 1;
                    self.put_run(black);
                    if d >= 0 {
                        self.b1 += self.ref_run(self.pb);
                        self.pb += 1;
                    } else if self.pb > 0 {
                        self.pb -= 1;
                        self.b1 -= self.ref_run(self.pb);
                    }
                }
            }
            Decoded::Extension => {
                warn!("2-D extension code in image data; padding row");
                if self.row_len < self.image_width as i64 {
                    self.run_length = self.image_width as i64 - self.a0;
                    self.put_run(false);
                }
            }
            Decoded::Incomplete => {
                self.bits_avail -= 1;
                return false;
            }
            _ => {}
        }
        self.bits_avail -= entry.width as i32;
        self.check_t6_row_end();
        false
    }

    fn decode_black_step(&mut self) -> bool {
        let entry = BLACK_LUT[(self.window & 0x1FFF) as usize];
        match entry.decoded {
            Decoded::MakeUp(run) => {
                if self.row_len < self.image_width as i64 {
                    self.run_length += run as i64;
                    self.a0 += run as i64;
                }
            }
            Decoded::Terminating(run) => {
                if self.row_len < self.image_width as i64 {
                    self.run_length += run as i64;
                    self.a0 += run as i64;
                    self.put_run(true);
                    self.finish_horizontal_run();
                }
                self.its_black = false;
            }
            Decoded::Eol => return self.handle_eol(entry.width),
            Decoded::Incomplete => {
                // Fill ahead of an EOL, or a damaged code. Slide one bit.
                self.bits_avail -= 1;
                return false;
            }
            _ => {}
        }
        self.bits_avail -= entry.width as i32;
        self.check_t6_row_end();
        false
    }

    fn decode_white_step(&mut self) -> bool {
        let entry = WHITE_LUT[(self.window & 0xFFF) as usize];
        match entry.decoded {
            Decoded::MakeUp(run) => {
                if self.row_len < self.image_width as i64 {
                    self.run_length += run as i64;
                    self.a0 += run as i64;
                }
            }
            Decoded::Terminating(run) => {
                if self.row_len < self.image_width as i64 {
                    self.run_length += run as i64;
                    self.a0 += run as i64;
                    self.put_run(false);
                    self.finish_horizontal_run();
                }
                self.its_black = true;
            }
            Decoded::Eol => return self.handle_eol(entry.width),
            Decoded::Incomplete => {
                self.bits_avail -= 1;
                return false;
            }
            _ => {}
        }
        self.bits_avail -= entry.width as i32;
        self.check_t6_row_end();
        false
    }

    /// Bookkeeping shared by the two 1-D run branches when a horizontal-mode
    /// pair of runs completes.
    fn finish_horizontal_run(&mut self) {
        if self.black_white > 0 {
            if self.black_white == 1 {
                self.sync_b1();
            }
            self.black_white -= 1;
        }
    }

    fn handle_eol(&mut self, width: u8) -> bool {
        if self.row_len == 0 {
            self.consecutive_eols += 1;
            if self.consecutive_eols >= 5 {
                return true;
            }
        } else {
            self.consecutive_eols = 0;
            self.put_eol();
        }
        self.bits_avail -= width as i32;
        if self.encoding != Compression::T4OneD {
            self.row_is_2d = self.window & 0x1000 == 0;
            self.bits_avail -= 1;
        }
        self.its_black = false;
        self.row_len = 0;
        false
    }

    fn check_t6_row_end(&mut self) {
        if self.encoding == Compression::T6 && self.row_len >= self.image_width as i64 {
            // T.6 has no EOL markers; a row ends when its length says so.
            self.put_eol();
            self.its_black = false;
        }
    }

    /// Close out the current page and append it to the document.
    pub fn end_page(&mut self) -> Result<(), ImageError> {
        if self.encoding == Compression::T6 {
            // Push enough zeros through to flush any code still in the register.
            for _ in 0..13 {
                self.put_bit(0);
            }
        }
        if self.curr_bad_row_run > self.longest_bad_row_run {
            self.longest_bad_row_run = self.curr_bad_row_run;
        }
        self.curr_bad_row_run = 0;
        if self.image.is_empty() {
            return Err(ImageError::NoPage {
                index: self.pages_transferred,
            });
        }
        debug!(
            rows = self.image_length,
            bad_rows = self.bad_rows,
            "end rx page"
        );
        self.doc.pages.push(PageImage {
            width: self.image_width,
            length: self.image_length,
            x_resolution: self.x_resolution,
            y_resolution: self.y_resolution,
            data: std::mem::take(&mut self.image),
        });
        self.image_length = 0;
        self.pages_transferred += 1;
        Ok(())
    }

    /// Write the received document out to its file.
    pub fn end(&mut self) -> Result<(), ImageError> {
        self.doc.save(&self.path)
    }

    /// Borrow the document received so far.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Classify the most recent page for the post-message response choice.
    pub fn copy_quality(&self) -> CopyQuality {
        let length = self
            .doc
            .pages
            .last()
            .map(|p| p.length)
            .unwrap_or(self.image_length);
        if self.bad_rows * 50 < length {
            CopyQuality::Good
        } else if self.bad_rows * 20 < length {
            CopyQuality::Poor
        } else {
            CopyQuality::Bad
        }
    }

    pub fn stats(&self) -> T4Stats {
        T4Stats {
            pages_transferred: self.pages_transferred,
            width: self.image_width,
            length: self
                .doc
                .pages
                .last()
                .map(|p| p.length)
                .unwrap_or(self.image_length),
            bad_rows: self.bad_rows,
            longest_bad_row_run: self.longest_bad_row_run,
            x_resolution: self.x_resolution,
            y_resolution: self.y_resolution,
            encoding: self.encoding,
            image_size: self.doc.pages.last().map(|p| p.data.len()).unwrap_or(0),
        }
    }
}
