//! T.4/T.6 page encoder
//!
//! Encodes packed bi-level pages into MH (1-D), MR (2-D) or MMR (T.6) bit
//! streams. A whole page is encoded up front when the page is started, then
//! pulled out bit by bit by the session engine at modem pace.

use tracing::{debug, warn};

use crate::bits::BitWriter;
use crate::t4::font;
use crate::t4::image::{Document, ImageError, PageImage};
use crate::t4::tables::{self, CodeEntry, BLACK_CODES, WHITE_CODES};
use crate::t4::{rows_per_1d_interleave, Compression};

/// Pixel value at a bit offset in a packed row; true = black.
fn pixel(row: &[u8], x: usize) -> bool {
    (row[x >> 3] & (0x80 >> (x & 7))) != 0
}

/// Length of the run of `black` pixels starting at `start`.
///
/// Returns 0 when the pixel at `start` is the other colour, which is what
/// the 2-D coder leans on to step across changing elements.
fn find_span(row: &[u8], start: usize, end: usize, black: bool) -> usize {
    let mut i = start;
    while i < end && pixel(row, i) == black {
        i += 1;
    }
    i - start
}

/// Page encoder state; one per sending document.
pub struct T4Encoder {
    doc: Document,
    page_index: usize,
    stop_page: usize,
    encoding: Compression,
    min_row_bits: usize,
    local_ident: String,
    header_info: String,

    image_width: usize,
    x_resolution: u32,
    y_resolution: u32,

    // Per-page encode state
    writer: BitWriter,
    row_bits: usize,
    suppress_row_padding: bool,
    row_is_2d: bool,
    rows_to_next_1d_row: i32,
    max_rows_to_next_1d_row: i32,
    ref_row: Vec<u8>,

    // Encoded page buffer and the read cursor into it
    buf: Vec<u8>,
    bit_ptr: usize,
    bit_pos: u8,
}

impl T4Encoder {
    /// Open a document for sending, from `start_page` through `stop_page`
    /// inclusive.
    pub fn new(path: &str, start_page: usize, stop_page: usize) -> Result<Self, ImageError> {
        let doc = Document::load(path)?;
        if start_page >= doc.pages.len() {
            return Err(ImageError::NoPage { index: start_page });
        }
        debug!(pages = doc.pages.len(), start_page, "start tx document");
        Ok(Self {
            doc,
            page_index: start_page,
            stop_page,
            encoding: Compression::T4OneD,
            min_row_bits: 0,
            local_ident: String::new(),
            header_info: String::new(),
            image_width: 0,
            x_resolution: 0,
            y_resolution: 0,
            writer: BitWriter::new(),
            row_bits: 0,
            suppress_row_padding: false,
            row_is_2d: false,
            rows_to_next_1d_row: 0,
            max_rows_to_next_1d_row: 2,
            ref_row: Vec::new(),
            buf: Vec::new(),
            bit_ptr: 0,
            bit_pos: 7,
        })
    }

    pub fn set_encoding(&mut self, encoding: Compression) {
        self.encoding = encoding;
        self.row_is_2d = false;
        self.rows_to_next_1d_row = self.max_rows_to_next_1d_row - 1;
    }

    /// Set the minimum encoded bits per row, used to satisfy the far end's
    /// minimum scan-line time. Zero disables padding.
    pub fn set_min_row_bits(&mut self, bits: usize) {
        self.min_row_bits = bits;
    }

    pub fn set_local_ident(&mut self, ident: &str) {
        self.local_ident = ident.to_string();
    }

    pub fn set_header_info(&mut self, info: &str) {
        self.header_info = info.to_string();
    }

    pub fn image_width(&self) -> usize {
        self.doc.pages[self.page_index].width
    }

    pub fn x_resolution(&self) -> u32 {
        self.doc.pages[self.page_index].x_resolution
    }

    pub fn y_resolution(&self) -> u32 {
        self.doc.pages[self.page_index].y_resolution
    }

    /// True if another page exists beyond the current one and the stop page
    /// has not been reached.
    pub fn more_pages(&self) -> bool {
        self.page_index + 1 < self.doc.pages.len() && self.page_index + 1 <= self.stop_page
    }

    pub fn end_page(&mut self) {
        self.page_index += 1;
    }

    /// Rewind the encoded page so it can be sent again after RTN/RTP.
    pub fn restart_page(&mut self) {
        self.bit_ptr = 0;
        self.bit_pos = 7;
        self.row_bits = 0;
    }

    /// Encode the current page into the pull buffer.
    pub fn start_page(&mut self) -> Result<(), ImageError> {
        if self.page_index > self.stop_page || self.page_index >= self.doc.pages.len() {
            return Err(ImageError::NoPage { index: self.page_index });
        }
        let page = self.doc.pages[self.page_index].clone();
        debug!(page = self.page_index, width = page.width, "start tx page");
        self.image_width = page.width;
        self.x_resolution = page.x_resolution;
        self.y_resolution = page.y_resolution;
        self.max_rows_to_next_1d_row = rows_per_1d_interleave(page.y_resolution);
        self.rows_to_next_1d_row = self.max_rows_to_next_1d_row - 1;
        self.row_is_2d = self.encoding == Compression::T6;
        self.writer = BitWriter::new();
        self.row_bits = 0;
        self.suppress_row_padding = false;
        self.ref_row = vec![0; page.bytes_per_row()];

        if !self.header_info.is_empty() {
            self.encode_header(&page);
        }
        for row in 0..page.length {
            self.encode_row_buf(&page.row(row).to_vec());
        }
        if self.encoding != Compression::T6 {
            // Attach a return to control (RTC == 6 x EOLs) to the end of the page
            self.row_is_2d = false;
            for _ in 0..6 {
                self.encode_eol();
                self.suppress_row_padding = true;
            }
            self.suppress_row_padding = false;
        }
        let writer = std::mem::take(&mut self.writer);
        self.buf = writer.into_bytes();
        self.bit_ptr = 0;
        self.bit_pos = 7;
        self.row_bits = 0;
        Ok(())
    }

    /// Pull the next encoded bit; `None` at end of page data.
    pub fn get_bit(&mut self) -> Option<u8> {
        if self.bit_ptr >= self.buf.len() {
            return None;
        }
        let bit = (self.buf[self.bit_ptr] >> self.bit_pos) & 1;
        if self.bit_pos == 0 {
            self.bit_pos = 7;
            self.bit_ptr += 1;
        } else {
            self.bit_pos -= 1;
        }
        Some(bit)
    }

    /// Peek whether more page data remains without consuming anything.
    pub fn more_bits(&self) -> bool {
        self.bit_ptr < self.buf.len()
    }

    fn push_bits(&mut self, code: u32, width: usize) {
        self.writer.push_bits(code, width);
        self.row_bits += width;
    }

    fn push_code(&mut self, entry: CodeEntry) {
        self.push_bits(entry.code as u32, entry.length as usize);
    }

    /// Write the EOL ahead of a row, first topping up the previous row to
    /// the minimum row length with zero fill.
    fn encode_eol(&mut self) {
        let (code, length) = if self.encoding == Compression::T4OneD {
            (0x001u32, 12usize)
        } else {
            (0x0002 | (!self.row_is_2d as u32), 13)
        };
        if !self.suppress_row_padding && self.row_bits + length < self.min_row_bits {
            let fill = self.min_row_bits - (self.row_bits + length);
            self.push_bits(0, fill);
        }
        self.push_bits(code, length);
        self.row_bits = 0;
    }

    fn encode_row_buf(&mut self, row: &[u8]) {
        match self.encoding {
            Compression::T6 => {
                // T.6 is 2-D exclusively, with no EOLs and no 1-D interleave.
                self.encode_2d_row(row);
                self.ref_row.copy_from_slice(row);
            }
            Compression::T4TwoD => {
                self.encode_eol();
                if self.row_is_2d {
                    self.encode_2d_row(row);
                    self.rows_to_next_1d_row -= 1;
                } else {
                    self.encode_1d_row(row);
                    self.row_is_2d = true;
                }
                if self.rows_to_next_1d_row <= 0 {
                    // Insert a row of 1D encoding
                    self.row_is_2d = false;
                    self.rows_to_next_1d_row = self.max_rows_to_next_1d_row - 1;
                } else {
                    self.ref_row.copy_from_slice(row);
                }
            }
            Compression::T4OneD => {
                self.encode_eol();
                self.encode_1d_row(row);
            }
        }
    }

    fn put_span(&mut self, mut span: usize, codes: &[CodeEntry]) {
        let top = tables::make_up(codes, 2560);
        while span >= 2560 + 64 {
            self.push_code(top);
            span -= top.run as usize;
        }
        if span >= 64 {
            let entry = tables::make_up(codes, span);
            self.push_code(entry);
            span -= entry.run as usize;
        }
        self.push_code(tables::terminating(codes, span));
    }

    fn encode_1d_row(&mut self, row: &[u8]) {
        let width = self.image_width;
        let mut bs = 0;
        loop {
            let span = find_span(row, bs, width, false);
            self.put_span(span, &WHITE_CODES);
            bs += span;
            if bs >= width {
                break;
            }
            let span = find_span(row, bs, width, true);
            self.put_span(span, &BLACK_CODES);
            bs += span;
            if bs >= width {
                break;
            }
        }
    }

    fn encode_2d_row(&mut self, row: &[u8]) {
        let width = self.image_width;
        let reference = self.ref_row.clone();
        let mut a0: usize = 0;
        let mut a1 = if pixel(row, 0) { 0 } else { find_span(row, 0, width, false) };
        let mut b1 = if pixel(&reference, 0) {
            0
        } else {
            find_span(&reference, 0, width, false)
        };
        loop {
            let b2 = if b1 < width {
                b1 + find_span(&reference, b1, width, pixel(&reference, b1))
            } else {
                width
            };
            if b2 >= a1 {
                let d = b1 as i64 - a1 as i64;
                if (-3..=3).contains(&d) {
                    // Vertical mode
                    let (length, code) = match d {
                        3 => tables::CODE_VR3,
                        2 => tables::CODE_VR2,
                        1 => tables::CODE_VR1,
                        0 => tables::CODE_V0,
                        -1 => tables::CODE_VL1,
                        -2 => tables::CODE_VL2,
                        _ => tables::CODE_VL3,
                    };
                    self.push_bits(code as u32, length as usize);
                    a0 = a1;
                } else {
                    // Horizontal mode
                    let a2 = if a1 < width {
                        a1 + find_span(row, a1, width, pixel(row, a1))
                    } else {
                        width
                    };
                    let (length, code) = tables::CODE_HORIZONTAL;
                    self.push_bits(code as u32, length as usize);
                    if a0 + a1 == 0 || !pixel(row, a0) {
                        self.put_span(a1 - a0, &WHITE_CODES);
                        self.put_span(a2 - a1, &BLACK_CODES);
                    } else {
                        self.put_span(a1 - a0, &BLACK_CODES);
                        self.put_span(a2 - a1, &WHITE_CODES);
                    }
                    a0 = a2;
                }
            } else {
                // Pass mode
                let (length, code) = tables::CODE_PASS;
                self.push_bits(code as u32, length as usize);
                a0 = b2;
            }
            if a0 >= width {
                break;
            }
            let a0_black = pixel(row, a0);
            a1 = a0 + find_span(row, a0, width, a0_black);
            b1 = a0 + find_span(&reference, a0, width, !a0_black);
            if b1 < width {
                b1 += find_span(&reference, b1, width, a0_black);
            }
        }
    }

    /// Encode the page header banner, repeated per row to match the page's
    /// vertical resolution.
    fn encode_header(&mut self, page: &PageImage) {
        let header = self.make_header();
        let repeats = match self.y_resolution {
            y if y >= 15400 => 4,
            y if y >= 7700 => 2,
            _ => 1,
        };
        let mut row_buf = vec![0u8; page.bytes_per_row()];
        for banner_row in 0..16 {
            font::render_row(&header, banner_row, &mut row_buf);
            for _ in 0..repeats {
                self.encode_row_buf(&row_buf.clone());
            }
        }
    }

    fn make_header(&self) -> String {
        let (date, time) = civil_date_time();
        let text = format!(
            "  {}  {}    {:<50} {:<21}   p.{}",
            date,
            time,
            self.header_info,
            self.local_ident,
            self.page_index + 1
        );
        if text.len() > (self.image_width / 16) {
            warn!("header line longer than the page is wide");
        }
        text
    }
}

/// Current UTC date and time, formatted for the header banner.
fn civil_date_time() -> (String, String) {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let days = (secs / 86400) as i64;
    let tod = secs % 86400;
    // Civil-from-days, Gregorian
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
    let year = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = if month <= 2 { year + 1 } else { year };
    (
        format!("{:2}-{}-{}", day, MONTHS[(month - 1) as usize], year),
        format!("{:02}:{:02}", tod / 3600, (tod % 3600) / 60),
    )
}
