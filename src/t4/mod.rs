//! T.4/T.6 bi-level facsimile image codec
//!
//! Encodes and decodes the run-length compressed page bitmaps carried in
//! phase C of a FAX call: modified Huffman (1-D), modified READ (2-D) and
//! T.6 modified modified READ. Pages move through an opaque on-disk
//! container addressed by file name; the session engine never sees raw
//! bitmaps, only the codec's bit-stream interface.

pub mod decoder;
pub mod encoder;
mod font;
pub mod image;
pub mod tables;

pub use decoder::T4Decoder;
pub use encoder::T4Encoder;
pub use image::{Document, ImageError, PageImage};

/// Line encodings negotiated in the DCS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// T.4 1-D modified Huffman
    T4OneD,
    /// T.4 2-D modified READ
    T4TwoD,
    /// T.6 2-D modified modified READ
    T6,
}

/// Copy quality classification, used to pick MCF/RTP/RTN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyQuality {
    Good,
    Poor,
    Bad,
}

/// Standard horizontal resolutions, pixels/metre.
pub const X_RESOLUTION_R4: u32 = 4019;
pub const X_RESOLUTION_R8: u32 = 8037;
pub const X_RESOLUTION_R16: u32 = 16074;

/// Standard vertical resolutions, pixels/metre.
pub const Y_RESOLUTION_STANDARD: u32 = 3850;
pub const Y_RESOLUTION_FINE: u32 = 7700;
pub const Y_RESOLUTION_SUPERFINE: u32 = 15400;

/// How many rows may be 2-D coded before a 1-D row must be interleaved.
pub fn rows_per_1d_interleave(y_resolution: u32) -> i32 {
    if y_resolution >= Y_RESOLUTION_SUPERFINE {
        8
    } else if y_resolution >= Y_RESOLUTION_FINE {
        4
    } else {
        2
    }
}

/// Transfer statistics for the application, per page.
#[derive(Debug, Clone, Copy)]
pub struct T4Stats {
    pub pages_transferred: usize,
    pub width: usize,
    pub length: usize,
    pub bad_rows: usize,
    pub longest_bad_row_run: usize,
    pub x_resolution: u32,
    pub y_resolution: u32,
    pub encoding: Compression,
    pub image_size: usize,
}
