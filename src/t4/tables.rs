//! T.4 run-length code tables
//!
//! The modified-Huffman white and black tables from ITU T.4 Annex A, stored
//! as (length, code, run) triples. The bit-serial decoder does not use these
//! directly; lookup tables keyed by the decoder's shift register are
//! generated from the triples at first use.
//!
//! Code words are right-aligned in `code`, first-transmitted bit most
//! significant. The decoder's shift register receives bits at the top and
//! shifts down, so the first-received bit ends up in the low position; the
//! table generator reverses each code word to match.

use lazy_static::lazy_static;

/// Run value marking the EOL code in the run tables.
pub const RUN_EOL: i16 = -1;

/// One (length, code, run) triple.
#[derive(Debug, Clone, Copy)]
pub struct CodeEntry {
    pub length: u8,
    pub code: u16,
    pub run: i16,
}

const fn e(length: u8, code: u16, run: i16) -> CodeEntry {
    CodeEntry { length, code, run }
}

/// White terminating and make-up codes, ordered so the index is the run
/// length for 0..63 and (run / 64) + 63 for the make-up set.
pub const WHITE_CODES: [CodeEntry; 105] = [
    e(8, 0x35, 0),
    e(6, 0x07, 1),
    e(4, 0x07, 2),
    e(4, 0x08, 3),
    e(4, 0x0B, 4),
    e(4, 0x0C, 5),
    e(4, 0x0E, 6),
    e(4, 0x0F, 7),
    e(5, 0x13, 8),
    e(5, 0x14, 9),
    e(5, 0x07, 10),
    e(5, 0x08, 11),
    e(6, 0x08, 12),
    e(6, 0x03, 13),
    e(6, 0x34, 14),
    e(6, 0x35, 15),
    e(6, 0x2A, 16),
    e(6, 0x2B, 17),
    e(7, 0x27, 18),
    e(7, 0x0C, 19),
    e(7, 0x08, 20),
    e(7, 0x17, 21),
    e(7, 0x03, 22),
    e(7, 0x04, 23),
    e(7, 0x28, 24),
    e(7, 0x2B, 25),
    e(7, 0x13, 26),
    e(7, 0x24, 27),
    e(7, 0x18, 28),
    e(8, 0x02, 29),
    e(8, 0x03, 30),
    e(8, 0x1A, 31),
    e(8, 0x1B, 32),
    e(8, 0x12, 33),
    e(8, 0x13, 34),
    e(8, 0x14, 35),
    e(8, 0x15, 36),
    e(8, 0x16, 37),
    e(8, 0x17, 38),
    e(8, 0x28, 39),
    e(8, 0x29, 40),
    e(8, 0x2A, 41),
    e(8, 0x2B, 42),
    e(8, 0x2C, 43),
    e(8, 0x2D, 44),
    e(8, 0x04, 45),
    e(8, 0x05, 46),
    e(8, 0x0A, 47),
    e(8, 0x0B, 48),
    e(8, 0x52, 49),
    e(8, 0x53, 50),
    e(8, 0x54, 51),
    e(8, 0x55, 52),
    e(8, 0x24, 53),
    e(8, 0x25, 54),
    e(8, 0x58, 55),
    e(8, 0x59, 56),
    e(8, 0x5A, 57),
    e(8, 0x5B, 58),
    e(8, 0x4A, 59),
    e(8, 0x4B, 60),
    e(8, 0x32, 61),
    e(8, 0x33, 62),
    e(8, 0x34, 63),
    // Make-up codes
    e(5, 0x1B, 64),
    e(5, 0x12, 128),
    e(6, 0x17, 192),
    e(7, 0x37, 256),
    e(8, 0x36, 320),
    e(8, 0x37, 384),
    e(8, 0x64, 448),
    e(8, 0x65, 512),
    e(8, 0x68, 576),
    e(8, 0x67, 640),
    e(9, 0xCC, 704),
    e(9, 0xCD, 768),
    e(9, 0xD2, 832),
    e(9, 0xD3, 896),
    e(9, 0xD4, 960),
    e(9, 0xD5, 1024),
    e(9, 0xD6, 1088),
    e(9, 0xD7, 1152),
    e(9, 0xD8, 1216),
    e(9, 0xD9, 1280),
    e(9, 0xDA, 1344),
    e(9, 0xDB, 1408),
    e(9, 0x98, 1472),
    e(9, 0x99, 1536),
    e(9, 0x9A, 1600),
    e(6, 0x18, 1664),
    e(9, 0x9B, 1728),
    // Extended make-up codes, shared with the black table
    e(11, 0x08, 1792),
    e(11, 0x0C, 1856),
    e(11, 0x0D, 1920),
    e(12, 0x12, 1984),
    e(12, 0x13, 2048),
    e(12, 0x14, 2112),
    e(12, 0x15, 2176),
    e(12, 0x16, 2240),
    e(12, 0x17, 2304),
    e(12, 0x1C, 2368),
    e(12, 0x1D, 2432),
    e(12, 0x1E, 2496),
    e(12, 0x1F, 2560),
    e(12, 0x01, RUN_EOL),
];

/// Black terminating and make-up codes, same ordering rule as the white set.
pub const BLACK_CODES: [CodeEntry; 105] = [
    e(10, 0x37, 0),
    e(3, 0x02, 1),
    e(2, 0x03, 2),
    e(2, 0x02, 3),
    e(3, 0x03, 4),
    e(4, 0x03, 5),
    e(4, 0x02, 6),
    e(5, 0x03, 7),
    e(6, 0x05, 8),
    e(6, 0x04, 9),
    e(7, 0x04, 10),
    e(7, 0x05, 11),
    e(7, 0x07, 12),
    e(8, 0x04, 13),
    e(8, 0x07, 14),
    e(9, 0x18, 15),
    e(10, 0x17, 16),
    e(10, 0x18, 17),
    e(10, 0x08, 18),
    e(11, 0x67, 19),
    e(11, 0x68, 20),
    e(11, 0x6C, 21),
    e(11, 0x37, 22),
    e(11, 0x28, 23),
    e(11, 0x17, 24),
    e(11, 0x18, 25),
    e(12, 0xCA, 26),
    e(12, 0xCB, 27),
    e(12, 0xCC, 28),
    e(12, 0xCD, 29),
    e(12, 0x68, 30),
    e(12, 0x69, 31),
    e(12, 0x6A, 32),
    e(12, 0x6B, 33),
    e(12, 0xD2, 34),
    e(12, 0xD3, 35),
    e(12, 0xD4, 36),
    e(12, 0xD5, 37),
    e(12, 0xD6, 38),
    e(12, 0xD7, 39),
    e(12, 0x6C, 40),
    e(12, 0x6D, 41),
    e(12, 0xDA, 42),
    e(12, 0xDB, 43),
    e(12, 0x54, 44),
    e(12, 0x55, 45),
    e(12, 0x56, 46),
    e(12, 0x57, 47),
    e(12, 0x64, 48),
    e(12, 0x65, 49),
    e(12, 0x52, 50),
    e(12, 0x53, 51),
    e(12, 0x24, 52),
    e(12, 0x37, 53),
    e(12, 0x38, 54),
    e(12, 0x27, 55),
    e(12, 0x28, 56),
    e(12, 0x58, 57),
    e(12, 0x59, 58),
    e(12, 0x2B, 59),
    e(12, 0x2C, 60),
    e(12, 0x5A, 61),
    e(12, 0x66, 62),
    e(12, 0x67, 63),
    // Make-up codes
    e(10, 0x0F, 64),
    e(12, 0xC8, 128),
    e(12, 0xC9, 192),
    e(12, 0x5B, 256),
    e(12, 0x33, 320),
    e(12, 0x34, 384),
    e(12, 0x35, 448),
    e(13, 0x6C, 512),
    e(13, 0x6D, 576),
    e(13, 0x4A, 640),
    e(13, 0x4B, 704),
    e(13, 0x4C, 768),
    e(13, 0x4D, 832),
    e(13, 0x72, 896),
    e(13, 0x73, 960),
    e(13, 0x74, 1024),
    e(13, 0x75, 1088),
    e(13, 0x76, 1152),
    e(13, 0x77, 1216),
    e(13, 0x52, 1280),
    e(13, 0x53, 1344),
    e(13, 0x54, 1408),
    e(13, 0x55, 1472),
    e(13, 0x5A, 1536),
    e(13, 0x5B, 1600),
    e(13, 0x64, 1664),
    e(13, 0x65, 1728),
    // Extended make-up codes, shared with the white table
    e(11, 0x08, 1792),
    e(11, 0x0C, 1856),
    e(11, 0x0D, 1920),
    e(12, 0x12, 1984),
    e(12, 0x13, 2048),
    e(12, 0x14, 2112),
    e(12, 0x15, 2176),
    e(12, 0x16, 2240),
    e(12, 0x17, 2304),
    e(12, 0x1C, 2368),
    e(12, 0x1D, 2432),
    e(12, 0x1E, 2496),
    e(12, 0x1F, 2560),
    e(12, 0x01, RUN_EOL),
];

/// Two-dimensional (MR/MMR) mode codes: (length, code).
pub const CODE_V0: (u8, u16) = (1, 0x01);
pub const CODE_VR1: (u8, u16) = (3, 0x03);
pub const CODE_VR2: (u8, u16) = (6, 0x03);
pub const CODE_VR3: (u8, u16) = (7, 0x03);
pub const CODE_VL1: (u8, u16) = (3, 0x02);
pub const CODE_VL2: (u8, u16) = (6, 0x02);
pub const CODE_VL3: (u8, u16) = (7, 0x02);
pub const CODE_HORIZONTAL: (u8, u16) = (3, 0x01);
pub const CODE_PASS: (u8, u16) = (4, 0x01);
pub const CODE_EXTENSION: (u8, u16) = (7, 0x01);

/// What a decoder table entry says about the bits at the bottom of the
/// shift register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// No complete code yet; wait for more bits (or consume fill).
    Incomplete,
    /// Terminating code for a run of the given length.
    Terminating(u16),
    /// Make-up code; a terminating code must follow.
    MakeUp(u16),
    /// End-of-line marker.
    Eol,
    /// 2-D pass mode.
    Pass,
    /// 2-D horizontal mode.
    Horizontal,
    /// 2-D vertical mode with offset -3..=3 from b1.
    Vertical(i8),
    /// 2-D extension code.
    Extension,
}

/// One decode LUT slot: what was recognised and how many bits it consumes.
#[derive(Debug, Clone, Copy)]
pub struct LutEntry {
    pub decoded: Decoded,
    pub width: u8,
}

const INCOMPLETE: LutEntry = LutEntry { decoded: Decoded::Incomplete, width: 0 };

/// Reverse the low `len` bits of `code`.
fn reverse_code(code: u16, len: u8) -> u16 {
    let mut out = 0u16;
    for i in 0..len {
        if code & (1 << i) != 0 {
            out |= 1 << (len - 1 - i);
        }
    }
    out
}

fn fill_from_codes(table: &mut [LutEntry], codes: &[CodeEntry], term_limit: i16) {
    for entry in codes {
        let mask = (1u32 << entry.length) - 1;
        let key = reverse_code(entry.code, entry.length) as u32;
        let decoded = match entry.run {
            RUN_EOL => Decoded::Eol,
            run if run <= term_limit => Decoded::Terminating(run as u16),
            run => Decoded::MakeUp(run as u16),
        };
        let mut i = key;
        while (i as usize) < table.len() {
            table[i as usize] = LutEntry { decoded, width: entry.length };
            i += mask + 1;
        }
        // The run codes are prefix free, so each slot is written exactly once.
    }
}

fn fill_2d(table: &mut [LutEntry]) {
    let codes: [((u8, u16), Decoded); 10] = [
        (CODE_V0, Decoded::Vertical(0)),
        (CODE_VR1, Decoded::Vertical(1)),
        (CODE_VR2, Decoded::Vertical(2)),
        (CODE_VR3, Decoded::Vertical(3)),
        (CODE_VL1, Decoded::Vertical(-1)),
        (CODE_VL2, Decoded::Vertical(-2)),
        (CODE_VL3, Decoded::Vertical(-3)),
        (CODE_HORIZONTAL, Decoded::Horizontal),
        (CODE_PASS, Decoded::Pass),
        (CODE_EXTENSION, Decoded::Extension),
    ];
    for ((length, code), decoded) in codes {
        let mask = (1u32 << length) - 1;
        let key = reverse_code(code, length) as u32;
        let mut i = key;
        while (i as usize) < table.len() {
            table[i as usize] = LutEntry { decoded, width: length };
            i += mask + 1;
        }
    }
}

lazy_static! {
    /// White run decode table, keyed by the low 12 bits of the shift register.
    pub static ref WHITE_LUT: Vec<LutEntry> = {
        let mut table = vec![INCOMPLETE; 1 << 12];
        fill_from_codes(&mut table, &WHITE_CODES, 63);
        table
    };

    /// Black run decode table, keyed by the low 13 bits of the shift register.
    pub static ref BLACK_LUT: Vec<LutEntry> = {
        let mut table = vec![INCOMPLETE; 1 << 13];
        fill_from_codes(&mut table, &BLACK_CODES, 63);
        table
    };

    /// 2-D mode decode table, keyed by the low 7 bits of the shift register.
    pub static ref TWO_D_LUT: Vec<LutEntry> = {
        let mut table = vec![INCOMPLETE; 1 << 7];
        fill_2d(&mut table);
        table
    };
}

/// Look up the white or black run table entry for a run of `span` pixels.
///
/// Panics if `span` exceeds 2560; the encoder splits longer runs first.
pub fn terminating(codes: &[CodeEntry], span: usize) -> CodeEntry {
    codes[span]
}

pub fn make_up(codes: &[CodeEntry], span: usize) -> CodeEntry {
    codes[63 + (span >> 6)]
}
