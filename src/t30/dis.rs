//! DIS/DTC/DCS frame support
//!
//! The capabilities frames are variable length bit fields with an extension
//! bit at the top of octets 3 onwards. Bits are numbered as T.30 does, with
//! bit 1 the first transmitted bit, which lands in the least significant
//! position of each frame octet at this layer.

use tracing::debug;

use crate::t30::fcf;
use crate::t30::ModemType;

/// Longest DIS/DTC/DCS frame we build or examine (address, control, FCF and
/// FIF octets).
pub const MAX_DIS_DTC_DCS_LEN: usize = 22;

pub const DISBIT1: u8 = 0x01;
pub const DISBIT2: u8 = 0x02;
pub const DISBIT3: u8 = 0x04;
pub const DISBIT4: u8 = 0x08;
pub const DISBIT5: u8 = 0x10;
pub const DISBIT6: u8 = 0x20;
pub const DISBIT7: u8 = 0x40;
pub const DISBIT8: u8 = 0x80;

/// One step of the modem fallback ladder.
#[derive(Debug, Clone, Copy)]
pub struct FallbackEntry {
    pub bit_rate: u32,
    pub modem: ModemType,
    /// Signalling rate bits for the DCS, already positioned in octet 4.
    pub dcs_code: u8,
}

/// Fastest first; FTT walks down this ladder.
pub const FALLBACK_SEQUENCE: [FallbackEntry; 8] = [
    FallbackEntry { bit_rate: 14400, modem: ModemType::V17_14400, dcs_code: DISBIT6 },
    FallbackEntry { bit_rate: 12000, modem: ModemType::V17_12000, dcs_code: DISBIT6 | DISBIT4 },
    FallbackEntry { bit_rate: 9600, modem: ModemType::V17_9600, dcs_code: DISBIT6 | DISBIT3 },
    FallbackEntry { bit_rate: 9600, modem: ModemType::V29_9600, dcs_code: DISBIT3 },
    FallbackEntry { bit_rate: 7200, modem: ModemType::V17_7200, dcs_code: DISBIT6 | DISBIT4 | DISBIT3 },
    FallbackEntry { bit_rate: 7200, modem: ModemType::V29_7200, dcs_code: DISBIT4 | DISBIT3 },
    FallbackEntry { bit_rate: 4800, modem: ModemType::V27ter4800, dcs_code: DISBIT4 },
    FallbackEntry { bit_rate: 2400, modem: ModemType::V27ter2400, dcs_code: 0 },
];

pub const V17_FALLBACK_START: usize = 0;
pub const V29_FALLBACK_START: usize = 3;
pub const V27TER_FALLBACK_START: usize = 6;

/// Translation from the minimum scan time codes the far end advertises to
/// the codes we will actually signal, per chosen vertical resolution. Row 0
/// is standard, row 1 fine, row 2 superfine with the half-time option.
pub const TRANSLATE_MIN_SCAN_TIME: [[u8; 8]; 3] = [
    // 20  5 10 20 40 40 10  0 ms
    [0, 1, 2, 0, 4, 4, 2, 7], // standard
    [0, 1, 2, 2, 4, 0, 1, 7], // fine
    [2, 1, 1, 1, 0, 2, 1, 7], // superfine, half the fine time
];

/// Minimum scan time code to milliseconds.
pub const MIN_SCAN_TIMES_MS: [u32; 8] = [20, 5, 10, 0, 40, 0, 0, 0];

/// Image widths in pels, by resolution class and width code.
/// R4 widths are dead in recent versions of T.30 but keep their slot.
pub const WIDTHS: [[usize; 3]; 3] = [
    [864, 1024, 1216],  // R4
    [1728, 2048, 2432], // R8
    [3456, 4096, 4864], // R16
];

/// A parsed summary of a DIS/DTC/DCS frame, for the application and tests.
/// Capabilities outside what we negotiate (V.8, V.34, colour, JPEG, JBIG)
/// are decoded and then ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisInfo {
    pub is_dcs: bool,
    pub ready_to_transmit: bool,
    pub receive_capable: bool,
    pub v27ter: bool,
    pub v29: bool,
    pub v17: bool,
    pub two_d_coding: bool,
    pub t6_coding: bool,
    pub ecm: bool,
    pub fine: bool,
    pub superfine: bool,
    pub r16: bool,
    /// 0 = 215mm/1728 only, 1 = +255mm/2048, 2 = +303mm/2432
    pub width_code: u8,
    /// 0 = A4, 1 = +B4, 2 = unlimited
    pub length_code: u8,
    pub min_scan_time_code: u8,
    pub subaddressing: bool,
    pub password: bool,
    pub t37: bool,
    pub t38: bool,
}

/// Parse the interesting fields out of a DIS/DTC/DCS frame.
///
/// `frame` must start with the address octet; short frames read as all
/// zero beyond their end, exactly as if the far end had sent a longer
/// frame with nothing set.
pub fn parse_dis_dcs(frame: &[u8]) -> DisInfo {
    let mut padded = [0u8; MAX_DIS_DTC_DCS_LEN];
    let take = frame.len().min(MAX_DIS_DTC_DCS_LEN);
    padded[..take].copy_from_slice(&frame[..take]);
    let rate = padded[4] & (DISBIT6 | DISBIT5 | DISBIT4 | DISBIT3);
    DisInfo {
        is_dcs: padded[2] & fcf::FCF_MASK == fcf::DCS,
        ready_to_transmit: padded[4] & DISBIT1 != 0,
        receive_capable: padded[4] & DISBIT2 != 0,
        v27ter: rate == 0 || rate & DISBIT4 != 0,
        v29: rate & DISBIT3 != 0,
        v17: rate & (DISBIT6 | DISBIT4 | DISBIT3) == (DISBIT6 | DISBIT4 | DISBIT3),
        two_d_coding: padded[4] & DISBIT8 != 0,
        t6_coding: padded[6] & DISBIT7 != 0,
        ecm: padded[6] & DISBIT3 != 0,
        fine: padded[4] & DISBIT7 != 0,
        superfine: padded[8] & DISBIT1 != 0,
        r16: padded[8] & DISBIT3 != 0,
        width_code: match padded[5] & (DISBIT2 | DISBIT1) {
            0 => 0,
            DISBIT1 => 1,
            _ => 2,
        },
        length_code: if padded[5] & DISBIT4 != 0 {
            2
        } else if padded[5] & DISBIT3 != 0 {
            1
        } else {
            0
        },
        min_scan_time_code: (padded[5] >> 4) & 7,
        subaddressing: padded[7] & DISBIT6 != 0,
        password: padded[7] & DISBIT7 != 0,
        t37: padded[3] & DISBIT1 != 0,
        t38: padded[3] & DISBIT3 != 0,
    }
}

/// Log the content of a DIS/DTC/DCS frame at debug level, the long-form
/// decode an installer reads when two machines refuse to talk.
pub fn log_dis_dcs(frame: &[u8]) {
    if frame.len() < 5 {
        debug!("short DIS/DTC/DCS frame");
        return;
    }
    let info = parse_dis_dcs(frame);
    let kind = fcf::frame_type(frame[2]);
    debug!(
        kind,
        receive_capable = info.receive_capable,
        ready_to_transmit = info.ready_to_transmit,
        v27ter = info.v27ter,
        v29 = info.v29,
        v17 = info.v17,
        two_d = info.two_d_coding,
        t6 = info.t6_coding,
        ecm = info.ecm,
        fine = info.fine,
        superfine = info.superfine,
        r16 = info.r16,
        width_code = info.width_code,
        length_code = info.length_code,
        min_scan = info.min_scan_time_code,
        "capabilities"
    );
    // Fields we decode but do not negotiate.
    if frame.len() > 8 && frame[8] & DISBIT2 != 0 {
        debug!(kind, "300x300 pel resolution flagged; ignored");
    }
    if frame.len() > 10 && frame[10] & (DISBIT4 | DISBIT5) != 0 {
        debug!(kind, "colour/JPEG capability flagged; ignored");
    }
    if frame.len() > 12 && frame[12] & DISBIT6 != 0 {
        debug!(kind, "T.85 capability flagged; ignored");
    }
    if info.t37 || info.t38 {
        debug!(kind, t37 = info.t37, t38 = info.t38, "internet aware");
    }
}
