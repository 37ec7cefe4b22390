//! HDLC frame check sequence
//!
//! The ITU CRC-16 used by T.30 HDLC framing (the X.25 preset: polynomial
//! 0x1021, reflected, preset to all ones, inverted on output). The gateway's
//! deframer checks inbound audio-side frames with this, and tests use it to
//! build wire-accurate frames.

use crc::{Algorithm, Crc};

/// ITU CRC-16 as used for HDLC FCS.
const CRC_HDLC: Algorithm<u16> = Algorithm {
    width: 16,
    poly: 0x1021,
    init: 0xFFFF,
    refin: true,
    refout: true,
    xorout: 0xFFFF,
    check: 0x906E,
    residue: 0xF0B8,
};

const HDLC_CRC: Crc<u16> = Crc::<u16>::new(&CRC_HDLC);

/// Calculate the FCS for a frame body.
pub fn calculate(buf: &[u8]) -> u16 {
    HDLC_CRC.checksum(buf)
}

/// Append the FCS to a frame, low octet first as HDLC transmits it.
pub fn append(frame: &mut Vec<u8>) {
    let fcs = calculate(frame);
    frame.push((fcs & 0xFF) as u8);
    frame.push((fcs >> 8) as u8);
}

/// Check a frame that still carries its two FCS octets.
pub fn check_frame(frame_with_fcs: &[u8]) -> bool {
    if frame_with_fcs.len() < 2 {
        return false;
    }
    let (body, fcs) = frame_with_fcs.split_at(frame_with_fcs.len() - 2);
    let expected = calculate(body);
    fcs[0] == (expected & 0xFF) as u8 && fcs[1] == (expected >> 8) as u8
}
