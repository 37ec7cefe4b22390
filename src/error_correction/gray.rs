#![allow(unused)]

use crate::constants::{FT8_GRAY_DECODE, FT8_GRAY_ENCODE};

pub fn encode(symbols: &[u8]) -> Vec<u8> {
    let mut encoded = vec![];
    for symbol in symbols {
        let encoded_symbol = FT8_GRAY_ENCODE[*symbol as usize];
        encoded.push(encoded_symbol);
    }
    let encoded = encoded;
    encoded
}

pub fn decode(symbols: &[u8]) -> Vec<u8> {
    let mut decoded = vec![];
    for symbol in symbols {
        let decoded_symbol = FT8_GRAY_DECODE[*symbol as usize];
        decoded.push(decoded_symbol);
    }
    let decoded = decoded;
    decoded
}
