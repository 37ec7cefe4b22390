//! FT8 Message Parsing
//!
//! This module handles parsing of text messages into internal MessageVariant representations.
//! It supports all FT8 message types including Standard, CQ, DXpedition, Field Day, RTTY, etc.

mod validators;
mod helpers;
mod field_day;
mod rtty;

use std::string::{String, ToString};
use std::vec::Vec;
use std::format;
use crate::message::types::MessageVariant;
use crate::message::constants::CHARSET_BASE42;

use validators::{validate_callsign_basic, is_nonstandard_callsign, validate_grid_basic};
use helpers::{parse_suffix, strip_suffix, parse_cq_message};
use field_day::parse_field_day_message;
use rtty::parse_rtty_message;

// Constants for message parsing
const MAX_TELEMETRY_HEX_LEN: usize = 18;
const MAX_FREE_TEXT_LEN: usize = 13;
const DXPEDITION_PARTS: usize = 5;
const MIN_RTTY_FIELD_DAY_PARTS: usize = 4;

/// Parse text message into internal MessageVariant representation
///
/// This is the main entry point for parsing FT8 messages. It tries different message
/// types in order of specificity and falls back to free text if no match is found.
///
/// # Examples
///
/// ```no_run
/// use rustyft8::message::parse_message_variant;
///
/// let msg = parse_message_variant("CQ N0YPR DM42")?;
/// let msg = parse_message_variant("K1ABC W9XYZ EN37")?;
/// let msg = parse_message_variant("TNX BOB 73 GL")?;
/// # Ok::<(), String>(())
/// ```
pub fn parse_message_variant(text: &str) -> Result<MessageVariant, String> {
    let trimmed = text.trim();
    let parts: Vec<&str> = trimmed.split_whitespace().collect();

    // Try to parse as Standard CQ message: "CQ CALLSIGN GRID"
    if parts.len() == 3 && parts[0].eq_ignore_ascii_case("CQ") {
        return parse_cq_message("CQ", parts[1], parts[2]);
    }

    // Try to parse as Directed CQ: "CQ MODIFIER CALLSIGN GRID" (e.g., "CQ SOTA N0YPR DM42")
    if parts.len() == 4 && parts[0].eq_ignore_ascii_case("CQ") {
        let cq_prefix = format!("CQ {}", parts[1].to_uppercase());
        return parse_cq_message(&cq_prefix, parts[2], parts[3]);
    }

    // Try 2-word messages
    if parts.len() == 2 {
        return parse_two_word_message(&parts, trimmed);
    }

    // Try 3-word messages
    if parts.len() == 3 {
        return parse_three_word_message(&parts, trimmed);
    }

    // Try 4-word messages
    if parts.len() == 4 {
        if let Ok(msg) = parse_four_word_message(&parts) {
            return Ok(msg);
        }
        // If 4-word parsing failed, try as free text
    }

    // Try 5-word DXpedition message (format: "CALL1 RR73; CALL2 <HASH> REPORT")
    if parts.len() == DXPEDITION_PARTS && parts[1] == "RR73;" {
        return parse_dxpedition_message(&parts);
    }

    // Try RTTY Roundup (4+ words)
    if parts.len() >= MIN_RTTY_FIELD_DAY_PARTS {
        if let Ok(msg) = parse_rtty_message(&parts) {
            return Ok(msg);
        }
    }

    // Try Field Day (4+ words)
    if parts.len() >= MIN_RTTY_FIELD_DAY_PARTS {
        if let Ok(msg) = parse_field_day_message(&parts) {
            return Ok(msg);
        }
    }

    // Try Telemetry (hex string, max 18 hex digits)
    if trimmed.len() <= MAX_TELEMETRY_HEX_LEN && trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        return parse_telemetry_message(trimmed);
    }

    // Default to free text
    parse_free_text_message(trimmed)
}

/// Parse 2-word messages
fn parse_two_word_message(parts: &[&str], trimmed: &str) -> Result<MessageVariant, String> {
    let call1 = parts[0].to_uppercase();
    let call2 = parts[1].to_uppercase();

    // Special case: "CQ NONSTANDARD"
    if call1 == "CQ" && is_nonstandard_callsign(&call2) {
        return Ok(MessageVariant::NonStandardCall {
            text: trimmed.to_string(),
        });
    }

    // Special case: "COMPOUND <HASH>"
    if call1.contains('/') && call2.starts_with('<') && call2.ends_with('>') {
        let is_compound = !call1.ends_with("/P") && !call1.ends_with("/R");
        if is_compound {
            return Ok(MessageVariant::NonStandardCall {
                text: trimmed.to_string(),
            });
        }
    }

    // Special case: "<HASH> COMPOUND"
    if call1.starts_with('<') && call1.ends_with('>') && call2.contains('/') {
        let is_compound = !call2.ends_with("/P") && !call2.ends_with("/R");
        if is_compound {
            return Ok(MessageVariant::NonStandardCall {
                text: trimmed.to_string(),
            });
        }
    }

    // Special case: "<HASH> NONSTANDARD" or "NONSTANDARD <HASH>"
    if (call1.starts_with('<') && call1.ends_with('>') && is_nonstandard_callsign(&call2)) ||
       (call2.starts_with('<') && call2.ends_with('>') && is_nonstandard_callsign(&call1)) {
        return Ok(MessageVariant::NonStandardCall {
            text: trimmed.to_string(),
        });
    }

    // Standard 2-word message
    let (base_call1, has_suffix1) = strip_suffix(&call1);
    let (base_call2, has_suffix2) = strip_suffix(&call2);

    validate_callsign_basic(&base_call1)?;
    validate_callsign_basic(&base_call2)?;

    Ok(MessageVariant::Standard {
        call1: base_call1,
        call1_suffix: has_suffix1,
        call2: base_call2,
        call2_suffix: has_suffix2,
        r_flag: false,
        grid_or_report: String::new(),
    })
}

/// Parse 3-word messages
fn parse_three_word_message(parts: &[&str], trimmed: &str) -> Result<MessageVariant, String> {
    let call1 = parts[0].to_uppercase();
    let call2 = parts[1].to_uppercase();
    let grid_or_report = parts[2].to_uppercase();

    // Check for NonStandardCall patterns with acknowledgments
    let first_is_hash = call1.starts_with('<') && call1.ends_with('>');
    let second_is_hash = call2.starts_with('<') && call2.ends_with('>');
    let first_is_nonstandard = is_nonstandard_callsign(&call1);
    let second_is_nonstandard = is_nonstandard_callsign(&call2);
    let is_ack = grid_or_report == "RRR" || grid_or_report == "RR73" || grid_or_report == "73";

    if is_ack && ((first_is_hash && second_is_nonstandard) || (first_is_nonstandard && second_is_hash)) {
        return Ok(MessageVariant::NonStandardCall {
            text: trimmed.to_string(),
        });
    }

    // Parse suffixes
    let (base_call1, has_suffix1, is_p_suffix1) = parse_suffix(&call1);
    let (base_call2, has_suffix2, is_p_suffix2) = parse_suffix(&call2);

    // Check for R prefix in grid_or_report
    let (r_flag, final_grid_or_report) = if grid_or_report.starts_with("R-") || grid_or_report.starts_with("R+") {
        (true, grid_or_report[1..].to_string())
    } else {
        (false, grid_or_report)
    };

    validate_callsign_basic(&base_call1)?;
    validate_callsign_basic(&base_call2)?;
    validate_grid_basic(&final_grid_or_report)?;

    if is_p_suffix1 || is_p_suffix2 {
        Ok(MessageVariant::EuVhfContestType2 {
            call1: base_call1,
            call1_suffix: is_p_suffix1,
            call2: base_call2,
            call2_suffix: is_p_suffix2,
            r_flag,
            grid_or_report: final_grid_or_report,
        })
    } else {
        Ok(MessageVariant::Standard {
            call1: base_call1,
            call1_suffix: has_suffix1,
            call2: base_call2,
            call2_suffix: has_suffix2,
            r_flag,
            grid_or_report: final_grid_or_report,
        })
    }
}

/// Parse 4-word messages with R flag
fn parse_four_word_message(parts: &[&str]) -> Result<MessageVariant, String> {
    if parts[2].eq_ignore_ascii_case("R") {
        let call1 = parts[0].to_uppercase();
        let call2 = parts[1].to_uppercase();
        let grid_or_report = parts[3].to_uppercase();

        let (base_call1, has_suffix1, is_p_suffix1) = parse_suffix(&call1);
        let (base_call2, has_suffix2, is_p_suffix2) = parse_suffix(&call2);

        validate_callsign_basic(&base_call1)?;
        validate_callsign_basic(&base_call2)?;
        validate_grid_basic(&grid_or_report)?;

        if is_p_suffix1 || is_p_suffix2 {
            return Ok(MessageVariant::EuVhfContestType2 {
                call1: base_call1,
                call1_suffix: is_p_suffix1,
                call2: base_call2,
                call2_suffix: is_p_suffix2,
                r_flag: true,
                grid_or_report,
            });
        } else {
            return Ok(MessageVariant::Standard {
                call1: base_call1,
                call1_suffix: has_suffix1,
                call2: base_call2,
                call2_suffix: has_suffix2,
                r_flag: true,
                grid_or_report,
            });
        }
    }

    Err("Failed to parse 4-word message".into())
}

/// Parse DXpedition mode messages
fn parse_dxpedition_message(parts: &[&str]) -> Result<MessageVariant, String> {
    let call1 = parts[0].to_uppercase();
    let call2 = parts[2].to_uppercase();
    let hash_call_with_brackets = parts[3];
    let report_str = parts[4];

    if !hash_call_with_brackets.starts_with('<') || !hash_call_with_brackets.ends_with('>') {
        return Err(format!("DXpedition mode requires angle brackets: '{}'", hash_call_with_brackets));
    }

    let hash_call = hash_call_with_brackets[1..hash_call_with_brackets.len()-1].to_string();
    let report: i8 = report_str.parse()
        .map_err(|_| format!("Invalid signal report: '{}'", report_str))?;

    if report < -30 || report > 32 {
        return Err(format!("Signal report out of range (-30 to +32): {}", report));
    }

    validate_callsign_basic(&call1)?;
    validate_callsign_basic(&call2)?;

    Ok(MessageVariant::DXpedition {
        call1,
        call2,
        hash_call,
        report,
    })
}

/// Parse telemetry messages
fn parse_telemetry_message(trimmed: &str) -> Result<MessageVariant, String> {
    let hex_string = format!("{:0>18}", trimmed.to_uppercase());

    let ntel1 = u32::from_str_radix(&hex_string[0..6], 16)
        .map_err(|_| format!("Invalid hex in telemetry: '{}'", hex_string))?;
    let _ntel2 = u32::from_str_radix(&hex_string[6..12], 16)
        .map_err(|_| format!("Invalid hex in telemetry: '{}'", hex_string))?;
    let _ntel3 = u32::from_str_radix(&hex_string[12..18], 16)
        .map_err(|_| format!("Invalid hex in telemetry: '{}'", hex_string))?;

    if ntel1 >= 0x800000 {
        return Err(format!("Telemetry first 6 hex digits exceed 23 bits: 0x{:06X}", ntel1));
    }

    Ok(MessageVariant::Telemetry {
        hex_string,
    })
}

/// Parse free text messages
fn parse_free_text_message(trimmed: &str) -> Result<MessageVariant, String> {
    if trimmed.len() > MAX_FREE_TEXT_LEN {
        return Err(format!(
            "Message too long for free text (max {} chars): '{}' ({} chars)",
            MAX_FREE_TEXT_LEN, trimmed, trimmed.len()
        ));
    }

    let upper_text = trimmed.to_uppercase();
    for ch in upper_text.chars() {
        if !CHARSET_BASE42.iter().any(|&c| c == ch as u8) {
            return Err(format!(
                "Invalid character '{}' in free text message (valid charset: {})",
                ch, core::str::from_utf8(CHARSET_BASE42).unwrap()
            ));
        }
    }

    Ok(MessageVariant::FreeText {
        text: upper_text,
    })
}
