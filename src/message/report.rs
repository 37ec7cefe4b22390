use std::fmt::Display;
use snafu::prelude::*;
use crate::constants::{FT8_CHAR_TABLE_GRIDSQUARE_ALPHA, FT8_CHAR_TABLE_GRIDSQUARE_ALPHA_SIX, FT8_CHAR_TABLE_NUMERIC};

use super::radix::{FromMixedRadixStr, ToStrMixedRadix};

const MAX_GRID_4:u32 = 32400;
pub const OTHER_REPORTS: [&str; 4] = ["", "RRR", "RR73", "73"];

#[derive(Debug)]
pub struct Report {
    pub report: String,
    pub is_ack: bool,
    pub is_other: bool,
    pub packed_bits: u32,
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_ack {
            //write!(f, "R{}", self.report)
            if self.report.len() == 4 || self.report.len() == 6 {
                write!(f, "R {}", self.report)
            } else {
                write!(f, "R{}", self.report)
            }
        } else {
            write!(f, "{}", self.report)
        }
    }
}

impl Report {
    pub fn try_from_packed_bits(value: u32, num_bits:usize) -> Result<Self, InvalidValueError> {
        if num_bits == 2 {
            // RRR, RR73, 73, or blank
            let report = match OTHER_REPORTS.iter().nth(value as usize) {
                Some(v) => {
                    (*v).to_owned()
                },
                None => {
                    return Err(InvalidValueError { value: value });
                }
            };
            let packed_bits = value;
            return Ok(Report {
                report,
                is_ack: false,
                is_other: true,
                packed_bits
            })
        }

        if num_bits == 15 {
            let report:String;
            let is_ack = false;
            let is_other:bool;
            let packed_bits:u32 = value;
            
            // 4-char reports
            if value <= MAX_GRID_4 {
                println!("4-char reports");
                let radix_tables = [
                    FT8_CHAR_TABLE_GRIDSQUARE_ALPHA,
                    FT8_CHAR_TABLE_GRIDSQUARE_ALPHA,
                    FT8_CHAR_TABLE_NUMERIC,
                    FT8_CHAR_TABLE_NUMERIC
                ];
                report = match value.to_str_mixed_radix(&radix_tables) {
                    Ok(v) => v,
                    Err(_) => {
                        return Err(InvalidValueError { value: value });
                    }
                };
                is_other = false;
            }

            // special reports
            else if value > MAX_GRID_4 && value < MAX_GRID_4 + OTHER_REPORTS.len() as u32 + 1 {
                let other_index = value - MAX_GRID_4 - 1u32;
                report = match OTHER_REPORTS.iter().nth(other_index as usize) {
                    Some(v) => {
                        (*v).to_owned()
                    },
                    None => {
                        return Err(InvalidValueError { value: value });
                    }
                };
                is_other = true;
            }

            // signal reports low
            else if value >= 32405 && value <= 32485 {
                let r = value as i32 - 32405i32 - 30i32;
                report = format!("{:>+0width$.prec$}", r, width=3, prec=0);
                is_other = false;
            }

            // signal reports high
            else if value >= 32486 && value <= 32505 {
                let r = value as i32 - 32486i32 - 50i32;
                report = format!("{:>+0width$.prec$}", r, width=3, prec=0);
                is_other = false;
            }

            else {
                return Err(InvalidValueError { value });
            }

            return Ok(Report {
                report,
                is_ack,
                is_other,
                packed_bits
            })
        }

        if num_bits == 25 {
            let radix_tables = [
                FT8_CHAR_TABLE_GRIDSQUARE_ALPHA,
                FT8_CHAR_TABLE_GRIDSQUARE_ALPHA,
                FT8_CHAR_TABLE_NUMERIC,
                FT8_CHAR_TABLE_NUMERIC,
                FT8_CHAR_TABLE_GRIDSQUARE_ALPHA_SIX,
                FT8_CHAR_TABLE_GRIDSQUARE_ALPHA_SIX
            ];
            let report = match value.to_str_mixed_radix(&radix_tables) {
                Ok(v) => v,
                Err(_) => {
                    return Err(InvalidValueError { value });
                }
            };
            return Ok(Report {
                report,
                is_ack: false,
                is_other: false,
                packed_bits: value
            })
        }
        


        Err(InvalidValueError { value })

    }

    pub fn try_from_report_str(report_str:&str, num_bits:usize) -> Result<Self, InvalidStringError> {

        if num_bits == 2 {
            if let Ok(report) = try_from_special_2(report_str) {
                return Ok(report);
            }
            return Err(InvalidStringError { value: report_str.to_owned() });
        }

        if num_bits == 15 {
            if let Ok(report) = try_from_location(report_str, 15) {
                return Ok(report);
            }

            if let Ok(report) = try_from_special(report_str) {
                return Ok(report);
            }

            if let Ok(report) = try_from_signal_report(report_str) {
                return Ok(report);
            }

            return Err(InvalidStringError { value: report_str.to_owned() });
        }

        if num_bits == 25 {
            if let Ok(report) = try_from_location(report_str, 25) {
                return Ok(report);
            }

            return Err(InvalidStringError { value: report_str.to_owned() });
            
        }

        return Err(InvalidStringError { value: report_str.to_owned() });
    }

    
}

fn try_from_signal_report(report_str:&str) -> Result<Report, InvalidStringError> {
    let is_ack = report_str.starts_with("R");

    let string_to_parse = if is_ack {&report_str[1..]} else { report_str };

    if (!string_to_parse.starts_with("-") && !string_to_parse.starts_with("+")) && string_to_parse.len() != 3 {
        return Err(InvalidStringError { value: report_str.to_owned() });
    }

    let report_int =  match string_to_parse.parse::<i32>() {
        Ok(v) => v,
        Err(_) => {
            return Err(InvalidStringError { value: report_str.to_owned() });
        }
    };

    if report_int < -50 || report_int > 50 {
        return Err(InvalidStringError { value: report_str.to_owned() });
    }

    let is_other = false;

    let packed_bits:u32;
    if report_int >= -30 && report_int <= 50 {
        packed_bits = (MAX_GRID_4 as i32 + 35i32 + report_int) as u32
    } else if report_int >= -50 && report_int <= -31 {
        packed_bits = (32486i32 + 50i32 + report_int) as u32
    } else {
        return Err(InvalidStringError { value: report_str.to_owned() });
    }

    return Ok(Report {
        report: format!("{:+03}", report_int),
        is_ack,
        is_other,
        packed_bits,
    });
}

fn try_from_location(location:&str, num_bits:usize) -> Result<Report, InvalidStringError> {
    let is_other = location == "RR73";
    let is_ack:bool;
    let location_to_parse:&str;
    if location.starts_with("R ") {
        is_ack = true;
        location_to_parse = &location[2..];
    } else {
        is_ack = false;
        location_to_parse = location;
    }

    let is_g15 = location_to_parse.len() == 4 && num_bits == 15;
    let is_g25 = location_to_parse.len() == 6 && num_bits == 25;

    if !is_g15 && !is_g25 {
        return Err(InvalidStringError { value: location_to_parse.to_owned() });
    }

    let packed_bits:u32;
    if is_g15 {
        let radix_tables = [
            FT8_CHAR_TABLE_GRIDSQUARE_ALPHA,
            FT8_CHAR_TABLE_GRIDSQUARE_ALPHA,
            FT8_CHAR_TABLE_NUMERIC,
            FT8_CHAR_TABLE_NUMERIC
        ];
        packed_bits = match u32::from_mixed_radix_str(location_to_parse, &radix_tables) {
            Ok(value) => value,
            Err(e) => {
                return Err(InvalidStringError { value: location_to_parse.to_owned() });
            }
        };
    } else if is_g25 {
        let radix_tables = [
            FT8_CHAR_TABLE_GRIDSQUARE_ALPHA,
            FT8_CHAR_TABLE_GRIDSQUARE_ALPHA,
            FT8_CHAR_TABLE_NUMERIC,
            FT8_CHAR_TABLE_NUMERIC,
            FT8_CHAR_TABLE_GRIDSQUARE_ALPHA_SIX,
            FT8_CHAR_TABLE_GRIDSQUARE_ALPHA_SIX
        ];
        packed_bits = match u32::from_mixed_radix_str(location_to_parse, &radix_tables) {
            Ok(value) => value,
            Err(e) => {
                return Err(InvalidStringError { value: location_to_parse.to_owned() });
            }
        };
    } else {
        packed_bits = 0; // will never happen
    }

    let r = Report {
        report: location_to_parse.to_owned(),
        is_ack,
        is_other,
        packed_bits,
    };
    return Ok(r);
}

fn try_from_special(special:&str) -> Result<Report, InvalidStringError> {
    if !OTHER_REPORTS.contains(&special) {
        return Err(InvalidStringError { value: special.to_owned() });
    }
    
    let other_index = OTHER_REPORTS.iter().position(|&r| r == special).unwrap();

    let packed_bits = MAX_GRID_4 + other_index as u32 + 1;
    let is_ack = false;
    let is_other = true;

    let r = Report {
        report: special.to_owned(),
        is_ack,
        is_other,
        packed_bits,
    };
    return Ok(r);
}

fn try_from_special_2(special:&str) -> Result<Report, InvalidStringError> {
    if !OTHER_REPORTS.contains(&special) {
        return Err(InvalidStringError { value: special.to_owned() });
    }
    
    let other_index = OTHER_REPORTS.iter().position(|&r| r == special).unwrap();

    let packed_bits = other_index as u32;
    let is_ack = false;
    let is_other = true;

    let r = Report {
        report: special.to_owned(),
        is_ack,
        is_other,
        packed_bits,
    };
    return Ok(r);
}

#[derive(Debug, Snafu)]
#[snafu(display("Value {value} is not a valid Report"))]
pub struct InvalidValueError {
    value: u32,
}

#[derive(Debug, Snafu)]
#[snafu(display("String {value} is not a valid Report"))]
pub struct InvalidStringError {
    value: String,
}
