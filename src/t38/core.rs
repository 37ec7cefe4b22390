//! T.38 IFP packet codec
//!
//! Serialises and deserialises IFP packets per the ASN.1 PER encoding of
//! ITU T.38, for protocol versions 0 and 1. Version 0 here means the
//! original specification complete with its well known ASN.1 typo, which
//! moves the field-type bits of a data field element; interworking with
//! deployed version 0 endpoints requires reproducing it, not fixing it.
//!
//! Inbound packets are classified by sequence number (repeats and stale
//! packets dropped, gaps and restarts reported) and decoded into a list of
//! [`IfpEvent`] values for the terminal or gateway to act on.

use snafu::Snafu;
use tracing::{debug, trace};

/// Sequence numbers further away than this are a restart, not a gap.
const ACCEPTABLE_SEQ_NO_OFFSET: u32 = 2000;

/// T.30 indicator signals carried by IFP indicator packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Indicator {
    NoSignal = 0,
    Cng,
    Ced,
    V21Preamble,
    V27ter2400Training,
    V27ter4800Training,
    V29_7200Training,
    V29_9600Training,
    V17_7200ShortTraining,
    V17_7200LongTraining,
    V17_9600ShortTraining,
    V17_9600LongTraining,
    V17_12000ShortTraining,
    V17_12000LongTraining,
    V17_14400ShortTraining,
    V17_14400LongTraining,
    V8Ansam,
    V8Signal,
    V34CntlChannel1200,
    V34PriChannel,
    V34CcRetrain,
    V33_12000Training,
    V33_14400Training,
}

impl Indicator {
    pub fn from_code(code: u8) -> Option<Self> {
        use Indicator::*;
        Some(match code {
            0 => NoSignal,
            1 => Cng,
            2 => Ced,
            3 => V21Preamble,
            4 => V27ter2400Training,
            5 => V27ter4800Training,
            6 => V29_7200Training,
            7 => V29_9600Training,
            8 => V17_7200ShortTraining,
            9 => V17_7200LongTraining,
            10 => V17_9600ShortTraining,
            11 => V17_9600LongTraining,
            12 => V17_12000ShortTraining,
            13 => V17_12000LongTraining,
            14 => V17_14400ShortTraining,
            15 => V17_14400LongTraining,
            16 => V8Ansam,
            17 => V8Signal,
            18 => V34CntlChannel1200,
            19 => V34PriChannel,
            20 => V34CcRetrain,
            21 => V33_12000Training,
            22 => V33_14400Training,
            _ => return None,
        })
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Modem data streams carried by IFP data packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DataType {
    V21 = 0,
    V27ter2400,
    V27ter4800,
    V29_7200,
    V29_9600,
    V17_7200,
    V17_9600,
    V17_12000,
    V17_14400,
    V8,
    V34PriRate,
    V34Cc1200,
    V34PriCh,
    V33_12000,
    V33_14400,
}

impl DataType {
    pub fn from_code(code: u8) -> Option<Self> {
        use DataType::*;
        Some(match code {
            0 => V21,
            1 => V27ter2400,
            2 => V27ter4800,
            3 => V29_7200,
            4 => V29_9600,
            5 => V17_7200,
            6 => V17_9600,
            7 => V17_12000,
            8 => V17_14400,
            9 => V8,
            10 => V34PriRate,
            11 => V34Cc1200,
            12 => V34PriCh,
            13 => V33_12000,
            14 => V33_14400,
            _ => return None,
        })
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Field types within an IFP data packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FieldType {
    HdlcData = 0,
    HdlcSigEnd,
    HdlcFcsOk,
    HdlcFcsBad,
    HdlcFcsOkSigEnd,
    HdlcFcsBadSigEnd,
    T4NonEcmData,
    T4NonEcmSigEnd,
    CmMessage,
    JmMessage,
    CiMessage,
    V34Rate,
}

impl FieldType {
    pub fn from_code(code: u8) -> Option<Self> {
        use FieldType::*;
        Some(match code {
            0 => HdlcData,
            1 => HdlcSigEnd,
            2 => HdlcFcsOk,
            3 => HdlcFcsBad,
            4 => HdlcFcsOkSigEnd,
            5 => HdlcFcsBadSigEnd,
            6 => T4NonEcmData,
            7 => T4NonEcmSigEnd,
            8 => CmMessage,
            9 => JmMessage,
            10 => CiMessage,
            11 => V34Rate,
            _ => return None,
        })
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Transport under the IFP stream. The transport itself is outside this
/// layer; the option is carried for session negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportProtocol {
    Udptl,
    Rtp,
    Tcp,
}

/// What one received IFP packet meant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IfpEvent {
    /// An indicator changed the state of the line.
    Indicator(Indicator),
    /// One data field element.
    Data {
        data_type: DataType,
        field_type: FieldType,
        payload: Vec<u8>,
    },
    /// Packets went missing: expected..received never arrived. A restart of
    /// the far sequence is reported as (-1, -1).
    Missing { expected: i32, received: i32 },
}

/// Sequence number classification, §4.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqClass {
    Equal,
    Repeat,
    Late,
    Gap,
    Restart,
}

/// Classify a received sequence number against the expected one.
pub fn classify_seq_no(expected: u16, received: u16) -> SeqClass {
    if expected == received {
        return SeqClass::Equal;
    }
    if received.wrapping_add(1) == expected {
        return SeqClass::Repeat;
    }
    let expected = expected as u32;
    let received = received as u32;
    if expected > received {
        if expected > received + 0x10000 - ACCEPTABLE_SEQ_NO_OFFSET {
            return SeqClass::Gap;
        }
        if expected < received + ACCEPTABLE_SEQ_NO_OFFSET {
            return SeqClass::Late;
        }
    } else {
        if expected + ACCEPTABLE_SEQ_NO_OFFSET > received {
            return SeqClass::Gap;
        }
        if expected + 0x10000 - ACCEPTABLE_SEQ_NO_OFFSET < received {
            return SeqClass::Late;
        }
    }
    SeqClass::Restart
}

#[derive(Debug, Snafu)]
pub enum IfpError {
    /// Packet shorter or longer than its contents claim
    #[snafu(display("bad IFP packet length"))]
    BadLength,

    /// An indicator packet carried a data field
    #[snafu(display("data field present with an indicator"))]
    DataWithIndicator,

    /// Indicator code outside the defined set
    #[snafu(display("unknown indicator {code}"))]
    UnknownIndicator { code: u8 },

    /// Data type code outside the defined set
    #[snafu(display("unknown data type {code}"))]
    UnknownDataType { code: u8 },

    /// Field type code outside the defined set
    #[snafu(display("unknown field type {code}"))]
    UnknownFieldType { code: u8 },

    /// Tried to send something this protocol version cannot express
    #[snafu(display("unencodable for T.38 version {version}"))]
    Unencodable { version: u8 },
}

/// One field element for multi-field transmission.
pub struct DataField<'a> {
    pub field_type: FieldType,
    pub data: Option<&'a [u8]>,
}

/// Packet transmit hook: (sequence number, payload, send count).
///
/// Indicators are sent with a count of 3 for robustness against loss; data
/// packets with a count of 1.
pub type TxPacketHandler = Box<dyn FnMut(u16, &[u8], u32)>;

/// T.38 IFP endpoint state.
pub struct T38Core {
    rx_expected_seq_no: Option<u16>,
    current_rx_indicator: Option<Indicator>,
    tx_seq_no: u16,
    current_tx_indicator: Option<Indicator>,
    missing_packets: u32,

    t38_version: u8,
    pub data_rate_management_method: u8,
    pub data_transport_protocol: TransportProtocol,
    pub fill_bit_removal: bool,
    pub mmr_transcoding: bool,
    pub jbig_transcoding: bool,
    pub max_buffer_size: u32,
    pub max_datagram_size: u32,
    pub iaf: bool,
    pub fastest_image_data_rate: u32,

    tx_packet_handler: TxPacketHandler,
}

impl T38Core {
    pub fn new(tx_packet_handler: TxPacketHandler) -> Self {
        Self {
            rx_expected_seq_no: None,
            current_rx_indicator: None,
            tx_seq_no: 0,
            current_tx_indicator: None,
            missing_packets: 0,
            t38_version: 0,
            data_rate_management_method: 2,
            data_transport_protocol: TransportProtocol::Udptl,
            fill_bit_removal: false,
            mmr_transcoding: false,
            jbig_transcoding: false,
            max_buffer_size: 400,
            max_datagram_size: 100,
            iaf: false,
            fastest_image_data_rate: 14400,
            tx_packet_handler,
        }
    }

    pub fn set_t38_version(&mut self, version: u8) {
        self.t38_version = version;
    }

    pub fn t38_version(&self) -> u8 {
        self.t38_version
    }

    pub fn missing_packets(&self) -> u32 {
        self.missing_packets
    }

    pub fn current_rx_indicator(&self) -> Option<Indicator> {
        self.current_rx_indicator
    }

    pub fn current_tx_indicator(&self) -> Option<Indicator> {
        self.current_tx_indicator
    }

    pub fn tx_seq_no(&self) -> u16 {
        self.tx_seq_no
    }

    /// Process one received IFP packet.
    ///
    /// Returns the decoded events, or an error for a malformed packet; the
    /// caller may continue with subsequent packets after an error.
    pub fn rx_ifp_packet(&mut self, seq_no: u16, buf: &[u8]) -> Result<Vec<IfpEvent>, IfpError> {
        let mut events = Vec::new();
        if buf.is_empty() {
            return Err(IfpError::BadLength);
        }
        match self.rx_expected_seq_no {
            None => {
                // First packet: accept whatever number it carries.
                self.rx_expected_seq_no = Some(seq_no);
            }
            Some(expected) if expected != seq_no => {
                match classify_seq_no(expected, seq_no) {
                    SeqClass::Repeat => {
                        trace!(seq_no, "repeat packet number");
                        return Ok(events);
                    }
                    SeqClass::Late => {
                        trace!(seq_no, expected, "late packet");
                        return Ok(events);
                    }
                    SeqClass::Gap => {
                        debug!(seq_no, expected, "missing packets");
                        events.push(IfpEvent::Missing {
                            expected: expected as i32,
                            received: seq_no as i32,
                        });
                        self.missing_packets += seq_no.wrapping_sub(expected) as u32;
                    }
                    SeqClass::Restart | SeqClass::Equal => {
                        debug!(seq_no, expected, "sequence restart");
                        events.push(IfpEvent::Missing {
                            expected: -1,
                            received: -1,
                        });
                        self.missing_packets += 1;
                    }
                }
                self.rx_expected_seq_no = Some(seq_no);
            }
            _ => {}
        }
        self.rx_expected_seq_no = Some(seq_no.wrapping_add(1));

        let data_field_present = buf[0] & 0x80 != 0;
        let is_data = buf[0] & 0x40 != 0;
        if !is_data {
            // Indicators never carry a data field.
            if data_field_present {
                return Err(IfpError::DataWithIndicator);
            }
            let indicator = if buf[0] & 0x20 != 0 {
                // Extension: 6 more bits across the two octets
                if buf.len() != 2 {
                    return Err(IfpError::BadLength);
                }
                let code = 16 + (((buf[0] << 2) & 0x3C) | ((buf[1] >> 6) & 0x3));
                Indicator::from_code(code).ok_or(IfpError::UnknownIndicator { code })?
            } else {
                if buf.len() != 1 {
                    return Err(IfpError::BadLength);
                }
                let code = (buf[0] >> 1) & 0xF;
                Indicator::from_code(code).ok_or(IfpError::UnknownIndicator { code })?
            };
            trace!(seq_no, ?indicator, "rx indicator");
            events.push(IfpEvent::Indicator(indicator));
            self.current_rx_indicator = Some(indicator);
            return Ok(events);
        }

        let mut ptr;
        let data_type = if buf[0] & 0x20 != 0 {
            if buf.len() < 2 {
                return Err(IfpError::BadLength);
            }
            let code = 9 + (((buf[0] << 2) & 0x3C) | ((buf[1] >> 6) & 0x3));
            ptr = 2;
            DataType::from_code(code).ok_or(IfpError::UnknownDataType { code })?
        } else {
            let code = (buf[0] >> 1) & 0xF;
            ptr = 1;
            DataType::from_code(code).ok_or(IfpError::UnknownDataType { code })?
        };
        if !data_field_present {
            // Odd, but accept it if the length checks out.
            if ptr != buf.len() {
                return Err(IfpError::BadLength);
            }
            return Ok(events);
        }
        if ptr >= buf.len() {
            return Err(IfpError::BadLength);
        }
        let count = if buf[ptr] & 0x80 == 0 {
            let c = buf[ptr] as usize;
            ptr += 1;
            c
        } else if buf[ptr] & 0x40 == 0 {
            if ptr + 1 >= buf.len() {
                return Err(IfpError::BadLength);
            }
            let c = (((buf[ptr] & 0x3F) as usize) << 8) | buf[ptr + 1] as usize;
            ptr += 2;
            c
        } else {
            // Fragmented counts only arise beyond 16384 elements; no sane
            // datagram carries that.
            return Err(IfpError::BadLength);
        };
        let mut other_half = false;
        for _ in 0..count {
            if ptr >= buf.len() {
                return Err(IfpError::BadLength);
            }
            let field_data_present;
            let field_type;
            if self.t38_version == 0 {
                // The original version of T.38, typo included.
                if other_half {
                    // The previous element had no data field, leaving us in
                    // the middle of this octet.
                    field_data_present = buf[ptr] & 0x08 != 0;
                    let code = buf[ptr] & 0x07;
                    field_type =
                        FieldType::from_code(code).ok_or(IfpError::UnknownFieldType { code })?;
                    ptr += 1;
                    other_half = false;
                } else {
                    field_data_present = buf[ptr] & 0x80 != 0;
                    let code = (buf[ptr] >> 4) & 0x07;
                    field_type =
                        FieldType::from_code(code).ok_or(IfpError::UnknownFieldType { code })?;
                    if field_data_present {
                        ptr += 1;
                    } else {
                        other_half = true;
                    }
                }
                if field_type.code() > FieldType::T4NonEcmSigEnd.code() {
                    return Err(IfpError::UnknownFieldType {
                        code: field_type.code(),
                    });
                }
            } else {
                field_data_present = buf[ptr] & 0x80 != 0;
                if buf[ptr] & 0x40 != 0 {
                    if ptr + 1 >= buf.len() {
                        return Err(IfpError::BadLength);
                    }
                    let code = 8 + (((buf[ptr] << 2) & 0x3C) | ((buf[ptr + 1] >> 6) & 0x3));
                    field_type =
                        FieldType::from_code(code).ok_or(IfpError::UnknownFieldType { code })?;
                    ptr += 2;
                } else {
                    let code = (buf[ptr] >> 3) & 0x07;
                    field_type =
                        FieldType::from_code(code).ok_or(IfpError::UnknownFieldType { code })?;
                    ptr += 1;
                }
            }
            let payload = if field_data_present {
                if ptr + 2 > buf.len() {
                    return Err(IfpError::BadLength);
                }
                let numocts = (((buf[ptr] as usize) << 8) | buf[ptr + 1] as usize) + 1;
                ptr += 2;
                if ptr + numocts > buf.len() {
                    return Err(IfpError::BadLength);
                }
                let payload = buf[ptr..ptr + numocts].to_vec();
                ptr += numocts;
                payload
            } else {
                Vec::new()
            };
            trace!(seq_no, ?data_type, ?field_type, len = payload.len(), "rx data");
            events.push(IfpEvent::Data {
                data_type,
                field_type,
                payload,
            });
        }
        if ptr != buf.len() {
            return Err(IfpError::BadLength);
        }
        Ok(events)
    }

    /// Encode a single-field data packet.
    pub fn encode_data(
        &self,
        data_type: DataType,
        field_type: FieldType,
        msg: &[u8],
    ) -> Result<Vec<u8>, IfpError> {
        let fields = [DataField {
            field_type,
            data: if msg.is_empty() { None } else { Some(msg) },
        }];
        self.encode_data_fields(data_type, &fields)
    }

    /// Encode a data packet carrying a sequence of field elements.
    pub fn encode_data_fields(
        &self,
        data_type: DataType,
        fields: &[DataField<'_>],
    ) -> Result<Vec<u8>, IfpError> {
        let mut buf = Vec::new();
        let code = data_type.code();
        if code <= DataType::V17_14400.code() {
            buf.push(0x80 | 0x40 | (code << 1));
        } else {
            let ext = code - DataType::V8.code();
            buf.push(0x80 | 0x60 | (ext >> 2));
            buf.push(ext << 6);
        }
        // Element count: 1 octet if < 0x80, 2 octets if < 0x4000.
        let count = fields.len();
        if count < 0x80 {
            buf.push(count as u8);
        } else if count < 0x4000 {
            buf.push(0x80 | (count >> 8) as u8);
            buf.push((count & 0xFF) as u8);
        } else {
            return Err(IfpError::Unencodable {
                version: self.t38_version,
            });
        }
        let mut pending_half: Option<usize> = None;
        for field in fields {
            let data_present = field.data.map(|d| !d.is_empty()).unwrap_or(false);
            let ft = field.field_type.code();
            if self.t38_version == 0 {
                if ft > FieldType::T4NonEcmSigEnd.code() {
                    return Err(IfpError::Unencodable { version: 0 });
                }
                if let Some(at) = pending_half.take() {
                    buf[at] |= ((data_present as u8) << 3) | ft;
                } else {
                    buf.push(((data_present as u8) << 7) | (ft << 4));
                    if !data_present {
                        pending_half = Some(buf.len() - 1);
                    }
                }
            } else if ft <= FieldType::T4NonEcmSigEnd.code() {
                buf.push(((data_present as u8) << 7) | (ft << 3));
            } else {
                let ext = ft - FieldType::CmMessage.code();
                buf.push(((data_present as u8) << 7) | 0x40 | (ext >> 1));
                buf.push(ext << 7);
            }
            if data_present {
                let data = field.data.unwrap();
                if data.len() > 65535 {
                    return Err(IfpError::Unencodable {
                        version: self.t38_version,
                    });
                }
                let len_minus_1 = (data.len() - 1) as u16;
                buf.push((len_minus_1 >> 8) as u8);
                buf.push((len_minus_1 & 0xFF) as u8);
                buf.extend_from_slice(data);
            }
        }
        Ok(buf)
    }

    /// Encode an indicator packet.
    pub fn encode_indicator(&self, indicator: Indicator) -> Vec<u8> {
        let code = indicator.code();
        if code <= Indicator::V17_14400LongTraining.code() {
            vec![code << 1]
        } else {
            let ext = code - Indicator::V8Ansam.code();
            vec![0x20 | (ext >> 2), ext << 6]
        }
    }

    /// Send a single-field data packet.
    pub fn send_data(&mut self, data_type: DataType, field_type: FieldType, msg: &[u8]) {
        trace!(seq = self.tx_seq_no, ?data_type, ?field_type, len = msg.len(), "tx data");
        match self.encode_data(data_type, field_type, msg) {
            Ok(buf) => (self.tx_packet_handler)(self.tx_seq_no, &buf, 1),
            Err(err) => debug!(%err, "could not encode data packet"),
        }
        self.tx_seq_no = self.tx_seq_no.wrapping_add(1);
    }

    /// Send an indicator packet `count` times; the T.38 recommendation is 3
    /// for robustness.
    pub fn send_indicator(&mut self, indicator: Indicator, count: u32) {
        trace!(seq = self.tx_seq_no, ?indicator, "tx indicator");
        let buf = self.encode_indicator(indicator);
        (self.tx_packet_handler)(self.tx_seq_no, &buf, count);
        self.current_tx_indicator = Some(indicator);
        self.tx_seq_no = self.tx_seq_no.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn core_with_capture() -> (T38Core, Rc<RefCell<Vec<(u16, Vec<u8>, u32)>>>) {
        let sent: Rc<RefCell<Vec<(u16, Vec<u8>, u32)>>> = Rc::new(RefCell::new(Vec::new()));
        let capture = sent.clone();
        let core = T38Core::new(Box::new(move |seq, buf, count| {
            capture.borrow_mut().push((seq, buf.to_vec(), count));
        }));
        (core, sent)
    }

    #[test]
    fn test_seq_classification() {
        assert_eq!(classify_seq_no(10, 10), SeqClass::Equal);
        assert_eq!(classify_seq_no(10, 9), SeqClass::Repeat);
        assert_eq!(classify_seq_no(100, 50), SeqClass::Late);
        assert_eq!(classify_seq_no(50, 100), SeqClass::Gap);
        assert_eq!(classify_seq_no(50, 40000), SeqClass::Restart);
        // Wrap-around cases
        assert_eq!(classify_seq_no(0, 65535), SeqClass::Repeat);
        assert_eq!(classify_seq_no(5, 65530), SeqClass::Late);
        assert_eq!(classify_seq_no(65530, 5), SeqClass::Gap);
    }

    #[test]
    fn test_indicator_roundtrip_all() {
        let (mut core, _) = core_with_capture();
        for code in 0..=22u8 {
            let indicator = Indicator::from_code(code).unwrap();
            let buf = core.encode_indicator(indicator);
            let events = core.rx_ifp_packet(code as u16, &buf).unwrap();
            assert!(events.contains(&IfpEvent::Indicator(indicator)), "{indicator:?}");
        }
    }

    #[test]
    fn test_data_roundtrip_both_versions() {
        for version in [0u8, 1] {
            let (mut core, _) = core_with_capture();
            core.set_t38_version(version);
            let field_limit = if version == 0 {
                FieldType::T4NonEcmSigEnd.code()
            } else {
                FieldType::V34Rate.code()
            };
            let mut seq = 0u16;
            for dt_code in 0..=14u8 {
                let data_type = DataType::from_code(dt_code).unwrap();
                for ft_code in 0..=field_limit {
                    let field_type = FieldType::from_code(ft_code).unwrap();
                    let msg = vec![0x55u8, 0xAA, dt_code, ft_code];
                    let buf = core.encode_data(data_type, field_type, &msg).unwrap();
                    let events = core.rx_ifp_packet(seq, &buf).unwrap();
                    seq = seq.wrapping_add(1);
                    let found = events.iter().any(|ev| {
                        matches!(ev, IfpEvent::Data { data_type: d, field_type: f, payload }
                            if *d == data_type && *f == field_type && payload == &msg)
                    });
                    assert!(found, "v{version} {data_type:?}/{field_type:?}");
                }
            }
        }
    }

    #[test]
    fn test_v0_cannot_carry_extended_fields() {
        let (core, _) = core_with_capture();
        assert!(core
            .encode_data(DataType::V21, FieldType::CmMessage, &[1])
            .is_err());
    }

    #[test]
    fn test_empty_field_roundtrip() {
        let (mut core, _) = core_with_capture();
        let buf = core
            .encode_data(DataType::V21, FieldType::HdlcFcsOk, &[])
            .unwrap();
        let events = core.rx_ifp_packet(0, &buf).unwrap();
        assert_eq!(
            events,
            vec![IfpEvent::Data {
                data_type: DataType::V21,
                field_type: FieldType::HdlcFcsOk,
                payload: vec![],
            }]
        );
    }

    #[test]
    fn test_v0_paired_half_octet_fields() {
        // Two dataless fields in one packet share an octet in version 0.
        let (mut core, _) = core_with_capture();
        let fields = [
            DataField { field_type: FieldType::HdlcFcsOk, data: None },
            DataField { field_type: FieldType::HdlcSigEnd, data: None },
        ];
        let buf = core.encode_data_fields(DataType::V21, &fields).unwrap();
        let events = core.rx_ifp_packet(0, &buf).unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], IfpEvent::Data { field_type: FieldType::HdlcFcsOk, .. }));
        assert!(matches!(&events[1], IfpEvent::Data { field_type: FieldType::HdlcSigEnd, .. }));
    }

    #[test]
    fn test_malformed_packets_rejected() {
        let (mut core, _) = core_with_capture();
        // Indicator with data field present
        assert!(core.rx_ifp_packet(0, &[0x80]).is_err());
        // Indicator with trailing junk
        assert!(core.rx_ifp_packet(1, &[0x00, 0x00]).is_err());
        // Data packet whose field length overruns the buffer
        let good = core.encode_data(DataType::V21, FieldType::HdlcData, &[1, 2, 3]).unwrap();
        let mut truncated = good.clone();
        truncated.pop();
        assert!(core.rx_ifp_packet(2, &truncated).is_err());
        // And with junk appended
        let mut extended = good;
        extended.push(0);
        assert!(core.rx_ifp_packet(3, &extended).is_err());
    }

    #[test]
    fn test_gap_reported_and_counted() {
        let (mut core, _) = core_with_capture();
        let buf = core.encode_indicator(Indicator::NoSignal);
        for seq in 0..50u16 {
            core.rx_ifp_packet(seq, &buf).unwrap();
        }
        // Skip 50
        let events = core.rx_ifp_packet(51, &buf).unwrap();
        assert!(events.contains(&IfpEvent::Missing { expected: 50, received: 51 }));
        assert_eq!(core.missing_packets(), 1);
        // Subsequent packets accepted normally
        let events = core.rx_ifp_packet(52, &buf).unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_repeat_and_late_dropped() {
        let (mut core, _) = core_with_capture();
        let buf = core.encode_indicator(Indicator::Ced);
        core.rx_ifp_packet(10, &buf).unwrap();
        assert!(core.rx_ifp_packet(10, &buf).unwrap().is_empty());
        assert!(core.rx_ifp_packet(5, &buf).unwrap().is_empty());
        assert_eq!(core.missing_packets(), 0);
    }

    #[test]
    fn test_sequence_restart() {
        let (mut core, _) = core_with_capture();
        let buf = core.encode_indicator(Indicator::Ced);
        core.rx_ifp_packet(100, &buf).unwrap();
        let events = core.rx_ifp_packet(40000, &buf).unwrap();
        assert!(events.contains(&IfpEvent::Missing { expected: -1, received: -1 }));
        assert_eq!(core.missing_packets(), 1);
    }

    #[test]
    fn test_indicator_repeat_count() {
        let (mut core, sent) = core_with_capture();
        core.send_indicator(Indicator::V21Preamble, 3);
        core.send_data(DataType::V21, FieldType::HdlcData, &[0xFF, 0xC8]);
        let sent = sent.borrow();
        assert_eq!(sent[0].2, 3);
        assert_eq!(sent[1].2, 1);
        assert_eq!(sent[0].0, 0);
        assert_eq!(sent[1].0, 1);
    }
}
