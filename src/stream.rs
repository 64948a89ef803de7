//! The stream PDU accessor: fields shared by every *stream* subtype (AAF,
//! CVF, IEC 61883/IIDC, RVF, VSF Stream). CRF has its own `subtype_data`
//! and `packet_info` layout and does not compose over this module — see
//! [`crate::crf`].
//!
//! Layout of the 24-byte stream PDU fixed header this module addresses:
//! `subtype_data` at offset 0 (4 bytes), `stream_id` at offset 4 (8 bytes),
//! `avtp_time` at offset 12 (4 bytes), `format_specific` at offset 16 (4
//! bytes), `packet_info` at offset 20 (4 bytes).

use crate::error::Result;
use crate::field::{self, FieldDescriptor, WordKind};

/// Byte offset of the variable-length payload following the 24-byte
/// stream PDU fixed header. Every per-subtype payload sub-header (H.264,
/// CIP, RAW) is addressed relative to this offset.
pub(crate) const PAYLOAD_OFFSET: usize = 24;

/// Fields shared by every AVTP stream subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamField {
    /// Stream-valid flag.
    Sv,
    /// Media clock restart flag.
    Mr,
    /// Timestamp-valid flag.
    Tv,
    /// 8-bit sequence number.
    SeqNum,
    /// Timestamp-uncertain flag.
    Tu,
    /// 64-bit stream identifier.
    StreamId,
    /// 32-bit AVTP presentation timestamp.
    Timestamp,
    /// Length in bytes of the stream data following the fixed header.
    StreamDataLen,
}

const SV: FieldDescriptor = FieldDescriptor {
    byte_offset: 0,
    word: WordKind::W32,
    mask: 1 << 23,
    shift: 23,
};

const MR: FieldDescriptor = FieldDescriptor {
    byte_offset: 0,
    word: WordKind::W32,
    mask: 1 << 19,
    shift: 19,
};

const TV: FieldDescriptor = FieldDescriptor {
    byte_offset: 0,
    word: WordKind::W32,
    mask: 1 << 16,
    shift: 16,
};

const SEQ_NUM: FieldDescriptor = FieldDescriptor {
    byte_offset: 0,
    word: WordKind::W32,
    mask: 0xFF << 8,
    shift: 8,
};

const TU: FieldDescriptor = FieldDescriptor {
    byte_offset: 0,
    word: WordKind::W32,
    mask: 1,
    shift: 0,
};

const STREAM_ID: FieldDescriptor = FieldDescriptor {
    byte_offset: 4,
    word: WordKind::W64,
    mask: u64::MAX,
    shift: 0,
};

const TIMESTAMP: FieldDescriptor = FieldDescriptor {
    byte_offset: 12,
    word: WordKind::W32,
    mask: 0xFFFF_FFFF,
    shift: 0,
};

const STREAM_DATA_LEN: FieldDescriptor = FieldDescriptor {
    byte_offset: 20,
    word: WordKind::W32,
    mask: 0xFFFF << 16,
    shift: 16,
};

pub(crate) fn descriptor(field: StreamField) -> FieldDescriptor {
    match field {
        StreamField::Sv => SV,
        StreamField::Mr => MR,
        StreamField::Tv => TV,
        StreamField::SeqNum => SEQ_NUM,
        StreamField::Tu => TU,
        StreamField::StreamId => STREAM_ID,
        StreamField::Timestamp => TIMESTAMP,
        StreamField::StreamDataLen => STREAM_DATA_LEN,
    }
}

/// Reads a stream-shared field from a stream PDU buffer.
pub fn get(buf: &[u8], field: StreamField) -> Result<u64> {
    field::get(buf, descriptor(field))
}

/// Writes a stream-shared field into a stream PDU buffer.
pub fn set(buf: &mut [u8], field: StreamField, value: u64) -> Result<()> {
    field::set(buf, descriptor(field), value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seq_num_and_tu_share_subtype_data_without_interference() {
        let mut buf = [0u8; 24];
        set(&mut buf, StreamField::SeqNum, 0xAB).unwrap();
        set(&mut buf, StreamField::Tu, 1).unwrap();
        assert_eq!(get(&buf, StreamField::SeqNum).unwrap(), 0xAB);
        assert_eq!(get(&buf, StreamField::Tu).unwrap(), 1);
    }

    #[test]
    fn stream_id_is_a_direct_64_bit_load() {
        let mut buf = [0u8; 24];
        set(&mut buf, StreamField::StreamId, 0x0123_4567_89AB_CDEF).unwrap();
        assert_eq!(buf[4..12], [0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF]);
        assert_eq!(get(&buf, StreamField::StreamId).unwrap(), 0x0123_4567_89AB_CDEF);
    }

    #[test]
    fn stream_data_len_lives_in_packet_info_high_half() {
        let mut buf = [0u8; 24];
        set(&mut buf, StreamField::StreamDataLen, 0xFFFF).unwrap();
        assert_eq!(buf[20..24], [0xFF, 0xFF, 0x00, 0x00]);
        assert_eq!(get(&buf, StreamField::StreamDataLen).unwrap(), 0xFFFF);
    }
}
