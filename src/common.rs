//! The common PDU accessor: the first 32-bit word shared by every AVTP
//! subtype.
//!
//! `SUBTYPE` physically overlaps the most significant byte of the
//! subtype-specific `subtype_data` word used by every stream subtype;
//! setting it here must not disturb the remaining 24 bits, which is why
//! this goes through the same masked read-modify-write engine as every
//! other field in the crate rather than a plain byte store.

use crate::field::{self, FieldDescriptor, WordKind};
use crate::error::Result;

/// Fields of the common AVTP PDU header, present in every subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommonField {
    /// The 8-bit subtype byte identifying the AVTP payload family.
    Subtype,
    /// The stream-valid flag.
    StreamValid,
    /// The 3-bit AVTP version.
    Version,
}

const SUBTYPE: FieldDescriptor = FieldDescriptor {
    byte_offset: 0,
    word: WordKind::W32,
    mask: 0xFF00_0000,
    shift: 24,
};

const STREAM_VALID: FieldDescriptor = FieldDescriptor {
    byte_offset: 0,
    word: WordKind::W32,
    mask: 1 << 23,
    shift: 23,
};

const VERSION: FieldDescriptor = FieldDescriptor {
    byte_offset: 0,
    word: WordKind::W32,
    mask: 0x7 << 20,
    shift: 20,
};

fn descriptor(field: CommonField) -> FieldDescriptor {
    match field {
        CommonField::Subtype => SUBTYPE,
        CommonField::StreamValid => STREAM_VALID,
        CommonField::Version => VERSION,
    }
}

/// Reads a common-header field from any AVTP PDU buffer.
pub fn get(buf: &[u8], field: CommonField) -> Result<u64> {
    field::get(buf, descriptor(field))
}

/// Writes a common-header field into any AVTP PDU buffer.
pub fn set(buf: &mut [u8], field: CommonField, value: u64) -> Result<()> {
    field::set(buf, descriptor(field), value)
}

/// Byte values of the `SUBTYPE` field for each AVTP payload family (IEEE
/// 1722-2016 Table 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Subtype {
    /// Legacy FireWire-style isochronous transport, including MPEG-TS.
    Iec61883Iidc = 0x00,
    /// MMA Stream.
    Mma = 0x01,
    /// AVTP Audio Format.
    Aaf = 0x02,
    /// Compressed Video Format.
    Cvf = 0x03,
    /// Clock Reference Format.
    Crf = 0x04,
    /// Time-Synchronous Control Format.
    Tscf = 0x05,
    /// SDI Video Format.
    Svf = 0x06,
    /// Raw Video Format.
    Rvf = 0x07,
    /// Vendor-Specific Format Stream.
    VsfStream = 0x6F,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtype_byte_overlaps_subtype_data_msb() {
        let mut buf = [0u8; 4];
        set(&mut buf, CommonField::StreamValid, 1).unwrap();
        set(&mut buf, CommonField::Subtype, Subtype::Crf as u64).unwrap();
        assert_eq!(get(&buf, CommonField::Subtype).unwrap(), Subtype::Crf as u64);
        assert_eq!(get(&buf, CommonField::StreamValid).unwrap(), 1);
    }

    #[test]
    fn version_and_stream_valid_coexist() {
        let mut buf = [0u8; 4];
        set(&mut buf, CommonField::Version, 0x05).unwrap();
        set(&mut buf, CommonField::StreamValid, 1).unwrap();
        assert_eq!(get(&buf, CommonField::Version).unwrap(), 0x05);
        assert_eq!(get(&buf, CommonField::StreamValid).unwrap(), 1);
    }
}
