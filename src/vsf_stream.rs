//! Vendor-Specific Format (VSF) Stream accessor.
//!
//! `VENDOR_ID` is 48 bits wide, straddling two 32-bit words: the upper 32
//! bits live in `format_specific`, the lower 16 in `packet_info`'s high
//! half. That does not fit the single-word [`crate::field::FieldDescriptor`]
//! model the rest of this crate's fields use, so it gets its own
//! composite get/set pair instead of a table entry.

use crate::common::{self, CommonField, Subtype};
use crate::error::Result;
use crate::field;
use crate::stream::{self, StreamField};

const VENDOR_ID_HI: field::FieldDescriptor = field::FieldDescriptor {
    byte_offset: 16,
    word: field::WordKind::W32,
    mask: 0xFFFF_FFFF,
    shift: 0,
};

const VENDOR_ID_LO: field::FieldDescriptor = field::FieldDescriptor {
    byte_offset: 20,
    word: field::WordKind::W32,
    mask: 0xFFFF,
    shift: 0,
};

/// Fields specific to the VSF Stream subtype, plus the fields it shares
/// with every other stream subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VsfStreamField {
    /// Stream-shared field, delegated to [`crate::stream`].
    Stream(StreamField),
    /// 48-bit IEEE OUI-derived vendor identifier.
    VendorId,
}

/// Reads a field from a VSF Stream PDU buffer.
pub fn get(buf: &[u8], f: VsfStreamField) -> Result<u64> {
    match f {
        VsfStreamField::Stream(s) => field::get(buf, stream::descriptor(s)),
        VsfStreamField::VendorId => {
            let hi = field::get(buf, VENDOR_ID_HI)?;
            let lo = field::get(buf, VENDOR_ID_LO)?;
            Ok((hi << 16) | lo)
        }
    }
}

/// Writes a field into a VSF Stream PDU buffer.
pub fn set(buf: &mut [u8], f: VsfStreamField, value: u64) -> Result<()> {
    match f {
        VsfStreamField::Stream(s) => field::set(buf, stream::descriptor(s), value),
        VsfStreamField::VendorId => {
            field::set(buf, VENDOR_ID_HI, value >> 16)?;
            field::set(buf, VENDOR_ID_LO, value & 0xFFFF)
        }
    }
}

/// Zeroes `buf` and initializes the fixed header of a VSF Stream PDU:
/// sets `SUBTYPE` to [`Subtype::VsfStream`] and `SV` to 1. Every other
/// field is left at its zeroed default.
pub fn init(buf: &mut [u8]) -> Result<()> {
    buf.iter_mut().for_each(|b| *b = 0);
    common::set(buf, CommonField::Subtype, Subtype::VsfStream as u64)?;
    stream::set(buf, StreamField::Sv, 1)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_sets_subtype_and_sv_only() {
        let mut buf = [0xFFu8; stream::PAYLOAD_OFFSET];
        init(&mut buf).unwrap();
        assert_eq!(
            common::get(&buf, CommonField::Subtype).unwrap(),
            Subtype::VsfStream as u64
        );
        assert_eq!(get(&buf, VsfStreamField::Stream(StreamField::Sv)).unwrap(), 1);
        assert_eq!(get(&buf, VsfStreamField::VendorId).unwrap(), 0);
    }

    #[test]
    fn vendor_id_round_trips_across_the_word_boundary() {
        let mut buf = [0u8; stream::PAYLOAD_OFFSET];
        set(&mut buf, VsfStreamField::VendorId, 0x0011_2233_4455).unwrap();
        assert_eq!(get(&buf, VsfStreamField::VendorId).unwrap(), 0x0011_2233_4455);
        assert_eq!(buf[16..20], [0x00, 0x11, 0x22, 0x33]);
        assert_eq!(buf[20..22], [0x44, 0x55]);
    }

    #[test]
    fn vendor_id_does_not_disturb_stream_data_len() {
        let mut buf = [0u8; stream::PAYLOAD_OFFSET];
        stream::set(&mut buf, StreamField::StreamDataLen, 0x1234).unwrap();
        set(&mut buf, VsfStreamField::VendorId, 0xFFFF_FFFF_FFFF).unwrap();
        assert_eq!(stream::get(&buf, StreamField::StreamDataLen).unwrap(), 0x1234);
    }
}
