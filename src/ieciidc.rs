//! IEC 61883/IIDC (legacy FireWire isochronous transport) accessor.
//!
//! The CIP fields below are a direct re-expression of IEC 61883's Common
//! Isochronous Packet header, which predates AVTP and is carried as this
//! subtype's payload sub-header. Several CIP fields physically overlap:
//! `TSF`/`ND` share one bit, and `EVT`/`SFC`/`N`/`NO_DATA` share one byte
//! region, because IEC 61883-4/6/7/8 each interpret that region
//! differently depending on the format in use. This crate does not
//! enforce which interpretation applies; callers pick the field that
//! matches the CIP format they are working with.

use crate::common::{self, CommonField, Subtype};
use crate::error::{AvtpError, Result};
use crate::field::{self, FieldDescriptor, WordKind};
use crate::stream::{self, StreamField, PAYLOAD_OFFSET};

const CIP_1_OFFSET: usize = PAYLOAD_OFFSET;
const CIP_2_OFFSET: usize = PAYLOAD_OFFSET + 4;

/// `TAG` value for a stream with no CIP header.
pub const TAG_NO_CIP: u8 = 0x00;
/// `TAG` value for a stream carrying a CIP header.
pub const TAG_CIP: u8 = 0x01;

/// Fields specific to the IEC 61883/IIDC subtype, plus the fields it
/// shares with every other stream subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IeciidcField {
    /// Stream-shared field, delegated to [`crate::stream`].
    Stream(StreamField),
    /// Gateway-valid flag.
    Gv,
    /// Opaque 32-bit gateway information word, loaded and stored whole.
    GatewayInfo,
    /// Whether the stream data carries a CIP header.
    Tag,
    /// Isochronous channel number.
    Channel,
    /// IEEE 1394 transaction code; this crate's initializer always writes
    /// the isochronous block transfer code (`0x0A`).
    Tcode,
    /// IEEE 1394 synchronization code.
    Sy,
    /// CIP quadlet indicator, first quadlet.
    CipQi1,
    /// CIP source node ID.
    CipSid,
    /// CIP data block size.
    CipDbs,
    /// CIP fraction number.
    CipFn,
    /// CIP quadlet padding count.
    CipQpc,
    /// CIP source packet header flag.
    CipSph,
    /// CIP data block counter.
    CipDbc,
    /// CIP quadlet indicator, second quadlet.
    CipQi2,
    /// CIP format ID.
    CipFmt,
    /// CIP SYT field (valid when the format's FDF carries a timestamp).
    CipSyt,
    /// CIP timestamp-present flag, for formats whose FDF is timestamp-shaped.
    CipTsf,
    /// CIP event field, for formats whose FDF is event-shaped.
    CipEvt,
    /// CIP sample format code, for formats whose FDF is event-shaped.
    CipSfc,
    /// CIP "no-data" marker bit, for formats whose FDF is event-shaped.
    CipN,
    /// CIP no-data byte, for formats whose FDF is event-shaped.
    CipNoData,
    /// CIP "no-data" flag variant used by some event-shaped formats.
    CipNd,
}

const GV: FieldDescriptor = FieldDescriptor {
    byte_offset: 0,
    word: WordKind::W32,
    mask: 1 << 17,
    shift: 17,
};

const GATEWAY_INFO: FieldDescriptor = FieldDescriptor {
    byte_offset: 16,
    word: WordKind::W32,
    mask: 0xFFFF_FFFF,
    shift: 0,
};

const TAG: FieldDescriptor = FieldDescriptor {
    byte_offset: 20,
    word: WordKind::W32,
    mask: 0x3 << 14,
    shift: 14,
};

const CHANNEL: FieldDescriptor = FieldDescriptor {
    byte_offset: 20,
    word: WordKind::W32,
    mask: 0x3F << 8,
    shift: 8,
};

const TCODE: FieldDescriptor = FieldDescriptor {
    byte_offset: 20,
    word: WordKind::W32,
    mask: 0xF << 4,
    shift: 4,
};

const SY: FieldDescriptor = FieldDescriptor {
    byte_offset: 20,
    word: WordKind::W32,
    mask: 0xF,
    shift: 0,
};

const CIP_QI_1: FieldDescriptor = FieldDescriptor {
    byte_offset: CIP_1_OFFSET,
    word: WordKind::W32,
    mask: 0x3 << 30,
    shift: 30,
};

const CIP_SID: FieldDescriptor = FieldDescriptor {
    byte_offset: CIP_1_OFFSET,
    word: WordKind::W32,
    mask: 0x3F << 24,
    shift: 24,
};

const CIP_DBS: FieldDescriptor = FieldDescriptor {
    byte_offset: CIP_1_OFFSET,
    word: WordKind::W32,
    mask: 0xFF << 16,
    shift: 16,
};

const CIP_FN: FieldDescriptor = FieldDescriptor {
    byte_offset: CIP_1_OFFSET,
    word: WordKind::W32,
    mask: 0x3 << 14,
    shift: 14,
};

const CIP_QPC: FieldDescriptor = FieldDescriptor {
    byte_offset: CIP_1_OFFSET,
    word: WordKind::W32,
    mask: 0x7 << 11,
    shift: 11,
};

const CIP_SPH: FieldDescriptor = FieldDescriptor {
    byte_offset: CIP_1_OFFSET,
    word: WordKind::W32,
    mask: 1 << 10,
    shift: 10,
};

const CIP_DBC: FieldDescriptor = FieldDescriptor {
    byte_offset: CIP_1_OFFSET,
    word: WordKind::W32,
    mask: 0xFF,
    shift: 0,
};

const CIP_QI_2: FieldDescriptor = FieldDescriptor {
    byte_offset: CIP_2_OFFSET,
    word: WordKind::W32,
    mask: 0x3 << 30,
    shift: 30,
};

const CIP_FMT: FieldDescriptor = FieldDescriptor {
    byte_offset: CIP_2_OFFSET,
    word: WordKind::W32,
    mask: 0x3F << 24,
    shift: 24,
};

const CIP_SYT: FieldDescriptor = FieldDescriptor {
    byte_offset: CIP_2_OFFSET,
    word: WordKind::W32,
    mask: 0xFFFF,
    shift: 0,
};

const CIP_TSF: FieldDescriptor = FieldDescriptor {
    byte_offset: CIP_2_OFFSET,
    word: WordKind::W32,
    mask: 1 << 23,
    shift: 23,
};

const CIP_EVT: FieldDescriptor = FieldDescriptor {
    byte_offset: CIP_2_OFFSET,
    word: WordKind::W32,
    mask: 0x3 << 20,
    shift: 20,
};

const CIP_SFC: FieldDescriptor = FieldDescriptor {
    byte_offset: CIP_2_OFFSET,
    word: WordKind::W32,
    mask: 0x7 << 16,
    shift: 16,
};

const CIP_N: FieldDescriptor = FieldDescriptor {
    byte_offset: CIP_2_OFFSET,
    word: WordKind::W32,
    mask: 1 << 19,
    shift: 19,
};

const CIP_NO_DATA: FieldDescriptor = FieldDescriptor {
    byte_offset: CIP_2_OFFSET,
    word: WordKind::W32,
    mask: 0xFF << 16,
    shift: 16,
};

const CIP_ND: FieldDescriptor = FieldDescriptor {
    byte_offset: CIP_2_OFFSET,
    word: WordKind::W32,
    mask: 1 << 23,
    shift: 23,
};

fn descriptor(f: IeciidcField) -> FieldDescriptor {
    match f {
        IeciidcField::Stream(s) => stream::descriptor(s),
        IeciidcField::Gv => GV,
        IeciidcField::GatewayInfo => GATEWAY_INFO,
        IeciidcField::Tag => TAG,
        IeciidcField::Channel => CHANNEL,
        IeciidcField::Tcode => TCODE,
        IeciidcField::Sy => SY,
        IeciidcField::CipQi1 => CIP_QI_1,
        IeciidcField::CipSid => CIP_SID,
        IeciidcField::CipDbs => CIP_DBS,
        IeciidcField::CipFn => CIP_FN,
        IeciidcField::CipQpc => CIP_QPC,
        IeciidcField::CipSph => CIP_SPH,
        IeciidcField::CipDbc => CIP_DBC,
        IeciidcField::CipQi2 => CIP_QI_2,
        IeciidcField::CipFmt => CIP_FMT,
        IeciidcField::CipSyt => CIP_SYT,
        IeciidcField::CipTsf => CIP_TSF,
        IeciidcField::CipEvt => CIP_EVT,
        IeciidcField::CipSfc => CIP_SFC,
        IeciidcField::CipN => CIP_N,
        IeciidcField::CipNoData => CIP_NO_DATA,
        IeciidcField::CipNd => CIP_ND,
    }
}

/// Reads a field from an IEC 61883/IIDC PDU buffer.
pub fn get(buf: &[u8], f: IeciidcField) -> Result<u64> {
    field::get(buf, descriptor(f))
}

/// Writes a field into an IEC 61883/IIDC PDU buffer.
pub fn set(buf: &mut [u8], f: IeciidcField, value: u64) -> Result<()> {
    field::set(buf, descriptor(f), value)
}

/// Zeroes `buf` and initializes the fixed header of an IEC 61883/IIDC
/// PDU, matching the reference implementation's call order exactly: sets
/// `SUBTYPE`, then `SV` via the stream-shared setter, then `TCODE` to the
/// isochronous block transfer code (`0x0A`), then `TAG` to `tag`.
///
/// Returns [`AvtpError::InvalidArgument`] if `tag` is neither
/// [`TAG_NO_CIP`] nor [`TAG_CIP`].
pub fn init(buf: &mut [u8], tag: u8) -> Result<()> {
    if tag > TAG_CIP {
        return Err(AvtpError::InvalidArgument(format!(
            "tag {tag} exceeds AVTP_IECIIDC_TAG_CIP"
        )));
    }
    buf.iter_mut().for_each(|b| *b = 0);
    common::set(buf, CommonField::Subtype, Subtype::Iec61883Iidc as u64)?;
    stream::set(buf, StreamField::Sv, 1)?;
    set(buf, IeciidcField::Tcode, 0x0A)?;
    set(buf, IeciidcField::Tag, tag as u64)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_rejects_a_tag_past_tag_cip() {
        let mut buf = [0u8; PAYLOAD_OFFSET + 8];
        assert!(matches!(
            init(&mut buf, 0x02),
            Err(AvtpError::InvalidArgument(_))
        ));
    }

    #[test]
    fn init_matches_the_reference_call_order() {
        let mut buf = [0u8; PAYLOAD_OFFSET + 8];
        init(&mut buf, TAG_CIP).unwrap();
        assert_eq!(
            common::get(&buf, CommonField::Subtype).unwrap(),
            Subtype::Iec61883Iidc as u64
        );
        assert_eq!(get(&buf, IeciidcField::Stream(StreamField::Sv)).unwrap(), 1);
        assert_eq!(get(&buf, IeciidcField::Tcode).unwrap(), 0x0A);
        assert_eq!(get(&buf, IeciidcField::Tag).unwrap(), TAG_CIP as u64);
    }

    #[test]
    fn tsf_and_nd_share_a_bit_by_design() {
        let mut buf = [0u8; PAYLOAD_OFFSET + 8];
        set(&mut buf, IeciidcField::CipTsf, 1).unwrap();
        assert_eq!(get(&buf, IeciidcField::CipNd).unwrap(), 1);
    }

    #[test]
    fn gateway_info_is_a_direct_whole_word_load() {
        let mut buf = [0u8; PAYLOAD_OFFSET];
        set(&mut buf, IeciidcField::GatewayInfo, 0x1234_5678).unwrap();
        assert_eq!(buf[16..20], [0x12, 0x34, 0x56, 0x78]);
    }
}
