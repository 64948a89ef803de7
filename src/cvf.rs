//! Compressed Video Format (CVF) accessor.

use crate::common::{self, CommonField, Subtype};
use crate::error::{AvtpError, Result};
use crate::field::{self, FieldDescriptor, WordKind};
use crate::stream::{self, StreamField, PAYLOAD_OFFSET};

/// `FORMAT` value for RFC-payload-carrying CVF streams. This is the only
/// format byte this crate's initializer ever writes; IEEE 1722-2016 leaves
/// the rest of the `FORMAT` space to legacy/vendor use.
pub const FORMAT_RFC: u8 = 0x02;

/// `FORMAT_SUBTYPE` values nested under [`FORMAT_RFC`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FormatSubtype {
    /// Motion JPEG.
    Mjpeg = 0x00,
    /// ITU-T H.264.
    H264 = 0x01,
    /// JPEG 2000.
    Jpeg2000 = 0x02,
}

/// Fields specific to the CVF subtype, plus the fields it shares with
/// every other stream subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CvfField {
    /// Stream-shared field, delegated to [`crate::stream`].
    Stream(StreamField),
    /// Video payload format; this crate always writes [`FORMAT_RFC`].
    Format,
    /// Codec carried under `FORMAT_RFC`.
    FormatSubtype,
    /// Marker bit, set on the last AVTP packet of an access unit.
    M,
    /// Event field, reserved for future use by the format.
    Evt,
    /// H.264-only presentation-timestamp-valid flag.
    H264Ptv,
    /// H.264-only presentation timestamp, carried in the payload sub-header.
    H264Timestamp,
}

const FORMAT: FieldDescriptor = FieldDescriptor {
    byte_offset: 16,
    word: WordKind::W32,
    mask: 0xFF << 24,
    shift: 24,
};

const FORMAT_SUBTYPE: FieldDescriptor = FieldDescriptor {
    byte_offset: 16,
    word: WordKind::W32,
    mask: 0xFF << 16,
    shift: 16,
};

const M: FieldDescriptor = FieldDescriptor {
    byte_offset: 20,
    word: WordKind::W32,
    mask: 1 << 12,
    shift: 12,
};

const EVT: FieldDescriptor = FieldDescriptor {
    byte_offset: 20,
    word: WordKind::W32,
    mask: 0xF << 8,
    shift: 8,
};

const H264_PTV: FieldDescriptor = FieldDescriptor {
    byte_offset: 20,
    word: WordKind::W32,
    mask: 1 << 13,
    shift: 13,
};

const H264_TIMESTAMP: FieldDescriptor = FieldDescriptor {
    byte_offset: PAYLOAD_OFFSET,
    word: WordKind::W32,
    mask: 0xFFFF_FFFF,
    shift: 0,
};

fn descriptor(f: CvfField) -> FieldDescriptor {
    match f {
        CvfField::Stream(s) => stream::descriptor(s),
        CvfField::Format => FORMAT,
        CvfField::FormatSubtype => FORMAT_SUBTYPE,
        CvfField::M => M,
        CvfField::Evt => EVT,
        CvfField::H264Ptv => H264_PTV,
        CvfField::H264Timestamp => H264_TIMESTAMP,
    }
}

/// Reads a field from a CVF PDU buffer.
pub fn get(buf: &[u8], f: CvfField) -> Result<u64> {
    field::get(buf, descriptor(f))
}

/// Writes a field into a CVF PDU buffer.
pub fn set(buf: &mut [u8], f: CvfField, value: u64) -> Result<()> {
    field::set(buf, descriptor(f), value)
}

/// Zeroes `buf` and initializes the fixed header of a CVF PDU: sets
/// `SUBTYPE` to [`Subtype::Cvf`], `SV` to 1, `FORMAT` to [`FORMAT_RFC`],
/// and `FORMAT_SUBTYPE` to `format_subtype`.
///
/// Returns [`AvtpError::InvalidArgument`] if `format_subtype` is greater
/// than [`FormatSubtype::Jpeg2000`].
pub fn init(buf: &mut [u8], format_subtype: u8) -> Result<()> {
    if format_subtype > FormatSubtype::Jpeg2000 as u8 {
        return Err(AvtpError::InvalidArgument(format!(
            "format_subtype {format_subtype} exceeds AVTP_CVF_FORMAT_SUBTYPE_JPEG2000"
        )));
    }
    buf.iter_mut().for_each(|b| *b = 0);
    common::set(buf, CommonField::Subtype, Subtype::Cvf as u64)?;
    stream::set(buf, StreamField::Sv, 1)?;
    set(buf, CvfField::Format, FORMAT_RFC as u64)?;
    set(buf, CvfField::FormatSubtype, format_subtype as u64)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_rejects_a_format_subtype_past_jpeg2000() {
        let mut buf = [0u8; PAYLOAD_OFFSET + 4];
        assert!(matches!(
            init(&mut buf, 0x03),
            Err(AvtpError::InvalidArgument(_))
        ));
    }

    #[test]
    fn init_sets_format_rfc_and_requested_subtype() {
        let mut buf = [0u8; PAYLOAD_OFFSET + 4];
        init(&mut buf, FormatSubtype::H264 as u8).unwrap();
        assert_eq!(get(&buf, CvfField::Format).unwrap(), FORMAT_RFC as u64);
        assert_eq!(
            get(&buf, CvfField::FormatSubtype).unwrap(),
            FormatSubtype::H264 as u64
        );
        assert_eq!(get(&buf, CvfField::Stream(StreamField::Sv)).unwrap(), 1);
    }

    #[test]
    fn h264_timestamp_lives_in_the_payload_sub_header() {
        let mut buf = [0u8; PAYLOAD_OFFSET + 4];
        set(&mut buf, CvfField::H264Timestamp, 0xDEAD_BEEF).unwrap();
        assert_eq!(buf[PAYLOAD_OFFSET..], [0xDE, 0xAD, 0xBE, 0xEF]);
    }
}
