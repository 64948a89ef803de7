//! Raw Video Format (RVF) accessor.

use crate::common::{self, CommonField, Subtype};
use crate::error::Result;
use crate::field::{self, FieldDescriptor, WordKind};
use crate::stream::{self, StreamField, PAYLOAD_OFFSET};

/// Fields specific to the RVF subtype, plus the fields it shares with
/// every other stream subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RvfField {
    /// Stream-shared field, delegated to [`crate::stream`].
    Stream(StreamField),
    /// Number of active pixels per line.
    ActivePixels,
    /// Total number of lines per frame, including blanking.
    TotalLines,
    /// Active-pixel-format flag.
    Ap,
    /// Field flag (interlaced video, odd/even field).
    F,
    /// End-of-field flag.
    Ef,
    /// Event field, reserved for future use by the format.
    Evt,
    /// Pixel-depth flag.
    Pd,
    /// Interlace flag.
    I,
    /// Bits per pixel, for the RAW pixel format.
    RawPixelDepth,
    /// Pixel layout (mono, YUV 4:2:2, Bayer, and so on), for RAW.
    RawPixelFormat,
    /// Nominal frame rate code, for RAW.
    RawFrameRate,
    /// Colorspace code, for RAW.
    RawColorspace,
    /// Number of lines carried by this packet, for RAW.
    RawNumLines,
    /// Interlace field sequence number, for RAW.
    RawISeqNum,
    /// Line number of the first line carried by this packet, for RAW.
    RawLineNumber,
}

const ACTIVE_PIXELS: FieldDescriptor = FieldDescriptor {
    byte_offset: 16,
    word: WordKind::W32,
    mask: 0xFFFF << 16,
    shift: 16,
};

const TOTAL_LINES: FieldDescriptor = FieldDescriptor {
    byte_offset: 16,
    word: WordKind::W32,
    mask: 0xFFFF,
    shift: 0,
};

const AP: FieldDescriptor = FieldDescriptor {
    byte_offset: 20,
    word: WordKind::W32,
    mask: 1 << 15,
    shift: 15,
};

const F: FieldDescriptor = FieldDescriptor {
    byte_offset: 20,
    word: WordKind::W32,
    mask: 1 << 13,
    shift: 13,
};

const EF: FieldDescriptor = FieldDescriptor {
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

const PD: FieldDescriptor = FieldDescriptor {
    byte_offset: 20,
    word: WordKind::W32,
    mask: 1 << 7,
    shift: 7,
};

const I: FieldDescriptor = FieldDescriptor {
    byte_offset: 20,
    word: WordKind::W32,
    mask: 1 << 6,
    shift: 6,
};

const RAW_PIXEL_DEPTH: FieldDescriptor = FieldDescriptor {
    byte_offset: PAYLOAD_OFFSET,
    word: WordKind::W64,
    mask: 0xF << 52,
    shift: 52,
};

const RAW_PIXEL_FORMAT: FieldDescriptor = FieldDescriptor {
    byte_offset: PAYLOAD_OFFSET,
    word: WordKind::W64,
    mask: 0xF << 48,
    shift: 48,
};

const RAW_FRAME_RATE: FieldDescriptor = FieldDescriptor {
    byte_offset: PAYLOAD_OFFSET,
    word: WordKind::W64,
    mask: 0xFF << 40,
    shift: 40,
};

const RAW_COLORSPACE: FieldDescriptor = FieldDescriptor {
    byte_offset: PAYLOAD_OFFSET,
    word: WordKind::W64,
    mask: 0xF << 36,
    shift: 36,
};

const RAW_NUM_LINES: FieldDescriptor = FieldDescriptor {
    byte_offset: PAYLOAD_OFFSET,
    word: WordKind::W64,
    mask: 0xF << 32,
    shift: 32,
};

const RAW_I_SEQ_NUM: FieldDescriptor = FieldDescriptor {
    byte_offset: PAYLOAD_OFFSET,
    word: WordKind::W64,
    mask: 0xFF << 16,
    shift: 16,
};

const RAW_LINE_NUMBER: FieldDescriptor = FieldDescriptor {
    byte_offset: PAYLOAD_OFFSET,
    word: WordKind::W64,
    mask: 0xFFFF,
    shift: 0,
};

fn descriptor(f: RvfField) -> FieldDescriptor {
    match f {
        RvfField::Stream(s) => stream::descriptor(s),
        RvfField::ActivePixels => ACTIVE_PIXELS,
        RvfField::TotalLines => TOTAL_LINES,
        RvfField::Ap => AP,
        RvfField::F => F,
        RvfField::Ef => EF,
        RvfField::Evt => EVT,
        RvfField::Pd => PD,
        RvfField::I => I,
        RvfField::RawPixelDepth => RAW_PIXEL_DEPTH,
        RvfField::RawPixelFormat => RAW_PIXEL_FORMAT,
        RvfField::RawFrameRate => RAW_FRAME_RATE,
        RvfField::RawColorspace => RAW_COLORSPACE,
        RvfField::RawNumLines => RAW_NUM_LINES,
        RvfField::RawISeqNum => RAW_I_SEQ_NUM,
        RvfField::RawLineNumber => RAW_LINE_NUMBER,
    }
}

/// Reads a field from an RVF PDU buffer.
pub fn get(buf: &[u8], f: RvfField) -> Result<u64> {
    field::get(buf, descriptor(f))
}

/// Writes a field into an RVF PDU buffer.
pub fn set(buf: &mut [u8], f: RvfField, value: u64) -> Result<()> {
    field::set(buf, descriptor(f), value)
}

/// Zeroes `buf` and initializes the fixed header of an RVF PDU: sets
/// `SUBTYPE` to [`Subtype::Rvf`] and `SV` to 1. Every other field is left
/// at its zeroed default.
pub fn init(buf: &mut [u8]) -> Result<()> {
    buf.iter_mut().for_each(|b| *b = 0);
    common::set(buf, CommonField::Subtype, Subtype::Rvf as u64)?;
    stream::set(buf, StreamField::Sv, 1)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_sets_subtype_and_sv_only() {
        let mut buf = [0xFFu8; PAYLOAD_OFFSET];
        init(&mut buf).unwrap();
        assert_eq!(
            common::get(&buf, CommonField::Subtype).unwrap(),
            Subtype::Rvf as u64
        );
        assert_eq!(get(&buf, RvfField::Stream(StreamField::Sv)).unwrap(), 1);
        assert_eq!(get(&buf, RvfField::ActivePixels).unwrap(), 0);
    }

    #[test]
    fn active_pixels_and_total_lines_partition_format_specific() {
        let mut buf = [0u8; PAYLOAD_OFFSET];
        set(&mut buf, RvfField::ActivePixels, 1920).unwrap();
        set(&mut buf, RvfField::TotalLines, 1080).unwrap();
        assert_eq!(get(&buf, RvfField::ActivePixels).unwrap(), 1920);
        assert_eq!(get(&buf, RvfField::TotalLines).unwrap(), 1080);
    }

    #[test]
    fn raw_header_fields_partition_the_64_bit_word() {
        let mut buf = [0u8; PAYLOAD_OFFSET + 8];
        set(&mut buf, RvfField::RawPixelDepth, 0x8).unwrap();
        set(&mut buf, RvfField::RawPixelFormat, 0x2).unwrap();
        set(&mut buf, RvfField::RawFrameRate, 0x14).unwrap();
        set(&mut buf, RvfField::RawColorspace, 0x7).unwrap();
        set(&mut buf, RvfField::RawNumLines, 0x1).unwrap();
        set(&mut buf, RvfField::RawISeqNum, 0x3).unwrap();
        set(&mut buf, RvfField::RawLineNumber, 0x0100).unwrap();
        assert_eq!(get(&buf, RvfField::RawPixelDepth).unwrap(), 0x8);
        assert_eq!(get(&buf, RvfField::RawPixelFormat).unwrap(), 0x2);
        assert_eq!(get(&buf, RvfField::RawFrameRate).unwrap(), 0x14);
        assert_eq!(get(&buf, RvfField::RawColorspace).unwrap(), 0x7);
        assert_eq!(get(&buf, RvfField::RawNumLines).unwrap(), 0x1);
        assert_eq!(get(&buf, RvfField::RawISeqNum).unwrap(), 0x3);
        assert_eq!(get(&buf, RvfField::RawLineNumber).unwrap(), 0x0100);
    }
}
