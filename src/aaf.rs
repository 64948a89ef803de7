//! AVTP Audio Format (AAF) accessor.
//!
//! Adds sample format fields on top of the fields shared by every stream
//! subtype (see [`crate::stream`]).

use crate::common::{self, CommonField, Subtype};
use crate::error::Result;
use crate::field::{self, FieldDescriptor, WordKind};
use crate::stream::{self, StreamField};

/// Fields specific to the AAF subtype, plus the fields it shares with
/// every other stream subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AafField {
    /// Stream-shared field, delegated to [`crate::stream`].
    Stream(StreamField),
    /// Sample format (PCM, 32-bit float, AES3, and so on).
    Format,
    /// Nominal sample rate.
    Nsr,
    /// Number of channels carried per AVTP frame.
    ChanPerFrame,
    /// Bit depth of each audio sample.
    BitDepth,
    /// Sparse timestamp mode flag.
    Sp,
    /// Event field, reserved for future use by the format.
    Evt,
}

const FORMAT: FieldDescriptor = FieldDescriptor {
    byte_offset: 16,
    word: WordKind::W32,
    mask: 0xFF << 24,
    shift: 24,
};

const NSR: FieldDescriptor = FieldDescriptor {
    byte_offset: 16,
    word: WordKind::W32,
    mask: 0xF << 20,
    shift: 20,
};

const CHAN_PER_FRAME: FieldDescriptor = FieldDescriptor {
    byte_offset: 16,
    word: WordKind::W32,
    mask: 0x3FF << 8,
    shift: 8,
};

const BIT_DEPTH: FieldDescriptor = FieldDescriptor {
    byte_offset: 16,
    word: WordKind::W32,
    mask: 0xFF,
    shift: 0,
};

const SP: FieldDescriptor = FieldDescriptor {
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

fn descriptor(f: AafField) -> Option<FieldDescriptor> {
    match f {
        AafField::Stream(s) => Some(stream::descriptor(s)),
        AafField::Format => Some(FORMAT),
        AafField::Nsr => Some(NSR),
        AafField::ChanPerFrame => Some(CHAN_PER_FRAME),
        AafField::BitDepth => Some(BIT_DEPTH),
        AafField::Sp => Some(SP),
        AafField::Evt => Some(EVT),
    }
}

/// Reads a field from an AAF PDU buffer.
pub fn get(buf: &[u8], f: AafField) -> Result<u64> {
    field::get(buf, descriptor(f).unwrap())
}

/// Writes a field into an AAF PDU buffer.
pub fn set(buf: &mut [u8], f: AafField, value: u64) -> Result<()> {
    field::set(buf, descriptor(f).unwrap(), value)
}

/// Zeroes `buf` and initializes the fixed header of an AAF PDU: sets
/// `SUBTYPE` to [`Subtype::Aaf`] and `SV` to 1. Every other field is left
/// at its zeroed default.
pub fn init(buf: &mut [u8]) -> Result<()> {
    buf.iter_mut().for_each(|b| *b = 0);
    common::set(buf, CommonField::Subtype, Subtype::Aaf as u64)?;
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
            Subtype::Aaf as u64
        );
        assert_eq!(get(&buf, AafField::Stream(StreamField::Sv)).unwrap(), 1);
        assert_eq!(get(&buf, AafField::Format).unwrap(), 0);
    }

    #[test]
    fn format_fields_share_one_word_without_interference() {
        let mut buf = [0u8; stream::PAYLOAD_OFFSET];
        set(&mut buf, AafField::Format, 0x02).unwrap();
        set(&mut buf, AafField::Nsr, 0x5).unwrap();
        set(&mut buf, AafField::ChanPerFrame, 0x3FF).unwrap();
        set(&mut buf, AafField::BitDepth, 0x18).unwrap();
        assert_eq!(get(&buf, AafField::Format).unwrap(), 0x02);
        assert_eq!(get(&buf, AafField::Nsr).unwrap(), 0x5);
        assert_eq!(get(&buf, AafField::ChanPerFrame).unwrap(), 0x3FF);
        assert_eq!(get(&buf, AafField::BitDepth).unwrap(), 0x18);
    }
}
