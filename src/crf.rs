//! Clock Reference Format (CRF) accessor.
//!
//! CRF carries a media clock rather than stream payload, so its fixed
//! header does not compose over [`crate::stream`]: the first word has its
//! own `FS` field in place of the generic stream fields' `STREAM_DATA_LEN`,
//! and the second word (`packet_info`) is laid out entirely differently
//! from a stream PDU's `format_specific`/`packet_info` pair.
//!
//! Fixed header layout: `subtype_data` at offset 0 (4 bytes), `stream_id`
//! at offset 4 (8 bytes), `packet_info` at offset 12 (8 bytes) — 20 bytes
//! total, followed by the CRF timestamp array.

use crate::common::{self, CommonField, Subtype};
use crate::error::Result;
use crate::field::{self, FieldDescriptor, WordKind};

/// Byte offset of the first CRF timestamp following the fixed header.
pub const TIMESTAMP_OFFSET: usize = 20;

/// Fields of a CRF PDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrfField {
    /// Stream-valid flag.
    Sv,
    /// Media clock restart flag.
    Mr,
    /// Frame sync flag.
    Fs,
    /// Timestamp-uncertain flag.
    Tu,
    /// 8-bit sequence number.
    SeqNum,
    /// Type of clock reference carried (audio sample, video frame, ...).
    Type,
    /// 64-bit stream identifier.
    StreamId,
    /// Pull-up/pull-down multiplier applied to the base frequency.
    Pull,
    /// Nominal clock base frequency in Hz.
    BaseFreq,
    /// Length in bytes of the CRF timestamp data following the header.
    CrfDataLen,
    /// Number of CRF timestamps per second.
    TimestampInterval,
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

const FS: FieldDescriptor = FieldDescriptor {
    byte_offset: 0,
    word: WordKind::W32,
    mask: 1 << 17,
    shift: 17,
};

const TU: FieldDescriptor = FieldDescriptor {
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

const TYPE: FieldDescriptor = FieldDescriptor {
    byte_offset: 0,
    word: WordKind::W32,
    mask: 0xFF,
    shift: 0,
};

const STREAM_ID: FieldDescriptor = FieldDescriptor {
    byte_offset: 4,
    word: WordKind::W64,
    mask: u64::MAX,
    shift: 0,
};

const PULL: FieldDescriptor = FieldDescriptor {
    byte_offset: 12,
    word: WordKind::W64,
    mask: 0x7 << 61,
    shift: 61,
};

const BASE_FREQ: FieldDescriptor = FieldDescriptor {
    byte_offset: 12,
    word: WordKind::W64,
    mask: 0x1FFF_FFFF << 32,
    shift: 32,
};

const CRF_DATA_LEN: FieldDescriptor = FieldDescriptor {
    byte_offset: 12,
    word: WordKind::W64,
    mask: 0xFFFF << 16,
    shift: 16,
};

const TIMESTAMP_INTERVAL: FieldDescriptor = FieldDescriptor {
    byte_offset: 12,
    word: WordKind::W64,
    mask: 0xFFFF,
    shift: 0,
};

fn descriptor(f: CrfField) -> FieldDescriptor {
    match f {
        CrfField::Sv => SV,
        CrfField::Mr => MR,
        CrfField::Fs => FS,
        CrfField::Tu => TU,
        CrfField::SeqNum => SEQ_NUM,
        CrfField::Type => TYPE,
        CrfField::StreamId => STREAM_ID,
        CrfField::Pull => PULL,
        CrfField::BaseFreq => BASE_FREQ,
        CrfField::CrfDataLen => CRF_DATA_LEN,
        CrfField::TimestampInterval => TIMESTAMP_INTERVAL,
    }
}

/// Reads a field from a CRF PDU buffer.
pub fn get(buf: &[u8], f: CrfField) -> Result<u64> {
    field::get(buf, descriptor(f))
}

/// Writes a field into a CRF PDU buffer.
pub fn set(buf: &mut [u8], f: CrfField, value: u64) -> Result<()> {
    field::set(buf, descriptor(f), value)
}

/// Zeroes `buf` and initializes the fixed header of a CRF PDU: sets
/// `SUBTYPE` to [`Subtype::Crf`] and `SV` to 1. `TYPE` has no default and
/// is left at 0 (`AVTP_CRF_TYPE_USER`).
pub fn init(buf: &mut [u8]) -> Result<()> {
    buf.iter_mut().for_each(|b| *b = 0);
    common::set(buf, CommonField::Subtype, Subtype::Crf as u64)?;
    set(buf, CrfField::Sv, 1)?;
    Ok(())
}

/// Derives the nominal tick period, in nanoseconds, of the media clock
/// this CRF stream carries: `1_000_000_000 / base_freq * pull`.
///
/// `pull` is the raw 3-bit multiplier value; callers resolve it against
/// the `AVTP_CRF_PULL_*` table themselves, since that mapping is a ratio
/// (e.g. 1/1.001) that does not reduce cleanly to an integer multiplier.
pub fn nominal_period_ns(base_freq: u64) -> Option<u64> {
    1_000_000_000u64.checked_div(base_freq)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_sets_subtype_and_sv_but_not_type() {
        let mut buf = [0xFFu8; TIMESTAMP_OFFSET];
        init(&mut buf).unwrap();
        assert_eq!(
            common::get(&buf, CommonField::Subtype).unwrap(),
            Subtype::Crf as u64
        );
        assert_eq!(get(&buf, CrfField::Sv).unwrap(), 1);
        assert_eq!(get(&buf, CrfField::Type).unwrap(), 0);
    }

    #[test]
    fn packet_info_fields_partition_the_64_bit_word_exactly() {
        let mut buf = [0u8; TIMESTAMP_OFFSET];
        set(&mut buf, CrfField::Pull, 0x7).unwrap();
        set(&mut buf, CrfField::BaseFreq, 0x1FFF_FFFF).unwrap();
        set(&mut buf, CrfField::CrfDataLen, 0xFFFF).unwrap();
        set(&mut buf, CrfField::TimestampInterval, 0xFFFF).unwrap();
        assert_eq!(buf[12..20], [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(get(&buf, CrfField::Pull).unwrap(), 0x7);
        assert_eq!(get(&buf, CrfField::BaseFreq).unwrap(), 0x1FFF_FFFF);
        assert_eq!(get(&buf, CrfField::CrfDataLen).unwrap(), 0xFFFF);
        assert_eq!(get(&buf, CrfField::TimestampInterval).unwrap(), 0xFFFF);
    }

    #[test]
    fn nominal_period_for_48khz_is_about_20833_ns() {
        assert_eq!(nominal_period_ns(48_000), Some(20_833));
    }
}
