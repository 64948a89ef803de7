//! Endian-safe access to the big-endian words that make up an AVTP PDU.
//!
//! Every multi-byte field on the wire is big-endian, but the PDU byte
//! buffers handed in by callers are not guaranteed to place any given
//! word on a naturally aligned boundary (payload sub-headers in
//! particular can land anywhere). These helpers always go through a
//! byte-wise conversion so no alignment assumption is ever made.

/// Reads the first four bytes of `buf` as a big-endian `u32`.
///
/// # Panics
///
/// Panics if `buf` has fewer than 4 bytes. Callers are expected to have
/// already validated buffer length against the field's required width.
pub(crate) fn load_be32(buf: &[u8]) -> u32 {
    u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]])
}

/// Writes `val` into the first four bytes of `buf` in big-endian order.
pub(crate) fn store_be32(buf: &mut [u8], val: u32) {
    buf[0..4].copy_from_slice(&val.to_be_bytes());
}

/// Reads the first eight bytes of `buf` as a big-endian `u64`.
pub(crate) fn load_be64(buf: &[u8]) -> u64 {
    u64::from_be_bytes([
        buf[0], buf[1], buf[2], buf[3], buf[4], buf[5], buf[6], buf[7],
    ])
}

/// Writes `val` into the first eight bytes of `buf` in big-endian order.
pub(crate) fn store_be64(buf: &mut [u8], val: u64) {
    buf[0..8].copy_from_slice(&val.to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_be32() {
        let mut buf = [0u8; 4];
        store_be32(&mut buf, 0x01020304);
        assert_eq!(buf, [0x01, 0x02, 0x03, 0x04]);
        assert_eq!(load_be32(&buf), 0x01020304);
    }

    #[test]
    fn round_trips_be64() {
        let mut buf = [0u8; 8];
        store_be64(&mut buf, 0x0102030405060708);
        assert_eq!(buf, [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]);
        assert_eq!(load_be64(&buf), 0x0102030405060708);
    }

    #[test]
    fn reads_from_an_offset_slice() {
        let buf = [0xAA, 0x01, 0x02, 0x03, 0x04, 0xBB];
        assert_eq!(load_be32(&buf[1..]), 0x01020304);
    }
}
