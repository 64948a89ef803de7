//! Media clock recovery from CRF timestamps.
//!
//! IEEE 1722-2016 §10.7: a CRF packet's timestamps increase monotonically
//! from its first entry at a fixed nominal period, so recovering the
//! media clock only ever needs that first timestamp plus the stream's
//! declared sample rate and timestamp interval.

const NSEC_PER_SEC: u64 = 1_000_000_000;

/// Recovers the media clock ticks carried by one CRF packet.
///
/// `first_timestamp` is the packet's first CRF timestamp (`crf_data[0]`).
/// `sample_rate` is the stream's `base_freq` field. `timestamps_per_sec`
/// is the nominal CRF timestamp rate (IEEE 1722-2016 Table 28 recommends
/// 300 for a 48 kHz audio clock). Returns one tick per sample interval
/// covered by a single CRF timestamp, i.e. `sample_rate /
/// timestamps_per_sec` ticks, spaced `1e9 / timestamps_per_sec`
/// nanoseconds apart.
///
/// Returns an empty iterator if `timestamps_per_sec` is zero.
pub fn recover_ticks(
    first_timestamp: u64,
    sample_rate: u32,
    timestamps_per_sec: u32,
) -> impl Iterator<Item = u64> {
    let ticks_per_crf = sample_rate.checked_div(timestamps_per_sec).unwrap_or(0);
    let period_ns = NSEC_PER_SEC.checked_div(timestamps_per_sec as u64).unwrap_or(0);
    (0..ticks_per_crf).map(move |k| first_timestamp + k as u64 * period_ns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_one_tick_per_sample_interval() {
        let ticks: Vec<u64> = recover_ticks(1_000_000, 48_000, 300).collect();
        assert_eq!(ticks.len(), 160);
        assert_eq!(ticks[0], 1_000_000);
        assert_eq!(ticks[1], 1_000_000 + 1_000_000_000 / 300);
    }

    #[test]
    fn zero_timestamps_per_sec_yields_no_ticks() {
        assert_eq!(recover_ticks(0, 48_000, 0).count(), 0);
    }
}
