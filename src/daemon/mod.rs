//! CRF daemon: a single-threaded cooperative event loop that consumes a
//! CRF stream, recovers its media clock, and fans recovered timestamps
//! out to local clients over a Unix domain socket.
//!
//! Everything here runs on one task, so client state lives in a plain
//! `Vec<ClientSlot>` with no `Arc`/`Mutex` — there is never more than one
//! borrower.

pub mod clock;
pub mod protocol;

use std::io;

use async_trait::async_trait;
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};

use crate::common::{self, CommonField, Subtype};
use crate::crf::{self, CrfField};
use crate::error::{AvtpError, Result};
use crate::word;
use protocol::{EventType, Request, Response};

/// Source of raw CRF PDU bytes the daemon recovers a media clock from.
///
/// Capturing AVTP traffic off a network interface is platform-specific
/// plumbing outside this crate's scope; implement this trait over
/// whatever capture mechanism (`AF_PACKET` socket, pcap, a test fixture)
/// the deployment provides.
#[async_trait]
pub trait CrfSource: Send {
    /// Reads one datagram into `buf`, returning the number of bytes
    /// written. A return value that does not match the expected CRF PDU
    /// size is treated as a non-AVTP frame and silently dropped, matching
    /// the reference capture socket's `ETH_P_ALL` promiscuity.
    async fn recv_pdu(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

/// Constants a CRF stream must match before its timestamps are trusted
/// and distributed to clients, and the parameters media clock recovery
/// needs. Mirrors the validation a production CRF listener applies
/// before accepting a talker's stream.
#[derive(Debug, Clone, Copy)]
pub struct CrfParams {
    /// Expected `stream_id`.
    pub stream_id: u64,
    /// Expected `type` (e.g. `AVTP_CRF_TYPE_AUDIO_SAMPLE` = 1).
    pub crf_type: u8,
    /// Expected `pull` multiplier (e.g. `AVTP_CRF_PULL_MULT_BY_1` = 0).
    pub pull: u8,
    /// Expected `base_freq`, in Hz.
    pub sample_rate: u32,
    /// Expected `crf_data_len`, in bytes.
    pub crf_data_len: u16,
    /// Nominal CRF timestamps per second, used for media clock recovery.
    pub timestamps_per_sec: u32,
}

impl CrfParams {
    /// Size in bytes of the fixed CRF header plus its timestamp array,
    /// the only PDU size [`CrfSource::recv_pdu`] is expected to deliver.
    pub fn pdu_len(&self) -> usize {
        crf::TIMESTAMP_OFFSET + self.crf_data_len as usize
    }
}

struct ClientSlot {
    stream: UnixStream,
    registered: bool,
    event_type: EventType,
    /// Populated verbatim from the client's `events_per_sec` request.
    ///
    /// TODO: convert this into an events-per-CRF-packet count once a CRF
    /// packet's actual timestamp rate is known; right now it is recorded
    /// but never consulted, so every registered client receives every
    /// recovered tick regardless of the rate it asked for.
    #[allow(dead_code)]
    events_per_crf: u32,
}

fn validate_crf_pdu(buf: &[u8], params: &CrfParams, expected_seq: &mut u8) -> bool {
    let Ok(subtype) = common::get(buf, CommonField::Subtype) else {
        return false;
    };
    if subtype != Subtype::Crf as u64 {
        return false;
    }
    if common::get(buf, CommonField::Version).unwrap_or(u64::MAX) != 0 {
        log::warn!("CRF: unexpected version");
        return false;
    }
    if crf::get(buf, CrfField::Sv).unwrap_or(0) != 1 {
        log::warn!("CRF: sv mismatch");
        return false;
    }
    if crf::get(buf, CrfField::Fs).unwrap_or(1) != 0 {
        log::warn!("CRF: fs mismatch");
        return false;
    }

    let seq = crf::get(buf, CrfField::SeqNum).unwrap_or(0) as u8;
    if seq != *expected_seq {
        // A valid packet after all, so we log and keep processing rather
        // than invalidate it.
        log::warn!(
            "CRF: sequence number mismatch: expected {}, got {}",
            expected_seq,
            seq
        );
        *expected_seq = seq;
    }
    *expected_seq = expected_seq.wrapping_add(1);

    if crf::get(buf, CrfField::Type).unwrap_or(u64::MAX) != params.crf_type as u64 {
        log::warn!("CRF: type mismatch");
        return false;
    }
    if crf::get(buf, CrfField::StreamId).unwrap_or(u64::MAX) != params.stream_id {
        log::warn!("CRF: stream ID mismatch");
        return false;
    }
    if crf::get(buf, CrfField::Pull).unwrap_or(u64::MAX) != params.pull as u64 {
        log::warn!("CRF: pull mismatch");
        return false;
    }
    if crf::get(buf, CrfField::BaseFreq).unwrap_or(u64::MAX) != params.sample_rate as u64 {
        log::warn!("CRF: base frequency mismatch");
        return false;
    }
    if crf::get(buf, CrfField::CrfDataLen).unwrap_or(u64::MAX) != params.crf_data_len as u64 {
        log::warn!("CRF: data length mismatch");
        return false;
    }

    true
}

async fn fan_out(buf: &[u8], params: &CrfParams, clients: &mut Vec<ClientSlot>) {
    let first_ts = word::load_be64(&buf[crf::TIMESTAMP_OFFSET..]);
    let ticks: Vec<u64> =
        clock::recover_ticks(first_ts, params.sample_rate, params.timestamps_per_sec).collect();

    let mut dead = Vec::new();
    for (i, client) in clients.iter_mut().enumerate() {
        if !client.registered {
            continue;
        }
        let events: &[u64] = match client.event_type {
            EventType::ResentTime => &ticks,
            EventType::PktRecv => std::slice::from_ref(&first_ts),
        };
        for &timestamp in events {
            let bytes = Response::Event { timestamp }.encode();
            if client.stream.write_all(&bytes).await.is_err() {
                dead.push(i);
                break;
            }
        }
    }
    for i in dead.into_iter().rev() {
        clients.swap_remove(i);
    }
}

async fn service_client(client: &mut ClientSlot) -> Result<()> {
    let mut buf = [0u8; protocol::REGISTER_LEN];
    match client.stream.read_exact(&mut buf).await {
        Ok(_) => {
            let Request::Register {
                events_per_sec,
                event_type,
            } = Request::decode(&buf)?;
            client.events_per_crf = events_per_sec;
            client.event_type = event_type;
            client.registered = true;
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(AvtpError::PeerClosed),
        Err(e) => Err(e.into()),
    }
}

async fn wait_for_readable(clients: &[ClientSlot]) -> usize {
    if clients.is_empty() {
        std::future::pending::<()>().await;
        unreachable!("pending future never resolves");
    }
    let waits: Vec<_> = clients.iter().map(|c| Box::pin(c.stream.readable())).collect();
    let (_, idx, _) = futures::future::select_all(waits).await;
    idx
}

/// Runs the event loop until the listening socket or the CRF source
/// returns a fatal error. Per-client errors close only that client's
/// slot and do not stop the loop.
pub async fn run(
    listener: UnixListener,
    mut source: impl CrfSource,
    params: CrfParams,
) -> Result<()> {
    let mut clients: Vec<ClientSlot> = Vec::new();
    let mut expected_seq: u8 = 0;
    let mut pdu_buf = BytesMut::zeroed(params.pdu_len());

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, _addr) = accepted?;
                log::info!("CRF daemon: client connected");
                clients.push(ClientSlot {
                    stream,
                    registered: false,
                    event_type: EventType::PktRecv,
                    events_per_crf: 0,
                });
            }
            received = source.recv_pdu(&mut pdu_buf) => {
                let n = received?;
                // The capture source delivers every frame on the
                // interface, AVTP or not; anything the wrong size for a
                // CRF PDU is simply not one of ours.
                if n == pdu_buf.len() && validate_crf_pdu(&pdu_buf, &params, &mut expected_seq) {
                    fan_out(&pdu_buf, &params, &mut clients).await;
                }
            }
            idx = wait_for_readable(&clients) => {
                if service_client(&mut clients[idx]).await.is_err() {
                    log::info!("CRF daemon: client {idx} disconnected");
                    clients.swap_remove(idx);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_mismatch_resynchronizes_without_invalidating() {
        let mut buf = vec![0u8; crf::TIMESTAMP_OFFSET + 8];
        crf::init(&mut buf).unwrap();
        crf::set(&mut buf, CrfField::Type, 1).unwrap();
        crf::set(&mut buf, CrfField::StreamId, 0xAABBCCDDEEFF0002).unwrap();
        crf::set(&mut buf, CrfField::BaseFreq, 48_000).unwrap();
        crf::set(&mut buf, CrfField::CrfDataLen, 8).unwrap();
        crf::set(&mut buf, CrfField::SeqNum, 5).unwrap();

        let params = CrfParams {
            stream_id: 0xAABBCCDDEEFF0002,
            crf_type: 1,
            pull: 0,
            sample_rate: 48_000,
            crf_data_len: 8,
            timestamps_per_sec: 300,
        };

        let mut expected_seq = 0u8;
        assert!(validate_crf_pdu(&buf, &params, &mut expected_seq));
        assert_eq!(expected_seq, 6);
    }

    #[test]
    fn rejects_the_wrong_subtype() {
        let buf = vec![0u8; crf::TIMESTAMP_OFFSET + 8];
        let params = CrfParams {
            stream_id: 0,
            crf_type: 0,
            pull: 0,
            sample_rate: 48_000,
            crf_data_len: 8,
            timestamps_per_sec: 300,
        };
        let mut expected_seq = 0u8;
        assert!(!validate_crf_pdu(&buf, &params, &mut expected_seq));
    }
}
