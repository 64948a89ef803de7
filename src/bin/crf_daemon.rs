//! CRF media-clock recovery daemon.
//!
//! Recovers a media clock from a CRF stream and fans recovered
//! timestamps out to local clients over a Unix domain socket. This is
//! the one binary in the crate that configures a logging backend;
//! `avtp-rs` itself only ever emits through the `log` facade.

use std::io;

use async_trait::async_trait;
use avtp_rs::config;
use avtp_rs::daemon::{self, CrfParams, CrfSource};
use tokio::net::{UdpSocket, UnixListener};

/// CRF reference stream ID used by the upstream example talker/listener
/// pair this daemon interoperates with.
const CRF_STREAM_ID: u64 = 0xAABBCCDDEEFF0002;
/// `AVTP_CRF_TYPE_AUDIO_SAMPLE`.
const CRF_TYPE_AUDIO_SAMPLE: u8 = 0x01;
/// `AVTP_CRF_PULL_MULT_BY_1`.
const CRF_PULL_MULT_BY_1: u8 = 0x00;
/// IEEE 1722-2016 Table 28 recommendation for a 48 kHz audio clock.
const CRF_SAMPLE_RATE: u32 = 48_000;
const CRF_TIMESTAMPS_PER_SEC: u32 = 300;
const TIMESTAMPS_PER_PKT: u16 = 6;

/// Captures CRF traffic from a UDP socket.
///
/// Production AVTP deployments capture off a raw Ethernet socket bound
/// to an interface; that capture mechanism is platform-specific systems
/// plumbing this crate does not prescribe. A UDP transport exercises the
/// same daemon logic end to end for deployments that tunnel or
/// multicast CRF traffic over IP.
struct UdpCrfSource {
    socket: UdpSocket,
}

#[async_trait]
impl CrfSource for UdpCrfSource {
    async fn recv_pdu(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.socket.recv(buf).await
    }
}

#[tokio::main]
async fn main() -> avtp_rs::Result<()> {
    env_logger::init();

    let params = CrfParams {
        stream_id: CRF_STREAM_ID,
        crf_type: CRF_TYPE_AUDIO_SAMPLE,
        pull: CRF_PULL_MULT_BY_1,
        sample_rate: CRF_SAMPLE_RATE,
        crf_data_len: TIMESTAMPS_PER_PKT * 8,
        timestamps_per_sec: CRF_TIMESTAMPS_PER_SEC,
    };

    let socket_path = config::socket_path();
    // Ignore errors: the common case is that no stale socket exists.
    let _ = std::fs::remove_file(socket_path);
    let listener = UnixListener::bind(socket_path)?;
    log::info!("CRF daemon listening on {socket_path}");

    let udp_addr =
        std::env::var("AVTP_CRF_DAEMON_CAPTURE_ADDR").unwrap_or_else(|_| "0.0.0.0:17220".into());
    let socket = UdpSocket::bind(&udp_addr).await?;
    log::info!("CRF daemon capturing on {udp_addr}");
    let source = UdpCrfSource { socket };

    daemon::run(listener, source, params).await
}
