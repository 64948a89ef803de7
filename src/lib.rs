#![doc(html_root_url = "https://docs.rs/avtp-rs/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

//! # avtp-rs
//!
//! `avtp-rs` encodes and decodes Audio Video Transport Protocol (AVTP)
//! Protocol Data Units as defined by IEEE 1722-2016. AVTP carries
//! real-time audio, video, and clock-reference streams over
//! Time-Sensitive Networking Ethernet.
//!
//! This crate never allocates a PDU for you: every accessor operates on
//! a caller-owned byte buffer, reading and writing individual bit-range
//! fields in place while leaving the rest of the buffer untouched.
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! avtp-rs = "0.1.0"
//! ```
//!
//! ### Initializing and reading an AAF PDU
//!
//! ```rust
//! use avtp_rs::aaf::{self, AafField};
//! use avtp_rs::stream::StreamField;
//!
//! let mut buf = [0u8; 24];
//! aaf::init(&mut buf)?;
//! aaf::set(&mut buf, AafField::Stream(StreamField::StreamId), 0xAABBCCDDEEFF0001)?;
//! aaf::set(&mut buf, AafField::BitDepth, 24)?;
//!
//! assert_eq!(aaf::get(&buf, AafField::Stream(StreamField::Sv))?, 1);
//! # Ok::<(), avtp_rs::error::AvtpError>(())
//! ```
//!
//! ## Module Overview
//!
//! - `common`: the first 32-bit word shared by every AVTP subtype.
//! - `stream`: fields shared by every *stream* subtype (everything but CRF).
//! - `aaf`, `crf`, `cvf`, `ieciidc`, `rvf`, `vsf_stream`: one accessor per
//!   subtype, each composing `stream` (except `crf`, which has no
//!   `avtp_time` and a differently-shaped `packet_info`) with its own
//!   format-specific fields.
//! - `daemon`: the CRF media-clock recovery daemon's session protocol and
//!   event loop, driving the `crf-daemon` binary.
//! - `error`: the crate's single error type.

mod field;
mod word;

/// Common AVTP PDU header accessor.
pub mod common;

/// Stream PDU accessor shared by every subtype but CRF.
pub mod stream;

/// AVTP Audio Format accessor.
pub mod aaf;

/// Clock Reference Format accessor.
pub mod crf;

/// Compressed Video Format accessor.
pub mod cvf;

/// IEC 61883/IIDC accessor.
pub mod ieciidc;

/// Raw Video Format accessor.
pub mod rvf;

/// Vendor-Specific Format Stream accessor.
pub mod vsf_stream;

/// Error types and utilities.
pub mod error;

/// Configuration for the `crf-daemon` binary.
pub mod config;

/// CRF daemon session protocol and event loop.
pub mod daemon;

pub use error::{AvtpError, Result};
