//! Wire records exchanged between the CRF daemon and its clients over a
//! Unix domain socket.
//!
//! Every record is `{tag: u32, body}`, fixed size per tag, so a reader
//! always knows from the four-byte tag how many more bytes to read
//! before the record is complete. Unlike every other wire format in this
//! crate, these integers are host-endian rather than big-endian: the
//! socket is local-domain and never crosses a machine boundary, so there
//! is nothing to convert.

use crate::error::{AvtpError, Result};

const REQ_TAG_REGISTER: u32 = 0;
const RESP_TAG_ERR: u32 = 0;
const RESP_TAG_EVENT: u32 = 1;

/// Size in bytes of an encoded [`Request::Register`] record.
pub const REGISTER_LEN: usize = 4 + 4 + 4;
/// Size in bytes of an encoded [`Response::Err`] record.
pub const ERR_LEN: usize = 4 + 4;
/// Size in bytes of an encoded [`Response::Event`] record.
pub const EVENT_LEN: usize = 4 + 8;

/// Which clock source a registered client wants events derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum EventType {
    /// One event per CRF packet received.
    PktRecv = 0,
    /// One event per recovered media clock timestamp.
    ResentTime = 1,
}

impl EventType {
    fn from_u32(v: u32) -> Result<Self> {
        match v {
            0 => Ok(EventType::PktRecv),
            1 => Ok(EventType::ResentTime),
            _ => Err(AvtpError::InvalidArgument(format!(
                "unrecognized event type {v}"
            ))),
        }
    }
}

/// A request sent by a client to the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Registers the sending connection to receive media clock events.
    Register {
        /// Requested event rate; see the daemon's open item on how this
        /// is reconciled against a CRF packet's actual timestamp rate.
        events_per_sec: u32,
        /// Event source the client wants ticks derived from.
        event_type: EventType,
    },
}

impl Request {
    /// Encodes this request into its fixed-size wire form.
    pub fn encode(&self) -> [u8; REGISTER_LEN] {
        let Request::Register {
            events_per_sec,
            event_type,
        } = self;
        let mut buf = [0u8; REGISTER_LEN];
        buf[0..4].copy_from_slice(&REQ_TAG_REGISTER.to_ne_bytes());
        buf[4..8].copy_from_slice(&events_per_sec.to_ne_bytes());
        buf[8..12].copy_from_slice(&(*event_type as u32).to_ne_bytes());
        buf
    }

    /// Decodes a request from exactly [`REGISTER_LEN`] bytes.
    pub fn decode(buf: &[u8; REGISTER_LEN]) -> Result<Self> {
        let tag = u32::from_ne_bytes([buf[0], buf[1], buf[2], buf[3]]);
        if tag != REQ_TAG_REGISTER {
            return Err(AvtpError::InvalidArgument(format!(
                "unrecognized request tag {tag}"
            )));
        }
        let events_per_sec = u32::from_ne_bytes([buf[4], buf[5], buf[6], buf[7]]);
        let event_type = EventType::from_u32(u32::from_ne_bytes([
            buf[8], buf[9], buf[10], buf[11],
        ]))?;
        Ok(Request::Register {
            events_per_sec,
            event_type,
        })
    }
}

/// A response sent by the daemon to a registered client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// A recovered media clock timestamp, in nanoseconds.
    Event {
        /// The timestamp value.
        timestamp: u64,
    },
    /// The daemon could not service the request.
    Err {
        /// A daemon-defined error code, not necessarily an `errno`.
        code: i32,
    },
}

impl Response {
    /// Encodes this response into its tagged wire form. The returned
    /// vector is always either [`EVENT_LEN`] or [`ERR_LEN`] bytes.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Response::Event { timestamp } => {
                let mut buf = vec![0u8; EVENT_LEN];
                buf[0..4].copy_from_slice(&RESP_TAG_EVENT.to_ne_bytes());
                buf[4..12].copy_from_slice(&timestamp.to_ne_bytes());
                buf
            }
            Response::Err { code } => {
                let mut buf = vec![0u8; ERR_LEN];
                buf[0..4].copy_from_slice(&RESP_TAG_ERR.to_ne_bytes());
                buf[4..8].copy_from_slice(&code.to_ne_bytes());
                buf
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_round_trips() {
        let req = Request::Register {
            events_per_sec: 300,
            event_type: EventType::ResentTime,
        };
        let encoded = req.encode();
        assert_eq!(Request::decode(&encoded).unwrap(), req);
    }

    #[test]
    fn event_encodes_to_the_fixed_length() {
        let resp = Response::Event {
            timestamp: 0x1122_3344_5566_7788,
        };
        let encoded = resp.encode();
        assert_eq!(encoded.len(), EVENT_LEN);
        assert_eq!(&encoded[4..12], &0x1122_3344_5566_7788u64.to_ne_bytes());
    }

    #[test]
    fn err_encodes_to_the_fixed_length() {
        let resp = Response::Err { code: -32 };
        let encoded = resp.encode();
        assert_eq!(encoded.len(), ERR_LEN);
        assert_eq!(&encoded[4..8], &(-32i32).to_ne_bytes());
    }

    #[test]
    fn decode_rejects_an_unrecognized_tag() {
        let mut buf = [0u8; REGISTER_LEN];
        buf[0..4].copy_from_slice(&99u32.to_ne_bytes());
        assert!(matches!(
            Request::decode(&buf),
            Err(AvtpError::InvalidArgument(_))
        ));
    }
}
