//! Wire format for the frame stream
//!
//! # TCP Protocol Specification
//!
//! DrishtiIO uses a length-prefixed framing protocol for the frame stream:
//!
//! ```text
//! ┌──────────────────┬──────────────────────────┐
//! │ Length (4 bytes) │ Payload (variable)       │
//! │ Big-endian u32   │ JPEG-encoded frame       │
//! └──────────────────┴──────────────────────────┘
//! ```
//!
//! - **Length field**: 4-byte big-endian unsigned integer
//! - **Payload**: one JPEG-encoded camera frame
//! - **Maximum payload size**: 16MiB (16,777,216 bytes)
//! - **Direction**: camera daemon → viewer only
//!
//! The stream is homogeneous: there is no message-type tag, version field or
//! resynchronization marker. A declared length above the maximum means the
//! byte offset is corrupt and the connection must be closed.

use crate::error::{Error, Result};

/// Length prefix size in bytes
pub const HEADER_LEN: usize = 4;

/// Maximum accepted payload length (16MiB)
///
/// Generous for JPEG frames; anything larger indicates lost framing.
pub const MAX_PAYLOAD_LEN: usize = 16 * 1024 * 1024;

/// Frame a payload into a wire message: length prefix followed by the bytes.
///
/// Refuses payloads the 4-byte length field cannot represent, or that exceed
/// [`MAX_PAYLOAD_LEN`].
pub fn encode_message(payload: &[u8]) -> Result<Vec<u8>> {
    check_payload_len(payload.len())?;
    let mut msg = Vec::with_capacity(HEADER_LEN + payload.len());
    msg.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    msg.extend_from_slice(payload);
    Ok(msg)
}

/// Validate a payload length against the framing limits.
pub fn check_payload_len(len: usize) -> Result<()> {
    if len > MAX_PAYLOAD_LEN || len > u32::MAX as usize {
        return Err(Error::MessageTooLarge {
            declared: len,
            limit: MAX_PAYLOAD_LEN,
        });
    }
    Ok(())
}

/// Decode a length prefix from the first [`HEADER_LEN`] bytes of a buffer.
///
/// Callers must pass at least [`HEADER_LEN`] bytes.
pub fn decode_header(bytes: &[u8]) -> usize {
    let mut len_buf = [0u8; HEADER_LEN];
    len_buf.copy_from_slice(&bytes[..HEADER_LEN]);
    u32::from_be_bytes(len_buf) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_prefixes_payload_length() {
        let msg = encode_message(b"hello").unwrap();
        assert_eq!(&msg[..4], &[0, 0, 0, 5]);
        assert_eq!(&msg[4..], b"hello");
    }

    #[test]
    fn test_encode_empty_payload() {
        let msg = encode_message(&[]).unwrap();
        assert_eq!(msg, vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_header_round_trip() {
        let msg = encode_message(&[0xAB; 300]).unwrap();
        assert_eq!(decode_header(&msg), 300);
    }

    #[test]
    fn test_oversize_payload_rejected() {
        let err = check_payload_len(MAX_PAYLOAD_LEN + 1).unwrap_err();
        assert!(matches!(err, Error::MessageTooLarge { .. }));
    }
}
