//! Framed streaming over a transport
//!
//! The camera daemon sends one JPEG frame per wire message; the viewer
//! reassembles messages from the byte stream in arrival order. See
//! [`crate::wire`] for the framing contract.

mod receiver;
mod sender;

pub use receiver::StreamReceiver;
pub use sender::FrameSender;

/// Read chunk size for the receiver (amortizes syscalls, same as the
/// original receiver's 4KB recv)
pub const READ_CHUNK_SIZE: usize = 4096;
