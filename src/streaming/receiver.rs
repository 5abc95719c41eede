//! Buffered reassembly of framed messages from the byte stream
//!
//! The receiver accumulates transport reads into a buffer with a consumption
//! cursor and yields complete payloads in arrival order. One bulk read may
//! carry several messages, or a fraction of one; neither case forces an
//! extra network read.
//!
//! # State machine
//!
//! ```text
//! AwaitingHeader --(>=4 bytes buffered)--> AwaitingPayload
//! AwaitingPayload --(>=4+L bytes buffered)--> FrameReady
//! FrameReady --(payload extracted, cursor advanced)--> AwaitingHeader
//! any state --(end of stream)--> StreamClosed (clean, terminal)
//! ```

use super::READ_CHUNK_SIZE;
use crate::codec;
use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::transport::Transport;
use crate::wire::{self, HEADER_LEN, MAX_PAYLOAD_LEN};

/// Growable byte accumulator with a consumption cursor.
///
/// Bytes before the cursor are logically removed and never re-read; bytes at
/// or after it may hold zero, one or many complete messages plus a trailing
/// partial one.
struct ReceiveBuffer {
    data: Vec<u8>,
    cursor: usize,
}

/// Compact once the dead prefix crosses this threshold, so the buffer does
/// not grow without bound on a long-lived connection.
const COMPACT_THRESHOLD: usize = 64 * 1024;

impl ReceiveBuffer {
    fn new() -> Self {
        Self {
            data: Vec::with_capacity(READ_CHUNK_SIZE),
            cursor: 0,
        }
    }

    fn unconsumed(&self) -> &[u8] {
        &self.data[self.cursor..]
    }

    fn unconsumed_len(&self) -> usize {
        self.data.len() - self.cursor
    }

    fn extend(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    fn consume(&mut self, n: usize) {
        debug_assert!(n <= self.unconsumed_len());
        self.cursor += n;
        if self.cursor >= COMPACT_THRESHOLD {
            self.data.drain(..self.cursor);
            self.cursor = 0;
        }
    }
}

/// Reassembles length-prefixed messages from a transport.
pub struct StreamReceiver<T: Transport> {
    transport: T,
    buffer: ReceiveBuffer,
    chunk: [u8; READ_CHUNK_SIZE],
    received: u64,
    dropped: u64,
}

impl<T: Transport> StreamReceiver<T> {
    /// Create a receiver over a connected transport
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            buffer: ReceiveBuffer::new(),
            chunk: [0u8; READ_CHUNK_SIZE],
            received: 0,
            dropped: 0,
        }
    }

    /// Yield the next complete payload, in arrival order.
    ///
    /// Returns `Ok(None)` on end of stream. An orderly close is not an
    /// error even when it lands mid-message; the truncated tail is logged
    /// and discarded.
    pub fn next_payload(&mut self) -> Result<Option<Vec<u8>>> {
        // AwaitingHeader: buffered bytes may already hold the header from a
        // prior bulk read, so check before touching the network.
        while self.buffer.unconsumed_len() < HEADER_LEN {
            if self.fill()? == 0 {
                return self.stream_closed("header");
            }
        }

        let declared = wire::decode_header(self.buffer.unconsumed());
        if declared > MAX_PAYLOAD_LEN {
            // Framing is unrecoverable once the offset is wrong
            return Err(Error::MessageTooLarge {
                declared,
                limit: MAX_PAYLOAD_LEN,
            });
        }

        // AwaitingPayload
        while self.buffer.unconsumed_len() < HEADER_LEN + declared {
            if self.fill()? == 0 {
                return self.stream_closed("payload");
            }
        }

        // FrameReady: extract and advance the cursor past the whole message
        let payload = self.buffer.unconsumed()[HEADER_LEN..HEADER_LEN + declared].to_vec();
        self.buffer.consume(HEADER_LEN + declared);
        self.received += 1;
        log::trace!("Received message {} ({} bytes)", self.received, declared);
        Ok(Some(payload))
    }

    /// Yield the next decodable frame.
    ///
    /// A payload the codec rejects is dropped with a diagnostic and the
    /// stream continues with the next message.
    pub fn next_frame(&mut self) -> Result<Option<Frame>> {
        loop {
            let payload = match self.next_payload()? {
                Some(p) => p,
                None => return Ok(None),
            };
            match codec::decode_jpeg(&payload) {
                Ok(frame) => return Ok(Some(frame)),
                Err(e) => {
                    self.dropped += 1;
                    log::warn!(
                        "Dropping undecodable frame ({} bytes, {} dropped total): {}",
                        payload.len(),
                        self.dropped,
                        e
                    );
                }
            }
        }
    }

    /// Messages successfully reassembled so far
    pub fn received_count(&self) -> u64 {
        self.received
    }

    /// Payloads dropped because the codec rejected them
    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }

    /// Close the underlying connection (idempotent)
    pub fn shutdown(&mut self) -> Result<()> {
        self.transport.shutdown()
    }

    fn fill(&mut self) -> Result<usize> {
        let n = self.transport.read(&mut self.chunk)?;
        if n > 0 {
            self.buffer.extend(&self.chunk[..n]);
        }
        Ok(n)
    }

    fn stream_closed(&self, awaiting: &str) -> Result<Option<Vec<u8>>> {
        let pending = self.buffer.unconsumed_len();
        if pending > 0 {
            log::warn!(
                "Stream closed with {} byte(s) of a partial {} pending",
                pending,
                awaiting
            );
        } else {
            log::info!("Stream closed cleanly after {} message(s)", self.received);
        }
        Ok(None)
    }
}
