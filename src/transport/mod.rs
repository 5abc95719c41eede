//! Transport layer for I/O abstraction

use crate::error::Result;

mod mock;
mod tcp;
pub use mock::MockTransport;
pub use tcp::{TcpListenerEndpoint, TcpTransport};

/// Transport trait for the frame stream connection
///
/// Implementations are blocking: `read` blocks until at least one byte is
/// available or the peer closes, `write` blocks until the transport accepts
/// at least one byte or fails.
pub trait Transport: Send {
    /// Read data into buffer, returns number of bytes read (0 = end of stream)
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize>;

    /// Write data from buffer, returns number of bytes written
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Flush any pending writes (blocking until complete)
    fn flush(&mut self) -> Result<()>;

    /// Close the connection.
    ///
    /// Idempotent; errors during close are the caller's to log, they never
    /// indicate a usable connection.
    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }

    /// Write an entire buffer, looping over partial writes.
    fn write_all(&mut self, mut data: &[u8]) -> Result<()> {
        while !data.is_empty() {
            let n = self.write(data)?;
            if n == 0 {
                return Err(crate::error::Error::ConnectionClosed);
            }
            data = &data[n..];
        }
        Ok(())
    }
}
