//! TCP transport for the frame stream
//!
//! The camera daemon binds a listener and accepts exactly one viewer; the
//! viewer connects to the daemon's configured endpoint. Neither side retries
//! or reconnects: a lost connection is terminal for the run.

use super::Transport;
use crate::error::Result;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};

/// TCP transport wrapping a connected stream
pub struct TcpTransport {
    stream: TcpStream,
    closed: bool,
}

impl TcpTransport {
    /// Connect to a remote endpoint (viewer side)
    pub fn connect(addr: &str) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        log::info!("Connected to {}", addr);
        Ok(Self {
            stream,
            closed: false,
        })
    }

    /// Wrap an already-accepted stream (daemon side)
    pub fn from_stream(stream: TcpStream) -> Self {
        Self {
            stream,
            closed: false,
        }
    }

    /// Peer address of the connection
    pub fn peer_addr(&self) -> Result<std::net::SocketAddr> {
        Ok(self.stream.peer_addr()?)
    }
}

impl Transport for TcpTransport {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        Ok(self.stream.read(buffer)?)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        Ok(self.stream.write(data)?)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(self.stream.flush()?)
    }

    fn shutdown(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.stream.shutdown(Shutdown::Both)?;
        Ok(())
    }
}

impl Drop for TcpTransport {
    fn drop(&mut self) {
        // Teardown must never mask an in-flight error
        if let Err(e) = self.shutdown() {
            log::debug!("Socket shutdown during drop: {}", e);
        }
    }
}

/// Listening endpoint for the camera daemon
///
/// The protocol supports a single concurrent viewer, so this accepts exactly
/// one connection per call and hands back a connected transport.
pub struct TcpListenerEndpoint {
    listener: TcpListener,
}

impl TcpListenerEndpoint {
    /// Bind to the configured local address
    pub fn bind(addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(addr)?;
        log::info!("Listening on {}", addr);
        Ok(Self { listener })
    }

    /// Block until one peer connects
    pub fn accept_one(&self) -> Result<TcpTransport> {
        let (stream, addr) = self.listener.accept()?;
        log::info!("Viewer connected: {}", addr);
        Ok(TcpTransport::from_stream(stream))
    }

    /// Local address the listener is bound to
    pub fn local_addr(&self) -> Result<std::net::SocketAddr> {
        Ok(self.listener.local_addr()?)
    }
}
