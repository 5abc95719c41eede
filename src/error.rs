//! Error types for DrishtiIO

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// DrishtiIO error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Peer closed the connection while a message was still expected
    #[error("Connection closed by peer")]
    ConnectionClosed,

    /// Declared message length exceeds what the framing layer accepts
    #[error("Message too large: {declared} bytes (limit {limit})")]
    MessageTooLarge {
        /// Length declared by the sender (or requested by the encoder)
        declared: usize,
        /// Maximum accepted payload length
        limit: usize,
    },

    /// Image encode/decode failure
    #[error("Codec error: {0}")]
    Codec(String),

    /// Camera capture failure
    #[error("Camera error: {0}")]
    Camera(String),

    /// GPIO pin operation failure
    #[error("GPIO error on pin {pin}: {message}")]
    Gpio {
        /// BCM pin number
        pin: u8,
        /// Backend-reported failure
        message: String,
    },

    /// Configuration file could not be parsed
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl Error {
    /// True when the error indicates the peer went away (reset, broken pipe,
    /// or an orderly close detected mid-message).
    pub fn is_disconnect(&self) -> bool {
        match self {
            Error::ConnectionClosed => true,
            Error::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::UnexpectedEof
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::BrokenPipe
            ),
            _ => false,
        }
    }
}
