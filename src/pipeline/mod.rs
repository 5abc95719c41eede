//! Producer and consumer control loops
//!
//! Each side runs a single sequential loop; cancellation is cooperative,
//! checked once per iteration before the next blocking I/O call.

mod consumer;
mod producer;

pub use consumer::{run_consumer, ConsumerStats};
pub use producer::run_producer;
