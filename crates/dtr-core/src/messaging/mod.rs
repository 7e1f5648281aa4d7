//! Destination-side messaging port.

pub mod port;

pub use port::{DestinationSink, MediaItem};
