//! Post-mapping message handling.
//!
//! The webhook handler hands each mapped `Message` to a `MessageSink`. The
//! built-in `TracingSink` only logs; storage or forwarding would plug in here.

pub mod sink;

pub use sink::{MessageSink, TracingSink};
