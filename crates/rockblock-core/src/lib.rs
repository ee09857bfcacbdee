//! rockblock core: urlencoded payload decoding and message mapping.
//!
//! This crate turns a RockBLOCK webhook body into a typed `Message` in two
//! pure stages (`query::decode_with` then `message::map_message`). It carries
//! no transport or runtime dependencies so the HTTP gateway and tests can
//! drive it directly.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `DecodeError`/`MappingError` so a
//! hostile payload cannot take the process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod message;
pub mod query;

/// Shared result type.
pub use error::{Result, WebhookError};
pub use message::{map_message, Message};
pub use query::{decode, decode_with, DecodeLimits, StructuredValue};
