//! Transport layer (HTTP).
//!
//! Exposes the webhook handler and the error -> response mapping.

pub mod error;
pub mod webhook;
