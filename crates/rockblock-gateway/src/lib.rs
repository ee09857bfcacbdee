//! rockblock gateway library entry.
//!
//! This crate wires config, the HTTP transport, and the message sink around
//! the pure decoding core. It is consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod router;
pub mod transport;
