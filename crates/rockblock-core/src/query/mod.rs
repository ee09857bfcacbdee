//! Urlencoded query decoding.
//!
//! Turns a raw `key=value&...` payload into a `StructuredValue` tree without
//! any knowledge of the message schema:
//! - keys and values are percent-decoded first (`+` is a space);
//! - keys may address nested objects (`a.b`, `a[b]`) and arrays (`a[0]`, `a[]`);
//! - every leaf stays a string, coercion belongs to the mapper.
//!
//! The decoder is panic-free and rejects malformed escapes instead of passing
//! them through.

mod decode;
mod percent;
mod value;

pub use decode::{decode, decode_with, DecodeLimits};
pub use value::StructuredValue;
