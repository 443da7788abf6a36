//! Image decoding.

mod decoder;

pub use decoder::{DecodeError, decode_payload, decode_payload_async};
