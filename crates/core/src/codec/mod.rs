//! Response decoding

pub mod decoder;

pub use decoder::{decode, decode_as, decode_response, decode_str};
