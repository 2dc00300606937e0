//! Convenient re-exports for common usage.
//!
//! # Example
//!
//! ```
//! use base32_codec::prelude::*;
//!
//! let mut engine = Engine::new();
//! assert_eq!(engine.encode(b"foobar").unwrap(), encode(b"foobar"));
//! ```

pub use crate::{
    DecodeError,
    EncodeError,
    // Linear-memory edition
    Engine,

    // Table-driven edition
    decode,
    decode_string,
    encode,
    encode_str,
};
