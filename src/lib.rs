//! Byte-exact multipart body encoding and decoding.
//!
//! This crate converts between a structured multipart body and its wire
//! bytes:
//! - [`Body`], [`Part`] and [`Header`] value types with builders
//! - [`MultipartCodec`] encoding and decoding fully materialized buffers
//! - boundary validation and generation
//! - a [`FormData`] view indexing parts by `Content-Disposition` name
//!
//! Preamble and epilogue bytes are preserved, so decoding an encoded body
//! gives back the same body.
//!
//! # Examples
//!
//! ```
//! use multipart_codec::{decode, encode, Body, Part};
//!
//! let body = Body::builder()
//!     .part_with(|p| {
//!         p.body("hello").header("Content-Type", |h| {
//!             h.value("text/plain");
//!         });
//!     })
//!     .build();
//!
//! let bytes = encode("boundary", &body).unwrap();
//! assert_eq!(&bytes[..], b"--boundary\nContent-Type: text/plain\n\nhello\n--boundary--\n");
//! assert_eq!(decode("boundary", &bytes).unwrap(), body);
//! ```

pub mod body;
pub mod boundary;
pub mod config;
pub mod error;
pub mod header;
pub mod matcher;
pub mod multipart;
pub mod part;

use bytes::Bytes;
use once_cell::sync::Lazy;

// Re-export commonly used types
pub use body::{Body, BodyBuilder};
pub use boundary::{content_type, generate_boundary};
pub use config::{CodecConfig, Latin1, TextCodec, Utf8};
pub use error::{Error, Result};
pub use header::{Header, HeaderBuilder};
pub use multipart::{FormData, FormDataBuilder, MultipartCodec, MultipartDecoder, MultipartEncoder};
pub use part::{Part, PartBuilder};

/// Codec with the default configuration.
static DEFAULT_CODEC: Lazy<MultipartCodec> = Lazy::new(MultipartCodec::default);

/// Encodes `body` with the default configuration.
pub fn encode(boundary: &str, body: &Body) -> Result<Bytes> {
    DEFAULT_CODEC.encode(boundary, body)
}

/// Decodes `buf` with the default configuration.
pub fn decode(boundary: &str, buf: &[u8]) -> Result<Body> {
    DEFAULT_CODEC.decode(boundary, buf)
}
