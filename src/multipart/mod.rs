//! Multipart body encoding and decoding.
//!
//! Wire format, with `nl` the configured line terminator and `B` the boundary:
//!
//! ```text
//! [preamble nl]
//! --B nl
//! [Name: value[; attr=val]* nl]*
//! nl
//! part body nl
//! ...one more "--B" block per further part...
//! --B-- nl
//! [epilogue]
//! ```

pub mod decoder;
pub mod encoder;
pub mod formdata;

pub use formdata::{FormData, FormDataBuilder};

use crate::body::Body;
use crate::boundary;
use crate::config::CodecConfig;
use crate::error::Result;
use crate::header::HEADER_NAME_SEPARATOR;
use bytes::Bytes;

/// Converts a structured [`Body`] into its wire bytes.
pub trait MultipartEncoder {
    /// Encodes `body` using `boundary` as the delimiter.
    ///
    /// A body without parts encodes to an empty buffer, whatever its
    /// preamble or epilogue.
    fn encode(&self, boundary: &str, body: &Body) -> Result<Bytes>;
}

/// Converts wire bytes into a structured [`Body`].
pub trait MultipartDecoder {
    /// Decodes `buf` using `boundary` as the delimiter.
    ///
    /// An empty buffer decodes to an empty body without validating the
    /// boundary. A buffer without a trailer also decodes to an empty body.
    fn decode(&self, boundary: &str, buf: &[u8]) -> Result<Body>;
}

/// Encoder and decoder sharing one [`CodecConfig`].
///
/// Holds no mutable state, so one codec can serve any number of threads.
///
/// # Examples
///
/// ```
/// use multipart_codec::{Body, MultipartCodec, MultipartDecoder, MultipartEncoder, Part};
///
/// let codec = MultipartCodec::default();
/// let body = Body::builder().part(Part::new("Test")).build();
///
/// let bytes = codec.encode("B", &body).unwrap();
/// assert_eq!(&bytes[..], b"--B\n\nTest\n--B--\n");
/// assert_eq!(codec.decode("B", &bytes).unwrap(), body);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MultipartCodec {
    config: CodecConfig,
}

impl MultipartCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Validates the boundary and encodes every delimiter literal.
    fn delimiters(&self, boundary: &str) -> Result<Delimiters> {
        let text = self.config.text_codec_ref();
        let nl = self.config.line_terminator_bytes()?;

        if self.config.is_boundary_validated() {
            boundary::validate(boundary, self.config.line_terminator_str())?;
        }

        Ok(Delimiters {
            dashes: text.encode("--")?.into_owned(),
            separator: text.encode(HEADER_NAME_SEPARATOR)?.into_owned(),
            boundary: text.encode(boundary)?.into_owned(),
            nl,
        })
    }
}

/// Byte forms of the literals making up the wire format.
#[derive(Debug)]
struct Delimiters {
    dashes: Vec<u8>,
    separator: Vec<u8>,
    boundary: Vec<u8>,
    nl: Vec<u8>,
}

impl Delimiters {
    /// `--B`
    fn part(&self) -> [&[u8]; 2] {
        [&self.dashes, &self.boundary]
    }

    /// `--B--nl`
    fn trailer(&self) -> [&[u8]; 4] {
        [&self.dashes, &self.boundary, &self.dashes, &self.nl]
    }
}
