//! Codec configuration and text conversion.
//!
//! A [`CodecConfig`] is supplied once per [`MultipartCodec`](crate::MultipartCodec)
//! and controls boundary validation, trailer strictness, the line terminator
//! and the text codec used for header text.

use crate::error::{Error, Result};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Default line terminator.
pub const DEFAULT_LINE_TERMINATOR: &str = "\n";

/// Converts header text to bytes and back.
pub trait TextCodec: fmt::Debug + Send + Sync {
    /// Encodes text to its byte form.
    fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>>;

    /// Decodes bytes to text.
    fn decode(&self, bytes: &[u8]) -> Result<String>;
}

/// UTF-8 text codec. Decoding replaces malformed sequences with U+FFFD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf8;

impl TextCodec for Utf8 {
    fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>> {
        Ok(Cow::Borrowed(text.as_bytes()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<String> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// ISO-8859-1 text codec. Every byte maps to the char with the same code point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latin1;

impl TextCodec for Latin1 {
    fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>> {
        if text.is_ascii() {
            return Ok(Cow::Borrowed(text.as_bytes()));
        }

        text.chars()
            .map(|ch| {
                u8::try_from(u32::from(ch)).map_err(|_| {
                    Error::Encoding(format!("character {:?} is not representable in Latin-1", ch))
                })
            })
            .collect::<Result<Vec<u8>>>()
            .map(Cow::Owned)
    }

    fn decode(&self, bytes: &[u8]) -> Result<String> {
        Ok(bytes.iter().map(|&b| char::from(b)).collect())
    }
}

/// Configuration for a [`MultipartCodec`](crate::MultipartCodec).
///
/// # Examples
///
/// ```
/// use multipart_codec::{CodecConfig, Latin1};
///
/// let config = CodecConfig::new()
///     .line_terminator("\r\n")
///     .validate_single_trailer(false)
///     .text_codec(Latin1);
/// assert_eq!(config.line_terminator_str(), "\r\n");
/// assert!(config.is_boundary_validated());
/// ```
#[derive(Debug, Clone)]
pub struct CodecConfig {
    validate_boundary: bool,
    validate_single_trailer: bool,
    line_terminator: String,
    text_codec: Arc<dyn TextCodec>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            validate_boundary: true,
            validate_single_trailer: true,
            line_terminator: DEFAULT_LINE_TERMINATOR.to_string(),
            text_codec: Arc::new(Utf8),
        }
    }
}

impl CodecConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the boundary format rules.
    #[must_use]
    pub fn validate_boundary(mut self, enabled: bool) -> Self {
        self.validate_boundary = enabled;
        self
    }

    /// Enables or disables rejection of buffers with more than one trailer.
    #[must_use]
    pub fn validate_single_trailer(mut self, enabled: bool) -> Self {
        self.validate_single_trailer = enabled;
        self
    }

    /// Sets the line terminator. It must not be empty.
    #[must_use]
    pub fn line_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.line_terminator = terminator.into();
        self
    }

    /// Sets the codec used for header text, the boundary and the line terminator.
    #[must_use]
    pub fn text_codec(mut self, codec: impl TextCodec + 'static) -> Self {
        self.text_codec = Arc::new(codec);
        self
    }

    #[must_use]
    pub fn is_boundary_validated(&self) -> bool {
        self.validate_boundary
    }

    #[must_use]
    pub fn is_single_trailer_validated(&self) -> bool {
        self.validate_single_trailer
    }

    #[must_use]
    pub fn line_terminator_str(&self) -> &str {
        &self.line_terminator
    }

    #[must_use]
    pub fn text_codec_ref(&self) -> &dyn TextCodec {
        self.text_codec.as_ref()
    }

    /// Returns the encoded line terminator.
    pub(crate) fn line_terminator_bytes(&self) -> Result<Vec<u8>> {
        if self.line_terminator.is_empty() {
            return Err(Error::InvalidConfig("line terminator is empty".to_string()));
        }
        Ok(self.text_codec.encode(&self.line_terminator)?.into_owned())
    }
}
