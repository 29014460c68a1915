//! Multipart decoder.
//!
//! Partitions a fully materialized buffer into preamble, parts and epilogue.
//! Every extracted range is copied out, so the result never borrows from
//! the input.

use super::{Delimiters, MultipartCodec, MultipartDecoder};
use crate::body::Body;
use crate::error::{Error, Result};
use crate::header::{parse_line, Header};
use crate::matcher::{search, split};
use crate::part::Part;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::ops::Range;
use tracing::{debug, trace};

impl MultipartDecoder for MultipartCodec {
    fn decode(&self, boundary: &str, buf: &[u8]) -> Result<Body> {
        if buf.is_empty() {
            return Ok(Body::default());
        }

        let delimiters = self.delimiters(boundary)?;

        let segments = split(buf, 0..buf.len(), &delimiters.trailer());
        if self.config().is_single_trailer_validated() && segments.len() > 2 {
            return Err(Error::TrailerCount(segments.len() - 1));
        }
        if segments.len() < 2 {
            debug!(len = buf.len(), "no multipart trailer found, decoding as empty body");
            return Ok(Body::default());
        }

        let body_region = segments[0].clone();
        let epilogue = copy_non_empty(buf, segments[1].start..buf.len());

        let ranges = split(buf, body_region, &delimiters.part());
        let preamble = decode_preamble(buf, ranges[0].clone(), &delimiters.nl);

        let parts = ranges[1..]
            .iter()
            .map(|range| self.decode_part(buf, range.clone(), &delimiters))
            .collect::<Result<Vec<_>>>()?;

        trace!(parts = parts.len(), "decoded multipart body");

        Ok(Body::new(parts, preamble, epilogue))
    }
}

impl MultipartCodec {
    /// Decodes one part range: the bytes between two part delimiters.
    ///
    /// The range starts with the terminator of the delimiter line and ends
    /// with the terminator preceding the next delimiter; both are dropped.
    fn decode_part(&self, buf: &[u8], range: Range<usize>, delimiters: &Delimiters) -> Result<Part> {
        let nl = delimiters.nl.as_slice();
        let data = &buf[range];

        let header_start = if data.starts_with(nl) { nl.len() } else { 0 };
        let content_end = if data.len() >= header_start + nl.len() && data.ends_with(nl) {
            data.len() - nl.len()
        } else {
            data.len()
        };

        let (header_end, body) = match search(data, 0..data.len(), &[nl, nl]) {
            Some(blank) => {
                let body_start = blank + nl.len() * 2;
                (blank, &data[body_start.min(content_end)..content_end])
            }
            None => {
                debug!("multipart part has no blank line, treating it as headers only");
                (content_end, &data[..0])
            }
        };

        let headers = if header_start < header_end {
            self.decode_headers(data, header_start..header_end, nl)?
        } else {
            BTreeMap::new()
        };

        Ok(Part::with_headers(Bytes::copy_from_slice(body), headers))
    }

    /// Decodes the header block, one header per line. A repeated name
    /// replaces the earlier header.
    fn decode_headers(
        &self,
        data: &[u8],
        block: Range<usize>,
        nl: &[u8],
    ) -> Result<BTreeMap<String, Header>> {
        let text = self.config().text_codec_ref();
        let mut headers = BTreeMap::new();

        for line in split(data, block, &[nl]) {
            let line = text.decode(&data[line])?;
            match parse_line(&line) {
                Some((name, header)) => {
                    headers.insert(name, header);
                }
                None => trace!(line = %line, "skipping header line without separator"),
            }
        }

        Ok(headers)
    }
}

/// Strips the terminator that precedes the first delimiter. An empty
/// candidate means there is no preamble.
fn decode_preamble(buf: &[u8], range: Range<usize>, nl: &[u8]) -> Option<Bytes> {
    if range.is_empty() {
        return None;
    }

    let candidate = &buf[range];
    let preamble = candidate.strip_suffix(nl).unwrap_or(candidate);
    Some(Bytes::copy_from_slice(preamble))
}

fn copy_non_empty(buf: &[u8], range: Range<usize>) -> Option<Bytes> {
    if range.is_empty() {
        None
    } else {
        Some(Bytes::copy_from_slice(&buf[range]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodecConfig;

    fn codec() -> MultipartCodec {
        MultipartCodec::default()
    }

    #[test]
    fn test_decode_single_part() {
        let body = codec().decode("1", b"--1\n\nelement\n--1--\n").unwrap();

        assert_eq!(body.parts().len(), 1);
        assert!(body.parts()[0].headers().is_empty());
        assert_eq!(body.parts()[0].body().as_ref(), b"element");
        assert!(body.preamble().is_none());
        assert!(body.epilogue().is_none());
    }

    #[test]
    fn test_decode_empty_buffer_skips_validation() {
        let body = codec().decode("", b"").unwrap();
        assert_eq!(body, Body::default());

        let body = codec().decode(" ", b"").unwrap();
        assert_eq!(body, Body::default());
    }

    #[test]
    fn test_decode_invalid_boundary() {
        let err = codec().decode("", b"--\n\nx\n----\n").unwrap_err();
        assert!(matches!(err, Error::BoundaryLength(0)));
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_decode_without_trailer_is_empty() {
        let body = codec().decode("1", b"--1\n\nelement\n").unwrap();
        assert_eq!(body, Body::default());
    }

    #[test]
    fn test_decode_too_many_trailers() {
        let buf = b"--1\n\nelement\n--1--\n\n--1--\n";
        let err = codec().decode("1", buf).unwrap_err();
        assert!(matches!(err, Error::TrailerCount(2)));
    }

    #[test]
    fn test_decode_lenient_trailers_keep_everything_after_first() {
        let codec = MultipartCodec::new(CodecConfig::new().validate_single_trailer(false));
        let buf = b"--1\n\nelement\n--1--\nepi\n--1--\n";
        let body = codec.decode("1", buf).unwrap();

        assert_eq!(body.parts().len(), 1);
        assert_eq!(body.epilogue().unwrap().as_ref(), b"epi\n--1--\n");
    }

    #[test]
    fn test_decode_preamble_and_epilogue() {
        let buf = b"pre\n--b\n\nx\n--b--\nepi";
        let body = codec().decode("b", buf).unwrap();

        assert_eq!(body.preamble().unwrap().as_ref(), b"pre");
        assert_eq!(body.epilogue().unwrap().as_ref(), b"epi");
        assert_eq!(body.parts()[0].body().as_ref(), b"x");
    }

    #[test]
    fn test_decode_preamble_of_only_terminator_is_empty() {
        let body = codec().decode("b", b"\n--b\n\nx\n--b--\n").unwrap();
        assert_eq!(body.preamble().unwrap().as_ref(), b"");
    }

    #[test]
    fn test_decode_headers() {
        let buf = b"--b\nContent-Type: text/plain; charset=utf-8\nX-Id: 7\n\nhello\n--b--\n";
        let body = codec().decode("b", buf).unwrap();
        let part = &body.parts()[0];

        assert_eq!(part.headers().len(), 2);
        let content_type = part.header("Content-Type").unwrap();
        assert_eq!(content_type.value(), Some("text/plain"));
        assert_eq!(content_type.attribute("charset"), Some("utf-8"));
        assert_eq!(part.header("X-Id").unwrap().value(), Some("7"));
        assert_eq!(part.body().as_ref(), b"hello");
    }

    #[test]
    fn test_decode_duplicate_header_last_wins() {
        let buf = b"--b\nX: first\nX: second\n\nv\n--b--\n";
        let body = codec().decode("b", buf).unwrap();
        assert_eq!(body.parts()[0].header("X").unwrap().value(), Some("second"));
    }

    #[test]
    fn test_decode_skips_header_without_colon() {
        let buf = b"--b\ngarbage\nX: 1\n\nv\n--b--\n";
        let body = codec().decode("b", buf).unwrap();
        let part = &body.parts()[0];
        assert_eq!(part.headers().len(), 1);
        assert_eq!(part.header("X").unwrap().value(), Some("1"));
    }

    #[test]
    fn test_decode_body_keeps_inner_newlines() {
        let buf = b"--b\n\nline1\n\nline2\n\n--b--\n";
        let body = codec().decode("b", buf).unwrap();
        assert_eq!(body.parts()[0].body().as_ref(), b"line1\n\nline2\n");
    }

    #[test]
    fn test_decode_empty_part_body() {
        let body = codec().decode("b", b"--b\n\n\n--b--\n").unwrap();
        assert_eq!(body.parts().len(), 1);
        assert!(body.parts()[0].body().is_empty());
    }

    #[test]
    fn test_decode_part_without_blank_line() {
        let body = codec().decode("b", b"--b\nX: 1\n--b--\n").unwrap();
        let part = &body.parts()[0];
        assert_eq!(part.header("X").unwrap().value(), Some("1"));
        assert!(part.body().is_empty());
    }

    #[test]
    fn test_decode_crlf() {
        let codec = MultipartCodec::new(CodecConfig::new().line_terminator("\r\n"));
        let buf = b"--b\r\nA: 1\r\n\r\nbody\r\n--b\r\n\r\nsecond\r\n--b--\r\n";
        let body = codec.decode("b", buf).unwrap();

        assert_eq!(body.parts().len(), 2);
        assert_eq!(body.parts()[0].header("A").unwrap().value(), Some("1"));
        assert_eq!(body.parts()[0].body().as_ref(), b"body");
        assert_eq!(body.parts()[1].body().as_ref(), b"second");
    }

    #[test]
    fn test_decode_empty_line_terminator_rejected() {
        let codec = MultipartCodec::new(CodecConfig::new().line_terminator(""));
        let err = codec.decode("b", b"--b--").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_decode_without_validation_accepts_long_boundary() {
        let codec = MultipartCodec::new(CodecConfig::new().validate_boundary(false));
        let boundary = "x".repeat(80);
        let buf = format!("--{b}\n\nv\n--{b}--\n", b = boundary);
        let body = codec.decode(&boundary, buf.as_bytes()).unwrap();
        assert_eq!(body.parts()[0].body().as_ref(), b"v");
    }
}
