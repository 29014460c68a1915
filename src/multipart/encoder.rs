//! Multipart encoder.
//!
//! Encoding runs in two passes over the same segment list: the first sums the
//! exact output length, the second fills a buffer allocated once at that size.

use super::{MultipartCodec, MultipartEncoder};
use crate::body::Body;
use crate::error::Result;
use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

/// A header line with its name and value already encoded.
struct EncodedHeader {
    name: Vec<u8>,
    value: Vec<u8>,
}

impl MultipartEncoder for MultipartCodec {
    fn encode(&self, boundary: &str, body: &Body) -> Result<Bytes> {
        if body.is_empty() {
            return Ok(Bytes::new());
        }

        let delimiters = self.delimiters(boundary)?;
        let text = self.config().text_codec_ref();
        let nl = delimiters.nl.as_slice();

        let parts = body
            .parts()
            .iter()
            .map(|part| {
                let headers = part
                    .headers()
                    .iter()
                    .map(|(name, header)| {
                        Ok(EncodedHeader {
                            name: text.encode(name)?.into_owned(),
                            value: text.encode(&header.format_value())?.into_owned(),
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok((headers, part.body()))
            })
            .collect::<Result<Vec<_>>>()?;

        let delimiter_line_len = delimiters.part().iter().map(|s| s.len()).sum::<usize>() + nl.len();
        let trailer_len = delimiters.trailer().iter().map(|s| s.len()).sum::<usize>();

        let mut size = body.preamble().map_or(0, |p| p.len() + nl.len())
            + trailer_len
            + body.epilogue().map_or(0, Bytes::len);

        for (headers, part_body) in &parts {
            size += delimiter_line_len + nl.len() + part_body.len() + nl.len();
            size += headers
                .iter()
                .map(|h| h.name.len() + delimiters.separator.len() + h.value.len() + nl.len())
                .sum::<usize>();
        }

        let mut out = BytesMut::with_capacity(size);

        if let Some(preamble) = body.preamble() {
            out.put_slice(preamble);
            out.put_slice(nl);
        }

        for (headers, part_body) in &parts {
            for segment in delimiters.part() {
                out.put_slice(segment);
            }
            out.put_slice(nl);

            for header in headers {
                out.put_slice(&header.name);
                out.put_slice(&delimiters.separator);
                out.put_slice(&header.value);
                out.put_slice(nl);
            }

            out.put_slice(nl);
            out.put_slice(part_body);
            out.put_slice(nl);
        }

        for segment in delimiters.trailer() {
            out.put_slice(segment);
        }

        if let Some(epilogue) = body.epilogue() {
            out.put_slice(epilogue);
        }

        debug_assert_eq!(out.len(), size);
        trace!(size, parts = parts.len(), "encoded multipart body");

        Ok(out.freeze())
    }
}
