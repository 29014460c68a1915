//! A single part of a multipart body.

use crate::header::{Header, HeaderBuilder};
use bytes::Bytes;
use std::collections::BTreeMap;

/// One part: a byte payload plus headers keyed by name (case as written).
///
/// Headers are kept sorted by name, which is also the order they are
/// encoded in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Part {
    body: Bytes,
    headers: BTreeMap<String, Header>,
}

impl Part {
    /// Creates a part with the given body and no headers.
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            body: body.into(),
            headers: BTreeMap::new(),
        }
    }

    /// Creates a part from its body and headers.
    pub fn with_headers(body: impl Into<Bytes>, headers: BTreeMap<String, Header>) -> Self {
        Self {
            body: body.into(),
            headers,
        }
    }

    /// Returns a builder to configure a part.
    ///
    /// # Examples
    ///
    /// ```
    /// use multipart_codec::Part;
    ///
    /// let part = Part::builder()
    ///     .body("hello")
    ///     .header("Content-Type", |h| {
    ///         h.value("text/plain").attribute("charset", "utf-8");
    ///     })
    ///     .build();
    /// assert_eq!(part.body().as_ref(), b"hello");
    /// assert_eq!(part.header("Content-Type").unwrap().attribute("charset"), Some("utf-8"));
    /// ```
    pub fn builder() -> PartBuilder {
        PartBuilder::default()
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn headers(&self) -> &BTreeMap<String, Header> {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&Header> {
        self.headers.get(name)
    }

    /// Returns a builder seeded with this part's contents.
    pub fn to_builder(&self) -> PartBuilder {
        PartBuilder {
            body: self.body.clone(),
            headers: self
                .headers
                .iter()
                .map(|(name, header)| (name.clone(), header.to_builder()))
                .collect(),
        }
    }
}

/// Builder for [`Part`]. The body defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartBuilder {
    /// Part's body
    pub body: Bytes,
    /// Part's headers, last write wins
    pub headers: BTreeMap<String, HeaderBuilder>,
}

impl PartBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(&mut self, body: impl Into<Bytes>) -> &mut Self {
        self.body = body.into();
        self
    }

    /// Gets or inserts the named header, then configures it with `f`.
    pub fn header<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: FnOnce(&mut HeaderBuilder),
    {
        f(self.headers.entry(name.into()).or_default());
        self
    }

    /// Replaces the named header.
    pub fn set_header(&mut self, name: impl Into<String>, header: &Header) -> &mut Self {
        self.headers.insert(name.into(), header.to_builder());
        self
    }

    pub fn build(&self) -> Part {
        Part {
            body: self.body.clone(),
            headers: self
                .headers
                .iter()
                .map(|(name, header)| (name.clone(), header.build()))
                .collect(),
        }
    }
}
