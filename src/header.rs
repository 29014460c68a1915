//! Part headers and the header line codec.
//!
//! A header line has the form
//! `Name: value; attr1=value1; attr2=value2`. Attribute values are kept
//! verbatim, quotes included; quoting is the caller's business.

use std::collections::BTreeMap;

/// Separator between a header name and its value.
pub const HEADER_NAME_SEPARATOR: &str = ": ";

/// A single part header: an optional value plus named attributes.
///
/// Attributes are kept sorted by name, which is also the order they are
/// encoded in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Header {
    value: Option<String>,
    attributes: BTreeMap<String, String>,
}

impl Header {
    /// Creates a header with a value and no attributes.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            attributes: BTreeMap::new(),
        }
    }

    /// Creates a header from its parts.
    pub fn with_attributes(value: Option<String>, attributes: BTreeMap<String, String>) -> Self {
        Self { value, attributes }
    }

    /// Returns a builder to configure a header.
    pub fn builder() -> HeaderBuilder {
        HeaderBuilder::default()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns a builder seeded with this header's contents.
    pub fn to_builder(&self) -> HeaderBuilder {
        HeaderBuilder {
            value: self.value.clone(),
            attributes: self.attributes.clone(),
        }
    }

    /// Formats the part of the line after `Name: `.
    pub fn format_value(&self) -> String {
        let mut out = String::new();
        if let Some(value) = &self.value {
            out.push_str(value);
        }
        for (name, value) in &self.attributes {
            out.push_str("; ");
            out.push_str(name);
            out.push('=');
            out.push_str(value);
        }
        out
    }
}

/// Builder for [`Header`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBuilder {
    /// Header's value
    pub value: Option<String>,
    /// Header's attributes, last write wins
    pub attributes: BTreeMap<String, String>,
}

impl HeaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&mut self, value: impl Into<String>) -> &mut Self {
        self.value = Some(value.into());
        self
    }

    pub fn attribute(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn build(&self) -> Header {
        Header {
            value: self.value.clone(),
            attributes: self.attributes.clone(),
        }
    }
}

/// Parses one header line into its name and [`Header`].
///
/// Returns `None` when the line has no `:` separator. The name and every
/// token are trimmed. An empty value becomes `None`. An attribute without
/// `=` maps to the empty string. Every `;` starts a new attribute, quoted
/// or not, so attribute values must not contain one.
///
/// # Examples
///
/// ```
/// use multipart_codec::header::parse_line;
///
/// let (name, header) = parse_line("Content-Disposition: form-data; name=\"id\"").unwrap();
/// assert_eq!(name, "Content-Disposition");
/// assert_eq!(header.value(), Some("form-data"));
/// assert_eq!(header.attribute("name"), Some("\"id\""));
/// ```
pub fn parse_line(line: &str) -> Option<(String, Header)> {
    let (name, rest) = line.split_once(':')?;
    let mut segments = rest.split(';');

    let value = segments
        .next()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    let mut attributes = BTreeMap::new();
    for segment in segments {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        match segment.split_once('=') {
            Some((key, val)) => attributes.insert(key.trim().to_string(), val.trim().to_string()),
            None => attributes.insert(segment.to_string(), String::new()),
        };
    }

    Some((name.trim().to_string(), Header { value, attributes }))
}

/// Formats a header as a full line without the line terminator.
///
/// # Examples
///
/// ```
/// use multipart_codec::header::{format_line, Header};
///
/// let header = Header::builder().value("form-data").attribute("name", "\"a\"").build();
/// assert_eq!(format_line("Content-Disposition", &header), "Content-Disposition: form-data; name=\"a\"");
/// ```
pub fn format_line(name: &str, header: &Header) -> String {
    format!("{}{}{}", name, HEADER_NAME_SEPARATOR, header.format_value())
}
