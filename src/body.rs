//! The structured multipart body.

use crate::multipart::formdata::FormData;
use crate::part::{Part, PartBuilder};
use bytes::Bytes;

/// An ordered list of parts with an optional preamble and epilogue.
///
/// Equality compares parts in order and the preamble/epilogue bytes exactly;
/// an absent preamble is not equal to an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Body {
    parts: Vec<Part>,
    preamble: Option<Bytes>,
    epilogue: Option<Bytes>,
}

impl Body {
    pub fn new(parts: Vec<Part>, preamble: Option<Bytes>, epilogue: Option<Bytes>) -> Self {
        Self {
            parts,
            preamble,
            epilogue,
        }
    }

    /// Returns a builder to assemble a body.
    ///
    /// # Examples
    ///
    /// ```
    /// use multipart_codec::{Body, Part};
    ///
    /// let body = Body::builder()
    ///     .preamble("ignored by most readers")
    ///     .part(Part::new("first"))
    ///     .build();
    /// assert_eq!(body.parts().len(), 1);
    /// ```
    pub fn builder() -> BodyBuilder {
        BodyBuilder::default()
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Bytes before the first part. Ignored by most multipart readers.
    pub fn preamble(&self) -> Option<&Bytes> {
        self.preamble.as_ref()
    }

    /// Bytes after the trailer. Ignored by most multipart readers.
    pub fn epilogue(&self) -> Option<&Bytes> {
        self.epilogue.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Indexes the parts by their `Content-Disposition` `name` attribute.
    pub fn form_data(&self) -> FormData {
        FormData::from_body(self)
    }

    /// Returns a builder seeded with this body's contents.
    pub fn to_builder(&self) -> BodyBuilder {
        BodyBuilder {
            parts: self.parts.iter().map(Part::to_builder).collect(),
            preamble: self.preamble.clone(),
            epilogue: self.epilogue.clone(),
        }
    }
}

/// Builder for [`Body`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyBuilder {
    /// Parts in encoding order
    pub parts: Vec<PartBuilder>,
    pub preamble: Option<Bytes>,
    pub epilogue: Option<Bytes>,
}

impl BodyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preamble(&mut self, bytes: impl Into<Bytes>) -> &mut Self {
        self.preamble = Some(bytes.into());
        self
    }

    pub fn epilogue(&mut self, bytes: impl Into<Bytes>) -> &mut Self {
        self.epilogue = Some(bytes.into());
        self
    }

    /// Appends a finished part.
    pub fn part(&mut self, part: Part) -> &mut Self {
        self.parts.push(part.to_builder());
        self
    }

    /// Appends a part configured by `f`.
    pub fn part_with<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut PartBuilder),
    {
        let mut builder = PartBuilder::new();
        f(&mut builder);
        self.parts.push(builder);
        self
    }

    pub fn build(&self) -> Body {
        Body {
            parts: self.parts.iter().map(PartBuilder::build).collect(),
            preamble: self.preamble.clone(),
            epilogue: self.epilogue.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble_presence_matters() {
        let absent = Body::new(vec![Part::new("x")], None, None);
        let empty = Body::new(vec![Part::new("x")], Some(Bytes::new()), None);
        assert_ne!(absent, empty);
        assert_eq!(absent, absent.clone());
    }

    #[test]
    fn test_part_order_matters() {
        let a = Body::new(vec![Part::new("1"), Part::new("2")], None, None);
        let b = Body::new(vec![Part::new("2"), Part::new("1")], None, None);
        assert_ne!(a, b);
    }

    #[test]
    fn test_builder() {
        let body = Body::builder()
            .preamble("pre")
            .epilogue("epi")
            .part(Part::new("one"))
            .part_with(|p| {
                p.body("two").header("Content-Type", |h| {
                    h.value("text/plain");
                });
            })
            .build();

        assert_eq!(body.parts().len(), 2);
        assert_eq!(body.preamble().unwrap().as_ref(), b"pre");
        assert_eq!(body.epilogue().unwrap().as_ref(), b"epi");
        assert_eq!(
            body.parts()[1].header("Content-Type").unwrap().value(),
            Some("text/plain")
        );
        assert_eq!(body.to_builder().build(), body);
    }
}
