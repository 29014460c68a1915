//! Form data handling.
//!
//! [`FormData`] is a view over a [`Body`] that indexes parts by the `name`
//! attribute of their `Content-Disposition` header.

use crate::body::Body;
use crate::part::{Part, PartBuilder};
use bytes::Bytes;
use indexmap::IndexMap;

/// Header carrying the field name.
pub const CONTENT_DISPOSITION: &str = "Content-Disposition";
/// Attribute of [`CONTENT_DISPOSITION`] holding the field name.
pub const NAME_ATTRIBUTE: &str = "name";
/// Disposition value written for named parts.
pub const FORM_DATA: &str = "form-data";

/// A multipart form: parts indexed by field name, plus parts without a name.
///
/// Field names keep the order they were first added or seen in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    named: IndexMap<String, Vec<Part>>,
    unnamed: Vec<Part>,
    preamble: Option<Bytes>,
    epilogue: Option<Bytes>,
}

impl FormData {
    pub fn builder() -> FormDataBuilder {
        FormDataBuilder::default()
    }

    /// Indexes the parts of `body` by field name.
    ///
    /// The name is the `name` attribute of the `Content-Disposition` header
    /// (matched case-insensitively) with surrounding quotes removed. Parts
    /// keep their relative order within each name.
    pub fn from_body(body: &Body) -> Self {
        let mut named: IndexMap<String, Vec<Part>> = IndexMap::new();
        let mut unnamed = Vec::new();

        for part in body.parts() {
            match field_name(part) {
                Some(name) => named.entry(name.to_string()).or_default().push(part.clone()),
                None => unnamed.push(part.clone()),
            }
        }

        Self {
            named,
            unnamed,
            preamble: body.preamble().cloned(),
            epilogue: body.epilogue().cloned(),
        }
    }

    pub fn named(&self) -> &IndexMap<String, Vec<Part>> {
        &self.named
    }

    /// Returns the parts sent under `name`.
    pub fn get(&self, name: &str) -> Option<&[Part]> {
        self.named.get(name).map(Vec::as_slice)
    }

    pub fn unnamed(&self) -> &[Part] {
        &self.unnamed
    }

    pub fn preamble(&self) -> Option<&Bytes> {
        self.preamble.as_ref()
    }

    pub fn epilogue(&self) -> Option<&Bytes> {
        self.epilogue.as_ref()
    }

    /// Flattens the form into a body: unnamed parts first, then named parts
    /// in field order, each stamped with `Content-Disposition: form-data; name="<name>"`.
    pub fn to_body(&self) -> Body {
        let mut parts = self.unnamed.clone();
        for (name, list) in &self.named {
            parts.extend(list.iter().map(|part| {
                let mut builder = part.to_builder();
                stamp_name(&mut builder, name);
                builder.build()
            }));
        }

        Body::new(parts, self.preamble.clone(), self.epilogue.clone())
    }

    pub fn to_builder(&self) -> FormDataBuilder {
        FormDataBuilder {
            named: self
                .named
                .iter()
                .map(|(name, list)| (name.clone(), list.iter().map(Part::to_builder).collect()))
                .collect(),
            unnamed: self.unnamed.iter().map(Part::to_builder).collect(),
            preamble: self.preamble.clone(),
            epilogue: self.epilogue.clone(),
        }
    }
}

impl From<FormData> for Body {
    fn from(form: FormData) -> Self {
        form.to_body()
    }
}

impl From<&Body> for FormData {
    fn from(body: &Body) -> Self {
        FormData::from_body(body)
    }
}

/// Builder for [`FormData`].
///
/// # Examples
///
/// ```
/// use multipart_codec::{FormData, Part};
///
/// let form = FormData::builder()
///     .add("id", Part::new("42"))
///     .add("id", Part::new("43"))
///     .build();
/// assert_eq!(form.get("id").unwrap().len(), 2);
///
/// let body = form.to_body();
/// let header = body.parts()[0].header("Content-Disposition").unwrap();
/// assert_eq!(header.attribute("name"), Some("\"id\""));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDataBuilder {
    pub named: IndexMap<String, Vec<PartBuilder>>,
    pub unnamed: Vec<PartBuilder>,
    pub preamble: Option<Bytes>,
    pub epilogue: Option<Bytes>,
}

impl FormDataBuilder {
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

    /// Adds a part under `name`.
    pub fn add(&mut self, name: impl Into<String>, part: Part) -> &mut Self {
        self.named
            .entry(name.into())
            .or_default()
            .push(part.to_builder());
        self
    }

    /// Adds a part without a field name.
    pub fn add_unnamed(&mut self, part: Part) -> &mut Self {
        self.unnamed.push(part.to_builder());
        self
    }

    /// Applies `f` to every part under `name`.
    pub fn edit<F>(&mut self, name: &str, mut f: F) -> &mut Self
    where
        F: FnMut(&mut PartBuilder),
    {
        if let Some(list) = self.named.get_mut(name) {
            list.iter_mut().for_each(&mut f);
        }
        self
    }

    pub fn build(&self) -> FormData {
        FormData {
            named: self
                .named
                .iter()
                .map(|(name, list)| {
                    let parts = list
                        .iter()
                        .map(|builder| {
                            let mut builder = builder.clone();
                            stamp_name(&mut builder, name);
                            builder.build()
                        })
                        .collect();
                    (name.clone(), parts)
                })
                .collect(),
            unnamed: self.unnamed.iter().map(PartBuilder::build).collect(),
            preamble: self.preamble.clone(),
            epilogue: self.epilogue.clone(),
        }
    }
}

fn field_name(part: &Part) -> Option<&str> {
    part.headers()
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(CONTENT_DISPOSITION))
        .and_then(|(_, header)| header.attribute(NAME_ATTRIBUTE))
        .map(|name| name.trim_matches('"'))
}

/// Sets `Content-Disposition: form-data; name="<name>"`, folding any
/// differently cased disposition header into the canonical one.
fn stamp_name(builder: &mut PartBuilder, name: &str) {
    let variant = builder
        .headers
        .keys()
        .find(|key| key.as_str() != CONTENT_DISPOSITION && key.eq_ignore_ascii_case(CONTENT_DISPOSITION))
        .cloned();
    if let Some(key) = variant {
        if let Some(header) = builder.headers.remove(&key) {
            builder
                .headers
                .entry(CONTENT_DISPOSITION.to_string())
                .or_insert(header);
        }
    }

    builder.header(CONTENT_DISPOSITION, |h| {
        h.value(FORM_DATA)
            .attribute(NAME_ATTRIBUTE, format!("\"{}\"", name));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disposition_part(name: &str, body: &'static str) -> Part {
        Part::builder()
            .body(body)
            .header(CONTENT_DISPOSITION, |h| {
                h.value(FORM_DATA).attribute(NAME_ATTRIBUTE, format!("\"{}\"", name));
            })
            .build()
    }

    #[test]
    fn test_from_body() {
        let body = Body::builder()
            .part(disposition_part("Field1", "Element1"))
            .part(Part::new("anonymous"))
            .part(disposition_part("id", "123567"))
            .build();

        let form = body.form_data();
        assert_eq!(form.named().len(), 2);
        assert_eq!(form.get("Field1").unwrap()[0].body().as_ref(), b"Element1");
        assert_eq!(form.get("id").unwrap()[0].body().as_ref(), b"123567");
        assert_eq!(form.unnamed().len(), 1);
        assert!(form.get("missing").is_none());
    }

    #[test]
    fn test_from_body_case_insensitive_header() {
        let part = Part::builder()
            .body("v")
            .header("content-disposition", |h| {
                h.value("form-data").attribute("name", "plain");
            })
            .build();
        let form = FormData::from_body(&Body::builder().part(part).build());
        assert_eq!(form.get("plain").unwrap().len(), 1);
    }

    #[test]
    fn test_to_body_order_and_stamp() {
        let form = FormData::builder()
            .add("b", Part::new("2"))
            .add_unnamed(Part::new("0"))
            .add("a", Part::new("1"))
            .build();

        let body = form.to_body();
        let bodies: Vec<&[u8]> = body.parts().iter().map(|p| p.body().as_ref()).collect();
        assert_eq!(bodies, vec![b"0".as_slice(), b"2".as_slice(), b"1".as_slice()]);

        let header = body.parts()[1].header(CONTENT_DISPOSITION).unwrap();
        assert_eq!(header.value(), Some("form-data"));
        assert_eq!(header.attribute("name"), Some("\"b\""));
        assert!(body.parts()[0].header(CONTENT_DISPOSITION).is_none());
    }

    #[test]
    fn test_fields_keep_insertion_order() {
        let body = FormData::builder()
            .add("zeta", Part::new("1"))
            .add("alpha", Part::new("2"))
            .add("zeta", Part::new("3"))
            .build()
            .to_body();

        let names: Vec<&str> = body
            .parts()
            .iter()
            .filter_map(|p| p.header(CONTENT_DISPOSITION)?.attribute(NAME_ATTRIBUTE))
            .collect();
        assert_eq!(names, vec!["\"zeta\"", "\"zeta\"", "\"alpha\""]);
        assert_eq!(body.parts()[0].body().as_ref(), b"1");
        assert_eq!(body.parts()[2].body().as_ref(), b"2");
    }

    #[test]
    fn test_from_body_keeps_field_order() {
        let body = Body::builder()
            .part(disposition_part("zeta", "1"))
            .part(disposition_part("alpha", "2"))
            .build();

        let form = body.form_data();
        let names: Vec<&str> = form.named().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(form.to_body(), body);
    }

    #[test]
    fn test_stamp_keeps_other_attributes_and_folds_case() {
        let part = Part::builder()
            .header("CONTENT-DISPOSITION", |h| {
                h.value("attachment").attribute("filename", "\"f.txt\"");
            })
            .build();
        let body = FormData::builder().add("upload", part).build().to_body();
        let part = &body.parts()[0];

        assert_eq!(part.headers().len(), 1);
        let header = part.header(CONTENT_DISPOSITION).unwrap();
        assert_eq!(header.value(), Some("form-data"));
        assert_eq!(header.attribute("filename"), Some("\"f.txt\""));
        assert_eq!(header.attribute("name"), Some("\"upload\""));
    }

    #[test]
    fn test_edit() {
        let form = FormData::builder()
            .add("f", Part::new("old"))
            .edit("f", |p| {
                p.body("new");
            })
            .edit("absent", |_| panic!("no parts under this name"))
            .build();
        assert_eq!(form.get("f").unwrap()[0].body().as_ref(), b"new");
    }

    #[test]
    fn test_round_trip_through_body() {
        let form = FormData::builder()
            .preamble("p")
            .add("x", Part::new("1"))
            .add_unnamed(Part::new("u"))
            .build();
        assert_eq!(FormData::from_body(&form.to_body()), form);
        assert_eq!(form.to_builder().build(), form);
    }
}
