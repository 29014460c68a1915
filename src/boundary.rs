//! Boundary validation and generation.

use crate::error::{Error, Result};

/// Longest boundary allowed by RFC 2046.
pub const MAX_BOUNDARY_LEN: usize = 70;

/// Checks a boundary before it is used as a delimiter.
///
/// Rules, checked in this order:
/// 1. length is 1 to 70 bytes
/// 2. no occurrence of `line_terminator`
/// 3. the last character is not whitespace
///
/// # Examples
///
/// ```
/// use multipart_codec::boundary::validate;
///
/// assert!(validate("simple-boundary", "\n").is_ok());
/// assert!(validate("trailing ", "\n").is_err());
/// ```
pub fn validate(boundary: &str, line_terminator: &str) -> Result<()> {
    if boundary.is_empty() || boundary.len() > MAX_BOUNDARY_LEN {
        return Err(Error::BoundaryLength(boundary.len()));
    }

    if !line_terminator.is_empty() && boundary.contains(line_terminator) {
        return Err(Error::BoundaryContainsLineTerminator);
    }

    if boundary.chars().next_back().is_some_and(char::is_whitespace) {
        return Err(Error::BoundaryEndsWithWhitespace);
    }

    Ok(())
}

/// Generates a random boundary of 60 lowercase hex characters.
pub fn generate_boundary() -> Result<String> {
    let mut buf = [0u8; 30];
    getrandom::getrandom(&mut buf)?;

    Ok(buf.iter().map(|b| format!("{:02x}", b)).collect())
}

/// Returns a `Content-Type` value for a multipart body, e.g.
/// `multipart/form-data; boundary=abc`.
///
/// The boundary is quoted when it contains a tspecial or a space.
pub fn content_type(subtype: &str, boundary: &str) -> String {
    if boundary.contains(|c: char| is_tspecial(c) || c == ' ') {
        format!("multipart/{}; boundary=\"{}\"", subtype, boundary)
    } else {
        format!("multipart/{}; boundary={}", subtype, boundary)
    }
}

/// Reports whether the character is in 'tspecials' as defined by RFC 2045.
fn is_tspecial(c: char) -> bool {
    matches!(c, '(' | ')' | '<' | '>' | '@' | ',' | ';' | ':' | '\\' | '"' | '/' | '[' | ']' | '?' | '=')
}
