//! Exact byte matching primitives.
//!
//! Every function takes its needle as a list of byte slices that are matched
//! as one concatenation, so delimiters like `"--" + boundary + "--" + nl`
//! never need to be joined into a temporary buffer.
//!
//! Searching is a linear scan, `O(window × needle)` in the worst case. A long
//! boundary that repeats inside the payload pushes decode toward quadratic time.

use std::ops::Range;

/// Total length of a needle list.
pub fn needle_len(needles: &[&[u8]]) -> usize {
    needles.iter().map(|n| n.len()).sum()
}

/// Reports whether `buf[offset..]` starts with the concatenation of `needles`.
///
/// Returns `false` instead of panicking when the match would run past the end.
///
/// # Examples
///
/// ```
/// use multipart_codec::matcher::match_at;
///
/// assert!(match_at(b"x--b--", 1, &[b"--", b"b"]));
/// assert!(!match_at(b"x--b", 2, &[b"--", b"b"]));
/// ```
pub fn match_at(buf: &[u8], offset: usize, needles: &[&[u8]]) -> bool {
    let mut pos = offset;

    for needle in needles {
        let Some(end) = pos.checked_add(needle.len()) else {
            return false;
        };
        match buf.get(pos..end) {
            Some(slice) if slice == *needle => pos = end,
            _ => return false,
        }
    }

    true
}

/// Returns the leftmost offset in `window` where the needle matches.
///
/// A match must lie entirely inside `window`. An empty needle never matches.
pub fn search(buf: &[u8], window: Range<usize>, needles: &[&[u8]]) -> Option<usize> {
    let len = needle_len(needles);
    let end = window.end.min(buf.len());
    if len == 0 || window.start >= end {
        return None;
    }

    let hay = &buf[..end];
    (window.start..=end.saturating_sub(len)).find(|&i| match_at(hay, i, needles))
}

/// Splits `window` around every non-overlapping occurrence of the needle.
///
/// Scans left to right. Each match emits the range since the end of the
/// previous match (the delimiter itself is excluded) and scanning resumes
/// right after the delimiter. The trailing range up to `window.end` is always
/// appended, so the result has one more element than there are matches.
///
/// # Examples
///
/// ```
/// use multipart_codec::matcher::split;
///
/// let buf = b"a--b----c";
/// let ranges = split(buf, 0..buf.len(), &[b"--"]);
/// assert_eq!(ranges, vec![0..1, 3..4, 6..6, 8..9]);
/// ```
pub fn split(buf: &[u8], window: Range<usize>, needles: &[&[u8]]) -> Vec<Range<usize>> {
    let len = needle_len(needles);
    let end = window.end.min(buf.len());
    let first = window.start.min(end);
    if len == 0 {
        return vec![first..end];
    }

    let hay = &buf[..end];
    let mut ranges = Vec::new();
    let mut start = first;
    let mut i = first;

    while i + len <= end {
        if match_at(hay, i, needles) {
            ranges.push(start..i);
            i += len;
            start = i;
        } else {
            i += 1;
        }
    }

    ranges.push(start..end);
    ranges
}
