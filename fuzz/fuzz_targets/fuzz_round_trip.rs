#![no_main]

use libfuzzer_sys::fuzz_target;
use multipart_codec::{decode, encode, Body, Part};

fuzz_target!(|data: &[u8]| {
    // Payloads without '-' can never contain a delimiter
    let parts: Vec<Part> = data
        .split(|&b| b == b'-')
        .take(16)
        .map(|chunk| Part::new(chunk.to_vec()))
        .collect();

    let body = Body::new(parts, None, None);
    let wire = encode("fuzz-boundary", &body).expect("valid boundary");
    assert_eq!(decode("fuzz-boundary", &wire).expect("well-formed input"), body);
});
