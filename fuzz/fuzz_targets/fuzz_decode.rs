#![no_main]

use libfuzzer_sys::fuzz_target;
use multipart_codec::{CodecConfig, MultipartCodec, MultipartDecoder};

fuzz_target!(|data: &[u8]| {
    // Strict and lenient decoders must both return without panicking
    let _ = MultipartCodec::default().decode("boundary", data);

    let lenient = MultipartCodec::new(
        CodecConfig::new()
            .validate_single_trailer(false)
            .line_terminator("\r\n"),
    );
    let _ = lenient.decode("boundary", data);
});
