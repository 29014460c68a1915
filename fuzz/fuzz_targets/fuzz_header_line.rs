#![no_main]

use libfuzzer_sys::fuzz_target;
use multipart_codec::header::{format_line, parse_line};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Some((name, header)) = parse_line(s) {
            // A formatted header must parse back to the same name
            let line = format_line(&name, &header);
            let (again, _) = parse_line(&line).expect("formatted line has a separator");
            assert_eq!(again, name.trim());
        }
    }
});
