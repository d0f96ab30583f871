#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    // The bundled parser always produces a balanced stream.
    let once = minify::minify(input).expect("parsed input is a valid event stream");
    assert!(once.starts_with("<!doctype html>"));
    let _ = minify::minify(&once).expect("minified output reparses");
});
