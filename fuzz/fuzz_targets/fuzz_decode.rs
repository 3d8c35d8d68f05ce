#![no_main]

use hx711_readings::decode_bytes;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Feed arbitrary bytes to decode_bytes() - should never panic
    let _ = decode_bytes(data);
});
