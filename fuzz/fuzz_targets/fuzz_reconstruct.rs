#![no_main]

use hx711_readings::{reconstruct, Token, READINGS_FORMAT};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Each 9-byte chunk is one token: a tag byte, then an i64
    // Tag bit 0 set = flag (named by the low bits of the value), otherwise number
    let tokens: Vec<Token> = data
        .chunks_exact(9)
        .map(|chunk| {
            let n = i64::from_le_bytes(chunk[1..9].try_into().unwrap());
            if chunk[0] & 1 == 1 {
                Token::Flag(format!("f{}", n & 3))
            } else {
                Token::from(n)
            }
        })
        .collect();

    let pairs = {
        let mut pending = false;
        let mut pairs = 0usize;
        for token in &tokens {
            if let Token::Number(_) = token {
                if pending {
                    pairs += 1;
                }
                pending = !pending;
            }
        }
        pairs
    };

    // Property: success means one sample per pair with non-decreasing time
    if let Ok(samples) = reconstruct(&READINGS_FORMAT, tokens) {
        assert_eq!(samples.len(), pairs);
        for window in samples.windows(2) {
            assert!(window[0].time_us <= window[1].time_us);
        }
    }
});
