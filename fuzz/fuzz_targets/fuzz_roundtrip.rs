#![no_main]

use hx711_readings::{decode_bytes, Encoder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut enc = Encoder::new();
    let mut expected = Vec::new();
    let mut time_us = 0u64;

    // Bytes are interpreted as (dt: u16, value: i24, tare: u8) tuples
    for chunk in data.chunks_exact(6) {
        time_us += u64::from(u16::from_le_bytes([chunk[0], chunk[1]]));
        let value = i64::from(i32::from_le_bytes([0, chunk[2], chunk[3], chunk[4]]) >> 8);
        let tare = chunk[5] & 1 == 1;

        let flags: &[&str] = if tare { &["tare"] } else { &[] };
        enc.append_with_flags(time_us, value, flags.iter().copied()).unwrap();
        expected.push((time_us, value, tare));
    }

    // Property: everything appended decodes back unchanged
    let log = decode_bytes(&enc.to_bytes().unwrap()).unwrap();
    assert_eq!(log.readings.len(), expected.len());
    for (sample, &(time_us, value, tare)) in log.readings.iter().zip(&expected) {
        assert_eq!(sample.time_us, time_us);
        assert_eq!(sample.value, value);
        assert_eq!(sample.is_tare(), tare);
    }
});
