#![no_main]

use chowimg::{ByteBuffer, DecodeError, decode, decode_rgba};
use libfuzzer_sys::fuzz_target;

fn decode_all(data: &[u8]) -> (Result<(), DecodeError>, Vec<u8>) {
    let mut input = ByteBuffer::from_source(data);
    let mut output = ByteBuffer::default();
    let result = decode(&mut output, &mut input, data.len());
    (result, output.into_vec())
}

/// Verifies that the decoder safely handles arbitrary, potentially malformed input.
///
/// This simulates corrupted archives and misidentified region boundaries.
///
/// # Invariant
/// The decoder must return either `Ok(_)` or `Err(_)`. It must **never** panic,
/// regardless of the input data.
fn verify_decode_robustness(data: &[u8]) {
    let _ = decode_all(data);

    // The image helper must fail cleanly on any size mismatch too.
    if let [w0, w1, h0, h1, rest @ ..] = data {
        let width = u16::from_le_bytes([*w0, *w1]) & 0x3FF;
        let height = u16::from_le_bytes([*h0, *h1]) & 0x3FF;
        let _ = decode_rgba(rest, width, height);
    }
}

/// Verifies that decoding is a pure function of the input.
///
/// # Panics
/// Panics if two decodes of the same bytes disagree in result or output.
fn verify_determinism(data: &[u8]) {
    let first = decode_all(data);
    let second = decode_all(data);
    if first != second {
        panic!(
            "Non-deterministic decode!\nInput len: {}\nFirst: {:?}\nSecond: {:?}",
            data.len(),
            first.0,
            second.0
        );
    }
}

fuzz_target!(|data: &[u8]| {
    // 1. Robustness: Ensure random noise doesn't crash the decoder.
    verify_decode_robustness(data);

    // 2. Determinism: Ensure identical input yields identical output.
    verify_determinism(data);
});
