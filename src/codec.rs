//! Table-driven base32 codec.
//!
//! The free functions here are the native edition of the codec; the
//! linear-memory edition, [`crate::Engine`], implements the same
//! contracts over a growable byte region, and the two must produce
//! bit-identical results.
//!
//! Encoding consumes input in groups of 5 bytes, reading the 40-bit
//! group as eight 5-bit windows, most significant bit first. Decoding
//! inverts the windowing in groups of 8 characters. Padding is purely
//! positional: the decode table never maps '='.

use crate::errors::DecodeError;
use crate::tables::{DECODE_TABLE, ENCODE_TABLE, INVALID, PAD};

/// Encode bytes as RFC 4648 base32.
///
/// Total for every input; the output length is exactly
/// `data.len().div_ceil(5) * 8`.
pub fn encode(data: &[u8]) -> String {
    let mut result = String::with_capacity(data.len().div_ceil(5) * 8);

    let chunks = data.chunks_exact(5);
    let rest = chunks.remainder();

    for chunk in chunks {
        push_digit(&mut result, chunk[0] >> 3);
        push_digit(&mut result, (chunk[0] << 2) | (chunk[1] >> 6));
        push_digit(&mut result, chunk[1] >> 1);
        push_digit(&mut result, (chunk[1] << 4) | (chunk[2] >> 4));
        push_digit(&mut result, (chunk[2] << 1) | (chunk[3] >> 7));
        push_digit(&mut result, chunk[3] >> 2);
        push_digit(&mut result, (chunk[3] << 3) | (chunk[4] >> 5));
        push_digit(&mut result, chunk[4]);
    }

    // The final partial group fills its last 5-bit window with zero bits,
    // then pads the block out to 8 characters.
    match *rest {
        [] => {}
        [b0] => {
            push_digit(&mut result, b0 >> 3);
            push_digit(&mut result, b0 << 2);
            push_padding(&mut result, 6);
        }
        [b0, b1] => {
            push_digit(&mut result, b0 >> 3);
            push_digit(&mut result, (b0 << 2) | (b1 >> 6));
            push_digit(&mut result, b1 >> 1);
            push_digit(&mut result, b1 << 4);
            push_padding(&mut result, 4);
        }
        [b0, b1, b2] => {
            push_digit(&mut result, b0 >> 3);
            push_digit(&mut result, (b0 << 2) | (b1 >> 6));
            push_digit(&mut result, b1 >> 1);
            push_digit(&mut result, (b1 << 4) | (b2 >> 4));
            push_digit(&mut result, b2 << 1);
            push_padding(&mut result, 3);
        }
        [b0, b1, b2, b3] => {
            push_digit(&mut result, b0 >> 3);
            push_digit(&mut result, (b0 << 2) | (b1 >> 6));
            push_digit(&mut result, b1 >> 1);
            push_digit(&mut result, (b1 << 4) | (b2 >> 4));
            push_digit(&mut result, (b2 << 1) | (b3 >> 7));
            push_digit(&mut result, b3 >> 2);
            push_digit(&mut result, b3 << 3);
            push_padding(&mut result, 1);
        }
        _ => unreachable!(),
    }

    result
}

/// Decode an RFC 4648 base32 string.
///
/// The input length must be zero or a multiple of eight bytes. Decoding
/// is all-or-nothing: any invalid byte or misplaced padding fails the
/// whole call.
pub fn decode(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    if encoded.is_empty() {
        return Ok(Vec::new());
    }

    let bytes = encoded.as_bytes();
    if bytes.len() % 8 != 0 {
        return Err(DecodeError::invalid_length(bytes.len()));
    }

    let mut result = Vec::with_capacity(bytes.len() / 8 * 5);

    for (group, block) in bytes.chunks_exact(8).enumerate() {
        let base = group * 8;

        let t0 = digit(block[0], base, encoded)?;
        let t1 = digit(block[1], base + 1, encoded)?;
        result.push((t0 << 3) | (t1 >> 2));

        // Padding can only start at offsets 2, 4, 6 (then runs to the end
        // of the block) or 7; each probe mirrors one partial-group shape
        // the encoder produces.
        if block[2] == PAD {
            expect_padding(block, 3, base, encoded)?;
            expect_end(bytes, base + 8, encoded)?;
            break;
        }

        let t2 = digit(block[2], base + 2, encoded)?;
        let t3 = digit(block[3], base + 3, encoded)?;
        result.push((t1 << 6) | (t2 << 1) | (t3 >> 4));

        if block[4] == PAD {
            expect_padding(block, 5, base, encoded)?;
            expect_end(bytes, base + 8, encoded)?;
            break;
        }

        let t4 = digit(block[4], base + 4, encoded)?;
        result.push((t3 << 4) | (t4 >> 1));

        if block[6] == PAD {
            expect_padding(block, 5, base, encoded)?;
            expect_end(bytes, base + 8, encoded)?;
            break;
        }

        let t5 = digit(block[5], base + 5, encoded)?;
        let t6 = digit(block[6], base + 6, encoded)?;
        result.push((t4 << 7) | (t5 << 2) | (t6 >> 3));

        if block[7] == PAD {
            expect_end(bytes, base + 8, encoded)?;
            break;
        }

        let t7 = digit(block[7], base + 7, encoded)?;
        result.push((t6 << 5) | t7);
    }

    Ok(result)
}

/// Encode the UTF-8 bytes of a string as base32.
pub fn encode_str(data: &str) -> String {
    encode(data.as_bytes())
}

/// Decode base32 into a string, replacing invalid UTF-8 sequences with
/// U+FFFD.
pub fn decode_string(encoded: &str) -> Result<String, DecodeError> {
    let bytes = decode(encoded)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn push_digit(result: &mut String, bits: u8) {
    result.push(ENCODE_TABLE[(bits & 0x1F) as usize] as char);
}

fn push_padding(result: &mut String, count: usize) {
    for _ in 0..count {
        result.push(PAD as char);
    }
}

fn digit(byte: u8, position: usize, input: &str) -> Result<u8, DecodeError> {
    let value = DECODE_TABLE[byte as usize];
    if value == INVALID {
        return Err(DecodeError::invalid_character(position, input));
    }
    Ok(value)
}

/// Every byte of `block[from..]` must be padding.
fn expect_padding(
    block: &[u8],
    from: usize,
    base: usize,
    input: &str,
) -> Result<(), DecodeError> {
    for (offset, &byte) in block.iter().enumerate().skip(from) {
        if byte != PAD {
            return Err(DecodeError::invalid_character(base + offset, input));
        }
    }
    Ok(())
}

/// A padded group closes the input; anything after it is invalid.
fn expect_end(bytes: &[u8], end: usize, input: &str) -> Result<(), DecodeError> {
    if end != bytes.len() {
        return Err(DecodeError::invalid_character(end, input));
    }
    Ok(())
}
