//! Linear-memory base32 engine.
//!
//! This edition of the codec mirrors a fixed-address-space execution
//! model: one contiguous byte region holds a reserved header (the lookup
//! tables), a copy of the input, and the output, in that order. The
//! region grows in 64 KiB pages, never shrinks, and is reused across
//! calls, so repeated encodes and decodes on one instance settle into a
//! steady state with no further allocation.
//!
//! Output is bit-identical to the table-driven edition,
//! [`crate::encode`] and [`crate::decode`].

use crate::errors::{DecodeError, EncodeError};
use crate::tables::{DECODE_TABLE, ENCODE_TABLE, INVALID, PAD};

/// Growth unit of the byte region.
pub const PAGE_SIZE: usize = 65536;

/// Address-space cap, matching the 4 GiB limit of a 32-bit linear memory.
const MAX_PAGES: usize = 65536;

const DECODE_TABLE_OFFSET: usize = 0x000;
const ENCODE_TABLE_OFFSET: usize = 0x100;

/// End of the reserved header; input is copied here, output follows it.
const INPUT_OFFSET: usize = 0x120;

/// A base32 codec over a single growable byte region.
///
/// Each instance owns its region exclusively; `&mut self` on every
/// operation keeps overlapping calls from interleaving their input and
/// output placement. Independent instances share nothing.
pub struct Engine {
    memory: Vec<u8>,
    pages: usize,
}

impl Engine {
    /// Create an engine with one page of memory and the lookup tables
    /// materialized into the reserved header.
    pub fn new() -> Self {
        let mut engine = Engine {
            memory: vec![0; PAGE_SIZE],
            pages: 1,
        };
        engine.write_tables();
        engine
    }

    /// Number of pages currently backing the region. Monotonic over the
    /// lifetime of the instance.
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Encode bytes as RFC 4648 base32.
    ///
    /// Fails only if the region cannot grow to hold the input copy plus
    /// the worst-case output.
    pub fn encode(&mut self, data: &[u8]) -> Result<String, EncodeError> {
        // Input copy plus 8/5 output, rounded up generously so repeated
        // near-boundary calls don't each trigger a small growth.
        self.ensure_capacity(data.len().saturating_mul(3))
            .map_err(|requested_pages| EncodeError::OutOfMemory { requested_pages })?;

        let len = data.len();
        self.memory[INPUT_OFFSET..INPUT_OFFSET + len].copy_from_slice(data);
        let written = self.encode_region(len);

        let output = &self.memory[INPUT_OFFSET + len..INPUT_OFFSET + len + written];
        Ok(output.iter().map(|&byte| byte as char).collect())
    }

    /// Decode an RFC 4648 base32 string.
    ///
    /// Same contract as [`crate::decode`], plus `OutOfMemory` if the
    /// region cannot grow. Growth happens before any write, so a failed
    /// call leaves no partial state behind.
    pub fn decode(&mut self, encoded: &str) -> Result<Vec<u8>, DecodeError> {
        if encoded.is_empty() {
            return Ok(Vec::new());
        }

        let bytes = encoded.as_bytes();
        if bytes.len() % 8 != 0 {
            return Err(DecodeError::invalid_length(bytes.len()));
        }

        // Input copy plus output, which is never larger than the input.
        self.ensure_capacity(bytes.len().saturating_mul(2))
            .map_err(|requested_pages| DecodeError::OutOfMemory { requested_pages })?;

        let len = bytes.len();
        self.memory[INPUT_OFFSET..INPUT_OFFSET + len].copy_from_slice(bytes);
        let written = self.decode_region(len, encoded)?;

        Ok(self.memory[INPUT_OFFSET + len..INPUT_OFFSET + len + written].to_vec())
    }

    /// Encode the UTF-8 bytes of a string as base32.
    pub fn encode_str(&mut self, data: &str) -> Result<String, EncodeError> {
        self.encode(data.as_bytes())
    }

    /// Decode base32 into a string, replacing invalid UTF-8 sequences
    /// with U+FFFD.
    pub fn decode_string(&mut self, encoded: &str) -> Result<String, DecodeError> {
        let bytes = self.decode(encoded)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Copy the compile-time tables into the reserved header. Idempotent.
    fn write_tables(&mut self) {
        self.memory[DECODE_TABLE_OFFSET..DECODE_TABLE_OFFSET + 256]
            .copy_from_slice(&DECODE_TABLE);
        self.memory[ENCODE_TABLE_OFFSET..ENCODE_TABLE_OFFSET + 32]
            .copy_from_slice(&ENCODE_TABLE);
    }

    /// Grow the region so the header plus `projected` bytes fit. Err
    /// carries the page count that could not be reached.
    fn ensure_capacity(&mut self, projected: usize) -> Result<(), usize> {
        let needed = INPUT_OFFSET.saturating_add(projected).div_ceil(PAGE_SIZE);
        if needed > self.pages {
            if needed > MAX_PAGES {
                return Err(needed);
            }
            let target = needed * PAGE_SIZE;
            self.memory
                .try_reserve_exact(target - self.memory.len())
                .map_err(|_| needed)?;
            self.memory.resize(target, 0);
            self.pages = needed;
        }
        Ok(())
    }

    fn input_byte(&self, offset: usize) -> u8 {
        self.memory[INPUT_OFFSET + offset]
    }

    /// Write the alphabet byte for a 5-bit value at `at`, returning the
    /// next write offset.
    fn put_digit(&mut self, at: usize, bits: u8) -> usize {
        let byte = self.memory[ENCODE_TABLE_OFFSET + (bits & 0x1F) as usize];
        self.memory[at] = byte;
        at + 1
    }

    fn put_padding(&mut self, mut at: usize, count: usize) -> usize {
        for _ in 0..count {
            self.memory[at] = PAD;
            at += 1;
        }
        at
    }

    /// Look up the 5-bit value for the input byte at `offset`. `input`
    /// is the original string, kept for error context.
    fn read_digit(&self, offset: usize, input: &str) -> Result<u8, DecodeError> {
        let byte = self.input_byte(offset);
        let value = self.memory[DECODE_TABLE_OFFSET + byte as usize];
        if value == INVALID {
            return Err(DecodeError::invalid_character(offset, input));
        }
        Ok(value)
    }

    /// Run the packing loop over `len` input bytes already in the region.
    /// Returns the output length; output starts right after the input.
    fn encode_region(&mut self, len: usize) -> usize {
        let start = INPUT_OFFSET + len;
        let mut out = start;
        let mut i = 0;

        while i < len {
            let b0 = self.input_byte(i);
            match len - i {
                1 => {
                    out = self.put_digit(out, b0 >> 3);
                    out = self.put_digit(out, b0 << 2);
                    out = self.put_padding(out, 6);
                }
                2 => {
                    let b1 = self.input_byte(i + 1);
                    out = self.put_digit(out, b0 >> 3);
                    out = self.put_digit(out, (b0 << 2) | (b1 >> 6));
                    out = self.put_digit(out, b1 >> 1);
                    out = self.put_digit(out, b1 << 4);
                    out = self.put_padding(out, 4);
                }
                3 => {
                    let b1 = self.input_byte(i + 1);
                    let b2 = self.input_byte(i + 2);
                    out = self.put_digit(out, b0 >> 3);
                    out = self.put_digit(out, (b0 << 2) | (b1 >> 6));
                    out = self.put_digit(out, b1 >> 1);
                    out = self.put_digit(out, (b1 << 4) | (b2 >> 4));
                    out = self.put_digit(out, b2 << 1);
                    out = self.put_padding(out, 3);
                }
                4 => {
                    let b1 = self.input_byte(i + 1);
                    let b2 = self.input_byte(i + 2);
                    let b3 = self.input_byte(i + 3);
                    out = self.put_digit(out, b0 >> 3);
                    out = self.put_digit(out, (b0 << 2) | (b1 >> 6));
                    out = self.put_digit(out, b1 >> 1);
                    out = self.put_digit(out, (b1 << 4) | (b2 >> 4));
                    out = self.put_digit(out, (b2 << 1) | (b3 >> 7));
                    out = self.put_digit(out, b3 >> 2);
                    out = self.put_digit(out, b3 << 3);
                    out = self.put_padding(out, 1);
                }
                _ => {
                    let b1 = self.input_byte(i + 1);
                    let b2 = self.input_byte(i + 2);
                    let b3 = self.input_byte(i + 3);
                    let b4 = self.input_byte(i + 4);
                    out = self.put_digit(out, b0 >> 3);
                    out = self.put_digit(out, (b0 << 2) | (b1 >> 6));
                    out = self.put_digit(out, b1 >> 1);
                    out = self.put_digit(out, (b1 << 4) | (b2 >> 4));
                    out = self.put_digit(out, (b2 << 1) | (b3 >> 7));
                    out = self.put_digit(out, b3 >> 2);
                    out = self.put_digit(out, (b3 << 3) | (b4 >> 5));
                    out = self.put_digit(out, b4);
                }
            }
            i += 5;
        }

        out - start
    }

    /// Run the unpacking loop over `len` input bytes already in the
    /// region. Returns the output length on success.
    fn decode_region(&mut self, len: usize, input: &str) -> Result<usize, DecodeError> {
        let start = INPUT_OFFSET + len;
        let mut out = start;
        let mut i = 0;

        while i < len {
            let t0 = self.read_digit(i, input)?;
            let t1 = self.read_digit(i + 1, input)?;
            self.memory[out] = (t0 << 3) | (t1 >> 2);
            out += 1;

            if self.input_byte(i + 2) == PAD {
                self.expect_padding(i + 3, i + 8, input)?;
                self.expect_end(i + 8, len, input)?;
                break;
            }

            let t2 = self.read_digit(i + 2, input)?;
            let t3 = self.read_digit(i + 3, input)?;
            self.memory[out] = (t1 << 6) | (t2 << 1) | (t3 >> 4);
            out += 1;

            if self.input_byte(i + 4) == PAD {
                self.expect_padding(i + 5, i + 8, input)?;
                self.expect_end(i + 8, len, input)?;
                break;
            }

            let t4 = self.read_digit(i + 4, input)?;
            self.memory[out] = (t3 << 4) | (t4 >> 1);
            out += 1;

            if self.input_byte(i + 6) == PAD {
                self.expect_padding(i + 5, i + 8, input)?;
                self.expect_end(i + 8, len, input)?;
                break;
            }

            let t5 = self.read_digit(i + 5, input)?;
            let t6 = self.read_digit(i + 6, input)?;
            self.memory[out] = (t4 << 7) | (t5 << 2) | (t6 >> 3);
            out += 1;

            if self.input_byte(i + 7) == PAD {
                self.expect_end(i + 8, len, input)?;
                break;
            }

            let t7 = self.read_digit(i + 7, input)?;
            self.memory[out] = (t6 << 5) | t7;
            out += 1;

            i += 8;
        }

        Ok(out - start)
    }

    /// Every input byte in `from..to` must be padding.
    fn expect_padding(&self, from: usize, to: usize, input: &str) -> Result<(), DecodeError> {
        for offset in from..to {
            if self.input_byte(offset) != PAD {
                return Err(DecodeError::invalid_character(offset, input));
            }
        }
        Ok(())
    }

    /// A padded group closes the input; anything after it is invalid.
    fn expect_end(&self, end: usize, len: usize, input: &str) -> Result<(), DecodeError> {
        if end != len {
            return Err(DecodeError::invalid_character(end, input));
        }
        Ok(())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
