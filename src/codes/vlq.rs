/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Variable-length quantities.
//!
//! These codes represent a natural number as a sequence of bytes, the length of
//! the sequence depends on the magnitude of the number. They are known under a
//! plethora of different names such “vbyte”, “varint”, “[variable-length
//! quantity](https://en.wikipedia.org/wiki/Variable-length_quantity)”, “LEB”,
//! and so on.
//!
//! # Definition
//!
//! The number is split into blocks of 7 bits, least significant block first.
//! Each block is stored in a byte whose most significant bit is a flag
//! telling whether the byte is the last one of the code.
//!
//! ## Completeness
//!
//! The naive representation is not *complete*, as there are sequences that are
//! not used. For example, zero can be written in many ways (e.g., `0x00` or
//! `0x80 0x00`), but only the single-byte representation is used.
//!
//! To have completeness, every time a block is followed by another one we
//! subtract one from what remains to be written: since we know the remaining
//! value is at least one, the byte sequence that would mean “stop here with
//! zero” is reused to mean “continue with one”. As a result, we represent the
//! interval [0..2⁷) with one byte, then the interval [2⁷..2⁷ + 2¹⁴) with two
//! bytes, and so on. Since the sum of all blocks plus one must fit in 64 bits,
//! the largest codable value is [`VLQ_MAX`].
//!
//! ## Flag polarity
//!
//! In the [plain variant](VlqWrite::write_vlq) the flag is set on all bytes
//! but the last one; in the [inverted variant](VlqWrite::write_inverted_vlq)
//! it is set only on the last byte. The two variants have the same length.
//!
//! Note that the codes are not necessarily byte-aligned: if other codes are
//! written on the same stream, the bytes are just sequences of 8 bits.

use crate::error::{check_range, CodecError, Result};
use crate::traits::*;

/// The largest value that can be written with a VLQ (plain or inverted).
pub const VLQ_MAX: u64 = u64::MAX - 1;

const FLAG: u64 = 0x80;
const BLOCK_MASK: u64 = 0x7F;

/// Return the length of the VLQ for `value` in bytes.
#[must_use]
#[inline]
pub fn byte_len_vlq(mut value: u64) -> usize {
    let mut len = 1;
    while value > BLOCK_MASK {
        value = (value >> 7) - 1;
        len += 1;
    }
    len
}

/// Return the length of the VLQ for `value` in bits.
#[must_use]
#[inline]
pub fn len_vlq(value: u64) -> usize {
    8 * byte_len_vlq(value)
}

/// Trait for reading VLQs, plain or inverted.
pub trait VlqRead: BitRead {
    #[inline]
    fn read_vlq(&mut self) -> Result<u64> {
        default_read_vlq(self, "VLQ", false)
    }

    #[inline]
    fn read_inverted_vlq(&mut self) -> Result<u64> {
        default_read_vlq(self, "inverted VLQ", true)
    }
}

/// Trait for writing VLQs, plain or inverted.
pub trait VlqWrite: BitWrite {
    #[inline]
    fn write_vlq(&mut self, value: u64) -> Result<usize> {
        check_range("VLQ", value, VLQ_MAX)?;
        default_write_vlq(self, value, FLAG, 0)
    }

    #[inline]
    fn write_inverted_vlq(&mut self, value: u64) -> Result<usize> {
        check_range("inverted VLQ", value, VLQ_MAX)?;
        default_write_vlq(self, value, 0, FLAG)
    }
}

impl<B: BitRead + ?Sized> VlqRead for B {}
impl<B: BitWrite + ?Sized> VlqWrite for B {}

/// Common part of the plain and inverted implementation; the flags are
/// or'd to blocks followed by another block and to the last block,
/// respectively.
#[inline(always)]
fn default_write_vlq<B: BitWrite + ?Sized>(
    backend: &mut B,
    mut value: u64,
    more: u64,
    last: u64,
) -> Result<usize> {
    let mut written = 0;
    while value > BLOCK_MASK {
        written += backend.write_bits((value & BLOCK_MASK) | more, 8)?;
        value = (value >> 7) - 1;
    }
    written += backend.write_bits(value | last, 8)?;
    Ok(written)
}

#[inline(always)]
fn default_read_vlq<B: BitRead + ?Sized>(
    backend: &mut B,
    code: &'static str,
    inverted: bool,
) -> Result<u64> {
    let mut value: u64 = 0;
    let mut shift = 0;
    loop {
        let byte = backend.read_bits(8)?;
        // Every block contributes at least one unit, so the accumulator
        // strictly increases and any wrap-around is an overflow.
        value = 1_u64
            .checked_shl(shift)
            .and_then(|unit| ((byte & BLOCK_MASK) + 1).checked_mul(unit))
            .and_then(|block| value.checked_add(block))
            .ok_or(CodecError::Overflow { code })?;
        if ((byte & FLAG) == 0) != inverted {
            return Ok(value - 1);
        }
        shift += 7;
    }
}

#[cfg(test)]
mod test {
    use crate::prelude::*;

    fn to_bytes(values: &[u64], inverted: bool) -> Result<Vec<u8>> {
        let mut writer = BufBitWriter::new(Vec::new());
        for &value in values {
            let len = if inverted {
                writer.write_inverted_vlq(value)?
            } else {
                writer.write_vlq(value)?
            };
            assert_eq!(len, len_vlq(value));
        }
        writer.into_inner()
    }

    #[test]
    fn test_vlq() -> Result<()> {
        assert_eq!(to_bytes(&[0], false)?, [0b0000_0000]);
        assert_eq!(to_bytes(&[127], false)?, [0b0111_1111]);
        assert_eq!(to_bytes(&[128], false)?, [0b1000_0000, 0b0000_0000]);
        assert_eq!(to_bytes(&[129], false)?, [0b1000_0001, 0b0000_0000]);
        assert_eq!(to_bytes(&[16511], false)?, [0xff, 0x7f]);
        assert_eq!(to_bytes(&[16512], false)?, [0x80, 0x80, 0x00]);

        assert_eq!(to_bytes(&[0], true)?, [0b1000_0000]);
        assert_eq!(to_bytes(&[127], true)?, [0b1111_1111]);
        assert_eq!(to_bytes(&[128], true)?, [0b0000_0000, 0b1000_0000]);
        assert_eq!(to_bytes(&[16512], true)?, [0x00, 0x00, 0x80]);
        Ok(())
    }

    #[test]
    fn test_byte_len() {
        assert_eq!(byte_len_vlq(0), 1);
        assert_eq!(byte_len_vlq(127), 1);
        assert_eq!(byte_len_vlq(128), 2);
        assert_eq!(byte_len_vlq(16511), 2);
        assert_eq!(byte_len_vlq(16512), 3);
        assert_eq!(byte_len_vlq(VLQ_MAX), 10);
    }

    #[test]
    fn test_vlq_extremes() -> Result<()> {
        for inverted in [false, true] {
            let bytes = to_bytes(&[VLQ_MAX, 0, VLQ_MAX], inverted)?;
            let mut reader = BufBitReader::new(&bytes[..]);
            for expected in [VLQ_MAX, 0, VLQ_MAX] {
                let value = if inverted {
                    reader.read_inverted_vlq()?
                } else {
                    reader.read_vlq()?
                };
                assert_eq!(value, expected);
            }
        }
        let mut writer = BufBitWriter::new(Vec::new());
        assert!(writer.write_vlq(VLQ_MAX + 1).unwrap_err().is_overflow());
        assert!(writer
            .write_inverted_vlq(VLQ_MAX + 1)
            .unwrap_err()
            .is_overflow());
        assert_eq!(writer.bit_pos(), 0);
        Ok(())
    }

    #[test]
    fn test_vlq_overflow() {
        // Ten continuation bytes make the value exceed 64 bits
        let bytes = [0xff; 11];
        let mut reader = BufBitReader::new(&bytes[..]);
        assert!(matches!(
            reader.read_vlq(),
            Err(CodecError::Overflow { .. })
        ));
        // The smallest ten-byte code whose value would be 2⁶⁴
        let mut bytes = to_bytes(&[VLQ_MAX], false).unwrap();
        let last = bytes.len() - 1;
        bytes[last] += 1;
        let mut reader = BufBitReader::new(&bytes[..]);
        assert!(matches!(
            reader.read_vlq(),
            Err(CodecError::Overflow { .. })
        ));
    }

    #[test]
    fn test_vlq_truncated() {
        let bytes = [0x80];
        let mut reader = BufBitReader::new(&bytes[..]);
        assert!(matches!(
            reader.read_vlq(),
            Err(CodecError::UnexpectedEof { needed: 8 })
        ));
        let bytes = [0x00];
        let mut reader = BufBitReader::new(&bytes[..]);
        assert!(matches!(
            reader.read_inverted_vlq(),
            Err(CodecError::UnexpectedEof { needed: 8 })
        ));
    }
}
