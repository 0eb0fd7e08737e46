/*
 * SPDX-FileCopyrightText: 2024 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Thompson α code.
//!
//! A parametric variant of [γ](crate::codes::gamma): the length of `n + 1`,
//! minus one, is written in a fixed field of `width` bits instead of in
//! unary, followed by the binary representation of `n + 1` with the most
//! significant bit removed.
//!
//! Small widths give short codes for small values, but the field bounds the
//! length of `n + 1`, and thus the largest codable value, which is returned by
//! [`thompson_alpha_max`]. Widths from 1 to [`THOMPSON_ALPHA_MAX_WIDTH`] are
//! supported; with the largest width the whole domain of the other codes can
//! be represented.
//!
//! | Arg | width 1 | width 2  | width 3   |
//! |-----|--------:|---------:|----------:|
//! | 0   |       0 |       00 |       000 |
//! | 1   |      10 |      010 |      0010 |
//! | 2   |      11 |      011 |      0011 |
//! | 3   |         |     1000 |     01000 |
//! | 4   |         |     1001 |     01001 |
//! | 7   |         |    11000 |    011000 |

use crate::error::{check_range, CodecError, Result};
use crate::traits::*;

/// The largest supported width of the length field.
pub const THOMPSON_ALPHA_MAX_WIDTH: usize = 6;

/// Return the largest value that can be written with a Thompson α code
/// whose length field is `width` bits wide.
///
/// Invalid widths, that is, widths outside `[1..THOMPSON_ALPHA_MAX_WIDTH]`,
/// cannot write any value, and for them the result is zero.
#[must_use]
pub const fn thompson_alpha_max(width: usize) -> u64 {
    match width {
        1..THOMPSON_ALPHA_MAX_WIDTH => (1 << (1 << width)) - 2,
        THOMPSON_ALPHA_MAX_WIDTH => u64::MAX - 1,
        _ => 0,
    }
}

/// Check that `width` is a valid width for the length field.
///
/// # Errors
/// [`CodecError::InvalidConfig`] if `width` is not in
/// `[1..THOMPSON_ALPHA_MAX_WIDTH]`.
pub fn check_thompson_alpha_width(width: usize) -> Result<()> {
    if !(1..=THOMPSON_ALPHA_MAX_WIDTH).contains(&width) {
        return Err(CodecError::InvalidConfig(format!(
            "the width of a Thompson α code must be in [1..{}], but it is {}",
            THOMPSON_ALPHA_MAX_WIDTH, width
        )));
    }
    Ok(())
}

/// Return the length of the Thompson α code for `n` with a length field of
/// `width` bits.
#[must_use]
#[inline]
pub fn len_thompson_alpha(n: u64, width: usize) -> usize {
    width + (n as u128 + 1).ilog2() as usize
}

/// Trait for reading Thompson α codes.
pub trait ThompsonAlphaRead: BitRead {
    fn read_thompson_alpha(&mut self, width: usize) -> Result<u64>;
}

/// Trait for writing Thompson α codes.
pub trait ThompsonAlphaWrite: BitWrite {
    fn write_thompson_alpha(&mut self, n: u64, width: usize) -> Result<usize>;
}

impl<B: BitRead + ?Sized> ThompsonAlphaRead for B {
    #[inline]
    fn read_thompson_alpha(&mut self, width: usize) -> Result<u64> {
        check_thompson_alpha_width(width)?;
        // At most 63 as the width is at most 6
        let len = self.read_bits(width)?;
        Ok(self.read_bits(len as usize)? + (1 << len) - 1)
    }
}

impl<B: BitWrite + ?Sized> ThompsonAlphaWrite for B {
    #[inline]
    fn write_thompson_alpha(&mut self, mut n: u64, width: usize) -> Result<usize> {
        check_thompson_alpha_width(width)?;
        check_range("Thompson α", n, thompson_alpha_max(width))?;
        n += 1;
        let number_of_bits_to_write = n.ilog2();
        n ^= 1 << number_of_bits_to_write;
        Ok(self.write_bits(number_of_bits_to_write as u64, width)?
            + self.write_bits(n, number_of_bits_to_write as usize)?)
    }
}

#[cfg(test)]
mod test {
    use crate::prelude::*;

    #[test]
    fn test_max() {
        assert_eq!(thompson_alpha_max(1), 2);
        assert_eq!(thompson_alpha_max(2), 14);
        assert_eq!(thompson_alpha_max(3), 254);
        assert_eq!(thompson_alpha_max(4), 65534);
        assert_eq!(thompson_alpha_max(5), (1 << 32) - 2);
        assert_eq!(thompson_alpha_max(6), u64::MAX - 1);
        assert_eq!(thompson_alpha_max(0), 0);
        assert_eq!(thompson_alpha_max(7), 0);
        assert_eq!(thompson_alpha_max(64), 0);
    }

    #[test]
    fn test_thompson_alpha() -> Result<()> {
        for (value, width, expected, len) in [
            (0, 1, 0b0, 1),
            (1, 1, 0b10, 2),
            (2, 1, 0b11, 2),
            (0, 2, 0b00, 2),
            (3, 2, 0b1000, 4),
            (7, 2, 0b11000, 5),
            (4, 3, 0b01001, 5),
            (7, 3, 0b011000, 6),
        ] {
            let mut writer = BufBitWriter::new(Vec::new());
            assert_eq!(writer.write_thompson_alpha(value, width)?, len);
            assert_eq!(len_thompson_alpha(value, width), len);
            let bytes = writer.into_inner()?;
            assert_eq!(
                bytes,
                [(expected << (8 - len)) as u8],
                "for value {} and width {}",
                value,
                width
            );

            let mut reader = BufBitReader::new(&bytes[..]);
            assert_eq!(reader.read_thompson_alpha(width)?, value);
        }
        Ok(())
    }

    #[test]
    fn test_thompson_alpha_extremes() -> Result<()> {
        for width in 1..=THOMPSON_ALPHA_MAX_WIDTH {
            let max = thompson_alpha_max(width);
            let mut writer = BufBitWriter::new(Vec::new());
            writer.write_thompson_alpha(max, width)?;
            writer.write_thompson_alpha(0, width)?;
            assert_eq!(
                writer.bit_pos() as usize,
                len_thompson_alpha(max, width) + width
            );
            if max < u64::MAX - 1 {
                assert!(
                    writer
                        .write_thompson_alpha(max + 1, width)
                        .unwrap_err()
                        .is_overflow()
                );
            }
            assert!(
                writer
                    .write_thompson_alpha(u64::MAX, width)
                    .unwrap_err()
                    .is_overflow()
            );
            let bytes = writer.into_inner()?;

            let mut reader = BufBitReader::new(&bytes[..]);
            assert_eq!(reader.read_thompson_alpha(width)?, max);
            assert_eq!(reader.read_thompson_alpha(width)?, 0);
        }
        Ok(())
    }

    #[test]
    fn test_invalid_width() {
        let mut writer = BufBitWriter::new(Vec::new());
        for width in [0, THOMPSON_ALPHA_MAX_WIDTH + 1] {
            assert!(matches!(
                writer.write_thompson_alpha(0, width),
                Err(CodecError::InvalidConfig(_))
            ));
        }
        let bytes = [0xff];
        let mut reader = BufBitReader::new(&bytes[..]);
        assert!(matches!(
            reader.read_thompson_alpha(7),
            Err(CodecError::InvalidConfig(_))
        ));
    }
}
