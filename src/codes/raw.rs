/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Raw code.
//!
//! The value is written in binary using exactly 64 bits, that is, as an
//! unsigned big-endian integer. There is no compression, but every value is
//! codable, so this code is the baseline against which the other codes are
//! measured.

use crate::error::Result;
use crate::traits::*;

/// The largest value that can be written with the raw code.
pub const RAW_MAX: u64 = u64::MAX;

/// Return the length of the raw code for `n`.
#[must_use]
#[inline(always)]
pub fn len_raw(_n: u64) -> usize {
    64
}

/// Trait for reading raw codes.
pub trait RawRead: BitRead {
    #[inline(always)]
    fn read_raw(&mut self) -> Result<u64> {
        self.read_bits(64)
    }
}

/// Trait for writing raw codes.
pub trait RawWrite: BitWrite {
    #[inline(always)]
    fn write_raw(&mut self, n: u64) -> Result<usize> {
        self.write_bits(n, 64)
    }
}

impl<B: BitRead + ?Sized> RawRead for B {}
impl<B: BitWrite + ?Sized> RawWrite for B {}

#[cfg(test)]
mod test {
    use crate::prelude::*;

    #[test]
    fn test_raw() -> Result<()> {
        let mut writer = BufBitWriter::new(Vec::new());
        writer.write_raw(1)?;
        writer.write_bits(1, 1)?;
        writer.write_raw(RAW_MAX)?;
        let bytes = writer.into_inner()?;
        assert_eq!(bytes[..8], [0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(bytes.len(), 17);

        let mut reader = BufBitReader::new(&bytes[..]);
        assert_eq!(reader.read_raw()?, 1);
        assert!(reader.read_bit()?);
        assert_eq!(reader.read_raw()?, RAW_MAX);
        Ok(())
    }
}
