/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Elias γ code.
//!
//! The γ code of a natural number `n` is the concatenation of the unary code of
//! `⌊log₂(n + 1)⌋` and the binary representation of `n + 1` with the most
//! significant bit removed. Equivalently, it is the binary representation
//! of `n + 1` preceded by as many zeros as its digits, minus one.
//!
//! Since `n + 1` must fit in 64 bits, the largest codable value is
//! [`GAMMA_MAX`].

use crate::error::{check_range, CodecError, Result};
use crate::traits::*;

/// The largest value that can be written with a γ code.
pub const GAMMA_MAX: u64 = u64::MAX - 1;

/// Return the length of the γ code for `n`.
#[must_use]
#[inline]
pub fn len_gamma(n: u64) -> usize {
    2 * (n as u128 + 1).ilog2() as usize + 1
}

/// Trait for reading γ codes.
pub trait GammaRead: BitRead {
    fn read_gamma(&mut self) -> Result<u64>;
}

/// Trait for writing γ codes.
pub trait GammaWrite: BitWrite {
    fn write_gamma(&mut self, n: u64) -> Result<usize>;
}

impl<B: BitRead + ?Sized> GammaRead for B {
    #[inline]
    fn read_gamma(&mut self) -> Result<u64> {
        // More than 63 zeros describe a value that does not fit in 64 bits
        let mut len: u32 = 0;
        while !self.read_bit()? {
            len += 1;
            if len > 63 {
                return Err(CodecError::Overflow { code: "gamma" });
            }
        }
        Ok(self.read_bits(len as usize)? + (1 << len) - 1)
    }
}

impl<B: BitWrite + ?Sized> GammaWrite for B {
    #[inline]
    fn write_gamma(&mut self, mut n: u64) -> Result<usize> {
        check_range("gamma", n, GAMMA_MAX)?;
        n += 1;
        let number_of_bits_to_write = n.ilog2();
        // Clean up the implicit leading one
        n ^= 1 << number_of_bits_to_write;

        Ok(self.write_unary(number_of_bits_to_write as u64)?
            + self.write_bits(n, number_of_bits_to_write as usize)?)
    }
}
