/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Elias δ code.
//!
//! The δ code of a natural number `n` is the concatenation of the
//! [γ](crate::codes::gamma) code of `⌊log₂(n + 1)⌋` and the binary
//! representation of `n + 1` with the most significant bit removed.
//!
//! With respect to γ, the unary prefix is replaced by a γ code, which makes
//! the code much shorter for large values at the price of a slightly longer
//! code for very small values.

use super::{len_gamma, GammaRead, GammaWrite};
use crate::error::{check_range, CodecError, Result};

/// The largest value that can be written with a δ code.
pub const DELTA_MAX: u64 = u64::MAX - 1;

/// Return the length of the δ code for `n`.
#[must_use]
#[inline]
pub fn len_delta(n: u64) -> usize {
    let l = (n as u128 + 1).ilog2();
    l as usize + len_gamma(l as u64)
}

/// Trait for reading δ codes.
pub trait DeltaRead: GammaRead {
    fn read_delta(&mut self) -> Result<u64>;
}

/// Trait for writing δ codes.
pub trait DeltaWrite: GammaWrite {
    fn write_delta(&mut self, n: u64) -> Result<usize>;
}

impl<B: GammaRead + ?Sized> DeltaRead for B {
    #[inline]
    fn read_delta(&mut self) -> Result<u64> {
        let len = self.read_gamma()?;
        if len > 63 {
            return Err(CodecError::Overflow { code: "delta" });
        }
        Ok(self.read_bits(len as usize)? + (1 << len) - 1)
    }
}

impl<B: GammaWrite + ?Sized> DeltaWrite for B {
    #[inline]
    fn write_delta(&mut self, mut n: u64) -> Result<usize> {
        check_range("delta", n, DELTA_MAX)?;
        n += 1;
        let number_of_bits_to_write = n.ilog2();
        n ^= 1 << number_of_bits_to_write;
        Ok(self.write_gamma(number_of_bits_to_write as u64)?
            + self.write_bits(n, number_of_bits_to_write as usize)?)
    }
}
