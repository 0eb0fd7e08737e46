/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Elias ω code.
//!
//! Like Elias γ coding and Elias δ coding, it works by prefixing the
//! positive integer with a representation of its order of magnitude in a
//! universal code. Unlike those other two codes, however, Elias ω
//! recursively encodes that prefix; thus, they are sometimes known as
//! recursive Elias codes.
//!
//! The code of `n` is built from `x = n + 1`: the binary representation of
//! `x` is preceded by the code of its length minus one, recursively, until the
//! length to write is one; a final zero terminates the code. Each group
//! starts with a one, so a reader peeks at the next bit to know whether
//! another group follows.

use crate::error::{check_range, CodecError, Result};
use crate::traits::*;
use crate::utils::bit_len;

/// The largest value that can be written with an ω code.
pub const OMEGA_MAX: u64 = u64::MAX - 1;

/// Return the length of the ω code for `n`.
#[must_use]
#[inline(always)]
pub fn len_omega(n: u64) -> usize {
    // omega codes are indexed from 1
    recursive_len(n.saturating_add(1))
}

fn recursive_len(n: u64) -> usize {
    if n <= 1 {
        return 1;
    }
    let l = bit_len(n);
    recursive_len(l as u64 - 1) + l
}

/// Trait for reading ω codes.
///
/// This is the trait you should usually pull in scope to read ω codes.
pub trait OmegaRead: BitRead {
    // omega codes are indexed from 1
    fn read_omega(&mut self) -> Result<u64> {
        let mut n = 1;
        loop {
            if !self.peek_bit()? {
                self.read_bit()?;
                return Ok(n - 1);
            }
            if n > 63 {
                return Err(CodecError::Overflow { code: "omega" });
            }
            n = self.read_bits(1 + n as usize)?;
        }
    }
}

/// Trait for writing ω codes.
///
/// This is the trait you should usually pull in scope to write ω codes.
pub trait OmegaWrite: BitWrite {
    fn write_omega(&mut self, n: u64) -> Result<usize> {
        check_range("omega", n, OMEGA_MAX)?;
        // omega codes are indexed from 1
        Ok(recursive_write(n + 1, self)? + self.write_bits(0, 1)?)
    }
}

fn recursive_write<B: BitWrite + ?Sized>(n: u64, writer: &mut B) -> Result<usize> {
    if n <= 1 {
        return Ok(0);
    }
    let l = bit_len(n);
    Ok(recursive_write(l as u64 - 1, writer)? + writer.write_bits(n, l)?)
}

impl<B: BitRead + ?Sized> OmegaRead for B {}
impl<B: BitWrite + ?Sized> OmegaWrite for B {}
