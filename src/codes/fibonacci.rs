/*
 * SPDX-FileCopyrightText: 2024 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Fibonacci code.
//!
//! Every positive integer has a unique representation as a sum of
//! non-consecutive Fibonacci numbers (its *Zeckendorf representation*). The
//! Fibonacci code of `n` is the Zeckendorf representation of `n + 1`, written
//! as a bitmap starting from the smallest Fibonacci number (1, 2, 3, 5, 8, …),
//! followed by an additional one.
//!
//! As a Zeckendorf representation never contains two consecutive ones and
//! always ends with a one, the final `11` is an unambiguous terminator.
//!
//! | Arg | Code     |
//! |-----|---------:|
//! | 0   |       11 |
//! | 1   |      011 |
//! | 2   |     0011 |
//! | 3   |     1011 |
//! | 4   |    00011 |
//! | 5   |    10011 |
//! | 6   |    01011 |
//! | 7   |   000011 |

use crate::error::{check_range, CodecError, Result};
use crate::traits::*;

/// The largest value that can be written with a Fibonacci code.
pub const FIBONACCI_MAX: u64 = u64::MAX - 1;

/// The number of Fibonacci numbers that fit in a `u64`, starting from 1, 2.
const FIB_LEN: usize = 92;

const fn fibonacci_table() -> [u64; FIB_LEN] {
    let mut table = [0; FIB_LEN];
    table[0] = 1;
    table[1] = 2;
    let mut i = 2;
    while i < FIB_LEN {
        table[i] = table[i - 1] + table[i - 2];
        i += 1;
    }
    table
}

/// The Fibonacci numbers 1, 2, 3, 5, … fitting in a `u64`.
pub(crate) const FIBONACCI: [u64; FIB_LEN] = fibonacci_table();

/// Return the index of the largest Fibonacci number not exceeding `x`,
/// which must be positive.
#[inline(always)]
fn highest_index(x: u64) -> usize {
    FIBONACCI.partition_point(|&f| f <= x) - 1
}

/// Return the length of the Fibonacci code for `n`.
#[must_use]
#[inline]
pub fn len_fibonacci(n: u64) -> usize {
    highest_index(n.saturating_add(1)) + 2
}

/// Trait for reading Fibonacci codes.
pub trait FibonacciRead: BitRead {
    fn read_fibonacci(&mut self) -> Result<u64>;
}

/// Trait for writing Fibonacci codes.
pub trait FibonacciWrite: BitWrite {
    fn write_fibonacci(&mut self, n: u64) -> Result<usize>;
}

impl<B: BitRead + ?Sized> FibonacciRead for B {
    fn read_fibonacci(&mut self) -> Result<u64> {
        let mut sum: u64 = 0;
        let mut prev = false;
        for fib in FIBONACCI {
            let bit = self.read_bit()?;
            if bit && prev {
                return Ok(sum - 1);
            }
            if bit {
                sum = sum
                    .checked_add(fib)
                    .ok_or(CodecError::Overflow { code: "Fibonacci" })?;
            }
            prev = bit;
        }
        // The table is exhausted: only the terminator can follow
        if prev && self.read_bit()? {
            return Ok(sum - 1);
        }
        Err(CodecError::Overflow { code: "Fibonacci" })
    }
}

impl<B: BitWrite + ?Sized> FibonacciWrite for B {
    fn write_fibonacci(&mut self, n: u64) -> Result<usize> {
        check_range("Fibonacci", n, FIBONACCI_MAX)?;
        let mut rest = n + 1;
        let top = highest_index(rest);
        // Bit i of the code (from the left) is stored at position top - i,
        // followed by the terminator
        let mut code: u128 = 0;
        for i in (0..=top).rev() {
            if FIBONACCI[i] <= rest {
                rest -= FIBONACCI[i];
                code |= 1 << (top - i);
            }
        }
        debug_assert_eq!(rest, 0);
        let code = (code << 1) | 1;
        let len = top + 2;

        if len > 64 {
            self.write_bits((code >> 64) as u64, len - 64)?;
            self.write_bits(code as u64, 64)?;
        } else {
            self.write_bits(code as u64, len)?;
        }
        Ok(len)
    }
}
