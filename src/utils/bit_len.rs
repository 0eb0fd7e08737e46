/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use num_traits::{PrimInt, Unsigned};

/// Return the number of bits needed to represent `x`, that is, the position
/// of its most significant one plus one.
///
/// By convention, `bit_len(0)` is zero.
///
/// # Examples
/// ```
/// use intcodes::utils::bit_len;
/// assert_eq!(bit_len(0_u64), 0);
/// assert_eq!(bit_len(1_u64), 1);
/// assert_eq!(bit_len(255_u8), 8);
/// assert_eq!(bit_len(u64::MAX), 64);
/// ```
#[must_use]
#[inline(always)]
pub fn bit_len<T: PrimInt + Unsigned>(x: T) -> usize {
    (T::zero().count_zeros() - x.leading_zeros()) as usize
}
