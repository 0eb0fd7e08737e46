/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Helpers and statistics.

[`bit_len`] returns the number of bits of the binary representation of an
unsigned integer, and the [`sign`] module maps signed integers to natural
numbers, so that they can be written with any code.

[`CountBitReader`] and [`CountBitWriter`] keep track of the number
of bits read or written to a [`BitRead`](crate::traits::BitRead)
and [`BitWrite`](crate::traits::BitWrite), respectively,
optionally logging the operations performed on the stream.

[`CodesStats`] keeps track of the space needed to store a stream of
integers using different codes.

*/

mod bit_len;
pub use bit_len::bit_len;

pub mod sign;
pub use sign::{ToInt, ToNat};

mod count;
pub use count::*;

pub mod stats;
pub use stats::CodesStats;
