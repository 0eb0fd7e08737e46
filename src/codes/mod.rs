/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Traits for reading and writing instantaneous codes.

This modules contains code for reading and writing instantaneous codes.
Codewords are uniformely indexed from 0 for all codes. For example, the
first few words of [γ](gamma), [δ](delta), [ω](omega) and
[Fibonacci](fibonacci) codes are:

| Arg |    γ    |     δ    |     ω   | Fibonacci |
|-----|--------:|---------:|--------:|----------:|
| 0   |       1 |        1 |       0 |        11 |
| 1   |     010 |     0100 |     100 |       011 |
| 2   |     011 |     0101 |     110 |      0011 |
| 3   |   00100 |    01100 |  101000 |      1011 |
| 4   |   00101 |    01101 |  101010 |     00011 |
| 5   |   00110 |    01110 |  101100 |     10011 |
| 6   |   00111 |    01111 |  101110 |     01011 |
| 7   | 0001000 | 00100000 | 1110000 |    000011 |

Each code is implemented as a pair of traits for reading and writing
(e.g., [`GammaRead`] and [`GammaWrite`]). The traits for reading depend on
[`BitRead`](crate::traits::BitRead), whereas the traits for writing depend on
[`BitWrite`](crate::traits::BitWrite), and both are implemented for every
bit stream. Each code has also a function returning the length in bits of
the code of a value (e.g., [`len_gamma`]), and a constant giving the
largest value it can represent (e.g., [`GAMMA_MAX`]); writing a larger value
is an error, detected before any bit is written.

The [`Code`] enum makes it possible to select a code dynamically.

*/

pub mod raw;
pub use raw::{len_raw, RawRead, RawWrite, RAW_MAX};

pub mod vlq;
pub use vlq::{byte_len_vlq, len_vlq, VlqRead, VlqWrite, VLQ_MAX};

pub mod gamma;
pub use gamma::{len_gamma, GammaRead, GammaWrite, GAMMA_MAX};

pub mod delta;
pub use delta::{len_delta, DeltaRead, DeltaWrite, DELTA_MAX};

pub mod omega;
pub use omega::{len_omega, OmegaRead, OmegaWrite, OMEGA_MAX};

pub mod fibonacci;
pub use fibonacci::{len_fibonacci, FibonacciRead, FibonacciWrite, FIBONACCI_MAX};

pub mod thompson_alpha;
pub use thompson_alpha::{
    check_thompson_alpha_width, len_thompson_alpha, thompson_alpha_max, ThompsonAlphaRead,
    ThompsonAlphaWrite, THOMPSON_ALPHA_MAX_WIDTH,
};

pub mod code;
pub use code::*;
