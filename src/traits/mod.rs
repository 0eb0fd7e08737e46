/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Traits for bit streams.

[`BitRead`] and [`BitWrite`] are the basic interfaces over which all codes
are implemented, and which are implemented by the bit streams in the
[`impls`](crate::impls) module. Bits are always read and written most
significant first.

*/

mod bit_stream;
pub use bit_stream::*;
