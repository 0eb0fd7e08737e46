/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Implementations of bit streams.

If you need to read or write bits from a file, a socket, or any other backend
implementing [`std::io::Read`] or [`std::io::Write`] you just need to wrap it
in a [`BufBitReader`] or [`BufBitWriter`], respectively. In-memory data can
be read from a slice and written to a [`Vec<u8>`].

Both implementations use an internal page of bytes to batch operations on
the backend. The size of the page can be chosen at construction time, and
does not change the content of the stream in any way.

The wrappers are generic over the backend, so to keep ownership of it
you can just pass a mutable reference. The writer is finalized when it is
dropped, but finalizing explicitly with [`flush`](crate::traits::BitWrite::flush)
or [`BufBitWriter::into_inner`] makes it possible to see errors.

*/

/// The default size in bytes of the page of [`BufBitReader`] and [`BufBitWriter`].
pub const DEFAULT_PAGE_SIZE: usize = 4096;

mod buf_bit_reader;
pub use buf_bit_reader::BufBitReader;

mod buf_bit_writer;
pub use buf_bit_writer::BufBitWriter;
