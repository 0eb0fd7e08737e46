/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::Result;

/// Sequential, streaming bit-by-bit reads.
///
/// This trait specify basic operation over which codes can be implemented by
/// traits such as [`GammaRead`](crate::codes::GammaRead). Bits are read most
/// significant first within each byte of the underlying source.
///
/// All methods return [`CodecError::UnexpectedEof`](crate::error::CodecError::UnexpectedEof)
/// if the source is exhausted before the request can be satisfied.
pub trait BitRead {
    /// Read `n` bits and return them in the lowest bits.
    ///
    /// `n` must be at most 64, and zero is a valid (empty) request.
    fn read_bits(&mut self, n: usize) -> Result<u64>;

    /// Return the next bit without advancing the stream position.
    ///
    /// Codes whose prefix is unary or recursive (e.g., [ω](crate::codes::omega))
    /// need to decide whether another group follows before consuming it.
    fn peek_bit(&mut self) -> Result<bool>;

    /// Read a single bit.
    #[inline(always)]
    fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }

    /// Skip `n` bits from the stream.
    fn skip_bits(&mut self, mut n: u64) -> Result<()> {
        while n > 0 {
            let step = n.min(64);
            self.read_bits(step as usize)?;
            n -= step;
        }
        Ok(())
    }

    /// Read a unary code, that is, count the zeros preceding the next one.
    fn read_unary(&mut self) -> Result<u64> {
        let mut count = 0;
        while !self.read_bit()? {
            count += 1;
        }
        Ok(count)
    }

    /// Discard bits up to the next byte boundary and return how many
    /// bits were discarded.
    fn align(&mut self) -> Result<usize>;

    /// Return the number of bits read (or skipped) so far.
    fn bit_pos(&self) -> u64;
}

/// Sequential, streaming bit-by-bit writes.
///
/// This trait specify basic operation over which codes can be implemented
/// by traits such as [`GammaWrite`](crate::codes::GammaWrite). Bits are
/// written most significant first within each byte of the underlying sink.
pub trait BitWrite {
    /// Write the lowest `n` bits of `value` to the stream and return the number
    /// of bits written, that is, `n`.
    ///
    /// Implementors must check that `n` is at most 64 and that the remaining
    /// bits of `value` are zero, returning an error otherwise.
    fn write_bits(&mut self, value: u64, n: usize) -> Result<usize>;

    /// Write a single bit.
    #[inline(always)]
    fn write_bit(&mut self, bit: bool) -> Result<usize> {
        self.write_bits(bit as u64, 1)
    }

    /// Write `value` as a unary code to the stream and return the number of
    /// bits written, that is, `value` plus one.
    fn write_unary(&mut self, value: u64) -> Result<usize> {
        let mut zeros = value;
        while zeros > 0 {
            let step = zeros.min(64);
            self.write_bits(0, step as usize)?;
            zeros -= step;
        }
        self.write_bits(1, 1)?;
        Ok(value as usize + 1)
    }

    /// Pad with zeros up to the next byte boundary and return the number of
    /// padding bits written.
    fn align(&mut self) -> Result<usize>;

    /// Finalize the stream: write out buffered bits, padding the last byte
    /// with zeros, and flush the sink.
    ///
    /// Calling this method more than once is harmless; later calls do nothing.
    /// Returns the number of padding bits added.
    fn flush(&mut self) -> Result<usize>;

    /// Return the number of bits written so far, including bits written by
    /// [`align`](BitWrite::align) but not the final padding added by
    /// [`flush`](BitWrite::flush).
    fn bit_pos(&self) -> u64;
}
