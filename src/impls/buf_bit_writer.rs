/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::DEFAULT_PAGE_SIZE;
use crate::error::{CodecError, Result};
use crate::traits::*;
use std::io::Write;

/// An implementation of [`BitWrite`] for a byte sink implementing
/// [`std::io::Write`].
///
/// Bits are accumulated, most significant first, in a page of bytes that is
/// written to the sink every time it fills up. The page size is just a
/// batching parameter: the bytes reaching the sink do not depend on it.
///
/// The writer must be finalized, either explicitly with
/// [`flush`](BitWrite::flush) or [`into_inner`](BufBitWriter::into_inner),
/// or implicitly when it is dropped; finalization writes out the last,
/// possibly partial, byte padded with zeros. Errors during an implicit
/// finalization cannot be reported, so explicit finalization is preferable.
///
/// An error of the sink is returned once, as [`CodecError::Io`]; since the
/// sink might have accepted part of the page, every later operation, including
/// finalization, fails with [`CodecError::SinkFailed`].
///
/// To keep ownership of the sink, pass a mutable reference to it.
#[derive(Debug)]
pub struct BufBitWriter<W: Write> {
    /// The sink; it is `None` only while [`into_inner`](BufBitWriter::into_inner)
    /// is giving it back.
    backend: Option<W>,
    /// The page where bits are accumulated. Bits not yet written are zero.
    buffer: Box<[u8]>,
    /// Number of bits of the page already written; it is at most
    /// `8 * buffer.len()`.
    bits_in_buffer: usize,
    /// Number of bits moved to the sink by previous page flushes.
    flushed_bits: u64,
    finalized: bool,
    /// Set when the sink returns an error.
    failed: bool,
}

impl<W: Write> BufBitWriter<W> {
    /// Create a new [`BufBitWriter`] with a page of
    /// [`DEFAULT_PAGE_SIZE`] bytes.
    ///
    /// # Example
    /// ```
    /// use intcodes::prelude::*;
    /// let mut bytes = Vec::new();
    /// let mut writer = BufBitWriter::new(&mut bytes);
    /// writer.write_gamma(4).unwrap();
    /// writer.flush().unwrap();
    /// drop(writer);
    /// assert_eq!(bytes, [0b0010_1000]);
    /// ```
    #[must_use]
    pub fn new(backend: W) -> Self {
        Self::build(backend, DEFAULT_PAGE_SIZE)
    }

    /// Create a new [`BufBitWriter`] with a page of `page_size` bytes.
    ///
    /// # Errors
    /// [`CodecError::InvalidConfig`] if `page_size` is zero.
    pub fn with_capacity(backend: W, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(CodecError::InvalidConfig(
                "the page size of a bit writer must be positive".into(),
            ));
        }
        Ok(Self::build(backend, page_size))
    }

    fn build(backend: W, page_size: usize) -> Self {
        Self {
            backend: Some(backend),
            buffer: vec![0; page_size].into_boxed_slice(),
            bits_in_buffer: 0,
            flushed_bits: 0,
            finalized: false,
            failed: false,
        }
    }

    /// Finalize the stream (if it was not already) and return the sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        log::debug!("releasing the sink after {} bits", self.flushed_bits);
        self.backend.take().ok_or(CodecError::Finalized)
    }

    /// Return whether the stream has been finalized.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    #[inline(always)]
    fn page_bits(&self) -> usize {
        self.buffer.len() * 8
    }

    /// Write to the sink the bytes of the page touched so far, the last one
    /// possibly partial, and clear the page.
    fn flush_page(&mut self) -> Result<()> {
        let bytes = self.bits_in_buffer.div_ceil(8);
        let backend = self.backend.as_mut().ok_or(CodecError::Finalized)?;
        if let Err(e) = backend.write_all(&self.buffer[..bytes]) {
            self.failed = true;
            return Err(e.into());
        }
        log::trace!("flushed {} bytes to the sink", bytes);
        self.buffer[..bytes].fill(0);
        self.flushed_bits += self.bits_in_buffer as u64;
        self.bits_in_buffer = 0;
        Ok(())
    }

    #[inline(always)]
    fn check_open(&self) -> Result<()> {
        if self.failed {
            return Err(CodecError::SinkFailed);
        }
        if self.finalized {
            return Err(CodecError::Finalized);
        }
        Ok(())
    }
}

impl<W: Write> BitWrite for BufBitWriter<W> {
    fn write_bits(&mut self, value: u64, n: usize) -> Result<usize> {
        self.check_open()?;
        if n > 64 {
            return Err(CodecError::BitCount(n));
        }
        if n < 64 && value >> n != 0 {
            return Err(CodecError::ValueTooWide { value, n });
        }

        let mut to_write = n;
        while to_write > 0 {
            if self.bits_in_buffer == self.page_bits() {
                self.flush_page()?;
            }
            let free = 8 - self.bits_in_buffer % 8;
            let step = free.min(to_write);
            to_write -= step;
            let chunk = ((value >> to_write) & ((1 << step) - 1)) as u8;
            self.buffer[self.bits_in_buffer / 8] |= chunk << (free - step);
            self.bits_in_buffer += step;
        }
        Ok(n)
    }

    fn align(&mut self) -> Result<usize> {
        self.check_open()?;
        // Pages are whole bytes, so the position within the page has the
        // same alignment as the position in the stream.
        let padding = (8 - self.bits_in_buffer % 8) % 8;
        self.bits_in_buffer += padding;
        Ok(padding)
    }

    fn flush(&mut self) -> Result<usize> {
        if self.failed {
            return Err(CodecError::SinkFailed);
        }
        if self.finalized {
            return Ok(0);
        }
        // Marking first makes finalization happen at most once, even if the
        // sink fails halfway.
        self.finalized = true;
        let padding = (8 - self.bits_in_buffer % 8) % 8;
        self.flush_page()?;
        if let Some(backend) = self.backend.as_mut() {
            if let Err(e) = backend.flush() {
                self.failed = true;
                return Err(e.into());
            }
        }
        log::debug!(
            "finalized bit writer: {} bits, {} bits of padding",
            self.flushed_bits,
            padding
        );
        Ok(padding)
    }

    #[inline(always)]
    fn bit_pos(&self) -> u64 {
        self.flushed_bits + self.bits_in_buffer as u64
    }
}

impl<W: Write> Drop for BufBitWriter<W> {
    fn drop(&mut self) {
        if self.backend.is_some() && !self.finalized && !self.failed {
            if let Err(e) = self.flush() {
                log::warn!("error while finalizing a dropped bit writer: {}", e);
            }
        }
    }
}
