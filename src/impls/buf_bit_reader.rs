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
use std::io::{ErrorKind, Read};

/// An implementation of [`BitRead`] for a byte source implementing
/// [`std::io::Read`].
///
/// Bytes are read from the source a page at a time and then consumed bit by
/// bit, most significant first. The page size is just a batching parameter:
/// the bits returned do not depend on it. Note however that the reader might
/// have consumed from the source more bytes than it returned bits for; these
/// bytes are lost when calling [`into_inner`](BufBitReader::into_inner).
///
/// Since [`&[u8]`](slice) implements [`Read`], in-memory data can be read by
/// passing a slice.
#[derive(Debug)]
pub struct BufBitReader<R: Read> {
    /// The source used to fill the page.
    backend: R,
    /// The page of bytes being consumed.
    buffer: Box<[u8]>,
    /// Number of valid bytes in the page.
    filled: usize,
    /// Number of bits of the page already consumed; it is at most `8 * filled`.
    bits_consumed: usize,
    /// Number of bits consumed from previous pages.
    past_bits: u64,
    closed: bool,
}

impl<R: Read> BufBitReader<R> {
    /// Create a new [`BufBitReader`] with a page of
    /// [`DEFAULT_PAGE_SIZE`] bytes.
    ///
    /// # Example
    /// ```
    /// use intcodes::prelude::*;
    /// let bytes = [0b0010_1000];
    /// let mut reader = BufBitReader::new(&bytes[..]);
    /// assert_eq!(reader.read_gamma().unwrap(), 4);
    /// ```
    #[must_use]
    pub fn new(backend: R) -> Self {
        Self::build(backend, DEFAULT_PAGE_SIZE)
    }

    /// Create a new [`BufBitReader`] with a page of `page_size` bytes.
    ///
    /// # Errors
    /// [`CodecError::InvalidConfig`] if `page_size` is zero.
    pub fn with_capacity(backend: R, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(CodecError::InvalidConfig(
                "the page size of a bit reader must be positive".into(),
            ));
        }
        Ok(Self::build(backend, page_size))
    }

    fn build(backend: R, page_size: usize) -> Self {
        Self {
            backend,
            buffer: vec![0; page_size].into_boxed_slice(),
            filled: 0,
            bits_consumed: 0,
            past_bits: 0,
            closed: false,
        }
    }

    /// Finalize the reader: every subsequent read will return
    /// [`CodecError::Finalized`].
    pub fn close(&mut self) {
        if !self.closed {
            log::debug!("closed bit reader after {} bits", self.bit_pos());
        }
        self.closed = true;
    }

    /// Return the source, dropping any byte read ahead.
    pub fn into_inner(self) -> R {
        self.backend
    }

    /// Make at least one bit available in the page, reading from the source
    /// if necessary; return false if the source is exhausted.
    fn fill(&mut self) -> Result<bool> {
        if self.closed {
            return Err(CodecError::Finalized);
        }
        if self.bits_consumed < self.filled * 8 {
            return Ok(true);
        }
        loop {
            match self.backend.read(&mut self.buffer) {
                Ok(0) => return Ok(false),
                Ok(bytes) => {
                    log::trace!("read {} bytes from the source", bytes);
                    self.past_bits += self.bits_consumed as u64;
                    self.filled = bytes;
                    self.bits_consumed = 0;
                    return Ok(true);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    #[inline(always)]
    fn current_byte(&self) -> u8 {
        self.buffer[self.bits_consumed / 8]
    }
}

impl<R: Read> BitRead for BufBitReader<R> {
    fn read_bits(&mut self, n: usize) -> Result<u64> {
        if n > 64 {
            return Err(CodecError::BitCount(n));
        }
        if self.closed {
            return Err(CodecError::Finalized);
        }

        let mut result = 0;
        let mut to_read = n;
        while to_read > 0 {
            if !self.fill()? {
                return Err(CodecError::UnexpectedEof { needed: to_read });
            }
            let available = 8 - self.bits_consumed % 8;
            let step = available.min(to_read);
            let chunk = (self.current_byte() >> (available - step)) as u64 & ((1 << step) - 1);
            result = (result << step) | chunk;
            to_read -= step;
            self.bits_consumed += step;
        }
        Ok(result)
    }

    fn peek_bit(&mut self) -> Result<bool> {
        if !self.fill()? {
            return Err(CodecError::UnexpectedEof { needed: 1 });
        }
        let offset = self.bits_consumed % 8;
        Ok(self.current_byte() & (0x80 >> offset) != 0)
    }

    fn read_unary(&mut self) -> Result<u64> {
        let mut count = 0;
        loop {
            if !self.fill()? {
                return Err(CodecError::UnexpectedEof { needed: 1 });
            }
            let offset = self.bits_consumed % 8;
            let rest = self.current_byte() << offset;
            if rest == 0 {
                count += (8 - offset) as u64;
                self.bits_consumed += 8 - offset;
                continue;
            }
            let zeros = rest.leading_zeros() as usize;
            self.bits_consumed += zeros + 1;
            return Ok(count + zeros as u64);
        }
    }

    fn align(&mut self) -> Result<usize> {
        if self.closed {
            return Err(CodecError::Finalized);
        }
        // Pages contain whole bytes, so this never leaves the page.
        let skip = (8 - self.bits_consumed % 8) % 8;
        self.bits_consumed += skip;
        Ok(skip)
    }

    #[inline(always)]
    fn bit_pos(&self) -> u64 {
        self.past_bits + self.bits_consumed as u64
    }
}
