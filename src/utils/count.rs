/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::Result;
use crate::traits::*;

/// Wrapping struct that keep tracks of written bits. Optionally,
/// logs at debug level information about methods called.
#[derive(Debug)]
pub struct CountBitWriter<BW: BitWrite, const PRINT: bool = false> {
    bit_write: BW,
    /// The number of bits written so far on the underlying [`BitWrite`],
    /// including alignment padding.
    pub bits_written: usize,
}

impl<BW: BitWrite, const PRINT: bool> CountBitWriter<BW, PRINT> {
    pub fn new(bit_write: BW) -> Self {
        Self {
            bit_write,
            bits_written: 0,
        }
    }

    /// Return the wrapped [`BitWrite`].
    pub fn into_inner(self) -> BW {
        self.bit_write
    }
}

impl<BW: BitWrite, const PRINT: bool> BitWrite for CountBitWriter<BW, PRINT> {
    fn write_bits(&mut self, value: u64, n: usize) -> Result<usize> {
        self.bit_write.write_bits(value, n).map(|x| {
            self.bits_written += x;
            if PRINT {
                log::debug!(
                    "write_bits({:#016x}, {}) = {} (total = {})",
                    value,
                    n,
                    x,
                    self.bits_written
                );
            }
            x
        })
    }

    fn write_unary(&mut self, value: u64) -> Result<usize> {
        self.bit_write.write_unary(value).map(|x| {
            self.bits_written += x;
            if PRINT {
                log::debug!(
                    "write_unary({}) = {} (total = {})",
                    value,
                    x,
                    self.bits_written
                );
            }
            x
        })
    }

    fn align(&mut self) -> Result<usize> {
        self.bit_write.align().map(|x| {
            self.bits_written += x;
            if PRINT {
                log::debug!("align() = {} (total = {})", x, self.bits_written);
            }
            x
        })
    }

    fn flush(&mut self) -> Result<usize> {
        self.bit_write.flush()
    }

    fn bit_pos(&self) -> u64 {
        self.bit_write.bit_pos()
    }
}

/// Wrapping struct that keep tracks of read bits. Optionally,
/// logs at debug level information about methods called.
#[derive(Debug)]
pub struct CountBitReader<BR: BitRead, const PRINT: bool = false> {
    bit_read: BR,
    /// The number of bits read (or skipped) so far from the underlying [`BitRead`].
    pub bits_read: usize,
}

impl<BR: BitRead, const PRINT: bool> CountBitReader<BR, PRINT> {
    pub fn new(bit_read: BR) -> Self {
        Self {
            bit_read,
            bits_read: 0,
        }
    }

    /// Return the wrapped [`BitRead`].
    pub fn into_inner(self) -> BR {
        self.bit_read
    }
}

impl<BR: BitRead, const PRINT: bool> BitRead for CountBitReader<BR, PRINT> {
    fn read_bits(&mut self, n: usize) -> Result<u64> {
        self.bit_read.read_bits(n).map(|x| {
            self.bits_read += n;
            if PRINT {
                log::debug!(
                    "read_bits({}) = {:#016x} (total = {})",
                    n,
                    x,
                    self.bits_read
                );
            }
            x
        })
    }

    fn peek_bit(&mut self) -> Result<bool> {
        self.bit_read.peek_bit()
    }

    fn read_unary(&mut self) -> Result<u64> {
        self.bit_read.read_unary().map(|x| {
            self.bits_read += x as usize + 1;
            if PRINT {
                log::debug!("read_unary() = {} (total = {})", x, self.bits_read);
            }
            x
        })
    }

    fn skip_bits(&mut self, n: u64) -> Result<()> {
        self.bit_read.skip_bits(n)?;
        self.bits_read += n as usize;
        if PRINT {
            log::debug!("skip_bits({}) (total = {})", n, self.bits_read);
        }
        Ok(())
    }

    fn align(&mut self) -> Result<usize> {
        self.bit_read.align().map(|x| {
            self.bits_read += x;
            if PRINT {
                log::debug!("align() = {} (total = {})", x, self.bits_read);
            }
            x
        })
    }

    fn bit_pos(&self) -> u64 {
        self.bit_read.bit_pos()
    }
}

#[cfg(test)]
#[test]
fn test_count() -> Result<()> {
    use crate::prelude::*;
    let mut buffer = Vec::new();
    let bit_write = BufBitWriter::new(&mut buffer);
    let mut count_bit_write = CountBitWriter::<_, true>::new(bit_write);

    count_bit_write.write_unary(5)?;
    assert_eq!(count_bit_write.bits_written, 6);
    count_bit_write.write_unary(100)?;
    assert_eq!(count_bit_write.bits_written, 107);
    count_bit_write.write_bits(1, 20)?;
    assert_eq!(count_bit_write.bits_written, 127);
    count_bit_write.write_bits(1, 33)?;
    assert_eq!(count_bit_write.bits_written, 160);
    count_bit_write.write_gamma(6)?;
    assert_eq!(count_bit_write.bits_written, 165);
    assert_eq!(count_bit_write.align()?, 3);
    assert_eq!(count_bit_write.bits_written, 168);
    assert_eq!(count_bit_write.bit_pos(), 168);
    count_bit_write.flush()?;
    drop(count_bit_write);

    let bit_read = BufBitReader::new(&buffer[..]);
    let mut count_bit_read = CountBitReader::<_, true>::new(bit_read);

    assert!(!count_bit_read.peek_bit()?);
    assert_eq!(count_bit_read.read_unary()?, 5);
    assert_eq!(count_bit_read.bits_read, 6);
    assert_eq!(count_bit_read.read_unary()?, 100);
    assert_eq!(count_bit_read.bits_read, 107);
    assert_eq!(count_bit_read.read_bits(20)?, 1);
    assert_eq!(count_bit_read.bits_read, 127);
    count_bit_read.skip_bits(33)?;
    assert_eq!(count_bit_read.bits_read, 160);
    assert_eq!(count_bit_read.read_gamma()?, 6);
    assert_eq!(count_bit_read.align()?, 3);
    assert_eq!(count_bit_read.bits_read, 168);
    assert_eq!(count_bit_read.bit_pos(), 168);

    Ok(())
}
