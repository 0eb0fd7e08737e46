/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use intcodes::prelude::*;
use rand::prelude::*;
use rand::rngs::SmallRng;
use std::io::{self, Read, Write};

/// Write a pseudorandom mix of bits, codes and alignments.
fn write_mix<W: BitWrite>(write: &mut W) -> Result<()> {
    let mut r = SmallRng::seed_from_u64(0);
    for _ in 0..10_000 {
        match r.random_range(0..5) {
            0 => {
                let n = r.random_range(0..=64_usize);
                let value = if n == 0 {
                    0
                } else {
                    r.random_range(0..=u64::MAX) >> (64 - n)
                };
                write.write_bits(value, n)?;
            }
            1 => {
                write.write_gamma(r.random_range(0..1000))?;
            }
            2 => {
                write.write_vlq(r.random_range(0..1 << 20))?;
            }
            3 => {
                write.write_fibonacci(r.random_range(0..1000))?;
            }
            4 => {
                write.align()?;
            }
            _ => unreachable!(),
        }
    }
    Ok(())
}

#[test]
fn test_page_size_invariance() -> Result<()> {
    let mut reference = BufBitWriter::new(Vec::new());
    write_mix(&mut reference)?;
    let reference = reference.into_inner()?;

    for page_size in [1, 2, 3, 7, 64, 1000] {
        let mut write = BufBitWriter::with_capacity(Vec::new(), page_size)?;
        write_mix(&mut write)?;
        assert_eq!(write.into_inner()?, reference, "page size {}", page_size);
    }

    // Reading with different page sizes gives the same bits
    for page_size in [1, 5, DEFAULT_PAGE_SIZE] {
        let mut read = BufBitReader::with_capacity(&reference[..], page_size)?;
        let mut words = vec![];
        while let Ok(word) = read.read_bits(61) {
            words.push(word);
        }
        let mut again = BufBitWriter::new(Vec::new());
        for &word in &words {
            again.write_bits(word, 61)?;
        }
        let again = again.into_inner()?;
        assert_eq!(words.len(), reference.len() * 8 / 61);
        // The last byte contains padding
        let full = words.len() * 61 / 8;
        assert_eq!(again[..full], reference[..full]);
    }
    Ok(())
}

#[test]
fn test_eof() -> Result<()> {
    let bytes = [0b1010_0000];
    let mut read = BufBitReader::new(&bytes[..]);
    assert_eq!(read.read_bits(3)?, 0b101);
    assert!(matches!(
        read.read_bits(8),
        Err(CodecError::UnexpectedEof { needed: 3 })
    ));
    // An empty request is always satisfied
    assert_eq!(read.read_bits(0)?, 0);
    assert!(read.peek_bit().unwrap_err().is_eof());
    assert_eq!(read.bit_pos(), 8);

    // A source that ends exactly at a byte boundary
    let bytes = [0xff; 2];
    let mut read = BufBitReader::with_capacity(&bytes[..], 1)?;
    assert_eq!(read.read_bits(16)?, 0xffff);
    assert!(matches!(
        read.read_bits(1),
        Err(CodecError::UnexpectedEof { needed: 1 })
    ));
    Ok(())
}

#[test]
fn test_skip_and_align() -> Result<()> {
    let mut write = BufBitWriter::new(Vec::new());
    write.write_bits(0b1, 1)?;
    assert_eq!(write.align()?, 7);
    write.write_unary(200)?;
    write.write_gamma(42)?;
    let bytes = write.into_inner()?;

    let mut read = BufBitReader::new(&bytes[..]);
    read.skip_bits(1)?;
    assert_eq!(read.align()?, 7);
    assert_eq!(read.align()?, 0);
    read.skip_bits(150)?;
    assert_eq!(read.read_unary()?, 50);
    assert_eq!(read.read_gamma()?, 42);
    assert_eq!(read.bit_pos(), 8 + 201 + len_gamma(42) as u64);
    Ok(())
}

#[test]
fn test_finalization() -> Result<()> {
    let mut bytes = vec![];
    let mut write = BufBitWriter::new(&mut bytes);
    write.write_omega(10)?;
    let padding = write.flush()?;
    assert_eq!(padding as u64, 8 - write.bit_pos() % 8);
    assert_eq!(write.flush()?, 0);
    assert!(write.is_finalized());
    assert!(matches!(write.write_gamma(0), Err(CodecError::Finalized)));
    assert!(matches!(write.flush(), Ok(0)));
    drop(write);
    assert_eq!(bytes.len(), 1);

    let mut read = BufBitReader::new(&bytes[..]);
    assert_eq!(read.read_omega()?, 10);
    read.close();
    assert!(matches!(read.read_omega(), Err(CodecError::Finalized)));
    Ok(())
}

fn write_then_fail(sink: &mut Vec<u8>) -> Result<()> {
    let mut write = BufBitWriter::new(sink);
    write.write_vlq(300)?;
    write.write_gamma(u64::MAX)?;
    unreachable!()
}

#[test]
fn test_drop_flushes() {
    // The writer is finalized even when leaving on an error
    let mut bytes = vec![];
    assert!(write_then_fail(&mut bytes).unwrap_err().is_overflow());
    assert_eq!(bytes, [0b1010_1100, 0b0000_0001]);

    let mut read = BufBitReader::new(&bytes[..]);
    assert_eq!(read.read_vlq().ok(), Some(300));
}

/// A sink accepting a fixed number of bytes, and failing afterwards.
struct ShortSink {
    capacity: usize,
    data: Vec<u8>,
}

impl Write for ShortSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.data.len() + buf.len() > self.capacity {
            return Err(io::Error::other("sink is full"));
        }
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_sink_errors() -> Result<()> {
    let mut sink = ShortSink {
        capacity: 2,
        data: vec![],
    };
    let mut write = BufBitWriter::with_capacity(&mut sink, 2)?;
    write.write_bits(0xabcd, 16)?;
    write.write_bits(0xef, 8)?;
    write.write_bits(0x01, 8)?;
    assert!(matches!(write.write_bits(0, 8), Err(CodecError::Io(_))));
    // After a sink error the stream can be neither continued nor finalized
    assert!(matches!(write.flush(), Err(CodecError::SinkFailed)));
    assert!(matches!(write.flush(), Err(CodecError::SinkFailed)));
    assert!(matches!(
        write.write_gamma(0),
        Err(CodecError::SinkFailed)
    ));
    drop(write);
    assert_eq!(sink.data, [0xab, 0xcd]);

    // A failing finalization is not repeated
    let mut sink = ShortSink {
        capacity: 1,
        data: vec![],
    };
    let mut write = BufBitWriter::new(&mut sink);
    write.write_bits(0xabcd, 16)?;
    assert!(matches!(write.flush(), Err(CodecError::Io(_))));
    assert!(matches!(write.flush(), Err(CodecError::SinkFailed)));
    assert!(matches!(write.into_inner(), Err(e) if e.is_sink_failure()));
    assert!(sink.data.is_empty());

    // Errors while dropping are logged, not propagated
    let mut sink = ShortSink {
        capacity: 0,
        data: vec![],
    };
    let mut write = BufBitWriter::new(&mut sink);
    write.write_bits(1, 1)?;
    drop(write);
    assert!(sink.data.is_empty());
    Ok(())
}

/// A sink accepting at most one byte per call, and failing on the second
/// call only.
struct Stuttering {
    calls: usize,
    data: Vec<u8>,
}

impl Write for Stuttering {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.calls += 1;
        if self.calls == 2 {
            return Err(io::Error::other("transient"));
        }
        self.data.extend_from_slice(&buf[..buf.len().min(1)]);
        Ok(buf.len().min(1))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_partial_page_write() -> Result<()> {
    let mut sink = Stuttering {
        calls: 0,
        data: vec![],
    };
    let mut write = BufBitWriter::with_capacity(&mut sink, 4)?;
    write.write_bits(0x0102_0304, 32)?;
    assert!(matches!(write.write_bits(5, 8), Err(CodecError::Io(_))));
    // The page is never written again
    assert!(matches!(write.flush(), Err(CodecError::SinkFailed)));
    assert!(matches!(
        write.write_bits(5, 8),
        Err(CodecError::SinkFailed)
    ));
    assert!(matches!(write.align(), Err(CodecError::SinkFailed)));
    drop(write);
    assert_eq!(sink.data, [0x01]);
    Ok(())
}

/// A source returning one byte at a time, and interrupted every other call.
struct SlowSource<'a> {
    data: &'a [u8],
    interrupt: bool,
}

impl Read for SlowSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt = !self.interrupt;
        if self.interrupt {
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }
        match self.data.split_first() {
            Some((&byte, rest)) if !buf.is_empty() => {
                buf[0] = byte;
                self.data = rest;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

#[test]
fn test_slow_source() -> Result<()> {
    let mut write = BufBitWriter::new(Vec::new());
    for value in 0..100 {
        write.write_delta(value * value)?;
    }
    let bytes = write.into_inner()?;

    let mut read = BufBitReader::new(SlowSource {
        data: &bytes,
        interrupt: false,
    });
    for value in 0..100 {
        assert_eq!(read.read_delta()?, value * value);
    }
    Ok(())
}

#[test]
fn test_into_inner() -> Result<()> {
    let file = io::Cursor::new(Vec::new());
    let mut write = BufBitWriter::new(file);
    write.write_raw(0x0123_4567_89ab_cdef)?;
    let file = write.into_inner()?;
    assert_eq!(file.position(), 8);

    let mut read = BufBitReader::new(io::Cursor::new(file.into_inner()));
    assert_eq!(read.read_raw()?, 0x0123_4567_89ab_cdef);
    let source = read.into_inner();
    assert_eq!(source.position(), 8);
    Ok(())
}
