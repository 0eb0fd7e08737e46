/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The error type shared by bit streams and codes.

use thiserror::Error;

/// Errors raised by bit streams and by the codes written on them.
///
/// All errors are deterministic and are never recovered internally: a code
/// has no basis for guessing corrected input, so the error is always handed
/// back to the caller.
#[derive(Error, Debug)]
pub enum CodecError {
    /// A value outside the domain of a code was passed to a writer. This is
    /// detected before any bit is written.
    #[error("value {value} is out of range for the {code} code (maximum is {max})")]
    OutOfRange {
        code: &'static str,
        value: u64,
        max: u64,
    },

    /// The bits read so far describe a value that does not fit in 64 bits,
    /// or exceeds the maximum of the code.
    #[error("overflow while decoding a {code} code")]
    Overflow { code: &'static str },

    /// The underlying source ended before the requested bits were available.
    #[error("unexpected end of stream: {needed} more bits were needed")]
    UnexpectedEof { needed: usize },

    /// A construction parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The bit stream has already been finalized.
    #[error("the bit stream has already been finalized")]
    Finalized,

    /// An earlier error of the sink may have left part of a page written,
    /// so the stream cannot be continued or finalized.
    #[error("the bit stream is unusable after an error of the underlying sink")]
    SinkFailed,

    /// A bit count larger than 64 was requested.
    #[error("the number of bits must be in [0..64], but {0} was requested")]
    BitCount(usize),

    /// The value passed to [`write_bits`](crate::traits::BitWrite::write_bits)
    /// has bits set above the requested width.
    #[error("value {value:#x} does not fit in {n} bits")]
    ValueTooWide { value: u64, n: usize },

    /// An error of the underlying byte sink or source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// Return true if this error signals a value that does not fit a code,
    /// either when writing or when reading.
    pub fn is_overflow(&self) -> bool {
        matches!(
            self,
            CodecError::OutOfRange { .. } | CodecError::Overflow { .. }
        )
    }

    /// Return true if this error signals the end of the source.
    pub fn is_eof(&self) -> bool {
        matches!(self, CodecError::UnexpectedEof { .. })
    }

    /// Return true if this error comes from the underlying sink or source,
    /// now or earlier in the life of the stream.
    pub fn is_sink_failure(&self) -> bool {
        matches!(self, CodecError::Io(_) | CodecError::SinkFailed)
    }
}

/// Shortcut for results carrying a [`CodecError`].
pub type Result<T> = core::result::Result<T, CodecError>;

/// Check that `value` lies in `[0..max]`, returning
/// [`CodecError::OutOfRange`] otherwise.
#[inline(always)]
pub(crate) fn check_range(code: &'static str, value: u64, max: u64) -> Result<()> {
    if value > max {
        return Err(CodecError::OutOfRange { code, value, max });
    }
    Ok(())
}
