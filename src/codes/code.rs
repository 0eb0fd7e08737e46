/*
 * SPDX-FileCopyrightText: 2024 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! A module for selecting the code to use dynamically.
//!
//! [`Code`] is an enum with all the supported codes, and their parameters,
//! that can be used to test different codes in a generic way, or to store
//! the choice of a code in a configuration.
//!
//! [`CodeRead`], [`CodeWrite`] and [`CodeLen`] are the traits [`Code`]
//! implements to read, write and measure values on any bit stream.

use super::*;
use crate::error::{CodecError, Result};
use crate::traits::*;
use crate::utils::{ToInt, ToNat};
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// Something that can decode a value from any bit stream.
pub trait CodeRead {
    /// Read a value.
    fn read<CR: BitRead + ?Sized>(&self, reader: &mut CR) -> Result<u64>;

    /// Read a signed value, folded as described in
    /// [`sign`](crate::utils::sign).
    #[inline]
    fn read_signed<CR: BitRead + ?Sized>(&self, reader: &mut CR) -> Result<i64> {
        Ok(self.read(reader)?.to_int())
    }
}

/// Something that can encode a value to any bit stream.
pub trait CodeWrite {
    /// Write a value and return the number of bits written.
    fn write<CW: BitWrite + ?Sized>(&self, writer: &mut CW, value: u64) -> Result<usize>;

    /// Write a signed value, folded as described in
    /// [`sign`](crate::utils::sign).
    ///
    /// Note that [`i64::MIN`] is folded into [`u64::MAX`], which only
    /// [`Code::Raw`] can represent.
    #[inline]
    fn write_signed<CW: BitWrite + ?Sized>(&self, writer: &mut CW, value: i64) -> Result<usize> {
        self.write(writer, value.to_nat())
    }
}

/// Something that can compute the length of a value encoded with a code.
pub trait CodeLen {
    /// Compute how many bits it takes to encode a value with this code.
    fn len(&self, value: u64) -> usize;
}

/// An enum of all the codes supported by this library, with their parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize), mem_size(flat))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum Code {
    Raw,
    Vlq,
    InvertedVlq,
    Gamma,
    Delta,
    Omega,
    Fibonacci,
    /// A Thompson α code with a length field of `width` bits. Reads and
    /// writes fail with [`CodecError::InvalidConfig`], and
    /// [`max_value`](Code::max_value) is zero, if the width is not valid;
    /// use [`Code::thompson_alpha`] to check it at construction.
    ThompsonAlpha { width: usize },
}

impl Code {
    /// All parameterless codes.
    pub const FIXED: [Code; 7] = [
        Code::Raw,
        Code::Vlq,
        Code::InvertedVlq,
        Code::Gamma,
        Code::Delta,
        Code::Omega,
        Code::Fibonacci,
    ];

    /// Return a Thompson α code with a length field of `width` bits.
    ///
    /// # Errors
    /// [`CodecError::InvalidConfig`] if `width` is not in
    /// `[1..THOMPSON_ALPHA_MAX_WIDTH]`.
    pub fn thompson_alpha(width: usize) -> Result<Self> {
        check_thompson_alpha_width(width)?;
        Ok(Code::ThompsonAlpha { width })
    }

    /// Return the smallest value that can be written with this code.
    #[must_use]
    pub const fn min_value(&self) -> u64 {
        0
    }

    /// Return the largest value that can be written with this code.
    #[must_use]
    pub const fn max_value(&self) -> u64 {
        match self {
            Code::Raw => RAW_MAX,
            Code::Vlq | Code::InvertedVlq => VLQ_MAX,
            Code::Gamma => GAMMA_MAX,
            Code::Delta => DELTA_MAX,
            Code::Omega => OMEGA_MAX,
            Code::Fibonacci => FIBONACCI_MAX,
            Code::ThompsonAlpha { width } => thompson_alpha_max(*width),
        }
    }
}

impl CodeRead for Code {
    #[inline]
    fn read<CR: BitRead + ?Sized>(&self, reader: &mut CR) -> Result<u64> {
        match self {
            Code::Raw => reader.read_raw(),
            Code::Vlq => reader.read_vlq(),
            Code::InvertedVlq => reader.read_inverted_vlq(),
            Code::Gamma => reader.read_gamma(),
            Code::Delta => reader.read_delta(),
            Code::Omega => reader.read_omega(),
            Code::Fibonacci => reader.read_fibonacci(),
            Code::ThompsonAlpha { width } => reader.read_thompson_alpha(*width),
        }
    }
}

impl CodeWrite for Code {
    #[inline]
    fn write<CW: BitWrite + ?Sized>(&self, writer: &mut CW, value: u64) -> Result<usize> {
        match self {
            Code::Raw => writer.write_raw(value),
            Code::Vlq => writer.write_vlq(value),
            Code::InvertedVlq => writer.write_inverted_vlq(value),
            Code::Gamma => writer.write_gamma(value),
            Code::Delta => writer.write_delta(value),
            Code::Omega => writer.write_omega(value),
            Code::Fibonacci => writer.write_fibonacci(value),
            Code::ThompsonAlpha { width } => writer.write_thompson_alpha(value, *width),
        }
    }
}

impl CodeLen for Code {
    #[inline]
    fn len(&self, value: u64) -> usize {
        match self {
            Code::Raw => len_raw(value),
            Code::Vlq | Code::InvertedVlq => len_vlq(value),
            Code::Gamma => len_gamma(value),
            Code::Delta => len_delta(value),
            Code::Omega => len_omega(value),
            Code::Fibonacci => len_fibonacci(value),
            Code::ThompsonAlpha { width } => len_thompson_alpha(value, *width),
        }
    }
}

impl core::fmt::Display for Code {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Code::Raw => write!(f, "Raw"),
            Code::Vlq => write!(f, "Vlq"),
            Code::InvertedVlq => write!(f, "InvertedVlq"),
            Code::Gamma => write!(f, "Gamma"),
            Code::Delta => write!(f, "Delta"),
            Code::Omega => write!(f, "Omega"),
            Code::Fibonacci => write!(f, "Fibonacci"),
            Code::ThompsonAlpha { width } => write!(f, "ThompsonAlpha({})", width),
        }
    }
}

impl std::str::FromStr for Code {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        let unknown = || CodecError::InvalidConfig(format!("could not parse code {:?}", s));
        if let Some(code) = Code::FIXED.into_iter().find(|code| code.to_string() == s) {
            return Ok(code);
        }
        let width = s
            .strip_prefix("ThompsonAlpha(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(unknown)?
            .trim()
            .parse()
            .map_err(|_| unknown())?;
        Code::thompson_alpha(width)
    }
}

/// Codes are serialized by name, as in their [`Display`](core::fmt::Display)
/// implementation, so deserialization checks parameters.
impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.to_string()
    }
}

impl TryFrom<String> for Code {
    type Error = CodecError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}
