/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 * SPDX-FileCopyrightText: 2024 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Empirical comparison of codes.

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

use crate::codes::*;

/// Keeps track of the space needed to store a stream of integers using
/// different codes.
///
/// This structure can be used to determine empirically which code provides the
/// best compression for a given stream. You have to [update the
/// structure](Self::update) with the integers in the stream; at any time, you
/// can examine the statistics or call [`best_code`](Self::best_code) to get the
/// best code.
///
/// Codes that cannot represent some value of the stream have their space
/// usage set to [`u64::MAX`], and all additions saturate.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize), mem_size(flat))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodesStats {
    /// The total number of elements observed.
    pub total: u64,
    /// The total space used to store the elements if
    /// they were stored using the raw code.
    pub raw: u64,
    /// The total space used to store the elements if
    /// they were stored using a VLQ (either variant).
    pub vlq: u64,
    /// The total space used to store the elements if
    /// they were stored using the gamma code.
    pub gamma: u64,
    /// The total space used to store the elements if
    /// they were stored using the delta code.
    pub delta: u64,
    /// The total space used to store the elements if
    /// they were stored using the omega code.
    pub omega: u64,
    /// The total space used to store the elements if
    /// they were stored using the Fibonacci code.
    pub fibonacci: u64,
    /// The total space used to store the elements if they were stored using
    /// the Thompson α code; position `i` is for width `i + 1`.
    pub thompson_alpha: [u64; THOMPSON_ALPHA_MAX_WIDTH],
}

impl core::default::Default for CodesStats {
    fn default() -> Self {
        Self {
            total: 0,
            raw: 0,
            vlq: 0,
            gamma: 0,
            delta: 0,
            omega: 0,
            fibonacci: 0,
            thompson_alpha: [0; THOMPSON_ALPHA_MAX_WIDTH],
        }
    }
}

/// Return the space used by `count` copies of `n`, or [`u64::MAX`]
/// if `n` is larger than `max`.
#[inline(always)]
fn cost(n: u64, count: u64, max: u64, len: impl FnOnce(u64) -> usize) -> u64 {
    if n > max {
        u64::MAX
    } else {
        (len(n) as u64).saturating_mul(count)
    }
}

impl CodesStats {
    /// Update the stats with the lengths of the codes for `n` and return
    /// `n` for convenience.
    pub fn update(&mut self, n: u64) -> u64 {
        self.update_many(n, 1)
    }

    /// Update the stats as if `n` were observed `count` times, and return
    /// `n` for convenience.
    #[inline]
    pub fn update_many(&mut self, n: u64, count: u64) -> u64 {
        self.total = self.total.saturating_add(count);
        self.raw = self.raw.saturating_add(cost(n, count, RAW_MAX, len_raw));
        self.vlq = self.vlq.saturating_add(cost(n, count, VLQ_MAX, len_vlq));
        self.gamma = self
            .gamma
            .saturating_add(cost(n, count, GAMMA_MAX, len_gamma));
        self.delta = self
            .delta
            .saturating_add(cost(n, count, DELTA_MAX, len_delta));
        self.omega = self
            .omega
            .saturating_add(cost(n, count, OMEGA_MAX, len_omega));
        self.fibonacci = self
            .fibonacci
            .saturating_add(cost(n, count, FIBONACCI_MAX, len_fibonacci));
        for (i, val) in self.thompson_alpha.iter_mut().enumerate() {
            let width = i + 1;
            *val = val.saturating_add(cost(n, count, thompson_alpha_max(width), |n| {
                len_thompson_alpha(n, width)
            }));
        }
        n
    }

    /// Combines additively this stats with another one.
    pub fn add(&mut self, rhs: &Self) {
        self.total = self.total.saturating_add(rhs.total);
        self.raw = self.raw.saturating_add(rhs.raw);
        self.vlq = self.vlq.saturating_add(rhs.vlq);
        self.gamma = self.gamma.saturating_add(rhs.gamma);
        self.delta = self.delta.saturating_add(rhs.delta);
        self.omega = self.omega.saturating_add(rhs.omega);
        self.fibonacci = self.fibonacci.saturating_add(rhs.fibonacci);
        for (a, b) in self.thompson_alpha.iter_mut().zip(rhs.thompson_alpha.iter()) {
            *a = a.saturating_add(*b);
        }
    }

    /// Return the best code for the stream and its space usage.
    ///
    /// In case of ties, the code listed first by [`get_codes`](Self::get_codes)
    /// wins.
    pub fn best_code(&self) -> (Code, u64) {
        // Raw can always be used, so the list is never empty
        self.get_codes()[0]
    }

    /// Returns a vector of all codes and their space usage, in ascending order
    /// by space usage.
    ///
    /// The inverted VLQ is not listed as it has the same length as the VLQ.
    pub fn get_codes(&self) -> Vec<(Code, u64)> {
        let mut codes = vec![
            (Code::Gamma, self.gamma),
            (Code::Delta, self.delta),
            (Code::Omega, self.omega),
            (Code::Fibonacci, self.fibonacci),
            (Code::Vlq, self.vlq),
        ];
        for (i, val) in self.thompson_alpha.iter().enumerate() {
            codes.push((Code::ThompsonAlpha { width: i + 1 }, *val));
        }
        codes.push((Code::Raw, self.raw));
        // sort them by length
        codes.sort_by_key(|&(_, len)| len);
        codes
    }
}

/// Combines additively this stats with another one.
impl core::ops::AddAssign for CodesStats {
    fn add_assign(&mut self, rhs: Self) {
        self.add(&rhs);
    }
}

/// Combines additively this stats with another one creating a new one.
impl core::ops::Add for CodesStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut res = self;
        res += rhs;
        res
    }
}

/// Allow to call .sum() on an iterator of CodesStats.
impl core::iter::Sum for CodesStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |a, b| a + b)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_stats() {
        let mut stats = CodesStats::default();
        for n in 0..100 {
            assert_eq!(stats.update(n), n);
        }
        assert_eq!(stats.total, 100);
        assert_eq!(stats.raw, 6400);
        assert_eq!(stats.vlq, 800);
        assert_eq!(stats.gamma, (0..100).map(|n| len_gamma(n) as u64).sum::<u64>());
        assert_eq!(
            stats.fibonacci,
            (0..100).map(|n| len_fibonacci(n) as u64).sum::<u64>()
        );
        // Width 1 cannot represent 3, width 3 can represent everything
        assert_eq!(stats.thompson_alpha[0], u64::MAX);
        assert_eq!(
            stats.thompson_alpha[2],
            (0..100).map(|n| len_thompson_alpha(n, 3) as u64).sum::<u64>()
        );

        let codes = stats.get_codes();
        assert_eq!(codes.len(), 6 + THOMPSON_ALPHA_MAX_WIDTH);
        assert!(codes.windows(2).all(|w| w[0].1 <= w[1].1));
        assert_eq!(stats.best_code(), codes[0]);
    }

    #[test]
    fn test_best_code() {
        let mut stats = CodesStats::default();
        stats.update_many(0, 1000);
        // γ, δ, ω and Thompson α with width 1 all use one bit, but γ comes first
        assert_eq!(stats.best_code(), (Code::Gamma, 1000));

        let mut stats = CodesStats::default();
        stats.update(u64::MAX);
        assert_eq!(stats.best_code(), (Code::Raw, 64));
        assert_eq!(stats.gamma, u64::MAX);
    }

    #[test]
    fn test_add() {
        let parts: Vec<CodesStats> = (0..4)
            .map(|i| {
                let mut stats = CodesStats::default();
                for n in i * 25..(i + 1) * 25 {
                    stats.update(n);
                }
                stats
            })
            .collect();
        let mut whole = CodesStats::default();
        for n in 0..100 {
            whole.update(n);
        }
        assert_eq!(parts.iter().copied().sum::<CodesStats>(), whole);
        assert_eq!(parts[0] + parts[1] + parts[2] + parts[3], whole);
    }
}
