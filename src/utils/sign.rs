/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Bijective mapping between signed and unsigned integers.
//!
//! All codes of this crate are defined on natural numbers. To write a signed
//! integer, it is first mapped to a natural number by [`ToNat`], which folds
//! the sign into the lowest bit: 0, −1, 1, −2, 2, … become 0, 1, 2, 3, 4, ….
//! [`ToInt`] is the inverse mapping. The mapping is a bijection over the
//! whole domain: in particular, the most negative integer is mapped to the
//! largest natural number, and back.

/// Map a signed integer to a natural number.
pub trait ToNat {
    type Nat;
    fn to_nat(self) -> Self::Nat;
}

/// Map a natural number to a signed integer; the inverse of [`ToNat`].
pub trait ToInt {
    type Int;
    fn to_int(self) -> Self::Int;
}

macro_rules! impl_sign_fold {
    ($($int:ty => $nat:ty),*) => {$(
        impl ToNat for $int {
            type Nat = $nat;
            #[inline(always)]
            fn to_nat(self) -> $nat {
                ((self << 1) ^ (self >> (<$int>::BITS - 1))) as $nat
            }
        }

        impl ToInt for $nat {
            type Int = $int;
            #[inline(always)]
            fn to_int(self) -> $int {
                ((self >> 1) as $int) ^ -((self & 1) as $int)
            }
        }
    )*};
}

impl_sign_fold!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, isize => usize);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_order() {
        let expected = [(0_i64, 0_u64), (-1, 1), (1, 2), (-2, 3), (2, 4), (-3, 5)];
        for (int, nat) in expected {
            assert_eq!(int.to_nat(), nat);
            assert_eq!(nat.to_int(), int);
        }
    }

    #[test]
    fn test_extremes() {
        assert_eq!(i64::MAX.to_nat(), u64::MAX - 1);
        assert_eq!(i64::MIN.to_nat(), u64::MAX);
        assert_eq!((i64::MIN + 1).to_nat(), u64::MAX - 2);
        assert_eq!(u64::MAX.to_int(), i64::MIN);
        assert_eq!(i8::MIN.to_nat(), u8::MAX);
        assert_eq!(u8::MAX.to_int(), i8::MIN);
    }

    #[test]
    fn test_bijective_i16() {
        // Small enough to check the whole domain
        for x in i16::MIN..=i16::MAX {
            assert_eq!(x.to_nat().to_int(), x);
        }
        for x in u16::MIN..=u16::MAX {
            assert_eq!(x.to_int().to_nat(), x);
        }
    }
}
