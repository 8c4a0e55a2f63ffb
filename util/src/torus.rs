use core::{
    borrow::Borrow,
    iter::Sum,
    ops::{AddAssign, MulAssign, Neg, SubAssign},
};
use derive_more::Display;
use num_traits::Zero;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Element of the discretized torus `T_q` with `q = 2^32`, arithmetic wraps.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[display(fmt = "{}", _0)]
#[serde(transparent)]
pub struct T32(u32);

impl T32 {
    pub const BITS: usize = u32::BITS as usize;

    pub fn zero() -> Self {
        Self(0)
    }

    pub fn one() -> Self {
        Self(1)
    }

    pub fn sample_uniform(rng: &mut impl RngCore) -> Self {
        Self(rng.next_u32())
    }

    /// Returns `1 / 2^log_inv`, e.g. `log_inv = 3` gives the torus point `1/8`.
    pub fn from_pow2_inv(log_inv: usize) -> Self {
        assert!(log_inv > 0 && log_inv <= Self::BITS);
        Self(1 << (Self::BITS - log_inv))
    }

    /// Centered value of the torus element in `[-1/2, 1/2)`.
    pub fn to_f64(&self) -> f64 {
        self.to_i32() as f64 / (1u64 << Self::BITS) as f64
    }

    /// Most significant bit, i.e. whether the element lies in `[1/2, 1)`.
    pub fn msb(&self) -> bool {
        self.0 >> (Self::BITS - 1) == 1
    }
}

/// Interprets the value as a real number and reduces it onto the torus.
impl From<f64> for T32 {
    #[inline(always)]
    fn from(value: f64) -> Self {
        let scaled = (value.fract() * (1u64 << Self::BITS) as f64).round();
        Self(scaled as i64 as u32)
    }
}

impl From<&T32> for f64 {
    #[inline(always)]
    fn from(value: &T32) -> Self {
        value.to_f64()
    }
}

impl Neg for &T32 {
    type Output = T32;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        T32(self.0.wrapping_neg())
    }
}

impl Neg for T32 {
    type Output = T32;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        -&self
    }
}

impl AddAssign<&T32> for T32 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: &T32) {
        self.0 = self.0.wrapping_add(rhs.0);
    }
}

impl SubAssign<&T32> for T32 {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: &T32) {
        self.0 = self.0.wrapping_sub(rhs.0);
    }
}

impl MulAssign<&T32> for T32 {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: &T32) {
        self.0 = self.0.wrapping_mul(rhs.0);
    }
}

impl<T: Borrow<T32>> Sum<T> for T32 {
    fn sum<I: Iterator<Item = T>>(iter: I) -> Self {
        iter.fold(T32::zero(), |acc, item| acc + item.borrow())
    }
}

impl Zero for T32 {
    fn zero() -> Self {
        T32(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Zeroize for T32 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

macro_rules! impl_op_by_op_assign_ref {
    ($(impl $trait:ident<$rhs:ty> for T32),* $(,)?) => {
        $(
            paste::paste! {
                impl core::ops::[<$trait Assign>]<$rhs> for T32 {
                    #[inline(always)]
                    fn [<$trait:lower _assign>](&mut self, rhs: $rhs) {
                        self.[<$trait:lower _assign>](&rhs);
                    }
                }

                impl core::ops::$trait<$rhs> for T32 {
                    type Output = T32;

                    #[inline(always)]
                    fn [<$trait:lower>](mut self, rhs: $rhs) -> T32 {
                        self.[<$trait:lower _assign>](&rhs);
                        self
                    }
                }

                impl core::ops::$trait<&$rhs> for T32 {
                    type Output = T32;

                    #[inline(always)]
                    fn [<$trait:lower>](mut self, rhs: &$rhs) -> T32 {
                        self.[<$trait:lower _assign>](rhs);
                        self
                    }
                }

                impl core::ops::$trait<$rhs> for &T32 {
                    type Output = T32;

                    #[inline(always)]
                    fn [<$trait:lower>](self, rhs: $rhs) -> T32 {
                        let mut lhs = *self;
                        lhs.[<$trait:lower _assign>](&rhs);
                        lhs
                    }
                }

                impl core::ops::$trait<&$rhs> for &T32 {
                    type Output = T32;

                    #[inline(always)]
                    fn [<$trait:lower>](self, rhs: &$rhs) -> T32 {
                        let mut lhs = *self;
                        lhs.[<$trait:lower _assign>](rhs);
                        lhs
                    }
                }
            }
        )*
    };
}

impl_op_by_op_assign_ref!(
    impl Add<T32> for T32,
    impl Sub<T32> for T32,
    impl Mul<T32> for T32,
);

macro_rules! impl_from_to_primitive {
    (@ $p:ty) => {
        impl From<$p> for T32 {
            #[inline(always)]
            fn from(value: $p) -> Self {
                T32(value as _)
            }
        }

        impl From<T32> for $p {
            #[inline(always)]
            fn from(value: T32) -> Self {
                value.0 as _
            }
        }

        paste::paste! {
            impl T32 {
                #[inline(always)]
                pub fn [<to_ $p>](self) -> $p {
                    self.into()
                }
            }
        }
    };
    ($($p:ty),* $(,)?) => {
        $(impl_from_to_primitive!(@ $p);)*
    }
}

impl_from_to_primitive!(u32, i32, u64, i64, u8);

impl From<bool> for T32 {
    #[inline(always)]
    fn from(value: bool) -> Self {
        T32(value as u32)
    }
}
