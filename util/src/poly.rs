use crate::{
    avec::{
        impl_element_wise_neg, impl_element_wise_op, impl_element_wise_op_assign,
        impl_mul_assign_element, impl_mul_element, AVec,
    },
    torus::T32,
};
use core::{
    borrow::Borrow,
    fmt::{self, Display, Formatter},
    iter::Sum,
    ops::AddAssign,
    slice,
};
use derive_more::{Deref, DerefMut};
use rand::RngCore;
use rand_distr::Distribution;
use serde::{Deserialize, Serialize};
use std::vec;
use zeroize::Zeroize;

pub mod fft;

pub type Rt = NegaCyclicPoly<T32>;

/// Element of `T[X] / (X^n + 1)`.
#[derive(Clone, Debug, PartialEq, Eq, Deref, DerefMut, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NegaCyclicPoly<T>(AVec<T>);

impl<T> NegaCyclicPoly<T> {
    fn new(v: AVec<T>) -> Self {
        assert!(v.len().is_power_of_two());
        Self(v)
    }

    pub fn n(&self) -> usize {
        self.len()
    }

    pub fn sample(n: usize, dist: &impl Distribution<T>, rng: &mut impl RngCore) -> Self {
        Self::new(AVec::sample(n, dist, rng))
    }
}

impl NegaCyclicPoly<T32> {
    pub fn zero(n: usize) -> Self {
        Self::new(AVec::zero(n))
    }

    pub fn constant(n: usize, v: T32) -> Self {
        let mut poly = Self::zero(n);
        poly[0] = v;
        poly
    }

    pub fn sample_uniform(n: usize, rng: &mut impl RngCore) -> Self {
        Self::new(AVec::sample_uniform(n, rng))
    }
}

impl<T: Zeroize> Zeroize for NegaCyclicPoly<T> {
    fn zeroize(&mut self) {
        self.0.zeroize()
    }
}

impl<T: Display> Display for NegaCyclicPoly<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T> From<Vec<T>> for NegaCyclicPoly<T> {
    fn from(value: Vec<T>) -> Self {
        Self::new(value.into())
    }
}

impl<T: Clone> From<&[T]> for NegaCyclicPoly<T> {
    fn from(value: &[T]) -> Self {
        Self::new(value.into())
    }
}

impl<T> From<NegaCyclicPoly<T>> for AVec<T> {
    fn from(value: NegaCyclicPoly<T>) -> Self {
        value.0
    }
}

impl<T> From<AVec<T>> for NegaCyclicPoly<T> {
    fn from(value: AVec<T>) -> Self {
        Self::new(value)
    }
}

impl<T> FromIterator<T> for NegaCyclicPoly<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for NegaCyclicPoly<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a NegaCyclicPoly<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut NegaCyclicPoly<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter_mut()
    }
}

impl<T, Item> Sum<Item> for NegaCyclicPoly<T>
where
    T: Clone + for<'t> AddAssign<&'t T>,
    Item: Borrow<NegaCyclicPoly<T>>,
{
    fn sum<I: Iterator<Item = Item>>(iter: I) -> Self {
        Self(iter.map(|item| item.borrow().0.clone()).sum())
    }
}

impl_element_wise_neg!(
    impl<T> Neg for NegaCyclicPoly<T>,
);
impl_element_wise_op_assign!(
    impl<T> AddAssign<NegaCyclicPoly<T>> for NegaCyclicPoly<T>,
    impl<T> SubAssign<NegaCyclicPoly<T>> for NegaCyclicPoly<T>,
);
impl_element_wise_op!(
    impl<T> Add<NegaCyclicPoly<T>> for NegaCyclicPoly<T>,
    impl<T> Sub<NegaCyclicPoly<T>> for NegaCyclicPoly<T>,
);
impl_mul_assign_element!(
    impl<T> MulAssign<T> for NegaCyclicPoly<T>,
);
impl_mul_element!(
    impl<T> Mul<T> for NegaCyclicPoly<T>,
);
