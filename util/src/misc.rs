use crate::izip_eq;
use core::{iter::Sum, ops::Mul};

pub mod decompose;
pub mod distribution;

pub fn bit_reverse<T, V: AsMut<[T]>>(mut values: V) -> V {
    let n = values.as_mut().len();
    if n > 2 {
        assert!(n.is_power_of_two());
        let log_len = n.ilog2();
        for i in 0..n {
            let j = i.reverse_bits() >> (usize::BITS - log_len);
            if i < j {
                values.as_mut().swap(i, j)
            }
        }
    }
    values
}

pub trait Dot<Rhs> {
    type Output;

    fn dot(self, rhs: Rhs) -> Self::Output;
}

impl<'a, L, R, IL, IR> Dot<IR> for IL
where
    IL: IntoIterator<Item = &'a L>,
    IR: IntoIterator<Item = R>,
    L: 'a + Sum,
    for<'t> &'t L: Mul<R, Output = L>,
{
    type Output = L;

    fn dot(self, rhs: IR) -> Self::Output {
        L::sum(izip_eq!(self, rhs).map(|(lhs, rhs)| lhs * rhs))
    }
}

#[macro_export]
macro_rules! izip_eq {
    (@closure $p:pat => $tup:expr) => {
        |$p| $tup
    };
    (@closure $p:pat => ($($tup:tt)*) , $_iter:expr $(, $tail:expr)*) => {
        $crate::izip_eq!(@closure ($p, b) => ($($tup)*, b) $(, $tail)*)
    };
    ($first:expr $(,)*) => {
        itertools::__std_iter::IntoIterator::into_iter($first)
    };
    ($first:expr, $second:expr $(,)*) => {
        itertools::Itertools::zip_eq($crate::izip_eq!($first), $second)
    };
    ($first:expr $(, $rest:expr)* $(,)*) => {{
        let t = $crate::izip_eq!($first);
        $(let t = $crate::izip_eq!(t, $rest);)*
        t.map($crate::izip_eq!(@closure a => (a) $(, $rest)*))
    }};
}

#[cfg(test)]
mod test {
    use crate::{misc::bit_reverse, Dot, T32};

    #[test]
    fn bit_reverse_permutation() {
        assert_eq!(bit_reverse([0, 1, 2, 3, 4, 5, 6, 7]), [0, 4, 2, 6, 1, 5, 3, 7]);
        assert_eq!(bit_reverse([0, 1]), [0, 1]);
    }

    #[test]
    fn dot() {
        let lhs = [1u32, 2, 3].map(T32::from);
        let rhs = [4u32, 5, 6].map(T32::from);
        assert_eq!(lhs.iter().dot(&rhs), T32::from(32u32));
    }
}
