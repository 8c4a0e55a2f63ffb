use crate::{avec::AVec, izip_eq, misc::bit_reverse, poly::Rt, torus::T32};
use core::f64::consts::PI;
use itertools::{izip, Itertools};
use num_complex::Complex64 as C64;

/// Polynomial in the Fourier domain of [`NegaCyclicFft`].
pub type FourierPoly = AVec<C64>;

/// Negacyclic multiplication over `T[X] / (X^n + 1)` with `n / 2` points
/// complex FFT (Formula 8 and 10 in 2021/480).
///
/// Products are exact as long as `n * |a|_inf * |b|_inf < 2^52`, which holds
/// for a torus polynomial times a binary one.
#[derive(Clone, Debug)]
pub struct NegaCyclicFft {
    n: usize,
    twist: Vec<C64>,
    twist_inv: Vec<C64>,
    twiddle_bo: Vec<C64>,
    twiddle_inv_bo: Vec<C64>,
}

impl NegaCyclicFft {
    pub fn new(n: usize) -> Self {
        assert!(n >= 2 && n.is_power_of_two());
        let m = n / 2;
        let twist = (0..m)
            .map(|j| C64::cis((j as f64 * PI) / n as f64))
            .collect_vec();
        let twist_inv = twist.iter().map(C64::conj).collect_vec();
        let twiddle = (0..m)
            .map(|j| C64::cis((j as f64 * PI) / m as f64))
            .collect_vec();
        let twiddle_inv = twiddle.iter().map(C64::conj).collect_vec();
        Self {
            n,
            twist,
            twist_inv,
            twiddle_bo: bit_reverse(twiddle),
            twiddle_inv_bo: bit_reverse(twiddle_inv),
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn forward(&self, a: &[T32]) -> FourierPoly {
        assert_eq!(a.len(), self.n);
        let (lo, hi) = a.split_at(self.n / 2);
        let mut c = izip!(lo, hi, &self.twist)
            .map(|(lo, hi, t)| C64::new(lo.to_i32() as f64, hi.to_i32() as f64) * t)
            .collect_vec();
        fft_in_place(&mut c, &self.twiddle_bo);
        c.into()
    }

    pub fn backward(&self, c: FourierPoly) -> Rt {
        assert_eq!(c.len(), self.n / 2);
        let mut c = Vec::from(c);
        ifft_in_place(&mut c, &self.twiddle_inv_bo);
        let n_inv = 1f64 / c.len() as f64;
        let mut a = Rt::zero(self.n);
        let (lo, hi) = a.split_at_mut(self.n / 2);
        izip!(lo, hi, &self.twist_inv, c).for_each(|(lo, hi, t, c): (_, &mut _, _, _)| {
            let c = c * t * n_inv;
            *lo = f64_to_t32(c.re);
            *hi = f64_to_t32(c.im);
        });
        a
    }

    pub fn mul(&self, a: &[T32], b: &[T32]) -> Rt {
        self.backward(self.forward(a).ew_mul(&self.forward(b)))
    }

    /// Computes `sum(a_i * b_i)` with a single backward transform.
    pub fn inner_product<'a>(
        &self,
        a: impl IntoIterator<Item = &'a FourierPoly>,
        b: impl IntoIterator<Item = &'a FourierPoly>,
    ) -> Rt {
        let mut acc = AVec::from(vec![C64::new(0., 0.); self.n / 2]);
        izip_eq!(a, b).for_each(|(a, b)| {
            izip_eq!(&mut acc, a, b).for_each(|(acc, a, b)| *acc += a * b);
        });
        self.backward(acc)
    }
}

#[inline(always)]
fn f64_to_t32(v: f64) -> T32 {
    T32::from(v.round() as i64)
}

// Given normal order input and bit-reversed order twiddle factors,
// compute bit-reversed order output in place.
fn fft_in_place(a: &mut [C64], twiddle_bo: &[C64]) {
    for layer in (0..a.len().ilog2()).rev() {
        let size = 1 << layer;
        izip!(a.chunks_mut(2 * size), twiddle_bo).for_each(|(values, t)| {
            let (a, b) = values.split_at_mut(size);
            izip!(a, b).for_each(|(a, b)| {
                let tb = *t * *b;
                (*a, *b) = (*a + tb, *a - tb);
            });
        });
    }
}

// Given bit-reversed order input and bit-reversed order twiddle factors,
// compute normal order output in place, without the `1 / n` scaling.
fn ifft_in_place(a: &mut [C64], twiddle_inv_bo: &[C64]) {
    for layer in 0..a.len().ilog2() {
        let size = 1 << layer;
        izip!(a.chunks_mut(2 * size), twiddle_inv_bo).for_each(|(values, t)| {
            let (a, b) = values.split_at_mut(size);
            izip!(a, b).for_each(|(a, b)| {
                (*a, *b) = (*a + *b, (*a - *b) * t);
            });
        });
    }
}

#[cfg(test)]
mod test {
    use crate::{
        misc::distribution::binary,
        poly::{fft::NegaCyclicFft, Rt},
        torus::T32,
    };
    use core::array::from_fn;
    use itertools::izip;
    use rand::thread_rng;

    fn nega_cyclic_schoolbook_mul(a: &Rt, b: &Rt) -> Rt {
        let n = a.n();
        let mut c = Rt::zero(n);
        izip!(0.., a.iter()).for_each(|(i, a)| {
            izip!(0.., b.iter()).for_each(|(j, b)| {
                if i + j < n {
                    c[i + j] += a * b;
                } else {
                    c[i + j - n] -= a * b;
                }
            })
        });
        c
    }

    #[test]
    fn nega_cyclic_mul() {
        let mut rng = thread_rng();
        for log_n in 1..11 {
            let n = 1 << log_n;
            let fft = NegaCyclicFft::new(n);
            for _ in 0..10 {
                let a = Rt::sample_uniform(n, &mut rng);
                let s = Rt::sample(n, &binary(), &mut rng);
                assert_eq!(fft.mul(&a, &s), nega_cyclic_schoolbook_mul(&a, &s));
            }
        }
    }

    #[test]
    fn inner_product() {
        let mut rng = thread_rng();
        let n = 512;
        let fft = NegaCyclicFft::new(n);
        let a: [_; 3] = from_fn(|_| Rt::sample_uniform(n, &mut rng));
        let s: [_; 3] = from_fn(|_| Rt::sample(n, &binary(), &mut rng));
        let a_hat = a.iter().map(|a| fft.forward(a)).collect::<Vec<_>>();
        let s_hat = s.iter().map(|s| fft.forward(s)).collect::<Vec<_>>();
        let expected = izip!(&a, &s)
            .map(|(a, s)| nega_cyclic_schoolbook_mul(a, s))
            .sum::<Rt>();
        assert_eq!(fft.inner_product(&a_hat, &s_hat), expected);
        assert_eq!(
            fft.mul(&Rt::constant(n, T32::one()), &a[0]),
            a[0].clone()
        );
    }
}
