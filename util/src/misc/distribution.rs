use crate::torus::T32;
use rand::distributions::{Distribution, Standard};
use rand_distr::StandardNormal;

pub fn binary() -> impl Distribution<T32> {
    Standard.map(|v: bool| T32::from(v))
}

/// Gaussian noise on the torus, `std_dev` is relative to the torus size.
pub fn tdg(std_dev: f64) -> impl Distribution<T32> {
    StandardNormal.map(move |v: f64| T32::from(v * std_dev))
}

#[cfg(test)]
mod test {
    use crate::{misc::distribution::{binary, tdg}, AVec, T32};
    use rand::thread_rng;

    #[test]
    fn binary_values() {
        let mut rng = thread_rng();
        let v = AVec::sample(1000, binary(), &mut rng);
        assert!(v.iter().all(|v| *v == T32::zero() || *v == T32::one()));
        assert!(v.iter().any(|v| *v == T32::one()));
    }

    #[test]
    fn tdg_spread() {
        let mut rng = thread_rng();
        let std_dev = 1.0 / 1024.0;
        let v = AVec::sample(10000, tdg(std_dev), &mut rng);
        assert!(v.iter().all(|v| v.to_f64().abs() < 8.0 * std_dev));
        let tiny = AVec::sample(100, tdg(1.0e-99), &mut rng);
        assert!(tiny.iter().all(|v| *v == T32::zero()));
    }
}
