use core::iter::repeat_with;
use itertools::Itertools;
use rand::{distributions::Distribution, RngCore};
use serde::{Deserialize, Serialize};
use util::{binary, AVec, FourierPoly, NegaCyclicFft, Rt, T32};
use zeroize::Zeroize;

#[derive(Debug)]
pub struct Glwe;

#[derive(Clone, PartialEq, Eq)]
pub struct GlweSecretKey(pub(crate) Vec<Rt>);

impl GlweSecretKey {
    /// Coefficients of the key seen as an LWE key of dimension `k * N`.
    pub fn as_lwe_key(&self) -> impl Iterator<Item = &T32> {
        self.0.iter().flatten()
    }

    pub fn to_fourier(&self, fft: &NegaCyclicFft) -> Vec<FourierPoly> {
        self.0.iter().map(|s| fft.forward(s)).collect()
    }
}

impl Drop for GlweSecretKey {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(Zeroize::zeroize)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlweCiphertext(pub(crate) AVec<Rt>, pub(crate) Rt);

impl GlweCiphertext {
    pub fn a(&self) -> &AVec<Rt> {
        &self.0
    }

    pub fn b(&self) -> &Rt {
        &self.1
    }
}

impl Glwe {
    pub fn sk_gen(k: usize, n: usize, rng: &mut impl RngCore) -> GlweSecretKey {
        GlweSecretKey(repeat_with(|| Rt::sample(n, &binary(), rng)).take(k).collect())
    }

    /// Encrypts `pt` under the secret key in Fourier domain `sk_hat`.
    pub fn sk_encrypt(
        fft: &NegaCyclicFft,
        sk_hat: &[FourierPoly],
        pt: Rt,
        noise: &impl Distribution<T32>,
        rng: &mut impl RngCore,
    ) -> GlweCiphertext {
        let a = repeat_with(|| Rt::sample_uniform(fft.n(), rng))
            .take(sk_hat.len())
            .collect::<AVec<_>>();
        let a_hat = a.iter().map(|a| fft.forward(a)).collect_vec();
        let e = Rt::sample(fft.n(), noise, rng);
        let b = fft.inner_product(&a_hat, sk_hat) + e + pt;
        GlweCiphertext(a, b)
    }

    /// Returns the phase `b - sum(a_i * s_i)`.
    pub fn decrypt(
        fft: &NegaCyclicFft,
        sk_hat: &[FourierPoly],
        GlweCiphertext(a, b): &GlweCiphertext,
    ) -> Rt {
        let a_hat = a.iter().map(|a| fft.forward(a)).collect_vec();
        b - fft.inner_product(&a_hat, sk_hat)
    }
}

#[cfg(test)]
mod test {
    use crate::glwe::Glwe;
    use itertools::izip;
    use rand::thread_rng;
    use util::{tdg, NegaCyclicFft, Rt};

    #[test]
    fn encrypt_decrypt() {
        let mut rng = thread_rng();
        let (k, n, std_dev) = (2, 512, 1.0e-8);
        let noise = tdg(std_dev);
        let fft = NegaCyclicFft::new(n);
        let sk = Glwe::sk_gen(k, n, &mut rng);
        let sk_hat = sk.to_fourier(&fft);
        assert_eq!(sk.as_lwe_key().count(), k * n);
        for _ in 0..10 {
            let pt = Rt::sample_uniform(n, &mut rng);
            let ct = Glwe::sk_encrypt(&fft, &sk_hat, pt.clone(), &noise, &mut rng);
            let phase = Glwe::decrypt(&fft, &sk_hat, &ct);
            izip!(&phase, &pt).for_each(|(phase, pt)| {
                assert!((phase - pt).to_f64().abs() < 8.0 * std_dev);
            });
        }
    }
}
