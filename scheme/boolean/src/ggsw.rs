use crate::glwe::{Glwe, GlweCiphertext};
use core::iter::repeat_with;
use itertools::{izip, Itertools};
use rand::{distributions::Distribution, RngCore};
use serde::{Deserialize, Serialize};
use util::{AVec, Decomposor, FourierPoly, NegaCyclicFft, Rt, T32};

#[derive(Debug)]
pub struct Ggsw;

/// `(k + 1) * d` GLWE rows, the `j`-th row of block `r < k` carries
/// `m * B^-j` on mask `r`, the last block carries it on the body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GgswCiphertext(pub(crate) AVec<GlweCiphertext>);

impl GgswCiphertext {
    pub fn rows(&self) -> &[GlweCiphertext] {
        &self.0
    }
}

impl Ggsw {
    pub fn sk_encrypt(
        fft: &NegaCyclicFft,
        decomposor: &Decomposor,
        sk_hat: &[FourierPoly],
        m: T32,
        noise: &impl Distribution<T32>,
        rng: &mut impl RngCore,
    ) -> GgswCiphertext {
        let (k, d) = (sk_hat.len(), decomposor.d());
        let pt = decomposor.power_up(m).collect_vec();
        let mut ct = repeat_with(|| Glwe::sk_encrypt(fft, sk_hat, Rt::zero(fft.n()), noise, rng))
            .take((k + 1) * d)
            .collect::<AVec<_>>();
        let (c0, c1) = ct.split_at_mut(k * d);
        izip!(0.., c0.chunks_mut(d))
            .for_each(|(r, c0)| izip!(c0, &pt).for_each(|(ct, pt)| ct.0[r][0] += pt));
        izip!(c1, &pt).for_each(|(ct, pt)| ct.1[0] += pt);
        GgswCiphertext(ct)
    }
}
