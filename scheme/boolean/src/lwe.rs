use core::{borrow::Borrow, iter::repeat_with};
use itertools::Itertools;
use rand::{distributions::Distribution, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use util::{binary, AVec, Decomposor, Dot, T32};
use zeroize::Zeroize;

pub type Seed = <ChaCha20Rng as SeedableRng>::Seed;

#[derive(Debug)]
pub struct Lwe;

#[derive(Clone, PartialEq, Eq)]
pub struct LweSecretKey(pub(crate) AVec<T32>);

impl LweSecretKey {
    pub fn dimension(&self) -> usize {
        self.0.len()
    }
}

impl Drop for LweSecretKey {
    fn drop(&mut self) {
        self.0.zeroize()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LweCiphertext(pub(crate) AVec<T32>, pub(crate) T32);

impl LweCiphertext {
    pub fn a(&self) -> &AVec<T32> {
        &self.0
    }

    pub fn b(&self) -> &T32 {
        &self.1
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }
}

/// LWE ciphertext whose mask is replaced by the seed it was expanded from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededLweCiphertext(pub(crate) Seed, pub(crate) T32);

impl SeededLweCiphertext {
    pub fn seed(&self) -> &Seed {
        &self.0
    }

    pub fn b(&self) -> &T32 {
        &self.1
    }

    pub fn expand(&self, n: usize) -> LweCiphertext {
        LweCiphertext(MaskGenerator::new(self.0).next_mask(n), self.1)
    }
}

/// Stream of uniform masks derived from a public seed.
#[derive(Clone, Debug)]
pub struct MaskGenerator(ChaCha20Rng);

impl MaskGenerator {
    pub fn new(seed: Seed) -> Self {
        Self(ChaCha20Rng::from_seed(seed))
    }

    pub fn next_mask(&mut self, n: usize) -> AVec<T32> {
        AVec::sample_uniform(n, &mut self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LweKeySwitchingKey(pub(crate) AVec<LweCiphertext>);

impl LweKeySwitchingKey {
    pub fn a(&self) -> impl Iterator<Item = &AVec<T32>> {
        self.0.iter().map(LweCiphertext::a)
    }

    pub fn b(&self) -> impl Iterator<Item = &T32> {
        self.0.iter().map(LweCiphertext::b)
    }
}

impl Lwe {
    pub fn sk_gen(n: usize, rng: &mut impl RngCore) -> LweSecretKey {
        LweSecretKey(AVec::sample(n, binary(), rng))
    }

    pub fn sk_encrypt(
        sk: &LweSecretKey,
        pt: T32,
        noise: &impl Distribution<T32>,
        rng: &mut impl RngCore,
    ) -> LweCiphertext {
        let a = AVec::sample_uniform(sk.dimension(), rng);
        Lwe::sk_encrypt_with_mask(sk, pt, a, noise, rng)
    }

    pub fn sk_encrypt_with_mask(
        LweSecretKey(sk): &LweSecretKey,
        pt: T32,
        a: AVec<T32>,
        noise: &impl Distribution<T32>,
        rng: &mut impl RngCore,
    ) -> LweCiphertext {
        let e = noise.sample(rng);
        let b = a.dot(sk) + e + pt;
        LweCiphertext(a, b)
    }

    pub fn seeded_sk_encrypt(
        sk: &LweSecretKey,
        pt: T32,
        seed: Seed,
        noise: &impl Distribution<T32>,
        rng: &mut impl RngCore,
    ) -> SeededLweCiphertext {
        let a = MaskGenerator::new(seed).next_mask(sk.dimension());
        let LweCiphertext(_, b) = Lwe::sk_encrypt_with_mask(sk, pt, a, noise, rng);
        SeededLweCiphertext(seed, b)
    }

    /// Returns the phase `b - <a, s>`.
    pub fn decrypt(LweSecretKey(sk): &LweSecretKey, LweCiphertext(a, b): &LweCiphertext) -> T32 {
        b - a.dot(sk)
    }

    /// Encrypts `-s_i * B^-j` of every coefficient of `sk_from` under `sk_to`.
    pub fn ksk_gen<'a>(
        decomposor: &Decomposor,
        sk_from: impl IntoIterator<Item = &'a T32>,
        sk_to: &LweSecretKey,
        noise: &impl Distribution<T32>,
        rng: &mut impl RngCore,
    ) -> LweKeySwitchingKey {
        let pt = sk_from
            .into_iter()
            .flat_map(|s| decomposor.power_up(-s))
            .collect_vec();
        let ksk = pt
            .into_iter()
            .map(|pt| Lwe::sk_encrypt(sk_to, pt, noise, rng))
            .collect();
        LweKeySwitchingKey(ksk)
    }

    pub fn key_switch(
        decomposor: &Decomposor,
        ksk: &LweKeySwitchingKey,
        ct: &LweCiphertext,
    ) -> LweCiphertext {
        let ct_a_limbs = ct.a().iter().flat_map(|a| decomposor.decompose(a)).collect_vec();
        let a = ksk.a().dot(&ct_a_limbs);
        let b = ksk.b().dot(&ct_a_limbs) + ct.b();
        LweCiphertext(a, b)
    }

    /// Public key made of `m` encryptions of zero.
    pub fn pk_gen(
        sk: &LweSecretKey,
        m: usize,
        noise: &impl Distribution<T32>,
        rng: &mut impl RngCore,
    ) -> Vec<LweCiphertext> {
        repeat_with(|| Lwe::sk_encrypt(sk, T32::zero(), noise, rng))
            .take(m)
            .collect()
    }

    /// Adds `pt` to a random binary combination of the zero encryptions.
    pub fn pk_encrypt(
        n: usize,
        pk: impl IntoIterator<Item = impl Borrow<LweCiphertext>>,
        pt: T32,
        rng: &mut impl RngCore,
    ) -> LweCiphertext {
        let mut ct = LweCiphertext(AVec::zero(n), pt);
        pk.into_iter()
            .filter(|_| binary().sample(rng) == T32::one())
            .for_each(|zero| {
                let LweCiphertext(a, b) = zero.borrow();
                ct.0 += a;
                ct.1 += b;
            });
        ct
    }
}
