use crate::{
    ciphertext::{encode, Ciphertext},
    client_key::ClientKey,
    engine::BooleanEngine,
    error::{Error, Result},
    lwe::{Lwe, LweCiphertext, MaskGenerator, Seed},
    parameters::BooleanParameters,
};
use core::iter::repeat_with;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug_span;
use util::T32;

/// Number of zero encryptions in a public key of LWE dimension `n`, saturating
/// at `usize::MAX`.
pub fn public_key_size(n: usize) -> usize {
    n.saturating_add(1)
        .saturating_mul(T32::BITS)
        .saturating_add(128)
}

/// Encryptions of zero under the LWE key of a [`ClientKey`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PublicKey {
    pub(crate) zero_encryptions: Vec<LweCiphertext>,
    pub(crate) params: BooleanParameters,
}

impl PublicKey {
    pub fn new(ck: &ClientKey) -> Result<Self> {
        BooleanEngine::with_thread_local_mut(|engine| Self::new_with_rng(ck, engine.rng()))
            .map_err(|err| Error::key_generation("public key", err))
    }

    pub fn new_with_rng(ck: &ClientKey, rng: &mut (impl RngCore + CryptoRng)) -> Self {
        let params = &ck.params;
        let m = public_key_size(params.n());
        let _span = debug_span!("public_key", lwe_dimension = params.n(), m).entered();
        Self {
            zero_encryptions: Lwe::pk_gen(&ck.lwe_sk, m, &params.lwe_noise(), rng),
            params: *params,
        }
    }

    pub fn parameters(&self) -> &BooleanParameters {
        &self.params
    }

    pub fn encrypt(&self, m: bool) -> Result<Ciphertext> {
        BooleanEngine::with_thread_local_mut(|engine| self.encrypt_with_rng(m, engine.rng()))
    }

    pub fn encrypt_with_rng(&self, m: bool, rng: &mut (impl RngCore + CryptoRng)) -> Ciphertext {
        let ct = Lwe::pk_encrypt(self.params.n(), &self.zero_encryptions, encode(m), rng);
        Ciphertext::new(ct)
    }
}

/// [`PublicKey`] storing only the bodies, masks are expanded from one seed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompressedPublicKey {
    pub(crate) seed: Seed,
    pub(crate) bodies: Vec<T32>,
    pub(crate) params: BooleanParameters,
}

impl CompressedPublicKey {
    pub fn new(ck: &ClientKey) -> Result<Self> {
        BooleanEngine::with_thread_local_mut(|engine| Self::new_with_rng(ck, engine.rng()))
            .map_err(|err| Error::key_generation("compressed public key", err))
    }

    pub fn new_with_rng(ck: &ClientKey, rng: &mut (impl RngCore + CryptoRng)) -> Self {
        let params = &ck.params;
        let m = public_key_size(params.n());
        let _span =
            debug_span!("compressed_public_key", lwe_dimension = params.n(), m).entered();
        let mut seed = Seed::default();
        rng.fill_bytes(&mut seed);
        let noise = params.lwe_noise();
        let mut masks = MaskGenerator::new(seed);
        let bodies = repeat_with(|| {
            let a = masks.next_mask(params.n());
            *Lwe::sk_encrypt_with_mask(&ck.lwe_sk, T32::zero(), a, &noise, rng).b()
        })
        .take(m)
        .collect();
        Self {
            seed,
            bodies,
            params: *params,
        }
    }

    pub fn parameters(&self) -> &BooleanParameters {
        &self.params
    }

    fn zero_encryptions(&self) -> impl Iterator<Item = LweCiphertext> + '_ {
        let mut masks = MaskGenerator::new(self.seed);
        let n = self.params.n();
        self.bodies
            .iter()
            .map(move |b| LweCiphertext(masks.next_mask(n), *b))
    }

    pub fn decompress(&self) -> PublicKey {
        PublicKey {
            zero_encryptions: self.zero_encryptions().collect(),
            params: self.params,
        }
    }

    pub fn encrypt(&self, m: bool) -> Result<Ciphertext> {
        BooleanEngine::with_thread_local_mut(|engine| self.encrypt_with_rng(m, engine.rng()))
    }

    /// Encrypts without materializing the expanded key.
    pub fn encrypt_with_rng(&self, m: bool, rng: &mut (impl RngCore + CryptoRng)) -> Ciphertext {
        let ct = Lwe::pk_encrypt(self.params.n(), self.zero_encryptions(), encode(m), rng);
        Ciphertext::new(ct)
    }
}

impl From<CompressedPublicKey> for PublicKey {
    fn from(value: CompressedPublicKey) -> Self {
        value.decompress()
    }
}
