use crate::{
    ciphertext::Ciphertext,
    client_key::ClientKey,
    engine::BooleanEngine,
    error::{Error, Result},
    ggsw::{Ggsw, GgswCiphertext},
    lwe::{Lwe, LweCiphertext, LweKeySwitchingKey},
    parameters::BooleanParameters,
};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};
use util::NegaCyclicFft;

/// One GGSW encryption of every LWE secret key bit under the GLWE key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrappingKey(pub(crate) Vec<GgswCiphertext>);

impl BootstrappingKey {
    pub fn ggsws(&self) -> &[GgswCiphertext] {
        &self.0
    }
}

/// Evaluation key, safe to hand to the party computing on ciphertexts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServerKey {
    pub(crate) bootstrapping_key: BootstrappingKey,
    pub(crate) key_switching_key: LweKeySwitchingKey,
    pub(crate) params: BooleanParameters,
}

impl ServerKey {
    pub fn new(ck: &ClientKey) -> Result<Self> {
        BooleanEngine::with_thread_local_mut(|engine| Self::new_with_rng(ck, engine.rng()))
            .map_err(|err| Error::key_generation("server key", err))
    }

    pub fn new_with_rng(ck: &ClientKey, rng: &mut (impl RngCore + CryptoRng)) -> Self {
        let params = &ck.params;
        let _span = debug_span!(
            "server_key",
            lwe_dimension = params.n(),
            glwe_dimension = params.k(),
            polynomial_size = params.big_n(),
        )
        .entered();

        let fft = NegaCyclicFft::new(params.big_n());
        let sk_hat = ck.glwe_sk.to_fourier(&fft);
        let pbs_decomposor = params.pbs_decomposor();
        let glwe_noise = params.glwe_noise();
        let bootstrapping_key = BootstrappingKey(
            ck.lwe_sk
                .0
                .iter()
                .map(|s| Ggsw::sk_encrypt(&fft, &pbs_decomposor, &sk_hat, *s, &glwe_noise, rng))
                .collect(),
        );
        debug!(ggsws = bootstrapping_key.0.len(), "generated bootstrapping key");

        let key_switching_key = Lwe::ksk_gen(
            &params.ks_decomposor(),
            ck.glwe_sk.as_lwe_key(),
            &ck.lwe_sk,
            &params.lwe_noise(),
            rng,
        );
        debug!(samples = key_switching_key.0.len(), "generated key switching key");

        Self {
            bootstrapping_key,
            key_switching_key,
            params: *params,
        }
    }

    pub fn parameters(&self) -> &BooleanParameters {
        &self.params
    }

    pub fn bootstrapping_key(&self) -> &BootstrappingKey {
        &self.bootstrapping_key
    }

    pub fn key_switching_key(&self) -> &LweKeySwitchingKey {
        &self.key_switching_key
    }

    /// Homomorphic negation, adds no noise.
    pub fn not(&self, ct: &Ciphertext) -> Ciphertext {
        let LweCiphertext(a, b) = &ct.ct;
        Ciphertext::new(LweCiphertext(-a, -b))
    }

    /// Noiseless encryption of a constant, decryptable by any client key of
    /// the same parameters.
    pub fn trivial_encrypt(&self, m: bool) -> Ciphertext {
        Ciphertext::trivial(self.params.n(), m)
    }
}
