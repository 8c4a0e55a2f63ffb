//! Boolean FHE over the 32 bits discretized torus.
//!
//! A [`ClientKey`] encrypts and decrypts single bits, the [`ServerKey`]
//! derived from it holds the bootstrapping and key switching keys and is meant
//! to be handed to the party evaluating on ciphertexts. Public objects
//! round-trip through [`serialize`] and [`deserialize`].

mod ciphertext;
mod client_key;
mod engine;
mod error;
mod ggsw;
mod glwe;
mod lwe;
mod parameters;
mod public_key;
mod serialization;
mod server_key;

pub use ciphertext::{Ciphertext, CompressedCiphertext};
pub use client_key::ClientKey;
pub use engine::BooleanEngine;
pub use error::{DeserializationError, Error, Result};
pub use ggsw::GgswCiphertext;
pub use glwe::GlweCiphertext;
pub use lwe::{LweCiphertext, LweKeySwitchingKey, Seed};
pub use parameters::{
    get_parameters, BooleanParameters, DecompositionBaseLog, DecompositionLevelCount,
    GlweDimension, LweDimension, ParametersSet, PolynomialSize, StandardDev, DEFAULT_PARAMETERS,
    MAX_GLWE_DIMENSION, MAX_LWE_DIMENSION, MAX_POLYNOMIAL_SIZE, TFHE_LIB_PARAMETERS,
};
pub use public_key::{public_key_size, CompressedPublicKey, PublicKey};
pub use serialization::{
    deserialize, serialize, Buffer, BufferView, ObjectKind, Serializable, FORMAT_VERSION,
    HEADER_SIZE, MAGIC,
};
pub use server_key::{BootstrappingKey, ServerKey};

use rand::{CryptoRng, RngCore};

/// Generates a key pair with [`DEFAULT_PARAMETERS`].
pub fn gen_keys() -> Result<(ClientKey, ServerKey)> {
    gen_keys_with_parameters(&DEFAULT_PARAMETERS)
}

pub fn gen_keys_with_predefined_parameters_set(
    set: ParametersSet,
) -> Result<(ClientKey, ServerKey)> {
    gen_keys_with_parameters(&BooleanParameters::from_preset(set))
}

pub fn gen_keys_with_parameters(params: &BooleanParameters) -> Result<(ClientKey, ServerKey)> {
    BooleanEngine::with_thread_local_mut(|engine| gen_keys_with_rng(params, engine.rng()))
        .map_err(|err| Error::key_generation("key pair", err))?
}

pub fn gen_keys_with_rng(
    params: &BooleanParameters,
    rng: &mut (impl RngCore + CryptoRng),
) -> Result<(ClientKey, ServerKey)> {
    let ck = ClientKey::new_with_rng(params, rng)?;
    let sk = ServerKey::new_with_rng(&ck, rng);
    Ok((ck, sk))
}

#[cfg(test)]
mod test {
    use crate::{
        gen_keys_with_parameters, BooleanParameters, DecompositionBaseLog,
        DecompositionLevelCount, GlweDimension, LweDimension, PolynomialSize, StandardDev,
    };
    use std::thread;

    pub(crate) fn custom_parameters() -> BooleanParameters {
        BooleanParameters::new(
            LweDimension(10),
            GlweDimension(1),
            PolynomialSize(1024),
            StandardDev(10e-100),
            StandardDev(10e-100),
            DecompositionBaseLog(3),
            DecompositionLevelCount(1),
            DecompositionBaseLog(4),
            DecompositionLevelCount(2),
        )
        .unwrap()
    }

    #[test]
    fn concurrent_encryption() {
        let (ck, sk) = gen_keys_with_parameters(&custom_parameters()).unwrap();
        thread::scope(|scope| {
            let handles = (0..4)
                .map(|i| {
                    let (ck, sk) = (&ck, &sk);
                    scope.spawn(move || {
                        (0..32).all(|j| {
                            let m = (i + j) % 2 == 0;
                            let ct = ck.encrypt(m).unwrap();
                            ck.decrypt(&ct) == Ok(m) && ck.decrypt(&sk.not(&ct)) == Ok(!m)
                        })
                    })
                })
                .collect::<Vec<_>>();
            assert!(handles.into_iter().all(|handle| handle.join().unwrap()));
        });
    }
}
