use crate::{
    ciphertext::{decode, encode, Ciphertext, CompressedCiphertext},
    engine::BooleanEngine,
    error::{Error, Result},
    glwe::{Glwe, GlweSecretKey},
    lwe::{Lwe, LweSecretKey, Seed},
    parameters::{BooleanParameters, LweDimension},
};
use core::fmt::{self, Debug, Formatter};
use rand::{CryptoRng, RngCore};
use tracing::debug_span;

/// Secret keys of the scheme, never leaves the client.
///
/// Both keys are binary and are zeroized on drop.
#[derive(Clone)]
pub struct ClientKey {
    pub(crate) lwe_sk: LweSecretKey,
    pub(crate) glwe_sk: GlweSecretKey,
    pub(crate) params: BooleanParameters,
}

impl Debug for ClientKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientKey")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl ClientKey {
    pub fn new(params: &BooleanParameters) -> Result<Self> {
        BooleanEngine::with_thread_local_mut(|engine| Self::new_with_rng(params, engine.rng()))
            .map_err(|err| Error::key_generation("client key", err))?
    }

    pub fn new_with_rng(
        params: &BooleanParameters,
        rng: &mut (impl RngCore + CryptoRng),
    ) -> Result<Self> {
        params.validate()?;
        let _span = debug_span!(
            "client_key",
            lwe_dimension = params.n(),
            glwe_dimension = params.k(),
            polynomial_size = params.big_n(),
        )
        .entered();
        Ok(Self {
            lwe_sk: Lwe::sk_gen(params.n(), rng),
            glwe_sk: Glwe::sk_gen(params.k(), params.big_n(), rng),
            params: *params,
        })
    }

    pub fn parameters(&self) -> &BooleanParameters {
        &self.params
    }

    pub fn encrypt(&self, m: bool) -> Result<Ciphertext> {
        BooleanEngine::with_thread_local_mut(|engine| self.encrypt_with_rng(m, engine.rng()))
    }

    pub fn encrypt_with_rng(&self, m: bool, rng: &mut (impl RngCore + CryptoRng)) -> Ciphertext {
        let noise = self.params.lwe_noise();
        Ciphertext::new(Lwe::sk_encrypt(&self.lwe_sk, encode(m), &noise, rng))
    }

    pub fn encrypt_compressed(&self, m: bool) -> Result<CompressedCiphertext> {
        BooleanEngine::with_thread_local_mut(|engine| {
            self.encrypt_compressed_with_rng(m, engine.rng())
        })
    }

    /// The seed of the mask is drawn from `rng` as well.
    pub fn encrypt_compressed_with_rng(
        &self,
        m: bool,
        rng: &mut (impl RngCore + CryptoRng),
    ) -> CompressedCiphertext {
        let mut seed = Seed::default();
        rng.fill_bytes(&mut seed);
        let noise = self.params.lwe_noise();
        let ct = Lwe::seeded_sk_encrypt(&self.lwe_sk, encode(m), seed, &noise, rng);
        CompressedCiphertext {
            lwe_dimension: self.params.lwe_dimension(),
            ct,
        }
    }

    /// Decrypts `ct`. A ciphertext of another key with the same dimension
    /// decrypts to an arbitrary bit.
    pub fn decrypt(&self, ct: &Ciphertext) -> Result<bool> {
        let LweDimension(n) = self.params.lwe_dimension();
        if ct.lwe_dimension.0 != n || ct.ct.dimension() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                found: ct.ct.dimension(),
            });
        }
        Ok(decode(Lwe::decrypt(&self.lwe_sk, &ct.ct)))
    }
}

#[cfg(test)]
mod test {
    use crate::{
        client_key::ClientKey,
        error::Error,
        parameters::{BooleanParameters, ParametersSet},
        test::custom_parameters,
    };
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn encrypt_decrypt() {
        let mut rng = StdRng::from_entropy();
        for set in ParametersSet::ALL {
            let params = BooleanParameters::from_preset(set);
            let ck = ClientKey::new_with_rng(&params, &mut rng).unwrap();
            for m in [true, false] {
                for _ in 0..10 {
                    let ct = ck.encrypt_with_rng(m, &mut rng);
                    assert_eq!(ck.decrypt(&ct), Ok(m));
                    assert_eq!(ck.decrypt(&ck.encrypt(m).unwrap()), Ok(m));
                }
            }
        }
    }

    #[test]
    fn compressed() {
        let mut rng = StdRng::from_entropy();
        let ck = ClientKey::new_with_rng(&custom_parameters(), &mut rng).unwrap();
        for m in [true, false] {
            let cct = ck.encrypt_compressed(m).unwrap();
            assert_eq!(cct.decompress(), cct.decompress());
            assert_eq!(ck.decrypt(&cct.decompress()), Ok(m));
            assert_eq!(ck.decrypt(&cct.into()), Ok(m));
        }
    }

    #[test]
    fn dimension_mismatch() {
        let mut rng = StdRng::from_entropy();
        let ck = ClientKey::new_with_rng(&custom_parameters(), &mut rng).unwrap();
        let other =
            ClientKey::new(&BooleanParameters::from_preset(ParametersSet::Default)).unwrap();
        let ct = other.encrypt(true).unwrap();
        assert_eq!(
            ck.decrypt(&ct),
            Err(Error::DimensionMismatch {
                expected: 10,
                found: 722
            })
        );
    }

    #[test]
    fn wrong_key() {
        let mut rng = StdRng::from_entropy();
        let params = BooleanParameters::from_preset(ParametersSet::Default);
        let ck = ClientKey::new_with_rng(&params, &mut rng).unwrap();
        let other = ClientKey::new_with_rng(&params, &mut rng).unwrap();
        for m in [true, false] {
            let ct = ck.encrypt_with_rng(m, &mut rng);
            let bit = other.decrypt(&ct);
            assert!(bit.is_ok());
            assert_eq!(other.decrypt(&ct), bit);
        }
    }

    #[test]
    fn debug_hides_secrets() {
        let ck = ClientKey::new(&custom_parameters()).unwrap();
        let debug = format!("{ck:?}");
        assert!(debug.contains("params"));
        assert!(!debug.contains("lwe_sk"));
    }
}
