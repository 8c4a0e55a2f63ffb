use crate::{
    lwe::{LweCiphertext, Seed, SeededLweCiphertext},
    parameters::LweDimension,
};
use serde::{Deserialize, Serialize};
use util::{AVec, T32};

/// Encodes `true` as `1/8` and `false` as `-1/8`.
pub(crate) fn encode(m: bool) -> T32 {
    let delta = T32::from_pow2_inv(3);
    if m {
        delta
    } else {
        -delta
    }
}

/// `true` iff the phase lies in `[0, 1/2)`.
pub(crate) fn decode(phase: T32) -> bool {
    !phase.msb()
}

/// Encryption of a single bit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ciphertext {
    pub(crate) lwe_dimension: LweDimension,
    pub(crate) ct: LweCiphertext,
}

impl Ciphertext {
    pub(crate) fn new(ct: LweCiphertext) -> Self {
        Self {
            lwe_dimension: LweDimension(ct.dimension()),
            ct,
        }
    }

    /// Noiseless encryption with a zero mask.
    pub(crate) fn trivial(n: usize, m: bool) -> Self {
        Self::new(LweCiphertext(AVec::zero(n), encode(m)))
    }

    pub fn lwe_dimension(&self) -> LweDimension {
        self.lwe_dimension
    }

    pub fn a(&self) -> &[T32] {
        self.ct.a()
    }

    pub fn b(&self) -> T32 {
        *self.ct.b()
    }
}

/// Encryption of a single bit whose mask is regenerated from a seed.
///
/// Only fresh encryptions can be compressed, a [`Ciphertext`] has no seed to
/// recover its mask from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedCiphertext {
    pub(crate) lwe_dimension: LweDimension,
    pub(crate) ct: SeededLweCiphertext,
}

impl CompressedCiphertext {
    pub fn lwe_dimension(&self) -> LweDimension {
        self.lwe_dimension
    }

    pub fn seed(&self) -> &Seed {
        self.ct.seed()
    }

    pub fn b(&self) -> T32 {
        *self.ct.b()
    }

    pub fn decompress(&self) -> Ciphertext {
        Ciphertext::new(self.ct.expand(self.lwe_dimension.0))
    }
}

impl From<CompressedCiphertext> for Ciphertext {
    fn from(value: CompressedCiphertext) -> Self {
        value.decompress()
    }
}

impl From<&CompressedCiphertext> for Ciphertext {
    fn from(value: &CompressedCiphertext) -> Self {
        value.decompress()
    }
}

#[cfg(test)]
mod test {
    use crate::ciphertext::{decode, encode, Ciphertext};
    use util::T32;

    #[test]
    fn encoding() {
        assert!(decode(encode(true)));
        assert!(!decode(encode(false)));
        assert!(decode(T32::zero()));
        assert!(!decode(T32::from_pow2_inv(1)));
        let trivial = Ciphertext::trivial(4, true);
        assert_eq!(trivial.a(), [T32::zero(); 4]);
        assert_eq!(trivial.b(), T32::from_pow2_inv(3));
    }
}
