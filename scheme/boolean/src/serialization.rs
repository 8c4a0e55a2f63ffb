//! Self-describing wire format of the public objects of the scheme.
//!
//! Every buffer starts with an 8 bytes header, the magic `BFHE`, a little
//! endian `u16` format version, a `u8` object kind and a zero `u8`. The body
//! is the bincode encoding of the object with fixed size little endian
//! integers, so serializing the same value twice gives identical bytes.
//!
//! Decoding is all-or-nothing, a value is returned only after the header, the
//! body and the shape of the body are all checked.

use crate::{
    ciphertext::{Ciphertext, CompressedCiphertext},
    error::{DeserializationError, Error, Result},
    parameters::{BooleanParameters, LweDimension, MAX_LWE_DIMENSION},
    public_key::{public_key_size, CompressedPublicKey, PublicKey},
    server_key::ServerKey,
};
use bincode::{ErrorKind, Options};
use core::ops::Deref;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io;
use tracing::{debug, trace};

pub const MAGIC: [u8; 4] = *b"BFHE";
pub const FORMAT_VERSION: u16 = 1;
pub const HEADER_SIZE: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ObjectKind {
    Parameters = 1,
    Ciphertext = 2,
    CompressedCiphertext = 3,
    ServerKey = 4,
    PublicKey = 5,
    CompressedPublicKey = 6,
}

#[derive(Serialize, Deserialize)]
struct Header {
    magic: [u8; 4],
    version: u16,
    kind: u8,
    reserved: u8,
}

/// Owned serialized bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Buffer(Vec<u8>);

impl Buffer {
    pub fn as_view(&self) -> BufferView<'_> {
        BufferView(&self.0)
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for Buffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

/// Borrowed serialized bytes, nothing is copied before decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferView<'a>(&'a [u8]);

impl<'a> BufferView<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self(bytes)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> From<&'a [u8]> for BufferView<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self(value)
    }
}

impl<'a> From<&'a Buffer> for BufferView<'a> {
    fn from(value: &'a Buffer) -> Self {
        value.as_view()
    }
}

pub trait Serializable: Serialize + DeserializeOwned {
    const KIND: ObjectKind;

    /// Checks the lengths and parameters of a freshly decoded value.
    fn check_shape(&self) -> core::result::Result<(), DeserializationError> {
        Ok(())
    }
}

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
}

pub fn serialize<T: Serializable>(value: &T) -> Result<Buffer> {
    let header = Header {
        magic: MAGIC,
        version: FORMAT_VERSION,
        kind: T::KIND as u8,
        reserved: 0,
    };
    let mut bytes = Vec::new();
    options()
        .serialize_into(&mut bytes, &header)
        .and_then(|_| options().serialize_into(&mut bytes, value))
        .map_err(|err| Error::Serialization(err.to_string()))?;
    trace!(kind = ?T::KIND, len = bytes.len(), "serialized");
    Ok(Buffer(bytes))
}

pub fn deserialize<T: Serializable>(view: BufferView<'_>) -> Result<T> {
    decode::<T>(view.0).map_err(|err| {
        debug!(kind = ?T::KIND, len = view.len(), %err, "rejected buffer");
        Error::Deserialization(err)
    })
}

fn decode<T: Serializable>(bytes: &[u8]) -> core::result::Result<T, DeserializationError> {
    if bytes.len() < HEADER_SIZE {
        return Err(DeserializationError::Truncated);
    }
    let (header, mut body) = bytes.split_at(HEADER_SIZE);
    let header: Header = options()
        .deserialize(header)
        .map_err(into_deserialization_error)?;
    if header.magic != MAGIC {
        return Err(DeserializationError::BadMagic);
    }
    if header.version != FORMAT_VERSION {
        return Err(DeserializationError::UnsupportedVersion(header.version));
    }
    if header.kind != T::KIND as u8 {
        return Err(DeserializationError::UnexpectedKind {
            expected: T::KIND as u8,
            found: header.kind,
        });
    }
    if header.reserved != 0 {
        return Err(DeserializationError::Malformed(
            "reserved header byte is not zero".into(),
        ));
    }
    let value: T = options()
        .with_limit(body.len() as u64)
        .allow_trailing_bytes()
        .deserialize_from(&mut body)
        .map_err(into_deserialization_error)?;
    if !body.is_empty() {
        return Err(DeserializationError::TrailingBytes);
    }
    value.check_shape()?;
    Ok(value)
}

fn into_deserialization_error(err: bincode::Error) -> DeserializationError {
    match *err {
        ErrorKind::Io(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
            DeserializationError::Truncated
        }
        ErrorKind::SizeLimit => DeserializationError::Truncated,
        err => DeserializationError::Malformed(err.to_string()),
    }
}

fn check_len(
    field: &'static str,
    expected: usize,
    found: usize,
) -> core::result::Result<(), DeserializationError> {
    if expected == found {
        Ok(())
    } else {
        Err(DeserializationError::SizeMismatch {
            field,
            expected,
            found,
        })
    }
}

fn check_parameters(params: &BooleanParameters) -> core::result::Result<(), DeserializationError> {
    params
        .validate()
        .map_err(|err| DeserializationError::InvalidParameters(err.to_string()))
}

fn check_lwe_dimension(
    LweDimension(n): LweDimension,
) -> core::result::Result<(), DeserializationError> {
    if n == 0 || n > MAX_LWE_DIMENSION {
        return Err(DeserializationError::InvalidParameters(format!(
            "lwe_dimension {n} is outside 1..={MAX_LWE_DIMENSION}"
        )));
    }
    Ok(())
}

fn checked_size(
    field: &'static str,
    factors: impl IntoIterator<Item = usize>,
) -> core::result::Result<usize, DeserializationError> {
    factors
        .into_iter()
        .try_fold(1usize, |acc, factor| acc.checked_mul(factor))
        .ok_or_else(|| DeserializationError::InvalidParameters(format!("{field} overflows")))
}

impl Serializable for BooleanParameters {
    const KIND: ObjectKind = ObjectKind::Parameters;

    fn check_shape(&self) -> core::result::Result<(), DeserializationError> {
        check_parameters(self)
    }
}

impl Serializable for Ciphertext {
    const KIND: ObjectKind = ObjectKind::Ciphertext;

    fn check_shape(&self) -> core::result::Result<(), DeserializationError> {
        check_lwe_dimension(self.lwe_dimension)?;
        check_len("a", self.lwe_dimension.0, self.ct.dimension())
    }
}

impl Serializable for CompressedCiphertext {
    const KIND: ObjectKind = ObjectKind::CompressedCiphertext;

    fn check_shape(&self) -> core::result::Result<(), DeserializationError> {
        check_lwe_dimension(self.lwe_dimension)
    }
}

impl Serializable for ServerKey {
    const KIND: ObjectKind = ObjectKind::ServerKey;

    fn check_shape(&self) -> core::result::Result<(), DeserializationError> {
        let params = &self.params;
        check_parameters(params)?;
        let (n, k, big_n) = (params.n(), params.k(), params.big_n());
        let ggsw_rows = checked_size("ggsw", [k + 1, params.pbs_level().0])?;
        let ksk_len = checked_size("key_switching_key", [k, big_n, params.ks_level().0])?;
        let bsk = self.bootstrapping_key.ggsws();
        check_len("bootstrapping_key", n, bsk.len())?;
        bsk.iter().try_for_each(|ggsw| {
            check_len("ggsw", ggsw_rows, ggsw.rows().len())?;
            ggsw.rows().iter().try_for_each(|glwe| {
                check_len("glwe_mask", k, glwe.a().len())?;
                glwe.a()
                    .iter()
                    .chain([glwe.b()])
                    .try_for_each(|poly| check_len("polynomial", big_n, poly.len()))
            })
        })?;
        let ksk = &self.key_switching_key;
        check_len("key_switching_key", ksk_len, ksk.0.len())?;
        ksk.a().try_for_each(|a| check_len("key_switching_key_mask", n, a.len()))
    }
}

impl Serializable for PublicKey {
    const KIND: ObjectKind = ObjectKind::PublicKey;

    fn check_shape(&self) -> core::result::Result<(), DeserializationError> {
        check_parameters(&self.params)?;
        let n = self.params.n();
        check_len("public_key", public_key_size(n), self.zero_encryptions.len())?;
        self.zero_encryptions
            .iter()
            .try_for_each(|ct| check_len("public_key_mask", n, ct.dimension()))
    }
}

impl Serializable for CompressedPublicKey {
    const KIND: ObjectKind = ObjectKind::CompressedPublicKey;

    fn check_shape(&self) -> core::result::Result<(), DeserializationError> {
        check_parameters(&self.params)?;
        check_len(
            "compressed_public_key",
            public_key_size(self.params.n()),
            self.bodies.len(),
        )
    }
}
