//! Parameter sets of the boolean scheme.
//!
//! Two presets are provided, [`DEFAULT_PARAMETERS`] which is faster to
//! evaluate on and [`TFHE_LIB_PARAMETERS`] which has a lower failure
//! probability. Custom sets are built with [`BooleanParameters::new`] and are
//! validated as a whole, a rejected set never exists.

use crate::error::{Error, Result};
use core::{fmt, str::FromStr};
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use util::{tdg, Decomposor, T32};

macro_rules! impl_newtype {
    ($($(#[$attr:meta])* $name:ident($inner:ty)),* $(,)?) => {
        $(
            $(#[$attr])*
            #[derive(Clone, Copy, Debug, PartialEq, Display, From, Into, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(pub $inner);
        )*
    };
}

impl_newtype!(
    #[derive(Eq, Hash)]
    LweDimension(usize),
    #[derive(Eq, Hash)]
    GlweDimension(usize),
    #[derive(Eq, Hash)]
    PolynomialSize(usize),
    /// Standard deviation of the noise relative to the torus.
    StandardDev(f64),
    #[derive(Eq, Hash)]
    DecompositionBaseLog(usize),
    #[derive(Eq, Hash)]
    DecompositionLevelCount(usize),
);

/// Noise at or above this standard deviation puts 4 sigma across the `1/8`
/// decryption margin.
const MAX_STD_DEV: f64 = 1. / 32.;

/// Upper bounds on the dimensions, keeping every key and ciphertext size
/// derived from them representable.
pub const MAX_LWE_DIMENSION: usize = 1 << 16;
pub const MAX_GLWE_DIMENSION: usize = 1 << 8;
pub const MAX_POLYNOMIAL_SIZE: usize = 1 << 16;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BooleanParameters {
    lwe_dimension: LweDimension,
    glwe_dimension: GlweDimension,
    polynomial_size: PolynomialSize,
    lwe_modular_std_dev: StandardDev,
    glwe_modular_std_dev: StandardDev,
    pbs_base_log: DecompositionBaseLog,
    pbs_level: DecompositionLevelCount,
    ks_base_log: DecompositionBaseLog,
    ks_level: DecompositionLevelCount,
}

pub const DEFAULT_PARAMETERS: BooleanParameters = BooleanParameters {
    lwe_dimension: LweDimension(722),
    glwe_dimension: GlweDimension(2),
    polynomial_size: PolynomialSize(512),
    lwe_modular_std_dev: StandardDev(0.000013071021089943935),
    glwe_modular_std_dev: StandardDev(0.00000004990272175010415),
    pbs_base_log: DecompositionBaseLog(6),
    pbs_level: DecompositionLevelCount(3),
    ks_base_log: DecompositionBaseLog(3),
    ks_level: DecompositionLevelCount(4),
};

pub const TFHE_LIB_PARAMETERS: BooleanParameters = BooleanParameters {
    lwe_dimension: LweDimension(830),
    glwe_dimension: GlweDimension(2),
    polynomial_size: PolynomialSize(1024),
    lwe_modular_std_dev: StandardDev(0.000001412290588219445),
    glwe_modular_std_dev: StandardDev(0.00000000000000029403601535432533),
    pbs_base_log: DecompositionBaseLog(23),
    pbs_level: DecompositionLevelCount(1),
    ks_base_log: DecompositionBaseLog(5),
    ks_level: DecompositionLevelCount(3),
};

impl BooleanParameters {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        lwe_dimension: LweDimension,
        glwe_dimension: GlweDimension,
        polynomial_size: PolynomialSize,
        lwe_modular_std_dev: StandardDev,
        glwe_modular_std_dev: StandardDev,
        pbs_base_log: DecompositionBaseLog,
        pbs_level: DecompositionLevelCount,
        ks_base_log: DecompositionBaseLog,
        ks_level: DecompositionLevelCount,
    ) -> Result<Self> {
        let params = Self {
            lwe_dimension,
            glwe_dimension,
            polynomial_size,
            lwe_modular_std_dev,
            glwe_modular_std_dev,
            pbs_base_log,
            pbs_level,
            ks_base_log,
            ks_level,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn from_preset(set: ParametersSet) -> Self {
        match set {
            ParametersSet::Default => DEFAULT_PARAMETERS,
            ParametersSet::TfheLib => TFHE_LIB_PARAMETERS,
        }
    }

    /// Checks every constraint on the set, reporting the first offending
    /// field. Parameters obtained through serde should go through this.
    pub fn validate(&self) -> Result<()> {
        check_dimension("lwe_dimension", self.lwe_dimension.0, MAX_LWE_DIMENSION)?;
        check_dimension("glwe_dimension", self.glwe_dimension.0, MAX_GLWE_DIMENSION)?;
        check_dimension("polynomial_size", self.polynomial_size.0, MAX_POLYNOMIAL_SIZE)?;
        if self.polynomial_size.0 < 2 || !self.polynomial_size.0.is_power_of_two() {
            return Err(Error::invalid_parameter(
                "polynomial_size",
                format!("{} is not a power of two >= 2", self.polynomial_size),
            ));
        }
        check_std_dev("lwe_modular_std_dev", self.lwe_modular_std_dev)?;
        check_std_dev("glwe_modular_std_dev", self.glwe_modular_std_dev)?;
        check_decomposition(
            ("pbs_base_log", self.pbs_base_log),
            ("pbs_level", self.pbs_level),
        )?;
        check_decomposition(
            ("ks_base_log", self.ks_base_log),
            ("ks_level", self.ks_level),
        )
    }

    pub fn lwe_dimension(&self) -> LweDimension {
        self.lwe_dimension
    }

    pub fn glwe_dimension(&self) -> GlweDimension {
        self.glwe_dimension
    }

    pub fn polynomial_size(&self) -> PolynomialSize {
        self.polynomial_size
    }

    pub fn lwe_modular_std_dev(&self) -> StandardDev {
        self.lwe_modular_std_dev
    }

    pub fn glwe_modular_std_dev(&self) -> StandardDev {
        self.glwe_modular_std_dev
    }

    pub fn pbs_base_log(&self) -> DecompositionBaseLog {
        self.pbs_base_log
    }

    pub fn pbs_level(&self) -> DecompositionLevelCount {
        self.pbs_level
    }

    pub fn ks_base_log(&self) -> DecompositionBaseLog {
        self.ks_base_log
    }

    pub fn ks_level(&self) -> DecompositionLevelCount {
        self.ks_level
    }

    pub(crate) fn n(&self) -> usize {
        self.lwe_dimension.0
    }

    pub(crate) fn k(&self) -> usize {
        self.glwe_dimension.0
    }

    pub(crate) fn big_n(&self) -> usize {
        self.polynomial_size.0
    }

    pub(crate) fn lwe_noise(&self) -> impl rand::distributions::Distribution<T32> {
        tdg(self.lwe_modular_std_dev.0)
    }

    pub(crate) fn glwe_noise(&self) -> impl rand::distributions::Distribution<T32> {
        tdg(self.glwe_modular_std_dev.0)
    }

    pub(crate) fn pbs_decomposor(&self) -> Decomposor {
        Decomposor::new(self.pbs_base_log.0, self.pbs_level.0)
    }

    pub(crate) fn ks_decomposor(&self) -> Decomposor {
        Decomposor::new(self.ks_base_log.0, self.ks_level.0)
    }
}

fn check_positive(field: &'static str, value: usize) -> Result<()> {
    match value {
        0 => Err(Error::invalid_parameter(field, "must be positive")),
        _ => Ok(()),
    }
}

fn check_dimension(field: &'static str, value: usize, max: usize) -> Result<()> {
    check_positive(field, value)?;
    if value > max {
        return Err(Error::invalid_parameter(field, format!("{value} exceeds {max}")));
    }
    Ok(())
}

fn check_std_dev(field: &'static str, StandardDev(value): StandardDev) -> Result<()> {
    if !value.is_finite() || value <= 0. {
        Err(Error::invalid_parameter(field, format!("{value} is not positive")))
    } else if value >= MAX_STD_DEV {
        Err(Error::invalid_parameter(field, format!("{value} is not below {MAX_STD_DEV}")))
    } else {
        Ok(())
    }
}

fn check_decomposition(
    (base_log_field, DecompositionBaseLog(base_log)): (&'static str, DecompositionBaseLog),
    (level_field, DecompositionLevelCount(level)): (&'static str, DecompositionLevelCount),
) -> Result<()> {
    check_positive(base_log_field, base_log)?;
    check_positive(level_field, level)?;
    if base_log.checked_mul(level).map_or(true, |bits| bits > T32::BITS) {
        return Err(Error::invalid_parameter(
            level_field,
            format!("{base_log} * {level} exceeds the {} bits of the torus", T32::BITS),
        ));
    }
    Ok(())
}

/// Predefined parameter sets, selectable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParametersSet {
    Default,
    TfheLib,
}

impl ParametersSet {
    pub const ALL: [ParametersSet; 2] = [ParametersSet::Default, ParametersSet::TfheLib];
}

impl fmt::Display for ParametersSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParametersSet::Default => write!(f, "default"),
            ParametersSet::TfheLib => write!(f, "tfhe_lib"),
        }
    }
}

impl FromStr for ParametersSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(ParametersSet::Default),
            "tfhe_lib" | "tfhe-lib" => Ok(ParametersSet::TfheLib),
            _ => Err(Error::invalid_parameter(
                "parameters_set",
                format!("unknown preset `{s}`"),
            )),
        }
    }
}

/// Returns the preset parameters of `set`.
pub fn get_parameters(set: ParametersSet) -> BooleanParameters {
    BooleanParameters::from_preset(set)
}

#[cfg(test)]
mod test {
    use crate::{
        client_key::ClientKey,
        error::Error,
        parameters::{
            BooleanParameters, DecompositionBaseLog, DecompositionLevelCount, GlweDimension,
            LweDimension, ParametersSet, PolynomialSize, StandardDev, DEFAULT_PARAMETERS,
            MAX_LWE_DIMENSION, MAX_POLYNOMIAL_SIZE, TFHE_LIB_PARAMETERS,
        },
    };

    #[allow(clippy::too_many_arguments)]
    fn params(
        n: usize,
        k: usize,
        big_n: usize,
        lwe_std_dev: f64,
        glwe_std_dev: f64,
        pbs: (usize, usize),
        ks: (usize, usize),
    ) -> Result<BooleanParameters, Error> {
        BooleanParameters::new(
            LweDimension(n),
            GlweDimension(k),
            PolynomialSize(big_n),
            StandardDev(lwe_std_dev),
            StandardDev(glwe_std_dev),
            DecompositionBaseLog(pbs.0),
            DecompositionLevelCount(pbs.1),
            DecompositionBaseLog(ks.0),
            DecompositionLevelCount(ks.1),
        )
    }

    fn rejected_field(result: Result<BooleanParameters, Error>) -> &'static str {
        match result {
            Err(Error::InvalidParameter { field, .. }) => field,
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn custom() {
        let p = params(10, 1, 1024, 10e-100, 10e-100, (3, 1), (4, 2)).unwrap();
        assert_eq!(p.lwe_dimension(), LweDimension(10));
        assert_eq!(p.glwe_dimension(), GlweDimension(1));
        assert_eq!(p.polynomial_size(), PolynomialSize(1024));
        assert_eq!(p.ks_base_log(), DecompositionBaseLog(4));
        assert_eq!(p.ks_level(), DecompositionLevelCount(2));
    }

    #[test]
    fn validation() {
        let pbs = (3, 1);
        let ks = (4, 2);
        for (result, field) in [
            (params(0, 1, 1024, 1e-9, 1e-9, pbs, ks), "lwe_dimension"),
            (params(usize::MAX, 1, 1024, 1e-9, 1e-9, pbs, ks), "lwe_dimension"),
            (params(10, 0, 1024, 1e-9, 1e-9, pbs, ks), "glwe_dimension"),
            (params(10, 1 << 9, 1024, 1e-9, 1e-9, pbs, ks), "glwe_dimension"),
            (params(10, 1, 1000, 1e-9, 1e-9, pbs, ks), "polynomial_size"),
            (params(10, 1, 1, 1e-9, 1e-9, pbs, ks), "polynomial_size"),
            (params(10, 1, 1 << 17, 1e-9, 1e-9, pbs, ks), "polynomial_size"),
            (params(10, 1, 1024, 0., 1e-9, pbs, ks), "lwe_modular_std_dev"),
            (params(10, 1, 1024, f64::NAN, 1e-9, pbs, ks), "lwe_modular_std_dev"),
            (params(10, 1, 1024, 1e-9, 0.5, pbs, ks), "glwe_modular_std_dev"),
            (params(10, 1, 1024, 1e-9, 1e-9, (0, 1), ks), "pbs_base_log"),
            (params(10, 1, 1024, 1e-9, 1e-9, (3, 0), ks), "pbs_level"),
            (params(10, 1, 1024, 1e-9, 1e-9, pbs, (4, 9)), "ks_level"),
        ] {
            assert_eq!(rejected_field(result), field);
        }
        assert!(params(10, 1, 1024, 1e-9, 1e-9, (32, 1), (4, 8)).is_ok());
        assert!(params(MAX_LWE_DIMENSION, 1, MAX_POLYNOMIAL_SIZE, 1e-9, 1e-9, pbs, ks).is_ok());
    }

    #[test]
    fn oversized_key_generation() {
        let oversized = BooleanParameters {
            lwe_dimension: LweDimension(usize::MAX),
            ..DEFAULT_PARAMETERS
        };
        assert!(matches!(
            ClientKey::new(&oversized),
            Err(Error::InvalidParameter {
                field: "lwe_dimension",
                ..
            })
        ));
    }

    #[test]
    fn presets() {
        for set in ParametersSet::ALL {
            let preset = BooleanParameters::from_preset(set);
            assert!(preset.validate().is_ok());
            assert_eq!(set.to_string().parse::<ParametersSet>(), Ok(set));
        }
        assert_eq!(DEFAULT_PARAMETERS.lwe_dimension(), LweDimension(722));
        assert_eq!(DEFAULT_PARAMETERS.polynomial_size(), PolynomialSize(512));
        assert_eq!(TFHE_LIB_PARAMETERS.lwe_dimension(), LweDimension(830));
        assert_eq!(TFHE_LIB_PARAMETERS.pbs_base_log(), DecompositionBaseLog(23));
        assert!("unknown".parse::<ParametersSet>().is_err());
    }
}
