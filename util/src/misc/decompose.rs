use crate::torus::T32;

/// Signed gadget decomposition of torus elements in base `2^log_b` with `d`
/// levels, rounding away the `32 - log_b * d` least significant bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decomposor {
    log_b: usize,
    d: usize,
}

impl Decomposor {
    pub fn new(log_b: usize, d: usize) -> Self {
        assert!(log_b > 0 && d > 0 && log_b * d <= T32::BITS);
        Self { log_b, d }
    }

    pub fn log_b(&self) -> usize {
        self.log_b
    }

    pub fn d(&self) -> usize {
        self.d
    }

    fn rounding_bits(&self) -> usize {
        T32::BITS - self.log_b * self.d
    }

    /// Gadget vector `(1 / B, 1 / B^2, ..., 1 / B^d)` on the torus.
    pub fn bases(&self) -> impl Iterator<Item = T32> + Clone {
        let log_b = self.log_b;
        (1..=self.d).map(move |j| T32::from_pow2_inv(j * log_b))
    }

    pub fn power_up(&self, v: T32) -> impl Iterator<Item = T32> + Clone {
        self.bases().map(move |base| v * base)
    }

    /// Closest value representable by the gadget.
    pub fn round(&self, v: &T32) -> T32 {
        T32::from(self.rounded_limbs(v) << self.rounding_bits())
    }

    fn rounded_limbs(&self, v: &T32) -> u64 {
        let (v, bits) = (v.to_u64(), self.rounding_bits());
        match bits {
            0 => v,
            _ => (v >> bits) + ((v >> (bits - 1)) & 1),
        }
    }

    /// Balanced digits in `[-B/2, B/2]`, most significant level first, such
    /// that `sum(digit_j * base_j) == self.round(v)`.
    pub fn decompose(&self, v: &T32) -> impl Iterator<Item = T32> {
        let (log_b, mask) = (self.log_b, (1u64 << self.log_b) - 1);
        let mut state = self.rounded_limbs(v);
        let mut limbs = (0..self.d)
            .map(|_| {
                let limb = state & mask;
                state >>= log_b;
                let carry = ((limb.wrapping_sub(1) | state) & limb) >> (log_b - 1);
                state += carry;
                T32::from(limb.wrapping_sub(carry << log_b))
            })
            .collect::<Vec<_>>();
        limbs.reverse();
        limbs.into_iter()
    }
}
