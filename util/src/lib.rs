mod avec;
mod misc;
mod poly;
mod torus;

pub use avec::AVec;
pub use misc::{
    bit_reverse,
    decompose::Decomposor,
    distribution::{binary, tdg},
    Dot,
};
pub use poly::{
    fft::{FourierPoly, NegaCyclicFft},
    NegaCyclicPoly, Rt,
};
pub use torus::T32;
