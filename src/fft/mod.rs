//! Fast Fourier transform engines: complex radix-2/Bluestein, a real-input
//! engine built on top of it, the half-complex spectrum container it
//! produces, and the twiddle/bit-reversal/chirp/scale building blocks
//! they share.

pub mod chirp;
pub mod complex_engine;
pub mod halfcomplex;
pub mod radix2;
pub mod real_engine;
mod revbin;
mod scale;
pub mod twiddle;

pub use complex_engine::ComplexEngine;
pub use halfcomplex::HalfComplex;
pub use real_engine::RealEngine;
