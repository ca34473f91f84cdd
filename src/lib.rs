//! `dspkit`: a one-dimensional digital signal processing core.
//!
//! Complex and real FFT engines (radix-2 decimation-in-time, extended to
//! arbitrary sizes by Bluestein's algorithm), a half-complex spectrum
//! container and polar spectrum view, FFT-based linear convolution
//! (one-shot, precomputed-kernel, and streaming overlap-add), a
//! chirp-z transform, Byeong-Gi Lee's O(N log N) discrete cosine
//! transform with a coefficient significance ranker, a continuous-time
//! resampler built on windowed-sinc/Lanczos/linear interpolators, and a
//! Levinson-Durbin linear predictive coder.
//!
//! Every engine owns its scratch buffers and precomputed tables, is
//! single-threaded and single-writer, and exposes buffer-shaping helpers
//! (`win`/`win_a`/`win_b`/...) that let callers reuse storage across
//! repeated calls without per-call allocation.

pub mod convol;
pub mod czt;
pub mod dct;
pub mod error;
pub mod fft;
pub mod lpc;
pub mod resample;
pub mod spectrum;
pub mod wfn;

pub use czt::Czt;
pub use error::{DspError, DspResult};
pub use lpc::{Lpc, LpcState};
pub use spectrum::Spectrum;
