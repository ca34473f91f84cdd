//! Continuous-time resampling: a sliding-window fractional-index source
//! over a multichannel frame producer ([`ct::ContinuousSource`]), the
//! interpolators it samples with ([`itp`]), and a sample-rate-ratio-driven
//! iterator over it ([`dynamic::DynamicResampler`]).
//!
//! Grounded on `original_source/resample/ct.go`, `resample/itp.go` and
//! `resample/doc.go`.

pub mod ct;
pub mod dynamic;
pub mod itp;

pub use ct::{ContinuousSource, FrameProducer};
pub use dynamic::{DynamicResampler, RateRatioOracle};
pub use itp::Interpolator;
