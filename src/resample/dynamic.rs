//! Sample-rate-ratio-driven iteration over a [`ContinuousSource`].
//!
//! Grounded on `original_source/resample/ct.go`'s consumers (no dedicated
//! dynamic-resampler file exists upstream; this follows spec.md §4.9's
//! "Dynamic resampler" directly, built on the same `C`/`Itper`
//! primitives).

use super::ct::{ContinuousSource, FrameProducer};
use crate::error::DspResult;

/// Supplies the next output/input sample-rate ratio to advance a
/// [`DynamicResampler`]'s cursor by.
pub trait RateRatioOracle {
    fn next_ratio(&mut self) -> f64;
}

/// A constant ratio, for the common case of resampling between two fixed
/// sample rates (`ratio = input_rate / output_rate`).
pub struct ConstantRatio(pub f64);

impl RateRatioOracle for ConstantRatio {
    fn next_ratio(&mut self) -> f64 {
        self.0
    }
}

/// Drives a [`ContinuousSource`] with a cursor that advances by whatever
/// a [`RateRatioOracle`] reports, producing a resampled stream one frame
/// at a time.
pub struct DynamicResampler<P: FrameProducer, O: RateRatioOracle> {
    source: ContinuousSource<P>,
    oracle: O,
    last_i: f64,
}

impl<P: FrameProducer, O: RateRatioOracle> DynamicResampler<P, O> {
    pub fn new(source: ContinuousSource<P>, oracle: O) -> Self {
        Self {
            source,
            oracle,
            last_i: 0.0,
        }
    }

    pub fn channels(&self) -> usize {
        self.source.channels()
    }

    /// Produces the next output frame (one sample per channel) into
    /// `dst`, channel-interleaved, and advances the cursor by the
    /// oracle's next ratio.
    pub fn next_frame(&mut self, dst: &mut [f64]) -> DspResult<()> {
        self.source.frame_at(dst, self.last_i)?;
        self.last_i += self.oracle.next_ratio();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DspError;

    struct ConstSource {
        remaining: usize,
    }

    impl FrameProducer for ConstSource {
        fn channels(&self) -> usize {
            1
        }

        fn receive(&mut self, buf: &mut [f64]) -> DspResult<usize> {
            let n = buf.len().min(self.remaining);
            for v in buf[..n].iter_mut() {
                *v = 1.0;
            }
            self.remaining -= n;
            if n < buf.len() {
                Err(DspError::EndOfStream)
            } else {
                Ok(n)
            }
        }

        fn close(&mut self) {}
    }

    #[test]
    fn constant_signal_resamples_to_constant() {
        let src = ConstSource { remaining: 10_000 };
        let source = ContinuousSource::new(src, None);
        let mut r = DynamicResampler::new(source, ConstantRatio(0.5));
        let mut dst = [0.0];
        for _ in 0..100 {
            r.next_frame(&mut dst).unwrap();
            assert!((dst[0] - 1.0).abs() < 1e-6);
        }
    }
}
