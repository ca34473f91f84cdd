//! Complex FFT engine: radix-2 for power-of-two sizes, Bluestein's
//! chirp-z convolution for everything else. Owns its twiddle and chirp
//! tables (eager init, per the crate's "each engine owns its tables"
//! design) and exposes the buffer-shaping helpers callers use to avoid
//! per-call allocation.
//!
//! Grounded on `original_source/fft/t.go`, `fft/r2.go`, `fft/chirpz.go`,
//! `fft/pad.go` and `fft/scale.go`.

use super::chirp::ChirpTables;
use super::radix2::radix2;
use super::scale::scale;
use super::twiddle::Twiddles;
use crate::error::{DspError, DspResult};
use num_complex::Complex64;

fn padded_size(n: usize) -> usize {
    if n.is_power_of_two() {
        n
    } else {
        (2 * n - 1).next_power_of_two()
    }
}

/// A complex-to-complex FFT engine for a fixed transform size `n`.
pub struct ComplexEngine {
    n: usize,
    padded: usize,
    twiddles_fwd: Twiddles,
    twiddles_inv: Twiddles,
    chirp_fwd: Option<ChirpTables>,
    chirp_inv: Option<ChirpTables>,
    scale_on: bool,
}

impl ComplexEngine {
    /// Builds an engine for transforms of length `n`. Panics only if
    /// `n == 0`, which cannot produce a meaningful transform size.
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "transform size must be positive");
        let padded = padded_size(n);
        log::debug!("ComplexEngine::new(n={n}) padded={padded}");
        let twiddles_fwd = Twiddles::new(padded, false);
        let twiddles_inv = Twiddles::new(padded, true);
        let (chirp_fwd, chirp_inv) = if n != padded {
            (
                Some(ChirpTables::new(n, padded, &twiddles_fwd, false)),
                Some(ChirpTables::new(n, padded, &twiddles_inv, true)),
            )
        } else {
            (None, None)
        };
        Self {
            n,
            padded,
            twiddles_fwd,
            twiddles_inv,
            chirp_fwd,
            chirp_inv,
            scale_on: true,
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// The smallest power of two `>= max(n, 2n-1)` that backs the radix-2
    /// engine; for power-of-two `n` this equals `n`.
    pub fn padded_len(&self) -> usize {
        self.padded
    }

    /// Turns scaling by `1/sqrt(n)` on forward and inverse transforms on
    /// or off. Default is on.
    pub fn set_scale(&mut self, on: bool) {
        self.scale_on = on;
    }

    pub fn scale(&self) -> bool {
        self.scale_on
    }

    /// Returns a buffer shaped so it can be passed to `do_forward`/
    /// `do_inverse`/`to`/`inv_to` without further allocation: length `n`,
    /// capacity at least `padded_len()`, preserving `c`'s existing data.
    pub fn win(&self, mut c: Vec<Complex64>) -> Vec<Complex64> {
        if c.capacity() < self.padded {
            let mut tmp = Vec::with_capacity(self.padded);
            tmp.extend_from_slice(&c);
            c = tmp;
        }
        if c.len() < self.n {
            c.resize(self.n, Complex64::new(0.0, 0.0));
        } else {
            c.truncate(self.n);
        }
        c
    }

    fn check_buf(&self, d: &[Complex64]) -> DspResult<()> {
        if d.len() != self.n {
            return Err(DspError::DimensionMismatch {
                expected: self.n,
                got: d.len(),
            });
        }
        Ok(())
    }

    fn check_cap(&self, d: &Vec<Complex64>) -> DspResult<()> {
        if d.capacity() < self.padded {
            return Err(DspError::CapacityMismatch {
                expected: self.padded,
                got: d.capacity(),
            });
        }
        Ok(())
    }

    /// In-place forward transform. `d` must have length `n()` and
    /// capacity at least `padded_len()` (see [`Self::win`]).
    pub fn do_forward(&self, d: &mut Vec<Complex64>) -> DspResult<()> {
        self.check_buf(d)?;
        self.check_cap(d)?;
        if self.n == self.padded {
            radix2(d, &self.twiddles_fwd, self.scale_on);
            return Ok(());
        }
        self.bluestein(d, false);
        Ok(())
    }

    /// In-place inverse transform. Same buffer requirements as
    /// [`Self::do_forward`].
    pub fn do_inverse(&self, d: &mut Vec<Complex64>) -> DspResult<()> {
        self.check_buf(d)?;
        self.check_cap(d)?;
        if self.n == self.padded {
            radix2(d, &self.twiddles_inv, self.scale_on);
            return Ok(());
        }
        self.bluestein(d, true);
        Ok(())
    }

    /// Forward-transforms `src` into `dst`, leaving `src` untouched. `dst`
    /// is reshaped via [`Self::win`] if it doesn't already fit.
    pub fn to(&self, dst: Vec<Complex64>, src: &[Complex64]) -> DspResult<Vec<Complex64>> {
        self.check_buf(src)?;
        let mut dst = self.win(dst);
        dst[..self.n].copy_from_slice(src);
        self.do_forward(&mut dst)?;
        Ok(dst)
    }

    /// Inverse-transforms `src` into `dst`, leaving `src` untouched.
    pub fn inv_to(&self, dst: Vec<Complex64>, src: &[Complex64]) -> DspResult<Vec<Complex64>> {
        self.check_buf(src)?;
        let mut dst = self.win(dst);
        dst[..self.n].copy_from_slice(src);
        self.do_inverse(&mut dst)?;
        Ok(dst)
    }

    /// Computes the (circular) autocorrelation of `d` in place: forward
    /// transform with scaling disabled, multiply each bin by its
    /// conjugate, inverse transform, restore the scaling flag, and
    /// divide every sample by `n()`.
    pub fn autocorrelation(&mut self, d: &mut Vec<Complex64>) -> DspResult<()> {
        let saved = self.scale_on;
        self.scale_on = false;
        self.do_forward(d)?;
        for v in d.iter_mut() {
            *v *= v.conj();
        }
        self.do_inverse(d)?;
        self.scale_on = saved;
        let n = Complex64::new(self.n as f64, 0.0);
        for v in d.iter_mut() {
            *v /= n;
        }
        Ok(())
    }

    fn bluestein(&self, d: &mut Vec<Complex64>, inv: bool) {
        // `i_chirp` is built from the *opposite* direction's twiddles
        // (the Go original's `getChirpz(!inv)`); `chirpz` from the
        // current direction's (`getChirpz(inv)`).
        let i_chirp = if inv {
            self.chirp_fwd.as_ref().unwrap()
        } else {
            self.chirp_inv.as_ref().unwrap()
        };
        let chirpz = if inv {
            self.chirp_inv.as_ref().unwrap()
        } else {
            self.chirp_fwd.as_ref().unwrap()
        };

        // 1. multiply input by the opposite-direction chirp.
        for i in 0..self.n {
            d[i] *= i_chirp.d[i];
        }

        // 2. zero-pad to the padded size, reusing capacity.
        d.resize(self.padded, Complex64::new(0.0, 0.0));

        // 3. radix-2 transform in the current direction, scaled only
        //    when `inv` is set (mirrors the original's `r2(d, twids(inv),
        //    inv)`).
        let tw_current = if inv { &self.twiddles_inv } else { &self.twiddles_fwd };
        radix2(d, tw_current, inv);

        // 4. pointwise multiply by the precomputed, pre-scaled chirp
        //    transform (this carries the convolution's normalization).
        for i in 0..self.padded {
            d[i] *= chirpz.td[i];
        }

        // 5. inverse radix-2 transform in the opposite direction, scaled
        //    only when `inv` is *not* set.
        let tw_opposite = if inv { &self.twiddles_fwd } else { &self.twiddles_inv };
        radix2(d, tw_opposite, !inv);

        // 6. truncate to n and apply the engine's own scaling policy.
        d.truncate(self.n);
        if self.scale_on {
            scale(d);
        }

        // 7. multiply by the opposite-direction chirp again.
        for i in 0..self.n {
            d[i] *= i_chirp.d[i];
        }
    }
}
