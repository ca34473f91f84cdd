//! FFT-based linear convolution.
//!
//! `Convolver` holds the state for repeated `m`-by-`n` convolutions: a
//! real FFT engine sized to the smallest power of two that can hold the
//! (unaliased) linear convolution result, plus a reusable operand
//! buffer. [`kernel`] builds on top of it for convolutions against a
//! fixed, precomputed kernel, and [`ola`] for streaming overlap-add
//! block convolution.
//!
//! Grounded on `original_source/convol/t.go`.

pub mod kernel;
pub mod ola;

use crate::error::{DspError, DspResult};
use crate::fft::halfcomplex::HalfComplex;
use crate::fft::real_engine::RealEngine;

pub use kernel::Kernel;
pub use ola::Ola;

/// Zero-extends `d` to length `l`, growing its capacity if needed.
pub(crate) fn pad_vec(mut d: Vec<f64>, l: usize) -> Vec<f64> {
    d.resize(l, 0.0);
    d
}

/// Reshapes `d` so it has capacity at least `cap_at_least` and length
/// exactly `trg_len`, zeroing any newly exposed elements. Mirrors the
/// Go original's `win` helper: grow capacity once, then slice views of
/// that same backing store are reused across calls.
fn win_to(mut d: Vec<f64>, cap_at_least: usize, trg_len: usize) -> Vec<f64> {
    if d.capacity() < cap_at_least {
        let mut tmp = Vec::with_capacity(cap_at_least);
        tmp.extend_from_slice(&d);
        d = tmp;
    }
    let full = d.capacity();
    d.resize(full, 0.0);
    d.truncate(trg_len);
    d
}

/// A convolver for operands of length `m` and `n`, producing a linear
/// convolution result of length `m + n - 1`.
pub struct Convolver {
    m: usize,
    n: usize,
    win_b: Vec<f64>,
    ft: RealEngine,
}

impl Convolver {
    /// `m` is the length of the first (signal) operand, `n` of the
    /// second (kernel) operand.
    pub fn new(m: usize, n: usize) -> Self {
        let l = m + n - 1;
        let pad_l = l.next_power_of_two();
        log::debug!("Convolver::new(m={m}, n={n}) L={l} pad_l={pad_l}");
        let ft = RealEngine::new(pad_l);
        let win_b = win_to(Vec::new(), pad_l, l);
        Self { m, n, win_b, ft }
    }

    pub fn m(&self) -> usize {
        self.m
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Length of the convolution result, `m + n - 1`.
    pub fn l(&self) -> usize {
        self.m + self.n - 1
    }

    /// The FFT-padded length backing this convolver (`>= l()`).
    pub fn pad_l(&self) -> usize {
        self.ft.n()
    }

    /// Reshapes `d` for use as the `a` (signal) operand of [`Self::conv`].
    pub fn win_a(&self, d: Vec<f64>) -> Vec<f64> {
        win_to(d, self.pad_l(), self.m)
    }

    /// Reshapes `d` for use as the `b` (kernel) operand of [`Self::conv`].
    pub fn win_b(&self, d: Vec<f64>) -> Vec<f64> {
        win_to(d, self.pad_l(), self.n)
    }

    /// Reshapes `d` for use as the destination of [`Self::conv_to`].
    pub fn win_dst(&self, d: Vec<f64>) -> Vec<f64> {
        win_to(d, self.pad_l(), self.l())
    }

    /// Convolves `a` (length `m`) and `b` (length `n`), returning the
    /// result (length `l()`) in `a`'s storage.
    pub fn conv(&mut self, a: Vec<f64>, b: &[f64]) -> DspResult<Vec<f64>> {
        if a.len() != self.m {
            return Err(DspError::DimensionMismatch {
                expected: self.m,
                got: a.len(),
            });
        }
        if b.len() != self.n {
            return Err(DspError::DimensionMismatch {
                expected: self.n,
                got: b.len(),
            });
        }
        self.win_b[..b.len()].copy_from_slice(b);
        let b_buf = std::mem::take(&mut self.win_b);
        let (a_out, b_out) = self.conv_inner(a, b_buf)?;
        self.win_b = win_to(b_out, self.pad_l(), self.n);
        Ok(a_out)
    }

    /// Convolves `a` and `b` into `dst`, leaving `a` unmodified.
    /// Destination-first, the crate's canonical argument order.
    pub fn conv_to(&mut self, dst: Vec<f64>, a: &[f64], b: &[f64]) -> DspResult<Vec<f64>> {
        let mut dst = self.win_dst(dst);
        dst[..a.len()].copy_from_slice(a);
        dst.truncate(self.m);
        let out = self.conv(dst, b)?;
        Ok(out)
    }

    /// Runs the padded a/b through the forward/dot/inverse pipeline,
    /// returning both buffers (so callers can salvage `b`'s storage).
    fn conv_inner(&mut self, a: Vec<f64>, b: Vec<f64>) -> DspResult<(Vec<f64>, Vec<f64>)> {
        let pad_l = self.pad_l();
        let mut a = pad_vec(a, pad_l);
        let mut b = pad_vec(b, pad_l);

        self.ft.do_forward(&mut b)?;
        self.ft.set_scale(false);
        self.ft.do_forward(&mut a)?;
        self.ft.set_scale(true);

        {
            let hcb = HalfComplex::new(&mut b);
            let mut hca = HalfComplex::new(&mut a);
            hca.dot(&hcb);
        }

        self.ft.do_inverse(&mut a)?;
        a.truncate(self.l());
        Ok((a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_conv(a: &[f64], b: &[f64]) -> Vec<f64> {
        let l = a.len() + b.len() - 1;
        let mut out = vec![0.0; l];
        for (i, &av) in a.iter().enumerate() {
            for (j, &bv) in b.iter().enumerate() {
                out[i + j] += av * bv;
            }
        }
        out
    }

    #[test]
    fn matches_naive_convolution() {
        let a = vec![1.0, 2.0, 3.0, 4.0];
        let b = vec![1.0, -1.0, 0.5];
        let mut c = Convolver::new(a.len(), b.len());
        let got = c.conv(a.clone(), &b).unwrap();
        let want = naive_conv(&a, &b);
        for (g, w) in got.iter().zip(want.iter()) {
            assert!((g - w).abs() < 1e-8, "{g} != {w}");
        }
    }

    #[test]
    fn dimension_mismatch_is_reported() {
        let mut c = Convolver::new(4, 3);
        let err = c.conv(vec![1.0, 2.0], &[1.0, 0.0, 0.0]).unwrap_err();
        assert_eq!(
            err,
            DspError::DimensionMismatch {
                expected: 4,
                got: 2
            }
        );
    }

    #[test]
    fn conv_to_leaves_a_untouched() {
        let a = vec![1.0, 0.0, -1.0];
        let b = vec![0.5, 0.5];
        let mut c = Convolver::new(a.len(), b.len());
        let result = c.conv_to(Vec::new(), &a, &b).unwrap();
        assert_eq!(result.len(), c.l());
        assert_eq!(a, vec![1.0, 0.0, -1.0]);
    }
}
