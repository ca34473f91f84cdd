//! Chirp-z transform: a zoomed DFT over an arbitrary angular-frequency
//! interval `[start, end)` (radians per sample), computed as a
//! Bluestein-style chirp convolution via the crate's own complex FFT
//! engine.
//!
//! Grounded on `original_source/czt/t.go`.

use crate::error::{DspError, DspResult};
use crate::fft::complex_engine::ComplexEngine;
use num_complex::Complex64;

fn find_l(n_s: usize) -> usize {
    (2 * n_s - 1).next_power_of_two()
}

/// A chirp-z transformer: takes `n_s` samples and produces `n_b`
/// frequency bins spanning `[start, end)` radians per sample.
pub struct Czt {
    n_s: usize,
    n_b: usize,
    n_pad: usize,
    step: f64,
    kern: Vec<Complex64>,
    a_tab: Vec<Complex64>,
    w_tab: Vec<Complex64>,
    ft: ComplexEngine,
}

impl Czt {
    pub fn new(n_s: usize, n_b: usize, start: f64, end: f64) -> Self {
        assert!(n_s > 0 && n_b > 0, "sample and bin counts must be positive");
        let n_pad = find_l(n_s);
        let step = (end - start) / n_b as f64;
        log::debug!("Czt::new(n_s={n_s}, n_b={n_b}) n_pad={n_pad} step={step}");
        let ft = ComplexEngine::new(n_pad);
        let mut a_tab = Vec::with_capacity(n_s);
        for i in 0..n_s {
            let angle = -(i as f64) * start;
            a_tab.push(Complex64::new(angle.cos(), angle.sin()));
        }
        let mut kern = vec![Complex64::new(0.0, 0.0); n_pad];
        let mut w_tab = Vec::with_capacity(n_s);
        for i in 0..n_s {
            let angle = step * (i * i) as f64 / 2.0;
            let c = Complex64::new(angle.cos(), angle.sin());
            kern[i] = c;
            w_tab.push(c.conj());
        }
        for i in 1..n_s {
            kern[n_pad - i] = kern[i];
        }
        let mut kern_buf = ft.win(kern);
        ft.do_forward(&mut kern_buf).expect("kernel buffer sized to engine");
        Self {
            n_s,
            n_b,
            n_pad,
            step,
            kern: kern_buf,
            a_tab,
            w_tab,
            ft,
        }
    }

    pub fn n_b(&self) -> usize {
        self.n_b
    }

    pub fn n_s(&self) -> usize {
        self.n_s
    }

    pub fn pad_n(&self) -> usize {
        self.n_pad
    }

    /// Reshapes `c` for use as the `src` argument of [`Self::transform`]:
    /// length `n_s()`, capacity at least `pad_n()`.
    pub fn win(&self, mut c: Vec<Complex64>) -> Vec<Complex64> {
        if c.capacity() < self.n_pad {
            let mut tmp = Vec::with_capacity(self.n_pad);
            tmp.extend_from_slice(&c);
            c = tmp;
        }
        if c.len() < self.n_s {
            c.resize(self.n_s, Complex64::new(0.0, 0.0));
        } else {
            c.truncate(self.n_s);
        }
        c
    }

    /// Runs the transform on `src` (length `n_s()`), returning the first
    /// `n_b()` entries (reusing `src`'s storage).
    pub fn transform(&mut self, src: Vec<Complex64>) -> DspResult<Vec<Complex64>> {
        if src.len() != self.n_s {
            return Err(DspError::DimensionMismatch {
                expected: self.n_s,
                got: src.len(),
            });
        }
        let mut src = self.win(src);
        src.resize(self.n_pad, Complex64::new(0.0, 0.0));

        for i in 0..self.n_s {
            src[i] *= self.a_tab[i] * self.w_tab[i];
        }

        self.ft.set_scale(false);
        self.ft.do_forward(&mut src)?;
        self.ft.set_scale(true);

        for i in 0..self.n_pad {
            src[i] *= self.kern[i];
        }

        self.ft.do_inverse(&mut src)?;

        let r = 1.0 / (self.n_s as f64).sqrt();
        for i in 0..self.n_b {
            src[i] *= self.w_tab[i] * r;
        }
        src.truncate(self.n_b);
        Ok(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_dft_bin(d: &[Complex64], freq: f64) -> Complex64 {
        let mut acc = Complex64::new(0.0, 0.0);
        for (j, &v) in d.iter().enumerate() {
            let ang = -freq * j as f64;
            acc += v * Complex64::new(ang.cos(), ang.sin());
        }
        acc / (d.len() as f64).sqrt()
    }

    #[test]
    fn matches_full_spectrum_dft() {
        let n = 8;
        let input: Vec<Complex64> = (0..n)
            .map(|i| Complex64::new((i as f64 * 0.9).sin(), 0.0))
            .collect();
        let two_pi = 2.0 * std::f64::consts::PI;
        let mut czt = Czt::new(n, n, 0.0, two_pi);
        let got = czt.transform(czt.win(input.clone())).unwrap();
        for k in 0..n {
            let want = naive_dft_bin(&input, two_pi * k as f64 / n as f64);
            assert!((got[k] - want).norm() < 1e-6, "bin {k}: {} != {}", got[k], want);
        }
    }

    #[test]
    fn dimension_mismatch_is_reported() {
        let mut czt = Czt::new(8, 4, 0.0, 1.0);
        let err = czt.transform(vec![Complex64::new(0.0, 0.0); 3]).unwrap_err();
        assert_eq!(
            err,
            DspError::DimensionMismatch {
                expected: 8,
                got: 3
            }
        );
    }
}
