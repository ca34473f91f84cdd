//! Window functions: normalized sinc, Lanczos interpolation/window,
//! Blackman, Hamming, a generic window builder over `[-pi, pi)`, and the
//! `stretch` combinator used to reparametrize any of them.
//!
//! Grounded on `original_source/wfn/sinc.go`, `wfn/lanczos.go`,
//! `wfn/blackman.go`, `wfn/hamming.go`, `wfn/t.go` and `wfn/stretch.go`.

use std::f64::consts::PI;

/// Normalized sinc, `sin(pi*x)/(pi*x)`, with the default `1e-10`
/// near-zero tolerance (returns `1.0` within it).
pub fn sinc(x: f64) -> f64 {
    sinc_eps(x, 1e-10)
}

pub fn sinc_eps(x: f64, eps: f64) -> f64 {
    if x.abs() < eps {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

/// Lanczos interpolation kernel of order `a` at offset `t`.
pub fn lanczos_itp(a: i32, t: f64) -> f64 {
    sinc(t) * sinc(t / a as f64)
}

/// Returns a closure computing [`lanczos_itp`] for a fixed order `a`.
pub fn lanczos_itp_fn(a: i32) -> impl Fn(f64) -> f64 {
    move |t| lanczos_itp(a, t)
}

/// Lanczos window (without the inner sinc factor) of order `a`.
pub fn lanczos_win(a: i32, t: f64) -> f64 {
    sinc(t / a as f64)
}

/// Blackman window function, domain `[-pi, pi)`.
pub fn blackman(i: f64) -> f64 {
    0.42 - 0.5 * (PI - i).cos() + 0.08 * (2.0 * (PI - i)).cos()
}

/// Hamming window function, domain `[-pi, pi)`.
pub fn hamming(i: f64) -> f64 {
    0.53836 - 0.46164 * (PI - i).cos()
}

/// Reparametrizes a window function `f` so that `stretch(f, by)(i) ==
/// f(by * i)`.
pub fn stretch<F: Fn(f64) -> f64>(f: F, by: f64) -> impl Fn(f64) -> f64 {
    move |i| f(by * i)
}

/// A concrete, materialized window of `n` coefficients built by sampling
/// `f` over `[-pi, pi)`.
pub struct Window(Vec<f64>);

impl Window {
    /// Builds a window of `n` coefficients by evaluating `f` across
    /// `[-pi, pi)`.
    ///
    /// # Panics
    /// Panics if `n < 2` (division by zero in the domain mapping).
    pub fn new<F: Fn(f64) -> f64>(f: F, n: usize) -> Self {
        assert!(n >= 2, "window size must be at least 2");
        let m = (n - 1) as f64;
        let r = 2.0 * PI / m;
        let h = m / 2.0;
        let coeffs = (0..n).map(|i| f(r * (i as f64 - h))).collect();
        Self(coeffs)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Multiplies `d` elementwise by this window.
    ///
    /// # Panics
    /// Panics if `d.len() > self.len()`.
    pub fn apply(&self, d: &mut [f64]) {
        assert!(d.len() <= self.0.len(), "window shorter than data");
        for (v, w) in d.iter_mut().zip(self.0.iter()) {
            *v *= w;
        }
    }

    /// Average absolute coefficient value: the gain applied to a
    /// constant (DC) signal.
    pub fn dc_gain(&self) -> f64 {
        let total: f64 = self.0.iter().map(|v| v.abs()).sum();
        total / self.0.len() as f64
    }

    /// Average (signed) coefficient value.
    pub fn av_gain(&self) -> f64 {
        let total: f64 = self.0.iter().sum();
        total / self.0.len() as f64
    }

    /// Normalizes coefficients to unity DC gain.
    pub fn dc_norm(&mut self) {
        let g = self.dc_gain() * self.0.len() as f64;
        for v in self.0.iter_mut() {
            *v /= g;
        }
    }

    /// Normalizes coefficients to unity average gain.
    pub fn av_norm(&mut self) {
        let g = self.av_gain() * self.0.len() as f64;
        for v in self.0.iter_mut() {
            *v /= g;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sinc_is_one_at_zero() {
        assert_eq!(sinc(0.0), 1.0);
    }

    #[test]
    fn sinc_vanishes_at_integers() {
        assert!(sinc(2.0).abs() < 1e-9);
        assert!(sinc(-3.0).abs() < 1e-9);
    }

    #[test]
    fn blackman_window_tapers_to_near_zero_at_edges() {
        let w = Window::new(blackman, 64);
        assert!(w.as_slice()[0].abs() < 1e-3);
        assert!(w.as_slice()[63].abs() < 1e-3);
    }

    #[test]
    fn dc_norm_yields_unity_dc_gain() {
        let mut w = Window::new(hamming, 32);
        w.dc_norm();
        assert!((w.dc_gain() * w.len() as f64 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn stretch_scales_the_domain() {
        let f = stretch(sinc, 2.0);
        assert!((f(0.5) - sinc(1.0)).abs() < 1e-12);
    }
}
