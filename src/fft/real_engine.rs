//! Real-input DFT engine: for even `n`, reuses a complex engine of size
//! `n/2` via the classic "pack two reals as one complex sample" trick and
//! a length-`n/2` post-processing twiddle vector; for odd `n`, embeds the
//! real input as a zero-imaginary complex vector and runs the complex
//! engine at full size `n`.
//!
//! Grounded on `original_source/fft/real.go` for the even-`n` packing
//! derivation (the Go original only supports even `n`; the odd-`n` path
//! is this crate's straightforward extension, per the spec).

use super::complex_engine::ComplexEngine;
use super::halfcomplex::HalfComplex;
use crate::error::{DspError, DspResult};
use num_complex::Complex64;

enum Inner {
    Even {
        complex: ComplexEngine,
        c_buf: Vec<Complex64>,
        twidz: Vec<Complex64>,
    },
    Odd {
        complex: ComplexEngine,
        scratch: Vec<Complex64>,
    },
}

pub struct RealEngine {
    n: usize,
    inner: Inner,
    scale_on: bool,
}

impl RealEngine {
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "transform size must be positive");
        log::debug!("RealEngine::new(n={n})");
        let inner = if n % 2 == 0 {
            let h = n / 2;
            let mut complex = ComplexEngine::new(h);
            complex.set_scale(false);
            let c_buf = complex.win(vec![Complex64::new(0.0, 0.0); h]);
            let mut twidz = Vec::with_capacity(h);
            let nf = n as f64;
            for i in 0..h {
                let angle = i as f64 * 2.0 * std::f64::consts::PI / nf;
                twidz.push(Complex64::new(angle.cos(), -angle.sin()));
            }
            Inner::Even {
                complex,
                c_buf,
                twidz,
            }
        } else {
            let complex = ComplexEngine::new(n);
            let scratch = complex.win(vec![Complex64::new(0.0, 0.0); n]);
            Inner::Odd { complex, scratch }
        };
        Self {
            n,
            inner,
            scale_on: true,
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn set_scale(&mut self, on: bool) {
        self.scale_on = on;
    }

    pub fn scale(&self) -> bool {
        self.scale_on
    }

    /// Returns a buffer reshaped to exactly length `n`, preserving `c`'s
    /// existing data (zero-extending if shorter).
    pub fn win(&self, mut c: Vec<f64>) -> Vec<f64> {
        if c.len() < self.n {
            c.resize(self.n, 0.0);
        } else {
            c.truncate(self.n);
        }
        c
    }

    fn check(&self, d: &[f64]) -> DspResult<()> {
        if d.len() != self.n {
            return Err(DspError::DimensionMismatch {
                expected: self.n,
                got: d.len(),
            });
        }
        Ok(())
    }

    /// Forward real DFT, packed into `d` in half-complex layout.
    pub fn do_forward(&mut self, d: &mut [f64]) -> DspResult<()> {
        self.check(d)?;
        match &mut self.inner {
            Inner::Even {
                complex,
                c_buf,
                twidz,
            } => {
                let h = c_buf.len();
                for i in 0..h {
                    c_buf[i] = Complex64::new(d[2 * i], d[2 * i + 1]);
                }
                complex.do_forward(c_buf)?;
                to_hc(d, c_buf, twidz);
                if self.scale_on {
                    let s = 1.0 / (self.n as f64).sqrt();
                    for v in d.iter_mut() {
                        *v *= s;
                    }
                }
            }
            Inner::Odd { complex, scratch } => {
                for (i, &v) in d.iter().enumerate() {
                    scratch[i] = Complex64::new(v, 0.0);
                }
                complex.set_scale(self.scale_on);
                complex.do_forward(scratch)?;
                HalfComplex::new(d).from_complex(scratch);
            }
        }
        Ok(())
    }

    /// Inverse real DFT from `d` (half-complex layout), written back as
    /// plain real samples.
    pub fn do_inverse(&mut self, d: &mut [f64]) -> DspResult<()> {
        self.check(d)?;
        match &mut self.inner {
            Inner::Even {
                complex,
                c_buf,
                twidz,
            } => {
                if self.scale_on {
                    let s = (self.n as f64).sqrt();
                    for v in d.iter_mut() {
                        *v *= s;
                    }
                }
                from_hc(d, c_buf, twidz);
                complex.do_inverse(c_buf)?;
                let h = c_buf.len();
                for i in 0..h {
                    d[2 * i] = c_buf[i].re;
                    d[2 * i + 1] = c_buf[i].im;
                }
                if self.scale_on {
                    let s = 1.0 / h as f64;
                    for v in d.iter_mut() {
                        *v *= s;
                    }
                }
            }
            Inner::Odd { complex, scratch } => {
                complex.set_scale(self.scale_on);
                HalfComplex::new(d).to_complex(scratch);
                complex.do_inverse(scratch)?;
                for (i, v) in d.iter_mut().enumerate() {
                    *v = scratch[i].re;
                }
            }
        }
        Ok(())
    }
}

/// Packs the forward transform of the even-`n` inner complex engine
/// (`c_buf`) into half-complex layout in `d`.
fn to_hc(d: &mut [f64], c_buf: &[Complex64], twidz: &[Complex64]) {
    let half_r = Complex64::new(0.5, 0.0);
    let half_i = Complex64::new(0.0, 0.5);
    let h = c_buf.len();
    let n = d.len();
    if n != 0 {
        let a = c_buf[0];
        let f0 = half_r * a;
        let g0 = -half_i * a;
        let shift = twidz[0];
        let mut hc = HalfComplex::new(d);
        hc.set_cmplx(0, Complex64::new(2.0, 0.0) * (f0 + shift * g0));
        d[h] = 2.0 * (f0 - g0).re;
    }
    for i in 1..h {
        let a = c_buf[i];
        let b = c_buf[h - i].conj();
        let fi = half_r * (a + b);
        let gi = half_i * (b - a);
        let shift = twidz[i];
        let xi = fi + shift * gi;
        HalfComplex::new(d).set_cmplx(i, xi);
    }
}

/// Reads half-complex bin `i` from a read-only `d` of length `n`, without
/// requiring the mutable borrow `HalfComplex` takes.
fn hc_read(d: &[f64], i: usize) -> Complex64 {
    let n = d.len();
    if i == 0 || 2 * i == n {
        Complex64::new(d[i], 0.0)
    } else {
        Complex64::new(d[i], d[n - i])
    }
}

/// Inverts `to_hc`: reconstructs the even-`n` inner complex engine buffer
/// `c_buf` from the half-complex layout in `d`.
fn from_hc(d: &[f64], c_buf: &mut [Complex64], twidz: &[Complex64]) {
    let half_r = Complex64::new(0.5, 0.0);
    let half_i = Complex64::new(0.0, 0.5);
    let h = c_buf.len();
    if h > 0 {
        let a = hc_read(d, 0);
        let f = half_r * a;
        let g = twidz[0].conj() * (a - f);
        c_buf[0] = half_r * (f / half_r - g / half_i);
        let ny = 0.5 * d[h];
        c_buf[0] = Complex64::new(c_buf[0].re + ny, c_buf[0].im - ny);
    }
    for i in 1..h {
        let j = h - i;
        let a = hc_read(d, i);
        let b = hc_read(d, j).conj();
        let fi = half_r * (a + b);
        let gi = twidz[i].conj() * (a - fi);
        c_buf[i] = half_r * (fi / half_r - gi / half_i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s2_impulse_size_8() {
        let mut e = RealEngine::new(8);
        let mut d = e.win(vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        e.do_forward(&mut d).unwrap();
        let expect = 1.0 / 8f64.sqrt();
        for i in 0..5 {
            assert!((d[i] - expect).abs() < 1e-9, "d[{i}]={}", d[i]);
        }
        for i in 5..8 {
            assert!(d[i].abs() < 1e-9);
        }
    }

    #[test]
    fn round_trip_identity_even() {
        let n = 16;
        let mut e = RealEngine::new(n);
        let input: Vec<f64> = (0..n).map(|i| (i as f64 * 0.3).sin()).collect();
        let mut d = e.win(input.clone());
        e.do_forward(&mut d).unwrap();
        e.do_inverse(&mut d).unwrap();
        for (g, w) in d.iter().zip(input.iter()) {
            assert!((g - w).abs() < 1e-9, "{g} != {w}");
        }
    }

    #[test]
    fn round_trip_identity_odd() {
        let n = 9;
        let mut e = RealEngine::new(n);
        let input: Vec<f64> = (0..n).map(|i| (i as f64 * 0.5).cos()).collect();
        let mut d = e.win(input.clone());
        e.do_forward(&mut d).unwrap();
        e.do_inverse(&mut d).unwrap();
        for (g, w) in d.iter().zip(input.iter()) {
            assert!((g - w).abs() < 1e-9, "{g} != {w}");
        }
    }

    #[test]
    fn real_complex_equivalence_even() {
        use super::super::complex_engine::ComplexEngine;
        let n = 16;
        let mut re = RealEngine::new(n);
        let input: Vec<f64> = (0..n).map(|i| ((i * 7) as f64 * 0.123).sin()).collect();
        let mut d = re.win(input.clone());
        re.do_forward(&mut d).unwrap();
        let mut full = Vec::new();
        HalfComplex::new(&mut d).to_complex(&mut full);

        let ce = ComplexEngine::new(n);
        let mut cd = ce.win(input.iter().map(|&x| Complex64::new(x, 0.0)).collect());
        ce.do_forward(&mut cd).unwrap();

        for (a, b) in full.iter().zip(cd.iter()) {
            assert!((a - b).norm() < 1e-9, "{a} != {b}");
        }
    }
}
