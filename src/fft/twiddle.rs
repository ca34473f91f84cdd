//! Twiddle table: precomputed roots of unity shared between a forward and
//! an inverse transform of the same padded size.
//!
//! Grounded on `original_source/fft/twiddle.go`: a single cos/sin table of
//! length `p` is built once, and the `inv` flag only flips the sign used
//! when reading the sin table (forward uses `e^{-2*pi*i*k/p}`, inverse uses
//! `e^{+2*pi*i*k/p}`).

use num_complex::Complex64;

pub struct Twiddles {
    cos_tbl: Vec<f64>,
    sin_tbl: Vec<f64>,
    p: usize,
    inv_sign: f64,
}

impl Twiddles {
    /// Builds the cos/sin tables for a transform of padded size `p`.
    pub fn new(p: usize, inv: bool) -> Self {
        log::trace!("building twiddle table of size {p} (inv={inv})");
        let mut cos_tbl = Vec::with_capacity(p);
        let mut sin_tbl = Vec::with_capacity(p);
        let w = 2.0 * std::f64::consts::PI / p as f64;
        for i in 0..p {
            let (s, c) = (i as f64 * w).sin_cos();
            cos_tbl.push(c);
            sin_tbl.push(s);
        }
        Self {
            cos_tbl,
            sin_tbl,
            p,
            inv_sign: if inv { 1.0 } else { -1.0 },
        }
    }

    #[inline]
    fn cos(&self, i: usize) -> f64 {
        self.cos_tbl[i % self.p]
    }

    #[inline]
    fn sin(&self, i: usize) -> f64 {
        self.inv_sign * self.sin_tbl[i % self.p]
    }

    /// Returns `e^{sign*2*pi*i*i/p}` for index `i` (sign set by `inv`).
    #[inline]
    pub fn cmplx(&self, i: usize) -> Complex64 {
        Complex64::new(self.cos(i), self.sin(i))
    }

    /// Same as `cmplx`, but with the effective index `i * p / q mod p`.
    #[inline]
    pub fn cmplx_q(&self, i: usize, q: usize) -> Complex64 {
        let j = (i * self.p / q) % self.p;
        self.cmplx(j)
    }

    pub fn len(&self) -> usize {
        self.p
    }

    pub fn is_empty(&self) -> bool {
        self.p == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_and_inverse_are_conjugates() {
        let fwd = Twiddles::new(8, false);
        let inv = Twiddles::new(8, true);
        for i in 0..8 {
            let f = fwd.cmplx(i);
            let b = inv.cmplx(i);
            assert!((f.re - b.re).abs() < 1e-12);
            assert!((f.im + b.im).abs() < 1e-12);
        }
    }

    #[test]
    fn cmplx_q_matches_scaled_index() {
        let t = Twiddles::new(16, false);
        // cmplx_q(i, q) should equal cmplx(i * 16 / q)
        assert_eq!(t.cmplx_q(3, 8), t.cmplx(6));
    }
}
