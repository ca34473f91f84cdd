//! Half-complex spectrum container: the Hermitian-packed DFT of real
//! input, stored in `N` real numbers as
//! `[r_0, r_1, ..., r_{floor(N/2)}, i_{ceil(N/2)-1}, ..., i_2, i_1]`.
//!
//! Grounded on `original_source/fft/hc.go`.

use num_complex::Complex64;

/// A view over a half-complex spectrum of `N` real numbers.
#[derive(Debug)]
pub struct HalfComplex<'a>(pub &'a mut [f64]);

impl<'a> HalfComplex<'a> {
    pub fn new(data: &'a mut [f64]) -> Self {
        Self(data)
    }

    fn n(&self) -> usize {
        self.0.len()
    }

    /// Number of complex bins represented (`floor(N/2) + 1`).
    pub fn len(&self) -> usize {
        self.n() / 2 + 1
    }

    pub fn is_empty(&self) -> bool {
        self.n() == 0
    }

    /// Reads complex bin `i`.
    pub fn cmplx(&self, i: usize) -> Complex64 {
        let n = self.n();
        if i == 0 || 2 * i == n {
            Complex64::new(self.0[i], 0.0)
        } else {
            Complex64::new(self.0[i], self.0[n - i])
        }
    }

    /// Writes complex bin `i`; a no-op on the imaginary half at `i == 0`
    /// or `i == N/2`, since those bins are always real.
    pub fn set_cmplx(&mut self, i: usize, c: Complex64) {
        let n = self.n();
        self.0[i] = c.re;
        if i == 0 || 2 * i == n {
            return;
        }
        self.0[n - i] = c.im;
    }

    pub fn real(&self, i: usize) -> f64 {
        self.0[i]
    }

    pub fn set_real(&mut self, i: usize, v: f64) {
        self.0[i] = v;
    }

    pub fn imag(&self, i: usize) -> f64 {
        let n = self.n();
        if i == 0 || 2 * i == n {
            0.0
        } else {
            self.0[n - i]
        }
    }

    pub fn set_imag(&mut self, i: usize, v: f64) {
        let n = self.n();
        if i == 0 || 2 * i == n {
            return;
        }
        self.0[n - i] = v;
    }

    /// Elementwise complex multiply of `self` by `other`, in place.
    pub fn dot(&mut self, other: &HalfComplex) {
        assert_eq!(self.len(), other.len(), "half-complex length mismatch");
        for i in 0..self.len() {
            let a = self.cmplx(i);
            let b = other.cmplx(i);
            self.set_cmplx(i, a * b);
        }
    }

    /// Expands to a full complex vector of length `N`, trusting
    /// Hermitian symmetry for the upper half.
    pub fn to_complex(&self, dst: &mut Vec<Complex64>) {
        let n = self.n();
        dst.clear();
        dst.reserve(n);
        for i in 0..self.len() {
            dst.push(self.cmplx(i));
        }
        for i in (self.len())..n {
            dst.push(self.cmplx(n - i).conj());
        }
    }

    /// Fills `self` from a full complex vector, trusting symmetry (only
    /// the non-negative-frequency half of `src` is read).
    pub fn from_complex(&mut self, src: &[Complex64]) {
        let n = self.n();
        assert_eq!(src.len(), n, "complex vector length mismatch");
        for i in 0..self.len() {
            self.set_cmplx(i, src[i]);
        }
    }

    /// Converts to polar (magnitude, phase) arrays of length `N/2+1`.
    pub fn to_polar(&self, mags: &mut [f64], phases: &mut [f64]) {
        let len = self.len();
        assert_eq!(mags.len(), len);
        assert_eq!(phases.len(), len);
        for i in 0..len {
            let c = self.cmplx(i);
            mags[i] = c.norm();
            phases[i] = c.arg();
        }
    }

    /// Fills `self` from polar (magnitude, phase) arrays of length
    /// `N/2+1`.
    pub fn from_polar(&mut self, mags: &[f64], phases: &[f64]) {
        let len = self.len();
        assert_eq!(mags.len(), len);
        assert_eq!(phases.len(), len);
        for i in 0..len {
            self.set_cmplx(i, Complex64::from_polar(mags[i], phases[i]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_complex_on_hermitian_input() {
        let n = 8;
        let mut full = vec![Complex64::new(0.0, 0.0); n];
        full[0] = Complex64::new(3.0, 0.0);
        full[1] = Complex64::new(1.0, 2.0);
        full[2] = Complex64::new(-1.0, 0.5);
        full[3] = Complex64::new(0.2, -0.1);
        full[4] = Complex64::new(5.0, 0.0);
        for i in 1..4 {
            full[n - i] = full[i].conj();
        }

        let mut buf = vec![0.0f64; n];
        let mut hc = HalfComplex::new(&mut buf);
        hc.from_complex(&full);

        let mut expanded = Vec::new();
        hc.to_complex(&mut expanded);
        for (a, b) in expanded.iter().zip(full.iter()) {
            assert!((a - b).norm() < 1e-12);
        }
    }

    #[test]
    fn dc_and_nyquist_imaginary_are_zero() {
        let mut buf = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let mut hc = HalfComplex::new(&mut buf);
        hc.set_cmplx(0, Complex64::new(9.0, 123.0));
        assert_eq!(hc.imag(0), 0.0);
    }
}
