//! Spectrum view: polar (magnitude/phase) convenience wrapper around a
//! complex or half-complex DFT result, peak detection, quadratic peak
//! interpolation, and the standalone `dilate`/`zero_pad_spectrum` helpers
//! that operate directly on raw transform buffers.
//!
//! Grounded on `original_source/fft/s.go` (the `S` type), `fft/bin.go`
//! (`Ny`), `fft/fft.go` (`Dilate`) and `fft/zpad.go` (`ZeroPadTo`).

use crate::error::{DspError, DspResult};
use num_complex::Complex64;

/// The index of the first frequency bin at or above the Nyquist limit of
/// a transform of size `n`.
pub fn nyquist_bin(n: usize) -> usize {
    if n % 2 == 1 {
        n / 2 + 1
    } else {
        n / 2
    }
}

fn to_db(v: f64) -> f64 {
    let v = if v == 0.0 { 1e-20 } else { v };
    20.0 * v.log10()
}

fn from_db(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

/// Fits a parabola through three equally spaced samples `(l, c, r)` at
/// x = -1, 0, 1 and returns the vertex as `(offset, value)`, `offset` in
/// `(-0.5, 0.5)`.
fn parabola_vertex(l: f64, c: f64, r: f64) -> (f64, f64) {
    let denom = l - 2.0 * c + r;
    if denom == 0.0 {
        return (0.0, c);
    }
    let h = 0.5 * (l - r) / denom;
    let k = c - 0.25 * (l - r) * h;
    (h, k)
}

/// A polar view of a spectrum: magnitudes and phases for `n` frequency
/// bins, along with the cached Nyquist-bin index.
pub struct Spectrum {
    mags: Vec<f64>,
    phases: Vec<f64>,
    neg: usize,
    min: f64,
    max: f64,
}

impl Spectrum {
    /// Builds an empty spectrum of size `n`.
    pub fn new(n: usize) -> Self {
        Self {
            mags: vec![0.0; n],
            phases: vec![0.0; n],
            neg: nyquist_bin(n),
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Builds a spectrum from a full complex DFT result.
    pub fn from_complex(d: &[Complex64]) -> Self {
        let mut s = Self::new(d.len());
        s.set_from_complex(d).expect("length matches by construction");
        s
    }

    pub fn n(&self) -> usize {
        self.mags.len()
    }

    /// Index of the first bin at or above the Nyquist limit.
    pub fn ny(&self) -> usize {
        self.neg
    }

    fn at(&self, i: isize) -> usize {
        if i < 0 {
            (self.mags.len() as isize + i) as usize
        } else {
            i as usize
        }
    }

    pub fn at_complex(&self, i: isize) -> Complex64 {
        let j = self.at(i);
        Complex64::from_polar(self.mags[j], self.phases[j])
    }

    pub fn mag(&self, i: isize) -> f64 {
        self.mags[self.at(i)]
    }

    pub fn set_mag(&mut self, i: isize, m: f64) {
        let j = self.at(i);
        self.mags[j] = m;
        if m < self.min {
            self.min = m;
        }
        if m > self.max {
            self.max = m;
        }
    }

    pub fn mag_db(&self, i: isize) -> f64 {
        to_db(self.mag(i))
    }

    pub fn phase(&self, i: isize) -> f64 {
        self.phases[self.at(i)]
    }

    pub fn set_phase(&mut self, i: isize, p: f64) {
        let j = self.at(i);
        self.phases[j] = p;
    }

    /// Total power: `sqrt(2 * sum of squared magnitudes over the
    /// non-negative-frequency bins)`. Assumes `self` represents real data.
    pub fn power(&self) -> f64 {
        let total: f64 = self.mags[..self.neg].iter().map(|m| m * m).sum();
        (2.0 * total).sqrt()
    }

    /// Indices of local maxima among the non-negative-frequency bins: a
    /// bin higher than or equal to both neighbors, and strictly higher
    /// than at least one.
    pub fn peaks(&self) -> Vec<usize> {
        let n = self.mags.len();
        let mut out = Vec::new();
        if n < 2 {
            return out;
        }
        if n == 2 {
            out.push(1);
            return out;
        }
        let m = self.neg;
        let mut l;
        let mut c = self.mags[0];
        let mut r = self.mags[1];
        let mut j = 2;
        while j < m {
            l = c;
            c = r;
            r = self.mags[j];
            if c >= l && c >= r && (c > l || c > r) {
                out.push(j - 1);
            }
            j += 1;
        }
        if r >= c {
            out.push(m - 1);
        }
        out
    }

    /// Quadratic peak interpolation (on log-magnitude scale) around bin
    /// `i`. Returns `(fractional index, magnitude, phase)`. Falls back to
    /// the raw bin near the spectrum edges (`i <= 1` or `i >= ny()-2`).
    pub fn peak_interp_quadratic(&self, i: usize) -> (f64, f64, f64) {
        if i <= 1 || i + 2 >= self.neg {
            return (i as f64, self.mags[i], self.phases[i]);
        }
        let l = to_db(self.mags[i - 1]);
        let c = to_db(self.mags[i]);
        let r = to_db(self.mags[i + 1]);
        let (h, k) = parabola_vertex(l, c, r);
        (i as f64 + h, from_db(k), 0.0)
    }

    /// Interpolates all peaks, appending `(index, magnitude, phase)`
    /// triples to `dst`.
    pub fn interp_peaks_to(&self, dst: &mut Vec<f64>) {
        for p in self.peaks() {
            let (i, m, ph) = self.peak_interp_quadratic(p);
            dst.push(i);
            dst.push(m);
            dst.push(ph);
        }
    }

    pub fn set_from_complex(&mut self, d: &[Complex64]) -> DspResult<()> {
        if d.len() != self.mags.len() {
            return Err(DspError::DimensionMismatch {
                expected: self.mags.len(),
                got: d.len(),
            });
        }
        self.min = f64::INFINITY;
        self.max = f64::NEG_INFINITY;
        for (i, c) in d.iter().enumerate() {
            let (m, p) = c.to_polar();
            self.mags[i] = m;
            self.phases[i] = p;
            if m < self.min {
                self.min = m;
            }
            if m > self.max {
                self.max = m;
            }
        }
        Ok(())
    }

    /// Writes the spectrum back out in rectangular complex form.
    pub fn to_complex(&self, dst: &mut Vec<Complex64>) {
        dst.clear();
        dst.reserve(self.mags.len());
        for i in 0..self.mags.len() {
            dst.push(Complex64::from_polar(self.mags[i], self.phases[i]));
        }
    }

    /// Forces conjugate (Hermitian) symmetry on the negative-frequency
    /// half so an inverse transform yields a real signal.
    pub fn fold_real(&mut self) {
        let n = self.neg;
        let m = self.phases.len();
        self.phases[0] = 0.0;
        if m % 2 == 0 {
            self.phases[n] = 0.0;
        }
        for i in 1..n {
            self.phases[m - i] = -self.phases[i];
            self.mags[m - i] = self.mags[i];
        }
    }
}

/// Changes the frequency basis of a complex DFT buffer `d` by the factor
/// `p/q`, redistributing (and clobbering, on collision) bins accordingly.
/// A pitch-shift of the quantized frequency domain.
pub fn dilate(d: &mut [Complex64], p: usize, q: usize) {
    if p == q {
        return;
    }
    let n = d.len();
    let h = n / 2;
    let zero = Complex64::new(0.0, 0.0);
    if p > q {
        for i in (1..=h).rev() {
            let dst = (i * p) / q;
            if dst > h {
                d[i] = zero;
                continue;
            }
            let v = d[i];
            d[i] = zero;
            d[dst] += v;
        }
        for i in (h + 1..n).rev() {
            let dst = (i * p) / q;
            if dst >= n {
                d[i] = zero;
                continue;
            }
            let v = d[i];
            d[i] = zero;
            d[dst] += v;
        }
        return;
    }
    for i in 1..=h {
        let dst = (i * p) / q;
        if dst > h {
            d[i] = zero;
            continue;
        }
        let v = d[i];
        d[i] = zero;
        d[dst] += v;
    }
    for i in h + 1..n {
        let dst = (i * p) / q;
        if dst > n {
            d[i] = zero;
            continue;
        }
        let v = d[i];
        d[i] = zero;
        d[dst] += v;
    }
}

/// Zero-pads a complex spectrum `src` with `n` zero bins inserted between
/// the non-negative and negative frequencies, for time-domain
/// interpolation via inverse transform. `dst`'s capacity is reused when
/// sufficient.
pub fn zero_pad_spectrum(mut dst: Vec<Complex64>, src: &[Complex64], n: usize) -> Vec<Complex64> {
    let l = src.len();
    if dst.capacity() < l + n {
        dst = Vec::with_capacity(l + n);
    }
    dst.clear();
    dst.resize(l + n, Complex64::new(0.0, 0.0));
    let mut m = l / 2;
    if n % 2 == 0 {
        m += 1;
    }
    dst[..m].copy_from_slice(&src[..m]);
    dst[m + n..].copy_from_slice(&src[m..]);
    dst
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nyquist_bin_matches_parity() {
        assert_eq!(nyquist_bin(8), 4);
        assert_eq!(nyquist_bin(9), 5);
    }

    #[test]
    fn power_of_single_dc_bin() {
        let mut d = vec![Complex64::new(0.0, 0.0); 8];
        d[0] = Complex64::new(4.0, 0.0);
        let s = Spectrum::from_complex(&d);
        assert!((s.power() - 4.0 * 2f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn peak_interp_returns_raw_bin_near_edges() {
        let d = vec![Complex64::new(1.0, 0.0); 16];
        let s = Spectrum::from_complex(&d);
        let (idx, mag, _) = s.peak_interp_quadratic(1);
        assert_eq!(idx, 1.0);
        assert!((mag - 1.0).abs() < 1e-9);
    }

    #[test]
    fn fold_real_mirrors_conjugate_symmetry() {
        let n = 8;
        let mut d = vec![Complex64::new(0.0, 0.0); n];
        d[2] = Complex64::new(1.0, 2.0);
        let mut s = Spectrum::from_complex(&d);
        s.fold_real();
        let ny = s.ny();
        assert!((s.phase(2) + s.phase((n - 2) as isize)).abs() < 1e-9);
        assert!((s.mag(2) - s.mag((n - 2) as isize)).abs() < 1e-9);
        assert_eq!(s.phase(0), 0.0);
        assert_eq!(ny, 4);
    }

    #[test]
    fn zero_pad_inserts_between_nyquist_halves() {
        let src: Vec<Complex64> = (0..4).map(|i| Complex64::new(i as f64, 0.0)).collect();
        let out = zero_pad_spectrum(Vec::new(), &src, 4);
        assert_eq!(out.len(), 8);
        assert_eq!(out[0], Complex64::new(0.0, 0.0));
        assert_eq!(out[1], Complex64::new(1.0, 0.0));
        assert_eq!(out[6], Complex64::new(2.0, 0.0));
        assert_eq!(out[7], Complex64::new(3.0, 0.0));
    }

    #[test]
    fn dilate_is_noop_when_ratio_is_one() {
        let mut d: Vec<Complex64> = (0..8).map(|i| Complex64::new(i as f64, 0.0)).collect();
        let before = d.clone();
        dilate(&mut d, 3, 3);
        assert_eq!(d, before);
    }
}
