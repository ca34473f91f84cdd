//! Bluestein chirp tables: the sample-wise chirp sequence and its
//! precomputed, pre-scaled radix-2 transform.
//!
//! Grounded on `original_source/fft/chirpz.go`.

use super::radix2::radix2;
use super::twiddle::Twiddles;
use num_complex::Complex64;

pub struct ChirpTables {
    /// Chirp sequence `e^{+-i*pi*k^2/n}`, wrapped symmetrically, zero
    /// elsewhere, length `padded`.
    pub d: Vec<Complex64>,
    /// Radix-2 transform of `d`, scaled, length `padded`.
    pub td: Vec<Complex64>,
}

impl ChirpTables {
    pub fn new(n: usize, padded: usize, tw: &Twiddles, tw_is_inv: bool) -> Self {
        log::trace!("building chirp tables n={n} padded={padded}");
        let mut d = vec![Complex64::new(0.0, 0.0); padded];
        d[0] = Complex64::new(1.0, 0.0);
        let nf = n as f64;
        for i in 1..n {
            let angle = -std::f64::consts::PI * (i * i) as f64 / nf;
            let mut c = Complex64::new(angle.cos(), angle.sin());
            if !tw_is_inv {
                c = c.conj();
            }
            d[i] = c;
            d[padded - i] = c;
        }
        let mut td = d.clone();
        radix2(&mut td, tw, true);
        Self { d, td }
    }
}
