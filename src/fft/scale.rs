//! Scaling applied to forward/inverse radix-2 transforms to make them
//! reciprocal and to satisfy Parseval's equality.
//!
//! Grounded on `original_source/fft/scale.go`.

use num_complex::Complex64;

pub fn scale(d: &mut [Complex64]) {
    let n = d.len();
    if n <= 1 {
        return;
    }
    let m = 1.0 / (n as f64).sqrt();
    for v in d.iter_mut() {
        *v *= m;
    }
}
