//! In-place, iterative radix-2 decimation-in-time Cooley-Tukey transform.
//!
//! Grounded on `original_source/fft/r2.go`, restated with the crate's own
//! twiddle table and bit-reversal permute.

use super::revbin::permute;
use super::scale::scale;
use super::twiddle::Twiddles;
use num_complex::Complex64;

/// Runs the radix-2 DIT transform in place on `d` (length must be a power
/// of two). `tw` supplies the twiddle factors for the desired direction;
/// `do_scale` multiplies the result by `1/sqrt(len(d))` afterwards.
pub fn radix2(d: &mut [Complex64], tw: &Twiddles, do_scale: bool) {
    let n = d.len();
    debug_assert!(n.is_power_of_two());
    if n == 1 {
        return;
    }
    if n == 2 {
        let e = d[0];
        let o = d[1];
        d[0] = e + o;
        d[1] = e - o;
        if do_scale {
            scale(d);
        }
        return;
    }

    permute(d);

    let mut m = 2usize;
    while m <= n {
        let h = m / 2;
        let mut q = 0usize;
        while q < n {
            for r in 0..h {
                let a = q + r;
                let b = a + h;
                let c = tw.cmplx_q(r, m);
                let e = d[a];
                let o = d[b] * c;
                d[a] = e + o;
                d[b] = e - o;
            }
            q += m;
        }
        m *= 2;
    }

    if do_scale {
        scale(d);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_dft(d: &[Complex64], inv: bool) -> Vec<Complex64> {
        let n = d.len();
        let sign = if inv { 1.0 } else { -1.0 };
        (0..n)
            .map(|k| {
                let mut acc = Complex64::new(0.0, 0.0);
                for (j, &v) in d.iter().enumerate() {
                    let ang = sign * 2.0 * std::f64::consts::PI * (k * j) as f64 / n as f64;
                    acc += v * Complex64::new(ang.cos(), ang.sin());
                }
                acc
            })
            .collect()
    }

    #[test]
    fn matches_naive_dft_size_8() {
        let input: Vec<Complex64> = (0..8)
            .map(|i| Complex64::new((i as f64 * 0.37).sin(), 0.0))
            .collect();
        let mut got = input.clone();
        let tw = Twiddles::new(8, false);
        radix2(&mut got, &tw, false);
        let want = naive_dft(&input, false);
        for (g, w) in got.iter().zip(want.iter()) {
            assert!((g - w).norm() < 1e-9);
        }
    }

    #[test]
    fn scaled_round_trip_is_identity() {
        let input: Vec<Complex64> = (0..16)
            .map(|i| Complex64::new(i as f64, -(i as f64) * 0.5))
            .collect();
        let mut d = input.clone();
        let fwd = Twiddles::new(16, false);
        let inv = Twiddles::new(16, true);
        radix2(&mut d, &fwd, true);
        radix2(&mut d, &inv, true);
        for (g, w) in d.iter().zip(input.iter()) {
            assert!((g - w).norm() < 1e-9);
        }
    }

    #[test]
    fn size_2_explicit_case() {
        let mut d = vec![Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0)];
        let tw = Twiddles::new(2, false);
        radix2(&mut d, &tw, true);
        assert!((d[0] - Complex64::new(2f64.sqrt(), 0.0)).norm() < 1e-9);
        assert!(d[1].norm() < 1e-9);
    }
}
