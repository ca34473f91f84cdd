//! Bit-reversal permutation used to bring natural-order input into the
//! order expected by the iterative radix-2 DIT butterflies.
//!
//! Grounded on `original_source/fft/revbin.go`.

use num_complex::Complex64;

fn log2_exact(n: usize) -> u32 {
    debug_assert!(n.is_power_of_two());
    n.trailing_zeros()
}

fn bit_reverse(mut i: usize, bits: u32) -> usize {
    let mut r = 0usize;
    for _ in 0..bits {
        r = (r << 1) | (i & 1);
        i >>= 1;
    }
    r
}

/// Swaps `d[i]` with `d[bit_reverse(i)]` whenever the latter is smaller,
/// for `d` of power-of-two length.
pub fn permute(d: &mut [Complex64]) {
    let n = d.len();
    if n <= 1 {
        return;
    }
    let bits = log2_exact(n);
    for i in 0..n {
        let j = bit_reverse(i, bits);
        if j < i {
            d.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutes_size_8() {
        let mut d: Vec<Complex64> = (0..8).map(|i| Complex64::new(i as f64, 0.0)).collect();
        permute(&mut d);
        let expect = [0, 4, 2, 6, 1, 5, 3, 7];
        for (i, &e) in expect.iter().enumerate() {
            assert_eq!(d[i].re, e as f64);
        }
    }

    #[test]
    fn is_involution() {
        let mut d: Vec<Complex64> = (0..16).map(|i| Complex64::new(i as f64, 0.0)).collect();
        let orig = d.clone();
        permute(&mut d);
        permute(&mut d);
        for (a, b) in d.iter().zip(orig.iter()) {
            assert_eq!(a.re, b.re);
        }
    }
}
