//! Byeong-Gi Lee's O(N log N) recursive type-II/III discrete cosine
//! transform, an O(N^2) naive reference for cross-checking it, and a
//! coefficient significance ranker built on top.
//!
//! Grounded on `original_source/dct/t.go`, `dct/cos.go` and
//! `dct/naive.go`.

pub mod rank;
pub use rank::SignificanceRanker;

fn gen_cos(level: u32) -> Vec<f64> {
    let n = 1usize << level;
    let pion = std::f64::consts::PI / n as f64;
    (0..n).map(|j| ((j as f64 + 0.5) * pion).cos()).collect()
}

/// A type-II/III DCT engine for a fixed power-of-two size `n`.
///
/// # Panics
/// [`DctEngine::new`] panics if `n` is not a power of two: this is a
/// precondition violation, not a recoverable error.
pub struct DctEngine {
    n: usize,
    p: u32,
    tmp: Vec<f64>,
    cos_tbl: Vec<Vec<f64>>,
    scf: f64,
}

impl DctEngine {
    pub fn new(n: usize) -> Self {
        assert!(n.is_power_of_two(), "DCT size must be a power of two, got {n}");
        let p = n.trailing_zeros();
        log::debug!("DctEngine::new(n={n})");
        let cos_tbl = (0..=p).map(gen_cos).collect();
        let scf = (1.0 / (n as f64 / 2.0)).sqrt();
        Self {
            n,
            p,
            tmp: vec![0.0; n],
            cos_tbl,
            scf,
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Forward (type-II) DCT of `d`, scaled, in place.
    ///
    /// # Panics
    /// Panics if `d.len() != n()`.
    pub fn do_forward(&mut self, d: &mut [f64]) {
        assert_eq!(d.len(), self.n, "wrong size input");
        let mut e = std::mem::take(&mut self.tmp);
        Self::do_rec(d, &mut e, self.p, &self.cos_tbl);
        self.tmp = e;
        for v in d.iter_mut() {
            *v *= self.scf;
        }
    }

    /// Inverse (type-III) DCT of `d`, scaled, in place.
    ///
    /// # Panics
    /// Panics if `d.len() != n()`.
    pub fn do_inverse(&mut self, d: &mut [f64]) {
        assert_eq!(d.len(), self.n, "wrong size input");
        d[0] /= 2.0;
        let mut e = std::mem::take(&mut self.tmp);
        Self::inv_rec(d, &mut e, self.p, &self.cos_tbl);
        self.tmp = e;
        for v in d.iter_mut() {
            *v *= self.scf;
        }
    }

    fn do_rec(d: &mut [f64], e: &mut [f64], p: u32, cos_tbl: &[Vec<f64>]) {
        if p == 0 {
            return;
        }
        let n = d.len();
        let h = n / 2;
        let top = n - 1;
        let cs = &cos_tbl[p as usize];
        for i in 0..h {
            let x = d[i];
            let y = d[top - i];
            e[i] = x + y;
            e[h + i] = (x - y) / (2.0 * cs[i]);
        }
        let (e_lo, e_hi) = e.split_at_mut(h);
        Self::do_rec(e_lo, &mut d[..h], p - 1, cos_tbl);
        Self::do_rec(e_hi, &mut d[..h], p - 1, cos_tbl);

        for i in 0..h.saturating_sub(1) {
            let i2 = 2 * i;
            d[i2] = e[i];
            let j = h + i;
            d[i2 + 1] = e[j] + e[j + 1];
        }
        d[top - 1] = e[h - 1];
        d[top] = e[top];
    }

    fn inv_rec(d: &mut [f64], e: &mut [f64], p: u32, cos_tbl: &[Vec<f64>]) {
        if p == 0 {
            return;
        }
        let n = d.len();
        let h = n / 2;
        let top = n - 1;
        e[0] = d[0];
        e[h] = d[1];
        for i in 1..h {
            let i2 = 2 * i;
            e[i] = d[i2];
            e[h + i] = d[i2 - 1] + d[i2 + 1];
        }
        let (e_lo, e_hi) = e.split_at_mut(h);
        Self::inv_rec(e_lo, &mut d[..h], p - 1, cos_tbl);
        Self::inv_rec(e_hi, &mut d[..h], p - 1, cos_tbl);

        let cs = &cos_tbl[p as usize];
        for i in 0..h {
            let x = e[i];
            let y = e[h + i] / (2.0 * cs[i]);
            d[i] = x + y;
            d[top - i] = x - y;
        }
    }
}

/// O(N^2) reference type-II DCT, for cross-checking [`DctEngine`]. Works
/// for any `N`, not just powers of two.
pub fn naive_forward(d: &mut [f64]) {
    let n = d.len();
    let nf = n as f64;
    let pion = std::f64::consts::PI / nf;
    let mut tmp = vec![0.0; n];
    for i in 0..n {
        let fi = i as f64;
        let mut total = 0.0;
        for (j, &v) in d.iter().enumerate() {
            total += v * ((j as f64 + 0.5) * fi * pion).cos();
        }
        tmp[i] = total;
    }
    let scale = 1.0 / (nf / 2.0).sqrt();
    for (v, t) in d.iter_mut().zip(tmp.iter()) {
        *v = t * scale;
    }
}

/// O(N^2) reference type-III (inverse) DCT.
pub fn naive_inverse(d: &mut [f64]) {
    let n = d.len();
    let nf = n as f64;
    let pion = std::f64::consts::PI / nf;
    let hz = d[0] / 2.0;
    let mut tmp = vec![0.0; n];
    for i in 0..n {
        let fi = i as f64;
        let mut total = hz;
        for (j, &v) in d.iter().enumerate().skip(1) {
            total += v * ((fi + 0.5) * j as f64 * pion).cos();
        }
        tmp[i] = total;
    }
    let scale = 1.0 / (nf / 2.0).sqrt();
    for (v, t) in d.iter_mut().zip(tmp.iter()) {
        *v = t * scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_identity() {
        let n = 16;
        let mut e = DctEngine::new(n);
        let input: Vec<f64> = (0..n).map(|i| (i as f64 * 0.4).sin()).collect();
        let mut d = input.clone();
        e.do_forward(&mut d);
        e.do_inverse(&mut d);
        for (g, w) in d.iter().zip(input.iter()) {
            assert!((g - w).abs() < 1e-8, "{g} != {w}");
        }
    }

    #[test]
    fn matches_naive_forward() {
        let n = 8;
        let input: Vec<f64> = (0..n).map(|i| (i as f64 * 1.3).cos()).collect();
        let mut fast = input.clone();
        DctEngine::new(n).do_forward(&mut fast);
        let mut slow = input;
        naive_forward(&mut slow);
        for (g, w) in fast.iter().zip(slow.iter()) {
            assert!((g - w).abs() < 1e-8, "{g} != {w}");
        }
    }

    #[test]
    #[should_panic(expected = "power of two")]
    fn non_power_of_two_size_panics() {
        DctEngine::new(6);
    }
}
