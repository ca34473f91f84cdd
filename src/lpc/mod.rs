//! Linear predictive coding: autocorrelation modelling via the
//! Levinson-Durbin recursion, residue/restore for whitening and
//! resynthesizing a signal against a model, and incremental
//! prediction/synthesis state.
//!
//! Grounded on `original_source/lpc/t.go` and `lpc/state.go`.

pub mod state;

pub use state::LpcState;

const EPS: f64 = 1e-12;

/// A linear predictive coder of fixed `order`.
///
/// # Panics
/// [`Lpc::new`] panics if `order < 1`: this is a precondition violation,
/// not a recoverable error.
pub struct Lpc {
    r: Vec<f64>,
    alpha: Vec<f64>,
}

impl Lpc {
    pub fn new(order: usize) -> Self {
        assert!(order >= 1, "LPC order must be at least 1, got {order}");
        log::debug!("Lpc::new(order={order})");
        Self {
            r: vec![0.0; order + 1],
            alpha: vec![0.0; order + 1],
        }
    }

    pub fn order(&self) -> usize {
        self.r.len() - 1
    }

    /// The zero-lag autocorrelation value from the last [`Self::model`]
    /// call, useful for normalizing error.
    pub fn r0(&self) -> f64 {
        self.r[0]
    }

    /// The model's current coefficients, `alpha[0]` unused
    /// (conventionally 1), `alpha[1..=order()]` the prediction weights.
    pub fn alpha(&self) -> &[f64] {
        &self.alpha
    }

    fn autocorrelation(&mut self, d: &[f64]) {
        let order = self.order();
        let n = d.len() - order;
        for v in self.r.iter_mut() {
            *v = 0.0;
        }
        for i in 0..n {
            let u = d[i];
            for (j, r) in self.r.iter_mut().enumerate() {
                *r += u * d[i + j];
            }
        }
        let nf = n as f64;
        for v in self.r.iter_mut() {
            *v /= nf;
        }
    }

    /// Fits the model to `d` (length at least `order() + 1`) via the
    /// Levinson-Durbin recursion, returning the final prediction error.
    ///
    /// # Panics
    /// Panics if `d.len() < order() + 1`.
    pub fn model(&mut self, d: &[f64]) -> f64 {
        let order = self.order();
        assert!(d.len() >= order + 1, "input shorter than order + 1");
        self.autocorrelation(d);

        let mut err = self.r[0];
        if err.abs() < EPS {
            err = 1.0 / EPS;
        }
        self.alpha.iter_mut().for_each(|a| *a = 0.0);
        let mut tmp = vec![0.0; order + 1];

        let mut i = 1;
        while i <= order {
            let mut k = self.r[i];
            for j in 1..i {
                k -= self.alpha[j] * self.r[i - j];
            }
            k /= err;
            if k.abs() > 1.0 {
                k = 1.0 / k;
            }
            tmp[i] = k;
            for j in 1..i {
                tmp[j] = self.alpha[j] - k * self.alpha[i - j];
            }
            self.alpha[..=i].copy_from_slice(&tmp[..=i]);
            err *= 1.0 - k * k;
            i += 1;
            if err.abs() < EPS {
                break;
            }
        }
        err
    }

    /// Whitens `d` in place: for `i` from `d.len()-1` down to `order()`,
    /// replaces `d[i]` with its prediction residue. Iterates high-to-low
    /// so earlier inputs aren't clobbered before they're read.
    pub fn residue(&self, d: &mut [f64]) {
        let order = self.order();
        for i in (order..d.len()).rev() {
            let mut model = 0.0;
            for o in 1..=order {
                model += self.alpha[o] * d[i - o];
            }
            d[i] -= model;
        }
    }

    /// Inverts [`Self::residue`]: for `i` from `order()` up to
    /// `d.len()-1`, reconstructs `d[i]` from the preceding samples and
    /// its residue. Iterates low-to-high.
    pub fn restore(&self, d: &mut [f64]) {
        let order = self.order();
        for i in order..d.len() {
            let mut acc = 0.0;
            for o in 1..=order {
                acc += self.alpha[o] * d[i - o];
            }
            d[i] += acc;
        }
    }

    /// Builds an incremental prediction/synthesis state seeded with the
    /// last `order()` samples of `seed` (reading `seed[..order()]`).
    pub fn state(&self, seed: &[f64]) -> LpcState {
        LpcState::new(&self.alpha[1..], seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "order must be at least 1")]
    fn order_zero_panics() {
        Lpc::new(0);
    }

    #[test]
    fn residue_is_zero_on_constant_signal() {
        for order in 1..=3 {
            let mut lpc = Lpc::new(order);
            let d: Vec<f64> = vec![3.0; 16];
            lpc.model(&d);
            let mut residue = d.clone();
            lpc.residue(&mut residue);
            for &v in &residue[order..] {
                assert_eq!(v, 0.0, "order {order}: residue should be exactly 0");
            }
        }
    }

    #[test]
    fn restore_inverts_residue() {
        let order = 4;
        let mut lpc = Lpc::new(order);
        let d: Vec<f64> = (0..64).map(|i| (i as f64 * 0.31).sin() + 0.1 * (i as f64 * 2.7).cos()).collect();
        lpc.model(&d);

        let mut residue = d.clone();
        lpc.residue(&mut residue);
        lpc.restore(&mut residue);

        for (g, w) in residue[order..].iter().zip(d[order..].iter()) {
            assert!((g - w).abs() < 1e-3, "{g} != {w}");
        }
    }

    #[test]
    fn sinusoid_model_has_small_error() {
        let order = 4;
        let mut lpc = Lpc::new(order);
        let d: Vec<f64> = (0..200).map(|i| (i as f64 * 0.15).sin()).collect();
        let err = lpc.model(&d);
        assert!(err.abs() < lpc.r0().abs() + 1.0);
    }
}
