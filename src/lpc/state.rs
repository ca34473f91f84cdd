//! Incremental linear-prediction state: a ring of the last `order`
//! samples and a reversed copy of the model's coefficients, so
//! prediction is a single dot product advancing the ring pointer.
//!
//! Grounded on `original_source/lpc/state.go`.

/// Incremental prediction/synthesis state derived from an [`Lpc`](super::Lpc)
/// model.
pub struct LpcState {
    alpha: Vec<f64>,
    hist: Vec<f64>,
    i: usize,
}

impl LpcState {
    /// `alpha` is the model's coefficients (`alpha[1..]` from
    /// [`super::Lpc::alpha`], excluding the unused `alpha[0]`); `seed`
    /// supplies the initial ring contents (only `alpha.len()` samples
    /// are read).
    pub(crate) fn new(alpha: &[f64], seed: &[f64]) -> Self {
        let order = alpha.len();
        let mut rev: Vec<f64> = alpha.to_vec();
        rev.reverse();
        Self {
            alpha: rev,
            hist: seed[..order].to_vec(),
            i: 0,
        }
    }

    /// The model's current prediction for the next value.
    pub fn predict(&self) -> f64 {
        let n = self.hist.len();
        let mut total = 0.0;
        for j in 0..n {
            let k = (j + self.i) % n;
            total += self.hist[k] * self.alpha[j];
        }
        total
    }

    /// Advances the state by one actual sample `d`, returning its
    /// residue against the current prediction.
    pub fn consume(&mut self, d: f64) -> f64 {
        let p = self.predict();
        let n = self.hist.len();
        self.hist[self.i] = d;
        self.i += 1;
        if self.i == n {
            self.i = 0;
        }
        d - p
    }

    /// Synthesizes the next value from residue `r`, advancing the state
    /// as if that value had been consumed.
    pub fn produce(&mut self, r: f64) -> f64 {
        let m = self.predict();
        let v = r + m;
        self.consume(v);
        v
    }
}

#[cfg(test)]
mod tests {
    use super::super::Lpc;

    #[test]
    fn consume_then_produce_round_trips() {
        let order = 3;
        let mut lpc = Lpc::new(order);
        let d: Vec<f64> = (0..64).map(|i| (i as f64 * 0.2).sin()).collect();
        lpc.model(&d);

        let mut enc = lpc.state(&d[..order]);
        let residues: Vec<f64> = d[order..].iter().map(|&v| enc.consume(v)).collect();

        let mut dec = lpc.state(&d[..order]);
        for (&r, &want) in residues.iter().zip(d[order..].iter()) {
            let got = dec.produce(r);
            assert!((got - want).abs() < 1e-9, "{got} != {want}");
        }
    }
}
