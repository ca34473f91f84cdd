//! Convolution against a precomputed ("kernel") operand: the kernel's
//! half-complex transform is computed once at construction, so repeated
//! calls only transform the varying argument.
//!
//! Grounded on `original_source/convol/k.go`.

use super::{pad_vec, win_to, Convolver};
use crate::error::{DspError, DspResult};
use crate::fft::halfcomplex::HalfComplex;

/// A convolver with a fixed kernel, precomputed at construction.
pub struct Kernel {
    t: Convolver,
    kernel: Vec<f64>,
}

impl Kernel {
    /// Builds a kernel-precomputed convolver for a kernel of the given
    /// values, against arguments of length `arg_len`.
    pub fn new(kernel: &[f64], arg_len: usize) -> Self {
        let mut t = Convolver::new(kernel.len(), arg_len);
        let pad_l = t.pad_l();
        let mut krn = t.win_a(Vec::new());
        krn[..kernel.len()].copy_from_slice(kernel);
        let mut krn = pad_vec(krn, pad_l);
        t.ft.set_scale(false);
        t.ft
            .do_forward(&mut krn)
            .expect("kernel buffer is sized to the engine");
        t.ft.set_scale(true);
        Self { t, kernel: krn }
    }

    pub fn m(&self) -> usize {
        self.t.m()
    }

    pub fn n(&self) -> usize {
        self.t.n()
    }

    pub fn l(&self) -> usize {
        self.t.l()
    }

    /// Reshapes `c` for use as the argument of [`Self::conv`].
    pub fn win(&self, c: Vec<f64>) -> Vec<f64> {
        self.t.win_b(c)
    }

    /// Convolves the fixed kernel with `arg` (length `n()`), returning
    /// the result (length `l()`) in `arg`'s storage.
    pub fn conv(&mut self, arg: Vec<f64>) -> DspResult<Vec<f64>> {
        if arg.len() != self.t.n() {
            return Err(DspError::DimensionMismatch {
                expected: self.t.n(),
                got: arg.len(),
            });
        }
        let pad_l = self.t.pad_l();
        let mut arg = win_to(arg, pad_l, self.t.n());
        arg = pad_vec(arg, pad_l);
        self.t.ft.do_forward(&mut arg)?;
        {
            let hck = HalfComplex::new(&mut self.kernel);
            let mut hca = HalfComplex::new(&mut arg);
            hca.dot(&hck);
        }
        self.t.ft.do_inverse(&mut arg)?;
        arg.truncate(self.t.l());
        Ok(arg)
    }

    /// Convolves the fixed kernel with `arg`, placing the result in
    /// `dst` without modifying `arg`. Destination-first, the crate's
    /// canonical argument order.
    pub fn conv_to(&mut self, dst: Vec<f64>, arg: &[f64]) -> DspResult<Vec<f64>> {
        let mut dst = self.t.win_dst(dst);
        dst[..arg.len()].copy_from_slice(arg);
        dst.truncate(arg.len());
        self.conv(dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_fresh_convolver() {
        let kernel = vec![1.0, -0.5, 0.25];
        let arg = vec![2.0, 0.0, -1.0, 3.0];
        let mut k = Kernel::new(&kernel, arg.len());
        let got = k.conv(arg.clone()).unwrap();

        let mut t = Convolver::new(kernel.len(), arg.len());
        let want = t.conv(kernel.clone(), &arg).unwrap();

        for (g, w) in got.iter().zip(want.iter()) {
            assert!((g - w).abs() < 1e-8, "{g} != {w}");
        }
    }
}
