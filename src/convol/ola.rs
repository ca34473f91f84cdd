//! Overlap-add streaming block convolution against a fixed kernel.
//!
//! Grounded on `original_source/convol/ola.go`.

use super::Kernel;
use crate::error::DspResult;

/// Streaming overlap-add convolver: processes fixed-size blocks of input
/// against a kernel fixed at construction, carrying the trailing overlap
/// between calls to [`Self::block`].
pub struct Ola {
    k: Kernel,
    over: Vec<f64>,
    conv: Vec<f64>,
}

impl Ola {
    /// `krn` is the (fixed) convolution kernel; `block_len` is the
    /// number of input samples processed per call to [`Self::block`].
    pub fn new(krn: &[f64], block_len: usize) -> Self {
        let k = Kernel::new(krn, block_len);
        let conv = k.win(Vec::new());
        Self {
            over: vec![0.0; krn.len() - 1],
            conv,
            k,
        }
    }

    /// Length of the kernel.
    pub fn m(&self) -> usize {
        self.k.m()
    }

    /// Block length of the input.
    pub fn n(&self) -> usize {
        self.k.n()
    }

    /// `m() + n() - 1`: the zero-padding size and underlying FFT length.
    pub fn l(&self) -> usize {
        self.m() + self.n() - 1
    }

    /// Reshapes `c` for use as the `src` argument of [`Self::block`].
    pub fn win_src(&self, c: Vec<f64>) -> Vec<f64> {
        self.k.win(c)
    }

    /// Processes one block of the convolution: `src` (length `n()`) in,
    /// `dst` (length `n()`, its previous contents overwritten) out.
    pub fn block(&mut self, src: &[f64], dst: &mut [f64]) -> DspResult<()> {
        let conv = std::mem::take(&mut self.conv);
        let conv = self.k.conv_to(conv, src)?;
        self.conv = conv;

        let m = self.m() - 1;
        for i in 0..m {
            dst[i] = self.over[i] + self.conv[i];
        }
        let n = self.n();
        self.over.copy_from_slice(&self.conv[n..]);
        dst[m..].copy_from_slice(&self.conv[m..n]);
        Ok(())
    }
}
