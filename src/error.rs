//! Value-returned error kinds for the programmatic contracts in this crate.
//!
//! Precondition failures (DCT size not a power of two, LPC order < 1, an
//! interpolator index out of its neighborhood) are not represented here —
//! those are contract violations and surface as panics at the
//! construction/call boundary, per the crate's error handling design.

use thiserror::Error;

/// Errors returned from buffer-accepting entry points.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DspError {
    /// An input vector has the wrong length.
    #[error("dimension mismatch: expected length {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// An input vector has the wrong underlying capacity.
    #[error("capacity mismatch: expected capacity {expected}, got {got}")]
    CapacityMismatch { expected: usize, got: usize },

    /// A multi-channel frame length is not a multiple of the channel count.
    #[error("channel alignment: frame of length {frame_len} is not a multiple of {channels} channels")]
    ChannelAlignment { channels: usize, frame_len: usize },

    /// Sticky end-of-stream signal from a frame producer.
    #[error("end of stream")]
    EndOfStream,
}

pub type DspResult<T> = Result<T, DspError>;
