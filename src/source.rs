//! The input-source collaborator seam.
//!
//! Acquisition of raw values from real hardware lives outside this crate.
//! Whatever owns the hardware hands the poller an [`InputSource`] per
//! channel — typically a closure over a driver handle, or a
//! [`VirtualPad`](crate::pad::VirtualPad) channel in tests and demos.

use crate::sample::Sample;

/// Produces the current raw value of one input on demand.
///
/// Sampling is infallible by contract: a source that can lose its device
/// should decide on a resting value (`false` / `0.0`) and report that.
/// Implemented for any `FnMut() -> Sample + Send` closure.
pub trait InputSource: Send {
    fn sample(&mut self) -> Sample;
}

impl<F> InputSource for F
where
    F: FnMut() -> Sample + Send,
{
    fn sample(&mut self) -> Sample {
        self()
    }
}

impl InputSource for Box<dyn InputSource> {
    fn sample(&mut self) -> Sample {
        (**self).sample()
    }
}
