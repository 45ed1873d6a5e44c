//! Stock transform steps.
//!
//! The usual axis-shaping suspects: inversion, deadband, scaling, offset,
//! clamping, thresholding and squaring. All are plain value types; wrap one
//! with [`PipelineSpec::step`](crate::pipeline::PipelineSpec::step) to put it
//! in a pipeline.
//!
//! Numeric-only steps ([`Deadband`], [`Scale`], [`Offset`], [`Clamp`],
//! [`Threshold`], [`Square`]) reject `Sample::Bool` with
//! [`StepError::NotAnalog`] rather than guessing an interpretation.
//! [`Invert`] is total: it negates an axis and logically flips a button.

use crate::pipeline::{Step, StepError};
use crate::sample::Sample;

fn expect_analog(step: &'static str, value: Sample) -> Result<f64, StepError> {
    match value {
        Sample::Analog(v) => Ok(v),
        got @ Sample::Bool(_) => Err(StepError::NotAnalog { step, got }),
    }
}

/// Negate an axis; logically flip a button.
pub struct Invert;

impl Step for Invert {
    fn apply(&mut self, value: Sample) -> Result<Sample, StepError> {
        Ok(match value {
            Sample::Bool(b) => Sample::Bool(!b),
            Sample::Analog(v) => Sample::Analog(-v),
        })
    }
}

/// Zero out axis values with magnitude below `width`.
pub struct Deadband(pub f64);

impl Step for Deadband {
    fn apply(&mut self, value: Sample) -> Result<Sample, StepError> {
        let v = expect_analog("deadband", value)?;
        Ok(Sample::Analog(if v.abs() < self.0 { 0.0 } else { v }))
    }
}

/// Multiply an axis by a constant factor.
pub struct Scale(pub f64);

impl Step for Scale {
    fn apply(&mut self, value: Sample) -> Result<Sample, StepError> {
        let v = expect_analog("scale", value)?;
        Ok(Sample::Analog(v * self.0))
    }
}

/// Add a constant to an axis.
pub struct Offset(pub f64);

impl Step for Offset {
    fn apply(&mut self, value: Sample) -> Result<Sample, StepError> {
        let v = expect_analog("offset", value)?;
        Ok(Sample::Analog(v + self.0))
    }
}

/// Clamp an axis into `[min, max]`.
pub struct Clamp {
    pub min: f64,
    pub max: f64,
}

impl Step for Clamp {
    fn apply(&mut self, value: Sample) -> Result<Sample, StepError> {
        let v = expect_analog("clamp", value)?;
        Ok(Sample::Analog(v.clamp(self.min, self.max)))
    }
}

/// Turn an axis into a button: active iff `|v| >= at`.
pub struct Threshold(pub f64);

impl Step for Threshold {
    fn apply(&mut self, value: Sample) -> Result<Sample, StepError> {
        let v = expect_analog("threshold", value)?;
        Ok(Sample::Bool(v.abs() >= self.0))
    }
}

/// Sign-preserving square, for finer control around center stick.
pub struct Square;

impl Step for Square {
    fn apply(&mut self, value: Sample) -> Result<Sample, StepError> {
        let v = expect_analog("square", value)?;
        Ok(Sample::Analog(v.abs() * v))
    }
}
