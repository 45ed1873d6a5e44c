//! Raw samples and activity coercion.
//!
//! Everything a [`InputSource`](crate::source::InputSource) can produce is a
//! [`Sample`]: either a boolean button state or an analog magnitude. The
//! classifier only ever asks one question of a sample — is it *active*? —
//! and that coercion is total over the two variants, so a misconfigured
//! source can never poison classification with an uninterpretable value.
//!
//! ## Value conventions
//! - **Axes:** by convention normalized to `[-1.0, 1.0]` (sticks) or
//!   `[0.0, 1.0]` (triggers). The core does not enforce this; out-of-range
//!   values pass through pipelines untouched.
//! - **Buttons:** plain `true`/`false` press state.
//! - **Activity:** `Bool(b)` is active iff `b`; `Analog(v)` is active iff
//!   `v != 0.0`. Apply a [`Deadband`](crate::steps::Deadband) upstream if a
//!   noisy axis should not count as "pressed".

use std::fmt;

/// One raw input reading.
///
/// `PartialEq` compares across variants: a `Bool` never equals an `Analog`,
/// which is what change detection wants when a source switches representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sample {
    /// Button-like state.
    Bool(bool),
    /// Axis-like magnitude.
    Analog(f64),
}

impl Sample {
    /// Coerce to an "active" (pressed / nonzero) signal.
    #[inline]
    pub fn is_active(self) -> bool {
        match self {
            Sample::Bool(b) => b,
            Sample::Analog(v) => v != 0.0,
        }
    }

    /// Numeric view of the sample. `Bool` maps to `0.0` / `1.0`.
    ///
    /// Steps that are meaningless on buttons should reject `Bool` instead of
    /// calling this; see [`StepError::NotAnalog`](crate::pipeline::StepError).
    #[inline]
    pub fn as_analog(self) -> f64 {
        match self {
            Sample::Bool(b) => {
                if b {
                    1.0
                } else {
                    0.0
                }
            }
            Sample::Analog(v) => v,
        }
    }
}

impl From<bool> for Sample {
    fn from(b: bool) -> Self {
        Sample::Bool(b)
    }
}

impl From<f64> for Sample {
    fn from(v: f64) -> Self {
        Sample::Analog(v)
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sample::Bool(b) => write!(f, "{b}"),
            Sample::Analog(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_activity() {
        assert!(Sample::Bool(true).is_active());
        assert!(!Sample::Bool(false).is_active());
    }

    #[test]
    fn analog_activity_is_nonzero() {
        assert!(Sample::Analog(0.3).is_active());
        assert!(Sample::Analog(-0.3).is_active());
        assert!(!Sample::Analog(0.0).is_active());
    }

    #[test]
    fn cross_variant_inequality() {
        // A source that flips representation reads as a change, never as equal.
        assert_ne!(Sample::Bool(true), Sample::Analog(1.0));
        assert_ne!(Sample::Bool(false), Sample::Analog(0.0));
    }

    #[test]
    fn analog_view() {
        assert_eq!(Sample::Bool(true).as_analog(), 1.0);
        assert_eq!(Sample::Bool(false).as_analog(), 0.0);
        assert_eq!(Sample::Analog(-0.25).as_analog(), -0.25);
    }
}
