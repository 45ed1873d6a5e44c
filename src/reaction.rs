//! Reactions: what happens when an event fires.
//!
//! A [`Reaction`] receives the binding's pipeline output. Reactions may have
//! arbitrary external effects (drive an actuator, update UI state); the
//! poller invokes them synchronously in registration order and isolates
//! their failures per binding.

use thiserror::Error;

use crate::sample::Sample;

/// A reaction callback failed.
///
/// Carries a plain message; the poller reports it in a
/// [`BindingFault`](crate::poller::BindingFault) and moves on to the next
/// binding.
#[derive(Debug, Error)]
#[error("reaction failed: {0}")]
pub struct ReactionError(pub String);

impl ReactionError {
    pub fn new(msg: impl Into<String>) -> Self {
        ReactionError(msg.into())
    }
}

/// Invoked with the transformed sample when a binding's event fires.
///
/// Implemented for any `FnMut(Sample) -> Result<(), ReactionError> + Send`
/// closure:
///
/// ```
/// use tickup::sample::Sample;
///
/// let react = |v: Sample| {
///     println!("strafe = {v}");
///     Ok(())
/// };
/// # let _: &dyn tickup::reaction::Reaction = &react;
/// ```
pub trait Reaction: Send {
    fn invoke(&mut self, value: Sample) -> Result<(), ReactionError>;
}

impl<F> Reaction for F
where
    F: FnMut(Sample) -> Result<(), ReactionError> + Send,
{
    fn invoke(&mut self, value: Sample) -> Result<(), ReactionError> {
        self(value)
    }
}

impl Reaction for Box<dyn Reaction> {
    fn invoke(&mut self, value: Sample) -> Result<(), ReactionError> {
        (**self).invoke(value)
    }
}

/// A stock reaction that logs fired values under a label.
///
/// Handy while wiring up bindings, before the real reactions exist.
pub struct LogReaction {
    label: String,
}

impl LogReaction {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }
}

impl Reaction for LogReaction {
    fn invoke(&mut self, value: Sample) -> Result<(), ReactionError> {
        log::info!("[{}] {value}", self.label);
        Ok(())
    }
}
