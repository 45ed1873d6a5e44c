//! Tickup — tick-driven input polling and event classification.
//!
//! Provides a [`Poller`] that samples registered inputs once per host control
//! cycle, classifies semantic events (press, release, tap, change) from raw
//! sample history, reshapes fired values through per-binding
//! [`Pipeline`]s, and dispatches them to reactions.
//!
//! Built for control loops without interrupt-driven input delivery: the host
//! owns the cadence and calls [`Poller::tick`] every cycle; everything else
//! is derived from the samples those ticks observe.
//!
//! ```
//! use tickup::{EventKind, Pipeline, PipelineSpec, Poller, Sample};
//! use tickup::steps::{Deadband, Invert};
//!
//! let pad = tickup::pad::f310::pad();
//! let mut poller = Poller::new();
//!
//! poller.add_binding(
//!     pad.axis("left_joystick_y"),
//!     EventKind::Changed,
//!     Pipeline::new([PipelineSpec::step(Invert), PipelineSpec::step(Deadband(0.1))]),
//!     |v: Sample| {
//!         // drive(v.as_analog());
//!         Ok(())
//!     },
//! );
//!
//! // Host control loop: one tick per cycle.
//! poller.tick();
//! ```

pub mod event;
pub mod pad;
pub mod pipeline;
pub mod poller;
pub mod reaction;
pub mod sample;
pub mod source;
pub mod steps;

mod binding;

#[cfg(feature = "profiles")]
#[cfg_attr(docsrs, doc(cfg(feature = "profiles")))]
pub mod profile;

pub use event::{EventKind, InvalidEventKind, PressState};
pub use pad::VirtualPad;
pub use pipeline::{Pipeline, PipelineSpec, Step, StepError};
pub use poller::{BindingFault, BindingId, Poller, TickError, DEFAULT_TAP_MS};
pub use reaction::{LogReaction, Reaction, ReactionError};
pub use sample::Sample;
pub use source::InputSource;

#[cfg(feature = "profiles")]
pub use profile::{Profile, ProfileBinding, ProfileError, StepDef};
