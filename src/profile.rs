//! Serializable binding profiles.
//!
//! A [`Profile`] declares bindings as data — input name, event kind,
//! transform steps, action name, optional tap window — so a setup can be
//! reconfigured without recompiling. Profiles load from TOML or JSON and
//! instantiate into a [`Poller`] given host-supplied resolvers that map
//! input and action names to live sources and reactions.
//!
//! ```toml
//! name = "teleop"
//! description = "Drive bindings"
//!
//! [[bindings]]
//! input = "left_joystick_x"
//! event = "changed"
//! steps = ["invert", { deadband = { width = 0.15 } }, { scale = { factor = 0.5 } }]
//! action = "strafe"
//!
//! [[bindings]]
//! input = "a"
//! event = "tapped"
//! action = "shift_gear"
//! tap_ms = 200
//! ```
//!
//! Resolution is strict: an unrecognized event kind, input name or action
//! name fails `instantiate` with the offending name — never a silently dead
//! binding.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::{EventKind, InvalidEventKind};
use crate::pipeline::PipelineSpec;
use crate::poller::{BindingId, Poller, DEFAULT_TAP_MS};
use crate::reaction::Reaction;
use crate::source::InputSource;
use crate::steps;

/// A profile failed to parse or instantiate.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The `event` field was not one of the five recognized kinds.
    #[error(transparent)]
    InvalidEventKind(#[from] InvalidEventKind),
    /// The input resolver had no source for this name.
    #[error("unknown input `{0}`")]
    UnknownInput(String),
    /// The action resolver had no reaction for this name.
    #[error("unknown action `{0}`")]
    UnknownAction(String),
    #[error("invalid profile TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid profile JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read profile file: {0}")]
    Io(#[from] std::io::Error),
}

/// Declarative form of one transform step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepDef {
    Invert,
    Square,
    Deadband { width: f64 },
    Scale { factor: f64 },
    Offset { by: f64 },
    Clamp { min: f64, max: f64 },
    Threshold { at: f64 },
}

impl StepDef {
    /// Materialize the declared step.
    pub fn to_spec(&self) -> PipelineSpec {
        match *self {
            StepDef::Invert => PipelineSpec::step(steps::Invert),
            StepDef::Square => PipelineSpec::step(steps::Square),
            StepDef::Deadband { width } => PipelineSpec::step(steps::Deadband(width)),
            StepDef::Scale { factor } => PipelineSpec::step(steps::Scale(factor)),
            StepDef::Offset { by } => PipelineSpec::step(steps::Offset(by)),
            StepDef::Clamp { min, max } => PipelineSpec::step(steps::Clamp { min, max }),
            StepDef::Threshold { at } => PipelineSpec::step(steps::Threshold(at)),
        }
    }
}

/// One declared binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileBinding {
    /// Input channel name, resolved by the host at instantiation.
    pub input: String,
    /// Event kind, lowercase (`always`, `changed`, `pressed`, `released`,
    /// `tapped`). Kept as text so out-of-vocabulary kinds fail with
    /// [`ProfileError::InvalidEventKind`] at registration.
    pub event: String,
    /// Transform steps, applied in declaration order.
    #[serde(default)]
    pub steps: Vec<StepDef>,
    /// Action name, resolved by the host at instantiation.
    pub action: String,
    /// Tap window override in milliseconds; defaults to 150.
    #[serde(default)]
    pub tap_ms: Option<u64>,
}

/// Serializable profile of input bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub bindings: Vec<ProfileBinding>,
}

impl Profile {
    pub fn from_toml_str(input: &str) -> Result<Self, ProfileError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_json_str(input: &str) -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Read and parse a TOML profile file.
    pub fn from_toml_path(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Register every declared binding into `poller`.
    ///
    /// `resolve_input` and `resolve_action` map names to live sources and
    /// reactions; returning `None` fails the whole instantiation (no partial
    /// registration is rolled back — check the error before ticking).
    /// Returns the new binding handles in declaration order.
    pub fn instantiate(
        &self,
        poller: &mut Poller,
        mut resolve_input: impl FnMut(&str) -> Option<Box<dyn InputSource>>,
        mut resolve_action: impl FnMut(&str) -> Option<Box<dyn Reaction>>,
    ) -> Result<Vec<BindingId>, ProfileError> {
        let mut ids = Vec::with_capacity(self.bindings.len());
        for b in &self.bindings {
            let kind: EventKind = b.event.parse()?;
            let source = resolve_input(&b.input)
                .ok_or_else(|| ProfileError::UnknownInput(b.input.clone()))?;
            let reaction = resolve_action(&b.action)
                .ok_or_else(|| ProfileError::UnknownAction(b.action.clone()))?;
            let spec = PipelineSpec::Seq(b.steps.iter().map(StepDef::to_spec).collect());
            let tap_ms = b.tap_ms.unwrap_or(DEFAULT_TAP_MS);
            ids.push(poller.add_binding_with_tap(source, kind, spec, reaction, tap_ms));
        }
        log::debug!("profile `{}` instantiated {} binding(s)", self.name, ids.len());
        Ok(ids)
    }
}
