//! Event kinds and press-machine states.
//!
//! Tickup derives five semantic events from raw sample history. A binding
//! listens for exactly one kind:
//!
//! - [`EventKind::Always`] — fire every tick, whatever the sample. Costly;
//!   prefer `Changed` when in doubt.
//! - [`EventKind::Changed`] — fire when the sample differs from last tick's.
//! - [`EventKind::Pressed`] — fire once the input has been held for the
//!   binding's tap window (or immediately, with a zero window).
//! - [`EventKind::Released`] — fire on the first inactive sample after a
//!   confirmed press.
//! - [`EventKind::Tapped`] — fire when the input goes inactive again *before*
//!   the tap window elapses.
//!
//! `Pressed`/`Released`/`Tapped` share one per-binding state machine
//! ([`PressState`]), so within a single press-and-release cycle a binding
//! observes at most one of them.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// What a binding listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Always,
    Changed,
    Pressed,
    Released,
    Tapped,
}

impl EventKind {
    /// Lowercase config/wire name.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Always => "always",
            EventKind::Changed => "changed",
            EventKind::Pressed => "pressed",
            EventKind::Released => "released",
            EventKind::Tapped => "tapped",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Registration was handed an event kind outside the recognized five.
///
/// Unconstructible through the typed API; surfaces when parsing config or
/// other out-of-crate spellings via [`EventKind::from_str`].
#[derive(Debug, Error)]
#[error("invalid event kind `{0}` (expected always, changed, pressed, released or tapped)")]
pub struct InvalidEventKind(pub String);

impl FromStr for EventKind {
    type Err = InvalidEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(EventKind::Always),
            "changed" => Ok(EventKind::Changed),
            "pressed" => Ok(EventKind::Pressed),
            "released" => Ok(EventKind::Released),
            "tapped" => Ok(EventKind::Tapped),
            other => Err(InvalidEventKind(other.to_string())),
        }
    }
}

/// Per-binding press-machine state.
///
/// `Released → PressedUnconfirmed → PressedConfirmed → Released`. The
/// unconfirmed stage is the tap-window wait: the press has been observed but
/// not yet classified as a hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressState {
    /// Inactive; nothing recorded.
    Released,
    /// Active, tap window still open.
    PressedUnconfirmed,
    /// Active past the tap window (the press, if listened for, has fired).
    PressedConfirmed,
}
