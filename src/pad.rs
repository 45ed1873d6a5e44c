//! Virtual pad: a named-channel input device for tests, demos and hosts
//! without real hardware.
//!
//! A [`VirtualPad`] is a shared store of named axis and button channels. One
//! side feeds values in (`set_axis` / `set_button`); the other side mints
//! [`InputSource`] handles (`axis` / `button`) that read the store on each
//! poll. Handles are plain `Send` closures over the shared state, so any
//! number of bindings can watch the same channel.
//!
//! ## Conventions
//! - Reading a channel that was never fed yields the resting value
//!   (`0.0` / `false`).
//! - [`VirtualPad::source`] resolves only channels that exist in the store,
//!   checking buttons before axes; profile instantiation uses it to map
//!   input names to sources.
//! - [`f310`] seeds the Logitech F310 channel set for controller-shaped
//!   setups.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::sample::Sample;
use crate::source::InputSource;

#[derive(Default)]
struct PadState {
    axes: HashMap<String, f64>,
    buttons: HashMap<String, bool>,
}

/// Shared named-channel store. Cloning yields another handle to the same
/// channels.
#[derive(Clone, Default)]
pub struct VirtualPad {
    state: Arc<Mutex<PadState>>,
}

impl VirtualPad {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned pad still holds usable channel data; keep serving it.
    fn lock(&self) -> MutexGuard<'_, PadState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Feed an axis value, creating the channel if needed.
    pub fn set_axis(&self, name: &str, value: f64) {
        self.lock().axes.insert(name.to_string(), value);
    }

    /// Feed a button state, creating the channel if needed.
    pub fn set_button(&self, name: &str, pressed: bool) {
        self.lock().buttons.insert(name.to_string(), pressed);
    }

    /// Mint a source reading the named axis (resting value `0.0`).
    pub fn axis(&self, name: &str) -> impl InputSource + 'static {
        let pad = self.clone();
        let name = name.to_string();
        move || Sample::Analog(pad.lock().axes.get(&name).copied().unwrap_or(0.0))
    }

    /// Mint a source reading the named button (resting value `false`).
    pub fn button(&self, name: &str) -> impl InputSource + 'static {
        let pad = self.clone();
        let name = name.to_string();
        move || Sample::Bool(pad.lock().buttons.get(&name).copied().unwrap_or(false))
    }

    /// Resolve a declared channel by name, buttons before axes.
    ///
    /// Returns `None` for names the pad has never seen, so callers can
    /// surface a proper unknown-input error.
    pub fn source(&self, name: &str) -> Option<Box<dyn InputSource>> {
        let state = self.lock();
        if state.buttons.contains_key(name) {
            drop(state);
            Some(Box::new(self.button(name)))
        } else if state.axes.contains_key(name) {
            drop(state);
            Some(Box::new(self.axis(name)))
        } else {
            None
        }
    }
}

/// Logitech F310 channel layout.
pub mod f310 {
    use super::VirtualPad;

    /// Button channel names, matching the controller's labels.
    pub const BUTTONS: [&str; 14] = [
        "x",
        "y",
        "a",
        "b",
        "dpad_up",
        "dpad_down",
        "dpad_left",
        "dpad_right",
        "left_bumper",
        "right_bumper",
        "left_joystick_button",
        "right_joystick_button",
        "back",
        "start",
    ];

    /// Axis channel names. Triggers read `[0, 1]`, sticks `[-1, 1]`.
    pub const AXES: [&str; 6] = [
        "left_trigger",
        "right_trigger",
        "left_joystick_x",
        "left_joystick_y",
        "right_joystick_x",
        "right_joystick_y",
    ];

    /// A pad pre-seeded with every F310 channel at its resting value.
    pub fn pad() -> VirtualPad {
        let pad = VirtualPad::new();
        for b in BUTTONS {
            pad.set_button(b, false);
        }
        for a in AXES {
            pad.set_axis(a, 0.0);
        }
        pad
    }
}
