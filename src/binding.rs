//! One registered listener and its per-tick classification step.
//!
//! A [`Binding`] owns everything one listener needs: the sample source, the
//! event kind it listens for, a private pipeline, the reaction, the tap
//! window, and the mutable classification state. All mutation happens inside
//! [`Binding::process`], called exactly once per poller tick with a single
//! raw sample read.
//!
//! ## Classification
//! `Always` and `Changed` bypass the press machine entirely. The other three
//! kinds share it:
//!
//! - Inactive → active records the press moment and enters
//!   `PressedUnconfirmed` (a zero tap window short-circuits a `Pressed`
//!   binding straight to `PressedConfirmed`, firing on the same tick).
//! - Holding past the tap window (inclusive: `elapsed == tap_ms` counts)
//!   confirms the press for every kind; only a `Pressed` binding fires on
//!   the crossing.
//! - Active → inactive resets to `Released`. From `PressedConfirmed` a
//!   `Released` binding fires; from `PressedUnconfirmed` a `Tapped` binding
//!   fires. Everyone else resets silently.
//!
//! The machine fires at most one of `Pressed`/`Tapped` and at most one
//! `Released` per activation cycle by construction.

use crate::event::{EventKind, PressState};
use crate::pipeline::Pipeline;
use crate::poller::TickError;
use crate::reaction::Reaction;
use crate::sample::Sample;
use crate::source::InputSource;

pub(crate) struct Binding {
    pub(crate) id: u64,
    pub(crate) enabled: bool,
    kind: EventKind,
    source: Box<dyn InputSource>,
    pipeline: Pipeline,
    reaction: Box<dyn Reaction>,
    /// Tap/press boundary in milliseconds. Zero collapses `Pressed` to the
    /// first active tick.
    tap_ms: u64,
    press_state: PressState,
    /// Previous tick's sample; `None` until the first read, so the first
    /// `Changed` tick always counts as a change.
    last_sample: Option<Sample>,
    /// Set on entry into `PressedUnconfirmed`, read only in that state.
    press_started_at: u64,
}

impl Binding {
    pub(crate) fn new(
        id: u64,
        source: Box<dyn InputSource>,
        kind: EventKind,
        pipeline: Pipeline,
        reaction: Box<dyn Reaction>,
        tap_ms: u64,
    ) -> Self {
        Self {
            id,
            enabled: true,
            kind,
            source,
            pipeline,
            reaction,
            tap_ms,
            press_state: PressState::Released,
            last_sample: None,
            press_started_at: 0,
        }
    }

    pub(crate) fn press_state(&self) -> PressState {
        self.press_state
    }

    /// Sample, classify, and fire if this tick produced the listened event.
    ///
    /// State transitions commit before the fire path runs, so a failing step
    /// or reaction consumes the event instead of replaying it next tick.
    pub(crate) fn process(&mut self, now_ms: u64) -> Result<(), TickError> {
        let new = self.source.sample();

        match self.kind {
            EventKind::Always => return self.fire(new),
            EventKind::Changed => {
                if self.last_sample != Some(new) {
                    self.last_sample = Some(new);
                    return self.fire(new);
                }
                return Ok(());
            }
            _ => {}
        }

        if new.is_active() {
            match self.press_state {
                PressState::Released => {
                    if self.tap_ms == 0 && self.kind == EventKind::Pressed {
                        self.press_state = PressState::PressedConfirmed;
                        return self.fire(new);
                    }
                    self.press_started_at = now_ms;
                    self.press_state = PressState::PressedUnconfirmed;
                }
                PressState::PressedUnconfirmed => {
                    // Inclusive boundary: a hold of exactly tap_ms is a press.
                    if now_ms.saturating_sub(self.press_started_at) >= self.tap_ms {
                        self.press_state = PressState::PressedConfirmed;
                        if self.kind == EventKind::Pressed {
                            return self.fire(new);
                        }
                    }
                }
                // Already confirmed and fired; nothing to do while held.
                PressState::PressedConfirmed => {}
            }
        } else {
            match self.press_state {
                PressState::PressedConfirmed => {
                    self.press_state = PressState::Released;
                    if self.kind == EventKind::Released {
                        return self.fire(new);
                    }
                }
                PressState::PressedUnconfirmed => {
                    self.press_state = PressState::Released;
                    if self.kind == EventKind::Tapped {
                        return self.fire(new);
                    }
                }
                PressState::Released => {}
            }
        }

        Ok(())
    }

    fn fire(&mut self, raw: Sample) -> Result<(), TickError> {
        let out = self.pipeline.run(raw)?;
        log::trace!("binding {} fired {} with {out}", self.id, self.kind);
        self.reaction.invoke(out)?;
        Ok(())
    }
}
