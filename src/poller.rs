//! The poller: registry of bindings plus the tick driver.
//!
//! A [`Poller`] is an owned registry — construct one per input domain and
//! keep it wherever the host's control loop lives. There is no global state;
//! two pollers never see each other's bindings.
//!
//! ## Driving
//! Call [`Poller::tick`] once per control cycle (tens of milliseconds is the
//! intended cadence). Each tick samples every enabled binding in registration
//! order, classifies, and dispatches reactions synchronously. Tap/press
//! timing is only as precise as the tick rate.
//!
//! ## Fault isolation
//! A failing pipeline step or reaction is caught, logged, and returned as a
//! [`BindingFault`]; the remaining bindings still process that tick. One
//! misbehaving actuator callback cannot starve an unrelated input.
//!
//! ## Threading
//! Single-threaded and not reentrant: a tick runs to completion before the
//! next may start. The poller is `Send` (sources and reactions carry the
//! bound), so a host may move it into its loop thread; ticking from several
//! threads at once requires external locking.

use std::time::Instant;

use thiserror::Error;

use crate::binding::Binding;
use crate::event::{EventKind, PressState};
use crate::pipeline::{Pipeline, PipelineSpec, StepError};
use crate::reaction::{Reaction, ReactionError};
use crate::source::InputSource;

/// Default tap window in milliseconds.
pub const DEFAULT_TAP_MS: u64 = 150;

/// Stable handle to a registered binding.
///
/// Allocated from a counter, never reused, unaffected by removal of other
/// bindings.
pub type BindingId = u64;

/// A binding's fire path failed during one tick.
#[derive(Debug, Error)]
pub enum TickError {
    #[error(transparent)]
    Step(#[from] StepError),
    #[error(transparent)]
    Reaction(#[from] ReactionError),
}

/// One isolated per-binding failure from a tick.
#[derive(Debug)]
pub struct BindingFault {
    /// The binding whose fire path failed.
    pub binding: BindingId,
    pub error: TickError,
}

pub struct Poller {
    bindings: Vec<Binding>,
    next_id: BindingId,
    /// Epoch for the wall-clock `tick()` entry point.
    epoch: Instant,
}

impl Default for Poller {
    fn default() -> Self {
        Self::new()
    }
}

impl Poller {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
            next_id: 0,
            epoch: Instant::now(),
        }
    }

    /// Register a binding with the default 150 ms tap window.
    ///
    /// The pipeline spec is flattened per the pipeline rules; the binding
    /// starts enabled, released, with no previous sample.
    pub fn add_binding(
        &mut self,
        source: impl InputSource + 'static,
        kind: EventKind,
        pipeline: impl Into<PipelineSpec>,
        reaction: impl Reaction + 'static,
    ) -> BindingId {
        self.add_binding_with_tap(source, kind, pipeline, reaction, DEFAULT_TAP_MS)
    }

    /// Register a binding with an explicit tap window.
    ///
    /// A `tap_ms` of zero makes a `Pressed` binding fire on the first active
    /// tick, with no tap/press distinction delay.
    pub fn add_binding_with_tap(
        &mut self,
        source: impl InputSource + 'static,
        kind: EventKind,
        pipeline: impl Into<PipelineSpec>,
        reaction: impl Reaction + 'static,
        tap_ms: u64,
    ) -> BindingId {
        let id = self.next_id;
        self.next_id += 1;
        let pipeline = Pipeline::new([pipeline.into()]);
        log::debug!("register binding {id}: kind={kind} tap_ms={tap_ms}");
        self.bindings.push(Binding::new(
            id,
            Box::new(source),
            kind,
            pipeline,
            Box::new(reaction),
            tap_ms,
        ));
        id
    }

    /// Unregister a binding. Returns whether it existed.
    ///
    /// Registration order of the surviving bindings is preserved, and their
    /// handles stay valid.
    pub fn remove_binding(&mut self, id: BindingId) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|b| b.id != id);
        let removed = self.bindings.len() != before;
        if removed {
            log::debug!("removed binding {id}");
        }
        removed
    }

    /// Re-enable a muted binding.
    pub fn enable(&mut self, id: BindingId) {
        if let Some(b) = self.bindings.iter_mut().find(|b| b.id == id) {
            b.enabled = true;
        }
    }

    /// Mute a binding without removing it. A muted binding is not sampled
    /// and its classification state is frozen.
    pub fn disable(&mut self, id: BindingId) {
        if let Some(b) = self.bindings.iter_mut().find(|b| b.id == id) {
            b.enabled = false;
        }
    }

    /// Current press-machine state of a binding, for diagnostics and tests.
    pub fn press_state(&self, id: BindingId) -> Option<PressState> {
        self.bindings.iter().find(|b| b.id == id).map(|b| b.press_state())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Poll every binding once, stamping time from the poller's own clock.
    pub fn tick(&mut self) -> Vec<BindingFault> {
        let now_ms = self.epoch.elapsed().as_millis() as u64;
        self.tick_at(now_ms)
    }

    /// Poll every binding once at an externally supplied timestamp.
    ///
    /// `now_ms` must be monotonic across calls; hosts with their own control
    /// clock (and tests) use this entry point directly. Safe with zero
    /// bindings. Returns the faults isolated during the pass, empty on a
    /// clean tick.
    pub fn tick_at(&mut self, now_ms: u64) -> Vec<BindingFault> {
        let mut faults = Vec::new();
        for binding in &mut self.bindings {
            if !binding.enabled {
                continue;
            }
            if let Err(error) = binding.process(now_ms) {
                log::warn!("binding {} faulted: {error}", binding.id);
                faults.push(BindingFault {
                    binding: binding.id,
                    error,
                });
            }
        }
        faults
    }
}
