//! Autoplay scheduling.
//!
//! A cancellable scheduled task with a single always-current deadline,
//! not a nest of recursive callbacks. The phase machine encodes the
//! arbitration rules against dragging and in-flight transitions:
//!
//! - a tick only fires from `Scheduled` (or `ResumeGrace`), so a drag
//!   cancelling into `InterruptedByDrag` makes a pending tick simply
//!   disappear;
//! - rescheduling happens exclusively on transition settlement
//!   (`on_settled`), never at fire time, so ticks can never pile up on
//!   top of a still-running transition;
//! - a finished drag arms a one-time resume grace, independent of the
//!   regular interval, before ticking resumes.

use std::time::Instant;

use tracing::{debug, trace};

use crate::config::SliderConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Autoplay disabled or torn down
    Inactive,
    /// Next tick is due at the deadline
    Scheduled { due: Instant },
    /// A tick fired; waiting for the transition to settle before
    /// rescheduling
    AwaitingSettle,
    /// A drag cancelled the pending tick
    InterruptedByDrag,
    /// Post-drag grace period before ticking resumes
    ResumeGrace { due: Instant },
}

#[derive(Debug)]
pub(crate) struct Autoplay {
    enabled: bool,
    interval: std::time::Duration,
    resume_delay: std::time::Duration,
    phase: Phase,
}

impl Autoplay {
    pub(crate) fn new(config: &SliderConfig) -> Self {
        Self {
            enabled: config.autoplay,
            interval: config.autoplay_interval(),
            resume_delay: config.gesture.resume_delay(),
            phase: Phase::Inactive,
        }
    }

    /// Begin ticking once the slider is primed and positioned.
    pub(crate) fn activate(&mut self, now: Instant) {
        if !self.enabled {
            return;
        }
        self.phase = Phase::Scheduled {
            due: now + self.interval,
        };
        debug!("autoplay activated, first tick in {:?}", self.interval);
    }

    /// Stop ticking entirely; nothing fires after this.
    pub(crate) fn deactivate(&mut self) {
        self.phase = Phase::Inactive;
    }

    /// The single current deadline, if one is armed. Drives the host's
    /// timer wakeup.
    pub(crate) fn deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Scheduled { due } | Phase::ResumeGrace { due } => Some(due),
            _ => None,
        }
    }

    /// Check whether a tick fires at `now`. A fired tick always moves to
    /// `AwaitingSettle`; whether an advance actually starts is the
    /// caller's decision, and either way the next tick waits for a
    /// settlement.
    pub(crate) fn poll(&mut self, now: Instant) -> bool {
        match self.phase {
            Phase::Scheduled { due } | Phase::ResumeGrace { due } if now >= due => {
                self.phase = Phase::AwaitingSettle;
                trace!("autoplay tick fired");
                true
            }
            _ => false,
        }
    }

    /// Transition settlement: the sole trigger for rescheduling.
    pub(crate) fn on_settled(&mut self, now: Instant) {
        if self.phase == Phase::AwaitingSettle {
            self.phase = Phase::Scheduled {
                due: now + self.interval,
            };
            trace!("autoplay rescheduled after settlement");
        }
    }

    /// Drag start preempts autoplay: cancel any pending tick outright.
    pub(crate) fn on_drag_start(&mut self) {
        if self.phase != Phase::Inactive {
            self.phase = Phase::InterruptedByDrag;
            debug!("autoplay cancelled by drag");
        }
    }

    /// Drag end: arm the one-time resume grace. Only a drag-interrupted
    /// schedule resumes this way; a stray end event cannot displace a
    /// regular deadline.
    pub(crate) fn on_drag_end(&mut self, now: Instant) {
        if self.phase == Phase::InterruptedByDrag {
            self.phase = Phase::ResumeGrace {
                due: now + self.resume_delay,
            };
            debug!("autoplay resuming in {:?}", self.resume_delay);
        }
    }
}
