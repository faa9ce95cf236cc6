//! Slider composition root.
//!
//! One `Slider` owns the registry, the position controller, the drag
//! tracker, the autoplay schedule and the host's render surface, and
//! routes the three external signal sources (pointer events, the timer
//! deadline, transition settlement) through them. Everything runs on one
//! logical thread of control; arbitration between the drivers is
//! cooperative cancellation, never locking.

use std::time::Instant;

use tracing::{debug, warn};

use crate::autoplay::Autoplay;
use crate::config::SliderConfig;
use crate::error::{Error, Result};
use crate::gesture::{DragMove, DragOutcome, DragTracker};
use crate::input::{PointerEvent, PointerPhase};
use crate::looping;
use crate::position::PositionController;
use crate::registry::SlideRegistry;
use crate::surface::RenderSurface;

pub struct Slider<S: RenderSurface> {
    config: SliderConfig,
    registry: SlideRegistry,
    position: PositionController,
    drag: DragTracker,
    autoplay: Autoplay,
    surface: S,
    current_index: usize,
    primed: bool,
    detached: bool,
}

impl<S: RenderSurface> Slider<S> {
    pub fn new(config: SliderConfig, surface: S) -> Self {
        let autoplay = Autoplay::new(&config);
        Self {
            config,
            registry: SlideRegistry::new(),
            position: PositionController::new(),
            drag: DragTracker::new(),
            autoplay,
            surface,
            current_index: 0,
            primed: false,
            detached: false,
        }
    }

    /// Report the host's current real panel count.
    ///
    /// Must be called after any structural change to the content. The
    /// first non-empty report primes the loop (when enabled) and takes
    /// the initial position; until then the slider stays inert. A report
    /// after priming rebuilds the sequence from scratch.
    pub fn sync_panels(&mut self, count: usize, now: Instant) {
        if self.detached {
            return;
        }
        self.registry.set_real_count(count);
        self.drag.reset();
        self.primed = false;
        if count == 0 {
            debug!("panel set empty, waiting for content");
            self.autoplay.deactivate();
            return;
        }
        self.prime(now);
    }

    fn prime(&mut self, now: Instant) {
        let start = if self.config.infinite_loop {
            match looping::prime(&mut self.registry, self.config.clone_width()) {
                Ok(index) => index,
                Err(e) => {
                    debug!("{e}; deferring priming");
                    return;
                }
            }
        } else {
            0
        };
        self.current_index = start;
        self.position
            .move_to(&mut self.surface, &self.registry, start, false);
        self.primed = true;
        self.autoplay.activate(now);
        debug!("slider primed at index {start}");
    }

    /// Feed one normalized pointer event through the gesture machine.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if self.detached || !self.primed {
            return;
        }
        match event.phase {
            PointerPhase::Start => {
                // Drag always preempts autoplay
                self.autoplay.on_drag_start();
                self.drag
                    .begin(event.x, event.y, event.at, self.surface.offset());
            }
            PointerPhase::Move => match self.drag.movement(event.x, event.y) {
                DragMove::Track { offset } => self.surface.set_offset(offset, false),
                DragMove::Abandoned | DragMove::Ignored => {}
            },
            PointerPhase::End => {
                match self.drag.finish(event.at, &self.config.gesture) {
                    DragOutcome::Advance { direction } => self.advance(direction),
                    DragOutcome::Settle => {
                        let index = self.current_index;
                        self.start_move(index);
                    }
                    DragOutcome::Untracked => {}
                }
                self.autoplay.on_drag_end(event.at);
            }
        }
    }

    /// Check the autoplay deadline at `now` and advance if a tick fires.
    pub fn handle_timer(&mut self, now: Instant) {
        if self.detached || !self.primed {
            return;
        }
        if !self.autoplay.poll(now) {
            return;
        }
        if self.position.is_animating() || self.drag.is_active() {
            // Clock drift can land a tick mid-transition; the pending
            // settlement reschedules it
            debug!("autoplay tick while a transition is in flight, deferring");
            return;
        }
        self.advance(1);
    }

    /// The host's animated transition has completed. Clears the
    /// animating state, applies boundary correction, and lets autoplay
    /// reschedule. Called at most once per animated move; spurious calls
    /// are ignored.
    pub fn transition_settled(&mut self, now: Instant) {
        if self.detached {
            return;
        }
        if !self.position.settled() {
            return;
        }
        if self.drag.is_active() {
            // The viewer grabbed the strip mid-animation; correcting now
            // would yank it out from under the pointer. The move the drag
            // ends with settles later and corrects then.
            debug!("transition settled mid-drag, deferring boundary correction");
            return;
        }
        if self.config.infinite_loop {
            if let Some(wrapped) = looping::wrap_index(&self.registry, self.current_index) {
                self.current_index = wrapped;
                self.position
                    .move_to(&mut self.surface, &self.registry, wrapped, false);
            }
            if let Some(shrunk) = looping::shrink_excess(
                &mut self.registry,
                self.current_index,
                self.config.clone_width(),
            ) {
                self.current_index = shrunk;
                self.position
                    .move_to(&mut self.surface, &self.registry, shrunk, false);
            }
        }
        self.autoplay.on_settled(now);
    }

    /// Advance one step (`-1` previous, `+1` next) with an animated move.
    ///
    /// With the infinite loop enabled the clone padding is grown first so
    /// the target always exists; otherwise the target clamps at the ends.
    pub fn advance(&mut self, direction: i32) {
        if self.detached || !self.primed || self.registry.is_empty() {
            return;
        }
        let mut target = self.current_index as i64 + direction as i64;
        if self.config.infinite_loop {
            let shift = looping::grow_for_target(
                &mut self.registry,
                target,
                self.config.clone_width(),
                self.config.per_view.desktop as usize,
            );
            if shift > 0 {
                // Prepending shifted every index; keep the same panel on
                // screen before animating away from it
                self.current_index += shift;
                target += shift as i64;
                self.position.move_to(
                    &mut self.surface,
                    &self.registry,
                    self.current_index,
                    false,
                );
            }
        }
        let target = self.resolve_target(target);
        self.start_move(target);
    }

    fn start_move(&mut self, index: usize) {
        self.current_index = index;
        self.position
            .move_to(&mut self.surface, &self.registry, index, true);
    }

    fn resolve_target(&self, target: i64) -> usize {
        let len = self.registry.len();
        let checked: Result<usize> = if target >= 0 && (target as usize) < len {
            Ok(target as usize)
        } else {
            Err(Error::OutOfBounds { index: target, len })
        };
        match checked {
            Ok(index) => index,
            Err(e) => {
                // Only reachable without the infinite loop (growth keeps
                // looped targets addressable); recover by clamping
                warn!("{e}, clamping");
                target.clamp(0, len.saturating_sub(1) as i64) as usize
            }
        }
    }

    /// Tear down: cancel the autoplay deadline, drop any drag in
    /// progress, and ignore every subsequent signal. Nothing is awaited;
    /// an in-flight transition is simply never observed.
    pub fn detach(&mut self) {
        self.autoplay.deactivate();
        self.drag.reset();
        self.detached = true;
        debug!("slider detached");
    }

    /// Deadline for the next autoplay wakeup, if one is armed.
    pub fn autoplay_deadline(&self) -> Option<Instant> {
        self.autoplay.deadline()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_animating(&self) -> bool {
        self.position.is_animating()
    }

    pub fn registry(&self) -> &SlideRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: RenderSurface + std::fmt::Debug> std::fmt::Debug for Slider<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slider")
            .field("current_index", &self.current_index)
            .field("primed", &self.primed)
            .field("detached", &self.detached)
            .field("registry", &self.registry)
            .field("surface", &self.surface)
            .finish()
    }
}
