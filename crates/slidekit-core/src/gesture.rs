//! Drag gesture state machine.
//!
//! Models the pointer interaction as explicit tagged states rather than
//! boolean flags, so an illegal combination (e.g. a committed vertical
//! drag) is unrepresentable: a vertical-dominant first move abandons the
//! gesture outright and the state returns to `Idle`.
//!
//! `Idle -> Armed` on pointer start; `Armed -> Committed` once the first
//! move locks the horizontal axis. Committed moves report a live 1:1
//! offset for the slider to commit unanimated. The end decision uses
//! distance or velocity, either alone sufficient, so both deliberate long
//! drags and fast flicks advance.

use std::time::Instant;

use tracing::trace;

use crate::config::GestureConfig;

#[derive(Debug, Clone, Copy)]
enum DragState {
    Idle,
    Armed {
        start_x: f32,
        start_y: f32,
        started_at: Instant,
        start_offset: f32,
    },
    Committed {
        start_x: f32,
        started_at: Instant,
        start_offset: f32,
        last_offset: f32,
    },
}

/// What the slider should do with a pointer move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum DragMove {
    /// Not in a trackable state; drop the event
    Ignored,
    /// Vertical-dominant first move: page-scroll gesture, not ours
    Abandoned,
    /// Horizontal tracking: commit this unanimated offset
    Track { offset: f32 },
}

/// What the slider should do when the pointer lifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DragOutcome {
    /// No gesture was in progress
    Untracked,
    /// Settle back to the current index with an animated move
    Settle,
    /// Advance one step in `direction` (-1 previous, +1 next)
    Advance { direction: i32 },
}

#[derive(Debug)]
pub(crate) struct DragTracker {
    state: DragState,
}

impl DragTracker {
    pub(crate) fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    /// A drag is in progress (armed or committed).
    pub(crate) fn is_active(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    pub(crate) fn reset(&mut self) {
        self.state = DragState::Idle;
    }

    /// Pointer start: arm the gesture, recording the position and the
    /// visual offset at that moment.
    pub(crate) fn begin(&mut self, x: f32, y: f32, at: Instant, current_offset: f32) {
        self.state = DragState::Armed {
            start_x: x,
            start_y: y,
            started_at: at,
            start_offset: current_offset,
        };
        trace!("drag armed at ({x}, {y}), offset {current_offset}");
    }

    /// Pointer move. The first move after arming decides the axis; once
    /// abandoned, further moves are ignored until a new start.
    pub(crate) fn movement(&mut self, x: f32, y: f32) -> DragMove {
        match self.state {
            DragState::Idle => DragMove::Ignored,
            DragState::Armed {
                start_x,
                start_y,
                started_at,
                start_offset,
            } => {
                let dx = x - start_x;
                let dy = y - start_y;
                if dx == 0.0 && dy == 0.0 {
                    // No displacement yet; keep waiting for the axis
                    return DragMove::Ignored;
                }
                if dy.abs() > dx.abs() {
                    trace!("vertical-dominant move (dx {dx}, dy {dy}), abandoning");
                    self.state = DragState::Idle;
                    return DragMove::Abandoned;
                }
                let offset = start_offset + dx;
                self.state = DragState::Committed {
                    start_x,
                    started_at,
                    start_offset,
                    last_offset: offset,
                };
                DragMove::Track { offset }
            }
            DragState::Committed {
                start_x,
                started_at,
                start_offset,
                ..
            } => {
                let offset = start_offset + (x - start_x);
                self.state = DragState::Committed {
                    start_x,
                    started_at,
                    start_offset,
                    last_offset: offset,
                };
                DragMove::Track { offset }
            }
        }
    }

    /// Pointer end: decide between settling and advancing.
    pub(crate) fn finish(&mut self, at: Instant, thresholds: &GestureConfig) -> DragOutcome {
        let outcome = match self.state {
            DragState::Idle => DragOutcome::Untracked,
            DragState::Armed { .. } => DragOutcome::Settle,
            DragState::Committed {
                started_at,
                start_offset,
                last_offset,
                ..
            } => {
                let dragged = last_offset - start_offset;
                let elapsed_ms = at.saturating_duration_since(started_at).as_secs_f32() * 1000.0;
                let velocity = if elapsed_ms > 0.0 {
                    dragged.abs() / elapsed_ms
                } else {
                    f32::INFINITY
                };

                if dragged != 0.0
                    && (dragged.abs() > thresholds.advance_distance
                        || velocity > thresholds.flick_velocity)
                {
                    let direction = if dragged > 0.0 { -1 } else { 1 };
                    trace!(
                        "drag of {dragged} over {elapsed_ms}ms advances {direction}"
                    );
                    DragOutcome::Advance { direction }
                } else {
                    trace!("drag of {dragged} over {elapsed_ms}ms settles");
                    DragOutcome::Settle
                }
            }
        };
        self.state = DragState::Idle;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn thresholds() -> GestureConfig {
        GestureConfig::default()
    }

    /// Run a committed horizontal drag of `distance` over `elapsed_ms`.
    fn drag(distance: f32, elapsed_ms: u64) -> DragOutcome {
        let start = Instant::now();
        let mut tracker = DragTracker::new();
        tracker.begin(100.0, 50.0, start, 0.0);
        // Dragging the strip left by `distance` moves the pointer left
        tracker.movement(100.0 - distance, 50.0);
        tracker.finish(start + Duration::from_millis(elapsed_ms), &thresholds())
    }

    #[test]
    fn test_long_slow_drag_advances_on_distance() {
        // velocity 0.03 is under threshold; distance 30 > 25 decides
        assert_eq!(drag(30.0, 1000), DragOutcome::Advance { direction: 1 });
    }

    #[test]
    fn test_fast_flick_advances_on_velocity() {
        // distance 10 is under threshold; velocity ~0.67 > 0.5 decides
        assert_eq!(drag(10.0, 15), DragOutcome::Advance { direction: 1 });
    }

    #[test]
    fn test_short_slow_drag_settles() {
        assert_eq!(drag(10.0, 1000), DragOutcome::Settle);
    }

    #[test]
    fn test_direction_follows_drag_sign() {
        // Dragging the strip rightwards (positive) reveals the previous panel
        assert_eq!(drag(-30.0, 1000), DragOutcome::Advance { direction: -1 });
    }

    #[test]
    fn test_vertical_first_move_abandons() {
        let start = Instant::now();
        let mut tracker = DragTracker::new();
        tracker.begin(100.0, 50.0, start, -200.0);

        assert_eq!(tracker.movement(105.0, 90.0), DragMove::Abandoned);
        assert!(!tracker.is_active());

        // Later moves are ignored until a new start
        assert_eq!(tracker.movement(200.0, 90.0), DragMove::Ignored);
        assert_eq!(
            tracker.finish(start + Duration::from_millis(100), &thresholds()),
            DragOutcome::Untracked
        );
    }

    #[test]
    fn test_committed_moves_track_one_to_one() {
        let start = Instant::now();
        let mut tracker = DragTracker::new();
        tracker.begin(100.0, 50.0, start, -200.0);

        assert_eq!(
            tracker.movement(110.0, 52.0),
            DragMove::Track { offset: -190.0 }
        );
        // Axis stays locked horizontal even if the pointer wanders vertically
        assert_eq!(
            tracker.movement(80.0, 120.0),
            DragMove::Track { offset: -220.0 }
        );
    }

    #[test]
    fn test_end_without_movement_settles() {
        let start = Instant::now();
        let mut tracker = DragTracker::new();
        tracker.begin(100.0, 50.0, start, 0.0);
        assert_eq!(
            tracker.finish(start + Duration::from_millis(80), &thresholds()),
            DragOutcome::Settle
        );
        assert!(!tracker.is_active());
    }

    #[test]
    fn test_zero_elapsed_flick_advances() {
        let start = Instant::now();
        let mut tracker = DragTracker::new();
        tracker.begin(100.0, 50.0, start, 0.0);
        tracker.movement(95.0, 50.0);
        // End timestamp equal to start: infinite velocity, still decidable
        assert_eq!(
            tracker.finish(start, &thresholds()),
            DragOutcome::Advance { direction: 1 }
        );
    }
}
