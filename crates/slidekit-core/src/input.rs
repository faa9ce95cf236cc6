//! Normalized pointer input.
//!
//! Touch and mouse sources are reduced by the host to a single shape:
//! start/move/end events carrying one coordinate pair and a timestamp.

use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Start,
    Move,
    End,
}

#[derive(Debug, Clone, Copy)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub x: f32,
    pub y: f32,
    pub at: Instant,
}

impl PointerEvent {
    pub fn start(x: f32, y: f32, at: Instant) -> Self {
        Self {
            phase: PointerPhase::Start,
            x,
            y,
            at,
        }
    }

    pub fn moved(x: f32, y: f32, at: Instant) -> Self {
        Self {
            phase: PointerPhase::Move,
            x,
            y,
            at,
        }
    }

    pub fn end(x: f32, y: f32, at: Instant) -> Self {
        Self {
            phase: PointerPhase::End,
            x,
            y,
            at,
        }
    }
}
