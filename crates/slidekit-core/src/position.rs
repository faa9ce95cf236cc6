//! Position controller.
//!
//! Converts a target index into a visual offset and commits it to the
//! render surface. Animated moves flip the `animating` flag for their
//! duration; the flag is cleared exclusively by the settlement signal
//! (`settled`), which the host raises at most once per animated move and
//! never for instant ones. Instant moves skip the animated code path
//! entirely, so boundary corrections can never re-trigger themselves.

use tracing::trace;

use crate::registry::SlideRegistry;
use crate::surface::RenderSurface;

#[derive(Debug, Default)]
pub(crate) struct PositionController {
    animating: bool,
}

impl PositionController {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn is_animating(&self) -> bool {
        self.animating
    }

    /// Commit the offset for `index` to the surface.
    ///
    /// The panel extent is measured from the first panel on every call;
    /// it is never cached, since the viewport may resize between moves.
    /// No-op when the registry is empty.
    pub(crate) fn move_to<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        registry: &SlideRegistry,
        index: usize,
        animated: bool,
    ) {
        let Some(first) = registry.panels().first() else {
            return;
        };
        let extent = surface.panel_extent(first);
        let offset = -(extent * index as f32);
        trace!("move to index {index} at offset {offset} (animated: {animated})");
        surface.set_offset(offset, animated);
        if animated {
            self.animating = true;
        }
    }

    /// Consume a settlement signal. Returns `false` for spurious signals
    /// (no animated move in flight), which callers ignore.
    pub(crate) fn settled(&mut self) -> bool {
        if !self.animating {
            trace!("ignoring settlement with no transition in flight");
            return false;
        }
        self.animating = false;
        true
    }
}
