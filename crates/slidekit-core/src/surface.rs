//! Render surface contract.
//!
//! The slider never touches the screen itself; the host supplies an
//! implementation of [`RenderSurface`] that can read the current visual
//! offset, commit a new one (instantly or via an animated transition),
//! and measure a panel's on-screen extent.
//!
//! Two further host responsibilities are notifications *into* the slider
//! rather than trait methods: the host must call
//! [`Slider::transition_settled`](crate::Slider::transition_settled)
//! exactly once when an animated `set_offset` completes (never for
//! instant ones), and [`Slider::sync_panels`](crate::Slider::sync_panels)
//! after any structural change to the panel set, however the host detects
//! that.

use crate::registry::Panel;

pub trait RenderSurface {
    /// Current visual offset of the panel strip.
    fn offset(&self) -> f32;

    /// Commit a new offset. `animated = false` must take effect
    /// immediately and must not produce a settlement notification.
    fn set_offset(&mut self, offset: f32, animated: bool);

    /// Current rendered extent of a panel along the slide axis.
    fn panel_extent(&self, panel: &Panel) -> f32;
}
