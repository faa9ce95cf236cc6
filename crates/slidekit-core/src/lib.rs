//! Core state machine for an embeddable carousel/slider widget.
//!
//! Given an ordered set of content panels, the slider presents one
//! viewport-sized window onto them and moves between panels via
//! drag/swipe gestures or timed automatic advancement, with an optional
//! illusion of infinite circular scrolling sustained by synthetic clone
//! panels at the sequence boundaries.
//!
//! Rendering, content discovery and input sourcing stay with the host:
//! it implements [`RenderSurface`], normalizes pointer input into
//! [`PointerEvent`]s, and notifies the slider of panel changes and
//! transition completions, either directly on [`Slider`] or through the
//! [`SliderDriver`] signal pump.

pub mod config;
pub mod driver;
pub mod error;
pub mod input;
pub mod registry;
pub mod slider;
pub mod surface;

mod autoplay;
mod gesture;
mod looping;
mod position;

pub use config::{GestureConfig, PerViewConfig, SliderConfig};
pub use driver::{HostSignal, SliderDriver};
pub use error::{Error, Result};
pub use input::{PointerEvent, PointerPhase};
pub use registry::{Panel, SlideRegistry};
pub use slider::Slider;
pub use surface::RenderSurface;
