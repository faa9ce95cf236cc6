//! Host signal pump.
//!
//! Serializes the three external signal sources the slider reacts to
//! (pointer events, the autoplay deadline, transition settlement) through
//! one `select!` loop, so the state machine is only ever touched from a
//! single logical thread of control. The host feeds signals over an
//! unbounded channel and stops the pump through a watch channel; teardown
//! is immediate and unconditional, with no in-flight transition awaited.

use std::time::{Duration, Instant};

use tokio::sync::{mpsc, watch};
use tokio::time;
use tracing::{debug, info};

use crate::input::PointerEvent;
use crate::slider::Slider;
use crate::surface::RenderSurface;

/// Notifications from the host environment.
#[derive(Debug)]
pub enum HostSignal {
    /// A normalized pointer event
    Pointer(PointerEvent),
    /// The panel set changed structurally; `count` real panels now exist
    PanelsChanged { count: usize },
    /// An animated offset transition has completed
    TransitionSettled,
}

/// Pumps host signals and the autoplay deadline into a [`Slider`].
pub struct SliderDriver<S: RenderSurface> {
    slider: Slider<S>,
    signals: mpsc::UnboundedReceiver<HostSignal>,
}

impl<S: RenderSurface> SliderDriver<S> {
    pub fn new(slider: Slider<S>, signals: mpsc::UnboundedReceiver<HostSignal>) -> Self {
        Self { slider, signals }
    }

    /// Run until the shutdown signal flips or the signal channel closes,
    /// then detach the slider and hand it back.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> Slider<S> {
        info!("slider driver started");

        loop {
            let deadline = self.slider.autoplay_deadline();
            // Disabled select branches still evaluate their expression,
            // so the sleep needs a concrete instant either way
            let wake = deadline.map(time::Instant::from_std).unwrap_or_else(|| {
                time::Instant::now() + Duration::from_secs(3600)
            });

            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("slider driver received shutdown");
                        break;
                    }
                }

                signal = self.signals.recv() => {
                    match signal {
                        Some(HostSignal::Pointer(event)) => {
                            self.slider.handle_pointer(event);
                        }
                        Some(HostSignal::PanelsChanged { count }) => {
                            debug!("host reports {count} panels");
                            self.slider.sync_panels(count, now());
                        }
                        Some(HostSignal::TransitionSettled) => {
                            self.slider.transition_settled(now());
                        }
                        None => {
                            debug!("host signal channel closed");
                            break;
                        }
                    }
                }

                _ = time::sleep_until(wake), if deadline.is_some() => {
                    self.slider.handle_timer(now());
                }
            }
        }

        self.slider.detach();
        info!("slider driver stopped");
        self.slider
    }
}

/// Current time as seen by the tokio clock, so paused-clock tests drive
/// the deadlines deterministically.
fn now() -> Instant {
    time::Instant::now().into_std()
}
