//! Panel registry.
//!
//! Owns the ordered panel sequence the rest of the slider operates on.
//! When the infinite loop is active the order is always
//! `[leading clones.., originals.., trailing clones..]`; otherwise it is
//! exactly the originals. Clone panels exist only in here; the host never
//! sees or owns them.

use tracing::trace;

/// One content unit in the sequence.
///
/// `original_rank` is the position in the host-authored sequence; for a
/// clone it names the original it duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    pub original_rank: usize,
    pub is_clone: bool,
}

impl Panel {
    fn real(rank: usize) -> Self {
        Self {
            original_rank: rank,
            is_clone: false,
        }
    }

    fn clone_of(rank: usize) -> Self {
        Self {
            original_rank: rank,
            is_clone: true,
        }
    }
}

/// Ordered sequence of panels, real and clone.
///
/// The clone-region bookkeeping (`leading`/`trailing`) is derived from the
/// panel list by [`refresh`](Self::refresh); every structural mutation in
/// this module re-derives it before returning, so queries never see a
/// stale view.
#[derive(Debug, Default)]
pub struct SlideRegistry {
    panels: Vec<Panel>,
    real_count: usize,
    leading: usize,
    trailing: usize,
}

impl SlideRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the real panel set with `count` host-authored panels,
    /// discarding all clones.
    pub fn set_real_count(&mut self, count: usize) {
        self.panels = (0..count).map(Panel::real).collect();
        self.real_count = count;
        self.refresh();
        trace!("registry reset to {count} real panels");
    }

    /// Re-derive the clone-region bookkeeping from the panel list.
    ///
    /// Must run after every structural mutation before the registry is
    /// queried again.
    pub fn refresh(&mut self) {
        self.leading = self.panels.iter().take_while(|p| p.is_clone).count();
        self.trailing = if self.leading == self.panels.len() {
            0
        } else {
            self.panels.iter().rev().take_while(|p| p.is_clone).count()
        };
        debug_assert_eq!(
            self.panels.len(),
            self.leading + self.real_count + self.trailing,
            "clone regions must sandwich the originals"
        );
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panel(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn real_count(&self) -> usize {
        self.real_count
    }

    pub fn leading_clones(&self) -> usize {
        self.leading
    }

    pub fn trailing_clones(&self) -> usize {
        self.trailing
    }

    /// Insert `count` clones before the current front, extending the
    /// leading region backwards through the originals cyclically.
    pub fn prepend_clones(&mut self, count: usize) {
        let n = self.real_count as i64;
        if n == 0 || count == 0 {
            return;
        }
        let existing = self.leading as i64;
        let clones: Vec<Panel> = (0..count as i64)
            .map(|i| {
                let rank = (-existing - (count as i64 - i)).rem_euclid(n);
                Panel::clone_of(rank as usize)
            })
            .collect();
        self.panels.splice(0..0, clones);
        self.refresh();
        trace!("prepended {count} clones, leading now {}", self.leading);
    }

    /// Append `count` clones after the current back, extending the
    /// trailing region forwards through the originals cyclically.
    pub fn append_clones(&mut self, count: usize) {
        let n = self.real_count;
        if n == 0 || count == 0 {
            return;
        }
        let existing = self.trailing;
        let clones = (0..count).map(|i| Panel::clone_of((existing + i) % n));
        self.panels.extend(clones);
        self.refresh();
        trace!("appended {count} clones, trailing now {}", self.trailing);
    }

    /// Remove `count` clones from the front of the leading region.
    pub fn remove_leading(&mut self, count: usize) {
        let count = count.min(self.leading);
        self.panels.drain(0..count);
        self.refresh();
        trace!("removed {count} leading clones");
    }

    /// Remove `count` clones from the back of the trailing region.
    pub fn remove_trailing(&mut self, count: usize) {
        let count = count.min(self.trailing);
        let keep = self.panels.len() - count;
        self.panels.truncate(keep);
        self.refresh();
        trace!("removed {count} trailing clones");
    }
}
