//! Infinite-loop clone maintenance.
//!
//! Keeps the registry padded with boundary clones so the viewport can
//! animate past either end of the real sequence, and remaps the current
//! index whenever a structural change would otherwise move the panel the
//! viewer is looking at. Callers are responsible for committing an
//! instant reposition whenever an operation here reports a remapped
//! index.
//!
//! Padding policy: grow on approach, shrink once the excess is provably
//! off-screen. Growing and the steady-state shrink are applied
//! consistently; mixing a grow-once policy with this one reintroduces
//! index drift.

use tracing::debug;

use crate::error::{Error, Result};
use crate::registry::SlideRegistry;

/// Pad a freshly-synced registry with `clone_width` clones at each end
/// and return the index of the first real panel.
///
/// Returns [`Error::EmptyContent`] when no panels are available yet; the
/// caller defers priming until the host reports a non-empty set.
pub(crate) fn prime(registry: &mut SlideRegistry, clone_width: usize) -> Result<usize> {
    if registry.is_empty() {
        return Err(Error::EmptyContent);
    }
    registry.prepend_clones(clone_width);
    registry.append_clones(clone_width);
    debug!(
        "loop primed: {} panels ({} real), starting at {}",
        registry.len(),
        registry.real_count(),
        clone_width
    );
    Ok(clone_width)
}

/// Extend the clone padding if `target` approaches either boundary:
/// at/below the clone width near the start, or within `lookahead` of the
/// end.
///
/// Returns the index shift produced by prepending (the caller adds it to
/// both the current index and the target, then repositions instantly).
pub(crate) fn grow_for_target(
    registry: &mut SlideRegistry,
    target: i64,
    clone_width: usize,
    lookahead: usize,
) -> usize {
    if registry.is_empty() {
        return 0;
    }

    let mut shift = 0;
    if target <= clone_width as i64 {
        registry.prepend_clones(clone_width);
        shift = clone_width;
        debug!("grew leading clones to {}", registry.leading_clones());
    }
    if target + shift as i64 + lookahead as i64 >= registry.len() as i64 {
        registry.append_clones(clone_width);
        debug!("grew trailing clones to {}", registry.trailing_clones());
    }
    shift
}

/// Map an index that has come to rest inside either synthetic clone
/// region back to the real panel with the same `original_rank`.
///
/// At steady-state padding this is exactly the boundary correction:
/// index 0 maps to `len - 2 * clone_width`, the first trailing clone maps
/// to `clone_width`.
pub(crate) fn wrap_index(registry: &SlideRegistry, index: usize) -> Option<usize> {
    let panel = registry.panel(index)?;
    if !panel.is_clone {
        return None;
    }
    let real = registry.leading_clones() + panel.original_rank;
    debug!("wrapped index {index} to {real} (rank {})", panel.original_rank);
    Some(real)
}

/// Drop clone padding that has accumulated beyond the steady state once
/// the current index has moved far enough away that the excess is
/// off-screen.
///
/// Returns the remapped index when leading clones were removed (the
/// caller repositions instantly); trailing removal never moves the
/// viewport.
pub(crate) fn shrink_excess(
    registry: &mut SlideRegistry,
    index: usize,
    clone_width: usize,
) -> Option<usize> {
    if registry.is_empty() || clone_width == 0 {
        return None;
    }

    let mut index = index;
    let mut remapped = false;
    while registry.leading_clones() > clone_width && index >= registry.leading_clones() {
        registry.remove_leading(clone_width);
        index -= clone_width;
        remapped = true;
    }
    // Removing a batch from the back drops indices [len - w, len); safe
    // once the viewport (at most w panels wide) cannot reach them.
    while registry.trailing_clones() > clone_width
        && index + clone_width <= registry.len() - clone_width
    {
        registry.remove_trailing(clone_width);
    }

    remapped.then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primed_registry(real: usize, clone_width: usize) -> SlideRegistry {
        let mut registry = SlideRegistry::new();
        registry.set_real_count(real);
        prime(&mut registry, clone_width).unwrap();
        registry
    }

    #[test]
    fn test_prime_pads_both_ends() {
        let registry = primed_registry(4, 2);
        assert_eq!(registry.len(), 8);
        assert_eq!(registry.leading_clones(), 2);
        assert_eq!(registry.trailing_clones(), 2);
    }

    #[test]
    fn test_prime_empty_defers() {
        let mut registry = SlideRegistry::new();
        registry.set_real_count(0);
        assert!(matches!(
            prime(&mut registry, 2),
            Err(Error::EmptyContent)
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_grow_near_start_prepends_and_shifts() {
        let mut registry = primed_registry(4, 1);
        // Backing off the first real panel (index 1 -> 0)
        let shift = grow_for_target(&mut registry, 0, 1, 1);
        assert_eq!(shift, 1);
        assert_eq!(registry.leading_clones(), 2);
        assert_eq!(registry.trailing_clones(), 1);
    }

    #[test]
    fn test_grow_near_end_appends_without_shift() {
        let mut registry = primed_registry(4, 1);
        // len = 6, advancing toward index 5 with one panel of lookahead
        let shift = grow_for_target(&mut registry, 5, 1, 1);
        assert_eq!(shift, 0);
        assert_eq!(registry.trailing_clones(), 2);
        assert_eq!(registry.leading_clones(), 1);
    }

    #[test]
    fn test_grow_in_steady_middle_is_noop() {
        let mut registry = primed_registry(4, 1);
        let shift = grow_for_target(&mut registry, 3, 1, 1);
        assert_eq!(shift, 0);
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_wrap_maps_clone_to_same_rank() {
        let registry = primed_registry(4, 2);
        // len 8, leading 2: trailing region starts at 6
        for (clone_index, expected) in [(0, 4), (1, 5), (6, 2), (7, 3)] {
            let wrapped = wrap_index(&registry, clone_index).unwrap();
            assert_eq!(wrapped, expected);
            assert_eq!(
                registry.panel(clone_index).unwrap().original_rank,
                registry.panel(wrapped).unwrap().original_rank
            );
            assert!(!registry.panel(wrapped).unwrap().is_clone);
        }
    }

    #[test]
    fn test_wrap_steady_state_boundaries() {
        let registry = primed_registry(5, 2);
        let len = registry.len();
        // Spec mapping: lead-in resets to len - 2w, lead-out to w
        assert_eq!(wrap_index(&registry, 0), Some(len - 4));
        assert_eq!(wrap_index(&registry, len - 2), Some(2));
    }

    #[test]
    fn test_wrap_real_index_is_none() {
        let registry = primed_registry(4, 2);
        assert_eq!(wrap_index(&registry, 3), None);
        assert_eq!(wrap_index(&registry, 42), None);
    }

    #[test]
    fn test_shrink_removes_excess_leading() {
        let mut registry = primed_registry(4, 1);
        registry.prepend_clones(1);
        // Index sits past the grown leading region
        let remapped = shrink_excess(&mut registry, 3, 1);
        assert_eq!(remapped, Some(2));
        assert_eq!(registry.leading_clones(), 1);
    }

    #[test]
    fn test_shrink_removes_excess_trailing() {
        let mut registry = primed_registry(4, 1);
        registry.append_clones(1);
        // len 7, trailing 2; index 1 is clear of the trailing region
        let remapped = shrink_excess(&mut registry, 1, 1);
        assert_eq!(remapped, None);
        assert_eq!(registry.trailing_clones(), 1);
    }

    #[test]
    fn test_shrink_leaves_visible_clones_alone() {
        let mut registry = primed_registry(4, 1);
        registry.prepend_clones(1);
        // Index still inside the grown leading region: nothing removed
        let remapped = shrink_excess(&mut registry, 1, 1);
        assert_eq!(remapped, None);
        assert_eq!(registry.leading_clones(), 2);
    }

    #[test]
    fn test_steady_state_is_untouched() {
        let mut registry = primed_registry(4, 2);
        assert_eq!(shrink_excess(&mut registry, 3, 2), None);
        assert_eq!(registry.leading_clones(), 2);
        assert_eq!(registry.trailing_clones(), 2);
    }
}
