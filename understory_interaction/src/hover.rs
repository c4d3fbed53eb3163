// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover state helper: compute enter/leave transitions for a single target.
//!
//! A mind map highlights one thing at a time: a node body or a link. Feed the
//! id found under the pointer (or `None`) to [`HoverState::update`] and it
//! reports what changed.
//!
//! ## Minimal example
//!
//! ```
//! use understory_interaction::hover::{HoverEvent, HoverState};
//! let mut h: HoverState<&str> = HoverState::new();
//! assert_eq!(h.update(Some("0-1")), vec![HoverEvent::Enter("0-1")]);
//! assert_eq!(
//!     h.update(Some("link-0")),
//!     vec![HoverEvent::Leave("0-1"), HoverEvent::Enter("link-0")]
//! );
//! assert!(h.update(Some("link-0")).is_empty());
//! ```

/// Tracks the current hover target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverState<K> {
    current: Option<K>,
}

/// A hover transition event.
///
/// Returned by [`HoverState::update`]. A change of target yields the leave
/// of the old target before the enter of the new one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// Pointer enters the given target.
    Enter(K),
    /// Pointer leaves the given target.
    Leave(K),
}

impl<K: Clone + Eq> HoverState<K> {
    /// Create an empty hover state.
    pub fn new() -> Self {
        Self { current: None }
    }

    /// The current target, if any.
    pub fn current(&self) -> Option<&K> {
        self.current.as_ref()
    }

    /// Drop the current target, returning its leave event.
    pub fn clear(&mut self) -> Vec<HoverEvent<K>> {
        self.current.take().map(HoverEvent::Leave).into_iter().collect()
    }

    /// Move to `target` and return the transitions. Empty when unchanged.
    pub fn update(&mut self, target: Option<K>) -> Vec<HoverEvent<K>> {
        if self.current == target {
            return Vec::new();
        }
        let mut out = self.clear();
        if let Some(k) = target {
            out.push(HoverEvent::Enter(k.clone()));
            self.current = Some(k);
        }
        out
    }
}
