// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover state helper: compute pointer enter/leave events from path changes.
//!
//! ## Usage
//!
//! 1) Hit-test the pointer position to obtain the root→target path under it.
//! 2) Call [`HoverState::update_path`] with that path to get the leave and enter
//!    [`Event`]s, each carrying the related target.
//! 3) Route and dispatch each event like any other.
//!
//! ## Minimal example
//!
//! ```
//! use understory_events::hover::HoverState;
//! use understory_events::types::Event;
//!
//! let mut h: HoverState<u32> = HoverState::new();
//! assert_eq!(
//!     h.update_path(&[1, 2]),
//!     vec![Event::pointer_enter(1, None), Event::pointer_enter(2, None)]
//! );
//! // Moving from 2 to its sibling 3: leave 2 towards 3, enter 3 from 2.
//! assert_eq!(
//!     h.update_path(&[1, 3]),
//!     vec![Event::pointer_leave(2, Some(3)), Event::pointer_enter(3, Some(2))]
//! );
//! ```

use alloc::vec::Vec;

use crate::types::Event;

/// A simple hover state machine over root→target paths.
///
/// Tracks the current hovered path (root→target) and, when updated with a new
/// path, computes the minimal sequence of leave and enter events to move
/// from the old state to the new state.
///
/// Ordering semantics:
/// - Leave events are emitted from inner-most to outer-most.
/// - Enter events are emitted from outer-most to inner-most.
///
/// Leave events carry the new innermost node as their related target, enter
/// events carry the previous innermost node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverState<K: Copy + Eq> {
    current: Vec<K>,
}

impl<K: Copy + Eq> HoverState<K> {
    /// Create an empty hover state.
    pub fn new() -> Self {
        Self {
            current: Vec::new(),
        }
    }

    /// Return the current root→target path (if any).
    pub fn current_path(&self) -> &[K] {
        &self.current
    }

    /// The pointer left the scene: leave events from inner-most to outer-most,
    /// with no related target.
    pub fn clear(&mut self) -> Vec<Event<K>> {
        let out = self
            .current
            .iter()
            .rev()
            .map(|&k| Event::pointer_leave(k, None))
            .collect();
        self.current.clear();
        out
    }

    /// Update the hover path and return the leave/enter events required to
    /// transition from the previous path to `new_path`.
    pub fn update_path(&mut self, new_path: &[K]) -> Vec<Event<K>> {
        // Length of the shared ancestry (lowest common ancestor depth).
        let mut lca = 0;
        while lca < self.current.len() && lca < new_path.len() && self.current[lca] == new_path[lca]
        {
            lca += 1;
        }

        let from = self.current.last().copied();
        let to = new_path.last().copied();
        let mut out = Vec::new();
        for &k in self.current[lca..].iter().rev() {
            out.push(Event::pointer_leave(k, to));
        }
        for &k in &new_path[lca..] {
            out.push(Event::pointer_enter(k, from));
        }

        self.current.clear();
        self.current.extend_from_slice(new_path);
        out
    }
}
