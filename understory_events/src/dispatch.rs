// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Walking a routed sequence.
//!
//! ## Overview
//!
//! [`dispatch`] delivers each [`Dispatch`] step in order and honors
//! [`EventState::stop_propagation`]: once a handler stops propagation, the
//! remaining listeners on the same node and phase still run, then delivery ends.
//!
//! [`path_to`] reconstructs a root→target path from a [`ParentLookup`].

use alloc::vec::Vec;

use crate::types::{Dispatch, EventState, ParentLookup, Phase};

/// Deliver a routed sequence, returning the final event state.
///
/// `deliver` is called once per step with the shared state.
pub fn dispatch<K: Copy + Eq, H>(
    seq: &[Dispatch<K, H>],
    mut deliver: impl FnMut(&Dispatch<K, H>, &mut EventState),
) -> EventState {
    let mut state = EventState::default();
    let mut stopped_at: Option<(K, Phase)> = None;
    for step in seq {
        if let Some((node, phase)) = stopped_at
            && (node != step.node || phase != step.phase)
        {
            break;
        }
        deliver(step, &mut state);
        if stopped_at.is_none() && state.propagation_stopped() {
            stopped_at = Some((step.node, step.phase));
        }
    }
    state
}

/// Root→target path for `target` using `parents`.
pub fn path_to<K: Copy>(target: K, parents: &impl ParentLookup<K>) -> Vec<K> {
    let mut out = Vec::new();
    let mut cur = target;
    // Collect to root; caller ensures acyclic ancestry.
    loop {
        out.push(cur);
        match parents.parent_of(&cur) {
            Some(p) => cur = p,
            None => break,
        }
    }
    out.reverse();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::ListenerSet;
    use crate::types::{Event, EventKind};
    use alloc::vec;

    struct Parents;
    impl ParentLookup<u32> for Parents {
        fn parent_of(&self, node: &u32) -> Option<u32> {
            match node {
                3 => Some(2),
                2 => Some(1),
                _ => None,
            }
        }
    }

    #[test]
    fn path_reconstruction() {
        assert_eq!(path_to(3, &Parents), vec![1, 2, 3]);
        assert_eq!(path_to(9_u32, &Parents), vec![9]);
    }

    #[test]
    fn stop_propagation_finishes_current_node() {
        let mut set = ListenerSet::new();
        set.add(1_u32, EventKind::Click, true, "doc");
        set.add(3, EventKind::Click, false, "stopper");
        set.add(3, EventKind::Click, false, "sibling-listener");
        set.add(2, EventKind::Click, false, "wrapper");
        let seq = set.route(&Event::click(3), &path_to(3, &Parents));

        let mut seen = Vec::new();
        let state = dispatch(&seq, |d, s| {
            seen.push(d.handler);
            if d.handler == "stopper" {
                s.stop_propagation();
            }
        });
        assert_eq!(seen, vec!["doc", "stopper", "sibling-listener"]);
        assert!(state.propagation_stopped());
        assert!(!state.default_prevented());
    }

    #[test]
    fn capture_listener_can_hide_event_from_target() {
        let mut set = ListenerSet::new();
        set.add(1_u32, EventKind::Click, true, "doc");
        set.add(3, EventKind::Click, false, "target");
        let seq = set.route(&Event::click(3), &path_to(3, &Parents));

        let mut seen = Vec::new();
        let state = dispatch(&seq, |d, s| {
            seen.push(d.handler);
            if d.handler == "doc" {
                s.stop_propagation();
                s.prevent_default();
            }
        });
        assert_eq!(seen, vec!["doc"]);
        assert!(state.default_prevented());
    }
}
