// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener table.
//!
//! ## Overview
//!
//! Stores listeners keyed by node and event kind, each carrying a handler payload `H`.
//! Routing an event over a root→target path yields the ordered listeners to invoke:
//!
//! - Capture: capture listeners on ancestors, root→parent.
//! - Target: capture listeners on the target, then the others.
//! - Bubble: non-capture listeners on ancestors, parent→root, for kinds that bubble.
//!
//! Within a node, listeners run in registration order.
//!
//! The table does not invoke handlers itself; see [`dispatch`](crate::dispatch::dispatch).

use alloc::vec::Vec;

use crate::types::{Dispatch, Event, EventKind, ListenerId, Phase};

#[derive(Clone, Debug)]
struct Entry<K, H> {
    id: ListenerId,
    node: K,
    kind: EventKind,
    capture: bool,
    handler: H,
}

/// Registered listeners, in registration order.
#[derive(Clone, Debug)]
pub struct ListenerSet<K, H> {
    entries: Vec<Entry<K, H>>,
    next_id: u64,
}

impl<K, H> Default for ListenerSet<K, H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<K: Copy + Eq, H: Clone> ListenerSet<K, H> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind` events on `node`.
    ///
    /// With `capture` set, the listener runs while the event travels towards
    /// the target instead of while it bubbles back.
    pub fn add(&mut self, node: K, kind: EventKind, capture: bool, handler: H) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            node,
            kind,
            capture,
            handler,
        });
        id
    }

    /// Remove a listener, returning its handler. Stale ids return `None`.
    pub fn remove(&mut self, id: ListenerId) -> Option<H> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos).handler)
    }

    /// Whether `id` is still registered.
    pub fn is_live(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Produce the ordered listener sequence for `event` over `path` (root→target).
    ///
    /// `path` should end with `event.target`; an empty path yields an empty sequence.
    pub fn route(&self, event: &Event<K>, path: &[K]) -> Vec<Dispatch<K, H>> {
        let mut out = Vec::new();
        let Some((&target, ancestors)) = path.split_last() else {
            return out;
        };
        for &n in ancestors {
            self.push_matching(&mut out, Phase::Capture, n, event.kind, true);
        }
        self.push_matching(&mut out, Phase::Target, target, event.kind, true);
        self.push_matching(&mut out, Phase::Target, target, event.kind, false);
        if event.kind.bubbles() {
            for &n in ancestors.iter().rev() {
                self.push_matching(&mut out, Phase::Bubble, n, event.kind, false);
            }
        }
        out
    }

    fn push_matching(
        &self,
        out: &mut Vec<Dispatch<K, H>>,
        phase: Phase,
        node: K,
        kind: EventKind,
        capture: bool,
    ) {
        for e in &self.entries {
            if e.node == node && e.kind == kind && e.capture == capture {
                out.push(Dispatch {
                    phase,
                    node,
                    listener: e.id,
                    handler: e.handler.clone(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn phases(seq: &[Dispatch<u32, &'static str>]) -> Vec<(Phase, u32, &'static str)> {
        seq.iter().map(|d| (d.phase, d.node, d.handler)).collect()
    }

    #[test]
    fn click_routes_capture_target_bubble() {
        let mut set = ListenerSet::new();
        set.add(1, EventKind::Click, true, "doc-capture");
        set.add(1, EventKind::Click, false, "doc-bubble");
        set.add(2, EventKind::Click, false, "wrapper");
        set.add(3, EventKind::Click, false, "button");
        set.add(3, EventKind::Click, true, "button-capture");
        set.add(3, EventKind::PointerEnter, false, "button-enter");

        let seq = set.route(&Event::click(3), &[1, 2, 3]);
        assert_eq!(
            phases(&seq),
            vec![
                (Phase::Capture, 1, "doc-capture"),
                (Phase::Target, 3, "button-capture"),
                (Phase::Target, 3, "button"),
                (Phase::Bubble, 2, "wrapper"),
                (Phase::Bubble, 1, "doc-bubble"),
            ]
        );
    }

    #[test]
    fn leave_does_not_bubble() {
        let mut set = ListenerSet::new();
        set.add(1, EventKind::PointerLeave, false, "outer");
        set.add(2, EventKind::PointerLeave, false, "inner");
        let seq = set.route(&Event::pointer_leave(2, None), &[1, 2]);
        assert_eq!(phases(&seq), vec![(Phase::Target, 2, "inner")]);
    }

    #[test]
    fn removed_listeners_are_not_routed() {
        let mut set = ListenerSet::new();
        let a = set.add(1, EventKind::Click, false, "a");
        let b = set.add(1, EventKind::Click, false, "b");
        assert_eq!(set.remove(a), Some("a"));
        assert_eq!(set.remove(a), None);
        assert!(!set.is_live(a));
        assert!(set.is_live(b));
        assert_eq!(set.len(), 1);
        let seq = set.route(&Event::click(1), &[1]);
        assert_eq!(phases(&seq), vec![(Phase::Target, 1, "b")]);
    }

    #[test]
    fn empty_path_routes_nothing() {
        let mut set = ListenerSet::new();
        set.add(1, EventKind::Click, true, "a");
        assert!(set.route(&Event::click(1), &[]).is_empty());
        assert!(!set.is_empty());
    }
}
