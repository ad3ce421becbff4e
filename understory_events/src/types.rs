// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for event delivery: phases, kinds, events, listener ids, dispatch steps and state.
//!
//! ## Overview
//!
//! These types describe the dispatch protocol and its inputs/outputs.
//! They are referenced by [`listeners`](crate::listeners) and [`dispatch`](crate::dispatch)
//! and used by downstream components.

/// Phases of event propagation.
///
/// Appears on each [`Dispatch`] item produced by
/// [`ListenerSet::route`](crate::listeners::ListenerSet::route).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Root-to-target traversal; only listeners registered for capture run here.
    Capture,
    /// Target node.
    Target,
    /// Target-to-root traversal; only for kinds that bubble.
    Bubble,
}

/// Kinds of events delivered to listeners.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventKind {
    /// A primary-button click.
    Click,
    /// The pointer entered a node.
    PointerEnter,
    /// The pointer left a node.
    PointerLeave,
}

impl EventKind {
    /// Whether events of this kind travel back up through the bubble phase.
    ///
    /// Enter and leave are delivered per node and do not bubble.
    pub const fn bubbles(self) -> bool {
        matches!(self, Self::Click)
    }
}

/// An event aimed at a target node.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Event<K> {
    /// What happened.
    pub kind: EventKind,
    /// The innermost node the event is aimed at.
    pub target: K,
    /// For enter/leave: the node the pointer came from (enter) or moves to (leave).
    ///
    /// `None` when the pointer comes from or moves to outside the scene.
    pub related_target: Option<K>,
}

impl<K> Event<K> {
    /// A click on `target`.
    pub fn click(target: K) -> Self {
        Self {
            kind: EventKind::Click,
            target,
            related_target: None,
        }
    }

    /// The pointer entered `target`, coming from `from`.
    pub fn pointer_enter(target: K, from: Option<K>) -> Self {
        Self {
            kind: EventKind::PointerEnter,
            target,
            related_target: from,
        }
    }

    /// The pointer left `target`, moving to `to`.
    pub fn pointer_leave(target: K, to: Option<K>) -> Self {
        Self {
            kind: EventKind::PointerLeave,
            target,
            related_target: to,
        }
    }
}

/// Handle to a registered listener; needed for exact removal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ListenerId(pub(crate) u64);

/// Look up the parent of a node to reconstruct a root→target path for propagation.
///
/// Used by [`path_to`](crate::dispatch::path_to).
pub trait ParentLookup<K> {
    /// Returns the parent of `node`, or `None` if `node` is a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// A single dispatch item: one listener to invoke.
///
/// Produced by [`ListenerSet::route`](crate::listeners::ListenerSet::route) and typically fed
/// into [`dispatch`](crate::dispatch::dispatch).
#[derive(Clone, Debug)]
pub struct Dispatch<K, H> {
    /// Propagation phase for this step.
    pub phase: Phase,
    /// Node the listener is registered on (the current target).
    pub node: K,
    /// Listener to invoke.
    pub listener: ListenerId,
    /// Handler payload stored with the listener.
    pub handler: H,
}

/// Mutable per-event state shared by all listeners of one dispatch.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct EventState {
    default_prevented: bool,
    propagation_stopped: bool,
}

impl EventState {
    /// Suppress the host's default action for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stop the event from reaching further nodes.
    ///
    /// Remaining listeners on the current node still run.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether [`EventState::prevent_default`] was called.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Whether [`EventState::stop_propagation`] was called.
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_clicks_bubble() {
        assert!(EventKind::Click.bubbles());
        assert!(!EventKind::PointerEnter.bubbles());
        assert!(!EventKind::PointerLeave.bubbles());
    }

    #[test]
    fn event_state_flags_are_sticky() {
        let mut s = EventState::default();
        assert!(!s.default_prevented());
        assert!(!s.propagation_stopped());
        s.prevent_default();
        s.stop_propagation();
        s.stop_propagation();
        assert!(s.default_prevented());
        assert!(s.propagation_stopped());
    }

    #[test]
    fn constructors_fill_related_target() {
        let e = Event::pointer_leave(1_u32, Some(2));
        assert_eq!(e.kind, EventKind::PointerLeave);
        assert_eq!(e.related_target, Some(2));
        assert_eq!(Event::click(3_u32).related_target, None);
    }
}
