// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: element identifiers, flags, and local geometry.

use kurbo::{Affine, Rect};

/// Identifier for an element in the scene.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// ### Liveness
///
/// Use [`Scene::is_alive`](crate::Scene::is_alive) to check whether a `NodeId` still refers to a live element.
/// Stale `NodeId`s never alias a different live element because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Element flags controlling visibility, picking, clipping and offset-parent roles.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Element is visible (participates in hit testing together with its ancestors).
        const VISIBLE        = 0b0000_0001;
        /// Element is pickable (can be the target of a hit test).
        const PICKABLE       = 0b0000_0010;
        /// Element clips the overflow of its descendants to its own bounds.
        const CLIPS_OVERFLOW = 0b0000_0100;
        /// Element is a positioned ancestor and acts as an offset parent.
        const POSITIONED     = 0b0000_1000;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Local geometry for an element.
#[derive(Clone, Debug)]
pub struct LocalNode {
    /// Bounds in the parent's coordinate space.
    pub local_bounds: Rect,
    /// Transform applied to descendants, e.g. a translation modelling a scroll offset.
    ///
    /// The element's own bounds are not affected by its transform; only its children are.
    pub content_transform: Affine,
    /// Z-order within the parent. Higher is on top; ties resolve to document order.
    pub z_index: i32,
    /// Visibility, picking, clipping and positioning flags.
    pub flags: NodeFlags,
}

impl Default for LocalNode {
    fn default() -> Self {
        Self {
            local_bounds: Rect::ZERO,
            content_transform: Affine::IDENTITY,
            z_index: 0,
            flags: NodeFlags::default(),
        }
    }
}

impl LocalNode {
    /// Convenience constructor for an element with the given bounds and default flags.
    pub fn with_bounds(local_bounds: Rect) -> Self {
        Self {
            local_bounds,
            ..Default::default()
        }
    }

    /// Returns this node with `flags` added to its current flags.
    pub fn flagged(mut self, flags: NodeFlags) -> Self {
        self.flags |= flags;
        self
    }
}
