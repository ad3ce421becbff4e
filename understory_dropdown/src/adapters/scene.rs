// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Document`] backed by an Understory Scene.
//!
//! ## Feature
//!
//! Enable with `scene_adapter` (on by default).
//!
//! ## Notes
//!
//! - Triggers name their panel with a `data-target` attribute holding the panel's `id`.
//! - The root passed to [`SceneDocument::new`] is both the document (outside-click
//!   listeners live there) and the body (the default clip container).
//! - Geometry of stale elements reads as [`Rect::ZERO`], and events targeting them reach no
//!   listeners.

use alloc::vec::Vec;

use kurbo::Rect;
use understory_events::dispatch::path_to;
use understory_events::listeners::ListenerSet;
use understory_events::types::{Dispatch, Event, EventKind, ListenerId, ParentLookup};
use understory_scene::{NodeId, Scene};

use crate::controller::Binding;
use crate::host::Document;

/// Attribute on a trigger naming its panel's `id`.
pub const TARGET_ATTRIBUTE: &str = "data-target";

/// A scene plus the listeners registered on its elements.
#[derive(Debug)]
pub struct SceneDocument {
    scene: Scene,
    root: NodeId,
    listeners: ListenerSet<NodeId, Binding>,
}

impl SceneDocument {
    /// Wrap `scene`, whose document root is `root`.
    pub fn new(scene: Scene, root: NodeId) -> Self {
        Self {
            scene,
            root,
            listeners: ListenerSet::new(),
        }
    }

    /// The underlying scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access to the underlying scene, e.g. to move or resize elements.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Registered listeners.
    pub fn listeners(&self) -> &ListenerSet<NodeId, Binding> {
        &self.listeners
    }
}

impl Document for SceneDocument {
    type Element = NodeId;

    fn root(&self) -> NodeId {
        self.root
    }

    fn panel_for(&self, trigger: NodeId) -> Option<NodeId> {
        let ident = self.scene.attribute(trigger, TARGET_ATTRIBUTE)?;
        self.scene.element_by_id(ident)
    }

    fn bounding_rect(&self, element: NodeId) -> Rect {
        self.scene.world_bounds(element).unwrap_or(Rect::ZERO)
    }

    fn offset_rect(&self, element: NodeId) -> Rect {
        self.scene.offset_bounds(element).unwrap_or(Rect::ZERO)
    }

    fn clip_rect(&self, element: NodeId) -> Rect {
        self.scene
            .clip_ancestor(element)
            .and_then(|c| self.scene.world_bounds(c))
            .unwrap_or(Rect::ZERO)
    }

    fn contains(&self, ancestor: NodeId, element: NodeId) -> bool {
        self.scene.contains(ancestor, element)
    }

    fn insert_after(&mut self, element: NodeId, reference: NodeId) {
        self.scene.insert_after(element, reference);
    }

    fn add_listener(
        &mut self,
        target: NodeId,
        kind: EventKind,
        capture: bool,
        binding: Binding,
    ) -> ListenerId {
        self.listeners.add(target, kind, capture, binding)
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(id);
    }

    fn is_listening(&self, id: ListenerId) -> bool {
        self.listeners.is_live(id)
    }

    fn route(&self, event: &Event<NodeId>) -> Vec<Dispatch<NodeId, Binding>> {
        if !self.scene.is_alive(event.target) {
            return Vec::new();
        }
        let path = path_to(event.target, self);
        self.listeners.route(event, &path)
    }
}

impl ParentLookup<NodeId> for SceneDocument {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.scene.parent(*node)
    }
}
