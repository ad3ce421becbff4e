// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene implementation: structure, updates, geometry queries.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::{Affine, Point, Rect};

use crate::types::{LocalNode, NodeFlags, NodeId};

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// An ordered tree of elements.
///
/// Children keep document order: insertion appends, [`Scene::insert_after`] moves.
pub struct Scene {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    roots: Vec<NodeId>,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Scene")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("roots", &self.roots)
            .finish_non_exhaustive()
    }
}

/// Results of a hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched element.
    pub node: NodeId,
    /// Path from root to element (inclusive).
    pub path: Vec<NodeId>,
}

/// Filters applied during hit testing.
///
/// Used by [`Scene::hit_test_point`].
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryFilter {
    /// If true, skip elements (and their subtrees) not marked [`NodeFlags::VISIBLE`].
    pub visible_only: bool,
    /// If true, only elements marked [`NodeFlags::PICKABLE`] can be hit.
    pub pickable_only: bool,
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalNode,
    attributes: Vec<(String, String)>,
}

impl Node {
    fn new(generation: u32, local: LocalNode) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
            attributes: Vec::new(),
        }
    }
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Insert a new element as the last child of `parent` (or as a root if `None`).
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        match parent.filter(|p| self.is_alive(*p)) {
            Some(p) => self.link_parent(id, p, None),
            None => self.roots.push(id),
        }
        id
    }

    /// Remove an element (and its subtree) from the scene.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        self.detach(id);
        self.free_subtree(id);
    }

    /// Move `id` so that it immediately follows `reference` among `reference`'s siblings.
    ///
    /// Does nothing if either element is stale, if they are the same element,
    /// or if `reference` lies inside the subtree of `id`.
    pub fn insert_after(&mut self, id: NodeId, reference: NodeId) {
        if !self.is_alive(id) || !self.is_alive(reference) || self.contains(id, reference) {
            return;
        }
        self.detach(id);
        match self.node(reference).parent {
            Some(parent) => {
                let pos = self
                    .node(parent)
                    .children
                    .iter()
                    .position(|c| *c == reference)
                    .map(|i| i + 1);
                self.link_parent(id, parent, pos);
            }
            None => {
                let pos = self
                    .roots
                    .iter()
                    .position(|r| *r == reference)
                    .map_or(self.roots.len(), |i| i + 1);
                self.roots.insert(pos, id);
            }
        }
    }

    /// Update local bounds.
    pub fn set_local_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(node) = self.node_opt_mut(id) {
            node.local.local_bounds = bounds;
        }
    }

    /// Update the transform applied to an element's descendants.
    pub fn set_content_transform(&mut self, id: NodeId, transform: Affine) {
        if let Some(node) = self.node_opt_mut(id) {
            node.local.content_transform = transform;
        }
    }

    /// Update flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(node) = self.node_opt_mut(id) {
            node.local.flags = flags;
        }
    }

    /// Set an attribute, replacing any previous value under the same name.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(node) = self.node_opt_mut(id) {
            match node.attributes.iter_mut().find(|(n, _)| n == name) {
                Some((_, v)) => {
                    v.clear();
                    v.push_str(value);
                }
                None => node.attributes.push((name.into(), value.into())),
            }
        }
    }

    /// Read an attribute.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        let node = self.node_opt(id)?;
        node.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// First element in document order whose attribute `name` equals `value`.
    pub fn find_by_attribute(&self, name: &str, value: &str) -> Option<NodeId> {
        let mut found = None;
        self.walk(&mut |id| {
            if found.is_none() && self.attribute(id, name) == Some(value) {
                found = Some(id);
            }
        });
        found
    }

    /// Element whose `id` attribute equals `ident`.
    pub fn element_by_id(&self, ident: &str) -> Option<NodeId> {
        self.find_by_attribute("id", ident)
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Local data of an element.
    pub fn local(&self, id: NodeId) -> Option<&LocalNode> {
        self.node_opt(id).map(|n| &n.local)
    }

    /// Parent of an element, or `None` for roots and stale ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Children of an element in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Returns true if `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.parent(id);
        }
        false
    }

    /// Path from root to `id` (inclusive). Empty for stale ids.
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cur = self.is_alive(id).then_some(id);
        while let Some(n) = cur {
            out.push(n);
            cur = self.parent(n);
        }
        out.reverse();
        out
    }

    /// Bounds of an element in world (viewport) coordinates.
    pub fn world_bounds(&self, id: NodeId) -> Option<Rect> {
        let node = self.node_opt(id)?;
        let tf = match node.parent {
            Some(p) => self.content_transform_of(p),
            None => Affine::IDENTITY,
        };
        Some(transform_rect_bbox(tf, node.local.local_bounds))
    }

    /// Nearest ancestor marked [`NodeFlags::POSITIONED`], falling back to the root.
    ///
    /// Roots have no offset parent.
    pub fn offset_parent(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = self.parent(id)?;
        loop {
            let node = self.node(cur);
            if node.local.flags.contains(NodeFlags::POSITIONED) {
                return Some(cur);
            }
            match node.parent {
                Some(p) => cur = p,
                None => return Some(cur),
            }
        }
    }

    /// Bounds of an element relative to its offset parent.
    ///
    /// Elements without an offset parent report world bounds.
    pub fn offset_bounds(&self, id: NodeId) -> Option<Rect> {
        let world = self.world_bounds(id)?;
        let Some(op) = self.offset_parent(id) else {
            return Some(world);
        };
        let origin = self.world_bounds(op)?.origin();
        Some(world - origin.to_vec2())
    }

    /// Nearest ancestor marked [`NodeFlags::CLIPS_OVERFLOW`], falling back to the root.
    ///
    /// A root is its own clip ancestor.
    pub fn clip_ancestor(&self, id: NodeId) -> Option<NodeId> {
        if !self.is_alive(id) {
            return None;
        }
        let mut cur = id;
        while let Some(p) = self.parent(cur) {
            if self.node(p).local.flags.contains(NodeFlags::CLIPS_OVERFLOW) {
                return Some(p);
            }
            cur = p;
        }
        Some(cur)
    }

    /// Returns the topmost element at a world-space point.
    ///
    /// Z-indices are compared across the whole scene; equal z resolves to the
    /// element latest in document order. Honors [`QueryFilter`] and
    /// [`NodeFlags::CLIPS_OVERFLOW`] on ancestors.
    pub fn hit_test_point(&self, pt: Point, filter: QueryFilter) -> Option<Hit> {
        let mut best: Option<(NodeId, i32)> = None;
        for &root in &self.roots {
            self.hit_recursive(root, pt, filter, None, &mut best);
        }
        best.map(|(node, _)| Hit {
            node,
            path: self.path_to_root(node),
        })
    }

    // --- internals ---

    fn hit_recursive(
        &self,
        id: NodeId,
        pt: Point,
        filter: QueryFilter,
        clip: Option<Rect>,
        best: &mut Option<(NodeId, i32)>,
    ) {
        let node = self.node(id);
        let flags = node.local.flags;
        if filter.visible_only && !flags.contains(NodeFlags::VISIBLE) {
            return;
        }
        let Some(bounds) = self.world_bounds(id) else {
            return;
        };
        let inside_clip = clip.is_none_or(|c| c.contains(pt));
        let pickable = !filter.pickable_only || flags.contains(NodeFlags::PICKABLE);
        if pickable && inside_clip && bounds.contains(pt) {
            match *best {
                Some((_, z)) if node.local.z_index < z => {}
                _ => *best = Some((id, node.local.z_index)),
            }
        }
        let child_clip = if flags.contains(NodeFlags::CLIPS_OVERFLOW) {
            Some(clip.map_or(bounds, |c| c.intersect(bounds)))
        } else {
            clip
        };
        for &child in &node.children {
            self.hit_recursive(child, pt, filter, child_clip, best);
        }
    }

    fn walk(&self, visit: &mut impl FnMut(NodeId)) {
        fn go(scene: &Scene, id: NodeId, visit: &mut impl FnMut(NodeId)) {
            visit(id);
            for &c in &scene.node(id).children {
                go(scene, c, visit);
            }
        }
        for &root in &self.roots {
            go(self, root, visit);
        }
    }

    fn content_transform_of(&self, id: NodeId) -> Affine {
        let path = self.path_to_root(id);
        path.iter().fold(Affine::IDENTITY, |acc, n| {
            acc * self.node(*n).local.content_transform
        })
    }

    fn detach(&mut self, id: NodeId) {
        match self.node(id).parent {
            Some(parent) => self.unlink_parent(id, parent),
            None => self.roots.retain(|r| *r != id),
        }
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.free_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    fn node(&self, id: NodeId) -> &Node {
        self.node_opt(id).expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.node_opt_mut(id).expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId, at: Option<usize>) {
        let parent_node = self.node_mut(parent);
        let at = at.unwrap_or(parent_node.children.len());
        parent_node.children.insert(at, id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}

/// Transform an axis-aligned `Rect` by an `Affine` and return a conservative
/// axis-aligned bounding box in world space.
fn transform_rect_bbox(affine: Affine, rect: Rect) -> Rect {
    let p0 = affine * Point::new(rect.x0, rect.y0);
    let p1 = affine * Point::new(rect.x1, rect.y0);
    let p2 = affine * Point::new(rect.x0, rect.y1);
    let p3 = affine * Point::new(rect.x1, rect.y1);
    let min_x = p0.x.min(p1.x).min(p2.x).min(p3.x);
    let min_y = p0.y.min(p1.y).min(p2.y).min(p3.y);
    let max_x = p0.x.max(p1.x).max(p2.x).max(p3.x);
    let max_y = p0.y.max(p1.y).max(p2.y).max(p3.y);
    Rect::new(min_x, min_y, max_x, max_y)
}
