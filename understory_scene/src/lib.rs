// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scene --heading-base-level=0

//! Understory Scene: a Kurbo-native element tree with document order.
//!
//! Understory Scene models the part of a document that UI components query and rearrange:
//!
//! - A hierarchy of elements in document order, each with local bounds and a content transform (e.g. a scroll offset).
//! - String attributes, looked up by name or used to find elements (`id`, `data-target`, ...).
//! - Geometry queries in viewport coordinates ([`Scene::world_bounds`]) and relative to the
//!   offset parent ([`Scene::offset_bounds`]), where offset parents are marked with [`NodeFlags::POSITIONED`].
//! - The nearest overflow-clipping ancestor ([`Scene::clip_ancestor`]), marked with [`NodeFlags::CLIPS_OVERFLOW`].
//! - Structural moves ([`Scene::insert_after`]) and containment ([`Scene::contains`]).
//! - Hit testing honoring visibility, picking and ancestor clips.
//!
//! ## Not a layout engine
//!
//! This crate does not perform layout.
//! Upstream code computes positions and sizes and writes them into the scene.
//!
//! ## API overview
//!
//! - [`Scene`]: container managing elements.
//! - [`LocalNode`]: per-element local data (bounds, content transform, z, flags).
//! - [`NodeFlags`]: visibility, picking, clipping and positioning flags.
//! - [`NodeId`]: generational handle of an element.
//! - [`QueryFilter`]: restricts hit-test results (visible/pickable).
//!
//! ### Minimal usage
//!
//! ```
//! use understory_scene::{LocalNode, NodeFlags, QueryFilter, Scene};
//! use kurbo::{Point, Rect};
//!
//! let mut scene = Scene::new();
//! let body = scene.insert(None, LocalNode::with_bounds(Rect::new(0.0, 0.0, 800.0, 600.0)));
//! let card = scene.insert(
//!     Some(body),
//!     LocalNode::with_bounds(Rect::new(100.0, 100.0, 300.0, 300.0)).flagged(NodeFlags::POSITIONED),
//! );
//! let button = scene.insert(Some(card), LocalNode::with_bounds(Rect::new(110.0, 120.0, 210.0, 150.0)));
//!
//! assert_eq!(scene.offset_bounds(button), Some(Rect::new(10.0, 20.0, 110.0, 50.0)));
//!
//! let filter = QueryFilter { visible_only: true, pickable_only: true };
//! let hit = scene.hit_test_point(Point::new(150.0, 130.0), filter).unwrap();
//! assert_eq!(hit.node, button);
//! assert_eq!(hit.path, vec![body, card, button]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::{Hit, QueryFilter, Scene};
pub use types::{LocalNode, NodeFlags, NodeId};
