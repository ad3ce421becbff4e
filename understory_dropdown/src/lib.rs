// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dropdown --heading-base-level=0

//! Understory Dropdown: positioned, animated dropdown panels attached to trigger elements.
//!
//! ## Overview
//!
//! A dropdown pairs a trigger with a panel. Opening places the panel next to the trigger,
//! fades it in, and starts watching document clicks; closing fades it out and hides it.
//!
//! - [`Dropdowns`] is the registry and state controller: it binds at most one
//!   [`Instance`] per trigger and runs the open/close transitions.
//! - [`position`] computes the panel [`Placement`](position::Placement) from trigger, panel
//!   and clip-container geometry, flipping upwards only on bottom-edge overflow.
//! - [`router`] wires listeners (click or hover, chosen once per instance) and interprets
//!   events, including the capture-phase outside-click detector.
//! - [`Document`] and [`Animator`] are the host seams. Animation completion comes back as a
//!   message: the host passes each [`AnimationTicket`] to [`Dropdowns::animation_complete`].
//!
//! ## Ordering
//!
//! Start callbacks run before the animation request; end callbacks run only from
//! [`Dropdowns::animation_complete`], never synchronously. Redundant opens and closes are
//! silent no-ops. Opposite transitions are not queued: an exit may be requested while the
//! enter is still in flight, and each completion runs its own continuation.
//!
//! ## Example
//!
//! ```
//! use kurbo::Rect;
//! use understory_dropdown::adapters::scene::SceneDocument;
//! use understory_dropdown::{
//!     AnimationTicket, Animator, Dropdowns, Options, Property, Timing, Tween,
//! };
//! use understory_events::types::Event;
//! use understory_scene::{LocalNode, Scene};
//!
//! #[derive(Default)]
//! struct Queue(Vec<AnimationTicket>);
//! impl<E> Animator<E> for Queue {
//!     fn animate(&mut self, _: E, _: &[Tween], _: Timing, ticket: AnimationTicket) {
//!         self.0.push(ticket);
//!     }
//!     fn set_property(&mut self, _: E, _: Property) {}
//! }
//!
//! let mut scene = Scene::new();
//! let body = scene.insert(None, LocalNode::with_bounds(Rect::new(0.0, 0.0, 800.0, 600.0)));
//! let button = scene.insert(Some(body), LocalNode::with_bounds(Rect::new(10.0, 10.0, 110.0, 40.0)));
//! let menu = scene.insert(Some(body), LocalNode::with_bounds(Rect::new(0.0, 0.0, 160.0, 200.0)));
//! scene.set_attribute(button, "data-target", "menu");
//! scene.set_attribute(menu, "id", "menu");
//!
//! let mut doc = SceneDocument::new(scene, body);
//! let mut anim = Queue::default();
//! let mut dropdowns = Dropdowns::new();
//! let id = dropdowns.init(&mut doc, button, Options::default()).unwrap();
//!
//! let state = dropdowns.dispatch_event(&mut doc, &mut anim, Event::click(button));
//! assert!(state.default_prevented());
//! assert!(dropdowns.is_open(id));
//!
//! for ticket in std::mem::take(&mut anim.0) {
//!     dropdowns.animation_complete(&mut anim, ticket);
//! }
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod controller;
pub mod error;
pub mod host;
pub mod method;
pub mod options;
pub mod position;
pub mod router;

#[cfg(all(test, feature = "scene_adapter"))]
mod testing;

pub use controller::{Binding, Dropdowns, Instance, InstanceId, Role};
pub use error::DropdownError;
pub use host::{
    AnimatedProperty, AnimationTicket, Animator, Document, Easing, Property, Timing,
    TransformOrigin, Tween,
};
pub use method::{Invocation, Method};
pub use options::{Alignment, Callback, Options, OptionsOverride};
