// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_events --heading-base-level=0

//! Understory Events: a deterministic, `no_std` listener table and dispatcher for UI events.
//!
//! ## Overview
//!
//! This crate stores listeners and delivers events to them in capture → target → bubble order.
//! It does not perform hit testing: callers supply the root→target path (for example from a
//! scene hit test, or via [`ParentLookup`](crate::types::ParentLookup) and
//! [`path_to`](crate::dispatch::path_to)).
//!
//! ## Listeners
//!
//! [`ListenerSet`](crate::listeners::ListenerSet) maps a node and an
//! [`EventKind`](crate::types::EventKind) to a handler payload `H`.
//! Adding returns a [`ListenerId`](crate::types::ListenerId), which is the only way to remove
//! the listener again. Capture listeners observe events on their way to the target, before any
//! target or bubble listener can stop propagation.
//!
//! ## Workflow
//!
//! 1) Route: [`ListenerSet::route`](crate::listeners::ListenerSet::route) expands an event and
//!    its path into the ordered listener steps.
//! 2) Dispatch: [`dispatch`](crate::dispatch::dispatch) walks the steps, handing each one a shared
//!    [`EventState`](crate::types::EventState) so handlers can stop propagation or prevent defaults.
//! 3) Hover: feed successive pointer paths to [`HoverState`](crate::hover::HoverState) to obtain
//!    enter/leave events whose related target names where the pointer came from or went to.
//!
//! ```
//! use understory_events::dispatch::dispatch;
//! use understory_events::listeners::ListenerSet;
//! use understory_events::types::{Event, EventKind};
//!
//! let mut listeners = ListenerSet::new();
//! listeners.add(0_u32, EventKind::Click, true, "document");
//! listeners.add(2, EventKind::Click, false, "button");
//!
//! let seq = listeners.route(&Event::click(2), &[0, 1, 2]);
//! let mut order = Vec::new();
//! let state = dispatch(&seq, |step, state| {
//!     order.push(step.handler);
//!     state.prevent_default();
//! });
//! assert_eq!(order, ["document", "button"]);
//! assert!(state.default_prevented());
//! ```
//!
//! Handlers are plain data: the table does not run them. A higher-level layer decides what a
//! handler payload means when its step comes up.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod dispatch;
pub mod hover;
pub mod listeners;
pub mod types;
