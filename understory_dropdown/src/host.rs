// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seams to the host: the document and the animation engine.
//!
//! ## Document
//!
//! [`Document`] is the element query layer: geometry, identifier lookup,
//! containment, structural moves, and a listener table with capture support.
//! The [`scene`](crate::adapters::scene) adapter implements it over an Understory Scene.
//!
//! ## Animation
//!
//! [`Animator`] is fire-and-forget. Every [`Animator::animate`] call carries an
//! [`AnimationTicket`]; when the transition finishes the host hands the ticket
//! back exactly once through [`Dropdowns::animation_complete`](crate::Dropdowns::animation_complete).
//! Requests are never queued by the dropdown: an exit may be requested while an
//! enter is still running, and the host decides how overlapping tweens combine.

use alloc::vec::Vec;
use kurbo::Rect;
use understory_events::types::{Dispatch, Event, EventKind, ListenerId};

use crate::controller::Binding;

/// The element query layer a dropdown runs against.
pub trait Document {
    /// Element handle.
    type Element: Copy + Eq + core::fmt::Debug;

    /// The document node; outside-click listeners are registered here.
    fn root(&self) -> Self::Element;

    /// The panel named by the trigger's identifier, if it exists.
    fn panel_for(&self, trigger: Self::Element) -> Option<Self::Element>;

    /// Bounds in viewport coordinates.
    fn bounding_rect(&self, element: Self::Element) -> Rect;

    /// Bounds relative to the element's offset parent.
    fn offset_rect(&self, element: Self::Element) -> Rect;

    /// Viewport bounds of the nearest ancestor clipping overflow, defaulting to the body.
    fn clip_rect(&self, element: Self::Element) -> Rect;

    /// Whether `element` is `ancestor` or inside it.
    fn contains(&self, ancestor: Self::Element, element: Self::Element) -> bool;

    /// Move `element` to immediately follow `reference`.
    fn insert_after(&mut self, element: Self::Element, reference: Self::Element);

    /// Register a listener.
    fn add_listener(
        &mut self,
        target: Self::Element,
        kind: EventKind,
        capture: bool,
        binding: Binding,
    ) -> ListenerId;

    /// Remove a listener registered with [`Document::add_listener`].
    fn remove_listener(&mut self, id: ListenerId);

    /// Whether a listener is still registered.
    fn is_listening(&self, id: ListenerId) -> bool;

    /// The listener steps `event` reaches, in capture → target → bubble order.
    fn route(&self, event: &Event<Self::Element>) -> Vec<Dispatch<Self::Element, Binding>>;
}

/// Token identifying one animation request.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct AnimationTicket(pub(crate) u64);

/// Easing curves requested by the dropdown.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Easing {
    /// Used for the enter transition.
    EaseOutQuad,
    /// Used for the exit transition.
    EaseOutQuint,
}

/// Duration and easing of one request.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Timing {
    /// Duration in milliseconds.
    pub duration_ms: u32,
    /// Easing curve.
    pub easing: Easing,
}

/// Tweened properties.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AnimatedProperty {
    /// Opacity in `0..=1`.
    Opacity,
    /// Horizontal scale factor.
    ScaleX,
    /// Vertical scale factor.
    ScaleY,
}

/// One property target of an animation request.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tween {
    /// Property to tween.
    pub property: AnimatedProperty,
    /// Start value; `None` starts from the current value.
    pub from: Option<f64>,
    /// End value.
    pub to: f64,
}

impl Tween {
    const fn new(property: AnimatedProperty, from: Option<f64>, to: f64) -> Self {
        Self { property, from, to }
    }
}

/// Fade and grow in from a third of the size.
pub const ENTER_TWEENS: [Tween; 3] = [
    Tween::new(AnimatedProperty::Opacity, Some(0.0), 1.0),
    Tween::new(AnimatedProperty::ScaleX, Some(0.3), 1.0),
    Tween::new(AnimatedProperty::ScaleY, Some(0.3), 1.0),
];

/// Fade and shrink out from wherever the panel currently is.
pub const EXIT_TWEENS: [Tween; 3] = [
    Tween::new(AnimatedProperty::Opacity, None, 0.0),
    Tween::new(AnimatedProperty::ScaleX, None, 0.3),
    Tween::new(AnimatedProperty::ScaleY, None, 0.3),
];

/// Anchor for scale tweens.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TransformOrigin {
    /// Panels opening downwards grow from their top-left corner.
    TopLeft,
    /// Panels opening upwards grow from their bottom-left corner.
    BottomLeft,
}

/// Immediate, non-animated style writes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Property {
    /// Shown and interactive, or hidden and non-interactive.
    Visible(bool),
    /// Left edge.
    Left(f64),
    /// Top edge.
    Top(f64),
    /// Width.
    Width(f64),
    /// Scale anchor.
    TransformOrigin(TransformOrigin),
}

/// The animation engine.
pub trait Animator<E> {
    /// Start tweening `element`; report completion by handing `ticket` back.
    fn animate(&mut self, element: E, tweens: &[Tween], timing: Timing, ticket: AnimationTicket);

    /// Write a property immediately.
    fn set_property(&mut self, element: E, property: Property);
}
