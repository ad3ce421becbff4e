// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time options.
//!
//! [`Options`] are fixed once a dropdown is constructed. Callers start from
//! [`Options::default`], layer an [`OptionsOverride`] on top with
//! [`Options::merged`], and attach lifecycle callbacks with the builder methods.

use alloc::rc::Rc;

use crate::position::PlacementRules;

/// Horizontal edge of the trigger the panel lines up with.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Alignment {
    /// Panel's left edge on the trigger's left edge.
    #[default]
    Left,
    /// Panel's right edge on the trigger's right edge.
    Right,
}

/// A lifecycle callback receiving the trigger element.
pub struct Callback<E>(Rc<dyn Fn(E)>);

impl<E> Callback<E> {
    /// Wrap a closure.
    pub fn new(f: impl Fn(E) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the callback.
    pub fn call(&self, trigger: E) {
        (self.0)(trigger);
    }
}

impl<E> Clone for Callback<E> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<E> core::fmt::Debug for Callback<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// Options of a dropdown instance.
#[derive(Clone, Debug)]
pub struct Options<E> {
    /// Which trigger edge the panel aligns with.
    pub alignment: Alignment,
    /// Give the panel the trigger's width instead of its natural width.
    pub constrain_width: bool,
    /// Place the panel over the trigger instead of below it.
    pub cover_trigger: bool,
    /// Close on any document click, including clicks inside the panel.
    pub close_on_click: bool,
    /// Open on pointer enter and close on pointer leave instead of clicks.
    pub hover: bool,
    /// Enter animation duration in milliseconds.
    pub in_duration: u32,
    /// Exit animation duration in milliseconds.
    pub out_duration: u32,
    /// Runs when opening starts, before the enter animation is requested.
    pub on_open_start: Option<Callback<E>>,
    /// Runs when the enter animation completes.
    pub on_open_end: Option<Callback<E>>,
    /// Runs when closing starts, before the exit animation is requested.
    pub on_close_start: Option<Callback<E>>,
    /// Runs when the exit animation completes.
    pub on_close_end: Option<Callback<E>>,
}

impl<E> Default for Options<E> {
    fn default() -> Self {
        Self {
            alignment: Alignment::Left,
            constrain_width: true,
            cover_trigger: true,
            close_on_click: true,
            hover: false,
            in_duration: 150,
            out_duration: 250,
            on_open_start: None,
            on_open_end: None,
            on_close_start: None,
            on_close_end: None,
        }
    }
}

impl<E> Options<E> {
    /// Defaults with `overrides` applied.
    pub fn merged(overrides: &OptionsOverride) -> Self {
        Self::default().apply(overrides)
    }

    /// Replace every field that `overrides` sets.
    pub fn apply(mut self, overrides: &OptionsOverride) -> Self {
        let o = overrides;
        self.alignment = o.alignment.unwrap_or(self.alignment);
        self.constrain_width = o.constrain_width.unwrap_or(self.constrain_width);
        self.cover_trigger = o.cover_trigger.unwrap_or(self.cover_trigger);
        self.close_on_click = o.close_on_click.unwrap_or(self.close_on_click);
        self.hover = o.hover.unwrap_or(self.hover);
        self.in_duration = o.in_duration.unwrap_or(self.in_duration);
        self.out_duration = o.out_duration.unwrap_or(self.out_duration);
        self
    }

    /// Set the open-start callback.
    pub fn on_open_start(mut self, f: impl Fn(E) + 'static) -> Self {
        self.on_open_start = Some(Callback::new(f));
        self
    }

    /// Set the open-end callback.
    pub fn on_open_end(mut self, f: impl Fn(E) + 'static) -> Self {
        self.on_open_end = Some(Callback::new(f));
        self
    }

    /// Set the close-start callback.
    pub fn on_close_start(mut self, f: impl Fn(E) + 'static) -> Self {
        self.on_close_start = Some(Callback::new(f));
        self
    }

    /// Set the close-end callback.
    pub fn on_close_end(mut self, f: impl Fn(E) + 'static) -> Self {
        self.on_close_end = Some(Callback::new(f));
        self
    }

    /// The subset of options the positioning engine reads.
    pub fn placement_rules(&self) -> PlacementRules {
        PlacementRules {
            alignment: self.alignment,
            constrain_width: self.constrain_width,
            cover_trigger: self.cover_trigger,
        }
    }
}

/// Caller-supplied option overrides; unset fields keep their defaults.
///
/// With the `serde` feature this deserializes from camelCase keys
/// (`constrainWidth`, `coverTrigger`, `closeOnClick`, `inDuration`, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "camelCase", deny_unknown_fields, default)
)]
pub struct OptionsOverride {
    /// See [`Options::alignment`].
    pub alignment: Option<Alignment>,
    /// See [`Options::constrain_width`].
    pub constrain_width: Option<bool>,
    /// See [`Options::cover_trigger`].
    pub cover_trigger: Option<bool>,
    /// See [`Options::close_on_click`].
    pub close_on_click: Option<bool>,
    /// See [`Options::hover`].
    pub hover: Option<bool>,
    /// See [`Options::in_duration`].
    pub in_duration: Option<u32>,
    /// See [`Options::out_duration`].
    pub out_duration: Option<u32>,
}
