// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positioning engine.
//!
//! ## Overview
//!
//! [`place`] is a pure function from measured [`Geometry`] and [`PlacementRules`]
//! to a [`Placement`]:
//!
//! - Width is the trigger's width when constrained, otherwise the panel's natural width.
//! - X is the trigger's left edge, or for [`Alignment::Right`] the trigger's right edge minus the width.
//! - Y is the trigger's top edge when covering it, otherwise its bottom edge.
//! - The candidate box is tested against the clip container with zero tolerance.
//!   Only overflow past the container's bottom edge flips the panel upwards; the
//!   flipped Y is expressed relative to the trigger's offset parent.
//!
//! Without bottom overflow the direction is always [`Direction::Down`], even when
//! there is more room above.

use kurbo::Rect;

use crate::options::Alignment;

/// Which way the panel opens from its anchor.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Direction {
    /// Growing downwards (the default).
    #[default]
    Down,
    /// Growing upwards, after a bottom-edge overflow.
    Up,
}

/// Computed panel placement. Recomputed on every open and never stored.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Opening direction.
    pub direction: Direction,
    /// Panel width.
    pub width: f64,
}

/// The options that influence placement.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct PlacementRules {
    /// See [`Options::alignment`](crate::Options::alignment).
    pub alignment: Alignment,
    /// See [`Options::constrain_width`](crate::Options::constrain_width).
    pub constrain_width: bool,
    /// See [`Options::cover_trigger`](crate::Options::cover_trigger).
    pub cover_trigger: bool,
}

/// Measured boxes feeding [`place`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    /// Trigger bounds in viewport coordinates.
    pub trigger: Rect,
    /// Trigger bounds relative to its offset parent.
    pub trigger_offset: Rect,
    /// Panel bounds in viewport coordinates; only its size is used.
    pub panel: Rect,
    /// Viewport bounds of the nearest overflow-clipping ancestor of the trigger.
    pub container: Rect,
}

bitflags::bitflags! {
    /// Container edges a box crosses.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Edges: u8 {
        /// Above the container's top edge.
        const TOP    = 0b0001;
        /// Past the container's right edge.
        const RIGHT  = 0b0010;
        /// Below the container's bottom edge.
        const BOTTOM = 0b0100;
        /// Past the container's left edge.
        const LEFT   = 0b1000;
    }
}

/// Edges of `container` that `candidate` crosses, with zero margin.
pub fn overflow(candidate: Rect, container: Rect) -> Edges {
    let mut edges = Edges::empty();
    edges.set(Edges::TOP, candidate.y0 < container.y0);
    edges.set(Edges::RIGHT, candidate.x1 > container.x1);
    edges.set(Edges::BOTTOM, candidate.y1 > container.y1);
    edges.set(Edges::LEFT, candidate.x0 < container.x0);
    edges
}

/// Compute where the panel goes.
pub fn place(geometry: &Geometry, rules: PlacementRules) -> Placement {
    let trigger = geometry.trigger;
    let panel_height = geometry.panel.height();
    let width = if rules.constrain_width {
        trigger.width()
    } else {
        geometry.panel.width()
    };
    let x = match rules.alignment {
        Alignment::Left => trigger.x0,
        Alignment::Right => trigger.x1 - width,
    };
    let y = if rules.cover_trigger {
        trigger.y0
    } else {
        trigger.y1
    };

    let candidate = Rect::new(x, y, x + width, y + panel_height);
    let edges = overflow(candidate, geometry.container);
    if edges.contains(Edges::BOTTOM) {
        let offset = geometry.trigger_offset;
        let cover = if rules.cover_trigger {
            offset.height()
        } else {
            0.0
        };
        return Placement {
            x,
            y: offset.y0 - panel_height + cover,
            direction: Direction::Up,
            width,
        };
    }

    Placement {
        x,
        y,
        direction: Direction::Down,
        width,
    }
}
