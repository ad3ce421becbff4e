// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover-driven dropdown.
//!
//! Pointer moves are hit tested, turned into enter/leave events with
//! [`HoverState`], and dispatched. The panel stays open while the pointer
//! travels from the trigger into the panel, and closes when it leaves both.
//!
//! Run:
//! - `RUST_LOG=understory_dropdown=debug cargo run -p understory_demos --example dropdown_hover`

use kurbo::{Point, Rect};
use understory_dropdown::adapters::scene::SceneDocument;
use understory_dropdown::{
    AnimationTicket, Animator, Dropdowns, Options, OptionsOverride, Property, Timing, Tween,
};
use understory_events::hover::HoverState;
use understory_scene::{LocalNode, NodeId, QueryFilter, Scene};

/// Completes every animation on the next [`Instant::drain`] call.
#[derive(Default)]
struct Instant(Vec<AnimationTicket>);

impl Animator<NodeId> for Instant {
    fn animate(&mut self, _: NodeId, _: &[Tween], _: Timing, ticket: AnimationTicket) {
        self.0.push(ticket);
    }

    fn set_property(&mut self, element: NodeId, property: Property) {
        tracing::debug!(?element, ?property, "property");
    }
}

impl Instant {
    fn drain(&mut self) -> Vec<AnimationTicket> {
        core::mem::take(&mut self.0)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // The panel sits directly below the trigger so the pointer can cross into it.
    let mut scene = Scene::new();
    let body = scene.insert(None, LocalNode::with_bounds(Rect::new(0.0, 0.0, 400.0, 300.0)));
    let trigger = scene.insert(
        Some(body),
        LocalNode::with_bounds(Rect::new(20.0, 20.0, 140.0, 50.0)),
    );
    let panel = scene.insert(
        Some(body),
        LocalNode::with_bounds(Rect::new(20.0, 50.0, 140.0, 170.0)),
    );
    scene.set_attribute(trigger, "data-target", "help");
    scene.set_attribute(panel, "id", "help");

    let overrides: OptionsOverride =
        serde_json::from_str(r#"{ "hover": true, "coverTrigger": false }"#).expect("valid overrides");
    let options = Options::merged(&overrides)
        .on_open_start(|t: NodeId| println!("  open-start {t:?}"))
        .on_close_start(|t: NodeId| println!("  close-start {t:?}"));

    let mut doc = SceneDocument::new(scene, body);
    let mut anim = Instant::default();
    let mut dropdowns = Dropdowns::new();
    let id = dropdowns
        .init(&mut doc, trigger, options)
        .expect("trigger names its panel");

    let mut hover = HoverState::new();
    let filter = QueryFilter::default();
    for (x, y) in [(60.0, 30.0), (60.0, 100.0), (60.0, 35.0), (300.0, 250.0)] {
        let pt = Point::new(x, y);
        let path = doc
            .scene()
            .hit_test_point(pt, filter)
            .map(|hit| hit.path)
            .unwrap_or_default();
        for event in hover.update_path(&path) {
            let _ = dropdowns.dispatch_event(&mut doc, &mut anim, event);
        }
        for ticket in anim.drain() {
            dropdowns.animation_complete(&mut anim, ticket);
        }
        println!("pointer at {pt:?}: open={}", dropdowns.is_open(id));
    }
    assert!(!dropdowns.is_open(id));
}
