// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click-driven dropdown on a scene.
//!
//! Options come from a JSON override, clicks are resolved by hit testing, and a
//! small animator applies property writes to the scene and finishes animations
//! on a simulated clock.
//!
//! Run:
//! - `RUST_LOG=understory_dropdown=trace cargo run -p understory_demos --example dropdown_click`

use kurbo::{Affine, Point, Rect};
use understory_dropdown::adapters::scene::SceneDocument;
use understory_dropdown::{
    AnimationTicket, Animator, Dropdowns, Options, OptionsOverride, Property, Timing, Tween,
};
use understory_events::types::Event;
use understory_scene::{LocalNode, NodeFlags, NodeId, QueryFilter};

/// Queues property writes for the scene and tracks running animations.
#[derive(Default)]
struct Stage {
    writes: Vec<(NodeId, Property)>,
    running: Vec<(AnimationTicket, u32)>,
}

impl Animator<NodeId> for Stage {
    fn animate(&mut self, element: NodeId, tweens: &[Tween], timing: Timing, ticket: AnimationTicket) {
        tracing::info!(?element, tweens = tweens.len(), ?timing, "animating");
        self.running.push((ticket, timing.duration_ms));
    }

    fn set_property(&mut self, element: NodeId, property: Property) {
        self.writes.push((element, property));
    }
}

impl Stage {
    /// Apply queued writes. Positions are relative to the root, which is the offset parent here.
    fn flush(&mut self, doc: &mut SceneDocument) {
        let scene = doc.scene_mut();
        for (node, property) in self.writes.drain(..) {
            let Some(local) = scene.local(node).cloned() else {
                continue;
            };
            let b = local.local_bounds;
            let moved = match property {
                Property::Visible(true) => {
                    scene.set_flags(node, local.flags | NodeFlags::VISIBLE);
                    continue;
                }
                Property::Visible(false) => {
                    scene.set_flags(node, local.flags - NodeFlags::VISIBLE);
                    continue;
                }
                Property::TransformOrigin(_) => continue,
                Property::Left(x) => Rect::new(x, b.y0, x + b.width(), b.y1),
                Property::Top(y) => Rect::new(b.x0, y, b.x1, y + b.height()),
                Property::Width(w) => Rect::new(b.x0, b.y0, b.x0 + w, b.y1),
            };
            scene.set_local_bounds(node, moved);
            // Rows are laid out relative to the panel's origin.
            scene.set_content_transform(node, Affine::translate(moved.origin().to_vec2()));
        }
    }

    /// Advance the clock and report finished animations.
    fn tick(&mut self, elapsed_ms: u32) -> Vec<AnimationTicket> {
        let mut done = Vec::new();
        self.running.retain_mut(|(ticket, left)| {
            *left = left.saturating_sub(elapsed_ms);
            if *left == 0 {
                done.push(*ticket);
            }
            *left > 0
        });
        done
    }
}

fn click_at(
    dropdowns: &mut Dropdowns<NodeId>,
    doc: &mut SceneDocument,
    stage: &mut Stage,
    pt: Point,
) {
    let filter = QueryFilter {
        visible_only: true,
        pickable_only: true,
    };
    let Some(hit) = doc.scene().hit_test_point(pt, filter) else {
        return;
    };
    let state = dropdowns.dispatch_event(doc, stage, Event::click(hit.node));
    println!(
        "click {:?} on {:?}: default_prevented={} propagation_stopped={}",
        pt,
        hit.node,
        state.default_prevented(),
        state.propagation_stopped()
    );
    stage.flush(doc);
}

fn settle(dropdowns: &mut Dropdowns<NodeId>, doc: &mut SceneDocument, stage: &mut Stage) {
    for ticket in stage.tick(1_000) {
        dropdowns.animation_complete(stage, ticket);
    }
    stage.flush(doc);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut scene = understory_scene::Scene::new();
    let body = scene.insert(None, LocalNode::with_bounds(Rect::new(0.0, 0.0, 640.0, 480.0)));
    let button = scene.insert(
        Some(body),
        LocalNode::with_bounds(Rect::new(40.0, 40.0, 200.0, 72.0)),
    );
    let menu = scene.insert(
        Some(body),
        LocalNode::with_bounds(Rect::new(0.0, 0.0, 240.0, 120.0)),
    );
    scene.set_flags(menu, NodeFlags::PICKABLE);
    for row in 0..3 {
        let y = f64::from(row) * 40.0;
        scene.insert(
            Some(menu),
            LocalNode::with_bounds(Rect::new(0.0, y, 240.0, y + 40.0)),
        );
    }
    scene.set_attribute(button, "data-target", "file-menu");
    scene.set_attribute(menu, "id", "file-menu");

    let overrides: OptionsOverride = serde_json::from_str(
        r#"{ "closeOnClick": false, "constrainWidth": false, "inDuration": 120 }"#,
    )
    .expect("valid overrides");
    let options = Options::merged(&overrides)
        .on_open_end(|trigger: NodeId| println!("  opened from {trigger:?}"))
        .on_close_end(|trigger: NodeId| println!("  closed from {trigger:?}"));

    let mut doc = SceneDocument::new(scene, body);
    let mut stage = Stage::default();
    let mut dropdowns = Dropdowns::new();
    let id = dropdowns
        .init(&mut doc, button, options)
        .expect("button names its menu");

    // Open with the button, click a row (stays open), then click the page.
    click_at(&mut dropdowns, &mut doc, &mut stage, Point::new(60.0, 50.0));
    settle(&mut dropdowns, &mut doc, &mut stage);
    assert!(dropdowns.is_open(id));
    println!("menu at {:?}", doc.scene().world_bounds(menu));

    click_at(&mut dropdowns, &mut doc, &mut stage, Point::new(100.0, 100.0));
    settle(&mut dropdowns, &mut doc, &mut stage);
    assert!(dropdowns.is_open(id));

    click_at(&mut dropdowns, &mut doc, &mut stage, Point::new(600.0, 400.0));
    settle(&mut dropdowns, &mut doc, &mut stage);
    assert!(!dropdowns.is_open(id));

    // Calling methods by name.
    dropdowns
        .invoke(
            &mut doc,
            &mut stage,
            &[button],
            understory_dropdown::Invocation::Call("open"),
        )
        .expect("bound trigger");
    settle(&mut dropdowns, &mut doc, &mut stage);
    assert!(dropdowns.is_open(id));

    dropdowns.destroy_all(&mut doc);
    println!("listeners left: {}", doc.listeners().len());
}
