// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for unit tests.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::Rect;
use understory_scene::{LocalNode, NodeId, Scene};

use crate::adapters::scene::SceneDocument;
use crate::host::{AnimationTicket, Animator, Property, Timing, Tween};
use crate::options::Options;

pub(crate) type Log = Rc<RefCell<Vec<String>>>;

/// Animator that queues tickets and logs every request into a shared log.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pub(crate) log: Log,
    pub(crate) pending: Vec<AnimationTicket>,
    pub(crate) properties: Vec<(NodeId, Property)>,
}

impl Recorder {
    pub(crate) fn with_log(log: &Log) -> Self {
        Self {
            log: Rc::clone(log),
            ..Default::default()
        }
    }

    /// The last value written for the matching property of `element`.
    pub(crate) fn last(&self, element: NodeId, pick: fn(&Property) -> bool) -> Option<Property> {
        self.properties
            .iter()
            .rev()
            .find(|(e, p)| *e == element && pick(p))
            .map(|(_, p)| *p)
    }
}

impl Animator<NodeId> for Recorder {
    fn animate(&mut self, _element: NodeId, _tweens: &[Tween], timing: Timing, ticket: AnimationTicket) {
        self.log
            .borrow_mut()
            .push(format!("animate {:?} {}ms", timing.easing, timing.duration_ms));
        self.pending.push(ticket);
    }

    fn set_property(&mut self, element: NodeId, property: Property) {
        self.properties.push((element, property));
    }
}

/// A page with a trigger, its panel (declared elsewhere in the document), an
/// item inside the panel and an unrelated element.
pub(crate) struct Page {
    pub(crate) doc: SceneDocument,
    pub(crate) body: NodeId,
    pub(crate) trigger: NodeId,
    pub(crate) panel: NodeId,
    pub(crate) item: NodeId,
    pub(crate) elsewhere: NodeId,
}

impl Page {
    pub(crate) fn new() -> Self {
        let mut scene = Scene::new();
        let body = scene.insert(
            None,
            LocalNode::with_bounds(Rect::new(0.0, 0.0, 800.0, 600.0)),
        );
        let trigger = scene.insert(
            Some(body),
            LocalNode::with_bounds(Rect::new(100.0, 50.0, 300.0, 80.0)),
        );
        let elsewhere = scene.insert(
            Some(body),
            LocalNode::with_bounds(Rect::new(500.0, 400.0, 600.0, 450.0)),
        );
        let panel = scene.insert(
            Some(body),
            LocalNode::with_bounds(Rect::new(0.0, 0.0, 260.0, 150.0)),
        );
        let item = scene.insert(
            Some(panel),
            LocalNode::with_bounds(Rect::new(0.0, 0.0, 260.0, 30.0)),
        );
        scene.set_attribute(trigger, "data-target", "menu");
        scene.set_attribute(panel, "id", "menu");
        Self {
            doc: SceneDocument::new(scene, body),
            body,
            trigger,
            panel,
            item,
            elsewhere,
        }
    }
}

/// Options whose four callbacks append their name to `log`.
pub(crate) fn logging_options(log: &Log) -> Options<NodeId> {
    let entry = |name: &'static str| {
        let log = Rc::clone(log);
        move |_: NodeId| log.borrow_mut().push(String::from(name))
    };
    Options::default()
        .on_open_start(entry("open-start"))
        .on_open_end(entry("open-end"))
        .on_close_start(entry("close-start"))
        .on_close_end(entry("close-end"))
}
