// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event router: listener wiring and event handling.
//!
//! ## Wiring
//!
//! The wiring mode is chosen once, from [`Options::hover`](crate::Options::hover):
//!
//! - Click: a click on the trigger prevents the default action and opens.
//! - Hover: entering the trigger opens; leaving the trigger or the panel closes,
//!   unless the pointer is heading into the trigger or the panel.
//!
//! ## Outside clicks
//!
//! While open, every instance listens for document clicks in the capture
//! phase, before any handler on the path can stop propagation:
//!
//! - With `close_on_click`, any click closes.
//! - A click on the trigger stops propagation and closes, so the trigger's own
//!   click listener never reopens it.
//! - A click outside the panel closes.
//! - A click inside the panel keeps it open.

use tracing::trace;
use understory_events::dispatch::dispatch;
use understory_events::types::{Dispatch, Event, EventKind, EventState, ListenerId};

use crate::controller::{Binding, Dropdowns, InstanceId, Role};
use crate::host::{Animator, Document};

/// Listeners owned by one instance.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Wiring {
    Click {
        click: ListenerId,
    },
    Hover {
        enter: ListenerId,
        trigger_leave: ListenerId,
        panel_leave: ListenerId,
    },
}

impl Wiring {
    pub(crate) fn attach<D: Document>(
        doc: &mut D,
        instance: InstanceId,
        trigger: D::Element,
        panel: D::Element,
        hover: bool,
    ) -> Self {
        let bind = |role| Binding { instance, role };
        if hover {
            Self::Hover {
                enter: doc.add_listener(
                    trigger,
                    EventKind::PointerEnter,
                    false,
                    bind(Role::TriggerEnter),
                ),
                trigger_leave: doc.add_listener(
                    trigger,
                    EventKind::PointerLeave,
                    false,
                    bind(Role::TriggerLeave),
                ),
                panel_leave: doc.add_listener(
                    panel,
                    EventKind::PointerLeave,
                    false,
                    bind(Role::PanelLeave),
                ),
            }
        } else {
            Self::Click {
                click: doc.add_listener(trigger, EventKind::Click, false, bind(Role::TriggerClick)),
            }
        }
    }

    pub(crate) fn detach<D: Document>(self, doc: &mut D) {
        match self {
            Self::Click { click } => doc.remove_listener(click),
            Self::Hover {
                enter,
                trigger_leave,
                panel_leave,
            } => {
                doc.remove_listener(enter);
                doc.remove_listener(trigger_leave);
                doc.remove_listener(panel_leave);
            }
        }
    }
}

impl<E: Copy + Eq + core::fmt::Debug> Dropdowns<E> {
    /// Handle one routed listener step of `event`.
    ///
    /// Hosts that dispatch events themselves call this from each listener
    /// registered through [`Document::add_listener`]. Steps bound to destroyed
    /// instances are ignored.
    pub fn handle_event<D, A>(
        &mut self,
        doc: &mut D,
        anim: &mut A,
        step: &Dispatch<E, Binding>,
        event: &Event<E>,
        state: &mut EventState,
    ) where
        D: Document<Element = E>,
        A: Animator<E>,
    {
        let Binding { instance, role } = step.handler;
        let Some(inst) = self.instance(instance) else {
            trace!(?instance, ?role, "event for destroyed dropdown");
            return;
        };
        let (trigger, panel) = (inst.trigger(), inst.panel());
        let close_on_click = inst.options().close_on_click;

        match role {
            Role::TriggerClick => {
                state.prevent_default();
                self.open(doc, anim, instance);
            }
            Role::TriggerEnter => self.open(doc, anim, instance),
            Role::TriggerLeave | Role::PanelLeave => {
                let staying = event
                    .related_target
                    .is_some_and(|to| doc.contains(panel, to) || doc.contains(trigger, to));
                if !staying {
                    self.close(doc, anim, instance);
                }
            }
            Role::OutsideClick => {
                let target = event.target;
                if close_on_click {
                    self.close(doc, anim, instance);
                } else if doc.contains(trigger, target) {
                    state.stop_propagation();
                    self.close(doc, anim, instance);
                } else if !doc.contains(panel, target) {
                    self.close(doc, anim, instance);
                }
            }
        }
    }

    /// Route `event` through the document and handle every step that belongs to a dropdown.
    ///
    /// Listeners removed while the event is in flight do not run.
    pub fn dispatch_event<D, A>(&mut self, doc: &mut D, anim: &mut A, event: Event<E>) -> EventState
    where
        D: Document<Element = E>,
        A: Animator<E>,
    {
        let seq = doc.route(&event);
        dispatch(&seq, |step, state| {
            if doc.is_listening(step.listener) {
                self.handle_event(doc, anim, step, &event, state);
            }
        })
    }
}

#[cfg(all(test, feature = "scene_adapter"))]
mod tests {
    use super::*;
    use crate::Options;
    use crate::testing::{Log, Page, Recorder, logging_options};
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use understory_events::hover::HoverState;
    use crate::adapters::scene::SceneDocument;
    use kurbo::Rect;
    use understory_scene::{LocalNode, NodeId};

    fn open_page(options: Options<NodeId>) -> (Page, Recorder, Dropdowns<NodeId>, InstanceId) {
        let mut page = Page::new();
        let mut anim = Recorder::default();
        let mut dropdowns = Dropdowns::new();
        let id = dropdowns.init(&mut page.doc, page.trigger, options).unwrap();
        dropdowns.open(&mut page.doc, &mut anim, id);
        (page, anim, dropdowns, id)
    }

    fn keep_open() -> Options<NodeId> {
        Options {
            close_on_click: false,
            ..Options::default()
        }
    }

    #[test]
    fn trigger_click_opens_and_prevents_default() {
        let mut page = Page::new();
        let mut anim = Recorder::default();
        let mut dropdowns = Dropdowns::new();
        let id = dropdowns
            .init(&mut page.doc, page.trigger, Options::default())
            .unwrap();

        let state = dropdowns.dispatch_event(&mut page.doc, &mut anim, Event::click(page.trigger));
        assert!(state.default_prevented());
        assert!(!state.propagation_stopped());
        assert!(dropdowns.is_open(id));

        // Clicks elsewhere are not the trigger's business while closed.
        let mut page = Page::new();
        let mut dropdowns = Dropdowns::new();
        let id = dropdowns
            .init(&mut page.doc, page.trigger, Options::default())
            .unwrap();
        let state =
            dropdowns.dispatch_event(&mut page.doc, &mut anim, Event::click(page.elsewhere));
        assert!(!state.default_prevented());
        assert!(!dropdowns.is_open(id));
    }

    #[test]
    fn click_inside_panel_closes_by_default() {
        let (mut page, mut anim, mut dropdowns, id) = open_page(Options::default());
        let _ = dropdowns.dispatch_event(&mut page.doc, &mut anim, Event::click(page.item));
        assert!(!dropdowns.is_open(id));
        assert_eq!(page.doc.listeners().len(), 1);
    }

    #[test]
    fn click_inside_panel_stays_open_without_close_on_click() {
        let (mut page, mut anim, mut dropdowns, id) = open_page(keep_open());
        let state = dropdowns.dispatch_event(&mut page.doc, &mut anim, Event::click(page.item));
        assert!(dropdowns.is_open(id));
        assert!(!state.propagation_stopped());
        assert_eq!(anim.pending.len(), 1);
    }

    #[test]
    fn click_outside_closes() {
        let (mut page, mut anim, mut dropdowns, id) = open_page(keep_open());
        let _ = dropdowns.dispatch_event(&mut page.doc, &mut anim, Event::click(page.elsewhere));
        assert!(!dropdowns.is_open(id));

        // The document root itself counts as outside.
        dropdowns.open(&mut page.doc, &mut anim, id);
        let _ = dropdowns.dispatch_event(&mut page.doc, &mut anim, Event::click(page.body));
        assert!(!dropdowns.is_open(id));
    }

    #[test]
    fn click_on_trigger_closes_and_stops_propagation() {
        let log = Log::default();
        let options = Options {
            close_on_click: false,
            ..logging_options(&log)
        };
        let (mut page, mut anim, mut dropdowns, id) = open_page(options);

        let state = dropdowns.dispatch_event(&mut page.doc, &mut anim, Event::click(page.trigger));
        assert!(state.propagation_stopped());
        // The trigger's own listener never saw the click.
        assert!(!state.default_prevented());
        assert!(!dropdowns.is_open(id));
        assert_eq!(
            log.borrow().clone(),
            vec![String::from("open-start"), String::from("close-start")]
        );
    }

    #[test]
    fn click_on_trigger_with_close_on_click_reopens() {
        let log = Log::default();
        let (mut page, mut anim, mut dropdowns, id) = open_page(logging_options(&log));

        let state = dropdowns.dispatch_event(&mut page.doc, &mut anim, Event::click(page.trigger));
        assert!(state.default_prevented());
        assert!(dropdowns.is_open(id));
        assert_eq!(
            log.borrow().clone(),
            vec![
                String::from("open-start"),
                String::from("close-start"),
                String::from("open-start"),
            ]
        );
        // The outside-click listener added by the reopen did not see this click.
        assert_eq!(page.doc.listeners().len(), 2);
    }

    #[test]
    fn stop_propagation_still_reaches_same_phase_listeners() {
        let mut page = Page::new();
        let mut anim = Recorder::default();
        let mut dropdowns = Dropdowns::new();
        let first = dropdowns
            .init(&mut page.doc, page.trigger, keep_open())
            .unwrap();
        let scene = page.doc.scene_mut();
        let other = scene.insert(
            Some(page.body),
            LocalNode::with_bounds(Rect::new(0.0, 0.0, 100.0, 100.0)),
        );
        scene.set_attribute(other, "id", "other");
        scene.set_attribute(page.elsewhere, "data-target", "other");
        let second = dropdowns
            .init(&mut page.doc, page.elsewhere, keep_open())
            .unwrap();
        dropdowns.open(&mut page.doc, &mut anim, first);
        dropdowns.open(&mut page.doc, &mut anim, second);

        // The first dropdown's detector stops propagation, but both detectors sit
        // on the root in the capture phase, so the second still closes.
        let state = dropdowns.dispatch_event(&mut page.doc, &mut anim, Event::click(page.trigger));
        assert!(state.propagation_stopped());
        assert!(!dropdowns.is_open(first));
        assert!(!dropdowns.is_open(second));
    }

    #[test]
    fn hover_opens_and_follows_pointer_into_panel() {
        let mut page = Page::new();
        let mut anim = Recorder::default();
        let mut dropdowns = Dropdowns::new();
        let options = Options {
            hover: true,
            ..Options::default()
        };
        let id = dropdowns.init(&mut page.doc, page.trigger, options).unwrap();
        assert!(dropdowns.instance(id).unwrap().is_hover());
        assert_eq!(page.doc.listeners().len(), 3);

        // Clicks do nothing for hover dropdowns.
        let state = dropdowns.dispatch_event(&mut page.doc, &mut anim, Event::click(page.trigger));
        assert!(!state.default_prevented());
        assert!(!dropdowns.is_open(id));

        let mut hover = HoverState::new();
        let mut move_to = |dropdowns: &mut Dropdowns<NodeId>,
                           doc: &mut SceneDocument,
                           anim: &mut Recorder,
                           node: NodeId| {
            let path = doc.scene().path_to_root(node);
            let events: Vec<_> = hover.update_path(&path);
            for event in events {
                let _ = dropdowns.dispatch_event(doc, anim, event);
            }
        };

        move_to(&mut dropdowns, &mut page.doc, &mut anim, page.trigger);
        assert!(dropdowns.is_open(id));

        // Trigger to panel item: the leave points into the panel.
        move_to(&mut dropdowns, &mut page.doc, &mut anim, page.item);
        assert!(dropdowns.is_open(id));

        // Back onto the trigger, then out to an unrelated element.
        move_to(&mut dropdowns, &mut page.doc, &mut anim, page.trigger);
        assert!(dropdowns.is_open(id));
        move_to(&mut dropdowns, &mut page.doc, &mut anim, page.elsewhere);
        assert!(!dropdowns.is_open(id));
        assert_eq!(anim.pending.len(), 2);
    }

    #[test]
    fn leaving_panel_without_destination_closes() {
        let options = Options {
            hover: true,
            ..Options::default()
        };
        let (mut page, mut anim, mut dropdowns, id) = open_page(options);
        let _ = dropdowns.dispatch_event(
            &mut page.doc,
            &mut anim,
            Event::pointer_leave(page.panel, None),
        );
        assert!(!dropdowns.is_open(id));
    }

    #[test]
    fn leaving_panel_back_onto_trigger_stays_open() {
        let options = Options {
            hover: true,
            ..Options::default()
        };
        let (mut page, mut anim, mut dropdowns, id) = open_page(options);
        let _ = dropdowns.dispatch_event(
            &mut page.doc,
            &mut anim,
            Event::pointer_leave(page.panel, Some(page.trigger)),
        );
        assert!(dropdowns.is_open(id));
        assert_eq!(anim.pending.len(), 1);
    }

    #[test]
    fn hover_teardown_removes_every_listener() {
        let hover = || Options {
            hover: true,
            ..Options::default()
        };
        let (mut page, mut anim, mut dropdowns, first) = open_page(hover());
        // Enter and two leaves, plus the outside-click detector.
        assert_eq!(page.doc.listeners().len(), 4);

        let second = dropdowns.init(&mut page.doc, page.trigger, hover()).unwrap();
        assert_eq!(page.doc.listeners().len(), 3);
        assert!(dropdowns.instance(first).is_none());

        // Events only reach the replacement.
        let _ = dropdowns.dispatch_event(
            &mut page.doc,
            &mut anim,
            Event::pointer_enter(page.trigger, None),
        );
        assert!(dropdowns.is_open(second));
        assert_eq!(page.doc.listeners().len(), 4);

        dropdowns.destroy(&mut page.doc, second);
        assert!(page.doc.listeners().is_empty());
        let before = anim.pending.len();
        let _ = dropdowns.dispatch_event(
            &mut page.doc,
            &mut anim,
            Event::pointer_leave(page.trigger, Some(page.elsewhere)),
        );
        let _ = dropdowns.dispatch_event(&mut page.doc, &mut anim, Event::click(page.elsewhere));
        assert_eq!(anim.pending.len(), before);
    }

    #[test]
    fn steps_for_destroyed_instances_are_ignored() {
        let (mut page, mut anim, mut dropdowns, id) = open_page(Options::default());
        let seq = page.doc.route(&Event::click(page.elsewhere));
        assert_eq!(seq.len(), 1);
        dropdowns.destroy(&mut page.doc, id);

        let event = Event::click(page.elsewhere);
        let mut state = EventState::default();
        dropdowns.handle_event(&mut page.doc, &mut anim, &seq[0], &event, &mut state);
        assert_eq!(state, EventState::default());
        assert_eq!(anim.pending.len(), 1);
    }
}
