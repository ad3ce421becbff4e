// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry and open/close state controller.
//!
//! ## Overview
//!
//! [`Dropdowns`] owns every live [`Instance`], in construction order, and maps
//! triggers to instances: at most one instance is bound to a trigger, and
//! constructing another on the same trigger destroys the first.
//!
//! ## States
//!
//! Each instance is either closed (initial) or open. [`Dropdowns::open`] and
//! [`Dropdowns::close`] are the only transitions; calling either in the state
//! it would reach does nothing.
//!
//! Opening runs, in order: the open-start callback, placement, the enter
//! animation request, and registration of the document-level outside-click
//! listener. Closing runs the close-start callback, the exit animation request,
//! and removal of that listener. End callbacks (and hiding the panel after an
//! exit) run only when the host reports the animation complete.

use alloc::vec::Vec;
use tracing::{debug, trace, warn};
use understory_events::types::{EventKind, ListenerId};

use crate::error::DropdownError;
use crate::host::{
    AnimationTicket, Animator, Document, ENTER_TWEENS, EXIT_TWEENS, Easing, Property, Timing,
    TransformOrigin,
};
use crate::options::{Callback, Options};
use crate::position::{Direction, Geometry, Placement, place};
use crate::router::Wiring;

/// Identifier of a dropdown instance.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct InstanceId(u32);

/// What a listener does when its event arrives.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Role {
    /// Click on the trigger: open.
    TriggerClick,
    /// Pointer entered the trigger: open.
    TriggerEnter,
    /// Pointer left the trigger: close unless heading into trigger or panel.
    TriggerLeave,
    /// Pointer left the panel: close unless heading into trigger or panel.
    PanelLeave,
    /// Document click while open, seen during capture.
    OutsideClick,
}

/// Handler payload stored with every listener a dropdown registers.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Binding {
    /// Owning instance.
    pub instance: InstanceId,
    /// Behavior.
    pub role: Role,
}

/// One dropdown: a trigger, its panel, fixed options and the open flag.
#[derive(Debug)]
pub struct Instance<E> {
    id: InstanceId,
    trigger: E,
    panel: E,
    options: Options<E>,
    is_open: bool,
    pub(crate) wiring: Wiring,
    pub(crate) outside_click: Option<ListenerId>,
}

impl<E: Copy> Instance<E> {
    /// Identifier.
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// The trigger element.
    pub fn trigger(&self) -> E {
        self.trigger
    }

    /// The panel element.
    pub fn panel(&self) -> E {
        self.panel
    }

    /// Options the instance was constructed with.
    pub fn options(&self) -> &Options<E> {
        &self.options
    }

    /// Whether the instance is open.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Whether pointer hover (rather than clicks) drives this instance.
    pub fn is_hover(&self) -> bool {
        matches!(self.wiring, Wiring::Hover { .. })
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Transition {
    Open,
    Close,
}

/// Continuation of an issued animation request.
#[derive(Debug)]
struct InFlight<E> {
    ticket: AnimationTicket,
    transition: Transition,
    trigger: E,
    panel: E,
    on_end: Option<Callback<E>>,
}

/// Registry and controller for all dropdowns of a document.
///
/// The registry doubles as the trigger → instance mapping. Elements are only
/// `Copy + Eq`, so lookups scan the instances in construction order.
#[derive(Debug)]
pub struct Dropdowns<E> {
    instances: Vec<Instance<E>>,
    in_flight: Vec<InFlight<E>>,
    next_instance: u32,
    next_ticket: u64,
}

impl<E> Default for Dropdowns<E> {
    fn default() -> Self {
        Self {
            instances: Vec::new(),
            in_flight: Vec::new(),
            next_instance: 0,
            next_ticket: 0,
        }
    }
}

impl<E: Copy + Eq + core::fmt::Debug> Dropdowns<E> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a dropdown to `trigger`.
    ///
    /// The panel is resolved through [`Document::panel_for`] and moved to
    /// immediately follow the trigger. An instance already bound to `trigger`
    /// is destroyed first.
    pub fn init<D>(
        &mut self,
        doc: &mut D,
        trigger: E,
        options: Options<E>,
    ) -> Result<InstanceId, DropdownError>
    where
        D: Document<Element = E>,
    {
        let panel = doc.panel_for(trigger).ok_or(DropdownError::MissingPanel)?;
        if let Some(previous) = self.get_instance(trigger).map(Instance::id) {
            debug!(instance = ?previous, ?trigger, "replacing dropdown bound to trigger");
            self.destroy(doc, previous);
        }
        doc.insert_after(panel, trigger);

        let id = InstanceId(self.next_instance);
        self.next_instance += 1;
        let wiring = Wiring::attach(doc, id, trigger, panel, options.hover);
        debug!(instance = ?id, ?trigger, ?panel, hover = options.hover, "dropdown created");
        self.instances.push(Instance {
            id,
            trigger,
            panel,
            options,
            is_open: false,
            wiring,
            outside_click: None,
        });
        Ok(id)
    }

    /// Bind one dropdown per trigger, all with the same options.
    ///
    /// Every trigger's panel is resolved first; if any is missing nothing is
    /// bound and existing bindings are left untouched.
    pub fn init_all<D>(
        &mut self,
        doc: &mut D,
        triggers: &[E],
        options: &Options<E>,
    ) -> Result<Vec<InstanceId>, DropdownError>
    where
        D: Document<Element = E>,
    {
        if let Some(&trigger) = triggers.iter().find(|&&t| doc.panel_for(t).is_none()) {
            debug!(?trigger, "bulk init aborted: trigger names no panel");
            return Err(DropdownError::MissingPanel);
        }
        triggers
            .iter()
            .map(|&t| self.init(doc, t, options.clone()))
            .collect()
    }

    /// The instance bound to `trigger`.
    pub fn get_instance(&self, trigger: E) -> Option<&Instance<E>> {
        self.instances.iter().find(|i| i.trigger == trigger)
    }

    /// The instance with identifier `id`.
    pub fn instance(&self, id: InstanceId) -> Option<&Instance<E>> {
        self.instances.iter().find(|i| i.id == id)
    }

    /// All live instances in construction order.
    pub fn instances(&self) -> &[Instance<E>] {
        &self.instances
    }

    /// Whether `id` is live and open.
    pub fn is_open(&self, id: InstanceId) -> bool {
        self.instance(id).is_some_and(Instance::is_open)
    }

    /// Open the dropdown. Does nothing if it is already open or unknown.
    pub fn open<D, A>(&mut self, doc: &mut D, anim: &mut A, id: InstanceId)
    where
        D: Document<Element = E>,
        A: Animator<E>,
    {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        let inst = &mut self.instances[idx];
        if inst.is_open {
            trace!(instance = ?id, "already open");
            return;
        }
        inst.is_open = true;
        let (trigger, panel) = (inst.trigger, inst.panel);
        let rules = inst.options.placement_rules();
        let in_duration = inst.options.in_duration;
        let on_end = inst.options.on_open_end.clone();
        if let Some(cb) = &inst.options.on_open_start {
            cb.call(trigger);
        }

        let placement = place(&measure(doc, trigger, panel), rules);
        apply_placement(anim, panel, &placement);
        anim.set_property(panel, Property::Visible(true));
        let ticket = self.issue(Transition::Open, trigger, panel, on_end);
        anim.animate(
            panel,
            &ENTER_TWEENS,
            Timing {
                duration_ms: in_duration,
                easing: Easing::EaseOutQuad,
            },
            ticket,
        );

        let root = doc.root();
        let listener = doc.add_listener(
            root,
            EventKind::Click,
            true,
            Binding {
                instance: id,
                role: Role::OutsideClick,
            },
        );
        self.instances[idx].outside_click = Some(listener);
        debug!(instance = ?id, ?placement, "dropdown opened");
    }

    /// Close the dropdown. Does nothing if it is already closed or unknown.
    pub fn close<D, A>(&mut self, doc: &mut D, anim: &mut A, id: InstanceId)
    where
        D: Document<Element = E>,
        A: Animator<E>,
    {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        let inst = &mut self.instances[idx];
        if !inst.is_open {
            trace!(instance = ?id, "already closed");
            return;
        }
        inst.is_open = false;
        let (trigger, panel) = (inst.trigger, inst.panel);
        let out_duration = inst.options.out_duration;
        let on_end = inst.options.on_close_end.clone();
        if let Some(cb) = &inst.options.on_close_start {
            cb.call(trigger);
        }
        let listener = inst.outside_click.take();

        let ticket = self.issue(Transition::Close, trigger, panel, on_end);
        anim.animate(
            panel,
            &EXIT_TWEENS,
            Timing {
                duration_ms: out_duration,
                easing: Easing::EaseOutQuint,
            },
            ticket,
        );
        if let Some(listener) = listener {
            doc.remove_listener(listener);
        }
        debug!(instance = ?id, "dropdown closed");
    }

    /// Recompute and reapply the placement of an open dropdown without animating.
    pub fn recalculate_dimensions<D, A>(&mut self, doc: &mut D, anim: &mut A, id: InstanceId)
    where
        D: Document<Element = E>,
        A: Animator<E>,
    {
        let Some(inst) = self.instance(id).filter(|i| i.is_open) else {
            return;
        };
        let placement = place(
            &measure(doc, inst.trigger, inst.panel),
            inst.options.placement_rules(),
        );
        apply_placement(anim, inst.panel, &placement);
        trace!(instance = ?id, ?placement, "placement recalculated");
    }

    /// Run the continuation of a finished animation.
    ///
    /// After an enter this fires the open-end callback; after an exit it hides
    /// the panel and fires the close-end callback. Continuations still run if
    /// their instance was destroyed in the meantime. Unknown tickets are ignored.
    pub fn animation_complete<A>(&mut self, anim: &mut A, ticket: AnimationTicket)
    where
        A: Animator<E>,
    {
        let Some(pos) = self.in_flight.iter().position(|f| f.ticket == ticket) else {
            warn!(?ticket, "completion for unknown animation ticket");
            return;
        };
        let done = self.in_flight.remove(pos);
        if done.transition == Transition::Close {
            anim.set_property(done.panel, Property::Visible(false));
        }
        if let Some(cb) = &done.on_end {
            cb.call(done.trigger);
        }
        trace!(?ticket, transition = ?done.transition, "animation complete");
    }

    /// Detach every listener of the instance and drop it from the registry.
    ///
    /// An open panel is left as it is: no exit animation is requested and the
    /// instance's open state is discarded with it. Returns `false` for unknown ids.
    pub fn destroy<D>(&mut self, doc: &mut D, id: InstanceId) -> bool
    where
        D: Document<Element = E>,
    {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        let inst = self.instances.remove(idx);
        inst.wiring.detach(doc);
        if let Some(listener) = inst.outside_click {
            doc.remove_listener(listener);
        }
        debug!(instance = ?id, was_open = inst.is_open, "dropdown destroyed");
        true
    }

    /// Destroy every instance.
    pub fn destroy_all<D>(&mut self, doc: &mut D)
    where
        D: Document<Element = E>,
    {
        let ids: Vec<InstanceId> = self.instances.iter().map(Instance::id).collect();
        for id in ids {
            self.destroy(doc, id);
        }
    }

    fn index_of(&self, id: InstanceId) -> Option<usize> {
        self.instances.iter().position(|i| i.id == id)
    }

    fn issue(
        &mut self,
        transition: Transition,
        trigger: E,
        panel: E,
        on_end: Option<Callback<E>>,
    ) -> AnimationTicket {
        let ticket = AnimationTicket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight.push(InFlight {
            ticket,
            transition,
            trigger,
            panel,
            on_end,
        });
        ticket
    }
}

fn measure<D: Document>(doc: &D, trigger: D::Element, panel: D::Element) -> Geometry {
    Geometry {
        trigger: doc.bounding_rect(trigger),
        trigger_offset: doc.offset_rect(trigger),
        panel: doc.bounding_rect(panel),
        container: doc.clip_rect(trigger),
    }
}

fn apply_placement<E: Copy>(anim: &mut impl Animator<E>, panel: E, placement: &Placement) {
    let origin = match placement.direction {
        Direction::Down => TransformOrigin::TopLeft,
        Direction::Up => TransformOrigin::BottomLeft,
    };
    anim.set_property(panel, Property::Left(placement.x));
    anim.set_property(panel, Property::Top(placement.y));
    anim.set_property(panel, Property::Width(placement.width));
    anim.set_property(panel, Property::TransformOrigin(origin));
}
