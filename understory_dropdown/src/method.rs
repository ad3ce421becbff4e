// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Method dispatch over a set of triggers.

use alloc::string::ToString;
use alloc::vec::Vec;
use core::str::FromStr;

use crate::controller::{Dropdowns, InstanceId};
use crate::error::DropdownError;
use crate::host::{Animator, Document};
use crate::options::Options;

/// Methods callable by name.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Method {
    /// [`Dropdowns::open`].
    Open,
    /// [`Dropdowns::close`].
    Close,
    /// [`Dropdowns::destroy`].
    Destroy,
    /// [`Dropdowns::recalculate_dimensions`].
    RecalculateDimensions,
}

impl FromStr for Method {
    type Err = DropdownError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "close" => Ok(Self::Close),
            "destroy" => Ok(Self::Destroy),
            "recalculateDimensions" => Ok(Self::RecalculateDimensions),
            other => Err(DropdownError::UnknownMethod(other.to_string())),
        }
    }
}

/// Argument of [`Dropdowns::invoke`]: construct, or call a method by name.
#[derive(Debug)]
pub enum Invocation<'a, E> {
    /// Bind a dropdown with these options to every trigger.
    Configure(Options<E>),
    /// Call the named method on every trigger's bound dropdown.
    Call(&'a str),
}

impl<E: Copy + Eq + core::fmt::Debug> Dropdowns<E> {
    /// Construct or call a method on every trigger.
    ///
    /// Method names are checked, and every trigger's instance (or, when
    /// configuring, its panel) resolved, before anything runs: an unknown name,
    /// an unbound trigger or a missing panel fails the whole call.
    /// Returns the instances that were constructed or acted on.
    pub fn invoke<D, A>(
        &mut self,
        doc: &mut D,
        anim: &mut A,
        triggers: &[E],
        invocation: Invocation<'_, E>,
    ) -> Result<Vec<InstanceId>, DropdownError>
    where
        D: Document<Element = E>,
        A: Animator<E>,
    {
        let name = match invocation {
            Invocation::Configure(options) => return self.init_all(doc, triggers, &options),
            Invocation::Call(name) => name,
        };
        let method: Method = name.parse()?;
        let ids = triggers
            .iter()
            .map(|&t| {
                self.get_instance(t)
                    .map(|i| i.id())
                    .ok_or(DropdownError::NotInitialized)
            })
            .collect::<Result<Vec<_>, _>>()?;
        for &id in &ids {
            match method {
                Method::Open => self.open(doc, anim, id),
                Method::Close => self.close(doc, anim, id),
                Method::Destroy => {
                    self.destroy(doc, id);
                }
                Method::RecalculateDimensions => self.recalculate_dimensions(doc, anim, id),
            }
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_method_names() {
        assert_eq!("open".parse::<Method>(), Ok(Method::Open));
        assert_eq!("close".parse::<Method>(), Ok(Method::Close));
        assert_eq!("destroy".parse::<Method>(), Ok(Method::Destroy));
        assert_eq!(
            "recalculateDimensions".parse::<Method>(),
            Ok(Method::RecalculateDimensions)
        );
        assert_eq!(
            "toggle".parse::<Method>(),
            Err(DropdownError::UnknownMethod("toggle".to_string()))
        );
        // Names are case sensitive.
        assert!("Open".parse::<Method>().is_err());
    }

    #[cfg(feature = "scene_adapter")]
    mod invoke {
        use super::*;
        use crate::testing::{Page, Recorder};

        #[test]
        fn configure_then_call() {
            let mut page = Page::new();
            let mut anim = Recorder::default();
            let mut dropdowns = Dropdowns::new();
            let triggers = [page.trigger];

            let ids = dropdowns
                .invoke(
                    &mut page.doc,
                    &mut anim,
                    &triggers,
                    Invocation::Configure(Options::default()),
                )
                .unwrap();
            assert_eq!(ids.len(), 1);

            let opened = dropdowns
                .invoke(&mut page.doc, &mut anim, &triggers, Invocation::Call("open"))
                .unwrap();
            assert_eq!(opened, ids);
            assert!(dropdowns.is_open(ids[0]));

            dropdowns
                .invoke(&mut page.doc, &mut anim, &triggers, Invocation::Call("close"))
                .unwrap();
            assert!(!dropdowns.is_open(ids[0]));

            dropdowns
                .invoke(&mut page.doc, &mut anim, &triggers, Invocation::Call("destroy"))
                .unwrap();
            assert!(dropdowns.instances().is_empty());
            assert!(page.doc.listeners().is_empty());
        }

        #[test]
        fn unknown_method_changes_nothing() {
            let mut page = Page::new();
            let mut anim = Recorder::default();
            let mut dropdowns = Dropdowns::new();
            let id = dropdowns
                .init(&mut page.doc, page.trigger, Options::default())
                .unwrap();

            let err = dropdowns
                .invoke(&mut page.doc, &mut anim, &[page.trigger], Invocation::Call("toggle"))
                .unwrap_err();
            assert_eq!(err, DropdownError::UnknownMethod("toggle".to_string()));
            assert!(!dropdowns.is_open(id));
            assert!(anim.pending.is_empty());
        }

        #[test]
        fn uninitialized_trigger_fails_whole_call() {
            let mut page = Page::new();
            let mut anim = Recorder::default();
            let mut dropdowns = Dropdowns::new();
            let id = dropdowns
                .init(&mut page.doc, page.trigger, Options::default())
                .unwrap();

            let err = dropdowns
                .invoke(
                    &mut page.doc,
                    &mut anim,
                    &[page.trigger, page.elsewhere],
                    Invocation::Call("open"),
                )
                .unwrap_err();
            assert_eq!(err, DropdownError::NotInitialized);
            assert!(!dropdowns.is_open(id));
        }

        #[test]
        fn configure_with_missing_panel_binds_nothing() {
            let mut page = Page::new();
            let mut anim = Recorder::default();
            let mut dropdowns = Dropdowns::new();

            let err = dropdowns
                .invoke(
                    &mut page.doc,
                    &mut anim,
                    &[page.trigger, page.elsewhere],
                    Invocation::Configure(Options::default()),
                )
                .unwrap_err();
            assert_eq!(err, DropdownError::MissingPanel);
            assert!(dropdowns.instances().is_empty());
            assert!(page.doc.listeners().is_empty());
        }

        #[test]
        fn recalculate_dimensions_by_name() {
            let mut page = Page::new();
            let mut anim = Recorder::default();
            let mut dropdowns = Dropdowns::new();
            let id = dropdowns
                .init(&mut page.doc, page.trigger, Options::default())
                .unwrap();
            dropdowns.open(&mut page.doc, &mut anim, id);
            let writes = anim.properties.len();

            dropdowns
                .invoke(
                    &mut page.doc,
                    &mut anim,
                    &[page.trigger],
                    Invocation::Call("recalculateDimensions"),
                )
                .unwrap();
            // Left, top, width and transform origin are written again.
            assert_eq!(anim.properties.len(), writes + 4);
            assert_eq!(anim.pending.len(), 1);
        }
    }
}
