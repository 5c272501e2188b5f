//! Dismissal on pointer-down outside an element.

use std::sync::Arc;

use log::{debug, trace};
use rafter::{Callback, Cleanup, Hooks, Ref};
use tuidom::{Document, DomEvent, EventKind, GestureId, Listener};

use crate::element_ref::ElementRef;
use crate::latest::UseLatest;

#[derive(Clone, Debug)]
pub struct OutsideClick {
    /// The element clicks must land outside of.
    pub element: ElementRef,
    /// A second element that does not count as outside (the menu's trigger).
    pub control_id: Option<String>,
    /// Detection is armed only while enabled.
    pub enabled: bool,
    pub on_outside: Callback,
}

pub trait UseOutsideClick {
    /// Call `on_outside` once per gesture that starts outside both the
    /// element and the control element, while enabled.
    fn use_outside_click(&mut self, doc: &Document, config: OutsideClick);
}

impl UseOutsideClick for Hooks<'_> {
    fn use_outside_click(&mut self, doc: &Document, config: OutsideClick) {
        let on_outside = self.use_latest(config.on_outside);
        let control_id = self.use_latest(config.control_id);
        let handled: Ref<Option<GestureId>> = self.use_ref(None);

        let doc = doc.clone();
        let element = config.element;
        let enabled = config.enabled;

        self.use_effect(enabled, move || {
            if !enabled {
                return None;
            }

            let listener_doc = doc.clone();
            let listener: Listener = Arc::new(move |event: &DomEvent| {
                let Some(gesture) = event.event().gesture() else {
                    return;
                };
                // A touch also produces a pointer-down for the same gesture
                if handled.get() == Some(gesture) {
                    return;
                }
                let control = control_id.get();
                if is_outside(
                    &listener_doc,
                    element.current().as_deref(),
                    control.as_deref(),
                    event.target(),
                ) {
                    trace!("Outside pointer-down on {:?}", event.target());
                    handled.set(Some(gesture));
                    on_outside.get().emit();
                }
            });

            let pointer = doc.add_shared_listener(EventKind::PointerDown, Arc::clone(&listener));
            let touch = doc.add_shared_listener(EventKind::TouchStart, listener);
            debug!("Outside-click detection armed");

            Some(Box::new(move || {
                doc.remove_listener(pointer);
                doc.remove_listener(touch);
                debug!("Outside-click detection disarmed");
            }) as Cleanup)
        });
    }
}

/// Whether `target` lies outside both `element` and `control`.
///
/// An event without a target (empty space) is outside. A control ID that
/// matches nothing in the document never contains anything.
pub fn is_outside(
    doc: &Document,
    element: Option<&str>,
    control: Option<&str>,
    target: Option<&str>,
) -> bool {
    let Some(target) = target else {
        return true;
    };
    let in_element = element.is_some_and(|id| doc.contains(id, target));
    let in_control = control.is_some_and(|id| doc.contains(id, target));
    !in_element && !in_control
}
