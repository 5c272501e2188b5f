//! Dismissal when the content around an element scrolls.

use std::sync::Arc;

use log::{debug, trace};
use rafter::{Callback, Cleanup, Hooks};
use tuidom::{Document, DomEvent, EventKind};

use crate::element_ref::ElementRef;
use crate::latest::UseLatest;
use crate::menu::EventHandler;

#[derive(Clone, Debug)]
pub struct ScrollClose {
    pub element: ElementRef,
    /// Detection is armed only while enabled.
    pub enabled: bool,
    pub on_scroll: Callback,
}

pub trait UseScrollClose {
    /// Call `on_scroll` when the window or an ancestor scroll container of
    /// the element scrolls, while enabled.
    fn use_scroll_close(&mut self, doc: &Document, config: ScrollClose);

    /// Handler for scrolls inside the menu: runs the caller's handler and
    /// keeps the event from bubbling past the menu.
    fn use_menu_scroll(&mut self, on_scroll: Option<EventHandler>) -> EventHandler;
}

impl UseScrollClose for Hooks<'_> {
    fn use_scroll_close(&mut self, doc: &Document, config: ScrollClose) {
        let on_scroll = self.use_latest(config.on_scroll);

        let doc = doc.clone();
        let element = config.element;
        let enabled = config.enabled;

        self.use_effect(enabled, move || {
            if !enabled {
                return None;
            }

            let listener_doc = doc.clone();
            let id = doc.add_listener(EventKind::Scroll, move |event: &DomEvent| {
                let element = element.current();
                if scrolls_around(&listener_doc, element.as_deref(), event.target()) {
                    trace!("Scroll of {:?} around menu", event.target());
                    on_scroll.get().emit();
                }
            });
            debug!("Scroll detection armed");

            Some(Box::new(move || {
                doc.remove_listener(id);
                debug!("Scroll detection disarmed");
            }) as Cleanup)
        });
    }

    fn use_menu_scroll(&mut self, on_scroll: Option<EventHandler>) -> EventHandler {
        let caller = self.use_latest(on_scroll);
        self.use_memo((), move || {
            Arc::new(move |event: &DomEvent| {
                if let Some(handler) = caller.get() {
                    handler(event);
                }
                event.stop_propagation();
            }) as EventHandler
        })
    }
}

/// Whether a scroll of `target` moves `element`: the window (`None`) or a
/// proper ancestor of the element. Without an element every scroll counts.
pub fn scrolls_around(doc: &Document, element: Option<&str>, target: Option<&str>) -> bool {
    match (target, element) {
        (None, _) | (Some(_), None) => true,
        (Some(target), Some(element)) => target != element && doc.contains(target, element),
    }
}
