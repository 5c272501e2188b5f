//! Keyboard navigation inside the menu.

use std::sync::Arc;

use log::{debug, trace};
use rafter::{Callback, Hooks};
use tuidom::focus::{next_in, prev_in};
use tuidom::{collect_focusable_within, Document, DomEvent, Key};

use crate::element_ref::ElementRef;
use crate::latest::UseLatest;
use crate::menu::EventHandler;

#[derive(Clone)]
pub struct MenuKeydown {
    pub element: ElementRef,
    pub visible: bool,
    /// Navigate with Left/Right instead of Up/Down.
    pub horizontal: bool,
    /// Runs first. Calling `prevent_default` on the event skips the
    /// built-in handling.
    pub on_key_down: Option<EventHandler>,
    pub on_request_close: Callback,
}

/// What a key does in an open menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Next,
    Prev,
    First,
    Last,
    /// Close and swallow the key.
    Dismiss,
    /// Close and let the key move focus on.
    TabOut,
}

impl MenuKey {
    pub fn from_key(key: Key, horizontal: bool) -> Option<Self> {
        match (key, horizontal) {
            (Key::Down, false) | (Key::Right, true) => Some(Self::Next),
            (Key::Up, false) | (Key::Left, true) => Some(Self::Prev),
            (Key::Home, _) => Some(Self::First),
            (Key::End, _) => Some(Self::Last),
            (Key::Escape, _) => Some(Self::Dismiss),
            (Key::Tab | Key::BackTab, _) => Some(Self::TabOut),
            _ => None,
        }
    }
}

pub trait UseMenuKeydown {
    fn use_menu_keydown(&mut self, doc: &Document, config: MenuKeydown) -> EventHandler;
}

impl UseMenuKeydown for Hooks<'_> {
    fn use_menu_keydown(&mut self, doc: &Document, config: MenuKeydown) -> EventHandler {
        let latest = self.use_latest(config);
        let doc = doc.clone();
        self.use_memo((), move || {
            Arc::new(move |event: &DomEvent| {
                let config = latest.get();
                if let Some(handler) = &config.on_key_down {
                    handler(event);
                }
                if !config.visible || event.default_prevented() {
                    return;
                }

                let Some((key, modifiers)) = event.event().key() else {
                    return;
                };
                if modifiers.ctrl || modifiers.alt {
                    return;
                }
                let Some(action) = MenuKey::from_key(key, config.horizontal) else {
                    return;
                };
                trace!("Menu key {:?} -> {:?}", key, action);

                match action {
                    MenuKey::Dismiss => {
                        event.prevent_default();
                        config.on_request_close.emit();
                    }
                    MenuKey::TabOut => config.on_request_close.emit(),
                    step => {
                        event.prevent_default();
                        move_focus(&doc, &config.element, step);
                    }
                }
            }) as EventHandler
        })
    }
}

/// Move focus among the focusable items of the menu, wrapping at both ends.
/// Returns the newly focused item.
pub fn move_focus(doc: &Document, element: &ElementRef, step: MenuKey) -> Option<String> {
    let menu = element.current()?;
    let items = doc.with_root(|root| collect_focusable_within(root, &menu));
    let current = doc.focused();

    let target = match step {
        MenuKey::Next => next_in(&items, current.as_deref()),
        MenuKey::Prev => prev_in(&items, current.as_deref()),
        MenuKey::First => items.first().cloned(),
        MenuKey::Last => items.last().cloned(),
        MenuKey::Dismiss | MenuKey::TabOut => None,
    }?;

    debug!("Menu focus {:?} -> {}", current, target);
    doc.focus(&target);
    Some(target)
}
