//! Dropdown/menu behavior.
//!
//! [`UseMenu::use_menu`] composes four independent behaviors around one
//! container element:
//!
//! - [`outside_click`]: dismiss on pointer-down outside the menu and its
//!   control element
//! - [`scroll`]: dismiss when the window or an ancestor scroll container
//!   scrolls
//! - [`click`]: dismiss after a click inside the menu
//! - [`keydown`]: arrow-key focus movement between items, dismiss on
//!   Escape and Tab
//!
//! The composer does not own visibility. The caller passes `visible` on
//! every render and reacts to `on_request_close`.

pub mod click;
pub mod keydown;
pub mod outside_click;
pub mod scroll;

use std::fmt;
use std::sync::Arc;

use rafter::{Callback, Hooks};
use tuidom::{Document, DomEvent, EventKind, Listener};

pub use click::{MenuClick, UseMenuClick};
pub use keydown::{MenuKey, MenuKeydown, UseMenuKeydown};
pub use outside_click::{OutsideClick, UseOutsideClick};
pub use scroll::{ScrollClose, UseScrollClose};

use crate::element_ref::{ElementRef, RefCallback, UseMergedRef};

/// Event handler bound to an element.
pub type EventHandler = Listener;

/// Per-render menu configuration.
#[derive(Clone)]
pub struct MenuOptions {
    /// Whether the menu is open.
    pub visible: bool,

    /// ID of the element that opens the menu. Pointer-downs on it are not
    /// outside clicks, so its own handler can toggle the menu.
    pub control_id: Option<String>,

    /// Items are laid out in a row: Left/Right navigate instead of Up/Down.
    pub horizontal: bool,

    /// Keep the menu open when an ancestor scrolls.
    pub disable_close_on_scroll: bool,

    /// Asked to close the menu.
    pub on_request_close: Callback,

    /// Caller click handler, run before the built-in one.
    pub on_click: Option<EventHandler>,

    /// Caller keydown handler, run before the built-in one.
    pub on_key_down: Option<EventHandler>,

    /// Caller scroll handler for scrolls inside the menu.
    pub on_scroll: Option<EventHandler>,

    /// Caller ref that should also receive the menu element.
    pub external_ref: Option<ElementRef>,
}

impl MenuOptions {
    /// A closed menu that asks `on_request_close` to close it.
    pub fn new(on_request_close: Callback) -> Self {
        Self {
            visible: false,
            control_id: None,
            horizontal: false,
            disable_close_on_scroll: false,
            on_request_close,
            on_click: None,
            on_key_down: None,
            on_scroll: None,
            external_ref: None,
        }
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn control_id(mut self, id: impl Into<String>) -> Self {
        self.control_id = Some(id.into());
        self
    }

    pub fn horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }

    pub fn disable_close_on_scroll(mut self, disable: bool) -> Self {
        self.disable_close_on_scroll = disable;
        self
    }

    pub fn on_click(mut self, handler: impl Fn(&DomEvent) + Send + Sync + 'static) -> Self {
        self.on_click = Some(Arc::new(handler));
        self
    }

    pub fn on_key_down(mut self, handler: impl Fn(&DomEvent) + Send + Sync + 'static) -> Self {
        self.on_key_down = Some(Arc::new(handler));
        self
    }

    pub fn on_scroll(mut self, handler: impl Fn(&DomEvent) + Send + Sync + 'static) -> Self {
        self.on_scroll = Some(Arc::new(handler));
        self
    }

    pub fn external_ref(mut self, element_ref: ElementRef) -> Self {
        self.external_ref = Some(element_ref);
        self
    }
}

impl fmt::Debug for MenuOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuOptions")
            .field("visible", &self.visible)
            .field("control_id", &self.control_id)
            .field("horizontal", &self.horizontal)
            .field("disable_close_on_scroll", &self.disable_close_on_scroll)
            .field("on_click", &self.on_click.is_some())
            .field("on_key_down", &self.on_key_down.is_some())
            .field("on_scroll", &self.on_scroll.is_some())
            .finish_non_exhaustive()
    }
}

/// Bindings for the menu container, returned by [`UseMenu::use_menu`].
///
/// All handlers keep their identity for the lifetime of the component.
#[derive(Clone)]
pub struct MenuHandlers {
    /// The container's `ref`: feeds the internal menu ref and the caller's
    /// external ref, if any.
    pub container_ref: RefCallback,
    /// The element the menu is currently attached to.
    pub menu_ref: ElementRef,
    pub on_scroll: EventHandler,
    pub on_click: EventHandler,
    pub on_key_down: EventHandler,
}

impl MenuHandlers {
    /// Bind the handlers to the element `id` and feed it through the ref.
    pub fn attach(&self, doc: &Document, id: &str) {
        self.container_ref.call(Some(id.to_string()));
        doc.bind_shared(id, EventKind::Click, Arc::clone(&self.on_click));
        doc.bind_shared(id, EventKind::Key, Arc::clone(&self.on_key_down));
        doc.bind_shared(id, EventKind::Scroll, Arc::clone(&self.on_scroll));
    }

    /// Undo [`attach`](Self::attach).
    pub fn detach(&self, doc: &Document, id: &str) {
        doc.unbind(id, EventKind::Click);
        doc.unbind(id, EventKind::Key);
        doc.unbind(id, EventKind::Scroll);
        self.container_ref.call(None);
    }
}

impl fmt::Debug for MenuHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuHandlers")
            .field("menu_ref", &self.menu_ref)
            .finish_non_exhaustive()
    }
}

pub trait UseMenu {
    /// Wire menu behavior for this render's `options`.
    fn use_menu(&mut self, doc: &Document, options: MenuOptions) -> MenuHandlers;
}

impl UseMenu for Hooks<'_> {
    fn use_menu(&mut self, doc: &Document, options: MenuOptions) -> MenuHandlers {
        let menu_ref = self.use_memo((), ElementRef::new);
        let refs = std::iter::once(menu_ref.clone())
            .chain(options.external_ref.clone())
            .collect();
        let container_ref = self.use_merged_ref(refs);

        self.use_outside_click(
            doc,
            OutsideClick {
                element: menu_ref.clone(),
                control_id: options.control_id.clone(),
                enabled: options.visible,
                on_outside: options.on_request_close.clone(),
            },
        );

        self.use_scroll_close(
            doc,
            ScrollClose {
                element: menu_ref.clone(),
                enabled: options.visible && !options.disable_close_on_scroll,
                on_scroll: options.on_request_close.clone(),
            },
        );

        let on_scroll = self.use_menu_scroll(options.on_scroll.clone());

        let on_click = self.use_menu_click(MenuClick {
            visible: options.visible,
            on_click: options.on_click.clone(),
            on_request_close: options.on_request_close.clone(),
        });

        let on_key_down = self.use_menu_keydown(
            doc,
            MenuKeydown {
                element: menu_ref.clone(),
                visible: options.visible,
                horizontal: options.horizontal,
                on_key_down: options.on_key_down,
                on_request_close: options.on_request_close,
            },
        );

        MenuHandlers {
            container_ref,
            menu_ref,
            on_scroll,
            on_click,
            on_key_down,
        }
    }
}
