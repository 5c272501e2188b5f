//! The shared element tree that components attach behavior to.
//!
//! A [`Document`] owns the root element, the focus state, document-level
//! listeners and per-element handlers. It is a cheap-clone handle, so
//! listeners can hold their own copy and query the tree while an event is
//! being dispatched: the internal lock is never held while user code runs.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crossterm::event::{Event as CrosstermEvent, KeyEventKind, MouseEventKind};

use crate::element::{self, Element};
use crate::event::{DomEvent, Event, EventKind, GestureId, Key, Modifiers, MouseButton};
use crate::focus::FocusState;
use crate::hit::{hit_test_any, hit_test_scrollable};
use crate::layout::LayoutResult;

/// Callback invoked with an event in flight.
pub type Listener = Arc<dyn Fn(&DomEvent) + Send + Sync>;

/// Handle returned by [`Document::add_listener`], used to detach it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Inner {
    root: Element,
    focus: FocusState,
    listeners: Vec<(ListenerId, EventKind, Listener)>,
    handlers: HashMap<(String, EventKind), Listener>,
    next_listener: u64,
    next_gesture: u64,
    /// Gesture and target of the mouse button currently held, for pairing
    /// raw press/release into clicks.
    pressed: Option<(GestureId, Option<String>)>,
}

#[derive(Clone)]
pub struct Document {
    inner: Arc<RwLock<Inner>>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.read();
        f.debug_struct("Document")
            .field("root", &inner.root.id)
            .field("focused", &inner.focus.focused())
            .field("listeners", &inner.listeners.len())
            .field("handlers", &inner.handlers.len())
            .finish()
    }
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                root,
                focus: FocusState::new(),
                listeners: Vec::new(),
                handlers: HashMap::new(),
                next_listener: 0,
                next_gesture: 0,
                pressed: None,
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // =========================================================================
    // Tree
    // =========================================================================

    /// A snapshot of the current tree.
    pub fn root(&self) -> Element {
        self.read().root.clone()
    }

    /// Run `f` against the current tree without cloning it.
    pub fn with_root<R>(&self, f: impl FnOnce(&Element) -> R) -> R {
        f(&self.read().root)
    }

    /// Replace the tree. Focus is dropped if the focused element is gone.
    pub fn set_root(&self, root: Element) {
        let mut inner = self.write();
        let focus_lost = inner
            .focus
            .focused()
            .is_some_and(|focused| element::find_element(&root, focused).is_none());
        if focus_lost {
            let old = inner.focus.blur();
            log::debug!("[document] focused element {:?} gone with old root", old);
        }
        inner.root = root;
    }

    /// A copy of the element `id` and its subtree.
    pub fn find(&self, id: &str) -> Option<Element> {
        element::find_element(&self.read().root, id).cloned()
    }

    pub fn exists(&self, id: &str) -> bool {
        element::find_element(&self.read().root, id).is_some()
    }

    /// Whether `id` is `ancestor` or lies inside it. False if either is missing.
    pub fn contains(&self, ancestor: &str, id: &str) -> bool {
        element::contains(&self.read().root, ancestor, id)
    }

    /// Ancestors of `id`, innermost first, excluding `id` itself.
    pub fn ancestors(&self, id: &str) -> Vec<String> {
        let mut path = element::path_to(&self.read().root, id).unwrap_or_default();
        path.pop();
        path.reverse();
        path
    }

    /// Remove an element and its subtree. Handlers bound inside the subtree
    /// are dropped, and focus is cleared if it was inside.
    pub fn remove(&self, id: &str) -> Option<Element> {
        let mut inner = self.write();
        let removed = element::remove_element(&mut inner.root, id)?;

        inner
            .handlers
            .retain(|(el, _), _| element::find_element(&removed, el).is_none());
        let focus_inside = inner
            .focus
            .focused()
            .is_some_and(|f| element::find_element(&removed, f).is_some());
        if focus_inside {
            inner.focus.blur();
        }

        log::debug!("[document] removed {}", id);
        Some(removed)
    }

    // =========================================================================
    // Focus
    // =========================================================================

    pub fn focused(&self) -> Option<String> {
        self.read().focus.focused().map(str::to_string)
    }

    /// Focus an element, dispatching blur/focus events.
    /// Returns false if the element does not exist or was already focused.
    pub fn focus(&self, id: &str) -> bool {
        let old = {
            let mut inner = self.write();
            if element::find_element(&inner.root, id).is_none() {
                log::warn!("[document] focus requested for missing element {}", id);
                return false;
            }
            let old = inner.focus.focused().map(str::to_string);
            if !inner.focus.focus(id) {
                return false;
            }
            old
        };
        self.announce_focus_change(old, Some(id.to_string()));
        true
    }

    /// Clear focus. Returns the element that lost it.
    pub fn blur(&self) -> Option<String> {
        let old = self.write().focus.blur();
        if let Some(old) = &old {
            self.dispatch(Event::Blur {
                target: old.clone(),
                new_target: None,
            });
        }
        old
    }

    /// Tab navigation. Returns the newly focused element.
    pub fn focus_next(&self) -> Option<String> {
        let (old, new) = {
            let mut inner = self.write();
            let old = inner.focus.focused().map(str::to_string);
            let Inner { root, focus, .. } = &mut *inner;
            (old, focus.focus_next(root)?)
        };
        self.announce_focus_change(old, Some(new.clone()));
        Some(new)
    }

    /// Shift+Tab navigation. Returns the newly focused element.
    pub fn focus_prev(&self) -> Option<String> {
        let (old, new) = {
            let mut inner = self.write();
            let old = inner.focus.focused().map(str::to_string);
            let Inner { root, focus, .. } = &mut *inner;
            (old, focus.focus_prev(root)?)
        };
        self.announce_focus_change(old, Some(new.clone()));
        Some(new)
    }

    fn announce_focus_change(&self, old: Option<String>, new: Option<String>) {
        log::debug!("[focus] {:?} -> {:?}", old, new);
        if let Some(old) = old {
            self.dispatch(Event::Blur {
                target: old,
                new_target: new.clone(),
            });
        }
        if let Some(new) = new {
            self.dispatch(Event::Focus { target: new });
        }
    }

    // =========================================================================
    // Listeners and handlers
    // =========================================================================

    /// Attach a document-level listener. Document listeners see every event
    /// of their kind before any element handler does.
    pub fn add_listener(
        &self,
        kind: EventKind,
        listener: impl Fn(&DomEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        self.add_shared_listener(kind, Arc::new(listener))
    }

    /// Like [`add_listener`](Self::add_listener) for a listener that is
    /// already shared, e.g. one attached for several event kinds.
    pub fn add_shared_listener(&self, kind: EventKind, listener: Listener) -> ListenerId {
        let mut inner = self.write();
        let id = ListenerId(inner.next_listener);
        inner.next_listener += 1;
        inner.listeners.push((id, kind, listener));
        log::debug!("[document] listener {:?} attached for {:?}", id, kind);
        id
    }

    /// Detach a listener. Returns false if it was not attached.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut inner = self.write();
        let before = inner.listeners.len();
        inner.listeners.retain(|(lid, _, _)| *lid != id);
        let removed = inner.listeners.len() != before;
        if removed {
            log::debug!("[document] listener {:?} detached", id);
        }
        removed
    }

    /// Number of document listeners attached for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.read()
            .listeners
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .count()
    }

    /// Bind an element handler, replacing any previous one of the same kind.
    pub fn bind(
        &self,
        id: impl Into<String>,
        kind: EventKind,
        handler: impl Fn(&DomEvent) + Send + Sync + 'static,
    ) {
        self.bind_shared(id, kind, Arc::new(handler));
    }

    /// Like [`bind`](Self::bind) for a handler that is already shared.
    pub fn bind_shared(&self, id: impl Into<String>, kind: EventKind, handler: Listener) {
        self.write().handlers.insert((id.into(), kind), handler);
    }

    pub fn unbind(&self, id: &str, kind: EventKind) -> bool {
        self.write()
            .handlers
            .remove(&(id.to_string(), kind))
            .is_some()
    }

    pub fn unbind_all(&self, id: &str) {
        self.write().handlers.retain(|(el, _), _| el != id);
    }

    pub fn has_handler(&self, id: &str, kind: EventKind) -> bool {
        self.read().handlers.contains_key(&(id.to_string(), kind))
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Allocate a fresh gesture ID.
    pub fn next_gesture(&self) -> GestureId {
        let mut inner = self.write();
        let id = GestureId(inner.next_gesture);
        inner.next_gesture += 1;
        id
    }

    /// Deliver an event: document listeners first, then element handlers
    /// from the target up to the root until propagation is stopped, then the
    /// default action unless it was prevented.
    pub fn dispatch(&self, event: Event) -> DomEvent {
        let kind = event.kind();
        let listeners: Vec<Listener> = self
            .read()
            .listeners
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, l)| Arc::clone(l))
            .collect();

        log::trace!(
            "[dispatch] {:?} target={:?} listeners={}",
            kind,
            event.target(),
            listeners.len()
        );

        let dom_event = DomEvent::new(event);
        for listener in &listeners {
            listener(&dom_event);
        }

        if let Some(target) = dom_event.target().map(str::to_string) {
            let path = element::path_to(&self.read().root, &target).unwrap_or_default();
            for id in path.iter().rev() {
                if dom_event.propagation_stopped() {
                    break;
                }
                let handler = self.read().handlers.get(&(id.clone(), kind)).cloned();
                if let Some(handler) = handler {
                    handler(&dom_event);
                }
            }
        }

        if !dom_event.default_prevented() {
            self.default_action(dom_event.event());
        }

        dom_event
    }

    fn default_action(&self, event: &Event) {
        match event {
            Event::Key { key: Key::Tab, .. } => {
                self.focus_next();
            }
            Event::Key {
                key: Key::BackTab, ..
            } => {
                self.focus_prev();
            }
            Event::PointerDown {
                target: Some(target),
                ..
            } => {
                // Focus the nearest focusable element under the pointer
                let focus_target = {
                    let inner = self.read();
                    element::path_to(&inner.root, target)
                        .unwrap_or_default()
                        .into_iter()
                        .rev()
                        .find(|id| {
                            element::find_element(&inner.root, id)
                                .is_some_and(|el| el.focusable && !el.disabled)
                        })
                };
                if let Some(id) = focus_target {
                    self.focus(&id);
                }
            }
            _ => {}
        }
    }

    /// Mouse press on `target` (`None` is empty space).
    pub fn pointer_down(&self, target: Option<&str>) -> DomEvent {
        let gesture = self.next_gesture();
        self.dispatch(Event::PointerDown {
            target: target.map(str::to_string),
            button: MouseButton::Left,
            gesture,
        })
    }

    /// A touch on `target`: a touch-start followed by the compatibility
    /// pointer-down, both carrying the same gesture ID.
    pub fn touch(&self, target: Option<&str>) -> Vec<DomEvent> {
        let gesture = self.next_gesture();
        let target = target.map(str::to_string);
        vec![
            self.dispatch(Event::TouchStart {
                target: target.clone(),
                gesture,
            }),
            self.dispatch(Event::PointerDown {
                target,
                button: MouseButton::Left,
                gesture,
            }),
        ]
    }

    /// A full left click on `target`: pointer-down then click, one gesture.
    /// Returns the click event.
    pub fn click(&self, target: Option<&str>) -> DomEvent {
        let gesture = self.next_gesture();
        let target = target.map(str::to_string);
        self.dispatch(Event::PointerDown {
            target: target.clone(),
            button: MouseButton::Left,
            gesture,
        });
        self.dispatch(Event::Click {
            target,
            button: MouseButton::Left,
            gesture,
        })
    }

    /// Scroll a container (`None` is the window).
    pub fn scroll(&self, target: Option<&str>) -> DomEvent {
        self.dispatch(Event::Scroll {
            target: target.map(str::to_string),
            delta_x: 0,
            delta_y: 1,
        })
    }

    /// Key press, targeted at the focused element.
    pub fn key_down(&self, key: Key, modifiers: Modifiers) -> DomEvent {
        let target = self.focused();
        self.dispatch(Event::Key {
            target,
            key,
            modifiers,
        })
    }

    // =========================================================================
    // Terminal input
    // =========================================================================

    /// Convert raw terminal events into targeted events using hit testing.
    /// The returned events still have to be passed to [`dispatch`](Self::dispatch).
    pub fn process_crossterm(&self, raw: &[CrosstermEvent], layout: &LayoutResult) -> Vec<Event> {
        let mut events = Vec::new();

        for raw_event in raw {
            match raw_event {
                CrosstermEvent::Key(key_event) => {
                    // Only process key press events (not release/repeat on some terminals)
                    if key_event.kind != KeyEventKind::Press {
                        continue;
                    }
                    events.push(Event::Key {
                        target: self.focused(),
                        key: key_event.code.into(),
                        modifiers: key_event.modifiers.into(),
                    });
                }

                CrosstermEvent::Mouse(mouse_event) => {
                    let x = mouse_event.column;
                    let y = mouse_event.row;

                    match mouse_event.kind {
                        MouseEventKind::Down(button) => {
                            let gesture = self.next_gesture();
                            // Presses target the topmost element, clickable or not
                            let target = self.with_root(|root| hit_test_any(layout, root, x, y));
                            self.write().pressed = Some((gesture, target.clone()));
                            events.push(Event::PointerDown {
                                target,
                                button: button.into(),
                                gesture,
                            });
                        }

                        MouseEventKind::Up(button) => {
                            let target = self.with_root(|root| hit_test_any(layout, root, x, y));
                            // A click needs press and release on the same element
                            if let Some((gesture, down_target)) = self.write().pressed.take() {
                                if down_target == target {
                                    events.push(Event::Click {
                                        target,
                                        button: button.into(),
                                        gesture,
                                    });
                                }
                            }
                        }

                        MouseEventKind::ScrollUp
                        | MouseEventKind::ScrollDown
                        | MouseEventKind::ScrollLeft
                        | MouseEventKind::ScrollRight => {
                            let (delta_x, delta_y) = match mouse_event.kind {
                                MouseEventKind::ScrollUp => (0, -1),
                                MouseEventKind::ScrollDown => (0, 1),
                                MouseEventKind::ScrollLeft => (-1, 0),
                                _ => (1, 0),
                            };
                            let target =
                                self.with_root(|root| hit_test_scrollable(layout, root, x, y));
                            events.push(Event::Scroll {
                                target,
                                delta_x,
                                delta_y,
                            });
                        }

                        _ => {}
                    }
                }

                _ => {}
            }
        }

        events
    }
}
