use std::cell::Cell;

/// Identifies one physical user gesture. Every event produced by the same
/// gesture (a touch and its compatibility pointer-down, a pointer-down and
/// the click that follows it) carries the same gesture ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GestureId(pub u64);

/// High-level events with element targeting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Mouse button pressed
    PointerDown {
        target: Option<String>,
        button: MouseButton,
        gesture: GestureId,
    },
    /// Touch started
    TouchStart {
        target: Option<String>,
        gesture: GestureId,
    },
    /// Mouse click (press and release)
    Click {
        target: Option<String>,
        button: MouseButton,
        gesture: GestureId,
    },
    /// Scroll of a scroll container. `target: None` is the window.
    Scroll {
        target: Option<String>,
        delta_x: i16,
        delta_y: i16,
    },
    /// Key press event, targeted at focused element
    Key {
        target: Option<String>,
        key: Key,
        modifiers: Modifiers,
    },
    /// Element gained focus
    Focus { target: String },
    /// Element lost focus
    Blur {
        target: String,
        new_target: Option<String>,
    },
}

/// Event discriminant, used to register listeners and handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerDown,
    TouchStart,
    Click,
    Scroll,
    Key,
    Focus,
    Blur,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PointerDown { .. } => EventKind::PointerDown,
            Self::TouchStart { .. } => EventKind::TouchStart,
            Self::Click { .. } => EventKind::Click,
            Self::Scroll { .. } => EventKind::Scroll,
            Self::Key { .. } => EventKind::Key,
            Self::Focus { .. } => EventKind::Focus,
            Self::Blur { .. } => EventKind::Blur,
        }
    }

    /// The element the event is aimed at, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::PointerDown { target, .. }
            | Self::TouchStart { target, .. }
            | Self::Click { target, .. }
            | Self::Scroll { target, .. }
            | Self::Key { target, .. } => target.as_deref(),
            Self::Focus { target } | Self::Blur { target, .. } => Some(target),
        }
    }

    pub fn gesture(&self) -> Option<GestureId> {
        match self {
            Self::PointerDown { gesture, .. }
            | Self::TouchStart { gesture, .. }
            | Self::Click { gesture, .. } => Some(*gesture),
            _ => None,
        }
    }

    /// Key and modifiers for key events.
    pub fn key(&self) -> Option<(Key, Modifiers)> {
        match self {
            Self::Key { key, modifiers, .. } => Some((*key, *modifiers)),
            _ => None,
        }
    }
}

/// An event in flight through the document.
///
/// Listeners and handlers receive a shared reference and flag the event
/// through [`prevent_default`](Self::prevent_default) and
/// [`stop_propagation`](Self::stop_propagation).
#[derive(Debug)]
pub struct DomEvent {
    event: Event,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl DomEvent {
    pub fn new(event: Event) -> Self {
        Self {
            event,
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
        }
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn kind(&self) -> EventKind {
        self.event.kind()
    }

    pub fn target(&self) -> Option<&str> {
        self.event.target()
    }

    /// Suppress the document's default action for this event.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    /// Stop the event from bubbling to further ancestors.
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }

    pub fn into_event(self) -> Event {
        self.event
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

// Conversion from crossterm types
impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Char('\0'), // Placeholder for unsupported keys
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}
