pub mod document;
pub mod element;
pub mod event;
pub mod focus;
pub mod hit;
pub mod layout;

pub use document::{Document, Listener, ListenerId};
pub use element::Element;
pub use event::{DomEvent, Event, EventKind, GestureId, Key, Modifiers, MouseButton};
pub use focus::{collect_focusable, collect_focusable_within, FocusState};
pub use hit::{hit_test, hit_test_any, hit_test_scrollable};
pub use layout::{LayoutResult, Rect};
