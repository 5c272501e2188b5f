mod rect;

use std::collections::HashMap;

pub use rect::Rect;

/// Element ID to on-screen rectangle, as produced by whatever lays out
/// the tree. Only consulted for hit testing.
pub type LayoutResult = HashMap<String, Rect>;
