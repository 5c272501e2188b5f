use crate::element::{find_element, Element};

/// Tracks which element is currently focused.
#[derive(Debug, Default, Clone)]
pub struct FocusState {
    focused: Option<String>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently focused element ID.
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Programmatically focus an element by ID.
    /// Returns true if focus changed.
    pub fn focus(&mut self, id: &str) -> bool {
        if self.focused.as_deref() == Some(id) {
            return false;
        }
        self.focused = Some(id.to_string());
        true
    }

    /// Clear focus.
    /// Returns the element that lost focus, if any.
    pub fn blur(&mut self) -> Option<String> {
        self.focused.take()
    }

    /// Focus the next focusable element (Tab navigation).
    /// Returns the newly focused element ID if focus changed.
    pub fn focus_next(&mut self, root: &Element) -> Option<String> {
        let focusable = collect_focusable(root);
        let next = next_in(&focusable, self.focused.as_deref())?;
        self.focus(&next).then_some(next)
    }

    /// Focus the previous focusable element (Shift+Tab navigation).
    /// Returns the newly focused element ID if focus changed.
    pub fn focus_prev(&mut self, root: &Element) -> Option<String> {
        let focusable = collect_focusable(root);
        let prev = prev_in(&focusable, self.focused.as_deref())?;
        self.focus(&prev).then_some(prev)
    }
}

/// The entry after `current`, wrapping. The first entry when `current` is
/// absent from the list.
pub fn next_in(ids: &[String], current: Option<&str>) -> Option<String> {
    if ids.is_empty() {
        return None;
    }
    let idx = current.and_then(|c| ids.iter().position(|id| id == c));
    let next = match idx {
        Some(i) => (i + 1) % ids.len(),
        None => 0,
    };
    Some(ids[next].clone())
}

/// The entry before `current`, wrapping. The last entry when `current` is
/// absent from the list.
pub fn prev_in(ids: &[String], current: Option<&str>) -> Option<String> {
    if ids.is_empty() {
        return None;
    }
    let idx = current.and_then(|c| ids.iter().position(|id| id == c));
    let prev = match idx {
        Some(0) | None => ids.len() - 1,
        Some(i) => i - 1,
    };
    Some(ids[prev].clone())
}

/// Collect all focusable, enabled element IDs in tree order.
pub fn collect_focusable(element: &Element) -> Vec<String> {
    let mut result = Vec::new();
    collect_focusable_recursive(element, &mut result);
    result
}

/// Collect focusable descendants of the element `container_id`, excluding
/// the container itself. Empty if the container is not in the tree.
pub fn collect_focusable_within(root: &Element, container_id: &str) -> Vec<String> {
    let Some(container) = find_element(root, container_id) else {
        return Vec::new();
    };
    let mut result = Vec::new();
    for child in container.content.children() {
        collect_focusable_recursive(child, &mut result);
    }
    result
}

fn collect_focusable_recursive(element: &Element, result: &mut Vec<String>) {
    // Disabled subtrees are skipped entirely
    if element.disabled {
        return;
    }
    if element.focusable {
        result.push(element.id.clone());
    }
    for child in element.content.children() {
        collect_focusable_recursive(child, result);
    }
}
