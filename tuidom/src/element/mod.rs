mod content;
mod node;

pub use content::Content;
pub use node::Element;

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    for child in root.content.children() {
        if let Some(found) = find_element(child, id) {
            return Some(found);
        }
    }

    None
}

/// Path of element IDs from the root down to `id`, inclusive.
/// Returns None if `id` is not in the tree.
pub fn path_to(root: &Element, id: &str) -> Option<Vec<String>> {
    let mut path = Vec::new();
    if path_to_recursive(root, id, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn path_to_recursive(element: &Element, id: &str, path: &mut Vec<String>) -> bool {
    path.push(element.id.clone());
    if element.id == id {
        return true;
    }
    for child in element.content.children() {
        if path_to_recursive(child, id, path) {
            return true;
        }
    }
    path.pop();
    false
}

/// Whether `id` is `ancestor` itself or one of its descendants.
pub fn contains(root: &Element, ancestor: &str, id: &str) -> bool {
    find_element(root, ancestor)
        .map(|el| find_element(el, id).is_some())
        .unwrap_or(false)
}

/// Remove the element with `id` (and its subtree) from the tree.
/// Returns the removed element. The root itself cannot be removed.
pub fn remove_element(root: &mut Element, id: &str) -> Option<Element> {
    let Content::Children(children) = &mut root.content else {
        return None;
    };

    if let Some(idx) = children.iter().position(|child| child.id == id) {
        return Some(children.remove(idx));
    }

    children
        .iter_mut()
        .find_map(|child| remove_element(child, id))
}
