//! References to mounted elements.

use rafter::{Callback, Hooks, Ref};

/// Receives the element ID when a component's container is attached
/// (`Some(id)`) or detached (`None`).
pub type RefCallback = Callback<Option<String>>;

/// The ID of the element a component is attached to, if any.
///
/// Clones share the same cell. Equality is identity.
#[derive(Clone, Default, Debug)]
pub struct ElementRef(Ref<Option<String>>);

impl ElementRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<String> {
        self.0.get()
    }

    pub fn is_attached(&self) -> bool {
        self.0.with(Option::is_some)
    }

    pub fn set(&self, id: Option<String>) {
        self.0.set(id);
    }

    /// A ref callback that forwards to this ref.
    pub fn callback(&self) -> RefCallback {
        Self::merge([self.clone()])
    }

    /// A ref callback that sets every given ref to the same element.
    pub fn merge(refs: impl IntoIterator<Item = ElementRef>) -> RefCallback {
        let refs: Vec<ElementRef> = refs.into_iter().collect();
        Callback::new(move |id: Option<String>| {
            for element_ref in &refs {
                element_ref.set(id.clone());
            }
        })
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

impl PartialEq for ElementRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ElementRef {}

pub trait UseMergedRef {
    /// A ref callback feeding all `refs`, kept stable while the same refs
    /// are passed.
    fn use_merged_ref(&mut self, refs: Vec<ElementRef>) -> RefCallback;
}

impl UseMergedRef for Hooks<'_> {
    fn use_merged_ref(&mut self, refs: Vec<ElementRef>) -> RefCallback {
        let merged = refs.clone();
        self.use_memo(refs, move || ElementRef::merge(merged))
    }
}
