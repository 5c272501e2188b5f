//! A ref that always holds the value from the latest render.

use rafter::{Hooks, Ref};

pub trait UseLatest {
    /// A ref holding `value` as of the latest render.
    ///
    /// Listeners attached once (in an effect) read through it to reach the
    /// current props instead of the ones captured when they were attached.
    fn use_latest<T: Clone + 'static>(&mut self, value: T) -> Ref<T>;
}

impl UseLatest for Hooks<'_> {
    fn use_latest<T: Clone + 'static>(&mut self, value: T) -> Ref<T> {
        let latest = self.use_ref_with(|| value.clone());
        latest.set(value);
        latest
    }
}
