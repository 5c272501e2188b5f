use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::instance::Scheduler;

/// Reactive state owned by a component instance.
///
/// `State<T>` is a shared cell: every clone reads and writes the same
/// value, so a callback created on the first render still sees the value
/// written by the latest one. Writes schedule a re-render of the owning
/// instance.
///
/// # Example
///
/// ```ignore
/// let count = hooks.use_state(0);
/// let increment = hooks.use_callback((), {
///     let count = count.clone();
///     move |()| count.update(|v| *v += 1)
/// });
/// ```
pub struct State<T> {
    inner: Arc<RwLock<T>>,
    scheduler: Scheduler,
}

impl<T> State<T> {
    /// Create a detached state. Writes bump its own scheduler only.
    pub fn new(value: T) -> Self {
        Self::with_scheduler(value, Scheduler::new())
    }

    pub(crate) fn with_scheduler(value: T, scheduler: Scheduler) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
            scheduler,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, T> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.read().clone()
    }

    /// Read the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.read())
    }

    /// Set a new value and schedule a re-render.
    pub fn set(&self, value: T) {
        *self.write() = value;
        self.scheduler.schedule();
    }

    /// Update the value in place and schedule a re-render.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        f(&mut *self.write());
        self.scheduler.schedule();
    }

    /// Apply a value or an updater under one write lock. A re-render is
    /// scheduled only if the value changed. Returns whether it did.
    pub fn apply(&self, update: impl Into<Update<T>>) -> bool
    where
        T: PartialEq,
    {
        let changed = {
            let mut guard = self.write();
            let next = match update.into() {
                Update::Value(value) => value,
                Update::With(f) => f(&*guard),
            };
            let changed = *guard != next;
            *guard = next;
            changed
        };
        if changed {
            self.scheduler.schedule();
        }
        changed
    }

    /// Whether both handles point at the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            scheduler: self.scheduler.clone(),
        }
    }
}

impl<T: Default> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("State").field(&*self.read()).finish()
    }
}

/// The next value for a [`State`]: either the value itself or a function
/// from the previous value.
pub enum Update<T> {
    Value(T),
    With(Box<dyn FnOnce(&T) -> T + Send>),
}

impl<T> Update<T> {
    /// An updater computing the next value from the previous one.
    pub fn with(f: impl FnOnce(&T) -> T + Send + 'static) -> Self {
        Self::With(Box::new(f))
    }
}

impl<T> From<T> for Update<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Update<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::With(_) => write!(f, "With(..)"),
        }
    }
}
