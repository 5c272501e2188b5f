use std::fmt;
use std::sync::Arc;

/// A shareable function with pointer identity.
///
/// Two callbacks are equal only if they are clones of the same allocation,
/// which makes them usable as memo and effect dependencies.
pub struct Callback<A = ()> {
    f: Arc<dyn Fn(A) + Send + Sync>,
}

impl<A> Callback<A> {
    pub fn new(f: impl Fn(A) + Send + Sync + 'static) -> Self {
        Self { f: Arc::new(f) }
    }

    pub fn call(&self, arg: impl Into<A>) {
        (self.f)(arg.into())
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl Callback<()> {
    /// Call a callback that takes no argument.
    pub fn emit(&self) {
        (self.f)(())
    }
}

impl<A> Clone for Callback<A> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<A> PartialEq for Callback<A> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<A> Eq for Callback<A> {}

impl<A> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Arc::as_ptr(&self.f))
    }
}
