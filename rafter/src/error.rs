//! Render errors.

use thiserror::Error;

use crate::instance::InstanceId;

/// Errors returned by [`Instance::render`](crate::Instance::render).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A hook slot was reached by a different kind of hook than on the
    /// previous render.
    #[error("Component '{name}' ({instance}) hook #{index} changed from {expected} to {found}")]
    HookOrder {
        name: &'static str,
        instance: InstanceId,
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// The render called a different number of hooks than the previous one.
    #[error("Component '{name}' ({instance}) rendered {found} hooks, expected {expected}")]
    HookCountChanged {
        name: &'static str,
        instance: InstanceId,
        expected: usize,
        found: usize,
    },

    /// The instance was unmounted.
    #[error("Component '{name}' ({instance}) is unmounted")]
    Unmounted {
        name: &'static str,
        instance: InstanceId,
    },
}
