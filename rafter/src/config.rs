//! Instance configuration.

/// Per-instance configuration.
#[derive(Debug, Clone)]
pub struct InstanceConfig {
    /// Display name, used in logs and errors.
    pub name: &'static str,

    /// If true, a render that calls hooks in a different order or number
    /// than the previous one fails with a `RenderError`. If false, the
    /// mismatch is logged and the affected slots are re-initialised.
    pub strict_hooks: bool,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            name: "Component",
            strict_hooks: true,
        }
    }
}

impl InstanceConfig {
    /// Create a new config with the given name.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// Log hook order mismatches instead of failing the render.
    pub fn lenient(mut self) -> Self {
        self.strict_hooks = false;
        self
    }
}
