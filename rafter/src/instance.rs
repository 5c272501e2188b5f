//! Mounted component instances.
//!
//! An [`Instance`] owns everything a component keeps between renders: its
//! hook slots, the cleanups of effects that have run, and the scheduler its
//! state cells use to request a re-render.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use log::{debug, trace, warn};
use uuid::Uuid;

use crate::config::InstanceConfig;
use crate::error::RenderError;
use crate::hooks::{Cleanup, HookViolation, Hooks, PendingEffect, Slot};

/// Unique identifier for a mounted component instance.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct InstanceId(Uuid);

impl InstanceId {
    /// Create a new unique instance ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Re-render requests for one instance.
///
/// Cloned into every state cell the instance hands out. Each request bumps
/// the update counter, so callers can tell a no-op from a real write.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    dirty: Arc<AtomicBool>,
    updates: Arc<AtomicU64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a re-render.
    pub fn schedule(&self) {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Check if a re-render has been requested since the last render
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    /// Total number of re-render requests.
    pub fn updates(&self) -> u64 {
        self.updates.load(Ordering::SeqCst)
    }
}

type RenderFn<P, O> = Box<dyn Fn(&mut Hooks<'_>, &P) -> O>;

/// A mounted component: a render function plus the state its hooks keep.
///
/// Dropping an instance unmounts it, so effect cleanups run on every exit
/// path.
pub struct Instance<P, O> {
    id: InstanceId,
    config: InstanceConfig,
    render: RenderFn<P, O>,
    slots: Vec<Slot>,
    cleanups: BTreeMap<usize, Cleanup>,
    scheduler: Scheduler,
    renders: u64,
    mounted: bool,
}

impl<P, O> fmt::Debug for Instance<P, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("id", &self.id)
            .field("name", &self.config.name)
            .field("slots", &self.slots.len())
            .field("renders", &self.renders)
            .field("mounted", &self.mounted)
            .finish()
    }
}

impl<P, O> Instance<P, O> {
    /// Mount a component with the default config.
    pub fn new(render: impl Fn(&mut Hooks<'_>, &P) -> O + 'static) -> Self {
        Self::with_config(InstanceConfig::default(), render)
    }

    pub fn with_config(
        config: InstanceConfig,
        render: impl Fn(&mut Hooks<'_>, &P) -> O + 'static,
    ) -> Self {
        let id = InstanceId::new();
        debug!("Mounted component '{}' ({})", config.name, id);
        Self {
            id,
            config,
            render: Box::new(render),
            slots: Vec::new(),
            cleanups: BTreeMap::new(),
            scheduler: Scheduler::new(),
            renders: 0,
            mounted: true,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn config(&self) -> &InstanceConfig {
        &self.config
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether a re-render has been requested since the last render.
    pub fn is_dirty(&self) -> bool {
        self.scheduler.is_dirty()
    }

    /// Drop a pending re-render request without rendering.
    pub fn clear_dirty(&self) {
        self.scheduler.clear_dirty();
    }

    /// Total number of re-render requests made by this instance's state.
    pub fn updates(&self) -> u64 {
        self.scheduler.updates()
    }

    /// Number of completed renders.
    pub fn renders(&self) -> u64 {
        self.renders
    }

    /// Run the render function, then commit the effects whose dependencies
    /// changed.
    pub fn render(&mut self, props: &P) -> Result<O, RenderError> {
        if !self.mounted {
            return Err(RenderError::Unmounted {
                name: self.config.name,
                instance: self.id,
            });
        }

        trace!("Rendering '{}' ({}) #{}", self.config.name, self.id, self.renders);
        self.scheduler.clear_dirty();

        let first_render = self.renders == 0;
        let expected_hooks = self.slots.len();
        let mut effects: Vec<PendingEffect> = Vec::new();
        let mut violation: Option<HookViolation> = None;

        let (output, cursor) = {
            let mut hooks = Hooks::new(
                self.id,
                &mut self.slots,
                &self.scheduler,
                &mut effects,
                &mut violation,
            );
            let output = (self.render)(&mut hooks, props);
            (output, hooks.cursor())
        };

        if !first_render && cursor != expected_hooks && violation.is_none() {
            violation = Some(HookViolation::Count {
                expected: expected_hooks,
                found: cursor,
            });
        }

        // Hooks that were not called this render are gone
        if self.slots.len() > cursor {
            self.run_cleanups_from(cursor);
            self.slots.truncate(cursor);
        }

        self.renders += 1;

        if let Some(violation) = violation {
            let error = violation.into_error(self.config.name, self.id);
            if self.config.strict_hooks {
                return Err(error);
            }
            warn!("{}", error);
        }

        self.commit(effects);
        Ok(output)
    }

    /// Render only if a re-render has been requested.
    pub fn render_if_dirty(&mut self, props: &P) -> Result<Option<O>, RenderError> {
        if self.is_dirty() {
            self.render(props).map(Some)
        } else {
            Ok(None)
        }
    }

    fn commit(&mut self, effects: Vec<PendingEffect>) {
        // All stale cleanups run before any new effect
        for pending in &effects {
            if let Some(cleanup) = self.cleanups.remove(&pending.index) {
                cleanup();
            }
        }
        for pending in effects {
            if let Some(slot) = self.slots.get_mut(pending.index) {
                (pending.record_deps)(slot.value.as_mut());
            }
            if let Some(cleanup) = (pending.effect)() {
                self.cleanups.insert(pending.index, cleanup);
            }
        }
    }

    fn run_cleanups_from(&mut self, index: usize) {
        let stale = self.cleanups.split_off(&index);
        for (_, cleanup) in stale {
            cleanup();
        }
    }

    /// Unmount: run every outstanding effect cleanup and drop all hook
    /// state. Rendering afterwards fails with [`RenderError::Unmounted`].
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.run_cleanups_from(0);
        self.slots.clear();
        debug!("Unmounted component '{}' ({})", self.config.name, self.id);
    }

    /// Hook state slots, for diagnostics.
    pub fn hook_kinds(&self) -> Vec<&'static str> {
        self.slots.iter().map(|slot| slot.kind).collect()
    }
}

impl<P, O> Drop for Instance<P, O> {
    fn drop(&mut self) {
        self.unmount();
    }
}
