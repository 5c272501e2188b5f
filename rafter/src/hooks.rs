//! Hooks: per-render access to an instance's persistent slots.
//!
//! Hooks are positional. The n-th hook call of a render always maps to the
//! n-th slot, so a component must call the same hooks in the same order on
//! every render. Calling them conditionally is reported by
//! [`Instance::render`](crate::Instance::render).

use std::any::{Any, type_name};

use crate::callback::Callback;
use crate::error::RenderError;
use crate::instance::{InstanceId, Scheduler};
use crate::refs::Ref;
use crate::state::State;

/// Undo for an effect, run before the effect runs again and on unmount.
pub type Cleanup = Box<dyn FnOnce()>;

pub(crate) struct Slot {
    pub(crate) kind: &'static str,
    pub(crate) value: Box<dyn Any>,
}

pub(crate) struct PendingEffect {
    pub(crate) index: usize,
    pub(crate) effect: Box<dyn FnOnce() -> Option<Cleanup>>,
    /// Stores the new deps into the effect's slot. Only called on commit, so
    /// a failed render leaves the slot with the deps of the last run.
    pub(crate) record_deps: Box<dyn FnOnce(&mut dyn Any)>,
}

pub(crate) enum HookViolation {
    Order {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
    Count {
        expected: usize,
        found: usize,
    },
}

impl HookViolation {
    pub(crate) fn into_error(self, name: &'static str, instance: InstanceId) -> RenderError {
        match self {
            Self::Order {
                index,
                expected,
                found,
            } => RenderError::HookOrder {
                name,
                instance,
                index,
                expected,
                found,
            },
            Self::Count { expected, found } => RenderError::HookCountChanged {
                name,
                instance,
                expected,
                found,
            },
        }
    }
}

struct MemoSlot<D, T> {
    deps: Option<D>,
    value: Option<T>,
}

struct EffectSlot<D> {
    deps: Option<D>,
}

/// Handle passed to a component's render function.
pub struct Hooks<'a> {
    id: InstanceId,
    slots: &'a mut Vec<Slot>,
    cursor: usize,
    scheduler: &'a Scheduler,
    effects: &'a mut Vec<PendingEffect>,
    violation: &'a mut Option<HookViolation>,
}

impl<'a> Hooks<'a> {
    pub(crate) fn new(
        id: InstanceId,
        slots: &'a mut Vec<Slot>,
        scheduler: &'a Scheduler,
        effects: &'a mut Vec<PendingEffect>,
        violation: &'a mut Option<HookViolation>,
    ) -> Self {
        Self {
            id,
            slots,
            cursor: 0,
            scheduler,
            effects,
            violation,
        }
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    /// ID of the instance being rendered.
    pub fn instance_id(&self) -> InstanceId {
        self.id
    }

    /// The slot for the current hook call, created with `init` on first use.
    /// A slot holding another type means the hook order changed: the slot is
    /// recorded as a violation and re-initialised.
    fn slot<S: Any>(&mut self, init: impl FnOnce() -> S) -> (usize, &mut S) {
        let index = self.cursor;
        self.cursor += 1;
        let kind = type_name::<S>();

        match self.slots.get(index) {
            None => self.slots.push(Slot {
                kind,
                value: Box::new(init()),
            }),
            Some(slot) if !slot.value.is::<S>() => {
                if self.violation.is_none() {
                    *self.violation = Some(HookViolation::Order {
                        index,
                        expected: slot.kind,
                        found: kind,
                    });
                }
                self.slots[index] = Slot {
                    kind,
                    value: Box::new(init()),
                };
            }
            Some(_) => {}
        }

        let value = self.slots[index]
            .value
            .downcast_mut::<S>()
            .unwrap_or_else(|| unreachable!("hook slot {index} was just checked to hold {kind}"));
        (index, value)
    }

    /// State that survives re-renders. Writes schedule a re-render.
    pub fn use_state<T: 'static>(&mut self, initial: T) -> State<T> {
        self.use_state_with(|| initial)
    }

    /// Like [`use_state`](Self::use_state) with a lazily computed initial
    /// value. `init` runs on the first render only.
    pub fn use_state_with<T: 'static>(&mut self, init: impl FnOnce() -> T) -> State<T> {
        let scheduler = self.scheduler.clone();
        let (_, state) = self.slot(|| State::with_scheduler(init(), scheduler));
        state.clone()
    }

    /// A mutable cell that survives re-renders. Writes never schedule a
    /// re-render.
    pub fn use_ref<T: 'static>(&mut self, initial: T) -> Ref<T> {
        self.use_ref_with(|| initial)
    }

    pub fn use_ref_with<T: 'static>(&mut self, init: impl FnOnce() -> T) -> Ref<T> {
        let (_, cell) = self.slot(|| Ref::new(init()));
        cell.clone()
    }

    /// Recompute `compute` only when `deps` differ from the previous render.
    pub fn use_memo<D, T>(&mut self, deps: D, compute: impl FnOnce() -> T) -> T
    where
        D: PartialEq + 'static,
        T: Clone + 'static,
    {
        let mut compute = Some(compute);
        let mut deps = Some(deps);
        let (_, memo) = self.slot(|| {
            let value = compute.take().map(|f| f());
            MemoSlot {
                deps: deps.take(),
                value,
            }
        });

        if let Some(deps) = deps {
            if memo.deps.as_ref() != Some(&deps) {
                memo.deps = Some(deps);
                memo.value = compute.take().map(|f| f());
            }
        }

        match &memo.value {
            Some(value) => value.clone(),
            None => unreachable!("memo slot always holds a value after its first render"),
        }
    }

    /// A callback whose identity is kept while `deps` are unchanged.
    pub fn use_callback<D, A>(
        &mut self,
        deps: D,
        f: impl Fn(A) + Send + Sync + 'static,
    ) -> Callback<A>
    where
        D: PartialEq + 'static,
        A: 'static,
    {
        self.use_memo(deps, || Callback::new(f))
    }

    /// Run `effect` after this render commits, when `deps` changed since the
    /// last time it ran. The cleanup it returns runs before the next run and
    /// on unmount.
    pub fn use_effect<D>(
        &mut self,
        deps: D,
        effect: impl FnOnce() -> Option<Cleanup> + 'static,
    ) where
        D: PartialEq + 'static,
    {
        let (index, slot) = self.slot(|| EffectSlot::<D> { deps: None });
        if slot.deps.as_ref() == Some(&deps) {
            return;
        }
        self.effects.push(PendingEffect {
            index,
            effect: Box::new(effect),
            record_deps: Box::new(move |value: &mut dyn Any| {
                if let Some(slot) = value.downcast_mut::<EffectSlot<D>>() {
                    slot.deps = Some(deps);
                }
            }),
        });
    }
}
