//! A boolean flag with stable operations.

use log::trace;
use rafter::{Callback, Hooks, State, Update};

/// Operations returned by [`UseToggle`].
///
/// The four callbacks are created on the first render and handed out
/// unchanged afterwards, so they can be used as memo or effect dependencies.
/// They read the flag through the shared state cell at call time, never
/// through a copy captured when they were created.
#[derive(Clone, Debug)]
pub struct Toggle {
    /// The flag as of this render.
    pub value: bool,
    /// Set the flag. No update is scheduled if it is already set.
    pub enable: Callback,
    /// Clear the flag. No update is scheduled if it is already clear.
    pub disable: Callback,
    /// Flip the flag.
    pub toggle: Callback,
    /// Set the flag to a value, or to the result of an updater applied to
    /// the current value.
    pub set_toggle: Callback<Update<bool>>,
}

impl Toggle {
    /// `(value, enable, disable, toggle, set_toggle)`
    pub fn into_parts(self) -> (bool, Callback, Callback, Callback, Callback<Update<bool>>) {
        (
            self.value,
            self.enable,
            self.disable,
            self.toggle,
            self.set_toggle,
        )
    }
}

#[derive(Clone)]
struct ToggleOps {
    enable: Callback,
    disable: Callback,
    toggle: Callback,
    set_toggle: Callback<Update<bool>>,
}

impl ToggleOps {
    fn new(flag: State<bool>) -> Self {
        let enable = {
            let flag = flag.clone();
            Callback::new(move |()| {
                if flag.apply(true) {
                    trace!("toggle enabled");
                }
            })
        };
        let disable = {
            let flag = flag.clone();
            Callback::new(move |()| {
                if flag.apply(false) {
                    trace!("toggle disabled");
                }
            })
        };
        let toggle = {
            let flag = flag.clone();
            Callback::new(move |()| flag.update(|value| *value = !*value))
        };
        let set_toggle = Callback::new(move |next: Update<bool>| {
            flag.apply(next);
        });

        Self {
            enable,
            disable,
            toggle,
            set_toggle,
        }
    }
}

pub trait UseToggle {
    /// A flag starting at `initial`.
    fn use_toggle(&mut self, initial: bool) -> Toggle;

    /// A flag whose initial value is computed by `init`, which runs on the
    /// first render only.
    fn use_toggle_with(&mut self, init: impl FnOnce() -> bool) -> Toggle;
}

impl UseToggle for Hooks<'_> {
    fn use_toggle(&mut self, initial: bool) -> Toggle {
        self.use_toggle_with(|| initial)
    }

    fn use_toggle_with(&mut self, init: impl FnOnce() -> bool) -> Toggle {
        let flag = self.use_state_with(init);
        let value = flag.get();
        let ops = self.use_memo((), move || ToggleOps::new(flag));

        Toggle {
            value,
            enable: ops.enable,
            disable: ops.disable,
            toggle: ops.toggle,
            set_toggle: ops.set_toggle,
        }
    }
}
