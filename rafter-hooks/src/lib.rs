//! Behavioral hooks for rafter components.
//!
//! - [`UseToggle`]: a boolean flag with stable enable/disable/toggle
//!   operations.
//! - [`UseMenu`]: dropdown/menu behavior. Dismissal on outside clicks and
//!   scrolls, close-on-click, and arrow-key focus movement between items.
//!
//! Hooks are extension traits on [`rafter::Hooks`], so they are called like
//! the built-in ones:
//!
//! ```ignore
//! use rafter_hooks::prelude::*;
//!
//! let mut menu = Instance::new(move |hooks: &mut Hooks<'_>, open: &bool| {
//!     let toggle = hooks.use_toggle(false);
//!     hooks.use_menu(&doc, MenuOptions::new(toggle.disable.clone()).visible(*open))
//! });
//! ```

pub mod element_ref;
pub mod latest;
pub mod menu;
pub mod toggle;

pub use element_ref::{ElementRef, RefCallback, UseMergedRef};
pub use latest::UseLatest;
pub use menu::{EventHandler, MenuHandlers, MenuOptions, UseMenu};
pub use toggle::{Toggle, UseToggle};

pub mod prelude {
    pub use crate::element_ref::{ElementRef, RefCallback, UseMergedRef};
    pub use crate::latest::UseLatest;
    pub use crate::menu::{EventHandler, MenuHandlers, MenuOptions, UseMenu};
    pub use crate::toggle::{Toggle, UseToggle};
    pub use rafter::prelude::*;
}
