//! Component runtime: mounted instances and the hooks their render
//! functions use to keep state between renders.

pub mod callback;
pub mod config;
pub mod error;
pub mod hooks;
pub mod instance;
pub mod refs;
pub mod state;

pub use callback::Callback;
pub use config::InstanceConfig;
pub use error::RenderError;
pub use hooks::{Cleanup, Hooks};
pub use instance::{Instance, InstanceId, Scheduler};
pub use refs::Ref;
pub use state::{State, Update};

pub mod prelude {
    pub use crate::callback::Callback;
    pub use crate::config::InstanceConfig;
    pub use crate::error::RenderError;
    pub use crate::hooks::{Cleanup, Hooks};
    pub use crate::instance::Instance;
    pub use crate::refs::Ref;
    pub use crate::state::{State, Update};
}
