//! FreeTab Views
//!
//! A view is any type implementing [`ViewLifecycle`]. It is wrapped in a
//! [`ViewItem`] together with its root node and transition strategy; the
//! item is what a tab controller drives.
//!
//! Hooks are user code and may fail or panic. Every hook call goes through
//! [`run_protected`], which logs the fault and lets the caller carry on.
//! Passing an argument of the wrong type to a view is a programming error
//! and is reported as [`ViewError::ArgumentType`] instead.

mod argument;
mod error;
mod invoke;
mod item;
mod lifecycle;

pub use argument::OptionalArg;
pub use error::ViewError;
pub use invoke::{run_protected, run_protected_with, CallbackFault, FaultKind};
pub use item::{ViewItem, ViewState};
pub use lifecycle::{Notification, ViewLifecycle};

pub type Result<T> = std::result::Result<T, ViewError>;
