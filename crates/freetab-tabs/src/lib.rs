//! FreeTab Tab Controller
//!
//! Shows exactly one of a fixed set of views at a time, each bound to a
//! selector button. Selection follows a small state machine:
//!
//! ```text
//! Unselected ──show(j) / show_next / show_previous──▶ Selected(i)
//! Selected(i) ──show(j)──▶ Selected(j)      (hide i, then show j)
//! ```
//!
//! There is no terminal state; the machine lives as long as the controller.

mod button;
mod controller;
mod error;
mod events;
mod state;

pub use button::{ButtonGroup, CheckButton, SelectorButton};
pub use controller::{TabController, TabInstanceSetup, TabTemplateSetup, ViewTemplate};
pub use error::TabError;
pub use events::{ArgumentResolver, ObserverId, ViewEvent};
pub use state::Selection;

pub type Result<T> = std::result::Result<T, TabError>;
