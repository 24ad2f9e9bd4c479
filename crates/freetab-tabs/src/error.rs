//! Tab controller error types
//!
//! Every variant signals a programming or configuration mistake. Faults
//! raised inside view hooks never show up here; they are logged and
//! absorbed where the hook runs.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TabError {
    #[error("A tab controller needs at least one view")]
    EmptyViewSet,

    #[error("Got {views} views but {buttons} buttons")]
    LengthMismatch { views: usize, buttons: usize },

    #[error("View index {index} out of range (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("View error: {0}")]
    View(#[from] freetab_view::ViewError),

    #[error("Scene error: {0}")]
    Scene(#[from] freetab_scene::SceneError),
}
