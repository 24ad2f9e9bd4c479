//! Transition error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Scene error: {0}")]
    Scene(#[from] freetab_scene::SceneError),

    #[error("View {view} belongs to a different scene than the animator")]
    ForeignScene { view: freetab_scene::NodeId },
}
