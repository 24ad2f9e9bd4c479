//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Scene error: {0}")]
    Scene(#[from] freetab_scene::SceneError),

    #[error("Transition error: {0}")]
    Transition(#[from] freetab_transition::TransitionError),

    #[error("View error: {0}")]
    View(#[from] freetab_view::ViewError),

    #[error("Tab error: {0}")]
    Tab(#[from] freetab_tabs::TabError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No tabs mounted on this host")]
    NotMounted,
}
