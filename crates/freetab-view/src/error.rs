//! View error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("View {view} expects an argument of type {expected}, got {found}")]
    ArgumentType {
        view: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Scene error: {0}")]
    Scene(#[from] freetab_scene::SceneError),
}
