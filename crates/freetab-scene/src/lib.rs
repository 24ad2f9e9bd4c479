//! FreeTab Scene
//!
//! The rendering nodes a tab view drives. Nodes live in an arena owned by
//! [`NodeTree`]; [`SceneTree`] is the shared handle the rest of the
//! workspace passes around.

mod error;
mod interactivity;
mod node;
mod tree;

pub use error::SceneError;
pub use interactivity::{CachedControl, InteractivityCache};
pub use node::{Control, FocusMode, MouseFilter, Node, NodeId};
pub use tree::{NodeTree, SceneTree};

pub type Result<T> = std::result::Result<T, SceneError>;
