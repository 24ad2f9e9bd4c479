//! Transition strategy contract

use freetab_scene::{NodeId, SceneTree};

use crate::Result;

/// Visual behavior applied to a view's root node when it is initialized,
/// shown and hidden.
///
/// One strategy instance may serve many views. Any per-view state must be
/// keyed by the view's [`NodeId`] so that views never interfere with each
/// other. Implementations must not block: anything that takes time is
/// started here and completed later by the host's frame loop.
pub trait TransitionStrategy: Send + Sync {
    /// Put the view in its default visual state.
    fn init(&self, scene: &SceneTree, view: NodeId) -> Result<()>;

    /// Start making the view visible.
    fn show(&self, scene: &SceneTree, view: NodeId) -> Result<()>;

    /// Start making the view invisible.
    fn hide(&self, scene: &SceneTree, view: NodeId) -> Result<()>;

    /// Short name used in log lines
    fn name(&self) -> &'static str;
}
