//! Instant transition

use freetab_scene::{NodeId, SceneTree};

use crate::strategy::TransitionStrategy;
use crate::Result;

/// Shows and hides a view immediately, with no animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoneTransition;

impl TransitionStrategy for NoneTransition {
    fn init(&self, _scene: &SceneTree, _view: NodeId) -> Result<()> {
        Ok(())
    }

    fn show(&self, scene: &SceneTree, view: NodeId) -> Result<()> {
        Ok(scene.set_visible(view, true)?)
    }

    fn hide(&self, scene: &SceneTree, view: NodeId) -> Result<()> {
        Ok(scene.set_visible(view, false)?)
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instant_visibility() {
        let scene = SceneTree::new();
        let view = scene.create_node("view");
        let transition = NoneTransition;

        transition.init(&scene, view).unwrap();
        assert!(scene.is_visible(view).unwrap());

        transition.hide(&scene, view).unwrap();
        assert!(!scene.is_visible(view).unwrap());

        transition.show(&scene, view).unwrap();
        assert!(scene.is_visible(view).unwrap());
        assert_eq!(scene.opacity(view).unwrap(), 1.0);
    }

    #[test]
    fn test_missing_node_is_an_error() {
        let scene = SceneTree::new();
        let view = scene.create_node("view");
        scene.free(view).unwrap();

        assert!(NoneTransition.show(&scene, view).is_err());
    }
}
