//! Opacity fade transition

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use freetab_scene::{InteractivityCache, NodeId, SceneTree};

use crate::animator::{linear, Animator, EasingFn, TweenId};
use crate::error::TransitionError;
use crate::strategy::TransitionStrategy;
use crate::Result;

/// Default fade time.
pub const DEFAULT_FADE_DURATION: Duration = Duration::from_millis(100);

/// Fades views between transparent and opaque.
///
/// Each view has at most one running fade. Showing or hiding a view whose
/// fade is still in flight kills that fade and starts over from the current
/// opacity, so only the most recent call ever applies its end state.
///
/// Unless built with [`FadeTransition::without_interactivity_toggle`], a
/// hiding view also loses focus and pointer input for the whole fade-out,
/// and gets back exactly its previous input settings when shown again.
pub struct FadeTransition {
    animator: Animator,
    duration: Duration,
    easing: EasingFn,
    toggle_interactivity: bool,
    running: Arc<Mutex<HashMap<NodeId, TweenId>>>,
    caches: Mutex<HashMap<NodeId, InteractivityCache>>,
}

impl FadeTransition {
    pub fn new(animator: Animator) -> Self {
        Self {
            animator,
            duration: DEFAULT_FADE_DURATION,
            easing: linear,
            toggle_interactivity: true,
            running: Arc::new(Mutex::new(HashMap::new())),
            caches: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn with_easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Leave input settings alone while fading.
    #[must_use]
    pub fn without_interactivity_toggle(mut self) -> Self {
        self.toggle_interactivity = false;
        self
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn toggles_interactivity(&self) -> bool {
        self.toggle_interactivity
    }

    /// Returns true if a fade for `view` has been started and not yet finished
    pub fn is_fading(&self, view: NodeId) -> bool {
        self.running.lock().contains_key(&view)
    }

    /// Tweens run on the animator's scene, so every other effect must land
    /// on that same scene.
    fn check_scene(&self, scene: &SceneTree, view: NodeId) -> Result<()> {
        if scene.same_tree(self.animator.scene()) {
            Ok(())
        } else {
            Err(TransitionError::ForeignScene { view })
        }
    }

    fn set_interactive(&self, scene: &SceneTree, view: NodeId, enabled: bool) -> Result<()> {
        let mut caches = self.caches.lock();
        let cache = caches.entry(view).or_default();

        // A non-empty cache means the subtree is already disabled; disabling
        // again would overwrite the settings we need to restore.
        if !enabled && !cache.is_empty() {
            return Ok(());
        }

        scene.set_subtree_interactive(view, enabled, cache)?;
        Ok(())
    }

    fn restart(&self, view: NodeId, target: f32, visible_after: bool) -> Result<()> {
        let mut running = self.running.lock();

        if let Some(previous) = running.remove(&view) {
            if self.animator.kill(previous) {
                tracing::debug!(view = %view, tween = %previous, "Cancelled running fade");
            }
        }

        let slot = Arc::clone(&self.running);
        let id = self.animator.tween_opacity(
            view,
            target,
            self.duration,
            self.easing,
            move |scene, id| {
                let mut running = slot.lock();
                if running.get(&view) != Some(&id) {
                    return;
                }
                running.remove(&view);
                drop(running);

                if let Err(e) = scene.set_visible(view, visible_after) {
                    tracing::warn!(view = %view, error = %e, "Fade finished on a missing view");
                }
            },
        )?;

        running.insert(view, id);
        Ok(())
    }
}

impl TransitionStrategy for FadeTransition {
    fn init(&self, scene: &SceneTree, view: NodeId) -> Result<()> {
        self.check_scene(scene, view)?;
        scene.set_opacity(view, 0.0)?;
        self.caches.lock().entry(view).or_default().clear();
        Ok(())
    }

    fn show(&self, scene: &SceneTree, view: NodeId) -> Result<()> {
        self.check_scene(scene, view)?;
        if self.toggle_interactivity {
            self.set_interactive(scene, view, true)?;
        }
        scene.set_visible(view, true)?;
        self.restart(view, 1.0, true)
    }

    fn hide(&self, scene: &SceneTree, view: NodeId) -> Result<()> {
        self.check_scene(scene, view)?;
        if self.toggle_interactivity {
            self.set_interactive(scene, view, false)?;
        }
        self.restart(view, 0.0, false)
    }

    fn name(&self) -> &'static str {
        "fade"
    }
}

impl std::fmt::Debug for FadeTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FadeTransition")
            .field("duration", &self.duration)
            .field("toggle_interactivity", &self.toggle_interactivity)
            .field("running", &self.running.lock().len())
            .finish()
    }
}
