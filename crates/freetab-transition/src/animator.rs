//! Opacity tweens driven by the host's frame loop
//!
//! The [`Animator`] holds every running tween. The host calls
//! [`Animator::advance`] once per frame; tweens that reach their end write
//! their final opacity and then run their completion callback. Starting a
//! tween never blocks and never completes it synchronously.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use freetab_scene::{NodeId, SceneTree};

use crate::Result;

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f32) -> f32;

/// Constant velocity.
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in (slow start).
#[inline]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out (slow end).
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out.
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TweenId(u64);

impl std::fmt::Display for TweenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tween-{}", self.0)
    }
}

type Completion = Box<dyn FnOnce(&SceneTree, TweenId) + Send>;

struct Tween {
    node: NodeId,
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
    on_complete: Option<Completion>,
}

impl Tween {
    fn progress(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (self.easing)((t as f32).clamp(0.0, 1.0))
    }

    fn value(&self) -> f32 {
        self.from + (self.to - self.from) * self.progress()
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[derive(Default)]
struct AnimatorInner {
    next_id: u64,
    tweens: BTreeMap<TweenId, Tween>,
}

/// Cloneable handle to the set of running tweens of one scene.
pub struct Animator {
    scene: SceneTree,
    inner: Arc<Mutex<AnimatorInner>>,
}

impl Animator {
    pub fn new(scene: SceneTree) -> Self {
        Self {
            scene,
            inner: Arc::new(Mutex::new(AnimatorInner::default())),
        }
    }

    pub fn scene(&self) -> &SceneTree {
        &self.scene
    }

    /// Start tweening `node`'s opacity from its current value to `target`.
    ///
    /// `on_complete` runs from [`Animator::advance`] once the tween reaches
    /// its end, and never if the tween is killed first.
    pub fn tween_opacity<F>(
        &self,
        node: NodeId,
        target: f32,
        duration: Duration,
        easing: EasingFn,
        on_complete: F,
    ) -> Result<TweenId>
    where
        F: FnOnce(&SceneTree, TweenId) + Send + 'static,
    {
        let from = self.scene.opacity(node)?;

        let mut inner = self.inner.lock();
        let id = TweenId(inner.next_id);
        inner.next_id += 1;
        inner.tweens.insert(
            id,
            Tween {
                node,
                from,
                to: target.clamp(0.0, 1.0),
                elapsed: Duration::ZERO,
                duration: if duration.is_zero() {
                    Duration::from_nanos(1)
                } else {
                    duration
                },
                easing,
                on_complete: Some(Box::new(on_complete)),
            },
        );

        tracing::trace!(tween = %id, node = %node, from, to = target, ?duration, "Started opacity tween");

        Ok(id)
    }

    /// Discard a running tween without running its completion.
    /// Returns false if the tween already finished or never existed.
    pub fn kill(&self, id: TweenId) -> bool {
        let killed = self.inner.lock().tweens.remove(&id).is_some();
        if killed {
            tracing::trace!(tween = %id, "Killed tween");
        }
        killed
    }

    pub fn is_running(&self, id: TweenId) -> bool {
        self.inner.lock().tweens.contains_key(&id)
    }

    pub fn active_count(&self) -> usize {
        self.inner.lock().tweens.len()
    }

    /// Advance every running tween by `dt`.
    ///
    /// Completion callbacks run after the animator's lock is released, in
    /// tween start order, so they may start or kill tweens themselves.
    pub fn advance(&self, dt: Duration) {
        let mut updates = Vec::new();
        let mut finished = Vec::new();

        let mut inner = self.inner.lock();
        for (id, tween) in inner.tweens.iter_mut() {
            tween.elapsed = tween.elapsed.saturating_add(dt);
            updates.push((tween.node, tween.value()));
            if tween.is_complete() {
                finished.push(*id);
            }
        }
        let completed: Vec<(TweenId, Option<Completion>)> = finished
            .iter()
            .filter_map(|id| inner.tweens.remove(id).map(|t| (*id, t.on_complete)))
            .collect();
        drop(inner);

        for (node, opacity) in updates {
            if let Err(e) = self.scene.set_opacity(node, opacity) {
                tracing::debug!(node = %node, error = %e, "Tween target vanished");
            }
        }

        for (id, on_complete) in completed {
            if let Some(on_complete) = on_complete {
                on_complete(&self.scene, id);
            }
        }
    }
}

impl Clone for Animator {
    fn clone(&self) -> Self {
        Self {
            scene: self.scene.clone(),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for Animator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animator")
            .field("active", &self.active_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_easing_endpoints() {
        let easings: [EasingFn; 4] = [linear, ease_in, ease_out, ease_in_out];
        for easing in easings {
            assert_eq!(easing(0.0), 0.0);
            assert!((easing(1.0) - 1.0).abs() < f32::EPSILON);
        }
        assert_eq!(linear(2.0), 1.0);
    }

    #[test]
    fn test_tween_progresses_and_completes() {
        let scene = SceneTree::new();
        let node = scene.create_node("view");
        scene.set_opacity(node, 0.0).unwrap();
        let animator = Animator::new(scene.clone());
        let done = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&done);
        let id = animator
            .tween_opacity(node, 1.0, Duration::from_millis(100), linear, move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        // Starting never completes synchronously
        assert!(animator.is_running(id));
        assert_eq!(scene.opacity(node).unwrap(), 0.0);

        animator.advance(Duration::from_millis(50));
        assert!((scene.opacity(node).unwrap() - 0.5).abs() < 1e-4);
        assert_eq!(done.load(Ordering::SeqCst), 0);

        animator.advance(Duration::from_millis(60));
        assert_eq!(scene.opacity(node).unwrap(), 1.0);
        assert_eq!(done.load(Ordering::SeqCst), 1);
        assert!(!animator.is_running(id));
        assert_eq!(animator.active_count(), 0);
    }

    #[test]
    fn test_killed_tween_never_completes() {
        let scene = SceneTree::new();
        let node = scene.create_node("view");
        let animator = Animator::new(scene.clone());
        let done = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&done);
        let id = animator
            .tween_opacity(node, 0.0, Duration::from_millis(10), linear, move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        assert!(animator.kill(id));
        assert!(!animator.kill(id));
        animator.advance(Duration::from_secs(1));

        assert_eq!(done.load(Ordering::SeqCst), 0);
        assert_eq!(scene.opacity(node).unwrap(), 1.0);
    }

    #[test]
    fn test_zero_duration_completes_on_next_frame() {
        let scene = SceneTree::new();
        let node = scene.create_node("view");
        let animator = Animator::new(scene.clone());

        let id = animator
            .tween_opacity(node, 0.0, Duration::ZERO, linear, |_, _| {})
            .unwrap();
        assert!(animator.is_running(id));

        animator.advance(Duration::from_millis(1));
        assert!(!animator.is_running(id));
        assert_eq!(scene.opacity(node).unwrap(), 0.0);
    }

    #[test]
    fn test_completion_may_start_another_tween() {
        let scene = SceneTree::new();
        let node = scene.create_node("view");
        let animator = Animator::new(scene.clone());

        let chained = animator.clone();
        animator
            .tween_opacity(node, 0.0, Duration::from_millis(10), linear, move |_, _| {
                chained
                    .tween_opacity(node, 1.0, Duration::from_millis(10), linear, |_, _| {})
                    .unwrap();
            })
            .unwrap();

        animator.advance(Duration::from_millis(10));
        assert_eq!(animator.active_count(), 1);
    }
}
