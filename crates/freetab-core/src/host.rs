//! Tab host
//!
//! Bundles what a tab controller needs from its environment: the scene it
//! draws into, the animator that stands in for frame scheduling, and one
//! fade strategy shared by every view.

use std::sync::Arc;
use std::time::Duration;

use freetab_scene::{NodeId, SceneTree};
use freetab_tabs::{ArgumentResolver, TabController, TabTemplateSetup};
use freetab_transition::{Animator, FadeTransition, TransitionStrategy};

use crate::config::FreeTabConfig;
use crate::error::CoreError;
use crate::Result;

pub struct TabHost {
    config: FreeTabConfig,
    scene: SceneTree,
    animator: Animator,
    fade: Arc<FadeTransition>,
    root: NodeId,
    controller: Option<TabController>,
}

impl TabHost {
    pub fn new(config: FreeTabConfig) -> Result<Self> {
        config.validate()?;

        let scene = SceneTree::new();
        let root = scene.create_node("tab_host");
        let animator = Animator::new(scene.clone());

        let mut fade = FadeTransition::new(animator.clone()).with_duration(config.fade_duration());
        if !config.fade_toggles_interactivity {
            fade = fade.without_interactivity_toggle();
        }

        tracing::info!(
            fade_ms = config.fade_duration_ms,
            toggles_interactivity = config.fade_toggles_interactivity,
            wrap = config.wrap,
            "Created tab host"
        );

        Ok(Self {
            config,
            scene,
            animator,
            fade: Arc::new(fade),
            root,
            controller: None,
        })
    }

    pub fn config(&self) -> &FreeTabConfig {
        &self.config
    }

    pub fn scene(&self) -> &SceneTree {
        &self.scene
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Node every mounted view is attached under
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn fade(&self) -> Arc<FadeTransition> {
        Arc::clone(&self.fade)
    }

    /// Build the controller from templates. Every view gets the shared fade.
    ///
    /// Mounting again replaces the previous controller; its views stay in
    /// the scene until the caller frees them.
    pub fn mount(
        &mut self,
        setups: Vec<TabTemplateSetup>,
        default_resolver: Option<ArgumentResolver>,
    ) -> Result<&mut TabController> {
        let fade: Arc<dyn TransitionStrategy> = self.fade.clone();
        let setups = setups
            .into_iter()
            .map(|setup| {
                let fade = Arc::clone(&fade);
                let template = setup.template;
                TabTemplateSetup {
                    button: setup.button,
                    template: Box::new(move |scene: &SceneTree| {
                        template(scene).map(|view| view.with_transition(fade))
                    }),
                }
            })
            .collect();

        let controller = TabController::from_templates(
            setups,
            &self.scene,
            self.root,
            default_resolver,
        )?;
        tracing::debug!(controller = %controller.id(), "Mounted tabs");

        Ok(self.controller.insert(controller))
    }

    pub fn controller(&self) -> Result<&TabController> {
        self.controller.as_ref().ok_or(CoreError::NotMounted)
    }

    pub fn controller_mut(&mut self) -> Result<&mut TabController> {
        self.controller.as_mut().ok_or(CoreError::NotMounted)
    }

    pub fn show(&mut self, index: usize) -> Result<()> {
        self.controller_mut()?.show(index)?;
        Ok(())
    }

    /// Next view, wrapping as configured
    pub fn show_next(&mut self) -> Result<()> {
        let wrap = self.config.wrap;
        self.controller_mut()?.show_next(wrap, None)?;
        Ok(())
    }

    /// Previous view, wrapping as configured
    pub fn show_previous(&mut self) -> Result<()> {
        let wrap = self.config.wrap;
        self.controller_mut()?.show_previous(wrap, None)?;
        Ok(())
    }

    /// Progress running fades by one frame of length `dt`.
    pub fn advance(&self, dt: Duration) {
        self.animator.advance(dt);
    }

    /// Returns true while any fade is still running
    pub fn is_animating(&self) -> bool {
        self.animator.active_count() > 0
    }

    /// Advance in `step` increments until no fade is left running.
    ///
    /// A zero step would never finish a tween and is rejected.
    pub fn settle(&self, step: Duration) -> Result<()> {
        if step.is_zero() {
            return Err(CoreError::Config("settle step must be positive".to_string()));
        }
        while self.is_animating() {
            self.animator.advance(step);
        }
        Ok(())
    }
}

impl std::fmt::Debug for TabHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabHost")
            .field("config", &self.config)
            .field("root", &self.root)
            .field("fade", &self.fade)
            .field("controller", &self.controller)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freetab_scene::{Control, FocusMode, MouseFilter};
    use freetab_tabs::CheckButton;
    use freetab_view::{ViewItem, ViewLifecycle};

    const FRAME: Duration = Duration::from_millis(16);

    struct Panel;

    impl ViewLifecycle for Panel {
        type Arg = ();
    }

    fn setups(names: &[&'static str]) -> Vec<TabTemplateSetup> {
        names
            .iter()
            .map(|&name| {
                TabTemplateSetup::new(CheckButton::new(name), move |scene: &SceneTree| {
                    let node = scene.create_control(name, Control::default());
                    let field = scene.create_control(
                        format!("{name}_field"),
                        Control::new(FocusMode::All, MouseFilter::Stop),
                    );
                    scene.add_child(node, field)?;
                    ViewItem::new(scene, node, Panel)
                })
            })
            .collect()
    }

    fn mounted(config: FreeTabConfig) -> TabHost {
        let mut host = TabHost::new(config).unwrap();
        host.mount(setups(&["home", "search", "settings"]), None).unwrap();
        host.settle(FRAME).unwrap();
        host
    }

    #[test]
    fn test_not_mounted() {
        let mut host = TabHost::new(FreeTabConfig::default()).unwrap();
        assert!(matches!(host.show(0), Err(CoreError::NotMounted)));
        assert!(matches!(host.show_next(), Err(CoreError::NotMounted)));
    }

    #[test]
    fn test_mount_uses_shared_fade() {
        let host = mounted(FreeTabConfig::default());
        let controller = host.controller().unwrap();

        assert_eq!(controller.len(), 3);
        for view in controller.views() {
            assert_eq!(view.transition_name(), "fade");
            assert!(!host.scene().is_visible(view.node()).unwrap());
            assert_eq!(host.scene().opacity(view.node()).unwrap(), 0.0);
        }
        assert_eq!(host.fade().duration(), Duration::from_millis(100));
    }

    #[test]
    fn test_navigation_follows_configured_wrap() {
        let mut host = mounted(FreeTabConfig::default());
        host.show_previous().unwrap();
        assert_eq!(host.controller().unwrap().current(), Some(2));
        host.show_next().unwrap();
        assert_eq!(host.controller().unwrap().current(), Some(0));

        let mut host = mounted(FreeTabConfig {
            wrap: false,
            ..FreeTabConfig::default()
        });
        host.show(2).unwrap();
        host.show_next().unwrap();
        assert_eq!(host.controller().unwrap().current(), Some(2));
    }

    #[test]
    fn test_fade_in_and_out() {
        let mut host = mounted(FreeTabConfig::default());
        host.show(0).unwrap();
        host.show(1).unwrap();
        assert!(host.is_animating());
        host.settle(FRAME).unwrap();

        let controller = host.controller().unwrap();
        let home = controller.view(0).unwrap().node();
        let search = controller.view(1).unwrap().node();
        assert!(!host.scene().is_visible(home).unwrap());
        assert!(host.scene().is_visible(search).unwrap());
        assert_eq!(host.scene().opacity(search).unwrap(), 1.0);
    }

    #[test]
    fn test_hidden_views_lose_input_unless_disabled() {
        let host = mounted(FreeTabConfig::default());
        let home = host.controller().unwrap().view(0).unwrap().node();
        let field = host.scene().with_tree(|tree| tree.get(home).unwrap().children()[0]);
        assert_eq!(host.scene().control(field).unwrap(), Control::inert());

        let host = mounted(FreeTabConfig {
            fade_toggles_interactivity: false,
            ..FreeTabConfig::default()
        });
        let home = host.controller().unwrap().view(0).unwrap().node();
        let field = host.scene().with_tree(|tree| tree.get(home).unwrap().children()[0]);
        assert_eq!(
            host.scene().control(field).unwrap(),
            Control::new(FocusMode::All, MouseFilter::Stop)
        );
    }

    #[test]
    fn test_settle_rejects_zero_step() {
        let mut host = TabHost::new(FreeTabConfig::default()).unwrap();
        host.mount(setups(&["home"]), None).unwrap();
        assert!(host.is_animating());

        assert!(matches!(host.settle(Duration::ZERO), Err(CoreError::Config(_))));
        assert!(host.is_animating());

        host.settle(Duration::from_millis(1)).unwrap();
        assert!(!host.is_animating());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = FreeTabConfig {
            log_filter: String::new(),
            ..FreeTabConfig::default()
        };
        assert!(matches!(TabHost::new(config), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_transition_errors_convert() {
        let host = TabHost::new(FreeTabConfig::default()).unwrap();
        let gone = host.scene().create_node("gone");
        host.scene().free(gone).unwrap();

        let result: Result<()> = host.fade().init(host.scene(), gone).map_err(CoreError::from);
        assert!(matches!(result, Err(CoreError::Transition(_))));
    }
}
