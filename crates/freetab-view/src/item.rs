//! Type-erased view wrapper

use serde::{Deserialize, Serialize};
use std::any::{type_name, Any};
use std::sync::Arc;

use freetab_scene::{NodeId, SceneTree};
use freetab_transition::{NoneTransition, TransitionStrategy};

use crate::argument::OptionalArg;
use crate::error::ViewError;
use crate::invoke::{run_protected, run_protected_with};
use crate::lifecycle::{Notification, ViewLifecycle};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    /// Built but `initialize` has not run yet
    Uninitialized,
    Hidden,
    Shown,
}

impl ViewState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewState::Uninitialized => "uninitialized",
            ViewState::Hidden => "hidden",
            ViewState::Shown => "shown",
        }
    }
}

impl std::fmt::Display for ViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Init,
    Show,
    Hide,
}

trait ErasedLifecycle {
    fn arg_type_name(&self) -> &'static str;
    fn accepts(&self, arg: &OptionalArg) -> bool;
    fn initialize(&mut self) -> anyhow::Result<()>;
    fn show(&mut self, arg: Option<OptionalArg>) -> anyhow::Result<()>;
    fn hide(&mut self) -> anyhow::Result<()>;
    fn notify(&mut self, what: Notification) -> anyhow::Result<()>;
    fn predelete(&mut self) -> anyhow::Result<()>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct Typed<V>(V);

impl<V: ViewLifecycle> ErasedLifecycle for Typed<V> {
    fn arg_type_name(&self) -> &'static str {
        type_name::<V::Arg>()
    }

    fn accepts(&self, arg: &OptionalArg) -> bool {
        arg.is::<V::Arg>()
    }

    fn initialize(&mut self) -> anyhow::Result<()> {
        self.0.initialize()
    }

    fn show(&mut self, arg: Option<OptionalArg>) -> anyhow::Result<()> {
        let arg = match arg {
            None => V::Arg::default(),
            Some(arg) => arg.downcast::<V::Arg>().map_err(|arg| {
                anyhow::anyhow!(
                    "argument of type {} reached a view expecting {}",
                    arg.type_name(),
                    type_name::<V::Arg>()
                )
            })?,
        };
        self.0.show(arg)
    }

    fn hide(&mut self) -> anyhow::Result<()> {
        self.0.hide()
    }

    fn notify(&mut self, what: Notification) -> anyhow::Result<()> {
        self.0.notify(what)
    }

    fn predelete(&mut self) -> anyhow::Result<()> {
        self.0.predelete()
    }

    fn as_any(&self) -> &dyn Any {
        &self.0
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut self.0
    }
}

/// A view bound to its root node and transition strategy.
pub struct ViewItem {
    name: String,
    node: NodeId,
    scene: SceneTree,
    transition: Arc<dyn TransitionStrategy>,
    lifecycle: Box<dyn ErasedLifecycle>,
    state: ViewState,
    deleted: bool,
}

impl ViewItem {
    /// Wrap `lifecycle` as the view rooted at `node`.
    ///
    /// The node is flagged as a view root so that interactivity toggling of
    /// an enclosing view leaves it alone. The view uses [`NoneTransition`]
    /// until another strategy is set.
    pub fn new<V: ViewLifecycle>(scene: &SceneTree, node: NodeId, lifecycle: V) -> Result<Self> {
        let name = scene.name(node)?;
        scene.set_view_root(node, true)?;

        Ok(Self {
            name,
            node,
            scene: scene.clone(),
            transition: Arc::new(NoneTransition),
            lifecycle: Box::new(Typed(lifecycle)),
            state: ViewState::Uninitialized,
            deleted: false,
        })
    }

    #[must_use]
    pub fn with_transition(mut self, transition: Arc<dyn TransitionStrategy>) -> Self {
        self.transition = transition;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn scene(&self) -> &SceneTree {
        &self.scene
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Returns true once the predelete hook has run
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn transition_name(&self) -> &'static str {
        self.transition.name()
    }

    /// Name of the declared show-argument type
    pub fn arg_type_name(&self) -> &'static str {
        self.lifecycle.arg_type_name()
    }

    /// Borrow the concrete view, if it is a `V`
    pub fn lifecycle<V: ViewLifecycle>(&self) -> Option<&V> {
        self.lifecycle.as_any().downcast_ref::<V>()
    }

    pub fn lifecycle_mut<V: ViewLifecycle>(&mut self) -> Option<&mut V> {
        self.lifecycle.as_any_mut().downcast_mut::<V>()
    }

    /// Reject an argument whose type differs from the declared one
    pub fn check_argument(&self, arg: &OptionalArg) -> Result<()> {
        if self.lifecycle.accepts(arg) {
            return Ok(());
        }
        Err(ViewError::ArgumentType {
            view: self.name.clone(),
            expected: self.lifecycle.arg_type_name(),
            found: arg.type_name(),
        })
    }

    /// Run the initialize hook, then let the transition set the default look.
    pub fn initialize(&mut self) {
        let _ = run_protected("View Initialization", &self.name, "initialize", || {
            self.lifecycle.initialize()
        });
        self.transition_step(Step::Init);
        self.state = ViewState::Hidden;
    }

    /// Put the view in its hidden visual state without running any hook.
    pub fn force_hidden(&mut self) {
        self.transition_step(Step::Hide);
        self.state = ViewState::Hidden;
    }

    /// Start the show transition and run the show hook.
    ///
    /// `None` passes the declared type's default value. An argument of the
    /// wrong type fails before anything else happens.
    pub fn show(&mut self, arg: Option<OptionalArg>) -> Result<()> {
        if let Some(arg) = &arg {
            self.check_argument(arg)?;
        }

        self.transition_step(Step::Show);
        let _ = run_protected_with("Show View", &self.name, "show", arg, |arg| {
            self.lifecycle.show(arg)
        });
        self.state = ViewState::Shown;
        Ok(())
    }

    /// Start the hide transition and run the hide hook.
    pub fn hide(&mut self) {
        self.transition_step(Step::Hide);
        let _ = run_protected("Hide View", &self.name, "hide", || self.lifecycle.hide());
        self.state = ViewState::Hidden;
    }

    /// Deliver a host notification. [`Notification::Predelete`] also runs
    /// the predelete hook, at most once over the view's life.
    pub fn notify(&mut self, what: Notification) {
        let _ = run_protected_with("View Notification", &self.name, "notify", what, |what| {
            self.lifecycle.notify(what)
        });

        if what != Notification::Predelete || self.deleted {
            return;
        }
        self.deleted = true;

        let _ = run_protected("Delete View", &self.name, "predelete", || {
            self.lifecycle.predelete()
        });
    }

    fn transition_step(&self, step: Step) {
        let result = match step {
            Step::Init => self.transition.init(&self.scene, self.node),
            Step::Show => self.transition.show(&self.scene, self.node),
            Step::Hide => self.transition.hide(&self.scene, self.node),
        };

        if let Err(e) = result {
            tracing::warn!(
                view = %self.name,
                node = %self.node,
                transition = self.transition.name(),
                ?step,
                error = %e,
                "Transition step failed"
            );
        }
    }
}

impl std::fmt::Debug for ViewItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewItem")
            .field("name", &self.name)
            .field("node", &self.node)
            .field("state", &self.state)
            .field("transition", &self.transition.name())
            .field("arg", &self.arg_type_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Pager {
        log: Log,
        fail_show: bool,
    }

    impl ViewLifecycle for Pager {
        type Arg = u32;

        fn initialize(&mut self) -> anyhow::Result<()> {
            self.log.borrow_mut().push("initialize".into());
            anyhow::bail!("init went sideways")
        }

        fn show(&mut self, page: u32) -> anyhow::Result<()> {
            self.log.borrow_mut().push(format!("show:{page}"));
            if self.fail_show {
                panic!("show exploded");
            }
            Ok(())
        }

        fn hide(&mut self) -> anyhow::Result<()> {
            self.log.borrow_mut().push("hide".into());
            Ok(())
        }

        fn notify(&mut self, what: Notification) -> anyhow::Result<()> {
            self.log.borrow_mut().push(format!("notify:{what:?}"));
            Ok(())
        }

        fn predelete(&mut self) -> anyhow::Result<()> {
            self.log.borrow_mut().push("predelete".into());
            Ok(())
        }
    }

    fn pager(fail_show: bool) -> (SceneTree, ViewItem, Log) {
        let scene = SceneTree::new();
        let node = scene.create_node("pager");
        let log: Log = Rc::default();
        let item = ViewItem::new(
            &scene,
            node,
            Pager {
                log: Rc::clone(&log),
                fail_show,
            },
        )
        .unwrap();
        (scene, item, log)
    }

    #[test]
    fn test_new_marks_view_root() {
        let (scene, item, _) = pager(false);
        assert!(scene.with_tree(|tree| tree.get(item.node()).unwrap().view_root));
        assert_eq!(item.name(), "pager");
        assert_eq!(item.state(), ViewState::Uninitialized);
        assert_eq!(item.transition_name(), "none");
        assert_eq!(item.arg_type_name(), "u32");
    }

    #[test]
    fn test_failing_initialize_still_initializes() {
        let (_, mut item, log) = pager(false);
        item.initialize();
        assert_eq!(item.state(), ViewState::Hidden);
        assert_eq!(*log.borrow(), vec!["initialize"]);
    }

    #[test]
    fn test_show_without_argument_uses_default() {
        let (scene, mut item, log) = pager(false);
        item.force_hidden();
        assert!(!scene.is_visible(item.node()).unwrap());

        item.show(None).unwrap();
        assert!(scene.is_visible(item.node()).unwrap());
        assert_eq!(item.state(), ViewState::Shown);
        assert_eq!(*log.borrow(), vec!["show:0"]);
    }

    #[test]
    fn test_show_with_typed_argument() {
        let (_, mut item, log) = pager(false);
        item.show(Some(OptionalArg::new(3u32))).unwrap();
        assert_eq!(*log.borrow(), vec!["show:3"]);
    }

    #[test]
    fn test_wrong_argument_type_is_fatal_and_runs_nothing() {
        let (scene, mut item, log) = pager(false);
        item.force_hidden();

        let err = item.show(Some(OptionalArg::new("three"))).unwrap_err();
        assert_eq!(
            err,
            ViewError::ArgumentType {
                view: "pager".into(),
                expected: "u32",
                found: "&str",
            }
        );
        assert!(log.borrow().is_empty());
        assert!(!scene.is_visible(item.node()).unwrap());
        assert_eq!(item.state(), ViewState::Hidden);
    }

    #[test]
    fn test_panicking_show_is_absorbed() {
        let (_, mut item, log) = pager(true);
        item.show(None).unwrap();
        item.hide();
        assert_eq!(*log.borrow(), vec!["show:0", "hide"]);
        assert_eq!(item.state(), ViewState::Hidden);
    }

    #[test]
    fn test_predelete_runs_once_via_notify() {
        let (_, mut item, log) = pager(false);
        item.notify(Notification::Ready);
        item.notify(Notification::Predelete);
        item.notify(Notification::Predelete);

        assert!(item.is_deleted());
        assert_eq!(
            *log.borrow(),
            vec![
                "notify:Ready",
                "notify:Predelete",
                "predelete",
                "notify:Predelete"
            ]
        );
    }

    #[test]
    fn test_lifecycle_downcast() {
        let (_, mut item, _) = pager(true);
        assert!(item.lifecycle::<Pager>().unwrap().fail_show);
        item.lifecycle_mut::<Pager>().unwrap().fail_show = false;
        assert!(!item.lifecycle::<Pager>().unwrap().fail_show);
    }

    #[test]
    fn test_missing_node() {
        let scene = SceneTree::new();
        let node = scene.create_node("gone");
        scene.free(node).unwrap();
        let log: Log = Rc::default();
        assert!(ViewItem::new(
            &scene,
            node,
            Pager {
                log,
                fail_show: false
            }
        )
        .is_err());
    }
}
