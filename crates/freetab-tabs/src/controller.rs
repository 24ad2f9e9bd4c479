//! Tab Controller
//!
//! Owns the (button, view) pairs and the current selection, and drives the
//! hide/show protocol between them.

use std::any::Any;
use uuid::Uuid;

use freetab_scene::{NodeId, SceneTree};
use freetab_view::{Notification, OptionalArg, ViewItem};

use crate::button::{ButtonGroup, SelectorButton};
use crate::error::TabError;
use crate::events::{ArgumentResolver, ObserverId, Observers, ViewEvent};
use crate::state::Selection;
use crate::Result;

/// Builds a view inside the given scene.
pub type ViewTemplate = Box<dyn FnOnce(&SceneTree) -> freetab_view::Result<ViewItem>>;

/// A button paired with an already-built view.
pub struct TabInstanceSetup {
    pub button: Box<dyn SelectorButton>,
    pub view: ViewItem,
}

impl TabInstanceSetup {
    pub fn new(button: impl SelectorButton + 'static, view: ViewItem) -> Self {
        Self {
            button: Box::new(button),
            view,
        }
    }
}

/// A button paired with a template that is instantiated at construction.
pub struct TabTemplateSetup {
    pub button: Box<dyn SelectorButton>,
    pub template: ViewTemplate,
}

impl TabTemplateSetup {
    pub fn new<F>(button: impl SelectorButton + 'static, template: F) -> Self
    where
        F: FnOnce(&SceneTree) -> freetab_view::Result<ViewItem> + 'static,
    {
        Self {
            button: Box::new(button),
            template: Box::new(template),
        }
    }
}

/// Shows exactly one of a fixed set of views at a time.
///
/// Every view is initialized and forced hidden during construction, so a new
/// controller starts [`Selection::Unselected`] with nothing visible. Each
/// selection change hides the outgoing view (strategy, then hook, then the
/// hide event), shows the incoming one (strategy, then hook, then the show
/// event) and finally re-syncs the buttons without raising their signals.
///
/// All methods take `&mut self`, so hooks and observers cannot re-enter the
/// controller that is calling them.
pub struct TabController {
    id: Uuid,
    views: Vec<ViewItem>,
    buttons: ButtonGroup,
    selection: Selection,
    default_resolver: Option<ArgumentResolver>,
    observers: Observers,
}

impl TabController {
    /// Pair `views[i]` with `buttons[i]`.
    pub fn new(
        views: Vec<ViewItem>,
        buttons: Vec<Box<dyn SelectorButton>>,
        default_resolver: Option<ArgumentResolver>,
    ) -> Result<Self> {
        if views.is_empty() {
            return Err(TabError::EmptyViewSet);
        }
        if views.len() != buttons.len() {
            return Err(TabError::LengthMismatch {
                views: views.len(),
                buttons: buttons.len(),
            });
        }

        Ok(Self::assemble(
            views.into_iter().zip(buttons).collect(),
            default_resolver,
        ))
    }

    pub fn from_instances(
        setups: Vec<TabInstanceSetup>,
        default_resolver: Option<ArgumentResolver>,
    ) -> Result<Self> {
        if setups.is_empty() {
            return Err(TabError::EmptyViewSet);
        }

        Ok(Self::assemble(
            setups.into_iter().map(|s| (s.view, s.button)).collect(),
            default_resolver,
        ))
    }

    /// Instantiate every template, attach the resulting views under
    /// `container`, then build the controller.
    ///
    /// All views are in the tree before any of them is initialized.
    pub fn from_templates(
        setups: Vec<TabTemplateSetup>,
        scene: &SceneTree,
        container: NodeId,
        default_resolver: Option<ArgumentResolver>,
    ) -> Result<Self> {
        if setups.is_empty() {
            return Err(TabError::EmptyViewSet);
        }

        let mut pairs: Vec<(ViewItem, Box<dyn SelectorButton>)> =
            Vec::with_capacity(setups.len());
        for setup in setups {
            match Self::instantiate(setup.template, scene, container) {
                Ok(view) => pairs.push((view, setup.button)),
                Err(e) => {
                    for (view, _) in &pairs {
                        discard(scene, view.node());
                    }
                    tracing::warn!(
                        container = %container,
                        discarded = pairs.len(),
                        error = %e,
                        "View template failed"
                    );
                    return Err(e);
                }
            }
        }

        Ok(Self::assemble(pairs, default_resolver))
    }

    fn instantiate(
        template: ViewTemplate,
        scene: &SceneTree,
        container: NodeId,
    ) -> Result<ViewItem> {
        let view = template(scene)?;
        if let Err(e) = scene.add_child(container, view.node()) {
            discard(scene, view.node());
            return Err(e.into());
        }
        Ok(view)
    }

    fn assemble(
        pairs: Vec<(ViewItem, Box<dyn SelectorButton>)>,
        default_resolver: Option<ArgumentResolver>,
    ) -> Self {
        let mut views = Vec::with_capacity(pairs.len());
        let mut buttons = ButtonGroup::new();

        for (mut view, button) in pairs {
            buttons.push(button);
            view.initialize();
            view.force_hidden();
            views.push(view);
        }
        buttons.sync(None);

        let controller = Self {
            id: Uuid::new_v4(),
            views,
            buttons,
            selection: Selection::Unselected,
            default_resolver,
            observers: Observers::default(),
        };

        tracing::info!(
            controller = %controller.id,
            views = controller.views.len(),
            "Created tab controller"
        );

        controller
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Always false; a controller holds at least one view
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Index of the current view
    pub fn current(&self) -> Option<usize> {
        self.selection.index()
    }

    pub fn current_view(&self) -> Option<&ViewItem> {
        self.current().and_then(|i| self.views.get(i))
    }

    pub fn view(&self, index: usize) -> Option<&ViewItem> {
        self.views.get(index)
    }

    pub fn view_mut(&mut self, index: usize) -> Option<&mut ViewItem> {
        self.views.get_mut(index)
    }

    pub fn views(&self) -> &[ViewItem] {
        &self.views
    }

    pub fn button(&self, index: usize) -> Option<&dyn SelectorButton> {
        self.buttons.get(index)
    }

    /// Show the view at `index` with its resolved default argument.
    pub fn show(&mut self, index: usize) -> Result<()> {
        self.show_with(index, None)
    }

    /// Show the view at `index` with a typed argument.
    pub fn show_arg<T: Any>(&mut self, index: usize, arg: T) -> Result<()> {
        self.show_with(index, Some(OptionalArg::new(arg)))
    }

    /// Show the view at `index`.
    ///
    /// The argument is `arg` if given, else whatever the default resolver
    /// returns, else the view's declared default. An out-of-range index or
    /// a mistyped argument fails before anything is hidden.
    pub fn show_with(&mut self, index: usize, arg: Option<OptionalArg>) -> Result<()> {
        self.check_index(index)?;
        let arg = self.resolve(index, arg, None);
        self.transition_to(index, arg)
    }

    /// Advance to the next view. At the last view, wrap to the first or
    /// re-show the last one.
    ///
    /// `resolver` overrides the default resolver for this call only.
    pub fn show_next(
        &mut self,
        wrap: bool,
        resolver: Option<&dyn Fn(&ViewItem) -> Option<OptionalArg>>,
    ) -> Result<()> {
        let index = self.selection.next(self.views.len(), wrap);
        let arg = self.resolve(index, None, resolver);
        self.transition_to(index, arg)
    }

    /// Step back to the previous view. At the first view, wrap to the last
    /// or re-show the first one.
    pub fn show_previous(
        &mut self,
        wrap: bool,
        resolver: Option<&dyn Fn(&ViewItem) -> Option<OptionalArg>>,
    ) -> Result<()> {
        let index = self.selection.previous(self.views.len(), wrap);
        let arg = self.resolve(index, None, resolver);
        self.transition_to(index, arg)
    }

    /// Entry point for a button's toggled signal.
    ///
    /// A press shows the bound view and returns true. A release never shows
    /// anything; releasing the current tab is undone since the group does
    /// not allow an empty selection once something is selected.
    pub fn handle_button_toggled(&mut self, index: usize, pressed: bool) -> Result<bool> {
        self.check_index(index)?;

        if pressed {
            self.show(index)?;
            return Ok(true);
        }

        if self.selection.is_selected(index) {
            tracing::debug!(controller = %self.id, index, "Ignored release of current tab");
            self.buttons.sync(self.current());
        }
        Ok(false)
    }

    /// Simulate a user click on the button at `index`.
    ///
    /// Clicking an already pressed button does nothing, as with a real
    /// single-select group.
    pub fn click(&mut self, index: usize) -> Result<bool> {
        self.check_index(index)?;

        if self.buttons.get(index).is_some_and(|b| b.is_pressed()) {
            return Ok(false);
        }
        self.handle_button_toggled(index, true)
    }

    /// Deliver a host notification to the view at `index`.
    pub fn notify_view(&mut self, index: usize, what: Notification) -> Result<()> {
        self.check_index(index)?;
        self.views[index].notify(what);
        Ok(())
    }

    /// Register an observer that runs after every view show.
    pub fn on_show<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(usize, &ViewItem) + 'static,
    {
        self.observers.add(ViewEvent::Show, observer)
    }

    /// Register an observer that runs after every view hide.
    pub fn on_hide<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(usize, &ViewItem) + 'static,
    {
        self.observers.add(ViewEvent::Hide, observer)
    }

    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.views.len() {
            return Err(TabError::IndexOutOfRange {
                index,
                len: self.views.len(),
            });
        }
        Ok(())
    }

    fn resolve(
        &self,
        index: usize,
        explicit: Option<OptionalArg>,
        resolver: Option<&dyn Fn(&ViewItem) -> Option<OptionalArg>>,
    ) -> Option<OptionalArg> {
        if explicit.is_some() {
            return explicit;
        }

        let view = &self.views[index];
        match resolver {
            Some(resolve) => resolve(view),
            None => match &self.default_resolver {
                Some(resolve) => resolve(view),
                None => None,
            },
        }
    }

    fn transition_to(&mut self, index: usize, arg: Option<OptionalArg>) -> Result<()> {
        if let Some(arg) = &arg {
            self.views[index].check_argument(arg)?;
        }

        let previous = self.selection;
        if let Some(current) = previous.index() {
            let outgoing = &mut self.views[current];
            outgoing.hide();
            self.observers.emit(ViewEvent::Hide, current, outgoing);
        }

        self.selection = Selection::Selected(index);
        tracing::debug!(
            controller = %self.id,
            from = %previous,
            to = %self.selection,
            view = %self.views[index].name(),
            "Selection changed"
        );

        let incoming = &mut self.views[index];
        incoming.show(arg)?;
        self.observers.emit(ViewEvent::Show, index, incoming);

        self.buttons.sync(Some(index));
        Ok(())
    }
}

/// Remove a view built during a failed construction from the scene.
fn discard(scene: &SceneTree, node: NodeId) {
    if let Err(e) = scene.free(node) {
        tracing::warn!(node = %node, error = %e, "Could not free discarded view");
    }
}

impl std::fmt::Debug for TabController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabController")
            .field("id", &self.id)
            .field("selection", &self.selection)
            .field("views", &self.views)
            .field("buttons", &self.buttons)
            .field("default_resolver", &self.default_resolver.is_some())
            .finish()
    }
}
