//! Node data structure

use serde::{Deserialize, Serialize};

/// Arena index of a node inside a [`crate::NodeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a control takes keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusMode {
    None,
    Click,
    #[default]
    All,
}

/// How a control reacts to pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseFilter {
    #[default]
    Stop,
    Pass,
    Ignore,
}

/// Input settings of a node that can receive focus or pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Control {
    pub focus_mode: FocusMode,
    pub mouse_filter: MouseFilter,
}

impl Control {
    pub fn new(focus_mode: FocusMode, mouse_filter: MouseFilter) -> Self {
        Self {
            focus_mode,
            mouse_filter,
        }
    }

    /// Returns true if the control accepts focus or pointer input in any form
    pub fn is_interactive(&self) -> bool {
        self.focus_mode != FocusMode::None || self.mouse_filter != MouseFilter::Ignore
    }

    pub fn inert() -> Self {
        Self::new(FocusMode::None, MouseFilter::Ignore)
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    /// Display name, used in diagnostics
    pub name: String,
    /// Whether the node is drawn at all
    pub visible: bool,
    /// Opacity in [0.0, 1.0]
    pub opacity: f32,
    /// Input settings, `None` for purely visual nodes
    pub control: Option<Control>,
    /// Marks the root node of a tab view
    pub view_root: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(name: impl Into<String>, control: Option<Control>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            opacity: 1.0,
            control,
            view_root: false,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
