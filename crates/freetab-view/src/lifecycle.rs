//! View lifecycle contract

use serde::{Deserialize, Serialize};

/// Notifications the host delivers to a view's root node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notification {
    EnterTree,
    Ready,
    ExitTree,
    VisibilityChanged,
    Resized,
    FocusEnter,
    FocusExit,
    /// The node is about to be destroyed
    Predelete,
    /// Host-specific notification code
    Custom(i32),
}

/// Hooks a tab view implements.
///
/// Every hook is run through [`crate::run_protected`]: returning an error or
/// panicking is logged and does not disturb the controller or other views.
///
/// ```ignore
/// struct Inbox { folder: String }
///
/// impl ViewLifecycle for Inbox {
///     type Arg = Option<String>;
///
///     fn show(&mut self, folder: Option<String>) -> anyhow::Result<()> {
///         if let Some(folder) = folder {
///             self.folder = folder;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait ViewLifecycle: 'static {
    /// Argument accepted by [`ViewLifecycle::show`]. When the caller gives
    /// none, `Arg::default()` is passed. Use `()` for views that take none.
    type Arg: Default + 'static;

    /// Called once, when the controller is built.
    fn initialize(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called every time the view becomes the selected tab.
    fn show(&mut self, arg: Self::Arg) -> anyhow::Result<()> {
        let _ = arg;
        Ok(())
    }

    /// Called every time the view stops being the selected tab.
    fn hide(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called for every notification the host delivers.
    fn notify(&mut self, what: Notification) -> anyhow::Result<()> {
        let _ = what;
        Ok(())
    }

    /// Called once, right before the view's node is destroyed.
    fn predelete(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}
