//! FreeTab Core
//!
//! Entry point for applications: re-exports the workspace crates, loads
//! [`FreeTabConfig`], installs logging and wires controllers into a
//! [`TabHost`].

mod config;
mod error;
mod host;

pub use config::FreeTabConfig;
pub use error::CoreError;
pub use host::TabHost;

// Re-export workspace components
pub use freetab_scene::{
    Control, FocusMode, InteractivityCache, MouseFilter, NodeId, SceneError, SceneTree,
};
pub use freetab_tabs::{
    ArgumentResolver, CheckButton, ObserverId, SelectorButton, Selection, TabController,
    TabError, TabInstanceSetup, TabTemplateSetup, ViewEvent,
};
pub use freetab_transition::{
    Animator, EasingFn, FadeTransition, NoneTransition, TransitionError, TransitionStrategy,
};
pub use freetab_view::{
    run_protected, CallbackFault, Notification, OptionalArg, ViewError, ViewItem, ViewLifecycle,
    ViewState,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// `RUST_LOG` wins over the configured filter when it is set.
pub fn init_logging(config: &FreeTabConfig) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .map_err(|e| CoreError::Config(format!("invalid log filter: {e}")))?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| CoreError::Config(format!("logging already initialized: {e}")))
}
