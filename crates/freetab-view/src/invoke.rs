//! Protected hook execution
//!
//! [`run_protected`] is the boundary between the controller and view code.
//! A hook that returns an error or panics is logged with its action, target
//! and hook name, and the fault is handed back to the caller as a value.
//!
//! Panics inside a protected call are intercepted by a process-wide panic
//! hook, installed on first use, which records the backtrace at the panic
//! site and keeps the default stderr report quiet. Panics outside protected
//! calls go to whatever hook was installed before.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Once;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaultKind {
    /// The hook returned `Err`
    Error,
    /// The hook panicked
    Panic,
}

impl FaultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultKind::Error => "error",
            FaultKind::Panic => "panic",
        }
    }
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A failed hook call.
#[derive(Error, Debug, Clone)]
#[error("{action}: {kind} ({error_type}) in {target}.{hook}: {message}")]
pub struct CallbackFault {
    /// What the caller was doing, e.g. "Show View"
    pub action: String,
    /// Name of the view the hook belongs to
    pub target: String,
    /// Name of the hook that failed
    pub hook: &'static str,
    pub kind: FaultKind,
    /// Type of the failure.
    ///
    /// For [`FaultKind::Error`] this is the leading identifier of the root
    /// cause's `Debug` output, which is the variant or struct name for
    /// derived impls, `io::Error(<kind>)` for I/O errors and `message` for
    /// ad-hoc `anyhow!` errors. For [`FaultKind::Panic`] it is the payload
    /// type: `&str`, `String` or `unknown`.
    pub error_type: String,
    /// Error chain, or the panic payload when it is a string
    pub message: String,
    /// `file:line:column` of the panic, when the hook panicked
    pub location: Option<String>,
    pub stack_trace: String,
    pub occurred_at: DateTime<Utc>,
}

struct PanicSite {
    location: Option<String>,
    stack_trace: String,
}

thread_local! {
    static PROTECTED_DEPTH: Cell<usize> = const { Cell::new(0) };
    static LAST_PANIC: RefCell<Option<PanicSite>> = const { RefCell::new(None) };
}

static PANIC_HOOK: Once = Once::new();

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if PROTECTED_DEPTH.with(Cell::get) == 0 {
                previous(info);
                return;
            }
            let site = PanicSite {
                location: info
                    .location()
                    .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column())),
                stack_trace: Backtrace::force_capture().to_string(),
            };
            LAST_PANIC.with(|last| *last.borrow_mut() = Some(site));
        }));
    });
}

/// Marks the current thread as running a protected call.
struct ProtectedScope;

impl ProtectedScope {
    fn enter() -> Self {
        install_panic_hook();
        PROTECTED_DEPTH.with(|depth| depth.set(depth.get() + 1));
        LAST_PANIC.with(|last| last.borrow_mut().take());
        Self
    }
}

impl Drop for ProtectedScope {
    fn drop(&mut self) {
        PROTECTED_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

fn error_type(error: &anyhow::Error) -> String {
    let root = error.root_cause();
    if let Some(io) = root.downcast_ref::<std::io::Error>() {
        return format!("io::Error({:?})", io.kind());
    }

    let debug = format!("{root:?}");
    let name: String = debug
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == ':')
        .collect();
    if name.is_empty() {
        "message".to_string()
    } else {
        name
    }
}

impl CallbackFault {
    fn from_error(error: anyhow::Error, action: &str, target: &str, hook: &'static str) -> Self {
        Self {
            action: action.to_string(),
            target: target.to_string(),
            hook,
            kind: FaultKind::Error,
            error_type: error_type(&error),
            message: format!("{error:#}"),
            location: None,
            stack_trace: error.backtrace().to_string(),
            occurred_at: Utc::now(),
        }
    }

    fn from_panic(
        payload: Box<dyn std::any::Any + Send>,
        action: &str,
        target: &str,
        hook: &'static str,
    ) -> Self {
        let (error_type, message) = if let Some(s) = payload.downcast_ref::<&str>() {
            ("&str", (*s).to_string())
        } else if let Some(s) = payload.downcast_ref::<String>() {
            ("String", s.clone())
        } else {
            ("unknown", "unknown panic".to_string())
        };

        // Recorded by the panic hook at the panic site. Missing only when
        // another hook replaced ours after installation.
        let site = LAST_PANIC.with(|last| last.borrow_mut().take());
        let (location, stack_trace) = match site {
            Some(site) => (site.location, site.stack_trace),
            None => (None, Backtrace::capture().to_string()),
        };

        Self {
            action: action.to_string(),
            target: target.to_string(),
            hook,
            kind: FaultKind::Panic,
            error_type: error_type.to_string(),
            message,
            location,
            stack_trace,
            occurred_at: Utc::now(),
        }
    }

    fn report(self) -> Self {
        tracing::error!(
            action = %self.action,
            view = %self.target,
            hook = self.hook,
            kind = %self.kind,
            error_type = %self.error_type,
            message = %self.message,
            location = ?self.location,
            stack_trace = %self.stack_trace,
            "{} error: {} in {}.{}",
            self.action,
            self.error_type,
            self.target,
            self.hook
        );
        self
    }
}

/// Run a hook, absorbing any error or panic it raises.
///
/// The fault is already logged when this returns `Err`; callers only
/// inspect it if they care.
pub fn run_protected<F>(
    action: &str,
    target: &str,
    hook: &'static str,
    call: F,
) -> Result<(), CallbackFault>
where
    F: FnOnce() -> anyhow::Result<()>,
{
    let scope = ProtectedScope::enter();
    let outcome = catch_unwind(AssertUnwindSafe(call));
    drop(scope);

    match outcome {
        Ok(Ok(())) => Ok(()),
        Ok(Err(error)) => Err(CallbackFault::from_error(error, action, target, hook).report()),
        Err(payload) => Err(CallbackFault::from_panic(payload, action, target, hook).report()),
    }
}

/// One-argument form of [`run_protected`].
pub fn run_protected_with<T, F>(
    action: &str,
    target: &str,
    hook: &'static str,
    arg: T,
    call: F,
) -> Result<(), CallbackFault>
where
    F: FnOnce(T) -> anyhow::Result<()>,
{
    run_protected(action, target, hook, move || call(arg))
}
