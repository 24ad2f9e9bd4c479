//! Dynamically typed show argument

use std::any::{type_name, Any};

/// A value handed to a view's `show` hook.
///
/// The concrete type is erased so that one controller can drive views with
/// different argument types. The receiving view checks it against its
/// declared [`crate::ViewLifecycle::Arg`] before the hook runs.
pub struct OptionalArg {
    value: Box<dyn Any>,
    type_name: &'static str,
}

impl OptionalArg {
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Name of the type the argument was created from
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Take the value out, or get the argument back if the type is wrong
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        let type_name = self.type_name;
        self.value
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|value| Self { value, type_name })
    }
}

impl std::fmt::Debug for OptionalArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionalArg")
            .field("type", &self.type_name)
            .finish_non_exhaustive()
    }
}
