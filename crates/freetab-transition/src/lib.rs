//! FreeTab Transitions
//!
//! A view's visual show/hide behavior is delegated to a
//! [`TransitionStrategy`]. Two strategies ship with the crate:
//!
//! - [`NoneTransition`]: flips visibility instantly
//! - [`FadeTransition`]: tweens opacity through the [`Animator`], with the
//!   last call for a given view cancelling any fade still in flight

mod animator;
mod error;
mod fade;
mod none;
mod strategy;

pub use animator::{ease_in, ease_in_out, ease_out, linear, Animator, EasingFn, TweenId};
pub use error::TransitionError;
pub use fade::{FadeTransition, DEFAULT_FADE_DURATION};
pub use none::NoneTransition;
pub use strategy::TransitionStrategy;

pub type Result<T> = std::result::Result<T, TransitionError>;
