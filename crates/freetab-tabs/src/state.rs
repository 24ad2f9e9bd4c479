//! Tab Selection State Machine
//!
//! ```text
//! Unselected
//!   ↓ show(j)            → Selected(j)
//!   ↓ show_next          → Selected(0)
//!   ↓ show_previous      → Selected(last)
//! Selected(i)
//!   ↓ show(j)            → Selected(j)
//!   ↓ show_next          → Selected(i + 1), at the end: Selected(0) or stay
//!   ↓ show_previous      → Selected(i - 1), at the start: Selected(last) or stay
//! ```
//!
//! "Stay" still hides and re-shows the current view.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "index", rename_all = "lowercase")]
pub enum Selection {
    /// No view has been shown yet
    #[default]
    Unselected,
    /// The view at this index is the current one
    Selected(usize),
}

impl Selection {
    pub fn index(&self) -> Option<usize> {
        match self {
            Selection::Unselected => None,
            Selection::Selected(index) => Some(*index),
        }
    }

    pub fn is_selected(&self, index: usize) -> bool {
        *self == Selection::Selected(index)
    }

    /// Target index of a "next" request over `len` views.
    pub fn next(&self, len: usize, wrap: bool) -> usize {
        match self {
            Selection::Unselected => 0,
            Selection::Selected(current) if current + 1 >= len => {
                if wrap {
                    0
                } else {
                    *current
                }
            }
            Selection::Selected(current) => current + 1,
        }
    }

    /// Target index of a "previous" request over `len` views.
    pub fn previous(&self, len: usize, wrap: bool) -> usize {
        let last = len.saturating_sub(1);
        match self {
            Selection::Unselected => last,
            Selection::Selected(0) => {
                if wrap {
                    last
                } else {
                    0
                }
            }
            Selection::Selected(current) => current - 1,
        }
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::Unselected => write!(f, "unselected"),
            Selection::Selected(index) => write!(f, "selected({index})"),
        }
    }
}
