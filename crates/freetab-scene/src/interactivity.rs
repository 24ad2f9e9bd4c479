//! Subtree interactivity toggling
//!
//! Disabling input on a subtree records each touched control's settings in
//! an [`InteractivityCache`] keyed by [`NodeId`]; enabling puts back exactly
//! what was recorded. Nested view roots are skipped so that an independent
//! tab view living inside this one keeps its own input state.

use std::collections::HashMap;

use crate::node::{Control, NodeId};
use crate::tree::NodeTree;
use crate::Result;

/// Input settings captured when a control was disabled.
pub type CachedControl = Control;

#[derive(Debug, Clone, Default)]
pub struct InteractivityCache {
    entries: HashMap<NodeId, CachedControl>,
}

impl InteractivityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&CachedControl> {
        self.entries.get(&id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl NodeTree {
    /// Enable or disable focus and pointer input for `root` and its
    /// descendants, skipping descendants flagged as view roots.
    pub fn set_subtree_interactive(
        &mut self,
        root: NodeId,
        enabled: bool,
        cache: &mut InteractivityCache,
    ) -> Result<()> {
        self.get(root)?;

        if enabled {
            self.enable_recursive(root, cache);
            cache.clear();
        } else {
            cache.clear();
            self.disable_recursive(root, cache);
        }

        tracing::trace!(root = %root, enabled, cached = cache.len(), "Toggled subtree interactivity");

        Ok(())
    }

    fn disable_recursive(&mut self, root: NodeId, cache: &mut InteractivityCache) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Ok(node) = self.get_mut(id) else {
                continue;
            };

            if let Some(control) = node.control.as_mut() {
                if control.is_interactive() {
                    cache.entries.insert(id, *control);
                    *control = Control::inert();
                }
            }

            let children: Vec<NodeId> = node.children.clone();
            for child in children.into_iter().rev() {
                if self.get(child).map(|c| c.view_root).unwrap_or(true) {
                    continue;
                }
                stack.push(child);
            }
        }
    }

    fn enable_recursive(&mut self, root: NodeId, cache: &mut InteractivityCache) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Ok(node) = self.get_mut(id) else {
                continue;
            };

            if let Some(cached) = cache.entries.remove(&id) {
                if let Some(control) = node.control.as_mut() {
                    *control = cached;
                }
            }

            let children: Vec<NodeId> = node.children.clone();
            for child in children.into_iter().rev() {
                if self.get(child).map(|c| c.view_root).unwrap_or(true) {
                    continue;
                }
                stack.push(child);
            }
        }
    }
}
