//! Observation events and argument resolvers

use freetab_view::{run_protected, OptionalArg, ViewItem};

/// Computes the show argument for a view when the caller gives none.
/// Returning `None` falls back to the declared type's default value.
pub type ArgumentResolver = Box<dyn Fn(&ViewItem) -> Option<OptionalArg>>;

type Observer = Box<dyn FnMut(usize, &ViewItem)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

impl std::fmt::Display for ObserverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "observer-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewEvent {
    Show,
    Hide,
}

impl ViewEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewEvent::Show => "on_show",
            ViewEvent::Hide => "on_hide",
        }
    }
}

impl std::fmt::Display for ViewEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(ObserverId, ViewEvent, Observer)>,
}

impl Observers {
    pub fn add<F>(&mut self, event: ViewEvent, observer: F) -> ObserverId
    where
        F: FnMut(usize, &ViewItem) + 'static,
    {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, event, Box::new(observer)));
        id
    }

    pub fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Fire `event` for the view at `index`, in registration order.
    /// A panicking observer is logged and skipped.
    pub fn emit(&mut self, event: ViewEvent, index: usize, view: &ViewItem) {
        let action = match event {
            ViewEvent::Show => "View Shown Event",
            ViewEvent::Hide => "View Hidden Event",
        };

        for (_, _, observer) in self.entries.iter_mut().filter(|(_, e, _)| *e == event) {
            let _ = run_protected(action, view.name(), event.as_str(), || {
                observer(index, view);
                Ok(())
            });
        }
    }
}
