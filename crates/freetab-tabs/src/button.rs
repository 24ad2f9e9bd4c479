//! Selector buttons
//!
//! A tab button is anything that can report and set a pressed state without
//! emitting its own toggled signal. The host forwards real toggles to
//! [`crate::TabController::handle_button_toggled`].

/// A toggle button bound 1:1 to a view.
pub trait SelectorButton {
    fn name(&self) -> &str;

    fn is_pressed(&self) -> bool;

    /// Change the pressed state without raising the toggled signal.
    fn set_pressed_no_signal(&mut self, pressed: bool);
}

/// Plain in-memory toggle button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckButton {
    name: String,
    pressed: bool,
}

impl CheckButton {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pressed: false,
        }
    }
}

impl SelectorButton for CheckButton {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn set_pressed_no_signal(&mut self, pressed: bool) {
        self.pressed = pressed;
    }
}

/// Single-select group: at most one member pressed, and the pressed member
/// cannot be released by the user.
#[derive(Default)]
pub struct ButtonGroup {
    buttons: Vec<Box<dyn SelectorButton>>,
}

impl ButtonGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, button: Box<dyn SelectorButton>) {
        self.buttons.push(button);
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&dyn SelectorButton> {
        self.buttons.get(index).map(|b| b.as_ref())
    }

    /// Index of the first pressed member
    pub fn pressed_index(&self) -> Option<usize> {
        self.buttons.iter().position(|b| b.is_pressed())
    }

    /// Press exactly the member at `current`, or none. No signals fire.
    pub fn sync(&mut self, current: Option<usize>) {
        for (index, button) in self.buttons.iter_mut().enumerate() {
            button.set_pressed_no_signal(current == Some(index));
        }
    }
}

impl std::fmt::Debug for ButtonGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.buttons.iter().map(|b| (b.name(), b.is_pressed())))
            .finish()
    }
}
