//! Message input handling: key bindings and auto-growing height.

/// Keys the composer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

/// A keydown event in the message input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    pub fn enter() -> Self {
        Self {
            key: Key::Enter,
            shift: false,
        }
    }

    pub fn shift_enter() -> Self {
        Self {
            key: Key::Enter,
            shift: true,
        }
    }
}

/// What a keypress should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Send the current text; the default newline is suppressed.
    Submit,
    /// Insert a line break into the text.
    InsertNewline,
    /// Let the keystroke through untouched.
    Default,
}

impl KeyAction {
    pub fn for_key(press: KeyPress) -> Self {
        match press {
            KeyPress {
                key: Key::Enter,
                shift: false,
            } => KeyAction::Submit,
            KeyPress {
                key: Key::Enter,
                shift: true,
            } => KeyAction::InsertNewline,
            _ => KeyAction::Default,
        }
    }
}

/// Text and height of the message input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composer {
    value: String,
    /// Explicit height in px; `None` means auto (single row).
    height: Option<u32>,
}

impl Composer {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn height(&self) -> Option<u32> {
        self.height
    }

    /// Record new input text and grow to its measured scroll height,
    /// capped at `max_height`. Without a measurement the height stays auto.
    pub fn on_input(
        &mut self,
        value: impl Into<String>,
        scroll_height: Option<u32>,
        max_height: u32,
    ) {
        self.value = value.into();
        self.height = scroll_height.map(|px| px.min(max_height));
    }

    pub fn insert_newline(&mut self) {
        self.value.push('\n');
    }

    /// Empty the input and shrink back to auto height.
    pub fn reset(&mut self) {
        self.value.clear();
        self.height = None;
    }

    /// CSS height declaration.
    pub fn height_style(&self) -> String {
        match self.height {
            Some(px) => format!("height: {px}px"),
            None => "height: auto".to_string(),
        }
    }
}
