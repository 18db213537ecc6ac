//! Widget presentation state machine.
//!
//! A single tagged state replaces independent "minimized" and "hidden"
//! flags, so combinations like hidden-and-minimized cannot be represented.

use std::fmt;

/// How the widget is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Presentation {
    /// Panel expanded, launcher hidden.
    Open,
    /// Panel collapsed, launcher shown.
    #[default]
    Minimized,
    /// Panel removed from view, launcher shown.
    Hidden,
}

/// User interactions that can change the presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetAction {
    Open,
    Close,
    ToggleMinimize,
    LauncherClick,
    HeaderClick,
}

impl Presentation {
    /// Transition table.
    ///
    /// | from \ action | Open | Close  | ToggleMinimize | LauncherClick | HeaderClick |
    /// |---------------|------|--------|----------------|---------------|-------------|
    /// | Open          | Open | Hidden | Minimized      | Minimized     | Open        |
    /// | Minimized     | Open | Hidden | Open           | Open          | Open        |
    /// | Hidden        | Open | Hidden | Hidden         | Open          | Hidden      |
    pub fn apply(self, action: WidgetAction) -> Presentation {
        use Presentation::*;
        use WidgetAction as A;

        match (self, action) {
            (_, A::Open) => Open,
            (_, A::Close) => Hidden,
            (Open, A::ToggleMinimize | A::LauncherClick) => Minimized,
            (Minimized, A::ToggleMinimize | A::LauncherClick | A::HeaderClick) => Open,
            (Open, A::HeaderClick) => Open,
            // The minimize control and header are not reachable while hidden.
            (Hidden, A::ToggleMinimize | A::HeaderClick) => Hidden,
            (Hidden, A::LauncherClick) => Open,
        }
    }

    pub fn launcher_visible(&self) -> bool {
        !matches!(self, Presentation::Open)
    }

    /// The launcher pulses whenever it is shown.
    pub fn launcher_pulsing(&self) -> bool {
        self.launcher_visible()
    }

    pub fn minimize_label(&self) -> &'static str {
        match self {
            Presentation::Minimized => "+",
            _ => "−",
        }
    }
}

impl fmt::Display for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Presentation::Open => write!(f, "open"),
            Presentation::Minimized => write!(f, "minimized"),
            Presentation::Hidden => write!(f, "hidden"),
        }
    }
}
