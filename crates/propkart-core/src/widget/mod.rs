//! The floating chat widget.
//!
//! [`ChatWidget`] owns the transcript, the presentation state, and the
//! in-flight guard; [`view::render`] turns a [`WidgetState`] snapshot into
//! a render tree.

pub mod composer;
pub mod controller;
pub mod mount;
pub mod presentation;
pub mod view;

pub use composer::{Composer, Key, KeyAction, KeyPress};
pub use controller::{ChatWidget, ClearOutcome, HistoryOutcome, SendOutcome, WidgetState};
pub use mount::should_mount;
pub use presentation::{Presentation, WidgetAction};
