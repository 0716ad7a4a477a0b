//! Interactive trait for components that handle input
//!
//! The App routes keyboard events to the focused component and mouse events
//! to whichever component's area contains the pointer.

use super::Component;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::Rect;

/// Result of handling an input event
///
/// Tells the App whether the component consumed the event or
/// if it should bubble up for global handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled, should bubble up
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Trait for components that handle keyboard and mouse input
///
/// # Event Flow
///
/// ```text
/// KeyEvent
///    │
///    ▼
/// App (Tab / Shift+Tab focus cycling, Ctrl+C)
///    │
///    ▼
/// Focused Component (via Interactive trait)
///    │
///    │ returns Handled::Yes or Handled::No
///    ▼
/// App (fallback handlers: q)
/// ```
pub trait Interactive: Component {
    /// Handle a key event while focused
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Handle a mouse event; `area` is the component's last rendered area
    ///
    /// Default ignores the mouse.
    fn handle_mouse(&mut self, _mouse: MouseEvent, _area: Rect) -> Handled {
        Handled::No
    }

    /// Called when the pointer moves out of the component's area
    fn pointer_left(&mut self) {}

    /// Keybind hints shown in the status bar while focused
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}
