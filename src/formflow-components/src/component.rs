//! Core Component trait and types.
//!
//! Every interactive widget implements [`Component`]: a consistent
//! interface for rendering, key handling and focus, so the page
//! composition can route input without knowing which field it is
//! talking to.

use crossterm::event::KeyEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

/// Result of handling a key event in a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentResult<T = ()> {
    /// Component handled the event, continue displaying
    Handled,
    /// Component did not handle the event, propagate to parent
    NotHandled,
    /// Component completed with a value
    Done(T),
    /// Component was dismissed (e.g. Escape pressed)
    Cancelled,
}

impl<T> ComponentResult<T> {
    /// Returns true if the component consumed the event.
    pub fn is_handled(&self) -> bool {
        matches!(self, ComponentResult::Handled | ComponentResult::Done(_))
    }

    /// Maps the inner value if `Done`.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ComponentResult<U> {
        match self {
            ComponentResult::Handled => ComponentResult::Handled,
            ComponentResult::NotHandled => ComponentResult::NotHandled,
            ComponentResult::Done(v) => ComponentResult::Done(f(v)),
            ComponentResult::Cancelled => ComponentResult::Cancelled,
        }
    }
}

/// Focus state of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    /// Component is not focused
    #[default]
    Unfocused,
    /// Component has focus
    Focused,
    /// Component has focus and an open popup or edit surface
    Editing,
}

impl FocusState {
    /// Returns true if the component has any form of focus.
    pub fn has_focus(&self) -> bool {
        !matches!(self, FocusState::Unfocused)
    }

    /// Returns true if the component has an open popup or edit surface.
    pub fn is_editing(&self) -> bool {
        matches!(self, FocusState::Editing)
    }
}

/// Core trait for all form widgets.
pub trait Component {
    /// The type of value this component reports upward.
    type Output;

    /// Render the component into the buffer.
    fn render(&self, area: Rect, buf: &mut Buffer);

    /// Handle a key event.
    fn handle_key(&mut self, key: KeyEvent) -> ComponentResult<Self::Output>;

    /// Returns the current focus state of the component.
    fn focus_state(&self) -> FocusState;

    /// Set the focus state of the component.
    fn set_focus(&mut self, focused: bool);

    /// Key hints to display for this component, as (key, description).
    fn key_hints(&self) -> Vec<(&'static str, &'static str)>;

    /// Handle pasted text. Returns true if handled.
    fn handle_paste(&mut self, _text: &str) -> bool {
        false
    }

    /// Rows this component needs at the given width, chrome included.
    fn desired_height(&self, width: u16) -> u16;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_result_is_handled() {
        assert!(ComponentResult::<()>::Handled.is_handled());
        assert!(ComponentResult::Done(1).is_handled());
        assert!(!ComponentResult::<()>::NotHandled.is_handled());
        assert!(!ComponentResult::<()>::Cancelled.is_handled());
    }

    #[test]
    fn component_result_map() {
        let done: ComponentResult<i32> = ComponentResult::Done(21);
        assert_eq!(done.map(|x| x * 2), ComponentResult::Done(42));

        let handled: ComponentResult<i32> = ComponentResult::Handled;
        assert_eq!(handled.map(|x| x * 2), ComponentResult::Handled);
    }

    #[test]
    fn focus_state_predicates() {
        assert!(!FocusState::Unfocused.has_focus());
        assert!(FocusState::Focused.has_focus());
        assert!(FocusState::Editing.is_editing());
        assert!(!FocusState::Focused.is_editing());
    }
}
