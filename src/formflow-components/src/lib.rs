//! # Formflow Components
//!
//! A form-widget library for terminal UIs. Each widget is a leaf-level
//! component bound to one value: it renders a labeled control through
//! the shared [`chrome::FieldChrome`], applies its validation rule on
//! every change, and exposes the current value through an accessor the
//! page composition re-reads after dispatching input.
//!
//! ## Widgets
//!
//! - [`TextField`](text_field::TextField) - text / email / URL input
//!   with tri-state validity
//! - [`NumberField`](number_field::NumberField) - numeric input with
//!   stepper, bounds and precision
//! - [`BooleanField`](boolean_field::BooleanField) - switch or checkbox
//! - [`SelectField`](select_field::SelectField) - single-value dropdown
//!   with search and clear
//! - [`MultiSelectField`](multi_select_field::MultiSelectField) -
//!   multi-value dropdown with tags and a selection maximum
//! - [`DateTimeField`](datetime_field::DateTimeField) - calendar
//!   popover plus `HH:MM` time entry
//! - [`FileField`](file_field::FileField) /
//!   [`MultiFileField`](multi_file_field::MultiFileField) - size- and
//!   type-checked file intake with image previews
//! - [`EditorField`](editor_field::EditorField) - rich-text toolbar
//!   over an external editing engine
//!
//! ## Contract
//!
//! All widgets implement [`component::Component`]: `render` into a
//! buffer, `handle_key` returning a [`component::ComponentResult`],
//! focus state, and key hints. Widgets own only transient UI state
//! (open/closed, search text, cursors, preview handles); authoritative
//! values live in the enclosing page.

pub mod boolean_field;
pub mod borders;
pub mod chrome;
pub mod component;
pub mod datetime_field;
pub mod editor_field;
pub mod file_field;
pub mod focus;
pub mod key_hints;
pub mod line_edit;
pub mod multi_file_field;
pub mod multi_select_field;
pub mod number_field;
pub mod scroll;
pub mod select_field;
pub mod style;
pub mod text_field;
pub mod url_modal;

/// Commonly used types and traits for quick imports.
pub mod prelude {
    pub use crate::boolean_field::{BooleanField, BooleanVariant};
    pub use crate::borders::{FieldBorder, ROUNDED_BORDER};
    pub use crate::chrome::FieldChrome;
    pub use crate::component::{Component, ComponentResult, FocusState};
    pub use crate::datetime_field::DateTimeField;
    pub use crate::editor_field::{EditorCommand, EditorField};
    pub use crate::file_field::FileField;
    pub use crate::focus::FocusRing;
    pub use crate::key_hints::KeyHintsBar;
    pub use crate::line_edit::LineEdit;
    pub use crate::multi_file_field::{FileEntry, MultiFileField};
    pub use crate::multi_select_field::MultiSelectField;
    pub use crate::number_field::NumberField;
    pub use crate::scroll::ScrollState;
    pub use crate::select_field::SelectField;
    pub use crate::text_field::TextField;
    pub use crate::url_modal::{UrlModal, UrlModalResult};
    pub use formflow_common::{SelectOption, Validity};
}

/// Formflow components version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
