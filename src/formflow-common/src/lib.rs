//! # Formflow Common
//!
//! UI-free core logic shared by the Formflow widget library and demo:
//!
//! - [`validation`] - tri-state validity rules for text, email, URL and
//!   number fields, plus stepper arithmetic.
//! - [`options`] - select option lists and search filtering.
//! - [`files`] - file descriptors, accept specifiers and the intake
//!   validation pipeline.
//! - [`preview`] - transient image preview handles.
//! - [`clock`] - `HH:MM` parsing and date/time merging.
//!
//! Everything in this crate is a pure, synchronous computation: no
//! rendering, no terminal, no background work. Widgets call into these
//! rules on every change and render whatever comes back.

pub mod clock;
pub mod files;
pub mod options;
pub mod preview;
pub mod validation;

pub use clock::{apply_time, parse_hhmm, with_time_of};
pub use files::{AcceptSpecifier, FileDescriptor, IntakeError, IntakePolicy, format_size};
pub use options::{SelectOption, filter_options};
pub use preview::PreviewHandle;
pub use validation::{NumberRule, TextKind, TextRule, Validity, round_to_precision};
