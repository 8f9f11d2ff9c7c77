//! The Formflow visual identity.
//!
//! A single cohesive theme: violet accents over deep neutral surfaces.
//! Components use these constants exclusively; no widget hardcodes a
//! color.

use ratatui::style::Color;

// ============================================================================
// Accent
// ============================================================================

/// Primary accent - focus highlights, selection, the submit button.
pub const ACCENT: Color = Color::Rgb(139, 92, 246); // #8B5CF6

/// Darker accent for pressed/active surfaces.
pub const ACCENT_DARK: Color = Color::Rgb(109, 40, 217); // #6D28D9

/// Washed-out accent for selected-tag backgrounds.
pub const ACCENT_SOFT: Color = Color::Rgb(76, 56, 140); // #4C388C

// ============================================================================
// Surfaces
// ============================================================================

/// Deepest background.
pub const VOID: Color = Color::Rgb(17, 17, 27); // #11111B

/// Base surface (page background).
pub const SURFACE_0: Color = Color::Rgb(24, 24, 37); // #181825

/// Raised surface (inputs, dropdown rows).
pub const SURFACE_1: Color = Color::Rgb(35, 35, 52); // #232334

/// Highlighted surface (hovered/selected rows).
pub const SURFACE_2: Color = Color::Rgb(49, 50, 68); // #313244

// ============================================================================
// Text
// ============================================================================

/// Primary text.
pub const TEXT: Color = Color::Rgb(230, 230, 240); // #E6E6F0

/// Secondary text (descriptions, captions).
pub const TEXT_DIM: Color = Color::Rgb(147, 153, 178); // #9399B2

/// Muted text (placeholders, disabled).
pub const TEXT_MUTED: Color = Color::Rgb(98, 102, 128); // #626680

// ============================================================================
// Status
// ============================================================================

/// Valid-input indicator.
pub const SUCCESS: Color = Color::Rgb(134, 239, 172); // #86EFAC

/// Warnings (selection maximum reached).
pub const WARNING: Color = Color::Rgb(250, 204, 21); // #FACC15

/// Errors and invalid-input indicators.
pub const ERROR: Color = Color::Rgb(248, 113, 113); // #F87171

// ============================================================================
// Borders
// ============================================================================

/// Default border.
pub const BORDER: Color = Color::Rgb(69, 71, 90); // #45475A

/// Border of the focused control.
pub const BORDER_FOCUS: Color = ACCENT;
