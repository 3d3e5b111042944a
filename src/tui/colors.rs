//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// Header and status bar background
pub const DARK_GREEN: Color = Color::Rgb(0, 80, 0);
/// Text input being edited
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Confirmation dialogs
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
/// Subtask rows
pub const SOFT_BLUE: Color = Color::Rgb(140, 170, 220);
