//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::Priority;

/// High priority badge.
pub const ROSE: Color = Color::Rgb(244, 63, 94);
/// Medium priority badge.
pub const AMBER: Color = Color::Rgb(245, 158, 11);
/// Low priority badge.
pub const SKY: Color = Color::Rgb(14, 165, 233);
/// Accent for headers, the progress gauge and the status bar.
pub const INDIGO: Color = Color::Rgb(79, 70, 229);
/// Completed rows and secondary text.
pub const SLATE: Color = Color::Rgb(100, 116, 139);
pub const EMERALD: Color = Color::Rgb(16, 185, 129);

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => ROSE,
        Priority::Medium => AMBER,
        Priority::Low => SKY,
    }
}
