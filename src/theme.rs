//! Theme module for grind-tui
//!
//! This module provides a centralized color palette and styling constants
//! for the "midnight study desk" aesthetic.

use ratatui::style::Color;
use ratatui::symbols::border;

use crate::models::Difficulty;

/// Rounded border set used by all cards and panels
pub const ROUNDED_BORDERS: border::Set = border::ROUNDED;

// ============================================================================
// Background Colors - Deep Space Palette
// ============================================================================

/// Primary background color - deepest space black (#0a0e14)
pub const BG_PRIMARY: Color = Color::Rgb(10, 14, 20);

/// Secondary background color - slightly lighter (#12161c)
pub const BG_SECONDARY: Color = Color::Rgb(18, 22, 28);

/// Subtle border color (#1e2530)
pub const BORDER_SUBTLE: Color = Color::Rgb(30, 37, 48);

// ============================================================================
// Accent Colors - Cyan/Teal Primary
// ============================================================================

/// Primary cyan accent color (#00d4aa)
pub const CYAN_PRIMARY: Color = Color::Rgb(0, 212, 170);

// ============================================================================
// Status Colors
// ============================================================================

/// Green success color (#4ade80)
pub const GREEN_SUCCESS: Color = Color::Rgb(74, 222, 128);

/// Amber warning color (#fbbf24)
pub const AMBER_WARNING: Color = Color::Rgb(251, 191, 36);

/// Red error color (#f87171)
pub const RED_ERROR: Color = Color::Rgb(248, 113, 113);

// ============================================================================
// Text Colors
// ============================================================================

/// Primary text color - bright white (#e2e8f0)
pub const TEXT_PRIMARY: Color = Color::Rgb(226, 232, 240);

/// Secondary text color - muted gray (#94a3b8)
pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184);

/// Muted text color - for labels and hints (#64748b)
pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139);

/// Badge color for a difficulty tier. Unknown tiers stay unstyled.
pub fn difficulty_color(difficulty: &Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => GREEN_SUCCESS,
        Difficulty::Medium => AMBER_WARNING,
        Difficulty::Hard => RED_ERROR,
        Difficulty::Other(_) => TEXT_SECONDARY,
    }
}
