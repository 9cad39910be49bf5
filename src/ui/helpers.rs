//! UI helper functions

use ratatui::prelude::*;

use crate::models::Difficulty;
use crate::theme::{difficulty_color, TEXT_SECONDARY};

/// Text progress bar like `████████░░░░ 67%`
pub fn progress_bar(percent: u8, width: usize) -> String {
    if width == 0 {
        return format!("{percent}%");
    }
    let filled = (width * percent as usize) / 100;
    let mut bar = String::new();
    for _ in 0..filled {
        bar.push('█');
    }
    for _ in filled..width {
        bar.push('░');
    }
    format!("{bar} {percent}%")
}

/// Difficulty badge with the tier's color and point value
pub fn difficulty_badge(difficulty: &Difficulty) -> Span<'static> {
    Span::styled(
        format!(" {} +{:.0} ", difficulty.label(), difficulty.points()),
        Style::default().fg(difficulty_color(difficulty)),
    )
}

/// Plain secondary-text badge (topic names)
pub fn badge(text: &str) -> Span<'static> {
    Span::styled(format!(" {text} "), Style::default().fg(TEXT_SECONDARY))
}

/// Truncate to a character budget, appending `...` when cut
pub fn truncate(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        return text.to_string();
    }
    let take_chars = max_chars.saturating_sub(3);
    let truncated: String = text.chars().take(take_chars).collect();
    format!("{truncated}...")
}

/// Line offset that keeps the selected line visible in a viewport
pub fn scroll_offset(selected: usize, viewport_height: usize) -> usize {
    if viewport_height == 0 {
        return selected;
    }
    selected.saturating_sub(viewport_height - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0, 4), "░░░░ 0%");
        assert_eq!(progress_bar(100, 4), "████ 100%");
        assert_eq!(progress_bar(50, 4), "██░░ 50%");
    }

    #[test]
    fn test_progress_bar_zero_width() {
        assert_eq!(progress_bar(40, 0), "40%");
    }

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("Two Sum", 10), "Two Sum");
    }

    #[test]
    fn test_truncate_cuts_on_char_boundary() {
        assert_eq!(truncate("Binary Tree Maximum Path Sum", 10), "Binary ...");
    }

    #[test]
    fn test_scroll_offset() {
        assert_eq!(scroll_offset(0, 10), 0);
        assert_eq!(scroll_offset(5, 10), 0);
        assert_eq!(scroll_offset(12, 10), 3);
        assert_eq!(scroll_offset(3, 0), 3);
    }
}
