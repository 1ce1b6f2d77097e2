//! Deterministic subject styling for records the server did not style.

use serde::Serialize;

/// Accent colors cycled through by list position.
pub const SUBJECT_COLORS: [&str; 7] = [
    "#2f6aff", "#00c274", "#8b3dff", "#ff7a2f", "#ff4f9b", "#1db9ff", "#ffb03a",
];

/// Icon names cycled through by list position.
pub const SUBJECT_ICONS: [&str; 7] = [
    "book-outline",
    "calculator-outline",
    "flask-outline",
    "earth-outline",
    "color-palette-outline",
    "podium-outline",
    "school-outline",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SubjectStyle {
    pub color: &'static str,
    pub icon: &'static str,
}

/// Style for the subject at `index`; adjacent indices never share a color or icon.
#[must_use]
pub fn style_for(index: usize) -> SubjectStyle {
    SubjectStyle {
        color: SUBJECT_COLORS[index % SUBJECT_COLORS.len()],
        icon: SUBJECT_ICONS[index % SUBJECT_ICONS.len()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_around_the_palette() {
        assert_eq!(style_for(0), style_for(SUBJECT_COLORS.len()));
        assert_eq!(style_for(1).color, "#00c274");
        assert_eq!(style_for(1).icon, "calculator-outline");
    }

    #[test]
    fn adjacent_items_differ() {
        for index in 0..32 {
            let a = style_for(index);
            let b = style_for(index + 1);
            assert_ne!(a.color, b.color);
            assert_ne!(a.icon, b.icon);
        }
    }
}
