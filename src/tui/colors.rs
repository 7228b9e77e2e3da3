use ratatui::style::Color;

pub const STAR_FILLED: &str = "\u{2605}";
pub const STAR_EMPTY: &str = "\u{2606}";

pub fn rating_color(rating: f64) -> Color {
    if rating >= 4.0 {
        Color::Green
    } else if rating >= 2.5 {
        Color::Yellow
    } else if rating > 0.0 {
        Color::Red
    } else {
        Color::DarkGray
    }
}

/// Display label for the catalog's print-type classifier.
pub fn format_label(print_type: &str) -> &str {
    match print_type {
        "BOOK" => "Book",
        "MAGAZINE" => "Magazine",
        "Unknown" | "" => "Unknown",
        other => other,
    }
}

/// Cycle tag pills through a small accent palette.
pub fn tag_color(index: usize) -> Color {
    const PALETTE: &[Color] = &[Color::Cyan, Color::Magenta, Color::LightBlue];
    PALETTE[index % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_buckets() {
        assert_eq!(rating_color(4.5), Color::Green);
        assert_eq!(rating_color(3.0), Color::Yellow);
        assert_eq!(rating_color(1.0), Color::Red);
        assert_eq!(rating_color(0.0), Color::DarkGray);
    }

    #[test]
    fn format_labels() {
        assert_eq!(format_label("BOOK"), "Book");
        assert_eq!(format_label("MAGAZINE"), "Magazine");
        assert_eq!(format_label(""), "Unknown");
        assert_eq!(format_label("AUDIOBOOK"), "AUDIOBOOK");
    }
}
