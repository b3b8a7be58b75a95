use plotters::chart::SeriesLabelPosition;
use plotters::prelude::*;

/// Marker shape for one series, with its pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Dot(i32),
    Cross(i32),
    Triangle(i32),
    Pixel,
}

// Used when the color string runs out of known one-char codes.
const FALLBACK_COLORS: &[RGBColor] = &[RED, BLUE, YELLOW, GREEN, CYAN, MAGENTA, BLACK];

/// Color for the series at `index`, cycling over a string of one-char
/// matplotlib-style color codes.
pub fn color_for(cycle: &str, index: usize) -> RGBColor {
    let code = pick(cycle, index);
    match code {
        Some('r') => RED,
        Some('b') => BLUE,
        Some('g') => GREEN,
        Some('y') => YELLOW,
        Some('c') => CYAN,
        Some('m') => MAGENTA,
        Some('k') => BLACK,
        Some('w') => WHITE,
        _ => FALLBACK_COLORS[index % FALLBACK_COLORS.len()],
    }
}

/// Marker for the series at `index`, cycling over a string of one-char
/// matplotlib-style shape codes.  The shape cycle is independent of the
/// color cycle.
pub fn marker_for(cycle: &str, index: usize) -> Marker {
    match pick(cycle, index) {
        Some('O') => Marker::Dot(5),
        Some('.') => Marker::Dot(1),
        Some(',') => Marker::Pixel,
        Some('+') => Marker::Cross(4),
        Some('x') => Marker::Cross(3),
        Some('^') => Marker::Triangle(4),
        _ => Marker::Dot(3), // 'o' and anything unknown
    }
}

fn pick(cycle: &str, index: usize) -> Option<char> {
    let count = cycle.chars().count();
    if count == 0 {
        None
    } else {
        cycle.chars().nth(index % count)
    }
}

/// Maps a matplotlib-style legend location label to a plotters position.
/// Unknown labels fall back to the upper left corner.
pub fn legend_position(label: &str) -> SeriesLabelPosition {
    match label {
        "upper right" => SeriesLabelPosition::UpperRight,
        "lower left" => SeriesLabelPosition::LowerLeft,
        "lower right" => SeriesLabelPosition::LowerRight,
        "upper center" => SeriesLabelPosition::UpperMiddle,
        "lower center" => SeriesLabelPosition::LowerMiddle,
        "center left" => SeriesLabelPosition::MiddleLeft,
        "center right" => SeriesLabelPosition::MiddleRight,
        "center" => SeriesLabelPosition::MiddleMiddle,
        _ => SeriesLabelPosition::UpperLeft,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_cycle() {
        assert_eq!(color_for("rbyg", 0), RED);
        assert_eq!(color_for("rbyg", 1), BLUE);
        assert_eq!(color_for("rbyg", 4), RED);
        assert_eq!(color_for("rbyg", 7), GREEN);
    }

    #[test]
    fn color_fallbacks() {
        // Unknown code and empty cycle both pick from the fallback palette
        assert_eq!(color_for("z", 0), FALLBACK_COLORS[0]);
        assert_eq!(color_for("", 1), FALLBACK_COLORS[1]);
    }

    #[test]
    fn marker_cycle_is_independent() {
        assert_eq!(marker_for("o+", 0), Marker::Dot(3));
        assert_eq!(marker_for("o+", 1), Marker::Cross(4));
        assert_eq!(marker_for("o+", 2), Marker::Dot(3));
        assert_eq!(marker_for("", 5), Marker::Dot(3));
        assert_eq!(marker_for(",", 0), Marker::Pixel);
    }

    #[test]
    fn legend_positions() {
        assert!(matches!(
            legend_position("lower right"),
            SeriesLabelPosition::LowerRight
        ));
        assert!(matches!(
            legend_position("best"),
            SeriesLabelPosition::UpperLeft
        ));
    }
}
