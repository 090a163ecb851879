/// Hard floor for a day column; below this the grid stops being legible.
pub const MIN_COLUMN_WIDTH: f32 = 6.0;

/// Paper size for the export layout, in PostScript points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    A4,
    A3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl PageFormat {
    /// (width, height) in points for the given orientation.
    pub fn dimensions(self, orientation: Orientation) -> (f32, f32) {
        let (short, long) = match self {
            PageFormat::A4 => (595.0, 842.0),
            PageFormat::A3 => (842.0, 1191.0),
        };
        match orientation {
            Orientation::Portrait => (short, long),
            Orientation::Landscape => (long, short),
        }
    }
}

/// The drawing surface one layout pass targets: a printed page or the
/// interactive viewport. Carries the width actually available to day
/// columns and the legibility band the column width is clamped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub target_width: f32,
    pub label_width: f32,
    pub margins: f32,
    pub min_column: f32,
    pub max_column: f32,
}

impl Surface {
    /// Surface for a printed page. Larger / landscape formats get a wider
    /// clamp band, compact portrait formats a narrower one.
    pub fn page(format: PageFormat, orientation: Orientation) -> Self {
        let (width, _) = format.dimensions(orientation);
        let (min_column, max_column) = match (format, orientation) {
            (PageFormat::A3, Orientation::Landscape) => (10.0, 30.0),
            (PageFormat::A3, Orientation::Portrait) => (8.0, 24.0),
            (PageFormat::A4, Orientation::Landscape) => (8.0, 24.0),
            (PageFormat::A4, Orientation::Portrait) => (MIN_COLUMN_WIDTH, 18.0),
        };
        Self {
            target_width: width,
            label_width: 130.0,
            margins: 2.0 * 24.0,
            min_column,
            max_column,
        }
    }

    /// Surface for the interactive chart, sized from the current viewport.
    pub fn viewport(width: f32, label_width: f32) -> Self {
        Self {
            target_width: width,
            label_width,
            margins: 0.0,
            min_column: MIN_COLUMN_WIDTH,
            max_column: 48.0,
        }
    }

    /// Width available to day columns after the label column and margins.
    pub fn available_width(&self) -> f32 {
        (self.target_width - self.label_width - self.margins).max(0.0)
    }
}

/// Derive the uniform per-day column width for a grid of `n_days` columns.
///
/// The raw share is floored, then clamped into the surface's legibility
/// band, so the result is always a positive whole-ish width even for huge
/// or empty grids.
pub fn compute_column_width(n_days: usize, surface: &Surface) -> f32 {
    let n = n_days.max(1) as f32;
    let raw = (surface.available_width() / n).floor();
    raw.clamp(surface.min_column, surface.max_column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_floored_share_of_available_space() {
        let surface = Surface::viewport(1130.0, 130.0);
        // 1000 available over 30 days -> floor(33.3) = 33
        assert_eq!(compute_column_width(30, &surface), 33.0);
    }

    #[test]
    fn width_clamps_to_band_ceiling_for_short_grids() {
        let surface = Surface::viewport(2000.0, 130.0);
        assert_eq!(compute_column_width(5, &surface), surface.max_column);
    }

    #[test]
    fn width_never_drops_below_the_floor() {
        let surface = Surface::page(PageFormat::A4, Orientation::Portrait);
        // A year of columns cannot fit an A4 page; the clamp keeps the
        // floor and pagination absorbs the overflow.
        let width = compute_column_width(365, &surface);
        assert_eq!(width, MIN_COLUMN_WIDTH);
        assert!(width > 0.0);
    }

    #[test]
    fn zero_days_is_treated_as_one_column() {
        let surface = Surface::viewport(500.0, 100.0);
        let width = compute_column_width(0, &surface);
        assert_eq!(width, surface.max_column);
    }

    #[test]
    fn landscape_pages_are_wider_than_portrait() {
        let portrait = Surface::page(PageFormat::A4, Orientation::Portrait);
        let landscape = Surface::page(PageFormat::A4, Orientation::Landscape);
        assert!(landscape.target_width > portrait.target_width);
        assert!(landscape.max_column >= portrait.max_column);
    }
}
