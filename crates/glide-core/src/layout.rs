//! Layout probing: animation origins for diff segments
//!
//! The differ produces positionless segments; this module renders them into
//! two virtual layers (the before layout and the after layout), measures
//! each run against a [`MeasureSurface`], and emits fully-populated
//! [`AnimSegment`]s. Measurement is best-effort: anything the surface
//! cannot resolve keeps a zero origin and that token degrades from a slide
//! to a cross-fade.

use crate::segment::{AnimSegment, Point, Segment, SegmentKind};
use unicode_width::UnicodeWidthChar;

/// One tagged run of text inside a measurement layer, in layout order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerRun<'a> {
    /// Index of the originating segment in the diff's segment list
    pub segment: usize,
    pub text: &'a str,
}

/// An off-screen layout to be measured.
///
/// The before layer holds unchanged and removed runs in before order, the
/// after layer unchanged and added runs in after order. Concatenating a
/// layer's runs reproduces the corresponding snippet exactly, so a surface
/// that lays the runs out contiguously sees the true line structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer<'a> {
    pub runs: Vec<LayerRun<'a>>,
}

impl<'a> Layer<'a> {
    pub fn new(runs: Vec<LayerRun<'a>>) -> Self {
        Self { runs }
    }

    pub fn for_before(segments: &'a [Segment]) -> Self {
        Self::build(segments, Segment::in_before)
    }

    pub fn for_after(segments: &'a [Segment]) -> Self {
        Self::build(segments, Segment::in_after)
    }

    fn build(segments: &'a [Segment], include: fn(&Segment) -> bool) -> Self {
        let runs = segments
            .iter()
            .enumerate()
            .filter(|(_, seg)| include(seg))
            .map(|(i, seg)| LayerRun {
                segment: i,
                text: &seg.text,
            })
            .collect();
        Self { runs }
    }
}

/// Measurement capability over a rendering surface.
///
/// Implementations lay a layer's runs out exactly as the real display
/// would (font metrics, wrapping, whitespace significance) and report each
/// run's origin relative to the container, `None` for runs with no
/// measurable content. Swappable so the engine stays platform-independent:
/// the terminal player uses [`MonospaceSurface`], headless contexts use
/// [`NullSurface`].
pub trait MeasureSurface {
    fn measure(&self, layer: &Layer<'_>) -> Vec<Option<Point>>;
}

/// Fixed-metric surface: every glyph advances by its terminal cell width.
///
/// Suitable for terminal rendering and for tests. Optional wrapping folds
/// a run onto the next row as one unit when it would overflow the wrap
/// width; only a run wider than a whole row breaks mid-run.
#[derive(Debug, Clone)]
pub struct MonospaceSurface {
    cell_width: f64,
    cell_height: f64,
    wrap_width: Option<usize>,
}

impl Default for MonospaceSurface {
    fn default() -> Self {
        Self {
            cell_width: 1.0,
            cell_height: 1.0,
            wrap_width: None,
        }
    }
}

impl MonospaceSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Express origins in physical units instead of cell counts
    pub fn with_metrics(mut self, cell_width: f64, cell_height: f64) -> Self {
        self.cell_width = cell_width;
        self.cell_height = cell_height;
        self
    }

    /// Wrap lines at the given number of cells
    pub fn with_wrap(mut self, cells: usize) -> Self {
        self.wrap_width = Some(cells);
        self
    }
}

impl MeasureSurface for MonospaceSurface {
    fn measure(&self, layer: &Layer<'_>) -> Vec<Option<Point>> {
        let mut row = 0usize;
        let mut col = 0usize;
        let mut points = Vec::with_capacity(layer.runs.len());

        for run in &layer.runs {
            // fold the run down as one unit, like word wrapping; a run
            // wider than the whole row is left to break mid-run below
            if let Some(wrap) = self.wrap_width {
                let lead = leading_width(run.text);
                if col > 0 && lead > 0 && lead <= wrap && col + lead > wrap {
                    row += 1;
                    col = 0;
                }
            }
            let mut origin: Option<(usize, usize)> = None;
            for ch in run.text.chars() {
                if ch == '\n' {
                    if origin.is_none() {
                        origin = Some((row, col));
                    }
                    row += 1;
                    col = 0;
                    continue;
                }
                let advance = UnicodeWidthChar::width(ch).unwrap_or(0);
                if let Some(wrap) = self.wrap_width {
                    if col > 0 && advance > 0 && col + advance > wrap {
                        row += 1;
                        col = 0;
                    }
                }
                if origin.is_none() {
                    origin = Some((row, col));
                }
                col += advance;
            }
            points.push(origin.map(|(r, c)| {
                Point::new(r as f64 * self.cell_height, c as f64 * self.cell_width)
            }));
        }
        points
    }
}

/// Cell width of a run's first line
fn leading_width(text: &str) -> usize {
    text.chars()
        .take_while(|&ch| ch != '\n')
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
        .sum()
}

/// Degraded-mode surface for when no rendering context exists.
///
/// Every run reports as unmeasurable, so every animation origin stays at
/// zero and the transition plays as a plain cross-fade.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl MeasureSurface for NullSurface {
    fn measure(&self, layer: &Layer<'_>) -> Vec<Option<Point>> {
        vec![None; layer.runs.len()]
    }
}

/// Probe both layouts and fill each segment's animation origin.
///
/// Unchanged segments get `before - after` (the offset they must travel
/// from), added segments their after-layout origin, removed segments their
/// before-layout origin. Never fails; missing measurements fall back to
/// zero.
pub fn measure(segments: Vec<Segment>, surface: &dyn MeasureSurface) -> Vec<AnimSegment> {
    let before_points = scatter(&Layer::for_before(&segments), surface, segments.len());
    let after_points = scatter(&Layer::for_after(&segments), surface, segments.len());

    if segments.iter().any(|s| !s.is_newline())
        && before_points.iter().all(Option::is_none)
        && after_points.iter().all(Option::is_none)
    {
        tracing::warn!("measurement surface unavailable; transitions degrade to cross-fade");
    }

    segments
        .into_iter()
        .enumerate()
        .map(|(i, segment)| {
            let from = match segment.kind {
                SegmentKind::Unchanged => match (before_points[i], after_points[i]) {
                    (Some(before), Some(after)) => before - after,
                    _ => Point::default(),
                },
                SegmentKind::Added => after_points[i].unwrap_or_default(),
                SegmentKind::Removed => before_points[i].unwrap_or_default(),
            };
            AnimSegment::new(segment, from)
        })
        .collect()
}

/// Measure one layer and index the results by segment position
fn scatter(
    layer: &Layer<'_>,
    surface: &dyn MeasureSurface,
    segment_count: usize,
) -> Vec<Option<Point>> {
    let measured = surface.measure(layer);
    let mut by_segment = vec![None; segment_count];
    for (run, point) in layer.runs.iter().zip(measured) {
        if run.segment < segment_count {
            by_segment[run.segment] = point;
        }
    }
    by_segment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::differ::segment_diff;

    #[test]
    fn test_monospace_origins_follow_lines() {
        let segments = vec![
            Segment::unchanged("fn main"),
            Segment::unchanged("\n"),
            Segment::unchanged("  body"),
        ];
        let layer = Layer::for_after(&segments);
        let points = MonospaceSurface::new().measure(&layer);
        assert_eq!(points[0], Some(Point::new(0.0, 0.0)));
        assert_eq!(points[1], Some(Point::new(0.0, 7.0)));
        assert_eq!(points[2], Some(Point::new(1.0, 0.0)));
    }

    #[test]
    fn test_monospace_metrics_scale() {
        let segments = vec![Segment::unchanged("ab"), Segment::unchanged("cd")];
        let layer = Layer::for_after(&segments);
        let points = MonospaceSurface::new()
            .with_metrics(8.0, 16.0)
            .measure(&layer);
        assert_eq!(points[1], Some(Point::new(0.0, 16.0)));
    }

    #[test]
    fn test_monospace_wrap() {
        let segments = vec![Segment::unchanged("abcd"), Segment::unchanged("efgh")];
        let layer = Layer::for_after(&segments);
        let points = MonospaceSurface::new().with_wrap(6).measure(&layer);
        // second run would overflow the 6-cell row, so it folds down whole
        assert_eq!(points[0], Some(Point::new(0.0, 0.0)));
        assert_eq!(points[1], Some(Point::new(1.0, 0.0)));
    }

    #[test]
    fn test_monospace_wrap_run_that_fits_stays_put() {
        let segments = vec![Segment::unchanged("abcd"), Segment::unchanged("ef")];
        let layer = Layer::for_after(&segments);
        let points = MonospaceSurface::new().with_wrap(6).measure(&layer);
        assert_eq!(points[1], Some(Point::new(0.0, 4.0)));
    }

    #[test]
    fn test_monospace_wrap_splits_oversized_run() {
        let segments = vec![Segment::unchanged("abcdefgh"), Segment::unchanged("xy")];
        let layer = Layer::for_after(&segments);
        let points = MonospaceSurface::new().with_wrap(6).measure(&layer);
        // an eight-cell run cannot fold as a unit on a six-cell row; it
        // starts in place and spills, and the next run continues after it
        assert_eq!(points[0], Some(Point::new(0.0, 0.0)));
        assert_eq!(points[1], Some(Point::new(1.0, 2.0)));
    }

    #[test]
    fn test_unchanged_delta_is_before_minus_after() {
        // "b" is removed, so on the after layout "c" shifts two cells left
        let segments = segment_diff("a b c", "a c");
        let placed = measure(segments, &MonospaceSurface::new());

        let c = placed
            .iter()
            .find(|s| s.kind == SegmentKind::Unchanged && s.text.contains('c'))
            .unwrap();
        assert_eq!(c.from, Point::new(0.0, 2.0));
    }

    #[test]
    fn test_added_and_removed_get_fixed_origins() {
        let segments = segment_diff("a\nb", "a\nc");
        let placed = measure(segments, &MonospaceSurface::new());

        let removed = placed.iter().find(|s| s.kind == SegmentKind::Removed).unwrap();
        let added = placed.iter().find(|s| s.kind == SegmentKind::Added).unwrap();
        assert_eq!(removed.text, "b");
        assert_eq!(removed.from, Point::new(1.0, 0.0));
        assert_eq!(added.text, "c");
        assert_eq!(added.from, Point::new(1.0, 0.0));
    }

    #[test]
    fn test_null_surface_degrades_to_zero() {
        let segments = segment_diff("let x = 1", "let x = 2");
        let placed = measure(segments.clone(), &NullSurface);
        assert_eq!(placed.len(), segments.len());
        assert!(placed.iter().all(|s| s.from.is_zero()));
    }

    #[test]
    fn test_layers_partition_segments() {
        let segments = segment_diff("a b", "a c");
        let before = Layer::for_before(&segments);
        let after = Layer::for_after(&segments);

        let before_text: String = before.runs.iter().map(|r| r.text).collect();
        let after_text: String = after.runs.iter().map(|r| r.text).collect();
        assert_eq!(before_text, "a b");
        assert_eq!(after_text, "a c");
    }

    #[test]
    fn test_short_surface_reply_is_tolerated() {
        struct Truncating;
        impl MeasureSurface for Truncating {
            fn measure(&self, layer: &Layer<'_>) -> Vec<Option<Point>> {
                layer
                    .runs
                    .iter()
                    .take(1)
                    .map(|_| Some(Point::new(0.0, 0.0)))
                    .collect()
            }
        }

        let segments = segment_diff("a b", "a c");
        let placed = measure(segments, &Truncating);
        // unmeasured segments simply stay at rest
        assert!(placed.iter().skip(1).all(|s| s.from.is_zero()));
    }
}
