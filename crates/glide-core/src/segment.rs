//! Segment representation for animated diffs

use serde::{Deserialize, Serialize};

/// Classification of a segment relative to the before → after transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    /// Present in both snippets; animates from its old to its new position
    Unchanged,
    /// Only in the before snippet; fades out
    Removed,
    /// Only in the after snippet; fades in
    Added,
}

/// A top/left offset in surface units (pixels, terminal cells, ...)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub top: f64,
    pub left: f64,
}

impl Point {
    pub fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }

    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.left == 0.0
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point {
            top: self.top - rhs.top,
            left: self.left - rhs.left,
        }
    }
}

/// A maximal run of diff-classified text, treated as one animatable unit.
///
/// Produced by the differ; carries no position data. Concatenating the
/// `Unchanged` + `Removed` texts in order reproduces the before snippet,
/// `Unchanged` + `Added` the after snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// The kind of change
    pub kind: SegmentKind,
    /// The literal substring this segment represents (never empty)
    pub text: String,
}

impl Segment {
    pub fn new(kind: SegmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn unchanged(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Unchanged, text)
    }

    pub fn removed(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Removed, text)
    }

    pub fn added(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Added, text)
    }

    /// A lone line break; always its own segment, never merged
    pub fn is_newline(&self) -> bool {
        self.text == "\n"
    }

    /// Whether this segment renders in the before layout
    pub fn in_before(&self) -> bool {
        matches!(self.kind, SegmentKind::Unchanged | SegmentKind::Removed)
    }

    /// Whether this segment renders in the after layout
    pub fn in_after(&self) -> bool {
        matches!(self.kind, SegmentKind::Unchanged | SegmentKind::Added)
    }
}

/// A segment with its animation origin filled in by the layout prober.
///
/// For `Unchanged`, `from` is a delta (before position minus after
/// position): the token starts offset by `from` and animates to zero. For
/// `Added` and `Removed` it is the token's fixed origin in the after/before
/// layout respectively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimSegment {
    pub kind: SegmentKind,
    pub text: String,
    pub from: Point,
}

impl AnimSegment {
    pub fn new(segment: Segment, from: Point) -> Self {
        Self {
            kind: segment.kind,
            text: segment.text,
            from,
        }
    }

    /// A segment with no travel (degraded measurement or zero delta)
    pub fn resting(segment: Segment) -> Self {
        Self::new(segment, Point::default())
    }

    pub fn is_newline(&self) -> bool {
        self.text == "\n"
    }

    pub fn in_before(&self) -> bool {
        matches!(self.kind, SegmentKind::Unchanged | SegmentKind::Removed)
    }

    pub fn in_after(&self) -> bool {
        matches!(self.kind, SegmentKind::Unchanged | SegmentKind::Added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_sub() {
        let a = Point::new(10.0, 4.0);
        let b = Point::new(2.0, 6.0);
        assert_eq!(a - b, Point::new(8.0, -2.0));
    }

    #[test]
    fn test_layer_membership() {
        assert!(Segment::unchanged("x").in_before());
        assert!(Segment::unchanged("x").in_after());
        assert!(Segment::removed("x").in_before());
        assert!(!Segment::removed("x").in_after());
        assert!(!Segment::added("x").in_before());
        assert!(Segment::added("x").in_after());
    }

    #[test]
    fn test_newline_detection() {
        assert!(Segment::unchanged("\n").is_newline());
        assert!(!Segment::unchanged("a\n").is_newline());
        assert!(!Segment::unchanged(" ").is_newline());
    }
}
