use crate::error::{ChannelError, Result};
use fabric_common::geom::point::Point;
use std::fmt;

/// Which coordinate a segment keeps constant.
///
/// Named after the VPR routing-resource node types: a `Column` segment runs
/// along a column (constant x, `CHANX`), a `Row` segment along a row
/// (constant y, `CHANY`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Row,
    Column,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Column => "CHANX",
            Orientation::Row => "CHANY",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Increasing,
    Decreasing,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Increasing => "INC_DIR",
            Direction::Decreasing => "DEC_DIR",
        })
    }
}

/// Axis-aligned wire between two grid points.
///
/// All geometric properties are derived from `start` and `end`. The track
/// index is only ever assigned through [`Segment::with_index`], which the
/// packer calls once the segment has a slot.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    start: Point,
    end: Point,
    index: Option<usize>,
    label: Option<String>,
}

impl Segment {
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Result<Self> {
        Self::build(start.into(), end.into(), None, None)
    }

    pub fn labeled(
        start: impl Into<Point>,
        end: impl Into<Point>,
        label: impl Into<String>,
    ) -> Result<Self> {
        Self::build(start.into(), end.into(), None, Some(label.into()))
    }

    pub fn with_parts(
        start: impl Into<Point>,
        end: impl Into<Point>,
        index: Option<usize>,
        label: Option<String>,
    ) -> Result<Self> {
        Self::build(start.into(), end.into(), index, label)
    }

    fn build(start: Point, end: Point, index: Option<usize>, label: Option<String>) -> Result<Self> {
        if start.x != end.x && start.y != end.y {
            return Err(ChannelError::NotStraight { start, end });
        }
        Ok(Self {
            start,
            end,
            index,
            label: label.filter(|l| !l.is_empty()),
        })
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Zero-length segments report `Column`.
    pub fn orientation(&self) -> Orientation {
        if self.start.x == self.end.x {
            Orientation::Column
        } else {
            Orientation::Row
        }
    }

    /// Start coordinate along the varying axis.
    pub fn primary_start(&self) -> i32 {
        match self.orientation() {
            Orientation::Row => self.start.x,
            Orientation::Column => self.start.y,
        }
    }

    pub fn primary_end(&self) -> i32 {
        match self.orientation() {
            Orientation::Row => self.end.x,
            Orientation::Column => self.end.y,
        }
    }

    /// The coordinate shared by both endpoints.
    pub fn common(&self) -> i32 {
        match self.orientation() {
            Orientation::Row => self.start.y,
            Orientation::Column => self.start.x,
        }
    }

    pub fn direction(&self) -> Direction {
        if self.primary_end() < self.primary_start() {
            Direction::Decreasing
        } else {
            Direction::Increasing
        }
    }

    pub fn length(&self) -> u32 {
        self.primary_end().abs_diff(self.primary_start())
    }

    pub fn is_zero_length(&self) -> bool {
        self.start == self.end
    }

    /// Inclusive `(low, high)` range along the varying axis.
    pub fn span(&self) -> (i32, i32) {
        let (s, e) = (self.primary_start(), self.primary_end());
        match self.direction() {
            Direction::Increasing => (s, e),
            Direction::Decreasing => (e, s),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        let (lo, hi) = self.span();
        match self.orientation() {
            Orientation::Row => p.y == self.common() && p.x >= lo && p.x <= hi,
            Orientation::Column => p.x == self.common() && p.y >= lo && p.y <= hi,
        }
    }

    /// Copy of this segment sitting on track `index`.
    pub fn with_index(&self, index: usize) -> Self {
        Self {
            start: self.start,
            end: self.end,
            index: Some(index),
            label: self.label.clone(),
        }
    }

    /// Text used when drawing the segment: its label, or the full description.
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            return match self.index {
                Some(idx) => write!(f, "{}@{}", label, idx),
                None => f.write_str(label),
            };
        }
        write!(
            f,
            "{} {}->{}",
            self.orientation(),
            self.start,
            self.end
        )?;
        if let Some(idx) = self.index {
            write!(f, " @{}", idx)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            return match self.index {
                Some(idx) => write!(f, "C({},{})", label, idx),
                None => write!(f, "C({})", label),
            };
        }
        write!(
            f,
            "C(({},{}), ({},{})",
            self.start.x, self.start.y, self.end.x, self.end.y
        )?;
        if let Some(idx) = self.index {
            write!(f, ", {}", idx)?;
        }
        f.write_str(")")
    }
}
