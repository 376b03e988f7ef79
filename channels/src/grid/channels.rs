use super::track::TrackGrid;
use crate::error::{ChannelError, Result};
use crate::segment::{Orientation, Segment};
use fabric_common::geom::point::Point;
use fabric_common::geom::size::Size;

/// A `Column` grid and a `Row` grid covering the same area.
#[derive(Debug)]
pub struct Channels {
    size: Size,
    column: TrackGrid,
    row: TrackGrid,
}

impl Channels {
    pub fn new(size: impl Into<Size>) -> Self {
        let size = size.into();
        Self {
            size,
            column: TrackGrid::new(size, Orientation::Column),
            row: TrackGrid::new(size, Orientation::Row),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn column(&self) -> &TrackGrid {
        &self.column
    }

    pub fn row(&self) -> &TrackGrid {
        &self.row
    }

    pub fn grid(&self, orientation: Orientation) -> &TrackGrid {
        match orientation {
            Orientation::Column => &self.column,
            Orientation::Row => &self.row,
        }
    }

    /// Places a straight segment into the grid matching its orientation.
    /// Zero-length segments go to the column grid.
    pub fn place(&mut self, segment: Segment) -> Result<Segment> {
        match segment.orientation() {
            Orientation::Column => self.column.place(segment),
            Orientation::Row => self.row.place(segment),
        }
    }

    /// Places a route between two points.
    ///
    /// Straight routes become a single segment. Bent routes run along the
    /// start column to `(start.x, end.y)` and then along that row to `end`;
    /// both legs are placed and returned in that order. Nothing is placed if
    /// any point of the route is off the grid.
    pub fn create(
        &mut self,
        start: impl Into<Point>,
        end: impl Into<Point>,
        label: Option<String>,
    ) -> Result<Vec<Segment>> {
        let (start, end) = (start.into(), end.into());
        let corner = Point::new(start.x, end.y);

        if ![start, end, corner].iter().all(|&p| self.size.contains(p)) {
            return Err(ChannelError::OutOfBounds {
                start,
                end,
                width: self.size.width,
                height: self.size.height,
            });
        }

        match Segment::with_parts(start, end, None, label.clone()) {
            Ok(segment) => Ok(vec![self.place(segment)?]),
            Err(ChannelError::NotStraight { .. }) => {
                log::debug!("Splitting bent route {}->{} at {}", start, end, corner);
                let first = Segment::with_parts(start, corner, None, label.clone())?;
                let second = Segment::with_parts(corner, end, None, label)?;
                Ok(vec![self.place(first)?, self.place(second)?])
            }
            Err(e) => Err(e),
        }
    }

    pub fn num_segments(&self) -> usize {
        self.column.segments().len() + self.row.segments().len()
    }
}
