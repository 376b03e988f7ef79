use crate::error::{ChannelError, Result};
use crate::segment::{Orientation, Segment};
use fabric_common::db::indices::SegmentId;
use fabric_common::geom::point::Point;
use fabric_common::geom::size::Size;

/// Per-cell track lists for one orientation of channel.
///
/// Every cell owns a list of track slots. A slot is either empty or points at
/// a segment in the arena. All cells along a row (for `Row` grids) or column
/// (for `Column` grids) share the same track count once anything has been
/// placed on that line.
#[derive(Debug)]
pub struct TrackGrid {
    size: Size,
    orientation: Orientation,
    cells: Vec<Vec<Option<SegmentId>>>,
    segments: Vec<Segment>,
}

impl TrackGrid {
    pub fn new(size: impl Into<Size>, orientation: Orientation) -> Self {
        let size = size.into();
        Self {
            size,
            orientation,
            cells: vec![Vec::new(); size.cell_count()],
            segments: Vec::new(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Placed segments, in placement order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.segments[id.index()]
    }

    /// Number of rows (for `Row` grids) or columns (for `Column` grids).
    pub fn num_lines(&self) -> u32 {
        match self.orientation {
            Orientation::Row => self.size.height,
            Orientation::Column => self.size.width,
        }
    }

    /// Number of cells along one line.
    pub fn line_len(&self) -> u32 {
        match self.orientation {
            Orientation::Row => self.size.width,
            Orientation::Column => self.size.height,
        }
    }

    /// Raw track slots of a cell.
    pub fn track_ids(&self, p: Point) -> &[Option<SegmentId>] {
        &self.cells[self.index(p)]
    }

    /// Track slots of a cell resolved to segments.
    pub fn tracks(&self, p: Point) -> Vec<Option<&Segment>> {
        self.track_ids(p)
            .iter()
            .map(|slot| slot.map(|id| self.segment(id)))
            .collect()
    }

    /// Track count of a line; zero until something is placed on it.
    pub fn track_count(&self, line: u32) -> usize {
        self.line_cells(line as i32)
            .first()
            .map_or(0, |&cell| self.cells[cell].len())
    }

    pub fn max_tracks(&self) -> usize {
        self.cells.iter().map(|c| c.len()).max().unwrap_or(0)
    }

    /// Line coordinate and inclusive cell range a segment would occupy here.
    ///
    /// Uses the grid's orientation, so zero-length segments land on the line
    /// their point sits on regardless of how they classify themselves.
    pub fn extent(&self, segment: &Segment) -> (i32, i32, i32) {
        let (s, e) = (segment.start(), segment.end());
        match self.orientation {
            Orientation::Row => (s.y, s.x.min(e.x), s.x.max(e.x)),
            Orientation::Column => (s.x, s.y.min(e.y), s.y.max(e.y)),
        }
    }

    /// Whether both endpoints of `segment` are on the grid.
    pub fn fits(&self, segment: &Segment) -> bool {
        self.size.contains(segment.start()) && self.size.contains(segment.end())
    }

    /// Packs `segment` onto the lowest track that is free over its whole span
    /// and returns the placed copy.
    ///
    /// Earlier segments are never moved. Panics if the segment already has an
    /// index or does not fit on the grid.
    pub fn place(&mut self, segment: Segment) -> Result<Segment> {
        assert!(
            segment.index().is_none(),
            "{:?} already has a track index",
            segment
        );

        if segment.orientation() != self.orientation && !segment.is_zero_length() {
            return Err(ChannelError::TypeMismatch {
                expected: self.orientation,
                found: segment.orientation(),
                segment: segment.to_string(),
            });
        }

        let (common, lo, hi) = self.extent(&segment);
        assert!(
            common >= 0 && (common as u32) < self.num_lines(),
            "{:?} is on line {} outside the {} lines of the grid",
            segment,
            common,
            self.num_lines()
        );
        assert!(
            lo >= 0 && hi >= lo && (hi as u32) < self.line_len(),
            "{:?} spans {}..={} outside a line of length {}",
            segment,
            lo,
            hi,
            self.line_len()
        );

        let line = self.line_cells(common);
        self.assert_rectangular(&line);
        let covered = &line[lo as usize..=hi as usize];

        let mut idx = 0;
        'search: loop {
            for &cell in covered {
                let tracks = &mut self.cells[cell];
                if tracks.len() < idx + 1 {
                    tracks.resize(idx + 1, None);
                }
                if tracks[idx].is_some() {
                    idx += 1;
                    continue 'search;
                }
            }
            break;
        }

        for &cell in &line {
            let tracks = &mut self.cells[cell];
            if tracks.len() < idx + 1 {
                tracks.resize(idx + 1, None);
            }
        }
        self.assert_rectangular(&line);

        let placed = segment.with_index(idx);
        let id = SegmentId::new(self.segments.len());
        for &cell in covered {
            self.cells[cell][idx] = Some(id);
        }
        self.segments.push(placed.clone());

        log::trace!(
            "{} line {}: {:?} on track {}",
            self.orientation,
            common,
            placed,
            idx
        );
        Ok(placed)
    }

    #[inline(always)]
    fn index(&self, p: Point) -> usize {
        assert!(
            self.size.contains(p),
            "point {} outside {}x{} grid",
            p,
            self.size.width,
            self.size.height
        );
        (p.y as usize) * (self.size.width as usize) + (p.x as usize)
    }

    /// Cell offsets of one line, ordered along the varying axis.
    pub(crate) fn line_cells(&self, common: i32) -> Vec<usize> {
        match self.orientation {
            Orientation::Row => (0..self.size.width as i32)
                .map(|x| self.index(Point::new(x, common)))
                .collect(),
            Orientation::Column => (0..self.size.height as i32)
                .map(|y| self.index(Point::new(common, y)))
                .collect(),
        }
    }

    pub(crate) fn cell_tracks(&self, cell: usize) -> &[Option<SegmentId>] {
        &self.cells[cell]
    }

    fn assert_rectangular(&self, line: &[usize]) {
        if let Some(&first) = line.first() {
            let len = self.cells[first].len();
            assert!(
                line.iter().all(|&c| self.cells[c].len() == len),
                "track lists along a line have different lengths"
            );
        }
    }
}
