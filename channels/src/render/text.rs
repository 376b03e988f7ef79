use crate::grid::TrackGrid;
use crate::segment::{Orientation, Segment};
use fabric_common::geom::point::Point;

/// Cell templates for one grid, all `width` characters wide.
struct Glyphs {
    orientation: Orientation,
    width: usize,
}

impl Glyphs {
    fn begin(&self, label: &str) -> String {
        match self.orientation {
            Orientation::Row => format!("{:>w$}>", label, w = self.width - 1),
            Orientation::Column => format!("{:^w$}", label, w = self.width),
        }
    }

    fn end(&self, label: &str) -> String {
        match self.orientation {
            Orientation::Row => format!("->{:<w$}", label, w = self.width - 2),
            Orientation::Column => format!("{:^w$}", label, w = self.width),
        }
    }

    fn middle(&self) -> String {
        match self.orientation {
            Orientation::Row => "-".repeat(self.width),
            Orientation::Column => format!("{:^w$}", "|", w = self.width),
        }
    }

    fn single(&self, label: &str) -> String {
        let joined = [self.begin(label), self.middle(), self.end(label)].concat();
        let mut s: String = joined.chars().take(self.width - 1).collect();
        s.push(' ');
        s
    }

    fn blank(&self) -> String {
        " ".repeat(self.width)
    }

    fn header(&self, x: u32) -> String {
        format!("|{:^w$}", x, w = self.width - 1)
    }

    fn cell(&self, segment: &Segment, at: Point) -> String {
        let label = segment.display_label();
        if segment.start() == segment.end() {
            self.single(&label)
        } else if segment.start() == at {
            self.begin(&label)
        } else if segment.end() == at {
            self.end(&label)
        } else {
            self.middle()
        }
    }
}

/// Draws every track of every cell, one block of lines per grid row.
///
/// Row grids look like `AA>------->AA`, column grids stack the label at both
/// ends with `|` in between. Cells with fewer tracks than their neighbours in
/// the same row are padded with blanks.
pub fn pretty_print(grid: &TrackGrid) -> String {
    let longest = grid
        .segments()
        .iter()
        .map(|s| s.display_label().chars().count())
        .max()
        .unwrap_or(0);
    let glyphs = Glyphs {
        orientation: grid.orientation(),
        width: longest.max(1) + 3,
    };

    let size = grid.size();
    let mut out = String::new();
    for y in 0..size.height {
        let columns: Vec<Vec<String>> = (0..size.width)
            .map(|x| {
                let at = Point::new(x as i32, y as i32);
                let mut lines = vec![glyphs.header(x)];
                lines.extend(grid.tracks(at).into_iter().map(|slot| match slot {
                    Some(seg) => glyphs.cell(seg, at),
                    None => glyphs.blank(),
                }));
                lines
            })
            .collect();

        let depth = columns.iter().map(|c| c.len()).max().unwrap_or(1);
        for i in 0..depth {
            for column in &columns {
                match column.get(i) {
                    Some(s) => out.push_str(s),
                    None => out.push_str(&glyphs.blank()),
                }
            }
            if i == 0 {
                out.push('|');
            }
            out.push('\n');
        }
        out.push_str("\n\n");
    }
    out
}
