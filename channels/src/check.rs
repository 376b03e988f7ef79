use crate::grid::{Channels, TrackGrid};
use fabric_common::db::indices::SegmentId;
use rayon::prelude::*;

/// Verifies a packed grid: equal track counts along every line, each
/// segment present on exactly its own cells at its own index, and every
/// segment sitting on the lowest track its predecessors left free.
pub fn run(grid: &TrackGrid) -> Result<(), String> {
    log::info!(
        "Verifying {} grid ({} segments)",
        grid.orientation(),
        grid.segments().len()
    );

    let mut errors: Vec<String> = (0..grid.num_lines())
        .into_par_iter()
        .flat_map_iter(|line| check_line(grid, line))
        .collect();

    errors.par_extend(
        (0..grid.segments().len())
            .into_par_iter()
            .flat_map_iter(|i| check_minimal(grid, SegmentId::new(i))),
    );

    if errors.is_empty() {
        log::info!("\x1b[32mPASS\x1b[0m: {} grid is consistent.", grid.orientation());
        Ok(())
    } else {
        for e in &errors {
            log::error!("{}", e);
        }
        log::error!(
            "\x1b[31mFAIL\x1b[0m: {} grid has {} errors",
            grid.orientation(),
            errors.len()
        );
        Err(errors.join("; "))
    }
}

pub fn run_all(channels: &Channels) -> Result<(), String> {
    let (column, row) = rayon::join(|| run(channels.column()), || run(channels.row()));
    match (column, row) {
        (Ok(()), Ok(())) => Ok(()),
        (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
        (Err(a), Err(b)) => Err(format!("{}; {}", a, b)),
    }
}

fn check_line(grid: &TrackGrid, line: u32) -> Vec<String> {
    let mut errors = Vec::new();
    let cells = grid.line_cells(line as i32);

    let expected = grid.track_count(line);
    if cells
        .iter()
        .any(|&c| grid.cell_tracks(c).len() != expected)
    {
        errors.push(format!(
            "{} line {}: track lists are not rectangular",
            grid.orientation(),
            line
        ));
    }

    for (offset, &cell) in cells.iter().enumerate() {
        for (track, slot) in grid.cell_tracks(cell).iter().enumerate() {
            let Some(id) = *slot else { continue };
            let seg = grid.segment(id);
            let (common, lo, hi) = grid.extent(seg);
            let offset = offset as i32;
            if seg.index() != Some(track) {
                errors.push(format!(
                    "{} line {} cell {}: {:?} stored on track {}",
                    grid.orientation(),
                    line,
                    offset,
                    seg,
                    track
                ));
            }
            if common != line as i32 || offset < lo || offset > hi {
                errors.push(format!(
                    "{} line {} cell {}: {:?} stored outside its span",
                    grid.orientation(),
                    line,
                    offset,
                    seg
                ));
            }
        }
    }

    // Every covered cell must hold the segment on its track.
    for (i, seg) in grid.segments().iter().enumerate() {
        let (common, lo, hi) = grid.extent(seg);
        if common != line as i32 {
            continue;
        }
        let Some(track) = seg.index() else {
            errors.push(format!("{:?} was stored without an index", seg));
            continue;
        };
        for offset in lo..=hi {
            let slot = grid
                .cell_tracks(cells[offset as usize])
                .get(track)
                .copied()
                .flatten();
            if slot != Some(SegmentId::new(i)) {
                errors.push(format!(
                    "{} line {} cell {}: {:?} missing from track {}",
                    grid.orientation(),
                    line,
                    offset,
                    seg,
                    track
                ));
            }
        }
    }

    errors
}

fn check_minimal(grid: &TrackGrid, id: SegmentId) -> Option<String> {
    let seg = grid.segment(id);
    let track = seg.index()?;
    let (common, lo, hi) = grid.extent(seg);

    let earlier = &grid.segments()[..id.index()];
    let free = (0..track).find(|&t| {
        !earlier.iter().any(|other| {
            let (c, olo, ohi) = grid.extent(other);
            other.index() == Some(t) && c == common && olo <= hi && ohi >= lo
        })
    })?;

    Some(format!(
        "{:?} sits on track {} but track {} was free over its span",
        seg, track, free
    ))
}
