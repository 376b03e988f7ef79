pub mod check;
pub mod error;
pub mod grid;
pub mod render;
pub mod segment;

pub use error::{ChannelError, Result};
pub use grid::{Channels, TrackGrid};
pub use segment::{Direction, Orientation, Segment};

use fabric_common::db::core::ChannelDB;
use fabric_common::util::profiler::ScopedTimer;

/// Packs every route of `db` in file order. Off-grid routes are rejected
/// before anything is placed.
pub fn pack(db: &ChannelDB) -> Result<Channels> {
    let _timer = ScopedTimer::new("Channel packing");

    if let Some(&id) = db.out_of_bounds().first() {
        let route = db.route(id);
        return Err(ChannelError::OutOfBounds {
            start: route.start,
            end: route.end,
            width: db.size.width,
            height: db.size.height,
        });
    }

    let mut channels = Channels::new(db.size);
    for route in &db.routes {
        channels.create(route.start, route.end, route.label.clone())?;
    }

    log::info!(
        "Packed {} routes into {} segments (CHANX max {} tracks, CHANY max {} tracks)",
        db.num_routes(),
        channels.num_segments(),
        channels.column().max_tracks(),
        channels.row().max_tracks()
    );
    Ok(channels)
}
