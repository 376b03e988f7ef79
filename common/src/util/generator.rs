use crate::db::core::ChannelDB;
use crate::geom::point::Point;
use crate::geom::size::Size;
use crate::util::config::GeneratorConfig;
use rand::Rng;
use std::fs::File;
use std::io::{BufWriter, Write};

pub fn generate_random_routes(filename: &str, config: &GeneratorConfig) -> std::io::Result<()> {
    let mut rng = rand::thread_rng();
    let db = random_routes(&mut rng, config);
    write_routes(&db, filename)
}

/// Builds a benchmark of mostly straight routes. A `bent_ratio` share of the
/// routes get endpoints on different rows and columns.
pub fn random_routes<R: Rng>(rng: &mut R, config: &GeneratorConfig) -> ChannelDB {
    let width = config.width.clamp(1, i32::MAX as u32);
    let height = config.height.clamp(1, i32::MAX as u32);
    let mut db = ChannelDB::new(Size::new(width, height));

    log::info!(
        "Generating Benchmark: {} routes on {}x{} grid (max length {}, bent {:.0}%)",
        config.routes,
        width,
        height,
        config.max_length,
        config.bent_ratio * 100.0
    );

    let max_len = config.max_length.min(width.max(height)) as i32;
    let w = width as i32;
    let h = height as i32;

    for i in 0..config.routes {
        let start = Point::new(rng.gen_range(0..w), rng.gen_range(0..h));
        let end = if rng.gen_bool(config.bent_ratio.clamp(0.0, 1.0)) {
            Point::new(
                near(rng, start.x, max_len, w),
                near(rng, start.y, max_len, h),
            )
        } else if rng.gen_bool(0.5) {
            Point::new(near(rng, start.x, max_len, w), start.y)
        } else {
            Point::new(start.x, near(rng, start.y, max_len, h))
        };
        db.add_route(Some(format!("r{}", i)), start, end);
    }

    db
}

/// Random coordinate within `max_len` of `from`, clamped to `0..limit`.
fn near<R: Rng>(rng: &mut R, from: i32, max_len: i32, limit: i32) -> i32 {
    let lo = from.saturating_sub(max_len).max(0);
    let hi = from.saturating_add(max_len).min(limit - 1);
    rng.gen_range(lo..=hi)
}

pub fn write_routes(db: &ChannelDB, filename: &str) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);

    writeln!(file, "GRID {} {}", db.size.width, db.size.height)?;
    for route in &db.routes {
        if let Some(label) = &route.label {
            write!(file, "{} ", label)?;
        }
        writeln!(
            file,
            "{} {} {} {}",
            route.start.x, route.start.y, route.end.x, route.end.y
        )?;
    }
    file.flush()
}
