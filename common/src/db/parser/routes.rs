use crate::db::core::ChannelDB;
use crate::geom::point::Point;
use crate::geom::size::Size;
use anyhow::{Context, Result, anyhow, bail};
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Reads a route list:
///
/// ```text
/// # comment
/// GRID <width> <height>
/// <label> <x0> <y0> <x1> <y1>
/// <x0> <y0> <x1> <y1>
/// ```
pub fn parse(filename: &str) -> Result<ChannelDB> {
    let file = File::open(filename).with_context(|| format!("cannot open '{}'", filename))?;
    parse_reader(BufReader::new(file))
}

pub fn parse_str(text: &str) -> Result<ChannelDB> {
    parse_reader(text.as_bytes())
}

pub fn parse_reader<R: BufRead>(reader: R) -> Result<ChannelDB> {
    let mut db: Option<ChannelDB> = None;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = line_no + 1;
        let line = match line.split_once('#') {
            Some((content, _)) => content,
            None => line.as_str(),
        };
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "GRID" => {
                if db.is_some() {
                    bail!("line {}: duplicate GRID statement", line_no);
                }
                if parts.len() != 3 {
                    bail!("line {}: expected 'GRID <width> <height>'", line_no);
                }
                let width = parse_num::<u32>(parts[1], line_no)?;
                let height = parse_num::<u32>(parts[2], line_no)?;
                db = Some(ChannelDB::new(Size::new(width, height)));
            }
            _ => {
                let db = db
                    .as_mut()
                    .ok_or_else(|| anyhow!("line {}: route before GRID statement", line_no))?;

                let (label, coords) = match parts.len() {
                    4 => (None, &parts[..]),
                    5 => (Some(parts[0].to_string()), &parts[1..]),
                    n => bail!(
                        "line {}: expected 4 coordinates with an optional label, found {} fields",
                        line_no,
                        n
                    ),
                };
                let x0 = parse_num::<i32>(coords[0], line_no)?;
                let y0 = parse_num::<i32>(coords[1], line_no)?;
                let x1 = parse_num::<i32>(coords[2], line_no)?;
                let y1 = parse_num::<i32>(coords[3], line_no)?;
                db.add_route(label, Point::new(x0, y0), Point::new(x1, y1));
            }
        }
    }

    let db = db.ok_or_else(|| anyhow!("missing GRID statement"))?;
    log::debug!(
        "Parsed {} routes on a {}x{} grid",
        db.num_routes(),
        db.size.width,
        db.size.height
    );
    Ok(db)
}

fn parse_num<T: std::str::FromStr>(token: &str, line_no: usize) -> Result<T> {
    token
        .parse()
        .map_err(|_| anyhow!("line {}: invalid number '{}'", line_no, token))
}
