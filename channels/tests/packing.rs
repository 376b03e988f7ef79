use fabric_channels::check;
use fabric_channels::{ChannelError, Channels, Orientation, Segment, TrackGrid, pack};
use fabric_common::db::core::ChannelDB;
use fabric_common::db::parser::routes;
use fabric_common::geom::point::Point;
use fabric_common::geom::size::Size;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn labeled(s: (i32, i32), e: (i32, i32), label: &str) -> Segment {
    Segment::labeled(s, e, label).unwrap()
}

fn cell(grid: &TrackGrid, x: i32, y: i32) -> String {
    let names: Vec<String> = grid
        .tracks(Point::new(x, y))
        .iter()
        .map(|slot| match slot {
            Some(seg) => format!("{:?}", seg),
            None => "None".to_string(),
        })
        .collect();
    format!("[{}]", names.join(", "))
}

#[test]
fn worked_example() {
    let mut g = TrackGrid::new((10, 10), Orientation::Row);

    let a = g.place(labeled((0, 5), (3, 5), "A")).unwrap();
    assert_eq!(format!("{:?}", a), "C(A,0)");
    assert_eq!(cell(&g, 0, 5), "[C(A,0)]");
    assert_eq!(cell(&g, 3, 5), "[C(A,0)]");
    assert_eq!(cell(&g, 4, 5), "[None]");

    // Disjoint from A.
    let b = g.place(labeled((4, 5), (6, 5), "B")).unwrap();
    assert_eq!(format!("{:?}", b), "C(B,0)");
    assert_eq!(cell(&g, 3, 5), "[C(A,0)]");
    assert_eq!(cell(&g, 4, 5), "[C(B,0)]");
    assert_eq!(cell(&g, 7, 5), "[None]");

    // Same span as B.
    let c = g.place(labeled((4, 5), (6, 5), "C")).unwrap();
    assert_eq!(format!("{:?}", c), "C(C,1)");
    assert_eq!(cell(&g, 3, 5), "[C(A,0), None]");
    assert_eq!(cell(&g, 4, 5), "[C(B,0), C(C,1)]");
    assert_eq!(cell(&g, 6, 5), "[C(B,0), C(C,1)]");

    // A different row is independent.
    let d = g.place(labeled((4, 6), (6, 6), "D")).unwrap();
    assert_eq!(format!("{:?}", d), "C(D,0)");
    assert_eq!(cell(&g, 4, 5), "[C(B,0), C(C,1)]");
    assert_eq!(cell(&g, 4, 6), "[C(D,0)]");

    // Overlaps A, B and C.
    let e = g.place(labeled((2, 5), (5, 5), "E")).unwrap();
    assert_eq!(format!("{:?}", e), "C(E,2)");
    assert_eq!(cell(&g, 1, 5), "[C(A,0), None, None]");
    assert_eq!(cell(&g, 2, 5), "[C(A,0), None, C(E,2)]");
    assert_eq!(cell(&g, 5, 5), "[C(B,0), C(C,1), C(E,2)]");
    assert_eq!(cell(&g, 6, 5), "[C(B,0), C(C,1), None]");

    // Fits in the hole under E.
    let f = g.place(labeled((0, 5), (2, 5), "F")).unwrap();
    assert_eq!(format!("{:?}", f), "C(F,1)");
    assert_eq!(cell(&g, 0, 5), "[C(A,0), C(F,1), None]");
    assert_eq!(cell(&g, 2, 5), "[C(A,0), C(F,1), C(E,2)]");
    assert_eq!(cell(&g, 3, 5), "[C(A,0), None, C(E,2)]");

    // Spans everything and leaves a hole on track 2.
    let gg = g.place(labeled((0, 5), (6, 5), "G")).unwrap();
    assert_eq!(format!("{:?}", gg), "C(G,3)");
    assert_eq!(cell(&g, 0, 5), "[C(A,0), C(F,1), None, C(G,3)]");
    assert_eq!(cell(&g, 1, 5), "[C(A,0), C(F,1), None, C(G,3)]");
    assert_eq!(cell(&g, 2, 5), "[C(A,0), C(F,1), C(E,2), C(G,3)]");
    assert_eq!(cell(&g, 3, 5), "[C(A,0), None, C(E,2), C(G,3)]");
    assert_eq!(cell(&g, 4, 5), "[C(B,0), C(C,1), C(E,2), C(G,3)]");
    assert_eq!(cell(&g, 5, 5), "[C(B,0), C(C,1), C(E,2), C(G,3)]");
    assert_eq!(cell(&g, 6, 5), "[C(B,0), C(C,1), None, C(G,3)]");
    assert_eq!(cell(&g, 7, 5), "[None, None, None, None]");

    assert!(check::run(&g).is_ok());
}

/// Lowest index not used by any earlier overlapping segment on the same line.
fn expected_index(placed: &[Segment], grid: &TrackGrid, seg: &Segment) -> usize {
    let (common, lo, hi) = grid.extent(seg);
    let used: Vec<usize> = placed
        .iter()
        .filter(|o| {
            let (c, olo, ohi) = grid.extent(o);
            c == common && olo <= hi && ohi >= lo
        })
        .filter_map(|o| o.index())
        .collect();
    (0..).find(|i| !used.contains(i)).unwrap()
}

fn random_segment(rng: &mut StdRng, size: Size, orientation: Orientation) -> Segment {
    let w = size.width as i32;
    let h = size.height as i32;
    match orientation {
        Orientation::Row => {
            let y = rng.gen_range(0..h);
            Segment::new((rng.gen_range(0..w), y), (rng.gen_range(0..w), y)).unwrap()
        }
        Orientation::Column => {
            let x = rng.gen_range(0..w);
            Segment::new((x, rng.gen_range(0..h)), (x, rng.gen_range(0..h))).unwrap()
        }
    }
}

#[test]
fn random_sequences_keep_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for round in 0..40 {
        let size = Size::new(rng.gen_range(1..12), rng.gen_range(1..12));
        let orientation = if round % 2 == 0 {
            Orientation::Row
        } else {
            Orientation::Column
        };
        let mut grid = TrackGrid::new(size, orientation);

        for _ in 0..rng.gen_range(1..60) {
            let seg = random_segment(&mut rng, size, orientation);
            let want = expected_index(grid.segments(), &grid, &seg);
            let placed = grid.place(seg.clone()).unwrap();

            assert_eq!(placed.index(), Some(want), "minimal index for {:?}", seg);
            assert_eq!(seg.index(), None);
            assert_eq!(placed.start(), seg.start());
            assert_eq!(placed.end(), seg.end());
        }

        // Rectangular lines.
        for line in 0..grid.num_lines() {
            let count = grid.track_count(line);
            for offset in 0..grid.line_len() as i32 {
                let p = match orientation {
                    Orientation::Row => Point::new(offset, line as i32),
                    Orientation::Column => Point::new(line as i32, offset),
                };
                assert_eq!(grid.tracks(p).len(), count);
            }
        }

        // No two segments share a track in any cell they both cover.
        let segs = grid.segments();
        for (i, a) in segs.iter().enumerate() {
            for b in &segs[i + 1..] {
                let (ca, alo, ahi) = grid.extent(a);
                let (cb, blo, bhi) = grid.extent(b);
                if ca == cb && alo <= bhi && blo <= ahi {
                    assert_ne!(a.index(), b.index(), "{:?} collides with {:?}", a, b);
                }
            }
        }

        assert!(check::run(&grid).is_ok());
    }
}

#[test]
fn diagonal_endpoints_are_never_straight() {
    let mut rng = StdRng::seed_from_u64(0xd1a6);

    for _ in 0..500 {
        let start = Point::new(rng.gen_range(-50..50), rng.gen_range(-50..50));
        let dx = rng.gen_range(1..40) * if rng.gen_bool(0.5) { 1 } else { -1 };
        let dy = rng.gen_range(1..40) * if rng.gen_bool(0.5) { 1 } else { -1 };
        let end = Point::new(start.x + dx, start.y + dy);

        assert_eq!(
            Segment::new(start, end).unwrap_err(),
            ChannelError::NotStraight { start, end }
        );
        assert!(Segment::new(start, Point::new(end.x, start.y)).is_ok());
        assert!(Segment::new(start, Point::new(start.x, end.y)).is_ok());
    }
}

#[test]
fn pack_places_routes_in_file_order() {
    let db = routes::parse_str(
        "GRID 8 8\n\
         A 0 1 7 1\n\
         B 7 1 3 1\n\
         V 2 0 2 7\n\
         L 1 6 5 2\n\
         P 4 4 4 4\n",
    )
    .unwrap();
    let channels = pack(&db).unwrap();

    let row: Vec<String> = channels.row().segments().iter().map(|s| s.to_string()).collect();
    assert_eq!(row, vec!["A@0", "B@1", "L@0"]);
    let col: Vec<String> = channels.column().segments().iter().map(|s| s.to_string()).collect();
    assert_eq!(col, vec!["V@0", "L@0", "P@0"]);

    assert!(check::run_all(&channels).is_ok());
}

#[test]
fn pack_rejects_off_grid_routes() {
    let mut db = ChannelDB::new(Size::new(4, 4));
    db.add_route(None, Point::new(0, 0), Point::new(3, 0));
    db.add_route(None, Point::new(0, 5), Point::new(3, 5));

    let err = pack(&db).unwrap_err();
    assert_eq!(
        err,
        ChannelError::OutOfBounds {
            start: Point::new(0, 5),
            end: Point::new(3, 5),
            width: 4,
            height: 4,
        }
    );
}

#[test]
fn wrong_grid_is_rejected_but_dots_are_not() {
    let mut ch = Channels::new((5, 5));
    let placed = ch.place(labeled((1, 1), (1, 1), "dot")).unwrap();
    assert_eq!(placed.index(), Some(0));

    let mut rows = TrackGrid::new((5, 5), Orientation::Row);
    let err = rows.place(labeled((1, 0), (1, 4), "V")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "can only add segments of type CHANY which V (CHANX) is not"
    );
}
