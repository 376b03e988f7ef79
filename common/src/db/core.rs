use crate::db::indices::RouteId;
use crate::geom::point::Point;
use crate::geom::size::Size;

/// One requested connection, as read from a route list. The endpoints do not
/// have to share a coordinate; bent routes are split when packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteRecord {
    pub label: Option<String>,
    pub start: Point,
    pub end: Point,
}

impl RouteRecord {
    pub fn is_straight(&self) -> bool {
        self.start.x == self.end.x || self.start.y == self.end.y
    }

    /// Grid point where a bent route turns: up/down the start column first,
    /// then along the end row.
    pub fn corner(&self) -> Point {
        Point::new(self.start.x, self.end.y)
    }
}

/// Routes to be packed, in placement order.
#[derive(Debug)]
pub struct ChannelDB {
    pub size: Size,
    pub routes: Vec<RouteRecord>,
}

impl ChannelDB {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            routes: Vec::with_capacity(256),
        }
    }

    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    pub fn add_route(&mut self, label: Option<String>, start: Point, end: Point) -> RouteId {
        let id = RouteId::new(self.routes.len());
        self.routes.push(RouteRecord { label, start, end });
        id
    }

    pub fn route(&self, id: RouteId) -> &RouteRecord {
        &self.routes[id.index()]
    }

    /// Routes whose endpoints (and corner, for bent routes) fall outside the grid.
    pub fn out_of_bounds(&self) -> Vec<RouteId> {
        self.routes
            .iter()
            .enumerate()
            .filter(|(_, r)| {
                !self.size.contains(r.start)
                    || !self.size.contains(r.end)
                    || !self.size.contains(r.corner())
            })
            .map(|(i, _)| RouteId::new(i))
            .collect()
    }
}
