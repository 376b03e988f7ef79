use crate::segment::Orientation;
use fabric_common::geom::point::Point;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChannelError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("segment not straight: {start}->{end}")]
    NotStraight { start: Point, end: Point },
    #[error("can only add segments of type {expected} which {segment} ({found}) is not")]
    TypeMismatch {
        expected: Orientation,
        found: Orientation,
        segment: String,
    },
    #[error("route {start}->{end} leaves the {width}x{height} grid")]
    OutOfBounds {
        start: Point,
        end: Point,
        width: u32,
        height: u32,
    },
}
