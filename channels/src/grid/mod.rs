pub mod channels;
pub mod track;

pub use channels::Channels;
pub use track::TrackGrid;
