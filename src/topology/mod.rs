//! Stateless analyzers extracting global structure from a board: connected segments of a grid and tracks of edges.

pub use segment::{label_segments, SegmentSubject, Segments};
pub use track::{trace_tracks, GraphTrackSubject, Track, TrackSubject, TrackTopology};

mod segment;
mod track;
