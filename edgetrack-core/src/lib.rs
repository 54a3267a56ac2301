//! edgetrack-core: Core track types for particle-track detection.
//!
//! This crate provides the data model shared by the edgetrack crates:
//! raw detector records, tracks, the track collection, and the
//! sentinel-delimited splitter that turns one into the other.
//!

pub mod error;
pub mod factor;
pub mod record;
pub mod split;
pub mod track;

pub use error::{Error, Result};
pub use factor::InterpolationFactor;
pub use record::RawRecord;
pub use split::split_tracks;
pub use track::{Track, TrackCollection};
