//! edgetrack-io: File I/O for edgetrack.
//!
//! This crate reads the edge detector's flat coordinate file, writes the
//! simplified coordinate file, and loads input images into 2-D arrays.
//!

mod error;
mod input_image;
mod raw;
mod writer;

pub use error::{Error, Result};
pub use input_image::{load_image, ImageData};
pub use raw::{parse_raw_records, read_raw_records, read_tracks};
pub use writer::{
    output_file_name, write_tracks, CoordinateFileWriter, INTERPOLATED_OUTPUT_FILE, OUTPUT_FILE,
};
