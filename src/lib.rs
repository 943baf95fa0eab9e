//! YOLO export to YOLOv8 dataset splitter
//!
//! Takes a flat YOLO export (`images/`, `labels/`, `classes.txt`), randomly
//! partitions the image/label pairs into `train`, `valid` and `test` subsets
//! and writes the `data.yaml` manifest the YOLOv8 trainer reads.

pub mod config;
pub mod converter;
pub mod dataset;
pub mod error;
pub mod io;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use config::Args;
pub use converter::{convert, convert_with_options, convert_with_rng, ConvertOptions};
pub use dataset::{pair_samples, partition, split_and_copy};
pub use error::{ConvertError, Result};
pub use io::{
    locate_class_file, prepare_output_skeleton, read_class_names, validate_structure,
    write_manifest,
};
pub use types::{Manifest, OutputDirs, SamplePair, SplitCounts, SplitRatios, SplitStats, Subset};
