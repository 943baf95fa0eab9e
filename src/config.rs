use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use crate::converter::ConvertOptions;
use crate::types::SplitRatios;

/// Command-line arguments for splitting a YOLO export into a YOLOv8 dataset.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Directory holding images/, labels/ and classes.txt
    #[arg(short = 's', long = "source_dir")]
    pub source_dir: PathBuf,

    /// Output directory; defaults to the source directory
    #[arg(short = 'd', long = "dest_dir")]
    pub dest_dir: Option<PathBuf>,

    /// Proportion of the dataset to use for training
    #[arg(long = "train_ratio", default_value_t = 0.7, value_parser = validate_ratio)]
    pub train_ratio: f64,

    /// Proportion of the dataset to use for validation
    #[arg(long = "val_ratio", default_value_t = 0.2, value_parser = validate_ratio)]
    pub val_ratio: f64,

    /// Seed for random shuffling; unseeded when omitted
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Fail instead of deleting existing train/valid/test folders
    #[arg(long = "no_overwrite")]
    pub no_overwrite: bool,
}

impl Args {
    pub fn to_convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            ratios: SplitRatios::new(self.train_ratio, self.val_ratio),
            seed: self.seed,
            overwrite: !self.no_overwrite,
        }
    }
}

// Validate that the ratio is between 0.0 and 1.0
fn validate_ratio(s: &str) -> Result<f64, String> {
    match f64::from_str(s) {
        Ok(val) if (0.0..=1.0).contains(&val) => Ok(val),
        _ => Err("RATIO must be between 0.0 and 1.0".to_string()),
    }
}
