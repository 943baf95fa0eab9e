use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};

// Name of the manifest written at the root of the output dataset
pub const MANIFEST_FILE: &str = "data.yaml";

// Name of the class list expected at the root of the source dataset
pub const CLASS_FILE: &str = "classes.txt";

pub const IMAGES_DIR: &str = "images";
pub const LABELS_DIR: &str = "labels";
pub const LABEL_EXTENSION: &str = "txt";

// Slack allowed when checking that the ratios sum to at most 1.0
const RATIO_EPSILON: f64 = 1e-9;

/// One of the three partitions of the output dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subset {
    Train,
    Valid,
    Test,
}

impl Subset {
    pub const ALL: [Subset; 3] = [Subset::Train, Subset::Valid, Subset::Test];

    pub fn dir_name(self) -> &'static str {
        match self {
            Subset::Train => "train",
            Subset::Valid => "valid",
            Subset::Test => "test",
        }
    }
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

// The two folders every subset carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Images,
    Labels,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Images, Category::Labels];

    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Images => IMAGES_DIR,
            Category::Labels => LABELS_DIR,
        }
    }
}

/// Train and validation fractions; the test subset receives the remainder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitRatios {
    pub train: f64,
    pub val: f64,
}

impl Default for SplitRatios {
    fn default() -> Self {
        Self {
            train: 0.7,
            val: 0.2,
        }
    }
}

impl SplitRatios {
    pub fn new(train: f64, val: f64) -> Self {
        Self { train, val }
    }

    pub fn test(&self) -> f64 {
        (1.0 - self.train - self.val).max(0.0)
    }

    /// Reject ratios outside [0, 1] or summing above 1.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| ConvertError::InvalidRatio {
            train: self.train,
            val: self.val,
            message: message.to_string(),
        };

        if !(0.0..=1.0).contains(&self.train) {
            return Err(invalid("train ratio must be between 0.0 and 1.0"));
        }
        if !(0.0..=1.0).contains(&self.val) {
            return Err(invalid("val ratio must be between 0.0 and 1.0"));
        }
        if self.train + self.val > 1.0 + RATIO_EPSILON {
            return Err(invalid("train and val ratios must not sum above 1.0"));
        }
        Ok(())
    }
}

/// Subset sizes for a dataset of a given total size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SplitCounts {
    pub train: usize,
    pub valid: usize,
    pub test: usize,
}

impl SplitCounts {
    pub fn from_total(total: usize, ratios: &SplitRatios) -> Self {
        let train = ((total as f64 * ratios.train).floor() as usize).min(total);
        let valid = ((total as f64 * ratios.val).floor() as usize).min(total - train);
        Self {
            train,
            valid,
            test: total - train - valid,
        }
    }

    pub fn total(&self) -> usize {
        self.train + self.valid + self.test
    }

    /// Subset for a position in the shuffled sequence.
    pub fn subset_for(&self, index: usize) -> Subset {
        if index < self.train {
            Subset::Train
        } else if index < self.train + self.valid {
            Subset::Valid
        } else {
            Subset::Test
        }
    }

    pub fn get(&self, subset: Subset) -> usize {
        match subset {
            Subset::Train => self.train,
            Subset::Valid => self.valid,
            Subset::Test => self.test,
        }
    }
}

// An image file together with its label file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SamplePair {
    pub image: PathBuf,
    pub label: PathBuf,
}

// Paths of the output skeleton: <root>/<subset>/<category>
#[derive(Debug, Clone)]
pub struct OutputDirs {
    pub root: PathBuf,
}

impl OutputDirs {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn dir(&self, subset: Subset, category: Category) -> PathBuf {
        self.root.join(subset.dir_name()).join(category.dir_name())
    }

    pub fn images(&self, subset: Subset) -> PathBuf {
        self.dir(subset, Category::Images)
    }

    pub fn labels(&self, subset: Subset) -> PathBuf {
        self.dir(subset, Category::Labels)
    }

    /// All six subset/category paths, train first.
    pub fn all(&self) -> Vec<PathBuf> {
        Subset::ALL
            .iter()
            .flat_map(|&subset| Category::ALL.iter().map(move |&cat| self.dir(subset, cat)))
            .collect()
    }
}

/// The `data.yaml` document read by the YOLOv8 trainer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub names: Vec<String>,
    pub nc: usize,
    pub train: String,
    pub val: String,
    pub test: String,
}

impl Manifest {
    pub fn new(names: Vec<String>, output_dirs: &OutputDirs) -> Self {
        let path_string = |subset| output_dirs.images(subset).to_string_lossy().into_owned();
        Self {
            nc: names.len(),
            names,
            train: path_string(Subset::Train),
            val: path_string(Subset::Valid),
            test: path_string(Subset::Test),
        }
    }
}

// Number of image/label pairs copied into each subset
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SplitStats {
    pub copied: SplitCounts,
}

impl SplitStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, subset: Subset) {
        match subset {
            Subset::Train => self.copied.train += 1,
            Subset::Valid => self.copied.valid += 1,
            Subset::Test => self.copied.test += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.copied.total()
    }

    pub fn print_summary(&self) {
        log::info!("=== Split Summary ===");
        log::info!("Train pairs: {}", self.copied.train);
        log::info!("Valid pairs: {}", self.copied.valid);
        log::info!("Test pairs: {}", self.copied.test);
        log::info!("Total pairs copied: {}", self.total());

        if self.copied.test == 0 {
            log::warn!("Test subset is empty");
        }
    }
}
