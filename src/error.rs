use std::path::{Path, PathBuf};

/// Every way a conversion run can abort. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Missing source dir: {path}")]
    MissingDirectory { path: PathBuf },

    #[error(
        "Input data must conform to the YOLO export format (images/, labels/, classes.txt): missing {missing}"
    )]
    InvalidLayout { missing: PathBuf },

    #[error("Path already exists, delete it and retry: {path}")]
    PathExists { path: PathBuf },

    #[error("No images or labels found in {path}")]
    EmptySource { path: PathBuf },

    #[error("Corresponding label {label} not found for image {image}")]
    MissingLabel { image: PathBuf, label: PathBuf },

    #[error("Only one classes.txt file expected in {path}, found {count}")]
    AmbiguousClassFile { path: PathBuf, count: usize },

    #[error("No classes.txt file found in {path}")]
    ClassFileNotFound { path: PathBuf },

    #[error("Invalid split ratios (train {train}, val {val}): {message}")]
    InvalidRatio {
        train: f64,
        val: f64,
        message: String,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ConvertError {
    /// Adapter for `map_err` that attaches the path being worked on.
    pub fn io(path: &Path) -> impl FnOnce(std::io::Error) -> ConvertError + '_ {
        move |source| ConvertError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
