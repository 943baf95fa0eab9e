use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::types::LABEL_EXTENSION;

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let template = format!(
        "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
        label
    );
    if let Ok(style) = ProgressStyle::default_bar().template(&template) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// Delete `path` if present and recreate it empty.
pub fn recreate_directory(path: &Path) -> Result<()> {
    if path.exists() {
        log::warn!(
            "Directory {:?} already exists. Deleting and recreating it.",
            path
        );
        fs::remove_dir_all(path).map_err(ConvertError::io(path))?;
    }
    fs::create_dir_all(path).map_err(ConvertError::io(path))
}

/// Regular files directly inside `dir`, sorted by file name.
///
/// Sorting makes a seeded shuffle independent of the order the filesystem
/// happens to return entries in. Nested directories are not descended into.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(ConvertError::io(dir))? {
        let entry = entry.map_err(ConvertError::io(dir))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(ConvertError::io(&path))?;
        if file_type.is_dir() {
            debug!("Skipping nested directory {:?}", path);
            continue;
        }
        files.push(path);
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Label file name for an image: its stem joined with `.txt`.
///
/// `a.b.jpg` maps to `a.b.txt`; an image without an extension gets `.txt`
/// appended.
pub fn label_name_for(image: &Path) -> Option<OsString> {
    let stem = image.file_stem()?;
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(LABEL_EXTENSION);
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn test_label_name_for() {
        assert_eq!(
            label_name_for(Path::new("images/a.jpg")),
            Some(OsString::from("a.txt"))
        );
        assert_eq!(
            label_name_for(Path::new("frame.jpg.v2.png")),
            Some(OsString::from("frame.jpg.v2.txt"))
        );
        assert_eq!(
            label_name_for(Path::new("noext")),
            Some(OsString::from("noext.txt"))
        );
        assert_eq!(label_name_for(Path::new("/")), None);
    }

    #[test]
    fn test_list_files_sorted_and_flat() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path();
        File::create(dir.join("c.jpg")).unwrap();
        File::create(dir.join("a.jpg")).unwrap();
        File::create(dir.join("b.png")).unwrap();
        fs::create_dir(dir.join("nested")).unwrap();
        File::create(dir.join("nested/d.jpg")).unwrap();

        let names: Vec<_> = list_files(dir)
            .unwrap()
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.png", "c.jpg"]);
    }

    #[test]
    fn test_recreate_directory_clears_contents() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("train/images");
        fs::create_dir_all(&dir).unwrap();
        File::create(dir.join("stale.jpg")).unwrap();

        recreate_directory(&dir).unwrap();

        assert!(dir.is_dir());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }
}
