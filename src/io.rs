use log::{debug, info};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::types::{Manifest, OutputDirs, CLASS_FILE, IMAGES_DIR, LABELS_DIR, MANIFEST_FILE};
use crate::utils::recreate_directory;

/// Check that `source_dir` looks like a flat YOLO export.
pub fn validate_structure(source_dir: &Path) -> Result<()> {
    if !source_dir.is_dir() {
        return Err(ConvertError::MissingDirectory {
            path: source_dir.to_path_buf(),
        });
    }

    for required in [IMAGES_DIR, LABELS_DIR, CLASS_FILE] {
        let path = source_dir.join(required);
        if !path.exists() {
            return Err(ConvertError::InvalidLayout { missing: path });
        }
    }

    debug!("Source layout of {:?} is valid", source_dir);
    Ok(())
}

/// Set up `<work_dir>/{train,valid,test}/{images,labels}`.
///
/// With `overwrite` every existing target is deleted before being recreated
/// empty. Without it an existing target fails the run; the check covers all
/// six paths before anything is created.
pub fn prepare_output_skeleton(work_dir: &Path, overwrite: bool) -> Result<OutputDirs> {
    let output_dirs = OutputDirs::new(work_dir);
    let targets = output_dirs.all();

    if !overwrite {
        if let Some(existing) = targets.iter().find(|path| path.exists()) {
            return Err(ConvertError::PathExists {
                path: existing.clone(),
            });
        }
    }

    for path in &targets {
        recreate_directory(path)?;
    }

    info!("Created output skeleton under {:?}", work_dir);
    Ok(output_dirs)
}

/// True when `dir` has no entries at all.
pub fn is_dir_empty(dir: &Path) -> Result<bool> {
    let mut entries = fs::read_dir(dir).map_err(ConvertError::io(dir))?;
    Ok(entries.next().is_none())
}

/// Find the single top-level entry named exactly `classes.txt`.
pub fn locate_class_file(source_dir: &Path) -> Result<PathBuf> {
    let mut matches = Vec::new();
    for entry in fs::read_dir(source_dir).map_err(ConvertError::io(source_dir))? {
        let entry = entry.map_err(ConvertError::io(source_dir))?;
        if entry.file_name() == CLASS_FILE {
            matches.push(entry.path());
        }
    }

    match matches.len() {
        0 => Err(ConvertError::ClassFileNotFound {
            path: source_dir.to_path_buf(),
        }),
        1 => Ok(matches.remove(0)),
        count => Err(ConvertError::AmbiguousClassFile {
            path: source_dir.to_path_buf(),
            count,
        }),
    }
}

/// Class names in file order, one per nonblank line, whitespace stripped.
pub fn read_class_names(class_file: &Path) -> Result<Vec<String>> {
    let reader = BufReader::new(File::open(class_file).map_err(ConvertError::io(class_file))?);
    let mut names = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(ConvertError::io(class_file))?;
        let name = line.trim();
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// Write `<dest_dir>/data.yaml` for the YOLOv8 trainer, replacing any
/// previous manifest. Returns the manifest path.
pub fn write_manifest(dest_dir: &Path, class_file: &Path) -> Result<PathBuf> {
    let names = read_class_names(class_file)?;
    let manifest = Manifest::new(names, &OutputDirs::new(dest_dir));

    let manifest_path = dest_dir.join(MANIFEST_FILE);
    let file = File::create(&manifest_path).map_err(ConvertError::io(&manifest_path))?;
    let mut writer = BufWriter::new(file);
    serde_yaml::to_writer(&mut writer, &manifest).map_err(|source| ConvertError::Manifest {
        path: manifest_path.clone(),
        source,
    })?;
    writer.flush().map_err(ConvertError::io(&manifest_path))?;

    info!("Wrote {:?} with {} classes", manifest_path, manifest.nc);
    Ok(manifest_path)
}
