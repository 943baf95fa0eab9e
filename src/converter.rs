use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

use crate::dataset::split_and_copy;
use crate::error::Result;
use crate::io::{locate_class_file, prepare_output_skeleton, validate_structure, write_manifest};
use crate::types::SplitRatios;

/// Knobs for a conversion run beyond the source and destination paths.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    pub ratios: SplitRatios,
    /// Seed for the shuffle; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Delete existing subset folders instead of failing on them.
    pub overwrite: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            ratios: SplitRatios::default(),
            seed: None,
            overwrite: true,
        }
    }
}

/// Convert a flat YOLO export under `source_dir` into a YOLOv8 dataset.
///
/// Output goes to `dest_dir`, or into `source_dir` itself when no destination
/// is given. Existing subset folders are replaced and the shuffle is unseeded.
pub fn convert(
    source_dir: &Path,
    dest_dir: Option<&Path>,
    train_ratio: f64,
    val_ratio: f64,
) -> Result<()> {
    let options = ConvertOptions {
        ratios: SplitRatios::new(train_ratio, val_ratio),
        ..ConvertOptions::default()
    };
    convert_with_options(source_dir, dest_dir, &options)
}

pub fn convert_with_options(
    source_dir: &Path,
    dest_dir: Option<&Path>,
    options: &ConvertOptions,
) -> Result<()> {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    convert_with_rng(source_dir, dest_dir, options, &mut rng)
}

/// Same pipeline as [`convert_with_options`] with the random source supplied
/// by the caller. `options.seed` is ignored.
pub fn convert_with_rng<R: Rng + ?Sized>(
    source_dir: &Path,
    dest_dir: Option<&Path>,
    options: &ConvertOptions,
    rng: &mut R,
) -> Result<()> {
    let work_dir = dest_dir.unwrap_or(source_dir);
    let ratios = &options.ratios;

    ratios.validate()?;
    info!(
        "Converting {:?} into {:?} (train {:.2}, val {:.2}, test {:.2})",
        source_dir,
        work_dir,
        ratios.train,
        ratios.val,
        ratios.test()
    );

    validate_structure(source_dir)?;
    let output_dirs = prepare_output_skeleton(work_dir, options.overwrite)?;

    let stats = split_and_copy(source_dir, &output_dirs, ratios, rng)?;
    stats.print_summary();

    let class_file = locate_class_file(source_dir)?;
    write_manifest(work_dir, &class_file)?;

    info!("Conversion process completed successfully.");
    Ok(())
}
