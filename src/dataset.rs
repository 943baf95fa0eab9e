use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs::copy;
use std::path::Path;

use crate::error::{ConvertError, Result};
use crate::io::is_dir_empty;
use crate::types::{
    OutputDirs, SamplePair, SplitCounts, SplitRatios, SplitStats, Subset, IMAGES_DIR, LABELS_DIR,
};
use crate::utils::{create_progress_bar, label_name_for, list_files};

/// Pair every image in `<source_dir>/images` with its label in
/// `<source_dir>/labels`. Fails on the first image without a label, before
/// anything is copied.
pub fn pair_samples(source_dir: &Path) -> Result<Vec<SamplePair>> {
    let images_dir = source_dir.join(IMAGES_DIR);
    let labels_dir = source_dir.join(LABELS_DIR);

    if is_dir_empty(&images_dir)? || is_dir_empty(&labels_dir)? {
        return Err(ConvertError::EmptySource {
            path: source_dir.to_path_buf(),
        });
    }

    let images = list_files(&images_dir)?;
    if images.is_empty() {
        return Err(ConvertError::EmptySource {
            path: source_dir.to_path_buf(),
        });
    }

    images
        .into_iter()
        .map(|image| {
            let Some(label_name) = label_name_for(&image) else {
                return Err(ConvertError::MissingLabel {
                    image,
                    label: labels_dir.clone(),
                });
            };
            let label = labels_dir.join(label_name);
            if !label.is_file() {
                return Err(ConvertError::MissingLabel { image, label });
            }
            Ok(SamplePair { image, label })
        })
        .collect()
}

/// Shuffle `pairs` and cut the shuffled sequence into train/valid/test by
/// position.
pub fn partition<R: Rng + ?Sized>(
    mut pairs: Vec<SamplePair>,
    ratios: &SplitRatios,
    rng: &mut R,
) -> (SplitCounts, [Vec<SamplePair>; 3]) {
    pairs.shuffle(rng);

    let counts = SplitCounts::from_total(pairs.len(), ratios);
    let test = pairs.split_off(counts.train + counts.valid);
    let valid = pairs.split_off(counts.train);
    (counts, [pairs, valid, test])
}

/// Copy one pair into the subset folders, keeping both file names.
fn copy_pair(pair: &SamplePair, output_dirs: &OutputDirs, subset: Subset) -> Result<()> {
    for (source, target_dir) in [
        (&pair.image, output_dirs.images(subset)),
        (&pair.label, output_dirs.labels(subset)),
    ] {
        let Some(file_name) = source.file_name() else {
            return Err(ConvertError::Io {
                path: source.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "path has no file name",
                ),
            });
        };
        let target = target_dir.join(file_name);
        copy(source, &target).map_err(ConvertError::io(source))?;
        debug!("Copied {:?} -> {:?}", source, target);
    }
    Ok(())
}

/// Randomly split the source pairs into the three subsets of `output_dirs`
/// and copy them over.
pub fn split_and_copy<R: Rng + ?Sized>(
    source_dir: &Path,
    output_dirs: &OutputDirs,
    ratios: &SplitRatios,
    rng: &mut R,
) -> Result<SplitStats> {
    let pairs = pair_samples(source_dir)?;
    info!("Found {} image/label pairs.", pairs.len());

    let (counts, subsets) = partition(pairs, ratios, rng);
    info!(
        "Splitting into train={}, valid={}, test={}",
        counts.train, counts.valid, counts.test
    );

    let mut stats = SplitStats::new();
    for (subset, pairs) in Subset::ALL.into_iter().zip(subsets.iter()) {
        if pairs.is_empty() {
            continue;
        }
        let pb = create_progress_bar(pairs.len() as u64, subset.dir_name());
        for pair in pairs {
            copy_pair(pair, output_dirs, subset)?;
            stats.increment(subset);
            pb.inc(1);
        }
        pb.finish_with_message(format!("{} copy complete", subset));
    }

    Ok(stats)
}
