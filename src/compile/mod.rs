//! The annotation-to-training-set compiler.
//!
//! A single sequential pass over the annotation table:
//!
//! 1. [`AnnotationReader`] yields rows and checks each image exists.
//! 2. On the first row of an image, its dimensions are read and its label
//!    file is opened; the previous image's file is finished.
//! 3. [`LabelEncoder`] turns each row into a label line.
//! 4. After the last row, the distinct image list is split and the
//!    manifests and descriptor are written.
//!
//! Outputs go through a [`StagingDir`], so any error leaves the previous
//! contents of the output directory untouched.

mod report;
mod staging;

pub use report::{PrepCounts, PrepIssue, PrepIssueCode, PrepReport};
pub use staging::{StagingDir, LABELS_DIR_NAME, STAGING_DIR_NAME};

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use log::{debug, info, warn};

use crate::encode::{LabelEncoder, LabelFile};
use crate::error::PrepError;
use crate::images::ImageSource;
use crate::ir::label_rel_path;
use crate::manifest::{
    write_manifest, DatasetManifest, ManifestOptions, DESCRIPTOR_FILE, TEST_LIST_FILE,
    TRAIN_LIST_FILE,
};
use crate::reader::AnnotationReader;
use crate::split::{split_images, SplitOptions};

/// Inputs and knobs for one compile run.
#[derive(Clone, Debug)]
pub struct CompileOptions {
    /// The tab-separated annotation table.
    pub annotations: PathBuf,
    /// Directory receiving `labels/`, the file lists and `dataset.yaml`.
    pub output_dir: PathBuf,
    pub split: SplitOptions,
    pub manifest: ManifestOptions,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            annotations: PathBuf::from("annotations.csv"),
            output_dir: PathBuf::from("."),
            split: SplitOptions::default(),
            manifest: ManifestOptions::default(),
        }
    }
}

/// Compiles the annotation table into a YOLO training set.
///
/// # Errors
/// Aborts on the first malformed row, missing or degenerate image, or IO
/// failure. Nothing from the failed run is left in the output directory.
pub fn compile_dataset<S>(opts: &CompileOptions, images: &S) -> Result<PrepReport, PrepError>
where
    S: ImageSource + ?Sized,
{
    info!(
        "compiling {} into {}",
        opts.annotations.display(),
        opts.output_dir.display()
    );

    let staging = StagingDir::create(&opts.output_dir)?;
    let labels_dir = staging.labels_dir();

    let reader = AnnotationReader::open(&opts.annotations, images)?;
    let mut encoder = LabelEncoder::new(images);
    let mut report = PrepReport::default();

    let mut image_names: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut label_owners: HashMap<PathBuf, String> = HashMap::new();
    let mut current: Option<LabelFile> = None;

    for row in reader {
        let row = row?;

        let file = match current.take() {
            Some(file) if file.image_name() == row.image_name => current.insert(file),
            previous => {
                if let Some(previous) = previous {
                    previous.finish()?;
                }

                if seen.insert(row.image_name.clone()) {
                    let label_path = label_rel_path(&row.image_name);
                    if let Some(owner) = label_owners.get(&label_path) {
                        return Err(PrepError::MalformedRecord {
                            path: opts.annotations.clone(),
                            line: row.line,
                            message: format!(
                                "image '{}' maps to label file '{}' already used by image '{}'",
                                row.image_name,
                                label_path.display(),
                                owner
                            ),
                        });
                    }
                    label_owners.insert(label_path, row.image_name.clone());
                    image_names.push(row.image_name.clone());
                } else {
                    warn!(
                        "rows for '{}' are not contiguous (line {}); its label file will only keep this group",
                        row.image_name, row.line
                    );
                    report.add(PrepIssue::new(
                        PrepIssueCode::NonContiguousImage,
                        format!(
                            "image '{}' reappears at line {} after other images; earlier labels were overwritten",
                            row.image_name, row.line
                        ),
                    ));
                }

                encoder.dimensions_for(&row.image_name)?;
                debug!("opening label file for '{}'", row.image_name);
                current.insert(LabelFile::create(&labels_dir, &row.image_name)?)
            }
        };

        let label = encoder.encode(&row)?;
        let dims = encoder.dimensions_for(&row.image_name)?;
        if !row.bbox.is_within(dims.width as f64, dims.height as f64) {
            debug!(
                "box {:?} at line {} exceeds {}x{} image '{}'",
                row.bbox, row.line, dims.width, dims.height, row.image_name
            );
            report.counts.out_of_bounds_boxes += 1;
        }

        file.write_label(&label)?;
        report.counts.rows += 1;
    }

    if let Some(file) = current.take() {
        file.finish()?;
    }

    let class_names = encoder.into_registry().into_names();
    let split = split_images(image_names, &opts.split);
    let manifest = DatasetManifest::new(&split, class_names, &opts.manifest);
    write_manifest(staging.path(), &manifest, &opts.manifest)?;

    staging.commit(&[TRAIN_LIST_FILE, TEST_LIST_FILE, DESCRIPTOR_FILE])?;

    report.counts.images = split.total();
    report.counts.classes = manifest.class_count;
    report.counts.train = split.train.len();
    report.counts.test = split.test.len();

    if report.counts.out_of_bounds_boxes > 0 {
        warn!(
            "{} box(es) extend past their image and were written unclamped",
            report.counts.out_of_bounds_boxes
        );
        report.add(PrepIssue::new(
            PrepIssueCode::BoxOutOfBounds,
            format!(
                "{} box(es) extend past their image; normalized values outside [0, 1] were kept",
                report.counts.out_of_bounds_boxes
            ),
        ));
    }

    if split.train.is_empty() && !split.test.is_empty() {
        warn!(
            "only {} image(s); all of them went to the test split",
            split.test.len()
        );
        report.add(PrepIssue::new(
            PrepIssueCode::EmptyTrainSplit,
            format!(
                "all {} image(s) went to the test split; the train list is empty",
                split.test.len()
            ),
        ));
    }

    info!(
        "wrote {} label line(s) for {} image(s), {} class(es): {} train / {} test",
        report.counts.rows,
        report.counts.images,
        report.counts.classes,
        report.counts.train,
        report.counts.test
    );

    Ok(report)
}
