//! Dataset descriptor and file-list manifests.
//!
//! Three artifacts are written next to `labels/`:
//!
//! - `train.txt` and `test.txt`: one `./images/<name>` path per line.
//! - `dataset.yaml`: the descriptor read by the training collaborator. Both
//!   `val` and `test` point at the test list.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PrepError;
use crate::split::Split;

pub const TRAIN_LIST_FILE: &str = "train.txt";
pub const TEST_LIST_FILE: &str = "test.txt";
pub const DESCRIPTOR_FILE: &str = "dataset.yaml";

/// How manifest paths and the descriptor root are spelled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestOptions {
    /// Value of the descriptor's `path` key.
    pub dataset_root: String,
    /// Prefix joined with each image name in the file lists.
    pub image_prefix: String,
}

impl Default for ManifestOptions {
    fn default() -> Self {
        Self {
            dataset_root: ".".to_string(),
            image_prefix: "./images".to_string(),
        }
    }
}

/// The descriptor serialized to `dataset.yaml`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDescriptor {
    pub path: String,
    pub train: String,
    pub val: String,
    pub test: String,
    pub nc: usize,
    pub names: Vec<String>,
}

/// Everything the finalization writers emit, built once after all rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DatasetManifest {
    pub train_list: Vec<String>,
    pub test_list: Vec<String>,
    pub class_count: usize,
    pub class_names: Vec<String>,
}

impl DatasetManifest {
    pub fn new(split: &Split, class_names: Vec<String>, opts: &ManifestOptions) -> Self {
        let to_path = |name: &String| image_path(&opts.image_prefix, name);
        Self {
            train_list: split.train.iter().map(to_path).collect(),
            test_list: split.test.iter().map(to_path).collect(),
            class_count: class_names.len(),
            class_names,
        }
    }

    pub fn descriptor(&self, opts: &ManifestOptions) -> DatasetDescriptor {
        DatasetDescriptor {
            path: opts.dataset_root.clone(),
            train: TRAIN_LIST_FILE.to_string(),
            val: TEST_LIST_FILE.to_string(),
            test: TEST_LIST_FILE.to_string(),
            nc: self.class_count,
            names: self.class_names.clone(),
        }
    }
}

fn image_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix.trim_end_matches('/'), name)
    }
}

/// Writes `train.txt`, `test.txt` and `dataset.yaml` into `dir`.
pub fn write_manifest(
    dir: &Path,
    manifest: &DatasetManifest,
    opts: &ManifestOptions,
) -> Result<(), PrepError> {
    write_file_list(&dir.join(TRAIN_LIST_FILE), &manifest.train_list)?;
    write_file_list(&dir.join(TEST_LIST_FILE), &manifest.test_list)?;
    write_descriptor(&dir.join(DESCRIPTOR_FILE), &manifest.descriptor(opts))
}

/// Writes one entry per line.
pub fn write_file_list(path: &Path, entries: &[String]) -> Result<(), PrepError> {
    let file = File::create(path).map_err(PrepError::Io)?;
    let mut writer = BufWriter::new(file);
    for entry in entries {
        writeln!(writer, "{entry}").map_err(PrepError::Io)?;
    }
    writer.flush().map_err(PrepError::Io)
}

pub fn write_descriptor(path: &Path, descriptor: &DatasetDescriptor) -> Result<(), PrepError> {
    let yaml =
        serde_yaml::to_string(descriptor).map_err(|source| PrepError::DescriptorWrite {
            path: path.to_path_buf(),
            source,
        })?;
    std::fs::write(path, yaml).map_err(PrepError::Io)
}
