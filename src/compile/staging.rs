//! All-or-nothing output directory.
//!
//! Every artifact of a run is written under `<output>/.yoloprep-staging`.
//! [`StagingDir::commit`] moves them into place once the whole run has
//! succeeded; dropping an uncommitted guard deletes the staging tree, so a
//! failed run never leaves its label files behind.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::PrepError;

pub const STAGING_DIR_NAME: &str = ".yoloprep-staging";
pub const LABELS_DIR_NAME: &str = "labels";
const PREVIOUS_DIR_NAME: &str = "previous";

#[derive(Debug)]
pub struct StagingDir {
    output_dir: PathBuf,
    path: PathBuf,
    committed: bool,
}

impl StagingDir {
    /// Creates a fresh staging directory under `output_dir`.
    ///
    /// Leftovers from an interrupted earlier run are removed first.
    pub fn create(output_dir: &Path) -> Result<Self, PrepError> {
        fs::create_dir_all(output_dir).map_err(PrepError::Io)?;

        let path = output_dir.join(STAGING_DIR_NAME);
        if path.exists() {
            debug!("removing stale staging dir {}", path.display());
            fs::remove_dir_all(&path).map_err(PrepError::Io)?;
        }
        fs::create_dir_all(path.join(LABELS_DIR_NAME)).map_err(PrepError::Io)?;

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            path,
            committed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn labels_dir(&self) -> PathBuf {
        self.path.join(LABELS_DIR_NAME)
    }

    /// Moves `labels/` and the named top-level files into the output dir.
    ///
    /// Existing outputs are first moved aside into the staging dir. If any
    /// rename fails, everything swapped in so far is undone and the previous
    /// outputs are put back. Nothing is deleted until every rename succeeded.
    pub fn commit(mut self, files: &[&str]) -> Result<(), PrepError> {
        let previous = self.path.join(PREVIOUS_DIR_NAME);
        fs::create_dir(&previous).map_err(PrepError::Io)?;

        let mut names = vec![LABELS_DIR_NAME];
        names.extend_from_slice(files);

        let mut swapped = Vec::with_capacity(names.len());
        for name in &names {
            if let Err(err) = self.swap_in(name, &previous) {
                self.roll_back(&names, &swapped, &previous);
                return Err(err);
            }
            swapped.push(*name);
        }

        self.committed = true;
        fs::remove_dir_all(&self.path).map_err(PrepError::Io)
    }

    fn swap_in(&self, name: &str, previous: &Path) -> Result<(), PrepError> {
        let target = self.output_dir.join(name);
        if target.exists() {
            fs::rename(&target, previous.join(name)).map_err(PrepError::Io)?;
        }
        fs::rename(self.path.join(name), &target).map_err(PrepError::Io)
    }

    fn roll_back(&self, names: &[&str], swapped: &[&str], previous: &Path) {
        for name in names {
            let target = self.output_dir.join(name);
            let saved = previous.join(name);

            if swapped.contains(name) {
                if let Err(err) = remove_path(&target) {
                    warn!("failed to remove {} during rollback: {}", target.display(), err);
                    continue;
                }
            }
            if saved.exists() {
                if let Err(err) = fs::rename(&saved, &target) {
                    warn!("failed to restore {}: {}", target.display(), err);
                }
            }
        }
    }
}

fn remove_path(path: &Path) -> std::io::Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if let Err(err) = fs::remove_dir_all(&self.path) {
            warn!(
                "failed to clean up staging dir {}: {}",
                self.path.display(),
                err
            );
        }
    }
}
