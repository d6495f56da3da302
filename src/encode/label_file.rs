//! Scoped writer for one image's label file.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::PrepError;
use crate::ir::{label_rel_path, NormalizedLabel};

/// An open `labels/<stem>.txt` for a single image group.
///
/// Created on the first row of an image and finished when the next image
/// begins or input ends. Dropping it without [`finish`](Self::finish) still
/// closes the handle, so an error anywhere in the pipeline cannot leak it.
#[derive(Debug)]
pub struct LabelFile {
    image_name: String,
    path: PathBuf,
    writer: BufWriter<File>,
    lines: usize,
}

impl LabelFile {
    /// Creates (or truncates) the label file for `image_name` under `labels_dir`.
    pub fn create(labels_dir: &Path, image_name: &str) -> Result<Self, PrepError> {
        let path = labels_dir.join(label_rel_path(image_name));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(PrepError::Io)?;
        }

        let file = File::create(&path).map_err(PrepError::Io)?;
        Ok(Self {
            image_name: image_name.to_string(),
            path,
            writer: BufWriter::new(file),
            lines: 0,
        })
    }

    pub fn image_name(&self) -> &str {
        &self.image_name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_label(&mut self, label: &NormalizedLabel) -> Result<(), PrepError> {
        writeln!(self.writer, "{label}").map_err(PrepError::Io)?;
        self.lines += 1;
        Ok(())
    }

    /// Flushes and closes the file, returning the number of lines written.
    pub fn finish(mut self) -> Result<usize, PrepError> {
        self.writer.flush().map_err(PrepError::Io)?;
        Ok(self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{ClassIndex, CxCyWh};

    #[test]
    fn writes_one_line_per_label() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut file = LabelFile::create(temp.path(), "sub/a.jpg").expect("create label file");
        assert_eq!(file.image_name(), "sub/a.jpg");

        file.write_label(&NormalizedLabel::new(
            ClassIndex::new(0),
            CxCyWh::new(0.2, 0.4, 0.2, 0.4),
        ))
        .expect("write first");
        file.write_label(&NormalizedLabel::new(
            ClassIndex::new(1),
            CxCyWh::new(0.5, 0.5, 1.0, 1.0),
        ))
        .expect("write second");

        let path = file.path().to_path_buf();
        assert_eq!(file.finish().expect("finish"), 2);

        let content = fs::read_to_string(path).expect("read label file");
        assert_eq!(content, "0 0.2 0.4 0.2 0.4\n1 0.5 0.5 1 1\n");
    }

    #[test]
    fn create_truncates_existing_file() {
        let temp = tempfile::tempdir().expect("create temp dir");
        fs::write(temp.path().join("a.txt"), "stale\n").expect("write stale");

        let file = LabelFile::create(temp.path(), "a.jpg").expect("create label file");
        assert_eq!(file.finish().expect("finish"), 0);

        let content = fs::read_to_string(temp.path().join("a.txt")).expect("read label file");
        assert!(content.is_empty());
    }
}
