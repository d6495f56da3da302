//! Annotation table reader.
//!
//! The table is tab-separated with no header row:
//!
//! ```text
//! image_name<TAB>class_label<TAB>bbox_literal[<TAB>mask]
//! ```
//!
//! `bbox_literal` is a textual 4-tuple such as `(10, 10, 30, 30)`. An optional
//! trailing mask column is accepted and ignored. Rows are yielded lazily in
//! file order; rows for one image are expected to be adjacent.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::PrepError;
use crate::images::ImageSource;
use crate::ir::{is_contained_image_name, AnnotationRow, BBoxXYXY, Pixel};

const MIN_COLUMNS: usize = 3;
const MAX_COLUMNS: usize = 4;

/// Streams [`AnnotationRow`]s out of an annotation table.
///
/// The first row of every image group is checked against the image source;
/// a missing image fails with [`PrepError::MissingImage`].
pub struct AnnotationReader<R: Read, S: ImageSource> {
    records: csv::StringRecordsIntoIter<R>,
    path: PathBuf,
    images: S,
    current_image: Option<String>,
    failed: bool,
}

impl<S: ImageSource> AnnotationReader<BufReader<File>, S> {
    /// Opens the table at `path`.
    pub fn open(path: &Path, images: S) -> Result<Self, PrepError> {
        let file = File::open(path).map_err(PrepError::Io)?;
        Ok(Self::from_reader(BufReader::new(file), path, images))
    }
}

impl<R: Read, S: ImageSource> AnnotationReader<R, S> {
    /// Wraps an arbitrary byte source. `path` is only used in error messages.
    pub fn from_reader(reader: R, path: &Path, images: S) -> Self {
        let records = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader)
            .into_records();

        Self {
            records,
            path: path.to_path_buf(),
            images,
            current_image: None,
            failed: false,
        }
    }

    fn malformed(&self, line: usize, message: impl Into<String>) -> PrepError {
        PrepError::MalformedRecord {
            path: self.path.clone(),
            line,
            message: message.into(),
        }
    }

    fn parse_record(&mut self, record: csv::StringRecord) -> Result<AnnotationRow, PrepError> {
        let line = record
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or_default();

        if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&record.len()) {
            return Err(self.malformed(
                line,
                format!(
                    "expected {MIN_COLUMNS} or {MAX_COLUMNS} tab-separated columns, found {}",
                    record.len()
                ),
            ));
        }

        let image_name = record[0].trim();
        let class_label = record[1].trim();
        if image_name.is_empty() {
            return Err(self.malformed(line, "image name is empty"));
        }
        if !is_contained_image_name(image_name) {
            return Err(self.malformed(
                line,
                format!("image name '{image_name}' must be a relative path inside the image root"),
            ));
        }

        let bbox = parse_bbox_literal(&record[2]).map_err(|message| self.malformed(line, message))?;

        if self.current_image.as_deref() != Some(image_name) {
            if !self.images.exists(image_name) {
                return Err(PrepError::MissingImage {
                    path: self.path.clone(),
                    line,
                    image: image_name.to_string(),
                });
            }
            self.current_image = Some(image_name.to_string());
        }

        Ok(AnnotationRow::new(image_name, class_label, bbox, line))
    }
}

impl<R: Read, S: ImageSource> Iterator for AnnotationReader<R, S> {
    type Item = Result<AnnotationRow, PrepError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let result = match self.records.next()? {
            Ok(record) => self.parse_record(record),
            Err(source) => Err(PrepError::AnnotationRead {
                path: self.path.clone(),
                source,
            }),
        };

        self.failed = result.is_err();
        Some(result)
    }
}

/// Parses a bounding box literal into a pixel-space box.
///
/// Accepts exactly four finite numbers separated by commas, optionally
/// wrapped in one pair of `()` or `[]`. Nothing is evaluated; any other
/// shape is rejected with a message describing the problem.
pub fn parse_bbox_literal(raw: &str) -> Result<BBoxXYXY<Pixel>, String> {
    let trimmed = raw.trim();
    let inner = strip_brackets(trimmed)?;

    // A fifth part means too many numbers.
    let parts: Vec<&str> = inner.splitn(5, ',').collect();
    if parts.len() != 4 {
        return Err(format!(
            "bbox literal '{}' must contain exactly four comma-separated numbers",
            trimmed
        ));
    }

    let mut values = [0.0f64; 4];
    for (slot, (part, name)) in values
        .iter_mut()
        .zip(parts.iter().zip(["x1", "y1", "x2", "y2"]))
    {
        *slot = parse_number(part, name)?;
    }

    let [x1, y1, x2, y2] = values;
    Ok(BBoxXYXY::from_xyxy(x1, y1, x2, y2))
}

fn strip_brackets(literal: &str) -> Result<&str, String> {
    let open = literal.chars().next();
    let close = literal.chars().next_back();

    match (open, close) {
        (Some('('), Some(')')) | (Some('['), Some(']')) if literal.len() >= 2 => {
            Ok(&literal[1..literal.len() - 1])
        }
        (Some('(' | '['), _) | (_, Some(')' | ']')) => {
            Err(format!("bbox literal '{literal}' has unbalanced brackets"))
        }
        _ => Ok(literal),
    }
}

fn parse_number(raw: &str, field_name: &str) -> Result<f64, String> {
    let token = raw.trim();
    if token.is_empty() {
        return Err(format!("bbox {field_name} is empty"));
    }

    let value = token
        .parse::<f64>()
        .map_err(|_| format!("invalid bbox {field_name} '{token}'; expected a number"))?;

    if !value.is_finite() {
        return Err(format!("bbox {field_name} '{token}' is not finite"));
    }

    Ok(value)
}

/// Fuzz-only entrypoint: parses a whole table without consulting any images.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_table(bytes: &[u8]) -> Result<usize, PrepError> {
    struct AnyImage;

    impl ImageSource for AnyImage {
        fn exists(&self, _name: &str) -> bool {
            true
        }

        fn dimensions(&self, _name: &str) -> Result<crate::ir::ImageDimensions, PrepError> {
            Ok(crate::ir::ImageDimensions::new(1, 1))
        }
    }

    let reader = AnnotationReader::from_reader(bytes, Path::new("<fuzz>"), AnyImage);
    let mut count = 0;
    for row in reader {
        row?;
        count += 1;
    }
    Ok(count)
}
