//! Label encoder: pixel boxes in, normalized YOLO label lines out.
//!
//! For a row with box `(x1, y1, x2, y2)` on a `width` x `height` image:
//!
//! ```text
//! cx = (x1 + x2) / 2 / width     w = (x2 - x1) / width
//! cy = (y1 + y2) / 2 / height    h = (y2 - y1) / height
//! ```
//!
//! Boxes that stick out of the image are not clamped. The resulting values
//! fall outside `[0, 1]` and are written as-is; the consumer of the label
//! files decides what to do with them.

mod label_file;

pub use label_file::LabelFile;

use log::debug;

use crate::error::PrepError;
use crate::images::ImageSource;
use crate::ir::{AnnotationRow, ClassRegistry, ImageDimensions, NormalizedLabel};

/// Encodes a single row against known image dimensions.
///
/// Resolves the row's class label through `registry`, appending it on first
/// sight. Fails with [`PrepError::DegenerateImage`] instead of producing
/// infinite or NaN values when a dimension is zero.
pub fn encode_row(
    row: &AnnotationRow,
    dims: ImageDimensions,
    registry: &mut ClassRegistry,
) -> Result<NormalizedLabel, PrepError> {
    if dims.is_degenerate() {
        return Err(PrepError::DegenerateImage {
            image: row.image_name.clone(),
            width: dims.width,
            height: dims.height,
        });
    }

    let class_index = registry.resolve(&row.class_label);
    let bbox = row
        .bbox
        .to_normalized_cxcywh(dims.width as f64, dims.height as f64);

    Ok(NormalizedLabel::new(class_index, bbox))
}

/// Stateful encoder for one run.
///
/// Owns the class registry and caches the dimensions of the image currently
/// being encoded, so each image is read once per contiguous group.
pub struct LabelEncoder<S: ImageSource> {
    images: S,
    registry: ClassRegistry,
    current: Option<(String, ImageDimensions)>,
}

impl<S: ImageSource> LabelEncoder<S> {
    pub fn new(images: S) -> Self {
        Self {
            images,
            registry: ClassRegistry::new(),
            current: None,
        }
    }

    /// Dimensions for `image_name`, read from the image source on first use.
    pub fn dimensions_for(&mut self, image_name: &str) -> Result<ImageDimensions, PrepError> {
        if let Some((name, dims)) = &self.current {
            if name == image_name {
                return Ok(*dims);
            }
        }

        let dims = self.images.dimensions(image_name)?;
        debug!("image '{}' is {}x{}", image_name, dims.width, dims.height);
        self.current = Some((image_name.to_string(), dims));
        Ok(dims)
    }

    pub fn encode(&mut self, row: &AnnotationRow) -> Result<NormalizedLabel, PrepError> {
        let dims = self.dimensions_for(&row.image_name)?;
        encode_row(row, dims, &mut self.registry)
    }

    pub fn into_registry(self) -> ClassRegistry {
        self.registry
    }
}
