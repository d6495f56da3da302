//! The image filesystem collaborator.
//!
//! The compiler never decodes pixels; it only needs to know whether an image
//! exists and how large it is. [`FsImageSource`] answers both from the file
//! header under an image root, [`MemoryImageSource`] answers from a table and
//! is handy in tests and benches.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::PrepError;
use crate::ir::ImageDimensions;

/// Lookup of images by name relative to an image root.
pub trait ImageSource {
    /// Returns true if `name` refers to an existing image.
    fn exists(&self, name: &str) -> bool;

    /// Reads the pixel dimensions of `name`.
    ///
    /// Only called for names that [`exists`](Self::exists) accepted.
    fn dimensions(&self, name: &str) -> Result<ImageDimensions, PrepError>;
}

/// Images stored as files under a root directory (conventionally `images/`).
#[derive(Clone, Debug)]
pub struct FsImageSource {
    root: PathBuf,
}

impl FsImageSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl ImageSource for FsImageSource {
    fn exists(&self, name: &str) -> bool {
        self.path_of(name).is_file()
    }

    fn dimensions(&self, name: &str) -> Result<ImageDimensions, PrepError> {
        read_image_dimensions(&self.path_of(name))
    }
}

/// Reads width and height from an image header without decoding it.
pub fn read_image_dimensions(path: &Path) -> Result<ImageDimensions, PrepError> {
    let size = imagesize::size(path).map_err(|source| PrepError::ImageDimensionRead {
        path: path.to_path_buf(),
        source,
    })?;

    dimensions_from_header(path, size.width, size.height)
}

fn dimensions_from_header(
    path: &Path,
    width: usize,
    height: usize,
) -> Result<ImageDimensions, PrepError> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok(ImageDimensions::new(w, h)),
        _ => Err(PrepError::ImageTooLarge {
            path: path.to_path_buf(),
            width,
            height,
        }),
    }
}

/// In-memory image table.
#[derive(Clone, Debug, Default)]
pub struct MemoryImageSource {
    images: BTreeMap<String, ImageDimensions>,
}

impl MemoryImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, name: impl Into<String>, width: u32, height: u32) -> Self {
        self.insert(name, width, height);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, width: u32, height: u32) {
        self.images
            .insert(name.into(), ImageDimensions::new(width, height));
    }
}

impl ImageSource for MemoryImageSource {
    fn exists(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    fn dimensions(&self, name: &str) -> Result<ImageDimensions, PrepError> {
        self.images.get(name).copied().ok_or_else(|| {
            PrepError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("image '{name}' is not registered"),
            ))
        })
    }
}

impl<T: ImageSource + ?Sized> ImageSource for &T {
    fn exists(&self, name: &str) -> bool {
        (**self).exists(name)
    }

    fn dimensions(&self, name: &str) -> Result<ImageDimensions, PrepError> {
        (**self).dimensions(name)
    }
}
