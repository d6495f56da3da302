//! Records flowing through the compiler: table rows in, label lines out.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use super::bbox::{BBoxXYXY, CxCyWh};
use super::ids::ClassIndex;
use super::space::{Normalized, Pixel};

/// One row of the annotation table.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationRow {
    /// Image file name relative to the image root.
    pub image_name: String,

    /// Free-form class label.
    pub class_label: String,

    /// Box in absolute pixel coordinates.
    pub bbox: BBoxXYXY<Pixel>,

    /// 1-based line number in the source table, for error reporting.
    pub line: usize,
}

impl AnnotationRow {
    pub fn new(
        image_name: impl Into<String>,
        class_label: impl Into<String>,
        bbox: BBoxXYXY<Pixel>,
        line: usize,
    ) -> Self {
        Self {
            image_name: image_name.into(),
            class_label: class_label.into(),
            bbox,
            line,
        }
    }
}

/// Maps an image name to its label file path, relative to `labels/`.
///
/// The extension is replaced by `.txt`; subdirectories are kept. Only normal
/// components are used, so the result never leaves `labels/` and `./a.jpg`
/// maps to the same file as `a.jpg`.
pub fn label_rel_path(image_name: &str) -> PathBuf {
    Path::new(image_name)
        .components()
        .filter(|component| matches!(component, Component::Normal(_)))
        .collect::<PathBuf>()
        .with_extension("txt")
}

/// True when `image_name` is a relative path that stays inside its root.
///
/// Rejects absolute paths, `..` components and names without any normal
/// component (e.g. `.`).
pub fn is_contained_image_name(image_name: &str) -> bool {
    let mut has_normal = false;
    for component in Path::new(image_name).components() {
        match component {
            Component::Normal(_) => has_normal = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    has_normal
}

/// Width and height of an image in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero, i.e. normalization would divide by zero.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// One line of a label file: class index plus normalized center and size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedLabel {
    pub class_index: ClassIndex,
    pub bbox: CxCyWh<Normalized>,
}

impl NormalizedLabel {
    pub fn new(class_index: ClassIndex, bbox: CxCyWh<Normalized>) -> Self {
        Self { class_index, bbox }
    }

    #[inline]
    pub fn cx(&self) -> f64 {
        self.bbox.cx()
    }

    #[inline]
    pub fn cy(&self) -> f64 {
        self.bbox.cy()
    }

    #[inline]
    pub fn w(&self) -> f64 {
        self.bbox.w
    }

    #[inline]
    pub fn h(&self) -> f64 {
        self.bbox.h
    }
}

/// Renders `<class_index> <cx> <cy> <w> <h>` with shortest round-trip floats.
impl fmt::Display for NormalizedLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.class_index,
            self.cx(),
            self.cy(),
            self.w(),
            self.h()
        )
    }
}
