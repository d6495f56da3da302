//! Core value types for the annotation compiler.
//!
//! Boxes carry their coordinate space as a type parameter so pixel boxes
//! from the annotation table cannot be written to a label file without
//! going through normalization.
//!
//! # Example
//!
//! ```
//! use yoloprep::ir::{BBoxXYXY, ClassRegistry, NormalizedLabel, Pixel};
//!
//! let mut registry = ClassRegistry::new();
//! let class_index = registry.resolve("cat");
//! let bbox = BBoxXYXY::<Pixel>::from_xyxy(10.0, 10.0, 30.0, 30.0);
//! let label = NormalizedLabel::new(class_index, bbox.to_normalized_cxcywh(100.0, 50.0));
//! assert_eq!(label.to_string(), "0 0.2 0.4 0.2 0.4");
//! ```

mod bbox;
mod coord;
mod ids;
mod model;
mod registry;
mod space;

pub use bbox::{BBoxXYXY, CxCyWh};
pub use coord::Coord;
pub use ids::ClassIndex;
pub use model::{
    is_contained_image_name, label_rel_path, AnnotationRow, ImageDimensions, NormalizedLabel,
};
pub use registry::ClassRegistry;
pub use space::{Normalized, Pixel};
