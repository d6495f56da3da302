use std::path::PathBuf;
use thiserror::Error;

/// The main error type for yoloprep operations.
///
/// Every variant aborts the run; there is no per-row recovery.
#[derive(Debug, Error)]
pub enum PrepError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record at {path}:{line}: {message}")]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Image '{image}' referenced at {path}:{line} was not found")]
    MissingImage {
        path: PathBuf,
        line: usize,
        image: String,
    },

    #[error("Image '{image}' has degenerate dimensions {width}x{height}")]
    DegenerateImage {
        image: String,
        width: u32,
        height: u32,
    },

    #[error("Failed to read image dimensions from {path}: {source}")]
    ImageDimensionRead {
        path: PathBuf,
        #[source]
        source: imagesize::ImageError,
    },

    #[error("Image {path} reports dimensions {width}x{height}, which exceed the u32 range")]
    ImageTooLarge {
        path: PathBuf,
        width: usize,
        height: usize,
    },

    #[error("Failed to read annotation table {path}: {source}")]
    AnnotationRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write dataset descriptor to {path}: {source}")]
    DescriptorWrite {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize run report: {0}")]
    ReportWrite(#[source] serde_json::Error),

    #[error("Invalid options: {message}")]
    InvalidOptions { message: String },
}
