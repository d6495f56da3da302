//! yoloprep: compiles a flat bounding-box table into a YOLO training set.
//!
//! The input is a tab-separated table with one box per row, keyed by image
//! file name. The output is what a YOLO training run consumes: one label file
//! per image with normalized `class cx cy w h` lines, `train.txt`/`test.txt`
//! image lists, and a `dataset.yaml` descriptor.
//!
//! # Modules
//!
//! - [`ir`]: Core value types (boxes, rows, labels, class registry)
//! - [`reader`]: Annotation table reader and bbox literal parser
//! - [`images`]: Image existence and dimension lookup
//! - [`encode`]: Label encoder and per-image label files
//! - [`split`]: Train/test partitioning
//! - [`manifest`]: File lists and dataset descriptor
//! - [`compile`]: The end-to-end pipeline and its run report
//! - [`error`]: Error types for yoloprep operations

pub mod compile;
pub mod encode;
pub mod error;
pub mod images;
pub mod ir;
pub mod manifest;
pub mod reader;
pub mod split;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use compile::{compile_dataset, CompileOptions, PrepReport};
pub use error::PrepError;

/// The yoloprep CLI application.
#[derive(Parser)]
#[command(name = "yoloprep")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Compile an annotation table into labels, file lists and dataset.yaml.
    Prepare(PrepareArgs),
}

/// Arguments for the prepare subcommand.
#[derive(clap::Args)]
struct PrepareArgs {
    /// Tab-separated annotation table (image, class, bbox literal).
    #[arg(long, default_value = "annotations.csv", env = "YOLOPREP_ANNOTATIONS")]
    annotations: PathBuf,

    /// Directory containing the referenced images.
    #[arg(long, default_value = "images")]
    images: PathBuf,

    /// Directory receiving labels/, train.txt, test.txt and dataset.yaml.
    #[arg(long, default_value = ".")]
    output: PathBuf,

    /// Number of images placed in the test split.
    #[arg(long, default_value_t = split::DEFAULT_TEST_SIZE)]
    test_size: usize,

    /// Shuffle seed for a reproducible split (random if omitted).
    #[arg(long, env = "YOLOPREP_SEED")]
    seed: Option<u64>,

    /// Value of the `path` key in dataset.yaml.
    #[arg(long, default_value = ".")]
    dataset_root: String,

    /// Prefix for image paths in train.txt and test.txt.
    #[arg(long, default_value = "./images")]
    image_prefix: String,

    /// Output format for the run report ('text' or 'json').
    #[arg(long, default_value = "text")]
    report: String,
}

/// Run the yoloprep CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), PrepError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Prepare(args)) => run_prepare(args),
        None => {
            println!("yoloprep {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Compiles a bounding-box table into a YOLO training set.");
            println!();
            println!("Run 'yoloprep --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the prepare subcommand.
fn run_prepare(args: PrepareArgs) -> Result<(), PrepError> {
    if !matches!(args.report.as_str(), "text" | "json") {
        return Err(PrepError::InvalidOptions {
            message: format!(
                "unsupported report format '{}' (supported: text, json)",
                args.report
            ),
        });
    }

    let opts = CompileOptions {
        annotations: args.annotations,
        output_dir: args.output,
        split: split::SplitOptions {
            test_size: args.test_size,
            seed: args.seed,
        },
        manifest: manifest::ManifestOptions {
            dataset_root: args.dataset_root,
            image_prefix: args.image_prefix,
        },
    };
    let images = images::FsImageSource::new(args.images);

    let report = compile_dataset(&opts, &images)?;

    match args.report.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&report).map_err(PrepError::ReportWrite)?;
            println!("{}", json);
        }
        _ => {
            println!("Prepared dataset in {}:", opts.output_dir.display());
            print!("{}", report);
        }
    }

    Ok(())
}
