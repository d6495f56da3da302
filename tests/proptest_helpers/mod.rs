#![allow(dead_code)]

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

/// Relative tolerance for comparing normalized label values.
pub const EPS_LABEL: f64 = 1e-12;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPS_LABEL * a.abs().max(b.abs()).max(1.0)
}

/// Image dimensions as seen in real corpora, never zero.
pub fn arb_image_dims() -> BoxedStrategy<(u32, u32)> {
    (1u32..=8192, 1u32..=8192).boxed()
}

/// Pixel-space corners, including boxes that stick out of the image or are reversed.
pub fn arb_pixel_corners() -> BoxedStrategy<(f64, f64, f64, f64)> {
    let coord = -1000.0f64..10000.0;
    (coord.clone(), coord.clone(), coord.clone(), coord).boxed()
}

/// Distinct image names, `min..=max` of them, in arbitrary order.
pub fn arb_image_names(min: usize, max: usize) -> BoxedStrategy<Vec<String>> {
    proptest::collection::btree_set(0u32..100_000, min..=max)
        .prop_map(|ids| ids.into_iter().map(|id| format!("img_{id}.jpg")).collect())
        .prop_shuffle()
        .boxed()
}

/// A class label sequence drawn from a small vocabulary so labels repeat.
pub fn arb_class_sequence(max_len: usize) -> BoxedStrategy<Vec<String>> {
    proptest::collection::vec("[a-e]{1,2}", 0..=max_len).boxed()
}
