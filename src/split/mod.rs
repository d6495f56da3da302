//! Train/test partitioning of the distinct image list.

use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};

/// Number of images placed in the test split unless configured otherwise.
pub const DEFAULT_TEST_SIZE: usize = 200;

/// Split options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitOptions {
    /// Upper bound on the test split size.
    pub test_size: usize,
    /// Explicit shuffle seed; `None` seeds from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            test_size: DEFAULT_TEST_SIZE,
            seed: None,
        }
    }
}

/// A disjoint partition of image names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<String>,
    pub test: Vec<String>,
}

impl Split {
    pub fn total(&self) -> usize {
        self.train.len() + self.test.len()
    }
}

/// Shuffles `names` in place, uniformly over all permutations.
pub fn shuffle_images(names: &mut [String], seed: Option<u64>) {
    if let Some(seed) = seed {
        let mut rng = StdRng::seed_from_u64(seed);
        names.shuffle(&mut rng);
    } else {
        let mut rng = rand::rng();
        names.shuffle(&mut rng);
    }
}

/// Shuffles the distinct image list and cuts it into test and train.
///
/// The first `min(test_size, len)` shuffled names become the test split and
/// the rest the train split. A corpus smaller than `test_size` ends up
/// entirely in test with an empty train split; an empty corpus gives two
/// empty splits.
pub fn split_images(mut names: Vec<String>, opts: &SplitOptions) -> Split {
    shuffle_images(&mut names, opts.seed);

    let test_len = opts.test_size.min(names.len());
    let train = names.split_off(test_len);

    Split { train, test: names }
}
