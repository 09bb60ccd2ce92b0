// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Shuffles samples with a seeded RNG and splits them into:
//   - Training set: the only data the vectorizer and model see
//   - Test set:     held out for evaluation
//
// The shuffle is seeded so the same data and seed always give the
// same split, and therefore the same fitted model and accuracy.
//
// The test set gets ceil(n * test_fraction) samples; the rest train.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom.
//
// Reference: rand crate documentation

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `samples` with `seed` and split into (train, test).
///
/// # Arguments
/// * `samples`       - All available samples (consumed)
/// * `test_fraction` - Proportion held out for testing, clamped to [0, 1]
/// * `seed`          - Shuffle seed
pub fn train_test_split<T>(
    mut samples:   Vec<T>,
    test_fraction: f64,
    seed:          u64,
) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let total    = samples.len();
    let fraction = test_fraction.clamp(0.0, 1.0);
    let n_test   = ((total as f64) * fraction).ceil() as usize;
    let split_at = total - n_test.min(total);

    // split_off(n) leaves [0..n) in `samples` and returns [n..total)
    let test = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} test (seed {})",
        samples.len(),
        test.len(),
        seed,
    );

    (samples, test)
}
