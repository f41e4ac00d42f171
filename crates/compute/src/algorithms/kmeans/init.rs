use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use lloyd_core::Vector;

/// Random source for a run. Seeded runs are reproducible; unseeded runs
/// draw from OS entropy.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Pick `k` data points uniformly at random as the initial centroids.
///
/// With `distinct = false` indices are drawn with replacement, so duplicate
/// centroids are possible. With `distinct = true` the `k` indices are
/// pairwise different (the vectors they point at may still coincide).
///
/// Callers must ensure `1 <= k <= data.len()`.
pub fn initialize_centroids<R: Rng + ?Sized>(
    data: &[Vector],
    k: usize,
    distinct: bool,
    rng: &mut R,
) -> Vec<Vector> {
    let n = data.len();
    if distinct {
        index::sample(rng, n, k)
            .into_iter()
            .map(|i| data[i].clone())
            .collect()
    } else {
        (0..k).map(|_| data[rng.gen_range(0..n)].clone()).collect()
    }
}
