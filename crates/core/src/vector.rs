use crate::error::{LloydError, Result};

/// A fixed-length point in feature space. Data points and centroids share
/// this representation.
pub type Vector = Vec<f64>;

/// Squared Euclidean distance.
///
/// Callers must pass slices of equal length; the engine guarantees this by
/// validating its input once before the first iteration. Use
/// [`try_squared_distance`] when the lengths are not known to match.
#[inline]
pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "squared_distance: length mismatch");
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Squared Euclidean distance with a length check. On mismatch, `b` is
/// reported as the offending vector (index 1).
pub fn try_squared_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(LloydError::InvalidDimension {
            index: 1,
            expected: a.len(),
            found: b.len(),
        });
    }
    Ok(squared_distance(a, b))
}

/// Check the engine's preconditions: non-empty data, a shared dimension
/// `d >= 1`, and `1 <= k <= n`. Returns `d`.
pub fn validate_input(data: &[Vector], k: usize) -> Result<usize> {
    let first = data.first().ok_or(LloydError::EmptyDataset)?;
    let dim = first.len();
    if dim == 0 {
        return Err(LloydError::InvalidDimension {
            index: 0,
            expected: 1,
            found: 0,
        });
    }

    if let Some((index, v)) = data.iter().enumerate().find(|(_, v)| v.len() != dim) {
        return Err(LloydError::InvalidDimension {
            index,
            expected: dim,
            found: v.len(),
        });
    }

    if k == 0 || k > data.len() {
        return Err(LloydError::InvalidK { k, n: data.len() });
    }

    Ok(dim)
}
