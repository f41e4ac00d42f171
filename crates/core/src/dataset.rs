use serde::{Deserialize, Serialize};

use crate::error::{LloydError, Result};
use crate::vector::Vector;

/// An in-memory table of labelled vectors.
///
/// `columns` holds the header of the tabular source: the identifier column
/// name followed by one name per coordinate. Identifiers are carried through
/// unchanged and never inspected by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    ids: Vec<String>,
    vectors: Vec<Vector>,
}

impl Dataset {
    /// Build a dataset, checking that every row has an id and that all
    /// vectors share one dimension `d >= 1`.
    pub fn new(columns: Vec<String>, ids: Vec<String>, vectors: Vec<Vector>) -> Result<Self> {
        if ids.len() != vectors.len() {
            return Err(LloydError::InvalidConfig(format!(
                "{} identifiers for {} vectors",
                ids.len(),
                vectors.len()
            )));
        }

        if let Some(first) = vectors.first() {
            let dim = first.len();
            if dim == 0 {
                return Err(LloydError::InvalidDimension {
                    index: 0,
                    expected: 1,
                    found: 0,
                });
            }
            if let Some((index, v)) = vectors.iter().enumerate().find(|(_, v)| v.len() != dim) {
                return Err(LloydError::InvalidDimension {
                    index,
                    expected: dim,
                    found: v.len(),
                });
            }
        }

        Ok(Self {
            columns,
            ids,
            vectors,
        })
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Dimension shared by every vector (0 for an empty dataset).
    pub fn dim(&self) -> usize {
        self.vectors.first().map(|v| v.len()).unwrap_or(0)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn vectors(&self) -> &[Vector] {
        &self.vectors
    }

    /// Iterate `(id, vector)` pairs in row order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.ids
            .iter()
            .zip(self.vectors.iter())
            .map(|(id, v)| (id.as_str(), v.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols() -> Vec<String> {
        vec!["ID".into(), "x".into(), "y".into()]
    }

    #[test]
    fn builds_valid_dataset() {
        let ds = Dataset::new(
            cols(),
            vec!["a".into(), "b".into()],
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
        )
        .unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.dim(), 2);
        assert!(!ds.is_empty());
        let rows: Vec<_> = ds.rows().collect();
        assert_eq!(rows[1], ("b", &[3.0, 4.0][..]));
    }

    #[test]
    fn empty_dataset_has_zero_dim() {
        let ds = Dataset::new(cols(), vec![], vec![]).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.dim(), 0);
    }

    #[test]
    fn rejects_id_count_mismatch() {
        let err = Dataset::new(cols(), vec!["a".into()], vec![vec![1.0], vec![2.0]]).unwrap_err();
        assert!(matches!(err, LloydError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_mixed_dimensions() {
        let err = Dataset::new(
            cols(),
            vec!["a".into(), "b".into()],
            vec![vec![1.0, 2.0], vec![3.0]],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LloydError::InvalidDimension { index: 1, expected: 2, found: 1 }
        ));
    }
}
