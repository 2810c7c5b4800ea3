//! Similarity transforms over the item co-occurrence matrix.
//!
//! Rescales raw co-occurrence counts into item-item similarity under a
//! selectable metric. Zero denominators are numerically degenerate, not
//! errors: they resolve to zero similarity.

use crate::error::{Result, SugerirError};
use crate::primitives::CsrMatrix;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Metric used to rescale co-occurrence counts into similarity.
///
/// # Examples
///
/// ```
/// use sugerir::similarity::SimilarityMetric;
///
/// let metric: SimilarityMetric = "lift".parse().expect("known metric");
/// assert_eq!(metric, SimilarityMetric::Lift);
/// assert!("cosine".parse::<SimilarityMetric>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMetric {
    /// Jaccard index: co-occurrence over union of occurrences.
    #[default]
    Jaccard,
    /// Lift: co-occurrence normalized by both occurrence counts.
    Lift,
    /// Raw co-occurrence counts (favors popular items).
    Counts,
}

impl fmt::Display for SimilarityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimilarityMetric::Jaccard => write!(f, "jaccard"),
            SimilarityMetric::Lift => write!(f, "lift"),
            SimilarityMetric::Counts => write!(f, "counts"),
        }
    }
}

impl FromStr for SimilarityMetric {
    type Err = SugerirError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "jaccard" => Ok(SimilarityMetric::Jaccard),
            "lift" => Ok(SimilarityMetric::Lift),
            "counts" => Ok(SimilarityMetric::Counts),
            other => Err(SugerirError::InvalidMetric {
                metric: other.to_string(),
            }),
        }
    }
}

/// Rescales a co-occurrence matrix into a similarity matrix.
///
/// For each stored pair (i, j) with count c and diagonal counts ci, cj:
///
/// - `counts`:  `S[i,j] = c`
/// - `jaccard`: `S[i,j] = c / (ci + cj - c)`, 0 when the denominator is 0
/// - `lift`:    `S[i,j] = c / (ci * cj)`, 0 when either diagonal is 0
///
/// The sparsity pattern, symmetry, and nonnegativity of the input are
/// preserved. Under `jaccard` the diagonal is 1 wherever `C[i,i] > 0`.
#[must_use]
pub fn similarity_from_cooccurrence(
    cooccurrence: &CsrMatrix,
    metric: SimilarityMetric,
) -> CsrMatrix {
    match metric {
        SimilarityMetric::Counts => cooccurrence.clone(),
        SimilarityMetric::Jaccard => {
            let diag = cooccurrence.diagonal();
            cooccurrence.map_values(|i, j, c| {
                let denom = diag[i] + diag[j] - c;
                if denom == 0.0 {
                    0.0
                } else {
                    c / denom
                }
            })
        }
        SimilarityMetric::Lift => {
            let diag = cooccurrence.diagonal();
            cooccurrence.map_values(|i, j, c| {
                let denom = diag[i] * diag[j];
                if denom == 0.0 {
                    0.0
                } else {
                    c / denom
                }
            })
        }
    }
}
