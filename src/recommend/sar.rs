//! SAR: smart adaptive recommendations from implicit interaction logs.
//!
//! The model is fitted in one batch pass: raw identifiers are mapped to
//! dense indices, per-user item sets produce an item-item co-occurrence
//! matrix which a similarity metric rescales, and events accumulate into a
//! time-decayed user-item affinity matrix. Scoring multiplies a user's
//! sparse affinity row by the similarity matrix, optionally masks
//! previously-seen items, and extracts the top-K per user.

use crate::affinity::AffinityBuilder;
use crate::cooccurrence::{cooccurrence, incidence};
use crate::data::Interaction;
use crate::error::{Result, SugerirError};
use crate::primitives::CsrMatrix;
use crate::similarity::{similarity_from_cooccurrence, SimilarityMetric};
use crate::vocab::Vocabulary;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One surfaced top-K recommendation row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Raw user identifier.
    pub user_id: String,
    /// Raw item identifier.
    pub item_id: String,
    /// Ranking score (not on the scale of the input ratings).
    pub score: f32,
}

/// Matrices and vocabularies produced by one fit, immutable afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FittedSar {
    users: Vocabulary,
    items: Vocabulary,
    /// Binary user-item incidence; the remove-seen mask.
    seen: CsrMatrix,
    cooccurrence: CsrMatrix,
    similarity: CsrMatrix,
    affinity: CsrMatrix,
}

/// SAR recommendation engine.
///
/// Configuration uses the builder pattern; `fit` transitions the engine
/// from unfit to fitted and wholesale-replaces any previous matrices.
/// Scoring calls are read-only, so a fitted model can be shared across
/// threads freely.
///
/// # Examples
///
/// ```
/// use sugerir::data::Interaction;
/// use sugerir::recommend::Sar;
/// use sugerir::similarity::SimilarityMetric;
///
/// let events = vec![
///     Interaction::new("A", "X"),
///     Interaction::new("A", "Y"),
///     Interaction::new("B", "Y"),
///     Interaction::new("B", "Z"),
///     Interaction::new("C", "X"),
///     Interaction::new("C", "Z"),
/// ];
///
/// let mut model = Sar::new()
///     .with_similarity_type(SimilarityMetric::Jaccard)
///     .with_remove_seen(true);
/// model.fit(&events).expect("fit succeeds");
///
/// let recs = model.recommend_k_items(&["A"], 2).expect("model is fitted");
/// // A has seen X and Y, so only Z remains as a candidate.
/// assert_eq!(recs.len(), 1);
/// assert_eq!(recs[0].item_id, "Z");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sar {
    similarity_type: SimilarityMetric,
    affinity: AffinityBuilder,
    remove_seen: bool,
    state: Option<FittedSar>,
}

impl Default for Sar {
    fn default() -> Self {
        Self::new()
    }
}

impl Sar {
    /// Creates an unfitted engine with jaccard similarity, no time decay,
    /// event weights honored, and remove-seen disabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            similarity_type: SimilarityMetric::default(),
            affinity: AffinityBuilder::new(),
            remove_seen: false,
            state: None,
        }
    }

    /// Sets the similarity metric used to rescale co-occurrence counts.
    #[must_use]
    pub fn with_similarity_type(mut self, metric: SimilarityMetric) -> Self {
        self.similarity_type = metric;
        self
    }

    /// Enables time decay on affinity with the given half-life
    /// (same unit as event timestamps).
    #[must_use]
    pub fn with_time_decay(mut self, half_life: f64) -> Self {
        self.affinity = self.affinity.with_time_decay(half_life);
        self
    }

    /// Sets the decay reference time t0 (defaults to the maximum observed
    /// timestamp). Events after t0 are not clamped; their decay factor
    /// exceeds 1.
    #[must_use]
    pub fn with_reference_time(mut self, reference_time: f64) -> Self {
        self.affinity = self.affinity.with_reference_time(reference_time);
        self
    }

    /// Sets whether per-event weights are honored (defaults to true).
    #[must_use]
    pub fn with_event_weights(mut self, use_event_weights: bool) -> Self {
        self.affinity = self.affinity.with_event_weights(use_event_weights);
        self
    }

    /// Sets whether previously-seen items are excluded from output.
    #[must_use]
    pub fn with_remove_seen(mut self, remove_seen: bool) -> Self {
        self.remove_seen = remove_seen;
        self
    }

    /// Whether the engine has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    /// Fits the engine to a batch of training interactions.
    ///
    /// Builds the user/item vocabularies (first-seen index order), the
    /// co-occurrence and similarity matrices, and the affinity matrix.
    /// Any previously fitted state is replaced wholesale.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if `interactions` is empty or the
    /// affinity configuration is invalid (non-positive half-life, missing
    /// timestamps with decay enabled).
    pub fn fit(&mut self, interactions: &[Interaction]) -> Result<()> {
        if interactions.is_empty() {
            return Err(SugerirError::ConfigurationError {
                param: "interactions".to_string(),
                value: "0 rows".to_string(),
                constraint: "at least one training interaction".to_string(),
            });
        }

        let users = Vocabulary::from_ids(interactions.iter().map(|e| e.user.as_str()));
        let items = Vocabulary::from_ids(interactions.iter().map(|e| e.item.as_str()));

        let seen = incidence(interactions, &users, &items);
        let cooccurrence = cooccurrence(&seen);
        let similarity = similarity_from_cooccurrence(&cooccurrence, self.similarity_type);
        let affinity = self.affinity.build(interactions, &users, &items)?;

        self.state = Some(FittedSar {
            users,
            items,
            seen,
            cooccurrence,
            similarity,
            affinity,
        });
        Ok(())
    }

    /// Recommends the top-`k` items for each given user.
    ///
    /// Users absent from the training vocabulary are skipped (never
    /// scored, never fabricated); use [`Sar::score`] when an unknown user
    /// should surface as an error. Output rows per user are sorted by
    /// descending score, ties broken by ascending item index. A user gets
    /// fewer than `k` rows only when fewer than `k` candidates exist.
    ///
    /// # Errors
    ///
    /// Returns `EmptyModel` if the engine is not fitted and
    /// `ConfigurationError` if `k` is zero.
    pub fn recommend_k_items<S: AsRef<str> + Sync>(
        &self,
        users: &[S],
        k: usize,
    ) -> Result<Vec<Recommendation>> {
        let state = self.fitted("recommend_k_items")?;
        if k == 0 {
            return Err(SugerirError::ConfigurationError {
                param: "k".to_string(),
                value: "0".to_string(),
                constraint: "a positive number of items per user".to_string(),
            });
        }

        #[cfg(feature = "parallel")]
        let per_user: Vec<Vec<Recommendation>> = users
            .par_iter()
            .map(|user| self.user_top_k(state, user.as_ref(), k))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let per_user: Vec<Vec<Recommendation>> = users
            .iter()
            .map(|user| self.user_top_k(state, user.as_ref(), k))
            .collect();

        Ok(per_user.into_iter().flatten().collect())
    }

    /// Computes the full score row for one user (no seen-item masking).
    ///
    /// # Errors
    ///
    /// Returns `EmptyModel` if the engine is not fitted and
    /// `UnknownIdentifier` if the user was not seen in training.
    pub fn score(&self, user: &str) -> Result<Vec<f32>> {
        let state = self.fitted("score")?;
        let u = state
            .users
            .index(user)
            .ok_or_else(|| SugerirError::UnknownIdentifier {
                kind: "user".to_string(),
                id: user.to_string(),
            })?;
        Ok(Self::score_row(state, u))
    }

    /// Items ranked by popularity (distinct-user occurrence count), the
    /// usual cold-start fallback. Ties break by ascending item index.
    ///
    /// # Errors
    ///
    /// Returns `EmptyModel` if the engine is not fitted.
    pub fn popularity(&self) -> Result<Vec<(String, f32)>> {
        let state = self.fitted("popularity")?;
        let counts = state.cooccurrence.diagonal();
        let ranked = top_k(&counts, counts.len());
        Ok(ranked
            .into_iter()
            .map(|(i, count)| {
                let id = state.items.id(i).expect("diagonal index is in vocabulary");
                (id.to_string(), count)
            })
            .collect())
    }

    /// Returns the fitted item-item co-occurrence matrix.
    ///
    /// # Errors
    ///
    /// Returns `EmptyModel` if the engine is not fitted.
    pub fn item_cooccurrence(&self) -> Result<&CsrMatrix> {
        Ok(&self.fitted("item_cooccurrence")?.cooccurrence)
    }

    /// Returns the fitted item-item similarity matrix.
    ///
    /// # Errors
    ///
    /// Returns `EmptyModel` if the engine is not fitted.
    pub fn item_similarity(&self) -> Result<&CsrMatrix> {
        Ok(&self.fitted("item_similarity")?.similarity)
    }

    /// Returns the fitted user-item affinity matrix.
    ///
    /// # Errors
    ///
    /// Returns `EmptyModel` if the engine is not fitted.
    pub fn user_affinity(&self) -> Result<&CsrMatrix> {
        Ok(&self.fitted("user_affinity")?.affinity)
    }

    /// Returns the fitted user vocabulary.
    ///
    /// # Errors
    ///
    /// Returns `EmptyModel` if the engine is not fitted.
    pub fn user_vocab(&self) -> Result<&Vocabulary> {
        Ok(&self.fitted("user_vocab")?.users)
    }

    /// Returns the fitted item vocabulary.
    ///
    /// # Errors
    ///
    /// Returns `EmptyModel` if the engine is not fitted.
    pub fn item_vocab(&self) -> Result<&Vocabulary> {
        Ok(&self.fitted("item_vocab")?.items)
    }

    fn fitted(&self, operation: &str) -> Result<&FittedSar> {
        self.state.as_ref().ok_or_else(|| SugerirError::EmptyModel {
            operation: operation.to_string(),
        })
    }

    /// Dense score row for one user index: affinity row times similarity.
    ///
    /// Only the stored entries of the affinity row and the touched
    /// similarity rows are visited, so the affinity matrix is never
    /// densified.
    fn score_row(state: &FittedSar, u: usize) -> Vec<f32> {
        let mut scores = vec![0.0f32; state.items.len()];
        let (item_indices, affinities) = state.affinity.row(u);
        for (&i, &a) in item_indices.iter().zip(affinities.iter()) {
            let (sim_indices, sims) = state.similarity.row(i);
            for (&j, &s) in sim_indices.iter().zip(sims.iter()) {
                scores[j] += a * s;
            }
        }
        scores
    }

    /// Top-K rows for one raw user id; empty when the user is unknown.
    fn user_top_k(&self, state: &FittedSar, user: &str, k: usize) -> Vec<Recommendation> {
        let Some(u) = state.users.index(user) else {
            return Vec::new();
        };

        let mut scores = Self::score_row(state, u);
        if self.remove_seen {
            let (seen_items, _) = state.seen.row(u);
            for &i in seen_items {
                scores[i] = f32::NEG_INFINITY;
            }
        }

        top_k(&scores, k)
            .into_iter()
            .map(|(i, score)| Recommendation {
                user_id: user.to_string(),
                item_id: state
                    .items
                    .id(i)
                    .expect("score index is in vocabulary")
                    .to_string(),
                score,
            })
            .collect()
    }
}

/// Selects the `k` highest entries of a score row as (index, score),
/// sorted by descending score with ties broken by ascending index.
/// Masked entries (negative infinity) are excluded entirely.
fn top_k(scores: &[f32], k: usize) -> Vec<(usize, f32)> {
    let mut candidates: Vec<(usize, f32)> = scores
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, s)| s != f32::NEG_INFINITY)
        .collect();
    candidates.sort_unstable_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    candidates.truncate(k);
    candidates
}
