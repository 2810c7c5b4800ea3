//! User-item affinity: event-weighted, optionally time-decayed interaction
//! strength, accumulated per (user, item) pair into a sparse matrix.
//!
//! Each event contributes `w · 2^(−(t0 − t)/T)` when decay is enabled
//! (plain `w` otherwise), where T is the half-life and t0 the reference
//! time. An event exactly T before t0 contributes half the weight of an
//! event at t0. Contributions are summed per pair via triplet accumulation
//! and coalescing, so memory stays proportional to the number of distinct
//! (user, item) pairs observed.

use crate::data::Interaction;
use crate::error::{Result, SugerirError};
use crate::primitives::{CooMatrix, CsrMatrix};
use crate::vocab::Vocabulary;
use serde::{Deserialize, Serialize};

/// Configuration and builder for the affinity matrix.
///
/// # Examples
///
/// ```
/// use sugerir::affinity::AffinityBuilder;
/// use sugerir::data::Interaction;
/// use sugerir::vocab::Vocabulary;
///
/// let events = vec![
///     Interaction::new("u", "x").with_timestamp(0.0),
///     Interaction::new("u", "x").with_timestamp(10.0),
/// ];
/// let users = Vocabulary::from_ids(["u"]);
/// let items = Vocabulary::from_ids(["x"]);
///
/// // Half-life of 10 time units; reference defaults to t = 10.
/// let a = AffinityBuilder::new()
///     .with_time_decay(10.0)
///     .build(&events, &users, &items)
///     .expect("valid configuration");
///
/// // Event at t=10 contributes 1.0, event at t=0 contributes 0.5.
/// assert!((a.get(0, 0) - 1.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffinityBuilder {
    /// Whether to apply exponential time decay.
    use_time_decay: bool,
    /// Half-life T, in the same unit as event timestamps.
    half_life: f64,
    /// Reference time t0; defaults to the maximum observed timestamp.
    reference_time: Option<f64>,
    /// Whether to honor per-event weights (1.0 for every event when false).
    use_event_weights: bool,
}

impl Default for AffinityBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AffinityBuilder {
    /// Creates a builder with decay disabled and event weights honored.
    #[must_use]
    pub fn new() -> Self {
        Self {
            use_time_decay: false,
            half_life: 0.0,
            reference_time: None,
            use_event_weights: true,
        }
    }

    /// Enables time decay with the given half-life (same unit as timestamps).
    #[must_use]
    pub fn with_time_decay(mut self, half_life: f64) -> Self {
        self.use_time_decay = true;
        self.half_life = half_life;
        self
    }

    /// Sets the reference time t0 explicitly.
    ///
    /// Without this, t0 defaults to the maximum observed timestamp. Events
    /// with a timestamp after t0 are not clamped: their decay factor
    /// exceeds 1, so they contribute more than their raw weight.
    #[must_use]
    pub fn with_reference_time(mut self, reference_time: f64) -> Self {
        self.reference_time = Some(reference_time);
        self
    }

    /// Sets whether per-event weights are honored (defaults to true).
    /// When false every event contributes with weight 1.0.
    #[must_use]
    pub fn with_event_weights(mut self, use_event_weights: bool) -> Self {
        self.use_event_weights = use_event_weights;
        self
    }

    /// Whether time decay is enabled.
    #[must_use]
    pub fn uses_time_decay(&self) -> bool {
        self.use_time_decay
    }

    /// Builds the user-item affinity matrix.
    ///
    /// Events whose user or item is absent from the vocabularies are
    /// dropped. Event order does not affect the result beyond float
    /// summation order, which is fixed by the coalescing sort.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if decay is enabled with a non-positive
    /// or non-finite half-life, or if decay is enabled and any in-vocabulary
    /// event lacks a timestamp.
    pub fn build(
        &self,
        interactions: &[Interaction],
        users: &Vocabulary,
        items: &Vocabulary,
    ) -> Result<CsrMatrix> {
        if self.use_time_decay && !(self.half_life > 0.0 && self.half_life.is_finite()) {
            return Err(SugerirError::ConfigurationError {
                param: "half_life".to_string(),
                value: self.half_life.to_string(),
                constraint: "a positive finite number when time decay is enabled".to_string(),
            });
        }

        let reference_time = if self.use_time_decay {
            Some(self.resolve_reference_time(interactions)?)
        } else {
            None
        };

        let mut coo = CooMatrix::with_capacity(users.len(), items.len(), interactions.len());
        for event in interactions {
            let (Some(u), Some(i)) = (users.index(&event.user), items.index(&event.item)) else {
                continue;
            };
            let weight = if self.use_event_weights {
                f64::from(event.weight)
            } else {
                1.0
            };
            let contribution = match reference_time {
                Some(t0) => {
                    let t = event.timestamp.ok_or_else(|| SugerirError::ConfigurationError {
                        param: "timestamp".to_string(),
                        value: "none".to_string(),
                        constraint: "present on every event when time decay is enabled"
                            .to_string(),
                    })?;
                    weight * 2f64.powf(-(t0 - t) / self.half_life)
                }
                None => weight,
            };
            coo.push(u, i, contribution as f32);
        }

        Ok(coo.to_csr())
    }

    /// Resolves t0: the explicit reference time, else the max observed timestamp.
    fn resolve_reference_time(&self, interactions: &[Interaction]) -> Result<f64> {
        if let Some(t0) = self.reference_time {
            return Ok(t0);
        }
        interactions
            .iter()
            .filter_map(|e| e.timestamp)
            .fold(None, |max: Option<f64>, t| {
                Some(max.map_or(t, |m| m.max(t)))
            })
            .ok_or_else(|| SugerirError::ConfigurationError {
                param: "time_now".to_string(),
                value: "none".to_string(),
                constraint: "an explicit reference time or at least one timestamped event"
                    .to_string(),
            })
    }
}
