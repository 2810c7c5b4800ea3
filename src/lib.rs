//! Sugerir: single-node batch recommendation engine in pure Rust.
//!
//! Sugerir turns a log of user-item interaction events into ranked
//! top-K recommendations per user. The pipeline builds an item-item
//! co-occurrence matrix from per-user item sets, rescales it into a
//! similarity matrix (jaccard, lift, or raw counts), accumulates an
//! optionally time-decayed user-item affinity matrix, and scores
//! candidates as `Affinity × Similarity` — all on sparse representations.
//!
//! # Quick Start
//!
//! ```
//! use sugerir::prelude::*;
//!
//! let events = vec![
//!     Interaction::new("A", "X"),
//!     Interaction::new("A", "Y"),
//!     Interaction::new("B", "Y"),
//!     Interaction::new("B", "Z"),
//!     Interaction::new("C", "X"),
//!     Interaction::new("C", "Z"),
//! ];
//!
//! let mut model = Sar::new()
//!     .with_similarity_type(SimilarityMetric::Jaccard)
//!     .with_remove_seen(true);
//! model.fit(&events).expect("fit succeeds");
//!
//! let recs = model.recommend_k_items(&["A"], 2).expect("model is fitted");
//! assert_eq!(recs.len(), 1); // A already saw X and Y, leaving only Z
//! assert_eq!(recs[0].item_id, "Z");
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Sparse COO/CSR matrix types
//! - [`data`]: Interaction records and the column-name schema
//! - [`vocab`]: Raw-identifier to dense-index vocabularies
//! - [`cooccurrence`]: Item-item co-occurrence via sparse self-multiplication
//! - [`similarity`]: Co-occurrence to similarity rescaling metrics
//! - [`affinity`]: Event-weighted, time-decayed user-item affinity
//! - [`recommend`]: The SAR engine and its top-K scorer
//!
//! # Parallelism
//!
//! The co-occurrence build and per-user top-K extraction shard across
//! threads when the `parallel` feature is enabled; results are identical
//! to the serial path. Fitted models are immutable, so concurrent
//! scoring needs no locking.

pub mod affinity;
pub mod cooccurrence;
pub mod data;
pub mod error;
pub mod prelude;
pub mod primitives;
pub mod recommend;
pub mod similarity;
pub mod vocab;

pub use error::{Result, SugerirError};
pub use primitives::{CooMatrix, CsrMatrix};
