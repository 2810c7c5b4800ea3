//! Recommendation engines.
//!
//! # Algorithms
//!
//! - **SAR**: item co-occurrence similarity combined with time-decayed
//!   user-item affinity, scored as `Affinity × Similarity`.
//!
//! # Quick Start
//!
//! ```
//! use sugerir::data::Interaction;
//! use sugerir::recommend::Sar;
//!
//! let events = vec![
//!     Interaction::new("alice", "matrix"),
//!     Interaction::new("alice", "inception"),
//!     Interaction::new("bob", "inception"),
//!     Interaction::new("bob", "memento"),
//! ];
//!
//! let mut model = Sar::new().with_remove_seen(true);
//! model.fit(&events).expect("fit succeeds");
//!
//! // "memento" co-occurs with "inception", which alice liked.
//! let recs = model.recommend_k_items(&["alice"], 1).expect("model is fitted");
//! assert_eq!(recs[0].item_id, "memento");
//! ```

mod sar;

pub use sar::{Recommendation, Sar};
