//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use sugerir::prelude::*;
//! ```

pub use crate::affinity::AffinityBuilder;
pub use crate::data::{ColumnSchema, Interaction};
pub use crate::primitives::{CooMatrix, CsrMatrix};
pub use crate::recommend::{Recommendation, Sar};
pub use crate::similarity::SimilarityMetric;
pub use crate::vocab::Vocabulary;
