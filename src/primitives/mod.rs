//! Core sparse-matrix primitives (`CooMatrix`, `CsrMatrix`).
//!
//! These types are the foundation for the co-occurrence, similarity, and
//! affinity stages, which all operate on sparse user/item structures.

mod sparse;

pub use sparse::{CooMatrix, CsrMatrix};
