//! Interaction records and the column-name schema for interaction tables.
//!
//! Dataset loading and parsing stay outside this crate; callers translate
//! their source table into a `Vec<Interaction>` using whatever reader they
//! like. [`ColumnSchema`] names the four columns that translation reads
//! from, so column names are configuration rather than fixed strings.

use serde::{Deserialize, Serialize};

/// A single user-item interaction event.
///
/// `weight` defaults to 1.0 (pure co-visitation); `timestamp` is optional
/// and only consumed when time decay is enabled on the engine.
///
/// # Examples
///
/// ```
/// use sugerir::data::Interaction;
///
/// let event = Interaction::new("alice", "matrix")
///     .with_weight(4.0)
///     .with_timestamp(1_700_000_000.0);
/// assert_eq!(event.weight, 4.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Raw user identifier.
    pub user: String,
    /// Raw item identifier.
    pub item: String,
    /// Event weight (e.g. a rating or an event-type weight).
    pub weight: f32,
    /// Event time, in the caller's time unit (commonly epoch seconds).
    pub timestamp: Option<f64>,
}

impl Interaction {
    /// Creates an interaction with weight 1.0 and no timestamp.
    #[must_use]
    pub fn new(user: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            item: item.into(),
            weight: 1.0,
            timestamp: None,
        }
    }

    /// Sets the event weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the event timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Column names an external loader reads interactions from.
///
/// # Examples
///
/// ```
/// use sugerir::data::ColumnSchema;
///
/// let schema = ColumnSchema::new()
///     .with_user_col("visitor")
///     .with_rating_col("clicks");
/// assert_eq!(schema.user_col(), "visitor");
/// assert_eq!(schema.item_col(), "item_id");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    user_col: String,
    item_col: String,
    rating_col: String,
    timestamp_col: String,
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnSchema {
    /// Creates a schema with the conventional column names
    /// (`user_id`, `item_id`, `rating`, `timestamp`).
    #[must_use]
    pub fn new() -> Self {
        Self {
            user_col: "user_id".to_string(),
            item_col: "item_id".to_string(),
            rating_col: "rating".to_string(),
            timestamp_col: "timestamp".to_string(),
        }
    }

    /// Sets the user-id column name.
    #[must_use]
    pub fn with_user_col(mut self, name: impl Into<String>) -> Self {
        self.user_col = name.into();
        self
    }

    /// Sets the item-id column name.
    #[must_use]
    pub fn with_item_col(mut self, name: impl Into<String>) -> Self {
        self.item_col = name.into();
        self
    }

    /// Sets the rating/weight column name.
    #[must_use]
    pub fn with_rating_col(mut self, name: impl Into<String>) -> Self {
        self.rating_col = name.into();
        self
    }

    /// Sets the timestamp column name.
    #[must_use]
    pub fn with_timestamp_col(mut self, name: impl Into<String>) -> Self {
        self.timestamp_col = name.into();
        self
    }

    /// Returns the user-id column name.
    #[must_use]
    pub fn user_col(&self) -> &str {
        &self.user_col
    }

    /// Returns the item-id column name.
    #[must_use]
    pub fn item_col(&self) -> &str {
        &self.item_col
    }

    /// Returns the rating/weight column name.
    #[must_use]
    pub fn rating_col(&self) -> &str {
        &self.rating_col
    }

    /// Returns the timestamp column name.
    #[must_use]
    pub fn timestamp_col(&self) -> &str {
        &self.timestamp_col
    }
}
