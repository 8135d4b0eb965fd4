//! Product reviews.
//!
//! Listing-only data for the reviews view. Ratings are clamped to the 1–5
//! star scale at construction.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// A single product review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Review identifier.
    pub id: u64,

    /// Reviewed product title.
    pub product: String,

    /// Reviewer display name.
    pub reviewer: String,

    /// Star rating, 1–5.
    pub rating: u8,

    /// Review body.
    pub comment: String,

    /// Calendar date the review was left.
    pub date: Date,
}

impl Review {
    /// Build a review, clamping the rating onto the 1–5 scale.
    pub fn new(
        id: u64,
        product: &str,
        reviewer: &str,
        rating: u8,
        comment: &str,
        date: Date,
    ) -> Self {
        Self {
            id,
            product: product.to_owned(),
            reviewer: reviewer.to_owned(),
            rating: rating.clamp(1, 5),
            comment: comment.to_owned(),
            date,
        }
    }
}
