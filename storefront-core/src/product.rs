//! Catalog product types.
//!
//! Products are immutable values sourced from the remote catalog; their
//! identity is the numeric `id`. Field names mirror the catalog API's JSON
//! payloads one to one, so no rename attributes are needed.

use serde::{Deserialize, Serialize};

/// A product from the remote catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog-assigned identifier; products are equal by value, identified by id.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Unit price, in the catalog's currency.
    pub price: f64,
    /// Long-form description.
    pub description: String,
    /// Category name, as the catalog spells it.
    pub category: String,
    /// Image URL.
    pub image: String,
    /// Aggregate customer rating.
    pub rating: Rating,
}

/// Aggregate rating attached to a [`Product`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Mean rating value.
    pub rate: f64,
    /// Number of ratings the mean is drawn from.
    pub count: u64,
}
