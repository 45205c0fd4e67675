//! The catalog product model.
//!
//! Products are authored once in the catalog data file and never mutated at
//! runtime. Prices use decimal arithmetic; ids are type-safe newtypes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, stable id assigned at catalog authoring time.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Price in the store's currency unit. Invariant: positive.
    pub price: Decimal,
    /// Long-form description.
    pub description: String,
    /// Image reference (path or URL, resolved by the UI layer).
    pub image: String,
    /// Product category.
    pub category: Category,
    /// Free-text keywords used by search.
    pub tags: Vec<String>,
    /// Recommended experience level.
    pub difficulty: Difficulty,
    /// Primary material (free text, e.g. "Stainless Steel").
    pub material: String,
    /// Size description (free text, e.g. "8 inch").
    pub size: String,
}

/// Product category. The set is closed: the assistant's tool schema
/// advertises exactly these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Knives,
    Spoons,
    Forks,
    CuttingBoards,
    Tools,
}

impl Category {
    /// All categories, in catalog display order.
    pub const ALL: [Self; 5] = [
        Self::Knives,
        Self::Spoons,
        Self::Forks,
        Self::CuttingBoards,
        Self::Tools,
    ];

    /// The wire name of this category (matches the serde representation).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Knives => "knives",
            Self::Spoons => "spoons",
            Self::Forks => "forks",
            Self::CuttingBoards => "cutting-boards",
            Self::Tools => "tools",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommended experience level for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Professional,
}

impl Difficulty {
    /// All difficulty levels, easiest first.
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Professional];

    /// The wire name of this difficulty (matches the serde representation).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Professional => "professional",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
