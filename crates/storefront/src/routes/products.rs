//! Product route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::instrument;

use kitchencraft_core::{Category, Difficulty, Product, ProductId};

use crate::error::{AppError, Result};
use crate::search::{SearchFilters, search};
use crate::state::AppState;

/// Create the product routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list_products))
        .route("/api/products/search", get(search_products))
        .route("/api/products/{id}", get(get_product))
}

/// Deserialize empty strings as None for optional decimal fields.
fn empty_string_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Catalog listing response.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub count: usize,
    pub products: Vec<Product>,
}

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub category: Option<Category>,
    /// Comma-separated keywords.
    pub tags: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub min_price: Option<Decimal>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub max_price: Option<Decimal>,
    pub difficulty: Option<Difficulty>,
    pub material: Option<String>,
    pub limit: Option<i64>,
}

/// Search response: ranked matches plus the pre-limit match count.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub total_found: usize,
    pub products: Vec<Product>,
}

/// Full catalog listing.
#[instrument(skip(state))]
pub async fn list_products(State(state): State<AppState>) -> Json<ProductListResponse> {
    let products = state.catalog().products().to_vec();
    Json(ProductListResponse {
        count: products.len(),
        products,
    })
}

/// Single product by id.
///
/// # Errors
///
/// Returns 404 if the id does not resolve against the catalog.
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>> {
    state
        .catalog()
        .product_by_id(ProductId::new(id))
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Filtered catalog search.
#[instrument(skip(state))]
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let price_range = match (query.min_price, query.max_price) {
        (None, None) => None,
        (min, max) => Some([min.unwrap_or(Decimal::ZERO), max.unwrap_or(Decimal::MAX)]),
    };

    let tags = query.tags.as_ref().map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect::<Vec<_>>()
    });

    let filters = SearchFilters {
        category: query.category,
        tags,
        price_range,
        difficulty: query.difficulty,
        material: query.material.clone(),
        limit: query.limit,
    };

    let result = search(state.catalog().products(), &filters);
    Json(SearchResponse {
        total_found: result.total_found,
        products: result.products,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_search_query_parses_empty_price_as_none() {
        let query: SearchQuery = serde_json::from_value(json!({
            "category": "knives",
            "min_price": "",
            "limit": 3
        }))
        .expect("valid query");

        assert_eq!(query.category, Some(Category::Knives));
        assert!(query.min_price.is_none());
        assert_eq!(query.limit, Some(3));
    }

    #[test]
    fn test_search_query_parses_price_bounds() {
        let query: SearchQuery = serde_json::from_value(json!({
            "min_price": "5.00",
            "max_price": "20.00"
        }))
        .expect("valid query");

        assert_eq!(query.min_price, Some(Decimal::new(500, 2)));
        assert_eq!(query.max_price, Some(Decimal::new(2000, 2)));
    }
}
