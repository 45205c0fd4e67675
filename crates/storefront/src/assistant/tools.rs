//! Tool definitions and executor for the shopping assistant.
//!
//! The schema is closed to exactly two operations: searching the catalog and
//! preparing a cart addition. Both are side-effect-free reads/validations
//! against the in-memory catalog; committing to the cart happens client-side
//! after the dispatch cycle returns.

use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use kitchencraft_core::{Category, Difficulty, Product, ProductId};

use crate::cart::prepare_cart_intent;
use crate::catalog::Catalog;
use crate::search::{SearchFilters, search};

use super::error::AssistantError;
use super::types::Tool;

/// Tool name for catalog search.
pub const SEARCH_PRODUCTS: &str = "search_products";
/// Tool name for cart addition.
pub const ADD_TO_CART: &str = "add_to_cart";

/// Get the list of storefront tools available to the model.
#[must_use]
pub fn storefront_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: SEARCH_PRODUCTS.to_string(),
            description: "Search for kitchen products based on criteria like category, price, difficulty, etc.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "category": {
                        "type": "string",
                        "enum": Category::ALL.map(|c| c.as_str()),
                        "description": "Product category to search in"
                    },
                    "tags": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Keywords to search for (e.g., [\"chef\", \"professional\", \"beginner\"])"
                    },
                    "priceRange": {
                        "type": "array",
                        "items": { "type": "number" },
                        "minItems": 2,
                        "maxItems": 2,
                        "description": "Price range as [min, max] (e.g., [0, 50])"
                    },
                    "difficulty": {
                        "type": "string",
                        "enum": Difficulty::ALL.map(|d| d.as_str()),
                        "description": "Difficulty level for the user"
                    },
                    "material": {
                        "type": "string",
                        "description": "Material preference (e.g., \"wood\", \"steel\", \"bamboo\")"
                    },
                    "limit": {
                        "type": "number",
                        "description": "Maximum number of products to return (default: 10)"
                    }
                },
                "required": []
            }),
        },
        Tool {
            name: ADD_TO_CART.to_string(),
            description: "Add specific products to the user's cart with quantities".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "items": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "productId": {
                                    "type": "number",
                                    "description": "The ID of the product to add"
                                },
                                "quantity": {
                                    "type": "number",
                                    "description": "Quantity to add (default: 1)",
                                    "minimum": 1
                                }
                            },
                            "required": ["productId"]
                        },
                        "description": "Array of items to add to cart"
                    }
                },
                "required": ["items"]
            }),
        },
    ]
}

/// One requested item in an `add_to_cart` invocation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartItemRequest {
    product_id: ProductId,
    /// Defaults to 1 when the model omits it.
    quantity: Option<u32>,
}

/// Arguments for the `add_to_cart` tool.
#[derive(Debug, Deserialize)]
struct AddToCartArgs {
    items: Vec<CartItemRequest>,
}

/// Executor for storefront tools.
///
/// Maps tool names to the search engine and cart intent builder, and shapes
/// their output into the JSON payloads fed back to the model.
pub struct ToolExecutor<'a> {
    catalog: &'a Catalog,
}

impl<'a> ToolExecutor<'a> {
    /// Create a new tool executor.
    #[must_use]
    pub const fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Execute a tool and return its structured result payload.
    ///
    /// Unknown tool names are skipped: the schema is closed to the two
    /// declared operations, so nothing else is dispatched and no result is
    /// produced (`Ok(None)`).
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::ToolArguments`] if the input payload does
    /// not match the declared schema. This aborts the whole dispatch cycle.
    #[instrument(skip(self, input), fields(tool_name = %name))]
    pub fn execute(
        &self,
        name: &str,
        input: &serde_json::Value,
    ) -> Result<Option<serde_json::Value>, AssistantError> {
        match name {
            SEARCH_PRODUCTS => self.search_products(input).map(Some),
            ADD_TO_CART => self.add_to_cart(input).map(Some),
            _ => {
                tracing::warn!("skipping unknown tool");
                Ok(None)
            }
        }
    }

    /// Search the catalog.
    fn search_products(
        &self,
        input: &serde_json::Value,
    ) -> Result<serde_json::Value, AssistantError> {
        let filters: SearchFilters =
            serde_json::from_value(input.clone()).map_err(|e| AssistantError::ToolArguments {
                tool: SEARCH_PRODUCTS.to_string(),
                message: e.to_string(),
            })?;

        let result = search(self.catalog.products(), &filters);

        if result.products.is_empty() {
            // A domain-level miss, not an error: the model narrates it.
            return Ok(json!({
                "success": false,
                "message": "No products found matching your criteria. Try adjusting your search.",
                "products": [],
            }));
        }

        let summaries: Vec<serde_json::Value> = result
            .products
            .iter()
            .map(|p| {
                json!({
                    "id": p.id,
                    "name": p.name,
                    "price": p.price,
                    "category": p.category,
                    "difficulty": p.difficulty,
                    "material": p.material,
                    "description": p.description,
                })
            })
            .collect();

        Ok(json!({
            "success": true,
            "message": format!("Found {} products matching your criteria.", result.products.len()),
            "products": summaries,
            "productList": format_product_list(&result.products),
        }))
    }

    /// Validate and price a cart addition.
    fn add_to_cart(&self, input: &serde_json::Value) -> Result<serde_json::Value, AssistantError> {
        let args: AddToCartArgs =
            serde_json::from_value(input.clone()).map_err(|e| AssistantError::ToolArguments {
                tool: ADD_TO_CART.to_string(),
                message: e.to_string(),
            })?;

        let product_ids: Vec<ProductId> = args.items.iter().map(|i| i.product_id).collect();
        // Quantity defaults to 1 at this boundary; the intent builder only
        // sees normalized values.
        let quantities: Vec<u32> = args
            .items
            .iter()
            .map(|i| i.quantity.unwrap_or(1).max(1))
            .collect();

        let result = prepare_cart_intent(self.catalog, &product_ids, &quantities);

        let mut payload = if result.success {
            json!({
                "success": true,
                "message": result.message,
                "products": result.products,
                "totalPrice": result.total_price,
            })
        } else {
            json!({
                "success": false,
                "message": result.message,
                "error": result.failure.map(|f| f.as_str()),
            })
        };

        // `cartData` is present only on success so downstream consumers can
        // distinguish "no action taken" from "empty cart".
        payload["cartData"] = if result.success {
            let items: Vec<serde_json::Value> = product_ids
                .iter()
                .zip(&quantities)
                .zip(&result.products)
                .map(|((product_id, quantity), product)| {
                    json!({
                        "productId": product_id,
                        "quantity": quantity,
                        "product": product,
                    })
                })
                .collect();
            json!({ "items": items })
        } else {
            serde_json::Value::Null
        };

        Ok(payload)
    }
}

/// Format products as a one-line-per-product text summary for the model.
fn format_product_list(products: &[Product]) -> String {
    let lines: Vec<String> = products
        .iter()
        .map(|p| format!("{} - ${} ({}, {})", p.name, p.price, p.difficulty, p.material))
        .collect();
    lines.join("\n")
}
