//! The cart intent builder.
//!
//! Validates a requested set of (product id, quantity) pairs against the
//! catalog and produces a priced, confirmed intent - or a structured
//! failure. This is a pure validation/resolution step: nothing is committed
//! to any cart here. Applying a confirmed intent is the client-held cart
//! state machine's job.

use rust_decimal::Decimal;

use kitchencraft_core::{Product, ProductId};

use crate::catalog::Catalog;

/// Why a cart intent could not be confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartIntentFailure {
    /// The product id and quantity sequences had different lengths.
    LengthMismatch,
    /// One or more product ids did not resolve against the catalog.
    UnresolvedProducts,
}

impl CartIntentFailure {
    /// Short machine-readable label, carried in tool result payloads.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LengthMismatch => "Array length mismatch",
            Self::UnresolvedProducts => "Products not found",
        }
    }
}

/// Outcome of validating and pricing a cart request.
#[derive(Debug, Clone)]
pub struct CartIntentResult {
    /// True when every requested product resolved.
    pub success: bool,
    /// Human-readable summary, narrated back to the shopper by the model.
    pub message: String,
    /// Resolved products in REQUEST order (positionally paired with
    /// `quantities`). Empty on failure.
    pub products: Vec<Product>,
    /// Requested quantity per product, aligned with `products`.
    pub quantities: Vec<u32>,
    /// Sum of `price * quantity` over all items. Zero on failure.
    pub total_price: Decimal,
    /// Ids that did not resolve, in request order. Empty on success.
    pub unresolved_ids: Vec<ProductId>,
    /// Failure classification. `None` on success.
    pub failure: Option<CartIntentFailure>,
}

impl CartIntentResult {
    fn failure(failure: CartIntentFailure, message: String, unresolved_ids: Vec<ProductId>) -> Self {
        Self {
            success: false,
            message,
            products: Vec::new(),
            quantities: Vec::new(),
            total_price: Decimal::ZERO,
            unresolved_ids,
            failure: Some(failure),
        }
    }
}

/// Validate `product_ids`/`quantities` against the catalog and price the
/// requested items.
///
/// Preconditions are checked in order: first the two sequences must have the
/// same length (no resolution is attempted otherwise), then every id must
/// resolve. Quantities arrive already normalized (>= 1); defaulting happens
/// at the tool-schema boundary.
#[must_use]
pub fn prepare_cart_intent(
    catalog: &Catalog,
    product_ids: &[ProductId],
    quantities: &[u32],
) -> CartIntentResult {
    if product_ids.len() != quantities.len() {
        return CartIntentResult::failure(
            CartIntentFailure::LengthMismatch,
            "Product IDs and quantities arrays must have the same length".to_string(),
            Vec::new(),
        );
    }

    let unresolved: Vec<ProductId> = product_ids
        .iter()
        .filter(|id| catalog.product_by_id(**id).is_none())
        .copied()
        .collect();
    if !unresolved.is_empty() {
        let listed: Vec<String> = unresolved.iter().map(ToString::to_string).collect();
        return CartIntentResult::failure(
            CartIntentFailure::UnresolvedProducts,
            format!("Some products not found: {}", listed.join(", ")),
            unresolved,
        );
    }

    // Resolve via the catalog-order fetch, then re-map to request order:
    // downstream consumers zip products with quantities positionally.
    let resolved = catalog.products_by_ids(product_ids);
    let products: Vec<Product> = product_ids
        .iter()
        .filter_map(|id| resolved.iter().find(|p| p.id == *id))
        .map(|p| (*p).clone())
        .collect();

    let total_price: Decimal = products
        .iter()
        .zip(quantities)
        .map(|(product, qty)| product.price * Decimal::from(*qty))
        .sum();

    let items_text: Vec<String> = products
        .iter()
        .zip(quantities)
        .map(|(product, qty)| format!("{qty}x {} (${} each)", product.name, product.price))
        .collect();

    CartIntentResult {
        success: true,
        message: format!(
            "Ready to add to cart: {}. Total: ${}",
            items_text.join(", "),
            total_price.round_dp(2)
        ),
        products,
        quantities: quantities.to_vec(),
        total_price,
        unresolved_ids: Vec::new(),
        failure: None,
    }
}
