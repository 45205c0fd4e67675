//! The product search and ranking engine.
//!
//! A pure, linear-scan engine over the in-memory catalog: filters are
//! conjunctive across all present fields, ranking biases beginner-friendly
//! products first and then sorts by price ascending. Ties keep catalog
//! order (the sort must be stable for reproducible results).

use rust_decimal::Decimal;
use serde::Deserialize;

use kitchencraft_core::{Category, Difficulty, Product};

/// Search criteria. Absent fields impose no filter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    /// Exact category match.
    pub category: Option<Category>,
    /// Keywords, OR-matched case-insensitively against product tags, name,
    /// and description.
    pub tags: Option<Vec<String>>,
    /// Inclusive `[min, max]` price range.
    pub price_range: Option<[Decimal; 2]>,
    /// Exact difficulty match.
    pub difficulty: Option<Difficulty>,
    /// Case-insensitive substring match against the product material.
    pub material: Option<String>,
    /// Cap on returned products. Absent or non-positive means no cap.
    pub limit: Option<i64>,
}

impl SearchFilters {
    /// A filter for everything in one category.
    #[must_use]
    pub fn category(category: Category) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }
}

/// Ranked search output.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Matching products after ranking and limit truncation.
    pub products: Vec<Product>,
    /// Count of matches before the limit was applied.
    /// Invariant: `total_found >= products.len()`.
    pub total_found: usize,
}

/// Filter and rank catalog entries against `filters`.
///
/// Zero matches (or an empty catalog) is a success with an empty product
/// list; callers decide how to phrase "no results".
#[must_use]
pub fn search(catalog: &[Product], filters: &SearchFilters) -> SearchResult {
    let mut products: Vec<Product> = catalog
        .iter()
        .filter(|p| matches_filters(p, filters))
        .cloned()
        .collect();

    // Beginner items first, then price ascending. Vec::sort_by is stable,
    // so ties keep catalog order.
    products.sort_by(|a, b| {
        let a_beginner = a.difficulty == Difficulty::Beginner;
        let b_beginner = b.difficulty == Difficulty::Beginner;
        b_beginner
            .cmp(&a_beginner)
            .then_with(|| a.price.cmp(&b.price))
    });

    let total_found = products.len();

    if let Some(limit) = filters.limit {
        if limit > 0 {
            products.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
    }

    SearchResult {
        products,
        total_found,
    }
}

/// Best-value picks within a category: beginner-weighted value score,
/// highest first.
#[must_use]
pub fn best_value_products(catalog: &[Product], category: Category, limit: usize) -> Vec<Product> {
    let result = search(
        catalog,
        &SearchFilters {
            category: Some(category),
            limit: Some(20),
            ..SearchFilters::default()
        },
    );

    let mut products = result.products;
    products.sort_by(|a, b| value_score(b).cmp(&value_score(a)));
    products.truncate(limit);
    products
}

/// Value score: a beginner bonus divided by price, so cheaper and
/// beginner-friendly products score higher.
fn value_score(product: &Product) -> Decimal {
    let weight = if product.difficulty == Difficulty::Beginner {
        Decimal::new(12, 1)
    } else {
        Decimal::ONE
    };
    weight / product.price
}

fn matches_filters(product: &Product, filters: &SearchFilters) -> bool {
    if let Some(category) = filters.category {
        if product.category != category {
            return false;
        }
    }

    if let Some(tags) = &filters.tags {
        if !tags.is_empty() && !matches_any_tag(product, tags) {
            return false;
        }
    }

    if let Some([min, max]) = filters.price_range {
        if product.price < min || product.price > max {
            return false;
        }
    }

    if let Some(difficulty) = filters.difficulty {
        if product.difficulty != difficulty {
            return false;
        }
    }

    if let Some(material) = &filters.material {
        if !product
            .material
            .to_lowercase()
            .contains(&material.to_lowercase())
        {
            return false;
        }
    }

    true
}

/// True if ANY query tag is a case-insensitive substring of ANY product tag,
/// the product name, or the product description.
fn matches_any_tag(product: &Product, tags: &[String]) -> bool {
    tags.iter().any(|tag| {
        let needle = tag.to_lowercase();
        product
            .tags
            .iter()
            .any(|t| t.to_lowercase().contains(&needle))
            || product.name.to_lowercase().contains(&needle)
            || product.description.to_lowercase().contains(&needle)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitchencraft_core::ProductId;

    fn product(
        id: i32,
        name: &str,
        price: &str,
        category: Category,
        difficulty: Difficulty,
    ) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: price.parse().expect("valid decimal"),
            description: format!("{name} for the kitchen"),
            image: String::new(),
            category,
            tags: vec!["kitchen".to_string()],
            difficulty,
            material: "Stainless Steel".to_string(),
            size: String::new(),
        }
    }

    fn sample_catalog() -> Vec<Product> {
        vec![
            product(1, "Carving Knife", "44.99", Category::Knives, Difficulty::Professional),
            product(2, "Chef's Knife", "24.99", Category::Knives, Difficulty::Beginner),
            product(3, "Paring Knife", "12.99", Category::Knives, Difficulty::Beginner),
            product(4, "Wooden Spoon Set", "14.99", Category::Spoons, Difficulty::Beginner),
            product(5, "Santoku Knife", "34.99", Category::Knives, Difficulty::Intermediate),
        ]
    }

    #[test]
    fn test_no_filters_returns_all_ranked() {
        let catalog = sample_catalog();
        let result = search(&catalog, &SearchFilters::default());

        assert_eq!(result.total_found, 5);
        let ids: Vec<i32> = result.products.iter().map(|p| p.id.as_i32()).collect();
        // Beginners (price ascending) precede intermediate and professional.
        assert_eq!(ids, vec![3, 4, 2, 5, 1]);
    }

    #[test]
    fn test_ranking_price_non_decreasing_within_tiers() {
        let catalog = sample_catalog();
        let result = search(&catalog, &SearchFilters::default());

        let beginner_count = result
            .products
            .iter()
            .take_while(|p| p.difficulty == Difficulty::Beginner)
            .count();
        assert_eq!(beginner_count, 3);
        for window in result.products.get(..beginner_count).expect("tier").windows(2) {
            assert!(window[0].price <= window[1].price);
        }
        for window in result.products.get(beginner_count..).expect("tier").windows(2) {
            assert!(window[0].price <= window[1].price);
        }
    }

    #[test]
    fn test_ranking_ties_keep_catalog_order() {
        let catalog = vec![
            product(1, "Spoon A", "9.99", Category::Spoons, Difficulty::Beginner),
            product(2, "Spoon B", "9.99", Category::Spoons, Difficulty::Beginner),
            product(3, "Spoon C", "9.99", Category::Spoons, Difficulty::Beginner),
        ];
        let result = search(&catalog, &SearchFilters::default());
        let ids: Vec<i32> = result.products.iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_category_filter() {
        let catalog = sample_catalog();
        let result = search(&catalog, &SearchFilters::category(Category::Spoons));

        assert_eq!(result.total_found, 1);
        assert_eq!(
            result.products.first().map(|p| p.id),
            Some(ProductId::new(4))
        );
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let catalog = sample_catalog();
        let filters = SearchFilters {
            price_range: Some(["12.99".parse().expect("decimal"), "24.99".parse().expect("decimal")]),
            ..SearchFilters::default()
        };
        let result = search(&catalog, &filters);

        assert_eq!(result.total_found, 3);
        for p in &result.products {
            assert!(p.price >= "12.99".parse().expect("decimal"));
            assert!(p.price <= "24.99".parse().expect("decimal"));
        }
    }

    #[test]
    fn test_limit_truncates_after_counting() {
        let catalog = sample_catalog();
        let filters = SearchFilters {
            limit: Some(2),
            ..SearchFilters::default()
        };
        let result = search(&catalog, &filters);

        assert_eq!(result.total_found, 5);
        assert_eq!(result.products.len(), 2);
        // The two highest-ranked products survive.
        let ids: Vec<i32> = result.products.iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn test_non_positive_limit_means_no_cap() {
        let catalog = sample_catalog();
        let filters = SearchFilters {
            limit: Some(0),
            ..SearchFilters::default()
        };
        assert_eq!(search(&catalog, &filters).products.len(), 5);

        let filters = SearchFilters {
            limit: Some(-3),
            ..SearchFilters::default()
        };
        assert_eq!(search(&catalog, &filters).products.len(), 5);
    }

    #[test]
    fn test_tags_match_name_and_description() {
        let mut catalog = sample_catalog();
        if let Some(p) = catalog.get_mut(0) {
            p.tags = vec!["professional".to_string()];
        }

        // "santoku" only appears in a product name.
        let filters = SearchFilters {
            tags: Some(vec!["santoku".to_string()]),
            ..SearchFilters::default()
        };
        let result = search(&catalog, &filters);
        assert_eq!(result.total_found, 1);

        // Tag list entries match case-insensitively.
        let filters = SearchFilters {
            tags: Some(vec!["PROFESSIONAL".to_string()]),
            ..SearchFilters::default()
        };
        let result = search(&catalog, &filters);
        assert_eq!(result.total_found, 1);
    }

    #[test]
    fn test_tags_or_matched() {
        let catalog = sample_catalog();
        let filters = SearchFilters {
            tags: Some(vec!["santoku".to_string(), "paring".to_string()]),
            ..SearchFilters::default()
        };
        let result = search(&catalog, &filters);
        assert_eq!(result.total_found, 2);
    }

    #[test]
    fn test_empty_tag_list_imposes_no_filter() {
        let catalog = sample_catalog();
        let filters = SearchFilters {
            tags: Some(Vec::new()),
            ..SearchFilters::default()
        };
        assert_eq!(search(&catalog, &filters).total_found, 5);
    }

    #[test]
    fn test_material_substring_case_insensitive() {
        let catalog = sample_catalog();
        let filters = SearchFilters {
            material: Some("stainless".to_string()),
            ..SearchFilters::default()
        };
        assert_eq!(search(&catalog, &filters).total_found, 5);

        let filters = SearchFilters {
            material: Some("bamboo".to_string()),
            ..SearchFilters::default()
        };
        assert_eq!(search(&catalog, &filters).total_found, 0);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let catalog = sample_catalog();
        let filters = SearchFilters {
            category: Some(Category::Knives),
            difficulty: Some(Difficulty::Beginner),
            price_range: Some([Decimal::ZERO, "20.00".parse().expect("decimal")]),
            ..SearchFilters::default()
        };
        let result = search(&catalog, &filters);

        assert_eq!(result.total_found, 1);
        assert_eq!(
            result.products.first().map(|p| p.id),
            Some(ProductId::new(3))
        );
    }

    #[test]
    fn test_empty_catalog_is_empty_success() {
        let result = search(&[], &SearchFilters::default());
        assert_eq!(result.total_found, 0);
        assert!(result.products.is_empty());
    }

    #[test]
    fn test_filters_deserialize_from_tool_arguments() {
        let filters: SearchFilters = serde_json::from_value(serde_json::json!({
            "category": "knives",
            "difficulty": "beginner",
            "priceRange": [0, 20],
            "tags": ["chef"],
            "limit": 5
        }))
        .expect("deserialize");

        assert_eq!(filters.category, Some(Category::Knives));
        assert_eq!(filters.difficulty, Some(Difficulty::Beginner));
        assert_eq!(
            filters.price_range,
            Some([Decimal::ZERO, Decimal::new(20, 0)])
        );
        assert_eq!(filters.limit, Some(5));
    }

    #[test]
    fn test_best_value_prefers_cheap_beginner_items() {
        let catalog = sample_catalog();
        let picks = best_value_products(&catalog, Category::Knives, 3);

        let ids: Vec<i32> = picks.iter().map(|p| p.id.as_i32()).collect();
        // 1.2/12.99 > 1.2/24.99 > 1/34.99 > 1/44.99
        assert_eq!(ids, vec![3, 2, 5]);
    }
}
