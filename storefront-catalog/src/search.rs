//! Client-side product search.
//!
//! A pure filter over an already-fetched product list. Debouncing user
//! input is the view layer's job; this function just answers "which of
//! these products match".

use storefront_core::Product;

/// Case-insensitive substring search over title, description, and category.
///
/// A product matches if **any** of the three fields contains the query. An
/// empty or whitespace-only query matches everything.
pub fn filter_products(products: &[Product], query: &str) -> Vec<Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return products.to_vec();
    }
    products
        .iter()
        .filter(|product| {
            product.title.to_lowercase().contains(&needle)
                || product.description.to_lowercase().contains(&needle)
                || product.category.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::Rating;

    fn product(id: u64, title: &str, description: &str, category: &str) -> Product {
        Product {
            id,
            title: title.to_owned(),
            price: 10.0,
            description: description.to_owned(),
            category: category.to_owned(),
            image: format!("https://example.com/{id}.jpg"),
            rating: Rating {
                rate: 4.0,
                count: 10,
            },
        }
    }

    fn inventory() -> Vec<Product> {
        vec![
            product(1, "Red Shirt", "a shirt", "clothing"),
            product(2, "Blue Hat", "red trim", "accessories"),
            product(3, "Green Sock", "a sock", "clothing"),
        ]
    }

    #[test]
    fn matches_any_of_title_description_category() {
        let hits = filter_products(&inventory(), "red");
        let ids: Vec<u64> = hits.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn match_is_case_insensitive() {
        let hits = filter_products(&inventory(), "RED");
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn category_field_is_searched() {
        let hits = filter_products(&inventory(), "accessor");
        let ids: Vec<u64> = hits.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn empty_query_passes_everything_through() {
        assert_eq!(filter_products(&inventory(), "").len(), 3);
    }

    #[test]
    fn whitespace_only_query_passes_everything_through() {
        assert_eq!(filter_products(&inventory(), "   ").len(), 3);
    }

    #[test]
    fn no_match_returns_empty() {
        assert!(filter_products(&inventory(), "violin").is_empty());
    }
}
