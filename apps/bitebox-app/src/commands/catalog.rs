//! # Catalog Commands
//!
//! Browsing: home screen lists, search, and restaurant menus.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Home                        Search                 Restaurant          │
//! │  ────                        ──────                 ──────────          │
//! │  featured_restaurants        search_restaurants     get_menu            │
//! │  list_categories             (text, sort, max ETA)                      │
//! │  list_restaurants(category)                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use bitebox_core::catalog::{Category, Restaurant, SearchQuery, ALL_CATEGORY_ID};
use bitebox_core::validation::validate_search_query;
use bitebox_core::MenuEntry;

use crate::error::ApiError;
use crate::state::CatalogState;

/// A restaurant together with its menu.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub restaurant: Restaurant,
    pub items: Vec<MenuEntry>,
}

pub fn list_categories(catalog: &CatalogState) -> Vec<Category> {
    debug!("list_categories command");
    catalog.catalog().categories().to_vec()
}

/// Restaurants for a category pill. `None` means "All".
pub fn list_restaurants(catalog: &CatalogState, category_id: Option<&str>) -> Vec<Restaurant> {
    let category_id = category_id.unwrap_or(ALL_CATEGORY_ID);
    debug!(category_id = %category_id, "list_restaurants command");

    catalog
        .catalog()
        .restaurants_in_category(category_id)
        .into_iter()
        .cloned()
        .collect()
}

pub fn featured_restaurants(catalog: &CatalogState) -> Vec<Restaurant> {
    debug!("featured_restaurants command");
    catalog.catalog().featured().into_iter().cloned().collect()
}

/// Search screen.
///
/// ## Behavior
/// - Text is trimmed and matched against names and cuisines, ignoring case
/// - Blank text returns every restaurant (filters and sort still apply)
/// - Text longer than 100 characters is rejected
pub fn search_restaurants(
    catalog: &CatalogState,
    query: SearchQuery,
) -> Result<Vec<Restaurant>, ApiError> {
    let text = validate_search_query(&query.text)?;
    debug!(query = %text, sort = ?query.sort, "search_restaurants command");

    let query = SearchQuery { text, ..query };
    Ok(catalog
        .catalog()
        .search(&query)
        .into_iter()
        .cloned()
        .collect())
}

pub fn get_menu(catalog: &CatalogState, restaurant_id: &str) -> Result<MenuResponse, ApiError> {
    debug!(restaurant_id = %restaurant_id, "get_menu command");

    let catalog = catalog.catalog();
    let restaurant = catalog.restaurant(restaurant_id)?.clone();
    let items = catalog.menu(restaurant_id)?.to_vec();

    Ok(MenuResponse { restaurant, items })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use bitebox_core::catalog::SortBy;

    #[test]
    fn test_list_restaurants_defaults_to_all() {
        let catalog = CatalogState::sample();
        assert_eq!(list_restaurants(&catalog, None).len(), 6);
        assert_eq!(list_restaurants(&catalog, Some("1")).len(), 6);
    }

    #[test]
    fn test_list_restaurants_by_category() {
        let catalog = CatalogState::sample();
        let pizza = list_restaurants(&catalog, Some("2"));

        assert_eq!(pizza.len(), 1);
        assert_eq!(pizza[0].name, "Pizza Heaven");
        assert!(list_restaurants(&catalog, Some("unknown")).is_empty());
    }

    #[test]
    fn test_featured() {
        let catalog = CatalogState::sample();
        let names: Vec<String> = featured_restaurants(&catalog)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Burger Palace", "Sushi Express"]);
    }

    #[test]
    fn test_search_trims_and_sorts() {
        let catalog = CatalogState::sample();

        let hits = search_restaurants(&catalog, SearchQuery::text("  sushi  ")).unwrap();
        assert_eq!(hits.len(), 1);

        let query = SearchQuery {
            text: String::new(),
            sort: SortBy::Rating,
            max_delivery_minutes: Some(30),
        };
        let hits = search_restaurants(&catalog, query).unwrap();
        assert_eq!(hits[0].name, "Burger Palace");
        assert!(hits.iter().all(|r| r.delivery_minutes <= 30));
    }

    #[test]
    fn test_search_rejects_long_query() {
        let catalog = CatalogState::sample();
        let err = search_restaurants(&catalog, SearchQuery::text("x".repeat(101))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_get_menu() {
        let catalog = CatalogState::sample();

        let menu = get_menu(&catalog, "1").unwrap();
        assert_eq!(menu.restaurant.name, "Burger Palace");
        assert!(menu.items.iter().any(|item| item.id == "101"));

        let err = get_menu(&catalog, "42").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
