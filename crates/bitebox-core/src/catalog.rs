//! # Catalog
//!
//! Restaurants, categories and menus offered in the app, plus the built-in
//! mock fixtures that stand in for a menu service.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog (read-only for the whole session)                              │
//! │  ├── restaurants: Vec<Restaurant>                                       │
//! │  ├── categories:  Vec<Category>     "All", "Pizza", "Burgers", ...      │
//! │  └── menus:       restaurant id ──► Vec<MenuEntry>                      │
//! │                                           │                             │
//! │                                           │ &MenuEntry                  │
//! │                                           ▼                             │
//! │                              CartStore::add_item (copies a snapshot)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart never calls back into the catalog and never holds references
//! into it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::validate_price_cents;

/// Id of the pseudo-category that matches every restaurant.
pub const ALL_CATEGORY_ID: &str = "1";

// =============================================================================
// Menu Entry
// =============================================================================

/// A dish offered by a restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    /// Unique across the whole catalog.
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Regular unit price.
    pub price: Money,

    /// Promotional price shown next to the regular one.
    ///
    /// Informational only: the cart always snapshots `price`.
    #[serde(default)]
    pub discounted_price: Option<Money>,

    pub image_url: String,

    /// Menu section ("Burgers", "Sides", ...).
    #[serde(default)]
    pub category: Option<String>,

    /// Badges such as "Bestseller" or "Spicy". Copied into cart line options.
    #[serde(default)]
    pub tags: Vec<String>,

    /// `None` means available.
    #[serde(default)]
    pub available: Option<bool>,
}

impl MenuEntry {
    /// Creates an available entry with no description, tags or image.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        MenuEntry {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            discounted_price: None,
            image_url: String::new(),
            category: None,
            tags: Vec::new(),
            available: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Whether the entry can be ordered. An absent flag means yes.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.available.unwrap_or(true)
    }
}

// =============================================================================
// Restaurant & Category
// =============================================================================

/// A restaurant listed on the home and search screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub cuisines: Vec<String>,
    /// Average review score, 0.0 - 5.0.
    pub rating: f64,
    pub review_count: u32,
    pub distance_km: f64,
    /// Typical minutes from order to door.
    pub delivery_minutes: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub free_delivery: bool,
    #[serde(default)]
    pub min_order: Option<Money>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// A browse category ("Pizza", "Sushi", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon_url: Option<String>,
}

// =============================================================================
// Search
// =============================================================================

/// Result ordering on the search screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Catalog order.
    #[default]
    Relevance,
    /// Highest rated first.
    Rating,
    /// Fastest delivery first.
    DeliveryTime,
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relevance" => Ok(SortBy::Relevance),
            "rating" => Ok(SortBy::Rating),
            "delivery" | "delivery_time" => Ok(SortBy::DeliveryTime),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

/// Search screen input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Matched case-insensitively against names and cuisines. Blank matches all.
    pub text: String,
    #[serde(default)]
    pub sort: SortBy,
    /// Drop restaurants slower than this.
    #[serde(default)]
    pub max_delivery_minutes: Option<u32>,
}

impl SearchQuery {
    pub fn text(text: impl Into<String>) -> Self {
        SearchQuery {
            text: text.into(),
            ..Default::default()
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// In-memory catalog of restaurants and their menus.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    restaurants: Vec<Restaurant>,
    categories: Vec<Category>,
    menus: HashMap<String, Vec<MenuEntry>>,
}

impl Catalog {
    /// Builds a catalog from caller-supplied data.
    ///
    /// Every menu price (regular and discounted) must be non-negative.
    pub fn new(
        restaurants: Vec<Restaurant>,
        categories: Vec<Category>,
        menus: HashMap<String, Vec<MenuEntry>>,
    ) -> CoreResult<Self> {
        for entry in menus.values().flatten() {
            let field = format!("price of menu item {}", entry.id);
            validate_price_cents(&field, entry.price.cents())?;
            if let Some(discounted) = entry.discounted_price {
                validate_price_cents(&field, discounted.cents())?;
            }
        }

        Ok(Catalog {
            restaurants,
            categories,
            menus,
        })
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Restaurants shown in the "Featured" carousel.
    pub fn featured(&self) -> Vec<&Restaurant> {
        self.restaurants.iter().filter(|r| r.featured).collect()
    }

    /// Restaurants for a category pill.
    ///
    /// ## Behavior
    /// - [`ALL_CATEGORY_ID`]: every restaurant
    /// - Known category: restaurants listing the category name as a cuisine
    /// - Unknown category: nothing
    pub fn restaurants_in_category(&self, category_id: &str) -> Vec<&Restaurant> {
        if category_id == ALL_CATEGORY_ID {
            return self.restaurants.iter().collect();
        }

        let Some(category) = self.categories.iter().find(|c| c.id == category_id) else {
            return Vec::new();
        };

        self.restaurants
            .iter()
            .filter(|r| r.cuisines.iter().any(|c| *c == category.name))
            .collect()
    }

    /// Free-text restaurant search.
    ///
    /// ```rust
    /// use bitebox_core::catalog::{Catalog, SearchQuery};
    ///
    /// let catalog = Catalog::sample();
    /// let hits = catalog.search(&SearchQuery::text("SUSHI"));
    /// assert_eq!(hits.len(), 1);
    /// assert_eq!(hits[0].name, "Sushi Express");
    /// ```
    pub fn search(&self, query: &SearchQuery) -> Vec<&Restaurant> {
        let needle = query.text.trim().to_lowercase();

        let mut hits: Vec<&Restaurant> = self
            .restaurants
            .iter()
            .filter(|r| {
                needle.is_empty()
                    || r.name.to_lowercase().contains(&needle)
                    || r.cuisines
                        .iter()
                        .any(|c| c.to_lowercase().contains(&needle))
            })
            .filter(|r| {
                query
                    .max_delivery_minutes
                    .map_or(true, |max| r.delivery_minutes <= max)
            })
            .collect();

        match query.sort {
            SortBy::Relevance => {}
            SortBy::Rating => hits.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            SortBy::DeliveryTime => hits.sort_by_key(|r| r.delivery_minutes),
        }

        hits
    }

    pub fn restaurant(&self, id: &str) -> CoreResult<&Restaurant> {
        self.restaurants
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| CoreError::RestaurantNotFound(id.to_string()))
    }

    /// The menu of a restaurant. A known restaurant without a menu yields an
    /// empty slice.
    pub fn menu(&self, restaurant_id: &str) -> CoreResult<&[MenuEntry]> {
        self.restaurant(restaurant_id)?;
        Ok(self
            .menus
            .get(restaurant_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]))
    }

    /// Looks up a menu entry by id across every restaurant.
    pub fn find_menu_entry(&self, id: &str) -> CoreResult<&MenuEntry> {
        self.menus
            .values()
            .flatten()
            .find(|entry| entry.id == id)
            .ok_or_else(|| CoreError::MenuEntryNotFound(id.to_string()))
    }

    /// The built-in mock catalog.
    pub fn sample() -> Self {
        let restaurants = SAMPLE_RESTAURANTS
            .iter()
            .map(|r| Restaurant {
                id: r.id.to_string(),
                name: r.name.to_string(),
                image_url: pexels(r.photo),
                cuisines: r.cuisines.iter().map(|c| c.to_string()).collect(),
                rating: r.rating,
                review_count: r.review_count,
                distance_km: r.distance_km,
                delivery_minutes: r.delivery_minutes,
                featured: r.featured,
                free_delivery: r.free_delivery,
                min_order: Some(Money::from_cents(r.min_order_cents)),
                description: Some(r.description.to_string()),
                address: Some(r.address.to_string()),
            })
            .collect();

        let categories = SAMPLE_CATEGORIES
            .iter()
            .map(|(id, name, icon)| Category {
                id: id.to_string(),
                name: name.to_string(),
                icon_url: icon.map(|slug| format!("https://img.icons8.com/color/48/000000/{}.png", slug)),
            })
            .collect();

        let mut menus: HashMap<String, Vec<MenuEntry>> = HashMap::new();
        for dish in SAMPLE_MENU {
            let entry = MenuEntry::new(dish.id, dish.name, Money::from_cents(dish.price_cents))
                .with_description(dish.description)
                .with_image(pexels(dish.photo))
                .with_category(dish.category)
                .with_tags(dish.tags.iter().copied());
            menus
                .entry(dish.restaurant_id.to_string())
                .or_default()
                .push(entry);
        }

        Catalog {
            restaurants,
            categories,
            menus,
        }
    }
}

fn pexels(photo: u32) -> String {
    format!(
        "https://images.pexels.com/photos/{}/pexels-photo-{}.jpeg",
        photo, photo
    )
}

// =============================================================================
// Mock Fixtures
// =============================================================================

struct SampleRestaurant {
    id: &'static str,
    name: &'static str,
    photo: u32,
    cuisines: &'static [&'static str],
    rating: f64,
    review_count: u32,
    distance_km: f64,
    delivery_minutes: u32,
    featured: bool,
    free_delivery: bool,
    min_order_cents: i64,
    description: &'static str,
    address: &'static str,
}

struct SampleDish {
    restaurant_id: &'static str,
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price_cents: i64,
    photo: u32,
    category: &'static str,
    tags: &'static [&'static str],
}

const SAMPLE_RESTAURANTS: &[SampleRestaurant] = &[
    SampleRestaurant {
        id: "1",
        name: "Burger Palace",
        photo: 1639557,
        cuisines: &["American", "Burgers"],
        rating: 4.7,
        review_count: 324,
        distance_km: 0.8,
        delivery_minutes: 25,
        featured: true,
        free_delivery: true,
        min_order_cents: 1500,
        description: "The best burgers in town with a wide variety of toppings and sides.",
        address: "123 Main St, Anytown, USA",
    },
    SampleRestaurant {
        id: "2",
        name: "Pizza Heaven",
        photo: 905847,
        cuisines: &["Italian", "Pizza"],
        rating: 4.5,
        review_count: 216,
        distance_km: 1.2,
        delivery_minutes: 35,
        featured: false,
        free_delivery: false,
        min_order_cents: 2000,
        description: "Authentic Italian pizza made in a wood-fired oven.",
        address: "456 Oak St, Anytown, USA",
    },
    SampleRestaurant {
        id: "3",
        name: "Sushi Express",
        photo: 1148086,
        cuisines: &["Japanese", "Sushi"],
        rating: 4.8,
        review_count: 189,
        distance_km: 1.5,
        delivery_minutes: 40,
        featured: true,
        free_delivery: true,
        min_order_cents: 2500,
        description: "Fresh and delicious sushi prepared by expert chefs.",
        address: "789 Maple Ave, Anytown, USA",
    },
    SampleRestaurant {
        id: "4",
        name: "Taco Fiesta",
        photo: 2087748,
        cuisines: &["Mexican", "Tacos"],
        rating: 4.3,
        review_count: 156,
        distance_km: 0.9,
        delivery_minutes: 30,
        featured: false,
        free_delivery: false,
        min_order_cents: 1500,
        description: "Authentic Mexican street food with a modern twist.",
        address: "101 Pine St, Anytown, USA",
    },
    SampleRestaurant {
        id: "5",
        name: "Green Garden",
        photo: 1640777,
        cuisines: &["Vegetarian", "Healthy"],
        rating: 4.6,
        review_count: 142,
        distance_km: 1.8,
        delivery_minutes: 35,
        featured: false,
        free_delivery: true,
        min_order_cents: 1800,
        description: "Delicious and nutritious vegetarian and vegan options.",
        address: "202 Elm St, Anytown, USA",
    },
    SampleRestaurant {
        id: "6",
        name: "Noodle House",
        photo: 2347311,
        cuisines: &["Chinese", "Noodles"],
        rating: 4.4,
        review_count: 178,
        distance_km: 1.3,
        delivery_minutes: 25,
        featured: false,
        free_delivery: false,
        min_order_cents: 1500,
        description: "Authentic Chinese noodles and dumplings made from scratch.",
        address: "303 Cedar St, Anytown, USA",
    },
];

const SAMPLE_CATEGORIES: &[(&str, &str, Option<&str>)] = &[
    ("1", "All", None),
    ("2", "Pizza", Some("pizza")),
    ("3", "Burgers", Some("hamburger")),
    ("4", "Sushi", Some("sushi")),
    ("5", "Italian", Some("pasta")),
    ("6", "Mexican", Some("taco")),
    ("7", "Chinese", Some("noodles")),
    ("8", "Vegetarian", Some("vegetarian-food-symbol")),
];

const SAMPLE_MENU: &[SampleDish] = &[
    SampleDish {
        restaurant_id: "1",
        id: "101",
        name: "Classic Cheeseburger",
        description: "Juicy beef patty with cheddar cheese, lettuce, tomato, and special sauce.",
        price_cents: 999,
        photo: 1633578,
        category: "Burgers",
        tags: &["Bestseller", "Spicy"],
    },
    SampleDish {
        restaurant_id: "1",
        id: "102",
        name: "Double Bacon Burger",
        description: "Two beef patties with crispy bacon, American cheese, onions, and BBQ sauce.",
        price_cents: 1299,
        photo: 1251198,
        category: "Burgers",
        tags: &["Popular"],
    },
    SampleDish {
        restaurant_id: "1",
        id: "103",
        name: "Veggie Burger",
        description: "Plant-based patty with avocado, sprouts, tomato, and vegan mayo.",
        price_cents: 1099,
        photo: 1639557,
        category: "Burgers",
        tags: &["Vegetarian"],
    },
    SampleDish {
        restaurant_id: "1",
        id: "104",
        name: "French Fries",
        description: "Crispy golden fries seasoned with sea salt.",
        price_cents: 399,
        photo: 1583884,
        category: "Sides",
        tags: &[],
    },
    SampleDish {
        restaurant_id: "1",
        id: "105",
        name: "Onion Rings",
        description: "Crispy battered onion rings served with dipping sauce.",
        price_cents: 499,
        photo: 1893555,
        category: "Sides",
        tags: &[],
    },
    SampleDish {
        restaurant_id: "1",
        id: "106",
        name: "Chocolate Milkshake",
        description: "Rich and creamy chocolate milkshake topped with whipped cream.",
        price_cents: 599,
        photo: 103566,
        category: "Drinks",
        tags: &[],
    },
    SampleDish {
        restaurant_id: "2",
        id: "201",
        name: "Margherita Pizza",
        description: "Classic pizza with tomato sauce, fresh mozzarella, and basil.",
        price_cents: 1299,
        photo: 1146760,
        category: "Pizza",
        tags: &["Classic"],
    },
    SampleDish {
        restaurant_id: "2",
        id: "202",
        name: "Pepperoni Pizza",
        description: "Tomato sauce, mozzarella, and spicy pepperoni on a traditional crust.",
        price_cents: 1499,
        photo: 708587,
        category: "Pizza",
        tags: &["Bestseller", "Spicy"],
    },
    SampleDish {
        restaurant_id: "2",
        id: "203",
        name: "Vegetarian Supreme",
        description: "Bell peppers, mushrooms, onions, olives, and tomatoes on whole wheat.",
        price_cents: 1599,
        photo: 825661,
        category: "Pizza",
        tags: &["Vegetarian"],
    },
    SampleDish {
        restaurant_id: "2",
        id: "204",
        name: "Garlic Breadsticks",
        description: "Warm breadsticks brushed with garlic butter and herbs.",
        price_cents: 599,
        photo: 1438515,
        category: "Sides",
        tags: &[],
    },
    SampleDish {
        restaurant_id: "2",
        id: "205",
        name: "Caesar Salad",
        description: "Crisp romaine lettuce with Caesar dressing, croutons, and parmesan.",
        price_cents: 799,
        photo: 1059905,
        category: "Salads",
        tags: &[],
    },
    SampleDish {
        restaurant_id: "3",
        id: "301",
        name: "California Roll",
        description: "Crab, avocado, and cucumber rolled in sushi rice and seaweed.",
        price_cents: 899,
        photo: 359993,
        category: "Rolls",
        tags: &["Popular"],
    },
    SampleDish {
        restaurant_id: "3",
        id: "302",
        name: "Tuna Nigiri",
        description: "Fresh tuna slices over pressed sushi rice.",
        price_cents: 999,
        photo: 2098085,
        category: "Nigiri",
        tags: &["Fresh"],
    },
    SampleDish {
        restaurant_id: "3",
        id: "303",
        name: "Salmon Sashimi",
        description: "Thinly sliced fresh salmon served with wasabi and soy sauce.",
        price_cents: 1299,
        photo: 8986793,
        category: "Sashimi",
        tags: &["Premium"],
    },
    SampleDish {
        restaurant_id: "3",
        id: "304",
        name: "Dragon Roll",
        description: "Shrimp tempura, avocado, and cucumber topped with eel and avocado.",
        price_cents: 1499,
        photo: 2098143,
        category: "Rolls",
        tags: &["Specialty", "Spicy"],
    },
    SampleDish {
        restaurant_id: "3",
        id: "305",
        name: "Miso Soup",
        description: "Traditional Japanese soup with tofu, seaweed, and green onions.",
        price_cents: 399,
        photo: 539451,
        category: "Sides",
        tags: &[],
    },
    SampleDish {
        restaurant_id: "3",
        id: "306",
        name: "Edamame",
        description: "Steamed young soybeans lightly salted.",
        price_cents: 499,
        photo: 9404245,
        category: "Sides",
        tags: &["Vegetarian"],
    },
];

// =============================================================================
// Unit Tests
// =============================================================================
