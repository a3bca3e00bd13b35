//! # Cart
//!
//! The session's shopping cart: an ordered list of [`CartLine`]s, one per
//! distinct menu entry.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CartStore Operations                                 │
//! │                                                                         │
//! │  User Gesture            Operation               Effect                 │
//! │  ────────────            ─────────               ──────                 │
//! │                                                                         │
//! │  Tap "Add" ────────────► add_item(entry, q) ───► new line / qty += q    │
//! │                                                                         │
//! │  Tap "+" ──────────────► increment_quantity ───► qty += 1               │
//! │                                                                         │
//! │  Tap "−" ──────────────► decrement_quantity ───► qty -= 1 (floor 1)     │
//! │                                                                         │
//! │  Tap trash ────────────► remove_item ──────────► line removed           │
//! │                                                                         │
//! │  Order placed ─────────► clear ────────────────► empty                  │
//! │                                                                         │
//! │  Render cart ──────────► total / item_count ───► (read only)            │
//! │                                                                         │
//! │  NOTE: No operation fails. Unknown ids are no-ops.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per id
//! - Every quantity is at least 1
//! - Lines keep insertion order
//! - Each line is a snapshot: catalog edits never reach it
//!
//! ```rust
//! use bitebox_core::cart::CartStore;
//! use bitebox_core::catalog::MenuEntry;
//! use bitebox_core::money::Money;
//!
//! let burger = MenuEntry::new("A", "Burger", Money::from_cents(999));
//! let fries = MenuEntry::new("B", "Fries", Money::from_cents(399));
//!
//! let mut cart = CartStore::new();
//! cart.add_item(&burger, 1);
//! cart.add_item(&fries, 2);
//!
//! assert_eq!(cart.total().cents(), 1797);
//! assert_eq!(cart.item_count(), 3);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::catalog::MenuEntry;
use crate::money::Money;

// =============================================================================
// Cart Line
// =============================================================================

/// One distinct item in the cart.
///
/// ## Snapshot Semantics
/// `name`, `unit_price`, `image_url` and `options` are copied from the
/// [`MenuEntry`] the first time it is added. Re-adding the same id only
/// bumps the quantity; it does not refresh the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Menu entry id. Unique within the cart.
    pub id: String,

    pub name: String,

    /// Price locked in when the line was created.
    pub unit_price: Money,

    pub image_url: String,

    /// Always >= 1.
    pub quantity: u32,

    /// Selected variants or badges, copied from the entry's tags.
    #[serde(default)]
    pub options: Vec<String>,
}

impl CartLine {
    /// Snapshots a menu entry into a new line.
    pub fn from_entry(entry: &MenuEntry, quantity: u32) -> Self {
        CartLine {
            id: entry.id.clone(),
            name: entry.name.clone(),
            unit_price: entry.price,
            image_url: entry.image_url.clone(),
            quantity: quantity.max(1),
            options: entry.tags.clone(),
        }
    }

    /// `unit_price × quantity`.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// The shopping cart for one session.
///
/// Created empty at session start and dropped at session end. Owned by a
/// single writer; the app crate wraps it in a mutex when commands can run
/// concurrently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartStore {
    lines: Vec<CartLine>,

    /// When the cart was created or last cleared.
    created_at: DateTime<Utc>,
}

impl CartStore {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        CartStore {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a menu entry or increases its quantity if already present.
    ///
    /// ## Behavior
    /// - Id already in cart: quantity += `quantity` (snapshot unchanged)
    /// - Id not in cart: new line appended at the end
    /// - `quantity == 0` is treated as 1
    pub fn add_item(&mut self, entry: &MenuEntry, quantity: u32) {
        let quantity = if quantity == 0 {
            debug!(id = %entry.id, "add_item called with quantity 0, using 1");
            1
        } else {
            quantity
        };

        if let Some(line) = self.line_mut(&entry.id) {
            line.quantity = line.quantity.saturating_add(quantity);
            debug!(id = %entry.id, quantity = line.quantity, "cart line quantity increased");
            return;
        }

        self.lines.push(CartLine::from_entry(entry, quantity));
        debug!(id = %entry.id, quantity, "cart line added");
    }

    /// Shorthand for `add_item(entry, 1)`.
    pub fn add_one(&mut self, entry: &MenuEntry) {
        self.add_item(entry, 1);
    }

    /// Removes the line with this id.
    ///
    /// Returns `false` (and changes nothing) when the id is not in the cart.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|line| line.id != id);
        self.lines.len() != initial_len
    }

    /// Adds one unit to an existing line. Returns `false` if the id is absent.
    pub fn increment_quantity(&mut self, id: &str) -> bool {
        match self.line_mut(id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Takes one unit off an existing line, never going below 1.
    ///
    /// ## Quantity Floor
    /// ```text
    /// qty 3 ──► 2 ──► 1 ──► 1 ──► 1     (line stays; use remove_item)
    /// ```
    ///
    /// Returns `true` only when the quantity actually changed.
    pub fn decrement_quantity(&mut self, id: &str) -> bool {
        match self.line_mut(id) {
            Some(line) if line.quantity > 1 => {
                line.quantity -= 1;
                true
            }
            _ => false,
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Sum of every line total, in exact cents. Zero when empty.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total number of units (not lines). Zero when empty.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn line_mut(&mut self, id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id == id)
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, price_cents: i64) -> MenuEntry {
        MenuEntry::new(id, format!("Dish {}", id), Money::from_cents(price_cents))
            .with_image(format!("https://img.test/{}.jpg", id))
    }

    /// A 9.99 ×1 + B 3.99 ×2
    fn two_line_cart() -> CartStore {
        let mut cart = CartStore::new();
        cart.add_item(&entry("A", 999), 1);
        cart.add_item(&entry("B", 399), 2);
        cart
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = CartStore::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.line_count(), 0);
    }

    #[test]
    fn test_add_item_snapshot() {
        let mut cart = CartStore::new();
        let burger = entry("101", 999).with_tags(["Bestseller", "Spicy"]);

        cart.add_item(&burger, 2);

        let line = cart.line("101").unwrap();
        assert_eq!(line.name, "Dish 101");
        assert_eq!(line.unit_price.cents(), 999);
        assert_eq!(line.image_url, "https://img.test/101.jpg");
        assert_eq!(line.quantity, 2);
        assert_eq!(line.options, ["Bestseller", "Spicy"]);
        assert_eq!(line.line_total().cents(), 1998);
    }

    #[test]
    fn test_add_one_defaults_to_single_unit() {
        let mut cart = CartStore::new();
        cart.add_one(&entry("A", 999));
        assert_eq!(cart.line("A").unwrap().quantity, 1);
    }

    #[test]
    fn test_distinct_ids_count_sums_quantities() {
        let mut cart = CartStore::new();
        let quantities = [1u32, 4, 2, 7, 3];
        for (i, qty) in quantities.iter().enumerate() {
            cart.add_item(&entry(&format!("item-{}", i), 100), *qty);
        }

        assert_eq!(cart.line_count(), quantities.len());
        assert_eq!(cart.item_count(), quantities.iter().map(|q| u64::from(*q)).sum::<u64>());
    }

    #[test]
    fn test_same_id_merges_into_one_line() {
        let mut cart = CartStore::new();
        let dish = entry("A", 999);

        cart.add_item(&dish, 2);
        cart.add_item(&dish, 3);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.line("A").unwrap().quantity, 5);
    }

    #[test]
    fn test_zero_quantity_is_treated_as_one() {
        let mut cart = CartStore::new();
        let dish = entry("A", 999);

        cart.add_item(&dish, 0);
        assert_eq!(cart.line("A").unwrap().quantity, 1);

        cart.add_item(&dish, 0);
        assert_eq!(cart.line("A").unwrap().quantity, 2);
    }

    #[test]
    fn test_readding_does_not_refresh_snapshot() {
        let mut cart = CartStore::new();
        let mut dish = entry("A", 999);
        cart.add_item(&dish, 1);

        // Catalog price and name change after the first add
        dish.price = Money::from_cents(1499);
        dish.name = "Renamed".to_string();
        cart.add_item(&dish, 1);

        let line = cart.line("A").unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price.cents(), 999);
        assert_eq!(line.name, "Dish A");
        assert_eq!(cart.total().cents(), 1998);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = CartStore::new();
        for id in ["C", "A", "B"] {
            cart.add_item(&entry(id, 100), 1);
        }
        cart.increment_quantity("A");
        cart.add_item(&entry("C", 100), 1);

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["C", "A", "B"]);
    }

    #[test]
    fn test_total_and_count_example() {
        let cart = two_line_cart();
        assert_eq!(cart.total().cents(), 1797);
        assert_eq!(cart.total().to_string(), "$17.97");
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_decrement_floors_at_one() {
        let mut cart = two_line_cart();

        assert!(cart.decrement_quantity("B"));
        assert!(!cart.decrement_quantity("B"));

        let b = cart.line("B").unwrap();
        assert_eq!(b.quantity, 1);
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_decrement_at_one_keeps_line() {
        let mut cart = CartStore::new();
        cart.add_item(&entry("A", 999), 1);

        assert!(!cart.decrement_quantity("A"));
        assert_eq!(cart.line("A").unwrap().quantity, 1);
    }

    #[test]
    fn test_increment() {
        let mut cart = two_line_cart();

        assert!(cart.increment_quantity("A"));
        assert_eq!(cart.line("A").unwrap().quantity, 2);
        assert_eq!(cart.total().cents(), 999 * 2 + 399 * 2);
    }

    #[test]
    fn test_unknown_id_operations_are_noops() {
        let mut cart = two_line_cart();
        let before = cart.lines().to_vec();

        assert!(!cart.remove_item("nope"));
        assert!(!cart.increment_quantity("nope"));
        assert!(!cart.decrement_quantity("nope"));

        assert_eq!(cart.lines(), before.as_slice());
    }

    #[test]
    fn test_remove_item() {
        let mut cart = two_line_cart();

        assert!(cart.remove_item("A"));
        assert!(cart.line("A").is_none());
        assert_eq!(cart.total().cents(), 798);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_clear() {
        let mut cart = two_line_cart();
        assert!(!cart.is_empty());

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total().cents(), 0);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_clear_on_empty_cart() {
        let mut cart = CartStore::new();
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_saturates() {
        let mut cart = CartStore::new();
        let dish = entry("A", 1);
        cart.add_item(&dish, u32::MAX);
        cart.add_item(&dish, 5);
        assert!(!cart.increment_quantity("X"));
        cart.increment_quantity("A");
        assert_eq!(cart.line("A").unwrap().quantity, u32::MAX);
        assert_eq!(cart.total().cents(), i64::from(u32::MAX));
    }

    /// Totals that no longer fit in cents pin at the maximum instead of
    /// wrapping negative.
    #[test]
    fn test_total_saturates() {
        let mut cart = CartStore::new();
        cart.add_item(&entry("A", 2_500_000_000), u32::MAX);
        assert_eq!(cart.total().cents(), i64::MAX);
        assert_eq!(cart.item_count(), u64::from(u32::MAX));

        let mut cart = CartStore::new();
        cart.add_one(&entry("A", i64::MAX / 2 + 1));
        cart.add_one(&entry("B", i64::MAX / 2 + 1));
        assert_eq!(cart.total().cents(), i64::MAX);
        assert!(cart.total().is_positive());
    }

    /// Ten thousand 10-cent additions stay exact.
    #[test]
    fn test_many_small_additions_are_exact() {
        let mut cart = CartStore::new();
        let mint = entry("mint", 10);
        for _ in 0..10_000 {
            cart.add_one(&mint);
        }
        assert_eq!(cart.total().cents(), 100_000);
        assert_eq!(cart.total().to_string(), "$1000.00");
    }

    #[test]
    fn test_cart_line_serializes_camel_case() {
        let cart = two_line_cart();
        let json = serde_json::to_value(&cart.lines()[0]).unwrap();
        assert_eq!(json["unitPrice"], 999);
        assert_eq!(json["imageUrl"], "https://img.test/A.jpg");
        assert_eq!(json["quantity"], 1);
    }
}
