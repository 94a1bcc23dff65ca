//! Food inventory tracking
//!
//! Items stay in the inventory until they are deleted. Consumed items are
//! kept but no longer count towards the statistics. The expiry status of an
//! item is derived from the whole days left before its expiry date, so it is
//! always computed against a reference day rather than stored.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{DonationError, DonationResult};

/// Items expiring within this many days are critical
pub const CRITICAL_DAYS: i64 = 2;
/// Items expiring within this many days need attention soon
pub const WARNING_DAYS: i64 = 7;

/// How close an item is to its expiry date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryStatus {
    Fresh,
    Warning,
    Critical,
    Expired,
}

impl ExpiryStatus {
    pub fn from_days_left(days: i64) -> Self {
        match days {
            d if d < 0 => ExpiryStatus::Expired,
            d if d <= CRITICAL_DAYS => ExpiryStatus::Critical,
            d if d <= WARNING_DAYS => ExpiryStatus::Warning,
            _ => ExpiryStatus::Fresh,
        }
    }
}

/// Values supplied when adding or editing an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInput {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub location: String,
    /// Amount, kept as entered ("12", "1.5")
    #[serde(default, deserialize_with = "quantity_text")]
    pub quantity: String,
    #[serde(default)]
    pub unit: String,
    /// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp
    #[serde(deserialize_with = "expiry_date")]
    pub expiry_date: NaiveDate,
}

impl ItemInput {
    fn validated(mut self) -> DonationResult<Self> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DonationError::InvalidItem("name must not be empty".to_string()));
        }
        self.name = name.to_string();
        Ok(self)
    }
}

fn quantity_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Quantity {
        Text(String),
        Number(f64),
    }

    Ok(match Quantity::deserialize(deserializer)? {
        Quantity::Text(text) => text,
        Quantity::Number(n) => n.to_string(),
    })
}

fn expiry_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_expiry_date(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid expiry date '{}', expected YYYY-MM-DD", raw))
    })
}

/// Parse a date as sent by a date input or a full timestamp
pub fn parse_expiry_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|t| t.date_naive()))
}

/// A tracked food item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub location: String,
    pub quantity: String,
    pub unit: String,
    pub expiry_date: NaiveDate,
    pub consumed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FoodItem {
    fn from_input(input: ItemInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            category: input.category,
            location: input.location,
            quantity: input.quantity,
            unit: input.unit,
            expiry_date: input.expiry_date,
            consumed: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, input: ItemInput) {
        self.name = input.name;
        self.category = input.category;
        self.location = input.location;
        self.quantity = input.quantity;
        self.unit = input.unit;
        self.expiry_date = input.expiry_date;
        self.updated_at = Utc::now();
    }

    /// Whole days from `today` until the expiry date; negative once expired
    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        (self.expiry_date - today).num_days()
    }

    pub fn status(&self, today: NaiveDate) -> ExpiryStatus {
        ExpiryStatus::from_days_left(self.days_until_expiry(today))
    }

    /// The item together with its expiry state on `today`
    pub fn view(&self, today: NaiveDate) -> ItemView {
        ItemView {
            days_until_expiry: self.days_until_expiry(today),
            status: self.status(today),
            item: self.clone(),
        }
    }
}

/// Item representation returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    #[serde(flatten)]
    pub item: FoodItem,
    pub days_until_expiry: i64,
    pub status: ExpiryStatus,
}

/// Counts over the items that have not been consumed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryStats {
    pub total: usize,
    pub critical: usize,
    pub warning: usize,
    pub expired: usize,
}

/// In-memory item store shared by the request handlers
#[derive(Debug, Default)]
pub struct Inventory {
    items: RwLock<HashMap<Uuid, FoodItem>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// All items, soonest expiry first
    pub async fn list(&self) -> Vec<FoodItem> {
        let mut items: Vec<FoodItem> = self.items.read().await.values().cloned().collect();
        items.sort_by(|a, b| {
            a.expiry_date
                .cmp(&b.expiry_date)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        items
    }

    pub async fn get(&self, id: Uuid) -> DonationResult<FoodItem> {
        self.items
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| DonationError::ItemNotFound(id.to_string()))
    }

    pub async fn create(&self, input: ItemInput) -> DonationResult<FoodItem> {
        let item = FoodItem::from_input(input.validated()?);
        self.items.write().await.insert(item.id, item.clone());
        tracing::debug!(id = %item.id, name = %item.name, "Inventory item created");
        Ok(item)
    }

    /// Replace the editable fields of an item; the consumed flag is kept
    pub async fn update(&self, id: Uuid, input: ItemInput) -> DonationResult<FoodItem> {
        let input = input.validated()?;
        let mut items = self.items.write().await;
        let item = items
            .get_mut(&id)
            .ok_or_else(|| DonationError::ItemNotFound(id.to_string()))?;
        item.apply(input);
        Ok(item.clone())
    }

    /// Mark an item as consumed. Consuming twice is not an error.
    pub async fn consume(&self, id: Uuid) -> DonationResult<FoodItem> {
        let mut items = self.items.write().await;
        let item = items
            .get_mut(&id)
            .ok_or_else(|| DonationError::ItemNotFound(id.to_string()))?;
        if !item.consumed {
            item.consumed = true;
            item.updated_at = Utc::now();
        }
        Ok(item.clone())
    }

    pub async fn delete(&self, id: Uuid) -> DonationResult<FoodItem> {
        self.items
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| DonationError::ItemNotFound(id.to_string()))
    }

    pub async fn stats(&self, today: NaiveDate) -> InventoryStats {
        let items = self.items.read().await;
        let mut stats = InventoryStats::default();
        for item in items.values().filter(|i| !i.consumed) {
            stats.total += 1;
            match item.status(today) {
                ExpiryStatus::Critical => stats.critical += 1,
                ExpiryStatus::Warning => stats.warning += 1,
                ExpiryStatus::Expired => stats.expired += 1,
                ExpiryStatus::Fresh => {}
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn input(name: &str, expiry: &str) -> ItemInput {
        ItemInput {
            name: name.to_string(),
            category: "Dairy".to_string(),
            location: "Fridge".to_string(),
            quantity: "2".to_string(),
            unit: "l".to_string(),
            expiry_date: day(expiry),
        }
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(ExpiryStatus::from_days_left(-1), ExpiryStatus::Expired);
        assert_eq!(ExpiryStatus::from_days_left(0), ExpiryStatus::Critical);
        assert_eq!(ExpiryStatus::from_days_left(2), ExpiryStatus::Critical);
        assert_eq!(ExpiryStatus::from_days_left(3), ExpiryStatus::Warning);
        assert_eq!(ExpiryStatus::from_days_left(7), ExpiryStatus::Warning);
        assert_eq!(ExpiryStatus::from_days_left(8), ExpiryStatus::Fresh);
    }

    #[test]
    fn test_input_from_form_json() {
        let json = r#"{
            "name": "Milk",
            "category": "Dairy",
            "location": "Fridge",
            "quantity": "2",
            "unit": "l",
            "expiryDate": "2026-10-25"
        }"#;
        let parsed: ItemInput = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, input("Milk", "2026-10-25"));
    }

    #[test]
    fn test_input_accepts_numbers_and_timestamps() {
        let json = r#"{"name": "Rice", "quantity": 1.5, "expiryDate": "2026-11-01T08:30:00Z"}"#;
        let parsed: ItemInput = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.quantity, "1.5");
        assert_eq!(parsed.expiry_date, day("2026-11-01"));
        assert_eq!(parsed.category, "");
    }

    #[test]
    fn test_input_rejects_bad_date() {
        let json = r#"{"name": "Rice", "expiryDate": "next week"}"#;
        let err = serde_json::from_str::<ItemInput>(json).unwrap_err();
        assert!(err.to_string().contains("next week"));
    }

    #[test]
    fn test_view_serializes_days_and_status() {
        let item = FoodItem::from_input(input("Milk", "2026-10-20"));
        let view = item.view(day("2026-10-19"));
        assert_eq!(view.days_until_expiry, 1);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["name"], "Milk");
        assert_eq!(json["expiryDate"], "2026-10-20");
        assert_eq!(json["daysUntilExpiry"], 1);
        assert_eq!(json["status"], "critical");
        assert_eq!(json["consumed"], false);
    }

    #[tokio::test]
    async fn test_create_trims_name_and_rejects_blank() {
        let inventory = Inventory::new();
        let item = inventory.create(input("  Milk ", "2026-10-25")).await.unwrap();
        assert_eq!(item.name, "Milk");
        assert!(!item.consumed);

        let err = inventory.create(input("   ", "2026-10-25")).await.unwrap_err();
        assert!(matches!(err, DonationError::InvalidItem(_)));
        assert_eq!(inventory.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_list_orders_by_expiry() {
        let inventory = Inventory::new();
        inventory.create(input("Cheese", "2026-11-30")).await.unwrap();
        inventory.create(input("Milk", "2026-10-21")).await.unwrap();
        inventory.create(input("Bread", "2026-10-25")).await.unwrap();

        let names: Vec<String> = inventory.list().await.into_iter().map(|i| i.name).collect();
        assert_eq!(names, ["Milk", "Bread", "Cheese"]);
    }

    #[tokio::test]
    async fn test_update_keeps_identity_and_consumed_flag() {
        let inventory = Inventory::new();
        let item = inventory.create(input("Milk", "2026-10-25")).await.unwrap();
        inventory.consume(item.id).await.unwrap();

        let updated = inventory
            .update(item.id, input("Oat milk", "2026-10-30"))
            .await
            .unwrap();
        assert_eq!(updated.id, item.id);
        assert_eq!(updated.created_at, item.created_at);
        assert_eq!(updated.name, "Oat milk");
        assert_eq!(updated.expiry_date, day("2026-10-30"));
        assert!(updated.consumed);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let inventory = Inventory::new();
        let id = Uuid::new_v4();

        assert!(matches!(inventory.get(id).await, Err(DonationError::ItemNotFound(_))));
        assert!(matches!(inventory.consume(id).await, Err(DonationError::ItemNotFound(_))));
        assert!(matches!(inventory.delete(id).await, Err(DonationError::ItemNotFound(_))));
        assert!(matches!(
            inventory.update(id, input("Milk", "2026-10-25")).await,
            Err(DonationError::ItemNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_removes_item() {
        let inventory = Inventory::new();
        let item = inventory.create(input("Milk", "2026-10-25")).await.unwrap();

        let removed = inventory.delete(item.id).await.unwrap();
        assert_eq!(removed.id, item.id);
        assert!(inventory.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_stats_skip_consumed_items() {
        let inventory = Inventory::new();
        let today = day("2026-10-19");

        inventory.create(input("Yoghurt", "2026-10-18")).await.unwrap();
        inventory.create(input("Milk", "2026-10-20")).await.unwrap();
        inventory.create(input("Butter", "2026-10-24")).await.unwrap();
        inventory.create(input("Rice", "2027-03-01")).await.unwrap();
        let eaten = inventory.create(input("Cream", "2026-10-19")).await.unwrap();
        inventory.consume(eaten.id).await.unwrap();

        let stats = inventory.stats(today).await;
        assert_eq!(
            stats,
            InventoryStats {
                total: 4,
                critical: 1,
                warning: 1,
                expired: 1,
            }
        );
        // Consumed items are still listed
        assert_eq!(inventory.list().await.len(), 5);
    }
}
