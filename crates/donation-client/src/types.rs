//! Request and response types for the donation API

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A donation to submit through the `/donate` form
#[derive(Debug, Clone)]
pub struct Donation {
    pub name: String,
    pub contact: String,
    pub food_type: String,
    pub quantity: String,
    pub location: String,
    pub expiry_time: String,
    /// Filename reported for the uploaded image
    pub image_filename: String,
    /// Image contents
    pub image: Vec<u8>,
}

impl Donation {
    /// Build the multipart form the donation page would send.
    ///
    /// The image filename is sent as-is, the way browsers do.
    pub fn to_form(&self) -> Form {
        Form::new()
            .percent_encode_noop()
            .text("name", self.name.clone())
            .text("contact", self.contact.clone())
            .text("food_type", self.food_type.clone())
            .text("quantity", self.quantity.clone())
            .text("location", self.location.clone())
            .text("expiry_time", self.expiry_time.clone())
            .part(
                "food_image",
                Part::bytes(self.image.clone()).file_name(self.image_filename.clone()),
            )
    }
}

// =============================================================================
// Inventory Types
// =============================================================================

/// Body sent when adding or editing an inventory item
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    pub name: String,
    pub category: String,
    pub location: String,
    pub quantity: String,
    pub unit: String,
    pub expiry_date: NaiveDate,
}

/// An inventory item as reported by the server
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
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
    /// Negative once the item has expired
    pub days_until_expiry: i64,
    /// `fresh`, `warning`, `critical` or `expired`
    pub status: String,
}

impl InventoryItem {
    /// Human readable form of `days_until_expiry`
    pub fn days_left_text(&self) -> String {
        match self.days_until_expiry {
            d if d < 0 => "Expired".to_string(),
            0 => "Expires today".to_string(),
            1 => "Expires tomorrow".to_string(),
            d => format!("Expires in {} days", d),
        }
    }
}

/// Inventory counters over items not yet consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct InventoryStats {
    pub total: usize,
    pub critical: usize,
    pub warning: usize,
    pub expired: usize,
}

#[derive(Deserialize)]
pub(crate) struct ItemEnvelope {
    pub item: InventoryItem,
}

#[derive(Deserialize)]
pub(crate) struct ItemListEnvelope {
    pub items: Vec<InventoryItem>,
}

#[derive(Deserialize)]
pub(crate) struct StatsEnvelope {
    pub stats: InventoryStats,
}

/// Error body returned by the server
#[derive(Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}
