//! Donation Client Library
//!
//! Provides a typed HTTP client for the food donation service: the donation
//! form and the food inventory API.
//!
//! # Example
//!
//! ```rust,no_run
//! use donation_client::{Donation, DonationClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DonationClient::new("http://localhost:5000")?;
//!
//!     let ack = client
//!         .submit(&Donation {
//!             name: "Alice".into(),
//!             contact: "alice@example.com".into(),
//!             food_type: "Apples".into(),
//!             quantity: "12".into(),
//!             location: "Main St 1".into(),
//!             expiry_time: "2026-10-20 18:00".into(),
//!             image_filename: "apple.jpg".into(),
//!             image: std::fs::read("apple.jpg")?,
//!         })
//!         .await?;
//!     println!("{}", ack);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Inventory
//!
//! ```rust,no_run
//! # async fn demo(client: donation_client::DonationClient) -> donation_client::Result<()> {
//! for item in client.list_items().await?.iter().filter(|i| !i.consumed) {
//!     println!("{} ({})", item.name, item.days_left_text());
//! }
//! let stats = client.stats().await?;
//! println!("{} items, {} expired", stats.total, stats.expired);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod types;

pub use client::DonationClient;
pub use error::{DonationClientError, Result};
pub use types::{Donation, InventoryItem, InventoryStats, ItemRequest};

// Re-export for building raw submissions
pub use reqwest::multipart;
