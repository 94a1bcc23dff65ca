//! Donation submission models

use bytes::Bytes;

use crate::error::{DonationError, DonationResult};

/// Multipart form field names accepted by the donation form
pub mod fields {
    pub const NAME: &str = "name";
    pub const CONTACT: &str = "contact";
    pub const FOOD_TYPE: &str = "food_type";
    pub const QUANTITY: &str = "quantity";
    pub const LOCATION: &str = "location";
    pub const EXPIRY_TIME: &str = "expiry_time";
    pub const FOOD_IMAGE: &str = "food_image";

    /// Required text fields, in the order they are checked
    pub const TEXT: [&str; 6] = [NAME, CONTACT, FOOD_TYPE, QUANTITY, LOCATION, EXPIRY_TIME];
}

/// An uploaded image as received from the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// Filename supplied by the client
    pub filename: String,
    /// Raw file contents
    pub data: Bytes,
}

impl UploadedImage {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }
}

/// A complete donation submission.
///
/// All text values are kept exactly as submitted. `quantity` and
/// `expiry_time` are not parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationSubmission {
    /// Donor's display name
    pub name: String,
    /// Donor's contact information (free-form)
    pub contact: String,
    /// Category or description of the food
    pub food_type: String,
    /// Amount of food
    pub quantity: String,
    /// Pickup location
    pub location: String,
    /// When the food expires
    pub expiry_time: String,
    /// Photo of the food
    pub food_image: UploadedImage,
}

impl DonationSubmission {
    /// Plain-text acknowledgement returned to the donor
    pub fn acknowledgement(&self, freshness: &str) -> String {
        format!(
            "Thank you {}! Food is {} and will be picked up soon.",
            self.name, freshness
        )
    }
}

/// Accumulates the parts of a donation form as they are read from a request.
///
/// Unknown fields are ignored. If a field is sent more than once the first
/// value is kept.
#[derive(Debug, Default)]
pub struct DonationForm {
    name: Option<String>,
    contact: Option<String>,
    food_type: Option<String>,
    quantity: Option<String>,
    location: Option<String>,
    expiry_time: Option<String>,
    food_image: Option<UploadedImage>,
}

impl DonationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a text field. Returns `false` if the field is not part of the form.
    pub fn set_text(&mut self, field: &str, value: impl Into<String>) -> bool {
        let slot = match field {
            fields::NAME => &mut self.name,
            fields::CONTACT => &mut self.contact,
            fields::FOOD_TYPE => &mut self.food_type,
            fields::QUANTITY => &mut self.quantity,
            fields::LOCATION => &mut self.location,
            fields::EXPIRY_TIME => &mut self.expiry_time,
            _ => return false,
        };
        if slot.is_none() {
            *slot = Some(value.into());
        }
        true
    }

    /// Record the uploaded image
    pub fn set_image(&mut self, filename: impl Into<String>, data: impl Into<Bytes>) {
        if self.food_image.is_none() {
            self.food_image = Some(UploadedImage::new(filename, data));
        }
    }

    /// Build the submission, failing on the first missing field.
    ///
    /// Text fields are checked before the image.
    pub fn finish(self) -> DonationResult<DonationSubmission> {
        fn required<T>(value: Option<T>, field: &str) -> DonationResult<T> {
            value.ok_or_else(|| DonationError::MissingField(field.to_string()))
        }

        Ok(DonationSubmission {
            name: required(self.name, fields::NAME)?,
            contact: required(self.contact, fields::CONTACT)?,
            food_type: required(self.food_type, fields::FOOD_TYPE)?,
            quantity: required(self.quantity, fields::QUANTITY)?,
            location: required(self.location, fields::LOCATION)?,
            expiry_time: required(self.expiry_time, fields::EXPIRY_TIME)?,
            food_image: required(self.food_image, fields::FOOD_IMAGE)?,
        })
    }
}
