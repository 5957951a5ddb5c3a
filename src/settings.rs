//! Store settings
//!
//! A single configuration record owned by the store admin: currency, delivery
//! charge and the promotional thresholds. The cart and pricing code only ever
//! read it.

use std::{fs, path::Path};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settings parsing and validation errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// IO error reading the settings file.
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A monetary amount or threshold was negative.
    #[error("Negative amount for {field}: {value}")]
    NegativeAmount {
        /// Which settings field was negative.
        field: &'static str,
        /// The offending value.
        value: Decimal,
    },

    /// The upper discount threshold was below the lower one.
    #[error("Discount thresholds out of order: {upper} is below {lower}")]
    ThresholdsOutOfOrder {
        /// The lower (25-unit) threshold.
        lower: Decimal,
        /// The upper (50-unit) threshold.
        upper: Decimal,
    },
}

/// Store-wide settings consumed by the cart, pricing and checkout code.
///
/// The threshold field names refer to the historical defaults (spend 150 for
/// 25 off, spend 200 for 50 off); the values themselves are editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Store display name.
    pub store_name: String,

    /// WhatsApp number orders are sent to.
    pub whatsapp_number: String,

    /// Display currency code, e.g. `AED`.
    pub currency: String,

    /// Flat delivery charge applied below the free-delivery threshold.
    pub delivery_charge: Decimal,

    /// Order value (after discount) at which delivery becomes free.
    pub free_delivery_threshold: Decimal,

    /// Subtotal at which the 25-unit discount applies.
    pub discount_150_threshold: Decimal,

    /// Subtotal at which the 50-unit discount applies.
    pub discount_200_threshold: Decimal,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            store_name: String::new(),
            whatsapp_number: String::new(),
            currency: "AED".to_owned(),
            delivery_charge: Decimal::from(25),
            free_delivery_threshold: Decimal::from(70),
            discount_150_threshold: Decimal::from(150),
            discount_200_threshold: Decimal::from(200),
        }
    }
}

impl StoreSettings {
    /// Parse settings from a YAML document and validate them.
    ///
    /// Absent fields fall back to the defaults.
    ///
    /// # Errors
    ///
    /// - [`SettingsError::Yaml`]: The document is not valid YAML for this shape.
    /// - [`SettingsError::NegativeAmount`]: An amount or threshold is negative.
    /// - [`SettingsError::ThresholdsOutOfOrder`]: The upper discount threshold
    ///   is below the lower one.
    pub fn from_yaml(yaml: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_norway::from_str(yaml)?;

        settings.validate()?;

        Ok(settings)
    }

    /// Read and parse settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a [`SettingsError`] if the file cannot be read, parsed or
    /// validated.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let yaml = fs::read_to_string(path)?;

        Self::from_yaml(&yaml)
    }

    /// Check the invariants the rest of the crate relies on.
    ///
    /// # Errors
    ///
    /// - [`SettingsError::NegativeAmount`]: An amount or threshold is negative.
    /// - [`SettingsError::ThresholdsOutOfOrder`]: The upper discount threshold
    ///   is below the lower one.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let amounts = [
            ("delivery_charge", self.delivery_charge),
            ("free_delivery_threshold", self.free_delivery_threshold),
            ("discount_150_threshold", self.discount_150_threshold),
            ("discount_200_threshold", self.discount_200_threshold),
        ];

        for (field, value) in amounts {
            if value < Decimal::ZERO {
                return Err(SettingsError::NegativeAmount { field, value });
            }
        }

        if self.discount_200_threshold < self.discount_150_threshold {
            return Err(SettingsError::ThresholdsOutOfOrder {
                lower: self.discount_150_threshold,
                upper: self.discount_200_threshold,
            });
        }

        Ok(())
    }
}
