//! Hawker prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLine},
    checkout::{CheckoutError, checkout_link, order_message, single_item_message},
    notifications::{NotificationKind, NotificationSink, ThresholdNotifier},
    pricing::{
        CartTotals, DeliveryProgress, DiscountProgress, TIER_ONE_DISCOUNT, TIER_TWO_DISCOUNT,
        calculate_totals, delivery_progress, discount_progress,
    },
    products::Product,
    settings::{SettingsError, StoreSettings},
    storage::{CartStorage, JsonFileStorage, MemoryStorage, StorageError},
};
