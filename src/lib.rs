//! Hawker
//!
//! Hawker is a cart, pricing and checkout engine for small single-vendor
//! storefronts: quantity-capped cart lines persisted across sessions, tiered
//! spend discounts and free-delivery computation, one-shot threshold-crossing
//! notifications, and a WhatsApp order-message composer.

pub mod cart;
pub mod checkout;
pub mod notifications;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod settings;
pub mod storage;
