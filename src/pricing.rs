//! Pricing
//!
//! Pure derivation of monetary totals and promotional progress from the cart
//! lines and store settings. Nothing here mutates or performs IO; calling any
//! of these functions twice with the same inputs produces the same outputs.
//!
//! Amounts stay exact [`Decimal`]s end to end; only the interpolated progress
//! messages round (to whole units, as the storefront UI presents them).

use rust_decimal::{Decimal, RoundingStrategy};

use crate::{cart::CartLine, settings::StoreSettings};

/// Flat discount applied at the lower spend threshold.
///
/// Deliberately a fixed business constant, decoupled from the configurable
/// threshold values (the thresholds moved over time; the amounts never did).
pub const TIER_ONE_DISCOUNT: u32 = 25;

/// Flat discount applied at the upper spend threshold.
pub const TIER_TWO_DISCOUNT: u32 = 50;

/// Everything derived from one pass over the cart: totals, the discount tier,
/// delivery, and the display values the UI needs alongside them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of line totals before any discount.
    pub subtotal: Decimal,

    /// Flat tier discount (0, 25 or 50).
    pub discount: Decimal,

    /// Delivery charge after the free-delivery check.
    pub delivery_charge: Decimal,

    /// Final amount: subtotal − discount + delivery charge.
    pub total: Decimal,

    /// Whether the order qualified for free delivery.
    pub is_free_delivery: bool,

    /// Free-delivery threshold, echoed for display.
    pub free_delivery_threshold: Decimal,

    /// Lower discount threshold, echoed for display.
    pub discount_150_threshold: Decimal,

    /// Upper discount threshold, echoed for display.
    pub discount_200_threshold: Decimal,

    /// Display currency code, echoed for display.
    pub currency: String,
}

/// Progress toward the free-delivery threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryProgress {
    /// How far along the order is, 0–100.
    pub percentage: Decimal,

    /// Amount still needed to qualify; zero once unlocked.
    pub remaining: Decimal,

    /// Ready-to-display message.
    pub message: String,
}

/// Progress toward the next discount tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountProgress {
    /// The threshold the customer is working toward.
    pub next_threshold: Decimal,

    /// The discount unlocked at that threshold.
    pub next_discount: Decimal,

    /// Amount still needed to reach it; zero at the top tier.
    pub remaining: Decimal,

    /// Ready-to-display message.
    pub message: String,
}

/// Derive all totals for the given cart lines under the given settings.
///
/// The discount tiers are mutually exclusive and the higher tier wins: a
/// subtotal at or above `discount_200_threshold` earns the 50-unit discount,
/// otherwise at or above `discount_150_threshold` the 25-unit discount,
/// otherwise none. Free delivery is judged on the amount *after* discount.
pub fn calculate_totals(lines: &[CartLine], settings: &StoreSettings) -> CartTotals {
    let subtotal: Decimal = lines.iter().map(CartLine::line_total).sum();

    let discount = if subtotal >= settings.discount_200_threshold {
        Decimal::from(TIER_TWO_DISCOUNT)
    } else if subtotal >= settings.discount_150_threshold {
        Decimal::from(TIER_ONE_DISCOUNT)
    } else {
        Decimal::ZERO
    };

    let after_discount = subtotal - discount;

    let is_free_delivery = after_discount >= settings.free_delivery_threshold;
    let delivery_charge = if is_free_delivery {
        Decimal::ZERO
    } else {
        settings.delivery_charge
    };

    CartTotals {
        subtotal,
        discount,
        delivery_charge,
        total: after_discount + delivery_charge,
        is_free_delivery,
        free_delivery_threshold: settings.free_delivery_threshold,
        discount_150_threshold: settings.discount_150_threshold,
        discount_200_threshold: settings.discount_200_threshold,
        currency: settings.currency.clone(),
    }
}

/// Progress toward free delivery for an after-discount amount.
pub fn delivery_progress(
    after_discount: Decimal,
    threshold: Decimal,
    currency: &str,
) -> DeliveryProgress {
    if after_discount >= threshold {
        return DeliveryProgress {
            percentage: Decimal::ONE_HUNDRED,
            remaining: Decimal::ZERO,
            message: "🎉 Free delivery unlocked!".to_owned(),
        };
    }

    // after_discount < threshold and amounts are non-negative, so the
    // threshold is strictly positive here.
    let remaining = threshold - after_discount;
    let percentage = (after_discount / threshold * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED);

    DeliveryProgress {
        percentage,
        remaining,
        message: format!(
            "Add {} {currency} more for free delivery!",
            whole_units(remaining)
        ),
    }
}

/// Progress toward the next discount tier for a subtotal.
pub fn discount_progress(
    subtotal: Decimal,
    threshold_150: Decimal,
    threshold_200: Decimal,
    currency: &str,
) -> DiscountProgress {
    let tier_two = Decimal::from(TIER_TWO_DISCOUNT);

    if subtotal >= threshold_200 {
        return DiscountProgress {
            next_threshold: threshold_200,
            next_discount: tier_two,
            remaining: Decimal::ZERO,
            message: format!("🎉 Maximum discount applied ({tier_two} {currency} off)!"),
        };
    }

    if subtotal >= threshold_150 {
        let remaining = threshold_200 - subtotal;

        return DiscountProgress {
            next_threshold: threshold_200,
            next_discount: tier_two,
            remaining,
            message: format!(
                "Add {} {currency} more for {tier_two} {currency} off!",
                whole_units(remaining)
            ),
        };
    }

    let remaining = threshold_150 - subtotal;
    let tier_one = Decimal::from(TIER_ONE_DISCOUNT);

    DiscountProgress {
        next_threshold: threshold_150,
        next_discount: tier_one,
        remaining,
        message: format!(
            "Add {} {currency} more for {tier_one} {currency} off!",
            whole_units(remaining)
        ),
    }
}

/// Round an amount to whole currency units for message interpolation.
fn whole_units(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
