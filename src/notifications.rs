//! Notifications
//!
//! One-shot toasts for threshold crossings. The notifier watches successive
//! [`CartTotals`] snapshots and emits exactly one notification per genuine
//! crossing (free delivery unlocked, a discount tier reached), staying quiet
//! while the state merely holds and re-arming once the cart drops back below
//! a threshold.
//!
//! It is driven by explicit mutation events: the cart's mutating operations
//! report whether anything changed, and only then does the owner call
//! [`ThresholdNotifier::on_cart_changed`]. Re-renders without a mutation never
//! reach the notifier, so there is nothing to debounce.

use rust_decimal::Decimal;

use crate::pricing::{CartTotals, TIER_ONE_DISCOUNT, TIER_TWO_DISCOUNT};

/// Severity of a notification, for the UI to style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Something good happened (threshold unlocked, item added).
    Success,

    /// Something went wrong.
    Error,

    /// Neutral information.
    Info,
}

/// Fire-and-forget outlet for user-facing toasts.
///
/// Delivery is not guaranteed and never retried; a dropped toast is not an
/// error.
pub trait NotificationSink {
    /// Show `message` to the user.
    fn notify(&mut self, message: &str, kind: NotificationKind);
}

/// Per-surface crossing detector.
///
/// Each mounted cart surface owns one notifier; two surfaces may each toast
/// the same crossing independently, which is acceptable UI-scoped
/// duplication. State is ephemeral and resets whenever the cart empties.
#[derive(Debug, Default)]
pub struct ThresholdNotifier {
    was_free_delivery: bool,
    previous_discount: Decimal,
    shown_free_delivery: bool,
    shown_tier_one: bool,
    shown_tier_two: bool,
}

impl ThresholdNotifier {
    /// Create a notifier for a surface whose cart may already qualify, e.g.
    /// one restored from persistence.
    ///
    /// The initial state is snapshotted without emitting anything, so a page
    /// that loads with an already-qualifying cart stays silent until a real
    /// crossing happens.
    pub fn new(initial: &CartTotals) -> Self {
        Self {
            was_free_delivery: initial.is_free_delivery,
            previous_discount: initial.discount,
            shown_free_delivery: false,
            shown_tier_one: false,
            shown_tier_two: false,
        }
    }

    /// React to a cart mutation.
    ///
    /// Call this once per successful mutation, with the freshly computed
    /// totals and item count. Emits at most one notification per threshold
    /// per call.
    pub fn on_cart_changed<S: NotificationSink>(
        &mut self,
        totals: &CartTotals,
        item_count: u64,
        sink: &mut S,
    ) {
        if item_count == 0 {
            *self = Self::default();
            return;
        }

        self.check_free_delivery(totals, sink);
        self.check_discount(totals, sink);
    }

    fn check_free_delivery<S: NotificationSink>(&mut self, totals: &CartTotals, sink: &mut S) {
        if totals.is_free_delivery && !self.was_free_delivery && !self.shown_free_delivery {
            sink.notify("🎉 Free delivery unlocked!", NotificationKind::Success);
            self.shown_free_delivery = true;
            self.was_free_delivery = true;
        } else if !totals.is_free_delivery && self.was_free_delivery {
            // Dropped back below: re-arm for the next crossing.
            self.was_free_delivery = false;
            self.shown_free_delivery = false;
        } else if totals.is_free_delivery {
            self.was_free_delivery = true;
        }
    }

    fn check_discount<S: NotificationSink>(&mut self, totals: &CartTotals, sink: &mut S) {
        let tier_one = Decimal::from(TIER_ONE_DISCOUNT);
        let tier_two = Decimal::from(TIER_TWO_DISCOUNT);

        if totals.discount == tier_one
            && self.previous_discount < tier_one
            && !self.shown_tier_one
        {
            sink.notify(
                &format!("🎉 {tier_one} {} discount applied!", totals.currency),
                NotificationKind::Success,
            );
            self.shown_tier_one = true;
            self.previous_discount = tier_one;
        } else if totals.discount == tier_two
            && self.previous_discount < tier_two
            && !self.shown_tier_two
        {
            sink.notify(
                &format!("🎉 {tier_two} {} discount applied!", totals.currency),
                NotificationKind::Success,
            );
            self.shown_tier_two = true;
            self.previous_discount = tier_two;
        } else if totals.discount < self.previous_discount {
            // Re-arm the tiers that are no longer reached.
            if totals.discount < tier_two {
                self.shown_tier_two = false;
            }
            if totals.discount < tier_one {
                self.shown_tier_one = false;
            }
            self.previous_discount = totals.discount;
        } else {
            self.previous_discount = totals.discount;
        }
    }
}
