//! Checkout
//!
//! Formats a line-itemized order summary for hand-off to WhatsApp. The
//! composer performs no arithmetic of its own: every figure in the summary
//! block comes from [`calculate_totals`]. The deep link simply URL-encodes the
//! composed text; the messaging channel itself is someone else's problem.

use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;

use crate::{cart::CartLine, pricing::calculate_totals, products::Product, settings::StoreSettings};

/// Checkout link construction errors.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The configured phone number contains no digits.
    #[error("Phone number contains no digits: {0:?}")]
    InvalidPhoneNumber(String),

    /// The deep link could not be assembled.
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

/// Compose the full order message for a cart.
///
/// One numbered line per cart line (title, product code, unit price, quantity
/// when above one, line total), then a summary block with subtotal, discount
/// (only when one applies), delivery charge or `FREE`, and the final total.
pub fn order_message(lines: &[CartLine], settings: &StoreSettings) -> String {
    let totals = calculate_totals(lines, settings);
    let currency = &settings.currency;

    let mut message = String::from("Hi, I want to buy:\n\n");

    for (index, line) in lines.iter().enumerate() {
        message.push_str(&format!(
            "{}. {} (Code: {})",
            index + 1,
            line.product.title,
            line.product.product_code
        ));

        if line.quantity > 1 {
            message.push_str(&format!(" x{}", line.quantity));
        }

        message.push_str(&format!(
            " - {} {currency} each = {} {currency}\n",
            display(line.unit_price()),
            display(line.line_total()),
        ));
    }

    message.push_str("\n---\n");
    message.push_str(&format!(
        "Subtotal: {} {currency}\n",
        display(totals.subtotal)
    ));

    if totals.discount > Decimal::ZERO {
        message.push_str(&format!(
            "Discount: -{} {currency}\n",
            display(totals.discount)
        ));
    }

    if totals.delivery_charge > Decimal::ZERO {
        message.push_str(&format!(
            "Delivery: {} {currency}\n",
            display(totals.delivery_charge)
        ));
    } else {
        message.push_str("Delivery: FREE\n");
    }

    message.push_str(&format!("Total: {} {currency}\n", display(totals.total)));

    message
}

/// Compose the one-line message for buying a single product directly,
/// without a summary block.
pub fn single_item_message(product: &Product, settings: &StoreSettings) -> String {
    format!(
        "Hi, I want to buy: {} (Code: {}) - {} {}",
        product.title,
        product.product_code,
        display(product.effective_price()),
        settings.currency
    )
}

/// Build the WhatsApp deep link carrying `message` to `phone`.
///
/// Everything but digits is stripped from the phone number before it is
/// placed in the path; the message is encoded as the `text` query parameter.
///
/// # Errors
///
/// - [`CheckoutError::InvalidPhoneNumber`]: `phone` contains no digits.
/// - [`CheckoutError::Url`]: The link could not be assembled.
pub fn checkout_link(phone: &str, message: &str) -> Result<Url, CheckoutError> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();

    if digits.is_empty() {
        return Err(CheckoutError::InvalidPhoneNumber(phone.to_owned()));
    }

    let mut url = Url::parse(&format!("https://wa.me/{digits}"))?;

    url.query_pairs_mut().append_pair("text", message);

    Ok(url)
}

/// Render an amount without trailing zeros, the way the storefront shows raw
/// prices (`120`, `59.5`).
fn display(amount: Decimal) -> Decimal {
    amount.normalize()
}
