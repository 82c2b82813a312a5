//! Pricing and mock payment receipts.
//!
//! Nothing here settles money. A receipt only records that the checkout step
//! was reached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{make_id, PAYMENT_PREFIX};
use crate::model::Mode;

/// Currency every price is quoted in.
pub const CURRENCY: &str = "INR";

/// Price of one interview mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub price: u32,
    pub currency: String,
    pub label: String,
}

/// Prices for both interview modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceList {
    pub text: Price,
    pub voice: Price,
    pub bundle_note: String,
}

impl PriceList {
    pub fn new(total_rounds: u32) -> Self {
        Self {
            text: Price {
                price: 49,
                currency: CURRENCY.to_string(),
                label: "Text Interview".to_string(),
            },
            voice: Price {
                price: 119,
                currency: CURRENCY.to_string(),
                label: "Voice Interview".to_string(),
            },
            bundle_note: format!("{total_rounds} rounds + instant feedback"),
        }
    }
}

/// Outcome of a payment initiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Success,
}

/// Receipt returned from payment initiation. Stored in the `payment` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub status: PaymentStatus,
    pub transaction_id: String,
    pub amount: u32,
    pub mode: Mode,
    pub created_at: DateTime<Utc>,
}

impl PaymentReceipt {
    pub fn new(amount: u32, mode: Mode) -> Self {
        Self {
            status: PaymentStatus::Success,
            transaction_id: make_id(PAYMENT_PREFIX),
            amount,
            mode,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_list() {
        let prices = PriceList::new(5);
        assert_eq!(prices.text.price, 49);
        assert_eq!(prices.voice.price, 119);
        assert_eq!(prices.voice.currency, "INR");
        assert_eq!(prices.bundle_note, "5 rounds + instant feedback");
    }

    #[test]
    fn receipt_shape() {
        let receipt = PaymentReceipt::new(49, Mode::Text);
        assert!(receipt.transaction_id.starts_with("pay_"));
        let doc = serde_json::to_value(&receipt).unwrap();
        assert_eq!(doc["status"], "success");
        assert_eq!(doc["mode"], "text");
        assert_eq!(doc["amount"], 49);
    }
}
