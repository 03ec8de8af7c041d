//! Creation/edit payload for an order record.

use chrono::NaiveDate;

use daigou_core::{DomainError, DomainResult};

use crate::record::sanitize_amount;
use crate::status::Status;

/// Everything an operator types in to create or edit an order.
///
/// `total_price` is the whole-line sale amount; the per-unit price is derived
/// from it, never entered. `status` is ignored at creation (new orders start
/// at `checking`) and applied on edit when present.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    /// Order date; `None` means "today" at creation and "keep" on edit.
    pub date: Option<NaiveDate>,
    pub client_code: String,
    pub store: Option<String>,
    pub product_name: String,
    pub spec: Option<String>,
    pub quantity: u32,
    /// Whole-line cost in KRW; 0 = not supplied.
    pub cost_foreign: f64,
    /// Exchange rate as stored (either orientation); 0 = not supplied.
    pub exchange_rate: f64,
    /// Whole-line sale price in TWD.
    pub total_price: f64,
    pub status: Option<Status>,
    pub is_paid: bool,
    pub is_shipping_paid: bool,
    pub note: Option<String>,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self {
            date: None,
            client_code: String::new(),
            store: None,
            product_name: String::new(),
            spec: None,
            quantity: 1,
            cost_foreign: 0.0,
            exchange_rate: 0.0,
            total_price: 0.0,
            status: None,
            is_paid: false,
            is_shipping_paid: false,
            note: None,
        }
    }
}

impl OrderDraft {
    /// Creation requirements: client code, product name, and a positive sale
    /// total. Everything else may arrive later.
    pub fn validate_for_create(&self) -> DomainResult<()> {
        if self.client_code.trim().is_empty() {
            return Err(DomainError::validation("client code is required"));
        }
        if self.product_name.trim().is_empty() {
            return Err(DomainError::validation("product name is required"));
        }
        if !(self.total_price.is_finite() && self.total_price > 0.0) {
            return Err(DomainError::validation("total price must be positive"));
        }
        Ok(())
    }

    /// Home-currency cost from the draft's conversion inputs, or `None` when
    /// either input is missing.
    pub fn computed_cost_home(&self) -> Option<f64> {
        let cost_foreign = sanitize_amount(self.cost_foreign);
        let exchange_rate = sanitize_amount(self.exchange_rate);
        if cost_foreign > 0.0 && exchange_rate > 0.0 {
            Some(daigou_money::to_home(cost_foreign, exchange_rate))
        } else {
            None
        }
    }

    /// Per-unit sale price.
    pub fn computed_unit_price(&self) -> f64 {
        sanitize_amount(self.total_price) / f64::from(self.quantity.max(1))
    }
}
