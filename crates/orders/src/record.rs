//! The order record: canonical in-memory shape plus tolerant decoding.
//!
//! Ledger data has passed through several app generations, so the JSON on
//! disk mixes field-name eras (`clientName` vs `clientCode`, `costKRW` vs
//! `costForeign`, per-unit `cost` vs whole-line `costHome`). All of that is
//! resolved exactly once, here, when a record is decoded; the rest of the
//! engine only ever sees the canonical shape. Unknown fields are kept
//! verbatim so third-party additions survive an export/import cycle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use daigou_core::OrderId;

use crate::draft::OrderDraft;
use crate::status::{Status, StatusTag};

/// One purchasing-agent order.
///
/// Money fields are whole-line totals in their currency; `unit_price` and
/// `cost_home` are derived and recomputable. Construct records through
/// [`OrderRecord::from_draft`] or by decoding stored JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: OrderId,
    pub date: NaiveDate,
    pub client_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    pub product_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<String>,
    pub quantity: u32,
    /// Whole-line cost in KRW. Zero when never supplied.
    pub cost_foreign: f64,
    /// KRW per TWD when above 1, TWD per KRW otherwise. Zero when never supplied.
    pub exchange_rate: f64,
    /// Whole-line cost in TWD, derived at entry.
    pub cost_home: f64,
    /// Whole-line sale price in TWD.
    pub total_price: f64,
    /// Per-unit sale price in TWD, derived from `total_price`.
    pub unit_price: f64,
    /// Pre-rework per-unit TWD cost. Kept only so old records round-trip
    /// and keep their cost fallback.
    #[serde(rename = "cost", skip_serializing_if = "Option::is_none")]
    pub legacy_unit_cost: Option<f64>,
    pub status: StatusTag,
    pub is_paid: bool,
    pub is_shipping_paid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Fields this engine does not model, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OrderRecord {
    /// Build a fresh record from a creation draft.
    ///
    /// The status is always `checking`, whatever the draft carries; new
    /// orders start at the beginning of the workflow.
    pub fn from_draft(id: OrderId, today: NaiveDate, draft: &OrderDraft) -> Self {
        let quantity = draft.quantity.max(1);
        let cost_foreign = sanitize_amount(draft.cost_foreign);
        let exchange_rate = sanitize_amount(draft.exchange_rate);
        let total_price = sanitize_amount(draft.total_price);
        Self {
            id,
            date: draft.date.unwrap_or(today),
            client_code: draft.client_code.trim().to_string(),
            store: draft.store.clone(),
            product_name: draft.product_name.trim().to_string(),
            spec: draft.spec.clone(),
            quantity,
            cost_foreign,
            exchange_rate,
            cost_home: draft.computed_cost_home().unwrap_or(0.0),
            total_price,
            unit_price: total_price / f64::from(quantity),
            legacy_unit_cost: None,
            status: StatusTag::from(Status::Checking),
            is_paid: draft.is_paid,
            is_shipping_paid: draft.is_shipping_paid,
            note: draft.note.clone(),
            extra: Map::new(),
        }
    }

    /// Replace this record's editable fields with the draft's.
    ///
    /// `cost_home` is recomputed when the draft supplies both conversion
    /// inputs and held at its previous value otherwise; the status changes
    /// only when the draft carries one. `id`, `legacy_unit_cost` and `extra`
    /// always pass through.
    pub fn apply_draft(&mut self, draft: &OrderDraft) {
        let previous_cost_home = self.cost_home;
        let quantity = draft.quantity.max(1);
        let total_price = sanitize_amount(draft.total_price);
        self.date = draft.date.unwrap_or(self.date);
        self.client_code = draft.client_code.trim().to_string();
        self.store = draft.store.clone();
        self.product_name = draft.product_name.trim().to_string();
        self.spec = draft.spec.clone();
        self.quantity = quantity;
        self.cost_foreign = sanitize_amount(draft.cost_foreign);
        self.exchange_rate = sanitize_amount(draft.exchange_rate);
        self.cost_home = draft.computed_cost_home().unwrap_or(previous_cost_home);
        self.total_price = total_price;
        self.unit_price = total_price / f64::from(quantity);
        if let Some(status) = draft.status {
            self.status = StatusTag::from(status);
        }
        self.is_paid = draft.is_paid;
        self.is_shipping_paid = draft.is_shipping_paid;
        self.note = draft.note.clone();
    }

    /// Whole-line revenue: the sale total, or unit price times quantity for
    /// records that predate stored totals.
    pub fn revenue(&self) -> f64 {
        if self.total_price > 0.0 {
            self.total_price
        } else {
            self.unit_price * f64::from(self.quantity)
        }
    }

    /// Whole-line cost: the converted home total, or the pre-rework per-unit
    /// cost times quantity.
    pub fn cost(&self) -> f64 {
        if self.cost_home > 0.0 {
            self.cost_home
        } else {
            self.legacy_unit_cost.map(sanitize_amount).unwrap_or(0.0) * f64::from(self.quantity)
        }
    }

    pub fn profit(&self) -> f64 {
        self.revenue() - self.cost()
    }

    /// Workflow status with anything unrecognized read as `checking`.
    pub fn workflow_status(&self) -> Status {
        self.status.normalize()
    }
}

impl<'de> Deserialize<'de> for OrderRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        RawOrderRecord::deserialize(deserializer).map(RawOrderRecord::into_record)
    }
}

/// Wire shape accepted on decode: every era's field names, everything but
/// identity optional.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOrderRecord {
    id: OrderId,
    date: NaiveDate,
    client_code: Option<String>,
    client_name: Option<String>,
    store: Option<String>,
    product_name: Option<String>,
    spec: Option<String>,
    quantity: Option<f64>,
    cost_foreign: Option<f64>,
    #[serde(rename = "costKRW")]
    cost_krw: Option<f64>,
    exchange_rate: Option<f64>,
    cost_home: Option<f64>,
    #[serde(rename = "costTWD")]
    cost_twd: Option<f64>,
    total_price: Option<f64>,
    unit_price: Option<f64>,
    price: Option<f64>,
    cost: Option<f64>,
    status: Option<StatusTag>,
    is_paid: Option<bool>,
    is_shipping_paid: Option<bool>,
    note: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl RawOrderRecord {
    fn into_record(self) -> OrderRecord {
        let quantity = self
            .quantity
            .map(|q| if q.is_finite() && q >= 1.0 { q as u32 } else { 1 })
            .unwrap_or(1);
        let cost_foreign = sanitize_amount(self.cost_foreign.or(self.cost_krw).unwrap_or(0.0));
        let exchange_rate = sanitize_amount(self.exchange_rate.unwrap_or(0.0));
        let legacy_unit_cost = self.cost;
        let total_price = match self.total_price {
            Some(total) => sanitize_amount(total),
            None => self
                .price
                .map(|p| sanitize_amount(p) * f64::from(quantity))
                .unwrap_or(0.0),
        };
        let unit_price = match self.unit_price.or(self.price) {
            Some(unit) => sanitize_amount(unit),
            None => total_price / f64::from(quantity),
        };
        let cost_home = match self.cost_home.or(self.cost_twd) {
            Some(home) => sanitize_amount(home),
            None => match legacy_unit_cost {
                Some(unit_cost) => sanitize_amount(unit_cost) * f64::from(quantity),
                None => daigou_money::to_home(cost_foreign, exchange_rate),
            },
        };
        OrderRecord {
            id: self.id,
            date: self.date,
            client_code: self.client_code.or(self.client_name).unwrap_or_default(),
            store: self.store,
            product_name: self.product_name.unwrap_or_default(),
            spec: self.spec,
            quantity,
            cost_foreign,
            exchange_rate,
            cost_home,
            total_price,
            unit_price,
            legacy_unit_cost,
            status: self.status.unwrap_or_default(),
            is_paid: self.is_paid.unwrap_or(false),
            is_shipping_paid: self.is_shipping_paid.unwrap_or(false),
            note: self.note,
            extra: self.extra,
        }
    }
}

/// Clamp a money amount to a usable value: negative and non-finite inputs
/// read as "not supplied".
pub(crate) fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
