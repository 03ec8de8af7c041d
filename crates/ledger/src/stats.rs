//! Aggregate statistics over a record set.

use std::collections::BTreeMap;

use serde::Serialize;

use daigou_orders::{OrderRecord, Status};

/// Financial and operational summary of a set of records.
///
/// Derived on demand and never persisted; callers recompute instead of
/// caching. Sums are order-independent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Sum of whole-line sale amounts.
    pub total_revenue: f64,
    /// Sum of whole-line home-currency costs.
    pub total_cost: f64,
    /// Revenue still owed by clients (goods payment not received).
    pub total_unpaid: f64,
    pub net_profit: f64,
    /// Net profit as a percentage of revenue, one decimal; 0 when there is
    /// no revenue.
    pub profit_margin_pct: f64,
    pub order_count: usize,
    /// Records per workflow status, unrecognized tags counted as `checking`.
    /// Absent statuses have no entry.
    pub status_counts: BTreeMap<Status, usize>,
}

impl Statistics {
    pub fn from_records(records: &[OrderRecord]) -> Self {
        let mut total_revenue = 0.0;
        let mut total_cost = 0.0;
        let mut total_unpaid = 0.0;
        let mut status_counts: BTreeMap<Status, usize> = BTreeMap::new();

        for record in records {
            let revenue = record.revenue();
            total_revenue += revenue;
            total_cost += record.cost();
            if !record.is_paid {
                total_unpaid += revenue;
            }
            *status_counts.entry(record.workflow_status()).or_insert(0) += 1;
        }

        let net_profit = total_revenue - total_cost;
        let profit_margin_pct = if total_revenue > 0.0 {
            round_to_tenth(net_profit / total_revenue * 100.0)
        } else {
            0.0
        };

        Self {
            total_revenue,
            total_cost,
            total_unpaid,
            net_profit,
            profit_margin_pct,
            order_count: records.len(),
            status_counts,
        }
    }

    /// Count for one status, zero when absent.
    pub fn count_for(&self, status: Status) -> usize {
        self.status_counts.get(&status).copied().unwrap_or(0)
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
