//! Backup blob encoding and decoding.

use chrono::NaiveDate;
use thiserror::Error;

use daigou_orders::OrderRecord;

/// Error from an import/export operation.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The blob does not decode as a JSON array of record-shaped values.
    #[error("malformed backup: {0}")]
    MalformedFormat(String),

    /// The collection could not be rendered as JSON.
    #[error("failed to serialize backup: {0}")]
    Serialize(String),
}

/// Render the whole collection as a pretty-printed (2-space indent) JSON
/// array, every field verbatim.
pub fn export_blob(records: &[OrderRecord]) -> Result<String, TransferError> {
    serde_json::to_string_pretty(records).map_err(|e| TransferError::Serialize(e.to_string()))
}

/// Decode a backup blob into records.
///
/// Legacy field names are accepted and normalized per record; unknown fields
/// are kept verbatim. Anything else, from syntax errors to a top-level
/// object, is [`TransferError::MalformedFormat`], and the caller must leave
/// its ledger untouched. Import is always a full overwrite; confirmation
/// belongs to the caller, before it hands the records to the ledger.
pub fn import_blob(blob: &str) -> Result<Vec<OrderRecord>, TransferError> {
    serde_json::from_str(blob).map_err(|e| TransferError::MalformedFormat(e.to_string()))
}

/// Conventional backup file name for a given day, e.g.
/// `daigou_backup_2024-03-15.json`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("daigou_backup_{}.json", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use daigou_core::OrderId;
    use daigou_orders::{OrderDraft, Status, StatusTag};
    use proptest::prelude::*;
    use serde_json::json;

    fn sample_records() -> Vec<OrderRecord> {
        serde_json::from_value(json!([
            {
                "id": 1_700_000_000_123i64,
                "date": "2024-03-15",
                "clientCode": "A123",
                "productName": "保濕面霜",
                "quantity": 2,
                "costForeign": 100_000.0,
                "exchangeRate": 40.0,
                "costHome": 2500.0,
                "totalPrice": 3000.0,
                "unitPrice": 1500.0,
                "status": "shipped_kr",
                "isPaid": true,
                "isShippingPaid": false,
                "memo": "面交時段晚上"
            },
            {
                "id": 1_690_000_000_000i64,
                "date": "2023-11-02",
                "clientName": "B777",
                "productName": "氣墊粉餅",
                "price": 1500.0,
                "quantity": 2,
                "cost": 250.0,
                "status": "on_hold"
            }
        ]))
        .unwrap()
    }

    #[test]
    fn export_then_import_reproduces_every_field() {
        let records = sample_records();
        let blob = export_blob(&records).unwrap();
        let imported = import_blob(&blob).unwrap();
        assert_eq!(imported, records);
    }

    #[test]
    fn export_pretty_prints_an_array() {
        let blob = export_blob(&sample_records()).unwrap();
        assert!(blob.starts_with("[\n  {"));
        assert!(blob.contains("\n    \"clientCode\": \"A123\""));
    }

    #[test]
    fn exported_blob_keeps_unknown_fields_and_status_strings() {
        let blob = export_blob(&sample_records()).unwrap();
        assert!(blob.contains("面交時段晚上"));
        assert!(blob.contains("\"on_hold\""));
    }

    #[test]
    fn import_normalizes_legacy_blobs() {
        let blob = r#"[
            {
                "id": 1690000000000,
                "date": "2023-11-02",
                "clientName": "B777",
                "productName": "氣墊粉餅",
                "price": 1500,
                "quantity": 2,
                "cost": 250,
                "status": "on_hold"
            }
        ]"#;
        let imported = import_blob(blob).unwrap();
        let legacy = &imported[0];
        assert_eq!(legacy.client_code, "B777");
        assert_eq!(legacy.total_price, 3000.0);
        assert_eq!(legacy.unit_price, 1500.0);
        assert_eq!(legacy.cost_home, 500.0);
        assert_eq!(legacy.status, StatusTag::Unknown("on_hold".to_string()));
    }

    #[test]
    fn empty_array_imports_as_empty_collection() {
        assert_eq!(import_blob("[]").unwrap(), Vec::<OrderRecord>::new());
    }

    #[test]
    fn garbage_is_malformed() {
        for blob in [
            "definitely not json",
            "{\"orders\": []}",
            "[1, 2, 3]",
            "[{\"clientCode\": \"A123\"}]",
            "[] trailing",
            "",
        ] {
            let err = import_blob(blob).unwrap_err();
            assert!(
                matches!(err, TransferError::MalformedFormat(_)),
                "expected malformed for {blob:?}"
            );
        }
    }

    #[test]
    fn backup_file_name_carries_the_date() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(backup_file_name(date), "daigou_backup_2024-03-15.json");
    }

    fn arb_record() -> impl Strategy<Value = OrderRecord> {
        (
            1_000_000_000_000i64..2_000_000_000_000i64,
            (2020i32..2027, 1u32..13, 1u32..29),
            "[A-Z][0-9]{3}",
            "[a-z]{1,12}",
            1u32..9,
            0f64..1_000_000f64,
            0f64..100f64,
            1f64..100_000f64,
            any::<bool>(),
            0usize..13,
        )
            .prop_map(
                |(id, (y, m, d), client, product, quantity, foreign, rate, total, paid, status_pick)| {
                    let draft = OrderDraft {
                        client_code: client,
                        product_name: product,
                        quantity,
                        cost_foreign: foreign,
                        exchange_rate: rate,
                        total_price: total,
                        is_paid: paid,
                        ..OrderDraft::default()
                    };
                    let date = chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap();
                    let mut record =
                        OrderRecord::from_draft(OrderId::from_millis(id), date, &draft);
                    record.status = match status_pick {
                        11 => StatusTag::Unknown("x_archived".to_string()),
                        12 => StatusTag::Unknown("x_hold".to_string()),
                        i => StatusTag::from(Status::ALL[i]),
                    };
                    record
                },
            )
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: export/import round-trips any collection field-for-field.
        #[test]
        fn round_trip_is_lossless(records in prop::collection::vec(arb_record(), 0..20)) {
            let blob = export_blob(&records).unwrap();
            let imported = import_blob(&blob).unwrap();
            prop_assert_eq!(imported, records);
        }
    }
}
