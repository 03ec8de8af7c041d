//! Fulfillment status workflow.
//!
//! The vocabulary is fixed and strictly ordered, tracking an order from
//! client confirmation through Korean-side purchase and shipping to Taiwan
//! arrival and handover. Identifiers are stable wire values; renaming one is
//! a data migration, not an edit here.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use daigou_core::DomainError;

/// One step of the fulfillment workflow, in workflow order.
///
/// `Ord` follows declaration order, so comparing two statuses compares
/// workflow progress. The workflow is advisory: steps may be skipped or
/// revisited, and nothing here restricts transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Checking,
    Paid,
    Verified,
    OrderedKr,
    ShippedKr,
    Consolidation,
    ArrivedTw,
    Sorting,
    Pickup,
    ShippedTw,
    Completed,
}

impl Status {
    /// Every status, in workflow order.
    pub const ALL: [Status; 11] = [
        Status::Checking,
        Status::Paid,
        Status::Verified,
        Status::OrderedKr,
        Status::ShippedKr,
        Status::Consolidation,
        Status::ArrivedTw,
        Status::Sorting,
        Status::Pickup,
        Status::ShippedTw,
        Status::Completed,
    ];

    /// Stable wire identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Checking => "checking",
            Status::Paid => "paid",
            Status::Verified => "verified",
            Status::OrderedKr => "ordered_kr",
            Status::ShippedKr => "shipped_kr",
            Status::Consolidation => "consolidation",
            Status::ArrivedTw => "arrived_tw",
            Status::Sorting => "sorting",
            Status::Pickup => "pickup",
            Status::ShippedTw => "shipped_tw",
            Status::Completed => "completed",
        }
    }

    /// Display label shown to operators.
    pub fn label(self) -> &'static str {
        match self {
            Status::Checking => "確認中",
            Status::Paid => "已匯款",
            Status::Verified => "對帳完成",
            Status::OrderedKr => "韓國端下單",
            Status::ShippedKr => "韓國端出貨",
            Status::Consolidation => "待集運回台",
            Status::ArrivedTw => "已抵台",
            Status::Sorting => "抵台整理中",
            Status::Pickup => "待面交",
            Status::ShippedTw => "已寄出",
            Status::Completed => "訂單完成",
        }
    }

    /// Icon tag associated with the status in client UIs.
    pub fn icon(self) -> &'static str {
        match self {
            Status::Checking => "clock",
            Status::Paid => "credit-card",
            Status::Verified => "check-circle",
            Status::OrderedKr => "shopping-bag",
            Status::ShippedKr => "truck",
            Status::Consolidation => "package",
            Status::ArrivedTw => "plane",
            Status::Sorting => "clipboard-list",
            Status::Pickup => "users",
            Status::ShippedTw => "send",
            Status::Completed => "check-circle",
        }
    }

    /// Zero-based position in the workflow.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// `completed` ends the active lifecycle; nothing leaves it automatically.
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Completed)
    }
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::unrecognized_status(s))
    }
}

/// Status as stored on a record.
///
/// Legacy data may carry strings outside today's vocabulary. Those are kept
/// verbatim so a record round-trips untouched, and [`StatusTag::normalize`]
/// maps them to [`Status::Checking`] wherever a real status is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusTag {
    Known(Status),
    Unknown(String),
}

impl StatusTag {
    /// Resolve to a workflow status, mapping anything unrecognized to
    /// `checking`. Idempotent.
    pub fn normalize(&self) -> Status {
        match self {
            StatusTag::Known(status) => *status,
            StatusTag::Unknown(raw) => raw.parse().unwrap_or(Status::Checking),
        }
    }

    /// The stored wire string, recognized or not.
    pub fn as_str(&self) -> &str {
        match self {
            StatusTag::Known(status) => status.as_str(),
            StatusTag::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, StatusTag::Known(_))
    }
}

impl Default for StatusTag {
    fn default() -> Self {
        StatusTag::Known(Status::Checking)
    }
}

impl From<Status> for StatusTag {
    fn from(status: Status) -> Self {
        StatusTag::Known(status)
    }
}

impl core::fmt::Display for StatusTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn vocabulary_has_stable_identifiers_in_workflow_order() {
        let ids: Vec<&str> = Status::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "checking",
                "paid",
                "verified",
                "ordered_kr",
                "shipped_kr",
                "consolidation",
                "arrived_tw",
                "sorting",
                "pickup",
                "shipped_tw",
                "completed",
            ]
        );
    }

    #[test]
    fn every_identifier_parses_back_to_its_status() {
        for status in Status::ALL {
            let parsed: Status = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn unknown_identifier_is_rejected_with_the_offending_value() {
        let err = "on_hold".parse::<Status>().unwrap_err();
        assert_eq!(err, DomainError::UnrecognizedStatus("on_hold".to_string()));
    }

    #[test]
    fn ordering_follows_the_workflow() {
        assert!(Status::Checking < Status::Paid);
        assert!(Status::ShippedTw < Status::Completed);
        for (i, status) in Status::ALL.iter().enumerate() {
            assert_eq!(status.ordinal(), i);
        }
    }

    #[test]
    fn only_completed_is_terminal() {
        for status in Status::ALL {
            assert_eq!(status.is_terminal(), status == Status::Completed);
        }
    }

    #[test]
    fn labels_and_icons_are_wired_up() {
        assert_eq!(Status::Checking.label(), "確認中");
        assert_eq!(Status::Checking.icon(), "clock");
        assert_eq!(Status::Paid.icon(), "credit-card");
        assert_eq!(Status::Completed.label(), "訂單完成");
        assert_eq!(Status::Completed.icon(), "check-circle");
    }

    #[test]
    fn status_serializes_as_its_identifier() {
        let json = serde_json::to_string(&Status::OrderedKr).unwrap();
        assert_eq!(json, "\"ordered_kr\"");
        let back: Status = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Status::OrderedKr);
    }

    #[test]
    fn tag_decodes_known_strings_as_statuses() {
        let tag: StatusTag = serde_json::from_str("\"shipped_kr\"").unwrap();
        assert_eq!(tag, StatusTag::Known(Status::ShippedKr));
        assert!(tag.is_known());
    }

    #[test]
    fn tag_keeps_unknown_strings_verbatim() {
        let tag: StatusTag = serde_json::from_str("\"on_hold\"").unwrap();
        assert_eq!(tag, StatusTag::Unknown("on_hold".to_string()));
        assert!(!tag.is_known());
        assert_eq!(serde_json::to_string(&tag).unwrap(), "\"on_hold\"");
        assert_eq!(tag.normalize(), Status::Checking);
    }

    #[test]
    fn default_tag_is_checking() {
        assert_eq!(StatusTag::default().normalize(), Status::Checking);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: normalizing any stored status string is idempotent and
        /// lands inside the vocabulary.
        #[test]
        fn normalization_is_idempotent_for_any_string(raw in ".*") {
            let tag: StatusTag = serde_json::from_value(serde_json::Value::String(raw)).unwrap();
            let once = tag.normalize();
            let twice = StatusTag::from(once).normalize();
            prop_assert_eq!(once, twice);
            prop_assert!(Status::ALL.contains(&once));
        }
    }
}
