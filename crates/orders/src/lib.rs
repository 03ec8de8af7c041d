//! Order records, drafts, and the fulfillment status workflow.
//!
//! Pure domain logic only: no IO, no persistence concerns. Legacy field
//! normalization happens once, inside record decoding; everything downstream
//! sees the canonical shape.

pub mod draft;
pub mod record;
pub mod status;

pub use draft::OrderDraft;
pub use record::OrderRecord;
pub use status::{Status, StatusTag};
