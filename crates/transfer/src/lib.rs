//! Whole-ledger backup import/export.
//!
//! The backup format is a plain JSON array of order records, readable and
//! hand-editable. Import is strict about shape and a full overwrite by
//! contract; it never merges.

pub mod blob;

pub use blob::{backup_file_name, export_blob, import_blob, TransferError};
