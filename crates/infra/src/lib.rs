//! Infrastructure layer: file-backed persistence for the ledger.

pub mod json_store;


pub use json_store::{default_data_file, JsonFileStore};
