//! Storage for the service layer
//!
//! A single file-backed store holding the whole document; every operation
//! above it does a full load or a full save.

pub mod document_store;
