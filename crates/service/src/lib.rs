//! Persistence layer for the flat-file document.
//! - `storage` owns loading and saving the document as a whole.
//! - `repository` implements the entity-level operations on top of it.
//! - Error messages here go out on the wire unchanged, so their wording is
//!   part of the API.

pub mod errors;
pub mod storage;
pub mod repository;
