//! Entity definitions shared by the storage and HTTP layers.
//! - Plain serde structs; field names and timestamp encoding match the
//!   persisted document format exactly.
//! - No data-access code here; the service crate owns reads and writes.

pub mod errors;
pub mod user;
pub mod post;
pub mod document;

pub use document::Document;
pub use post::Post;
pub use user::User;
