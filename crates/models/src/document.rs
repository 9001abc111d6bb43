use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{post::Post, user::User};

/// The entire persisted state: every user keyed by email, every post keyed
/// by id. Loaded and saved in full on each operation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub users: HashMap<String, User>,
    #[serde(default)]
    pub posts: HashMap<String, Post>,
}
