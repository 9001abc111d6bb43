use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post, keyed in the document by its generated id.
///
/// `userEmail` is checked against the users map only at creation time;
/// deleting the user leaves the post behind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub user_email: String,
    pub text: String,
}
