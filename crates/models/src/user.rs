use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A registered user, keyed in the document by email.
///
/// The password is stored as given. `createdAt` is set once at creation and
/// survives updates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub created_at: DateTime<Utc>,
    pub email: String,
    pub password: String,
    pub name: String,
    pub age: i64,
}

/// Signup eligibility check. Exported as a pure validator; no route calls it.
pub fn user_is_eligible(email: &str, password: &str, age: i64) -> Result<(), ModelError> {
    if email.is_empty() {
        return Err(ModelError::Validation("email can't be empty".into()));
    }

    if password.is_empty() {
        return Err(ModelError::Validation("password can't be empty".into()));
    }

    if age < 18 {
        return Err(ModelError::Validation("age must be at least 18".into()));
    }

    Ok(())
}
