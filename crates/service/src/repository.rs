use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::storage::document_store::DocumentStore;
use models::{Post, User};

/// Entity-level operations on top of the document store.
///
/// Every operation is a full read, an in-memory mutation, and a full write.
/// Nothing is atomic across concurrent callers; two racing requests can lose
/// one another's changes.
#[derive(Clone)]
pub struct Repository {
    store: Arc<DocumentStore>,
}

impl Repository {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Insert a new user keyed by email; the email must not be taken.
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        name: &str,
        age: i64,
    ) -> Result<User, ServiceError> {
        let mut doc = self.store.read().await?;

        if doc.users.contains_key(email) {
            return Err(ServiceError::AlreadyExists);
        }

        let user = User {
            created_at: Utc::now(),
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            age,
        };
        doc.users.insert(user.email.clone(), user.clone());

        self.store.write(&doc).await?;
        Ok(user)
    }

    pub async fn get_user(&self, email: &str) -> Result<User, ServiceError> {
        let doc = self.store.read().await?;
        doc.users
            .get(email)
            .cloned()
            .ok_or(ServiceError::NotFound("user"))
    }

    /// Replace password/name/age; `createdAt` keeps its original value.
    pub async fn update_user(
        &self,
        email: &str,
        password: &str,
        name: &str,
        age: i64,
    ) -> Result<User, ServiceError> {
        let mut doc = self.store.read().await?;

        let existing = doc
            .users
            .get_mut(email)
            .ok_or(ServiceError::NotFound("user"))?;
        existing.password = password.to_string();
        existing.name = name.to_string();
        existing.age = age;
        let updated = existing.clone();

        self.store.write(&doc).await?;
        Ok(updated)
    }

    /// Remove the user entry. Posts referencing this email are left alone.
    pub async fn delete_user(&self, email: &str) -> Result<(), ServiceError> {
        let mut doc = self.store.read().await?;

        if doc.users.remove(email).is_none() {
            return Err(ServiceError::NotFound("user"));
        }

        self.store.write(&doc).await
    }

    /// Insert a post for an existing user, with a generated id.
    pub async fn create_post(&self, user_email: &str, text: &str) -> Result<Post, ServiceError> {
        let mut doc = self.store.read().await?;

        if !doc.users.contains_key(user_email) {
            return Err(ServiceError::NotFound("user"));
        }

        let post = Post {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            user_email: user_email.to_string(),
            text: text.to_string(),
        };
        doc.posts.insert(post.id.clone(), post.clone());

        self.store.write(&doc).await?;
        Ok(post)
    }

    /// All posts belonging to the user, in map order. A user with no posts
    /// is an error, not an empty list.
    pub async fn get_posts_by_user(&self, user_email: &str) -> Result<Vec<Post>, ServiceError> {
        let doc = self.store.read().await?;

        if !doc.users.contains_key(user_email) {
            return Err(ServiceError::NotFound("user"));
        }

        let posts: Vec<Post> = doc
            .posts
            .values()
            .filter(|post| post.user_email == user_email)
            .cloned()
            .collect();

        if posts.is_empty() {
            return Err(ServiceError::Empty);
        }

        Ok(posts)
    }

    pub async fn delete_post(&self, id: &str) -> Result<(), ServiceError> {
        let mut doc = self.store.read().await?;

        if doc.posts.remove(id).is_none() {
            return Err(ServiceError::NotFound("post"));
        }

        self.store.write(&doc).await
    }
}
