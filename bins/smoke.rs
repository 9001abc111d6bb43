//! Sequential smoke run of the repository against a scratch document.
//! Exercises the full user/post lifecycle without going through HTTP.

use anyhow::ensure;
use tracing::info;
use uuid::Uuid;

use service::{repository::Repository, storage::document_store::DocumentStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    common::utils::logging::init_logging_default();

    let path = std::env::temp_dir().join(format!("flatfile_smoke_{}.json", Uuid::new_v4()));
    let store = DocumentStore::new(&path);
    store.ensure().await?;
    let repo = Repository::new(store);

    let user = repo.create_user("test@example.com", "password", "john doe", 18).await?;
    info!(email = %user.email, "user created");

    let updated = repo.update_user("test@example.com", "password", "john doe", 18).await?;
    info!(email = %updated.email, "user updated");

    let fetched = repo.get_user("test@example.com").await?;
    info!(email = %fetched.email, name = %fetched.name, "user fetched");

    repo.delete_user("test@example.com").await?;
    info!("user deleted");

    ensure!(
        repo.get_user("test@example.com").await.is_err(),
        "shouldn't be able to get user that was deleted"
    );
    info!("user confirmed deleted");

    let user = repo.create_user("test@example.com", "password", "john doe", 18).await?;
    info!(email = %user.email, "user recreated");

    let post = repo.create_post("test@example.com", "my cat is way too fat").await?;
    info!(id = %post.id, "post created");

    let second_post = repo
        .create_post("test@example.com", "my cat is getting skinny now")
        .await?;
    info!(id = %second_post.id, "second post created");

    let posts = repo.get_posts_by_user("test@example.com").await?;
    info!(count = posts.len(), "posts fetched");

    repo.delete_post(&post.id).await?;
    info!(id = %post.id, "first post deleted");

    let posts = repo.get_posts_by_user("test@example.com").await?;
    info!(count = posts.len(), "posts fetched");

    repo.delete_post(&second_post.id).await?;
    info!(id = %second_post.id, "second post deleted");

    ensure!(
        repo.get_posts_by_user("test@example.com").await.is_err(),
        "shouldn't be able to get posts when user has none"
    );
    info!("user has no remaining posts");

    repo.delete_user("test@example.com").await?;
    info!("user re-deleted");

    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}
