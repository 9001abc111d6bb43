use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes::{self, ServerState};
use service::{repository::Repository, storage::document_store::DocumentStore};

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Isolated scratch document per test run
    let path = std::env::temp_dir().join(format!("e2e_{}.json", Uuid::new_v4()));
    let store = DocumentStore::new(&path);
    store.ensure().await?;

    let state = ServerState {
        repo: Arc::new(Repository::new(store)),
    };

    let app: Router = routes::build_router(CorsLayer::very_permissive(), state);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_user_crud() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // Create: 201 echoing the submitted params, no createdAt
    let res = c
        .post(format!("{}/users", app.base_url))
        .json(&json!({"email": "test@example.com", "password": "password", "name": "john doe", "age": 18}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["email"], "test@example.com");
    assert_eq!(body["password"], "password");
    assert!(body.get("createdAt").is_none());

    // Duplicate create fails with the repository message
    let res = c
        .post(format!("{}/users", app.base_url))
        .json(&json!({"email": "test@example.com", "password": "x", "name": "x", "age": 30}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "user already exists");

    // Get: full entity including createdAt
    let res = c
        .get(format!("{}/users/test@example.com", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let fetched = res.json::<serde_json::Value>().await?;
    assert_eq!(fetched["name"], "john doe");
    assert_eq!(fetched["age"], 18);
    let created_at = fetched["createdAt"].as_str().expect("createdAt").to_string();

    // Update: replaces fields, createdAt untouched
    let res = c
        .put(format!("{}/users/test@example.com", app.base_url))
        .json(&json!({"password": "newpass", "name": "johnny", "age": 19}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let updated = res.json::<serde_json::Value>().await?;
    assert_eq!(updated["name"], "johnny");
    assert_eq!(updated["age"], 19);
    assert_eq!(updated["createdAt"], created_at.as_str());

    // Delete: 200 with an empty object
    let res = c
        .delete(format!("{}/users/test@example.com", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!({}));

    // Gone afterwards
    let res = c
        .get(format!("{}/users/test@example.com", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "user doesn't exist");

    Ok(())
}

#[tokio::test]
async fn e2e_posts_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let _ = c
        .post(format!("{}/users", app.base_url))
        .json(&json!({"email": "test@example.com", "password": "password", "name": "john doe", "age": 18}))
        .send()
        .await?;

    // No posts yet is an error, not an empty list
    let res = c
        .get(format!("{}/posts/test@example.com", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "user has no posts");

    // Create two posts; 201 echoes the input, without id/createdAt
    for text in ["my cat is way too fat", "my cat is getting skinny now"] {
        let res = c
            .post(format!("{}/posts", app.base_url))
            .json(&json!({"userEmail": "test@example.com", "text": text}))
            .send()
            .await?;
        assert_eq!(res.status(), reqwest::StatusCode::CREATED);
        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["userEmail"], "test@example.com");
        assert_eq!(body["text"], text);
        assert!(body.get("id").is_none());
    }

    // Both come back, order unspecified
    let res = c
        .get(format!("{}/posts/test@example.com", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let posts = res.json::<Vec<serde_json::Value>>().await?;
    assert_eq!(posts.len(), 2);
    let first_id = posts[0]["id"].as_str().expect("id").to_string();
    let second_id = posts[1]["id"].as_str().expect("id").to_string();

    // Delete one, the other remains
    let res = c
        .delete(format!("{}/posts/{}", app.base_url, first_id))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!({}));

    let res = c
        .get(format!("{}/posts/test@example.com", app.base_url))
        .send()
        .await?;
    let posts = res.json::<Vec<serde_json::Value>>().await?;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["id"], second_id.as_str());

    // Delete the last one; back to the no-posts error
    let res = c
        .delete(format!("{}/posts/{}", app.base_url, second_id))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);

    let res = c
        .get(format!("{}/posts/test@example.com", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "user has no posts");

    Ok(())
}

#[tokio::test]
async fn e2e_posts_survive_user_deletion() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let _ = c
        .post(format!("{}/users", app.base_url))
        .json(&json!({"email": "gone@example.com", "password": "pw", "name": "gone", "age": 40}))
        .send()
        .await?;
    let _ = c
        .post(format!("{}/posts", app.base_url))
        .json(&json!({"userEmail": "gone@example.com", "text": "left behind"}))
        .send()
        .await?;

    let res = c
        .get(format!("{}/posts/gone@example.com", app.base_url))
        .send()
        .await?;
    let posts = res.json::<Vec<serde_json::Value>>().await?;
    let post_id = posts[0]["id"].as_str().expect("id").to_string();

    let res = c
        .delete(format!("{}/users/gone@example.com", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);

    // Listing by the deleted user now fails on the existence check...
    let res = c
        .get(format!("{}/posts/gone@example.com", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "user doesn't exist");

    // ...but the orphaned post is still deletable by id
    let res = c
        .delete(format!("{}/posts/{}", app.base_url, post_id))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn e2e_unsupported_methods_and_bad_bodies() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // PUT /posts has no operation behind it
    let res = c
        .put(format!("{}/posts", app.base_url))
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "method not supported");

    // Unrecognized verb on a known path
    let res = c
        .patch(format!("{}/users/test@example.com", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "method not supported");

    // Malformed body: 400 carrying the decode error message
    let res = c
        .post(format!("{}/users", app.base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert!(!body["error"].as_str().expect("error message").is_empty());

    // Creating a post for an unknown user surfaces the repository message
    let res = c
        .post(format!("{}/posts", app.base_url))
        .json(&json!({"userEmail": "nobody@example.com", "text": "hello"}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "user doesn't exist");

    Ok(())
}
