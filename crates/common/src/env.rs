//! Environment/runtime helpers
//!
//! Sanity checks to ensure the document's directory exists at startup.

/// Create the parent directory of the backing document if it has one.
pub async fn ensure_env(document_path: &str) -> anyhow::Result<()> {
    if let Some(parent) = std::path::Path::new(document_path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
