//! Image acquisition: generate-and-store, and store-by-URL
//!
//! Images land in the textures directory under a content-hash name so the
//! same source URL is never stored twice. Files never expire.

use reqwest::Client;
use std::path::PathBuf;
use tracing::info;

use super::super::{CoreError, CoreResult};
use super::file::{cache_file_name, download_to_path};
use crate::llm::ImageModel;

/// Content-addressed image cache served under `/<subdir>/`
#[derive(Clone)]
pub struct ImageStore {
    client: Client,
    dir: PathBuf,
    url_prefix: String,
}

impl ImageStore {
    /// `dir` is where files are written; `subdir` is how they are reached
    /// from the static file root.
    pub fn new(client: Client, dir: impl Into<PathBuf>, subdir: &str) -> Self {
        Self {
            client,
            dir: dir.into(),
            url_prefix: format!("/{}", subdir.trim_matches('/')),
        }
    }

    /// Public path a given source URL is (or will be) served from
    pub fn public_path(&self, source_url: &str) -> String {
        format!("{}/{}", self.url_prefix, cache_file_name(source_url))
    }

    /// Download `source_url` into the cache and return its public path.
    ///
    /// The file is rewritten on every call; only its name is stable.
    pub async fn persist(&self, source_url: &str) -> CoreResult<String> {
        if source_url.trim().is_empty() {
            return Err(CoreError::MissingInput("imageUrl"));
        }

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| CoreError::FileWrite(self.dir.display().to_string(), e.to_string()))?;

        let local_path = self.dir.join(cache_file_name(source_url));
        download_to_path(&self.client, source_url, &local_path).await?;
        info!("Image downloaded to {}", local_path.display());

        Ok(self.public_path(source_url))
    }
}

/// Generate one image for `description` and store it locally
pub async fn generate_and_store(
    model: &dyn ImageModel,
    store: &ImageStore,
    description: &str,
) -> CoreResult<String> {
    if description.trim().is_empty() {
        return Err(CoreError::MissingInput("description"));
    }

    let source_url = model.generate_image(description).await?;
    store.persist(&source_url).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{Router, routing::get};

    async fn image_host() -> String {
        let router = Router::new().route("/art.png", get(|| async { "png-bytes" }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    struct FixedImage(String);

    #[async_trait]
    impl ImageModel for FixedImage {
        async fn generate_image(&self, _prompt: &str) -> anyhow::Result<String> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_persist_is_idempotent_in_naming() {
        let host = image_host().await;
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(Client::new(), dir.path().join("textures"), "textures");
        let url = format!("{}/art.png", host);

        let first = store.persist(&url).await.unwrap();
        let second = store.persist(&url).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first, format!("/textures/{}", cache_file_name(&url)));
        let stored = dir.path().join("textures").join(cache_file_name(&url));
        assert_eq!(tokio::fs::read_to_string(stored).await.unwrap(), "png-bytes");
    }

    #[tokio::test]
    async fn test_generate_and_store() {
        let host = image_host().await;
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(Client::new(), dir.path(), "textures");
        let model = FixedImage(format!("{}/art.png", host));

        let path = generate_and_store(&model, &store, "a cozy room").await.unwrap();
        assert_eq!(path, store.public_path(&model.0));
    }

    #[tokio::test]
    async fn test_blank_inputs_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(Client::new(), dir.path(), "textures");
        let model = FixedImage("unused".to_string());

        let err = generate_and_store(&model, &store, "  ").await.unwrap_err();
        assert!(err.is_caller_error());
        let err = store.persist("").await.unwrap_err();
        assert!(err.is_caller_error());
    }

    #[tokio::test]
    async fn test_download_failure_propagates() {
        let host = image_host().await;
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(Client::new(), dir.path(), "textures");

        let err = store.persist(&format!("{}/missing.png", host)).await.unwrap_err();
        assert!(matches!(err, CoreError::Download(..)));
    }
}
