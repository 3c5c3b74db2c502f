//! File store gateway
//!
//! Whole-file reads of generated audio and transcripts, content-hash naming
//! for cached images, and streaming of upstream bodies to disk.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use futures::StreamExt;
use reqwest::{Client, Response};
use serde_json::Value;
use std::path::Path;
use tokio::io::AsyncWriteExt;

use super::super::{CoreError, CoreResult};

/// Extension given to every cached image, whatever the source format.
pub const CACHED_IMAGE_EXTENSION: &str = "png";

/// Read a file fully and return it base64-encoded
pub async fn read_base64(path: &Path) -> CoreResult<String> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|e| CoreError::FileRead(path.display().to_string(), e.to_string()))?;
    Ok(BASE64.encode(data))
}

/// Read a file fully and parse it as JSON
pub async fn read_json(path: &Path) -> CoreResult<Value> {
    let data = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CoreError::FileRead(path.display().to_string(), e.to_string()))?;
    serde_json::from_str(&data)
        .map_err(|e| CoreError::InvalidJson(path.display().to_string(), e.to_string()))
}

/// Stable file name for a remote asset: md5 hex digest of the URL.
///
/// Hash collisions are not handled.
pub fn cache_file_name(url: &str) -> String {
    format!("{:x}.{}", md5::compute(url), CACHED_IMAGE_EXTENSION)
}

/// GET `url` and stream the body to `path`
pub async fn download_to_path(client: &Client, url: &str, path: &Path) -> CoreResult<()> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| CoreError::Download(url.to_string(), e.to_string()))?;

    if !response.status().is_success() {
        return Err(CoreError::Download(
            url.to_string(),
            format!("HTTP {}", response.status().as_u16()),
        ));
    }

    stream_response_to_path(response, path).await
}

/// Stream an upstream body to `path`, resolving once the file is flushed.
///
/// The status is not checked here; callers decide what counts as success.
/// A failed transfer removes the partial file.
pub async fn stream_response_to_path(response: Response, path: &Path) -> CoreResult<()> {
    let result = write_body(response, path).await;
    if result.is_err() {
        let _ = tokio::fs::remove_file(path).await;
    }
    result
}

async fn write_body(response: Response, path: &Path) -> CoreResult<()> {
    let source = response.url().to_string();
    let write_err = |e: std::io::Error| CoreError::FileWrite(path.display().to_string(), e.to_string());

    let mut file = tokio::fs::File::create(path).await.map_err(write_err)?;
    let mut body = response.bytes_stream();

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| CoreError::Download(source.clone(), e.to_string()))?;
        file.write_all(&chunk).await.map_err(write_err)?;
    }

    file.flush().await.map_err(write_err)?;
    Ok(())
}
