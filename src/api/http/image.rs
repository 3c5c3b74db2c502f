// src/api/http/image.rs
// Image generation, image search, and download-by-URL

use axum::{Json, extract::State};
use tracing::info;

use super::LenientJson;
use crate::api::error::{ApiResult, IntoApiErrorOption, core_error};
use crate::api::types::{
    DownloadImageRequest, ImagePathResponse, ImageRequest, ImageSearchRequest, ImageSearchResponse,
};
use crate::core::ops::{image, web};
use crate::state::AppState;

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub async fn image_handler(
    State(state): State<AppState>,
    LenientJson(request): LenientJson<ImageRequest>,
) -> ApiResult<Json<ImagePathResponse>> {
    let description = non_empty(request.description).ok_or_bad_request("Description is required")?;

    let image_path = image::generate_and_store(&*state.image_model, &state.images, &description)
        .await
        .map_err(|e| core_error("Failed to generate image", e))?;

    info!("Image generated at {}", image_path);
    Ok(Json(ImagePathResponse { image_path }))
}

pub async fn google_search_handler(
    State(state): State<AppState>,
    LenientJson(request): LenientJson<ImageSearchRequest>,
) -> ApiResult<Json<ImageSearchResponse>> {
    let search_term = non_empty(request.search_term).ok_or_bad_request("Search term is required")?;
    let (api_key, cx) = state
        .config
        .google_credentials()
        .ok_or_bad_request("Google API key and search engine ID are required")?;

    let input = web::ImageSearchInput {
        query: search_term,
        page: request.page.unwrap_or(1),
        google_api_key: api_key.to_string(),
        google_cx: cx.to_string(),
    };

    let output = web::image_search(&state.http, &state.config.google_search_url, &input)
        .await
        .map_err(|e| core_error("Failed to search images", e))?;

    Ok(Json(ImageSearchResponse {
        image_urls: output.image_urls,
        total_pages: output.total_pages,
    }))
}

pub async fn download_image_handler(
    State(state): State<AppState>,
    LenientJson(request): LenientJson<DownloadImageRequest>,
) -> ApiResult<Json<ImagePathResponse>> {
    let image_url = non_empty(request.image_url).ok_or_bad_request("Image URL is required")?;

    let image_path = state
        .images
        .persist(&image_url)
        .await
        .map_err(|e| core_error("Failed to download image", e))?;

    Ok(Json(ImagePathResponse { image_path }))
}
