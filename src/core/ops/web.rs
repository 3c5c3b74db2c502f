//! Image search via the Google Custom Search JSON API

use reqwest::Client;
use serde::Deserialize;

use super::super::{CoreError, CoreResult};

/// Results requested per page, which is also the API's maximum
pub const RESULTS_PER_PAGE: u32 = 10;

// ============================================================================
// Input/Output Types
// ============================================================================

pub struct ImageSearchInput {
    pub query: String,
    /// 1-based page number; 0 is treated as 1
    pub page: u32,
    pub google_api_key: String,
    pub google_cx: String,
}

#[derive(Debug, PartialEq)]
pub struct ImageSearchOutput {
    pub image_urls: Vec<String>,
    pub total_pages: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleResponse {
    search_information: Option<SearchInformation>,
    items: Option<Vec<GoogleItem>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchInformation {
    total_results: Option<String>,
}

#[derive(Deserialize)]
struct GoogleItem {
    link: String,
}

// ============================================================================
// Operations
// ============================================================================

/// 1-based index of the first result on `page`
pub fn start_offset(page: u32) -> u32 {
    page.max(1).saturating_sub(1).saturating_mul(RESULTS_PER_PAGE).saturating_add(1)
}

/// Number of pages needed to show `total_results`
pub fn total_pages(total_results: u64) -> u64 {
    total_results.div_ceil(RESULTS_PER_PAGE as u64)
}

/// Query `endpoint` for image results on the requested page
pub async fn image_search(
    client: &Client,
    endpoint: &str,
    input: &ImageSearchInput,
) -> CoreResult<ImageSearchOutput> {
    let start = start_offset(input.page);
    let search_err = |msg: String| CoreError::WebSearch(input.query.clone(), msg);

    let response = client
        .get(endpoint)
        .query(&[
            ("key", input.google_api_key.as_str()),
            ("cx", input.google_cx.as_str()),
            ("q", input.query.as_str()),
            ("searchType", "image"),
        ])
        .query(&[("start", start), ("num", RESULTS_PER_PAGE)])
        .send()
        .await
        .map_err(|e| search_err(e.to_string()))?;

    if !response.status().is_success() {
        return Err(search_err(format!("Google API error: {}", response.status())));
    }

    let result: GoogleResponse = response
        .json()
        .await
        .map_err(|e| search_err(e.to_string()))?;

    // totalResults comes back as a decimal string
    let total_results = result
        .search_information
        .and_then(|info| info.total_results)
        .and_then(|total| total.trim().parse::<u64>().ok())
        .unwrap_or(0);

    Ok(ImageSearchOutput {
        image_urls: result
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|item| item.link)
            .collect(),
        total_pages: total_pages(total_results),
    })
}
