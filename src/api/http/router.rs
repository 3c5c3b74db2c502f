// src/api/http/router.rs
// HTTP router composition: API routes, static files, CORS and request tracing

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::{
    chat_handler, download_image_handler, google_search_handler, image_handler, root_handler,
    voices_handler,
};
use crate::state::AppState;

/// Full application router.
///
/// Anything not matched by an API route is looked up under the public
/// directory, which is also where cached textures are written.
pub fn http_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let static_files = ServeDir::new(&state.config.public_dir);

    Router::new()
        .route("/", get(root_handler))
        .route("/voices", get(voices_handler))
        .route("/chat", post(chat_handler))
        .route("/image", post(image_handler))
        .route("/googleSearch", post(google_search_handler))
        .route("/downloadImage", post(download_image_handler))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
