// src/api/http/mod.rs

mod chat;
mod extract;
mod handlers;
mod image;
mod router;

pub use chat::chat_handler;
pub use extract::LenientJson;
pub use handlers::{root_handler, voices_handler};
pub use image::{download_image_handler, google_search_handler, image_handler};
pub use router::http_router;
