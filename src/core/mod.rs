//! Core operations behind the HTTP surface
//!
//! ```text
//!   api::http (routing glue)
//!        │
//!   ops::dialogue ──► llm / services (model, speech)
//!        │       └──► ops::lipsync ──► ops::shell
//!        └──────────► ops::file
//!   ops::image ─────► ops::file
//!   ops::web   (image search)
//! ```
//!
//! Everything here awaits strictly in sequence; nothing is spawned.

mod error;
pub mod ops;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use types::{Animation, FacialExpression, ReplyMessage};
