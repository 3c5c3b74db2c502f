//! Core operations
//!
//! - Operations return `CoreResult<T>`
//! - Input/output types live in each module
//! - No axum types allowed here

pub mod dialogue;
pub mod file;
pub mod image;
pub mod lipsync;
pub mod shell;
pub mod web;
