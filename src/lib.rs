// src/lib.rs

pub mod api;
pub mod config;
pub mod core;
pub mod llm;
pub mod services;
pub mod state;
