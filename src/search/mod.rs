// src/search/mod.rs
pub mod client;
pub mod types;

pub use client::GoogleSearchClient;
pub use types::{SearchItem, SearchResponse};
