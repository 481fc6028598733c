pub mod analysis;
pub mod app_state;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod generation;
pub mod health;
pub mod lessons;
pub mod openapi;
pub mod pipeline;
