// src/vybe/mod.rs
pub mod client;
pub mod config;
pub mod models;
pub mod rate_limit;

pub use client::{DataProvider, VybeClient};
pub use config::Config;
pub use rate_limit::TokenBucket;
