//! Core utilities for the Action Scout CLI
//!
//! This module consolidates common utilities that are used across
//! the application:
//! - `cache`: TTL caching and cache-directory locations
//! - `config`: Endpoint, limit and credential configuration
//! - `http`: Client construction and auth headers

pub mod cache;
pub mod config;
pub mod http;

// Re-export commonly used items for convenience
pub use cache::{app_cache_dir, TtlCache};
pub use config::{OfficialCredentials, ScoutConfig};
pub use http::{build_client, with_official_auth};
