//! # Nexus Mods API Rust Client
//!
//! An async client for the [Nexus Mods](https://www.nexusmods.com) v1 REST
//! API, handling authentication headers, rate limits and JSON decoding.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`NexusConfig`] and [`NexusConfigBuilder`]
//! - Validated newtypes for the API key, host and API key header name
//! - A rate-limit aware GET executor with bounded exponential backoff
//! - Uniform error values ([`ApiError`]) with fixed numeric codes
//! - Convenience calls for every supported endpoint ([`Endpoint`])
//!
//! ## Quick Start
//!
//! ```rust
//! use nexusmods_api::{NexusClient, NexusConfig, ApiKey};
//!
//! let config = NexusConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .user_agent("MyModManager/1.0")
//!     .build()
//!     .unwrap();
//!
//! let client = NexusClient::new(config).unwrap();
//! client.set_backoff_callback(|secs| eprintln!("[backoff] sleeping {secs}s"));
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use nexusmods_api::{ErrorCode, UpdatePeriod};
//!
//! let latest = client.get_latest_added("cyberpunk2077").await?;
//! let updated = client
//!     .get_updated_mods_for_period("cyberpunk2077", UpdatePeriod::Week)
//!     .await?;
//!
//! match client.get_mod_file("cyberpunk2077", "107", "1234").await {
//!     Ok(file) => println!("{file:#}"),
//!     Err(e) if e.code() == ErrorCode::HttpFailure => eprintln!("rejected: {e}"),
//!     Err(e) => eprintln!("{}", e.to_json()),
//! }
//! ```
//!
//! ## Error Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 998  | No response after every retry |
//! | 997  | Status outside `200..300` (message carries up to 300 body bytes) |
//! | 996  | Body is not valid JSON (message carries the parser offset) |
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All public types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio runtime
//! - **Snapshot settings**: A request never sees reconfiguration made after it started

pub mod clients;
pub mod config;
pub mod endpoints;
pub mod error;

// Re-export public types at crate root for convenience
pub use config::{
    ApiHeaderName, ApiKey, HostName, NexusConfig, NexusConfigBuilder, Scheme, SDK_VERSION,
};
pub use endpoints::{Endpoint, UpdatePeriod};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, BackoffCallback, BackoffReason, ErrorCode, HttpRequest, HttpRequestBuilder,
    NexusClient, Outcome, RawResponse, ReqwestTransport, Transport, TransportError,
    TransportRequest,
};
