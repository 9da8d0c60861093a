#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultTmdbClient is meant to be used through the CatalogClientPort trait,
// not its internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultTmdbClient;

// Configuration
pub use config::{ACCESS_TOKEN_ENV, TmdbClientConfig};
