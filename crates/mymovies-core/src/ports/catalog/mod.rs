//! Remote movie catalog port.
//!
//! Core-owned abstraction over the remote catalog service. Adapters (such
//! as `mymovies-tmdb`) implement `CatalogClientPort`; services and view
//! models only ever see domain types and `CatalogPortError`.

mod client;
mod error;

pub use client::{CatalogClientPort, TimeWindow};
pub use error::{CatalogPortError, CatalogPortResult};

#[cfg(test)]
pub use client::MockCatalogClientPort;
