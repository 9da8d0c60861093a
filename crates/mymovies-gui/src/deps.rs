//! Dependency injection for `Screens`.

use std::sync::Arc;

use mymovies_core::{AppCore, PagingConfig};

/// Dependencies required to construct `Screens`.
///
/// # Example
///
/// ```ignore
/// let deps = GuiDeps::new(Arc::new(core));
/// let screens = Screens::new(deps);
/// ```
pub struct GuiDeps {
    /// Core application facade providing access to domain services.
    pub(crate) core: Arc<AppCore>,
    /// Paging tuning for the search screen.
    pub(crate) paging: PagingConfig,
}

impl GuiDeps {
    pub fn new(core: Arc<AppCore>) -> Self {
        Self {
            core,
            paging: PagingConfig::default(),
        }
    }

    #[must_use]
    pub fn with_paging_config(mut self, paging: PagingConfig) -> Self {
        self.paging = paging;
        self
    }

    pub const fn core(&self) -> &Arc<AppCore> {
        &self.core
    }
}
