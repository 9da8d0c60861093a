//! Factory for screen view models.

use std::sync::Arc;

use mymovies_core::AppCore;

use crate::deps::GuiDeps;
use crate::movie_details::MovieDetailsViewModel;
use crate::movies::MoviesViewModel;
use crate::person_details::PersonDetailsViewModel;
use crate::search::SearchMoviesViewModel;

/// Creates view models wired to the injected core.
///
/// Each call returns a new, independent screen. View models spawn their
/// driver on creation, so these must be called inside a Tokio runtime.
pub struct Screens {
    deps: GuiDeps,
}

impl Screens {
    pub const fn new(deps: GuiDeps) -> Self {
        Self { deps }
    }

    pub const fn core(&self) -> &Arc<AppCore> {
        self.deps.core()
    }

    pub fn movies(&self) -> MoviesViewModel {
        let core = &self.deps.core;
        MoviesViewModel::new(core.catalog().clone(), core.preferences().subscribe())
    }

    pub fn movie_details(&self) -> MovieDetailsViewModel {
        let core = &self.deps.core;
        MovieDetailsViewModel::new(core.catalog().clone(), core.preferences().subscribe())
    }

    pub fn person_details(&self) -> PersonDetailsViewModel {
        let core = &self.deps.core;
        PersonDetailsViewModel::new(core.catalog().clone(), core.preferences().subscribe())
    }

    pub fn search_movies(&self) -> SearchMoviesViewModel {
        SearchMoviesViewModel::new(Arc::clone(&self.deps.core), self.deps.paging)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::WAIT;
    use mymovies_core::testing::{FakeCatalog, MemoryStore};
    use mymovies_core::{CatalogClientPort, PagingConfig};

    fn screens(fake: &Arc<FakeCatalog>) -> Screens {
        let catalog: Arc<dyn CatalogClientPort> = Arc::clone(fake) as _;
        let core = AppCore::new(MemoryStore::new().repos(), catalog);
        let deps =
            GuiDeps::new(Arc::new(core)).with_paging_config(PagingConfig::with_page_size(10));
        Screens::new(deps)
    }

    #[tokio::test]
    async fn test_screens_are_independent() {
        let fake = Arc::new(FakeCatalog::new());
        let screens = screens(&fake);

        let first = screens.movie_details();
        let second = screens.movie_details();
        first.load_movie(1);
        second.load_movie(2);

        let a = tokio::time::timeout(WAIT, first.settled()).await.unwrap();
        let b = tokio::time::timeout(WAIT, second.settled()).await.unwrap();
        assert_eq!(a.success().unwrap().detail.id, 1);
        assert_eq!(b.success().unwrap().detail.id, 2);
    }

    #[tokio::test]
    async fn test_each_factory_builds_a_working_screen() {
        let fake = Arc::new(FakeCatalog::new());
        let screens = screens(&fake);

        let movies = screens.movies();
        let person = screens.person_details();
        person.load_person(3084);
        let search = screens.search_movies();
        search.search_movies("war");

        let home = tokio::time::timeout(WAIT, movies.settled()).await.unwrap();
        let profile = tokio::time::timeout(WAIT, person.settled()).await.unwrap();
        assert!(home.success().is_some());
        assert!(profile.success().is_some());
        let results = tokio::time::timeout(WAIT, search.settled()).await.unwrap();
        assert_eq!(results.paging.items.len(), 20);
    }
}
