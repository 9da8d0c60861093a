//! Person detail screen.

use mymovies_core::{
    CatalogPortResult, CatalogRepository, LanguageTag, PersonDetail, PersonImages,
    PersonMovieCredits,
};
use tokio::sync::watch;

use crate::aggregator::ViewStateAggregator;
use crate::ui_state::UiState;

/// Aggregated payload of the person detail screen.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonDetails {
    pub detail: PersonDetail,
    pub images: PersonImages,
    pub credits: PersonMovieCredits,
}

/// State of the person detail screen.
pub struct PersonDetailsViewModel {
    aggregator: ViewStateAggregator<i64, PersonDetails>,
}

impl PersonDetailsViewModel {
    pub fn new(catalog: CatalogRepository, language: watch::Receiver<LanguageTag>) -> Self {
        let combine = move |person_id: i64, lang: LanguageTag| {
            let catalog = catalog.clone();
            async move { fetch_person(&catalog, person_id, &lang).await }
        };
        let aggregator = ViewStateAggregator::spawn("person_details", language, combine);
        Self { aggregator }
    }

    /// Show the person with `person_id`.
    pub fn load_person(&self, person_id: i64) {
        self.aggregator.set_focus(person_id);
    }

    pub fn person_id(&self) -> Option<i64> {
        self.aggregator.focus()
    }

    pub fn state(&self) -> UiState<PersonDetails> {
        self.aggregator.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState<PersonDetails>> {
        self.aggregator.subscribe()
    }

    pub async fn settled(&self) -> UiState<PersonDetails> {
        self.aggregator.settled().await
    }
}

async fn fetch_person(
    catalog: &CatalogRepository,
    person_id: i64,
    lang: &LanguageTag,
) -> CatalogPortResult<PersonDetails> {
    let (detail, images, credits) = tokio::try_join!(
        catalog.person_detail(person_id, lang),
        catalog.person_images(person_id),
        catalog.person_movie_credits(person_id, lang),
    )?;

    Ok(PersonDetails {
        detail,
        images,
        credits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::WAIT;
    use mymovies_core::testing::{CatalogOp, FakeCatalog, MemoryStore};
    use mymovies_core::{AppCore, CatalogClientPort, CatalogPortError};
    use std::sync::Arc;

    async fn setup() -> (Arc<FakeCatalog>, PersonDetailsViewModel) {
        let fake = Arc::new(FakeCatalog::new());
        let catalog: Arc<dyn CatalogClientPort> = Arc::clone(&fake) as _;
        let core = AppCore::new(
            MemoryStore::new().with_language_tag("zh-TW").repos(),
            catalog,
        );
        core.reload().await;
        let vm =
            PersonDetailsViewModel::new(core.catalog().clone(), core.preferences().subscribe());
        (fake, vm)
    }

    #[tokio::test]
    async fn test_person_payloads_aggregated() {
        let (fake, vm) = setup().await;

        vm.load_person(3084);
        let state = tokio::time::timeout(WAIT, vm.settled()).await.unwrap();

        let person = state.success().unwrap();
        assert_eq!(person.detail.name, "Person 3084 [zh-TW]");
        assert_eq!(person.images.id, 3084);
        assert_eq!(person.credits.cast[0].title, "Credit [zh-TW]");
        assert_eq!(fake.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_switching_person_discards_previous_generation() {
        let (fake, vm) = setup().await;
        fake.hold(CatalogOp::PersonImages);

        vm.load_person(1);
        tokio::time::timeout(WAIT, fake.wait_for_calls(3))
            .await
            .unwrap();
        vm.load_person(2);
        tokio::time::timeout(WAIT, fake.wait_for_calls(6))
            .await
            .unwrap();
        fake.release(CatalogOp::PersonImages);

        let state = tokio::time::timeout(WAIT, vm.settled()).await.unwrap();
        assert_eq!(state.success().unwrap().detail.id, 2);
        assert_eq!(fake.cancelled(), 1);
    }

    #[tokio::test]
    async fn test_credits_failure_is_an_error() {
        let (fake, vm) = setup().await;
        fake.fail(
            CatalogOp::PersonMovieCredits,
            CatalogPortError::Transport {
                message: "timed out".to_string(),
            },
        );

        vm.load_person(3084);
        let state = tokio::time::timeout(WAIT, vm.settled()).await.unwrap();

        assert!(state.error().unwrap().is_network());
    }
}
