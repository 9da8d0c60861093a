//! Restart-on-latest-input combination of concurrent fetches.
//!
//! A `ViewStateAggregator` owns a driver task that watches two inputs: the
//! language tag and the screen's focus. Each distinct `(focus, language)`
//! pair starts one generation, a single future produced by the screen's
//! combine function. Starting a generation drops the previous one, and
//! with it every fetch it still had in flight, so only the latest pair can
//! ever be published.
//!
//! The published state begins at `UiState::Loading` and is replaced by each
//! settled generation. It is never set back to `Loading`.

use std::fmt::Debug;
use std::future::Future;

use futures_util::future::BoxFuture;
use mymovies_core::{CatalogPortResult, LanguageTag};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::ui_state::UiState;

/// Combines one or more fetches for a focus and language into screen state.
///
/// Dropping the aggregator stops its driver and cancels the running
/// generation.
pub struct ViewStateAggregator<I, T> {
    screen: &'static str,
    focus: watch::Sender<Option<I>>,
    state: watch::Receiver<UiState<T>>,
    cancel: CancellationToken,
}

impl<I, T> ViewStateAggregator<I, T>
where
    I: Clone + PartialEq + Debug + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Spawn the driver task on the current Tokio runtime.
    ///
    /// `combine` is called once per generation and must issue every fetch
    /// the screen needs for the given focus and language.
    pub fn spawn<F, Fut>(
        screen: &'static str,
        language: watch::Receiver<LanguageTag>,
        combine: F,
    ) -> Self
    where
        F: Fn(I, LanguageTag) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CatalogPortResult<T>> + Send + 'static,
    {
        let (focus_tx, focus_rx) = watch::channel(None);
        let (state_tx, state_rx) = watch::channel(UiState::Loading);
        let cancel = CancellationToken::new();

        let driver = Driver {
            screen,
            focus: focus_rx,
            language,
            state: state_tx,
            cancel: cancel.clone(),
        };
        tokio::spawn(driver.run(
            move |id, lang| -> BoxFuture<'static, CatalogPortResult<T>> {
                Box::pin(combine(id, lang))
            },
        ));

        Self {
            screen,
            focus: focus_tx,
            state: state_rx,
            cancel,
        }
    }

    /// Point the screen at `id`.
    ///
    /// Setting the id that is already focused is a no-op.
    pub fn set_focus(&self, id: I) {
        let changed = self.focus.send_if_modified(|current| {
            if current.as_ref() == Some(&id) {
                false
            } else {
                *current = Some(id.clone());
                true
            }
        });
        if changed {
            debug!(screen = self.screen, focus = ?id, "Focus changed");
        }
    }

    /// The currently focused id, if any.
    pub fn focus(&self) -> Option<I> {
        self.focus.borrow().clone()
    }

    /// The current state.
    pub fn state(&self) -> UiState<T> {
        self.state.borrow().clone()
    }

    /// Observe state changes.
    pub fn subscribe(&self) -> watch::Receiver<UiState<T>> {
        self.state.clone()
    }

    /// Wait until the state has left `Loading` and return it.
    pub async fn settled(&self) -> UiState<T> {
        let mut rx = self.state.clone();
        if let Ok(state) = rx.wait_for(|state| !state.is_loading()).await {
            return state.clone();
        }
        rx.borrow().clone()
    }
}

impl<I, T> Drop for ViewStateAggregator<I, T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

enum Event<T> {
    Stop,
    InputChanged,
    LanguageClosed,
    Settled(CatalogPortResult<T>),
}

struct Driver<I, T> {
    screen: &'static str,
    focus: watch::Receiver<Option<I>>,
    language: watch::Receiver<LanguageTag>,
    state: watch::Sender<UiState<T>>,
    cancel: CancellationToken,
}

impl<I, T> Driver<I, T>
where
    I: Clone + PartialEq + Debug + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    async fn run<F>(mut self, combine: F)
    where
        F: Fn(I, LanguageTag) -> BoxFuture<'static, CatalogPortResult<T>>,
    {
        let mut current: Option<(I, LanguageTag)> = None;
        let mut pending: Option<BoxFuture<'static, CatalogPortResult<T>>> = None;
        let mut generation: u64 = 0;
        let mut language_open = true;

        loop {
            let focus = self.focus.borrow_and_update().clone();
            let language = self.language.borrow_and_update().clone();

            if let Some(id) = focus {
                let inputs = (id, language);
                if current.as_ref() != Some(&inputs) {
                    generation += 1;
                    debug!(
                        screen = self.screen,
                        generation,
                        focus = ?inputs.0,
                        language = %inputs.1,
                        replaced_in_flight = pending.is_some(),
                        "Starting generation"
                    );
                    // Replacing the future drops the previous generation.
                    pending = Some(combine(inputs.0.clone(), inputs.1.clone()));
                    current = Some(inputs);
                }
            }

            let event = tokio::select! {
                biased;

                () = self.cancel.cancelled() => Event::Stop,
                changed = self.focus.changed() => match changed {
                    Ok(()) => Event::InputChanged,
                    Err(_) => Event::Stop,
                },
                changed = self.language.changed(), if language_open => match changed {
                    Ok(()) => Event::InputChanged,
                    Err(_) => Event::LanguageClosed,
                },
                result = settle(&mut pending) => Event::Settled(result),
            };

            match event {
                Event::Stop => {
                    debug!(screen = self.screen, generation, "Screen driver stopped");
                    return;
                }
                Event::InputChanged => {}
                Event::LanguageClosed => language_open = false,
                Event::Settled(result) => {
                    pending = None;
                    match &result {
                        Ok(_) => debug!(screen = self.screen, generation, "Generation succeeded"),
                        Err(e) => {
                            debug!(screen = self.screen, generation, error = %e, "Generation failed");
                        }
                    }
                    self.state.send_replace(UiState::from(result));
                }
            }
        }
    }
}

/// Await the running generation, or forever when there is none.
async fn settle<T>(pending: &mut Option<BoxFuture<'static, T>>) -> T {
    match pending {
        Some(future) => future.await,
        None => std::future::pending().await,
    }
}
