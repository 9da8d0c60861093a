use tracing::debug;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_movie_table;

/// Execute the search command.
///
/// Commits `query` to the search history, then loads up to `pages` pages
/// of results. Results loaded before a failing page are still printed.
pub async fn execute(ctx: &CliContext, query: &str, pages: u32) -> Result<(), CliError> {
    let screen = ctx.screens().search_movies();
    if !screen.commit_search(query).await? {
        return Err(CliError::Arguments(
            "search keyword must not be empty".to_string(),
        ));
    }

    let mut results = screen.settled().await;
    for _ in 1..pages {
        if results.paging.end_of_pagination() || results.paging.append.error().is_some() {
            break;
        }
        screen.load_more();
        results = screen.settled().await;
    }
    debug!(
        query = %results.query,
        items = results.paging.items.len(),
        "Search settled"
    );

    if let Some(e) = results.paging.refresh.error() {
        return Err(e.clone().into());
    }
    print_movie_table(
        &format!("Results for \"{}\"", results.query),
        &results.paging.items,
    );
    if let Some(e) = results.paging.append.error() {
        return Err(e.clone().into());
    }
    Ok(())
}
