use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_history;

/// List remembered keywords, newest first.
pub fn list(ctx: &CliContext) -> Result<(), CliError> {
    print_history(&ctx.core().search_history().entries());
    Ok(())
}

/// Forget `keyword`.
pub async fn delete(ctx: &CliContext, keyword: &str) -> Result<(), CliError> {
    let screen = ctx.screens().search_movies();
    screen.delete_keyword(keyword.trim()).await?;
    println!("Removed \"{}\" from search history.", keyword.trim());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::context;
    use mymovies_core::testing::{FakeCatalog, MemoryStore};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_delete_removes_keyword() {
        let fake = Arc::new(FakeCatalog::new());
        let ctx = context(&fake, &MemoryStore::new()).await;
        crate::handlers::search::execute(&ctx, "war", 1).await.unwrap();
        crate::handlers::search::execute(&ctx, "peace", 1).await.unwrap();

        delete(&ctx, "war").await.unwrap();

        assert_eq!(ctx.core().search_history().keywords(), vec!["peace"]);
        list(&ctx).unwrap();
    }

    #[tokio::test]
    async fn test_delete_unknown_keyword_is_not_found() {
        let fake = Arc::new(FakeCatalog::new());
        let ctx = context(&fake, &MemoryStore::new()).await;

        let err = delete(&ctx, "war").await.unwrap_err();

        assert_eq!(err.exit_code(), 66);
    }
}
