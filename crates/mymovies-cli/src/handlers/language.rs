use mymovies_core::LanguageTag;
use tracing::info;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Show the display language, or persist `tag` as the new one.
pub async fn execute(ctx: &CliContext, tag: Option<&str>) -> Result<(), CliError> {
    let preferences = ctx.core().preferences();
    let Some(tag) = tag else {
        let current = preferences.language_tag();
        if current.is_unset() {
            println!("Language: (not set, catalog default)");
        } else {
            println!("Language: {current}");
        }
        return Ok(());
    };

    let tag = LanguageTag::new(tag);
    if tag.is_unset() {
        return Err(CliError::Arguments(
            "language tag must not be empty".to_string(),
        ));
    }
    preferences.update_language_tag(tag.clone()).await?;
    info!(language = %tag, "Language updated");
    println!("Language set to {tag}.");
    Ok(())
}
