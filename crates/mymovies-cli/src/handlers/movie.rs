use tracing::debug;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::settled_value;
use crate::presentation::print_movie_details;

/// Execute the movie command.
pub async fn execute(ctx: &CliContext, movie_id: i64) -> Result<(), CliError> {
    debug!(movie_id, "Showing movie");
    let screen = ctx.screens().movie_details();
    screen.load_movie(movie_id);
    let details = settled_value(screen.settled().await)?;
    print_movie_details(&details);
    Ok(())
}
