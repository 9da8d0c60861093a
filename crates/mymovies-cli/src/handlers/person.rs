use tracing::debug;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::settled_value;
use crate::presentation::print_person_details;

/// Execute the person command.
pub async fn execute(ctx: &CliContext, person_id: i64) -> Result<(), CliError> {
    debug!(person_id, "Showing person");
    let screen = ctx.screens().person_details();
    screen.load_person(person_id);
    let person = settled_value(screen.settled().await)?;
    print_person_details(&person);
    Ok(())
}
