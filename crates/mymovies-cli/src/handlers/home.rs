use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::settled_value;
use crate::presentation::print_home;

/// Execute the home command.
pub async fn execute(ctx: &CliContext) -> Result<(), CliError> {
    let screen = ctx.screens().movies();
    let lists = settled_value(screen.settled().await)?;
    print_home(&lists);
    Ok(())
}
