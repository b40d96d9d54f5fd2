use crate::cli::actions::{Action, server, theme, users};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Users(args) => users::execute(args).await,
        Action::Theme(args) => theme::execute(&args),
        Action::Server(args) => server::execute(args).await,
    }
}
