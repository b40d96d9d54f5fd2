use crate::userlist::{User, server};
use anyhow::{Context, Result};
use std::fs;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub seed: Option<String>,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the seed file is unreadable or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let backend = match &args.seed {
        Some(path) => {
            let users = load_seed(path)?;
            info!("seeded {} users from {path}", users.len());
            server::Backend::with_users(users)
        }
        None => server::Backend::new(),
    };

    server::new(args.port, backend).await
}

fn load_seed(path: &str) -> Result<Vec<User>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read seed file: {path}"))?;

    serde_json::from_str(&contents).with_context(|| format!("Invalid seed file: {path}"))
}
