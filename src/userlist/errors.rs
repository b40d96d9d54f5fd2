use thiserror::Error;

/// Failure of a single remote store call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Decode(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Failure of a view-state operation that talks to the store.
///
/// `Mutation` means the write itself did not go through and the cache was left
/// untouched. `Reload` means the write (if any) was applied but the follow-up
/// refresh failed, so the cached collection is stale.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("mutation failed: {0}")]
    Mutation(StoreError),
    #[error("refresh failed: {0}")]
    Reload(StoreError),
    #[error("no user with id {0}")]
    NotFound(String),
    #[error("no edit in progress")]
    NotEditing,
}

impl SyncError {
    /// The underlying store error, if the failure came from the remote side.
    #[must_use]
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            Self::Mutation(err) | Self::Reload(err) => Some(err),
            Self::NotFound(_) | Self::NotEditing => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("failed to access preference file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid preference file {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
