pub mod client;
pub mod errors;
pub mod filter;
pub mod render;
pub mod server;
pub mod session;
pub mod state;
pub mod theme;
pub mod types;

pub use self::client::{DEFAULT_API_URL, HttpStore, RemoteStore};
pub use self::errors::{PreferenceError, StoreError, SyncError};
pub use self::session::{Draft, EditSession};
pub use self::state::{Collection, ErrorPolicy, Ticket, ViewState};
pub use self::theme::{FileStore, MemoryStore, PreferenceStore, Theme, ThemePreference};
pub use self::types::{NewUser, User, UserPatch};
