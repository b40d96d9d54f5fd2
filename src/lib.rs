//! # userlist
//!
//! Client for a remote "user list" collection served by a mock REST API.
//!
//! ## Data flow
//!
//! The remote collection is the only source of truth. [`userlist::ViewState`]
//! caches the last fetched collection and derives a name-filtered projection
//! from it. Every mutation (create, update, delete) is followed by an explicit
//! invalidate-then-reload of the whole collection; nothing is patched locally.
//!
//! - **List:** `GET /todolist`
//! - **Create:** `POST /todolist` with `{name, city, email, phone, status, avatar}`
//! - **Update:** `PUT /todolist/{id}` with `{name, city}`
//! - **Delete:** `DELETE /todolist/{id}`
//!
//! Store operations return `Result`; whether a failure is surfaced or only
//! logged is chosen by the caller through [`userlist::ErrorPolicy`].
//!
//! ## Theme
//!
//! The light/dark preference is persisted under the `theme` key of an injected
//! [`userlist::PreferenceStore`] and is independent of the data flow.

pub mod cli;
pub mod userlist;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
