//! In-memory mock of the remote user collection.
//!
//! It mirrors the hosted mock API closely enough for the client to run against
//! it: string ids assigned in sequence, `PUT` merges whatever fields it is
//! given, `DELETE` answers with the removed record and unknown ids get a 404
//! with a `"Not found"` body.

use super::{
    client::RemoteStore,
    errors::StoreError,
    types::{NewUser, User, UserPatch},
};
use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

pub const COLLECTION_PATH: &str = "/todolist";

#[derive(Debug, Default)]
struct Inner {
    last_id: u64,
    users: Vec<User>,
}

/// Shared record storage behind the mock routes.
#[derive(Clone, Debug, Default)]
pub struct Backend {
    inner: Arc<RwLock<Inner>>,
}

/// Body of a `PUT`: every field is optional and merged into the record.
#[derive(Debug, Default, Deserialize)]
pub struct UserChanges {
    pub name: Option<String>,
    pub city: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<bool>,
    pub avatar: Option<String>,
}

impl From<&UserPatch> for UserChanges {
    fn from(patch: &UserPatch) -> Self {
        Self {
            name: Some(patch.name.clone()),
            city: Some(patch.city.clone()),
            ..Self::default()
        }
    }
}

impl UserChanges {
    fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(city) = self.city {
            user.city = city;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(phone) = self.phone {
            user.phone = phone;
        }
        if let Some(status) = self.status {
            user.status = status;
        }
        if let Some(avatar) = self.avatar {
            user.avatar = avatar;
        }
    }
}

impl Backend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing records; new ids continue after the largest numeric id.
    #[must_use]
    pub fn with_users(users: Vec<User>) -> Self {
        let last_id = users
            .iter()
            .filter_map(|user| user.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        Self {
            inner: Arc::new(RwLock::new(Inner { last_id, users })),
        }
    }

    pub async fn snapshot(&self) -> Vec<User> {
        self.inner.read().await.users.clone()
    }

    pub async fn get(&self, id: &str) -> Option<User> {
        self.inner
            .read()
            .await
            .users
            .iter()
            .find(|user| user.id == id)
            .cloned()
    }

    pub async fn insert(&self, new_user: NewUser) -> User {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;

        let user = User {
            id: inner.last_id.to_string(),
            name: new_user.name,
            city: new_user.city,
            email: new_user.email,
            phone: new_user.phone,
            status: new_user.status,
            avatar: new_user.avatar,
        };
        inner.users.push(user.clone());

        user
    }

    pub async fn modify(&self, id: &str, changes: UserChanges) -> Option<User> {
        let mut inner = self.inner.write().await;
        let user = inner.users.iter_mut().find(|user| user.id == id)?;
        changes.apply(user);

        Some(user.clone())
    }

    pub async fn remove(&self, id: &str) -> Option<User> {
        let mut inner = self.inner.write().await;
        let index = inner.users.iter().position(|user| user.id == id)?;

        Some(inner.users.remove(index))
    }
}

fn not_found() -> StoreError {
    StoreError::Http {
        status: 404,
        message: "Not found".to_string(),
    }
}

/// In-process access to the mock, without going through HTTP.
impl RemoteStore for Backend {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.snapshot().await)
    }

    async fn create(&self, user: &NewUser) -> Result<User, StoreError> {
        Ok(self.insert(user.clone()).await)
    }

    async fn update(&self, id: &str, patch: &UserPatch) -> Result<User, StoreError> {
        self.modify(id.trim(), patch.into())
            .await
            .ok_or_else(not_found)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.remove(id.trim()).await.map(|_| ()).ok_or_else(not_found)
    }
}

fn not_found_response() -> Response {
    (StatusCode::NOT_FOUND, Json("Not found")).into_response()
}

async fn list_users(State(backend): State<Backend>) -> Json<Vec<User>> {
    Json(backend.snapshot().await)
}

async fn create_user(
    State(backend): State<Backend>,
    Json(new_user): Json<NewUser>,
) -> impl IntoResponse {
    let user = backend.insert(new_user).await;
    debug!(id = %user.id, "created");

    (StatusCode::CREATED, Json(user))
}

async fn get_user(State(backend): State<Backend>, Path(id): Path<String>) -> Response {
    match backend.get(&id).await {
        Some(user) => Json(user).into_response(),
        None => not_found_response(),
    }
}

async fn update_user(
    State(backend): State<Backend>,
    Path(id): Path<String>,
    Json(changes): Json<UserChanges>,
) -> Response {
    match backend.modify(&id, changes).await {
        Some(user) => Json(user).into_response(),
        None => not_found_response(),
    }
}

async fn delete_user(State(backend): State<Backend>, Path(id): Path<String>) -> Response {
    match backend.remove(&id).await {
        Some(user) => Json(user).into_response(),
        None => not_found_response(),
    }
}

/// Routes of the mock collection.
pub fn router(backend: Backend) -> Router {
    Router::new()
        .route(COLLECTION_PATH, get(list_users).post(create_user))
        .route(
            &format!("{COLLECTION_PATH}/:id"),
            get(get_user).put(update_user).delete(delete_user),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(backend)
}

/// Serve the mock collection on `port` until the process is stopped.
///
/// # Errors
/// Returns an error if the port cannot be bound or the server fails.
pub async fn new(port: u16, backend: Backend) -> Result<()> {
    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!(
        "serving mock collection on http://localhost:{port}{COLLECTION_PATH}"
    );

    axum::serve(listener, router(backend).into_make_service()).await?;

    Ok(())
}
