//! View state over a remote store: the cached collection, the search term and
//! the edit session.
//!
//! The store is the only source of truth. Every mutation is followed by an
//! explicit invalidate-then-reload of the whole collection; nothing is patched
//! locally. Reloads are tagged with tickets so a slow, older response can never
//! overwrite a newer one. `ViewState::refresh` fetches and applies in one
//! step; callers that keep several reloads in flight take tickets with
//! `begin_refresh` and hand results back through `finish_refresh` in whatever
//! order they arrive.

use super::{
    client::RemoteStore,
    errors::{StoreError, SyncError},
    filter::filter,
    session::{Draft, EditSession},
    types::{NewUser, User, UserPatch},
};
use tracing::{debug, error};

/// Sequence number of a reload request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Last fetched collection plus reload bookkeeping.
#[derive(Debug, Default)]
pub struct Collection {
    users: Vec<User>,
    issued: u64,
    applied: u64,
    stale: bool,
}

impl Collection {
    /// Issue a ticket for a reload that is about to start.
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Store a reload result unless a newer one was already applied.
    /// Returns whether the result was applied.
    pub fn apply(&mut self, ticket: Ticket, users: Vec<User>) -> bool {
        if ticket.0 <= self.applied {
            debug!(
                ticket = ticket.0,
                applied = self.applied,
                "dropping out-of-order refresh"
            );
            return false;
        }

        self.applied = ticket.0;
        self.users = users;
        self.stale = false;
        true
    }

    /// Mark the cache as out of date after a successful mutation.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }
}

/// What a caller does with a failed operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Hand the failure back to the caller.
    #[default]
    Surface,
    /// Log the failure and carry on with the current (possibly stale) view.
    Ignore,
}

impl ErrorPolicy {
    /// # Errors
    /// Returns the original error under `ErrorPolicy::Surface`.
    pub fn handle<T>(self, result: Result<T, SyncError>) -> Result<Option<T>, SyncError> {
        match (self, result) {
            (_, Ok(value)) => Ok(Some(value)),
            (Self::Surface, Err(err)) => Err(err),
            (Self::Ignore, Err(err)) => {
                error!("{err}");
                Ok(None)
            }
        }
    }
}

pub struct ViewState<S> {
    store: S,
    collection: Collection,
    search: String,
    session: EditSession,
}

impl<S: RemoteStore> ViewState<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            collection: Collection::default(),
            search: String::new(),
            session: EditSession::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The full, unfiltered collection last fetched.
    pub fn users(&self) -> &[User] {
        self.collection.users()
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// The filtered projection for the current search term.
    pub fn visible(&self) -> Vec<&User> {
        filter(self.collection.users(), &self.search)
    }

    pub fn find(&self, id: &str) -> Option<&User> {
        let id = id.trim();
        self.collection.users().iter().find(|user| user.id == id)
    }

    /// Reload the full collection. On failure the cached collection is left
    /// as it was.
    ///
    /// # Errors
    /// Returns `SyncError::Reload` if the store cannot list the collection.
    pub async fn refresh(&mut self) -> Result<&[User], SyncError> {
        let ticket = self.begin_refresh();
        let fetched = self.store.list().await;
        self.finish_refresh(ticket, fetched)?;

        Ok(self.collection.users())
    }

    /// Ticket for a reload the caller fetches itself.
    pub fn begin_refresh(&mut self) -> Ticket {
        self.collection.begin()
    }

    /// Hand back a reload started with [`ViewState::begin_refresh`]. Returns
    /// `false` when a newer reload was already applied and this one was dropped.
    ///
    /// # Errors
    /// Returns `SyncError::Reload` if the fetch failed; the cache is untouched.
    pub fn finish_refresh(
        &mut self,
        ticket: Ticket,
        fetched: Result<Vec<User>, StoreError>,
    ) -> Result<bool, SyncError> {
        let users = fetched.map_err(SyncError::Reload)?;
        Ok(self.collection.apply(ticket, users))
    }

    /// # Errors
    /// `SyncError::Mutation` if the create call fails, `SyncError::Reload` if
    /// the record was created but the collection could not be reloaded.
    pub async fn create(&mut self, user: &NewUser) -> Result<User, SyncError> {
        let created = self
            .store
            .create(user)
            .await
            .map_err(SyncError::Mutation)?;
        debug!(id = %created.id, "user created");

        self.reload_after_mutation().await?;

        Ok(created)
    }

    /// # Errors
    /// `SyncError::Mutation` if the update call fails, `SyncError::Reload` if
    /// the record was updated but the collection could not be reloaded.
    pub async fn update(&mut self, id: &str, patch: &UserPatch) -> Result<User, SyncError> {
        let updated = self
            .store
            .update(id, patch)
            .await
            .map_err(SyncError::Mutation)?;
        debug!(id = %updated.id, "user updated");

        self.reload_after_mutation().await?;

        Ok(updated)
    }

    /// # Errors
    /// `SyncError::Mutation` if the delete call fails, `SyncError::Reload` if
    /// the record was deleted but the collection could not be reloaded.
    pub async fn delete(&mut self, id: &str) -> Result<(), SyncError> {
        self.store
            .delete(id)
            .await
            .map_err(SyncError::Mutation)?;
        debug!(id, "user deleted");

        self.reload_after_mutation().await
    }

    /// Open an edit session on a cached record.
    ///
    /// # Errors
    /// Returns `SyncError::NotFound` if `id` is not in the cached collection.
    pub fn open_edit(&mut self, id: &str) -> Result<&Draft, SyncError> {
        let user = self
            .find(id)
            .cloned()
            .ok_or_else(|| SyncError::NotFound(id.trim().to_string()))?;

        self.session.open(&user);

        self.session.draft().ok_or(SyncError::NotEditing)
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditSession {
        &mut self.session
    }

    pub fn cancel_edit(&mut self) {
        self.session.cancel();
    }

    /// Send the draft. The session goes back to idle once the update is
    /// accepted; if the draft is invalid or the update fails the draft is kept.
    /// Returns `None` when no edit is in progress.
    ///
    /// # Errors
    /// `SyncError::Mutation` wrapping `StoreError::InvalidInput` for a blank
    /// name or city (nothing is sent), otherwise same as [`ViewState::update`].
    pub async fn save_edit(&mut self) -> Result<Option<User>, SyncError> {
        let Some((id, patch)) = self.session.pending() else {
            return Ok(None);
        };
        patch.validate().map_err(SyncError::Mutation)?;

        let updated = self
            .store
            .update(&id, &patch)
            .await
            .map_err(SyncError::Mutation)?;
        self.session.cancel();

        self.reload_after_mutation().await?;

        Ok(Some(updated))
    }

    async fn reload_after_mutation(&mut self) -> Result<(), SyncError> {
        self.collection.invalidate();
        self.refresh().await.map(|_| ())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::userlist::server::Backend;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Backend wrapper that can be told to fail.
    #[derive(Default)]
    struct FlakyStore {
        backend: Backend,
        fail_list: AtomicBool,
        fail_mutations: AtomicBool,
        lists: AtomicUsize,
    }

    impl FlakyStore {
        fn outage() -> StoreError {
            StoreError::Network("connection refused".to_string())
        }
    }

    impl RemoteStore for FlakyStore {
        async fn list(&self) -> Result<Vec<User>, StoreError> {
            self.lists.fetch_add(1, Ordering::SeqCst);
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(Self::outage());
            }
            self.backend.list().await
        }

        async fn create(&self, user: &NewUser) -> Result<User, StoreError> {
            if self.fail_mutations.load(Ordering::SeqCst) {
                return Err(Self::outage());
            }
            self.backend.create(user).await
        }

        async fn update(&self, id: &str, patch: &UserPatch) -> Result<User, StoreError> {
            if self.fail_mutations.load(Ordering::SeqCst) {
                return Err(Self::outage());
            }
            self.backend.update(id, patch).await
        }

        async fn delete(&self, id: &str) -> Result<(), StoreError> {
            if self.fail_mutations.load(Ordering::SeqCst) {
                return Err(Self::outage());
            }
            self.backend.delete(id).await
        }
    }

    fn new_user(name: &str, city: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            city: city.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555-0100".to_string(),
            status: true,
            avatar: format!("https://example.com/{}.png", name.to_lowercase()),
        }
    }

    async fn seeded() -> ViewState<FlakyStore> {
        let store = FlakyStore::default();
        store.backend.create(&new_user("Ana", "Lima")).await.unwrap();
        store.backend.create(&new_user("Bob", "Oslo")).await.unwrap();
        let mut state = ViewState::new(store);
        state.refresh().await.unwrap();
        state
    }

    #[test]
    fn collection_drops_older_tickets() {
        let mut collection = Collection::default();
        let first = collection.begin();
        let second = collection.begin();

        assert!(collection.apply(second, vec![]));
        let stale = vec![User {
            id: "1".to_string(),
            name: "Old".to_string(),
            city: "Old".to_string(),
            email: "old@example.com".to_string(),
            phone: "0".to_string(),
            status: false,
            avatar: String::new(),
        }];
        assert!(!collection.apply(first, stale));
        assert!(collection.users().is_empty());
    }

    #[test]
    fn collection_invalidate_until_applied() {
        let mut collection = Collection::default();
        collection.invalidate();
        assert!(collection.is_stale());

        let ticket = collection.begin();
        collection.apply(ticket, vec![]);
        assert!(!collection.is_stale());
    }

    #[test]
    fn error_policy_ignore_swallows() {
        let result: Result<(), SyncError> = Err(SyncError::NotEditing);
        assert_eq!(ErrorPolicy::Ignore.handle(result).unwrap(), None);

        let result: Result<(), SyncError> = Err(SyncError::NotEditing);
        assert_eq!(
            ErrorPolicy::Surface.handle(result),
            Err(SyncError::NotEditing)
        );

        assert_eq!(ErrorPolicy::Surface.handle(Ok(3)).unwrap(), Some(3));
    }

    #[tokio::test]
    async fn refresh_failure_keeps_stale_collection() {
        let mut state = seeded().await;
        state.store().fail_list.store(true, Ordering::SeqCst);

        let result = state.refresh().await;
        assert!(matches!(result, Err(SyncError::Reload(_))));
        assert_eq!(state.users().len(), 2);
    }

    #[tokio::test]
    async fn overlapping_refreshes_keep_newest_request() {
        let mut state = seeded().await;
        let first = state.begin_refresh();
        let second = state.begin_refresh();

        let older = state.store().list().await;
        state
            .store()
            .backend
            .create(&new_user("Joanna", "Porto"))
            .await
            .unwrap();
        let newer = state.store().list().await;

        assert!(state.finish_refresh(second, newer).unwrap());
        assert_eq!(state.users().len(), 3);

        assert!(!state.finish_refresh(first, older).unwrap());
        assert_eq!(state.users().len(), 3);
        assert!(state.users().iter().any(|u| u.name == "Joanna"));
    }

    #[tokio::test]
    async fn failed_overlapping_refresh_keeps_cache() {
        let mut state = seeded().await;
        let ticket = state.begin_refresh();

        let result = state.finish_refresh(ticket, Err(FlakyStore::outage()));

        assert!(matches!(result, Err(SyncError::Reload(_))));
        assert_eq!(state.users().len(), 2);
    }

    #[tokio::test]
    async fn create_reloads_collection() {
        let mut state = seeded().await;
        let submitted = new_user("Joanna", "Porto");

        let created = state.create(&submitted).await.unwrap();

        assert!(state.users().iter().any(|u| submitted.matches(u)));
        assert!(state.find(&created.id).is_some());
        assert!(!state.collection().is_stale());
    }

    #[tokio::test]
    async fn failed_mutation_leaves_cache_and_skips_reload() {
        let mut state = seeded().await;
        let lists_before = state.store().lists.load(Ordering::SeqCst);
        state.store().fail_mutations.store(true, Ordering::SeqCst);

        let result = state.delete("1").await;

        assert!(matches!(result, Err(SyncError::Mutation(_))));
        assert_eq!(state.users().len(), 2);
        assert_eq!(state.store().lists.load(Ordering::SeqCst), lists_before);
    }

    #[tokio::test]
    async fn reload_failure_after_mutation_is_distinct() {
        let mut state = seeded().await;
        state.store().fail_list.store(true, Ordering::SeqCst);

        let result = state.delete("1").await;

        assert!(matches!(result, Err(SyncError::Reload(_))));
        assert!(state.collection().is_stale());
        assert_eq!(state.store().backend.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_from_view() {
        let mut state = seeded().await;
        state.delete("1").await.unwrap();

        assert!(state.find("1").is_none());
        assert_eq!(state.users().len(), 1);
    }

    #[tokio::test]
    async fn edit_flow_updates_name_and_city_only() {
        let mut state = seeded().await;
        let before = state.find("2").cloned().unwrap();

        let draft = state.open_edit("2").unwrap();
        assert_eq!(draft.name, "Bob");
        assert_eq!(draft.city, "Oslo");

        state.session_mut().set_name("Robert").unwrap();
        state.session_mut().set_city("Bergen").unwrap();
        let updated = state.save_edit().await.unwrap().unwrap();

        assert_eq!(updated.id, "2");
        assert!(!state.session().is_editing());

        let after = state.find("2").unwrap();
        assert_eq!(after.name, "Robert");
        assert_eq!(after.city, "Bergen");
        assert_eq!(after.email, before.email);
        assert_eq!(after.phone, before.phone);
        assert_eq!(after.status, before.status);
        assert_eq!(after.avatar, before.avatar);
    }

    #[tokio::test]
    async fn failed_save_keeps_draft() {
        let mut state = seeded().await;
        state.open_edit("1").unwrap();
        state.session_mut().set_city("Cusco").unwrap();
        state.store().fail_mutations.store(true, Ordering::SeqCst);

        let result = state.save_edit().await;

        assert!(matches!(result, Err(SyncError::Mutation(_))));
        assert_eq!(state.session().draft().unwrap().city, "Cusco");
        assert_eq!(state.find("1").unwrap().city, "Lima");
    }

    #[tokio::test]
    async fn blank_draft_is_rejected_before_sending() {
        let mut state = seeded().await;
        state.open_edit("1").unwrap();
        state.session_mut().set_name("   ").unwrap();
        let lists_before = state.store().lists.load(Ordering::SeqCst);

        let result = state.save_edit().await;

        assert_eq!(
            result,
            Err(SyncError::Mutation(StoreError::InvalidInput(
                "name is required".to_string()
            )))
        );
        assert_eq!(state.session().draft().unwrap().name, "   ");
        assert_eq!(state.store().backend.get("1").await.unwrap().name, "Ana");
        assert_eq!(state.store().lists.load(Ordering::SeqCst), lists_before);
    }

    #[tokio::test]
    async fn save_without_session_is_noop() {
        let mut state = seeded().await;
        let lists_before = state.store().lists.load(Ordering::SeqCst);

        assert_eq!(state.save_edit().await.unwrap(), None);
        assert_eq!(state.store().lists.load(Ordering::SeqCst), lists_before);
    }

    #[tokio::test]
    async fn cancel_edit_writes_nothing() {
        let mut state = seeded().await;
        state.open_edit("1").unwrap();
        state.session_mut().set_name("Anita").unwrap();
        state.cancel_edit();

        state.refresh().await.unwrap();
        assert_eq!(state.find("1").unwrap().name, "Ana");
    }

    #[tokio::test]
    async fn open_edit_unknown_id() {
        let mut state = seeded().await;
        assert_eq!(
            state.open_edit("99").unwrap_err(),
            SyncError::NotFound("99".to_string())
        );
    }

    #[tokio::test]
    async fn visible_follows_search() {
        let mut state = seeded().await;
        state.set_search("an");
        let visible: Vec<&str> = state.visible().iter().map(|u| u.id.as_str()).collect();
        assert_eq!(visible, vec!["1"]);

        state.set_search("");
        assert_eq!(state.visible().len(), 2);
    }
}
