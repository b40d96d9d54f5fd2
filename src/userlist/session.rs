//! Edit session for a single record. Only `name` and `city` are editable; the
//! draft lives from `open` until the update is accepted or `cancel` drops it.

use super::{
    errors::SyncError,
    types::{User, UserPatch},
};

/// In-flight copy of the editable fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draft {
    pub id: String,
    pub name: String,
    pub city: String,
}

impl Draft {
    #[must_use]
    pub fn patch(&self) -> UserPatch {
        UserPatch {
            name: self.name.clone(),
            city: self.city.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing(Draft),
}

impl EditSession {
    /// Start editing `user`, replacing any previous draft.
    pub fn open(&mut self, user: &User) {
        *self = Self::Editing(Draft {
            id: user.id.clone(),
            name: user.name.clone(),
            city: user.city.clone(),
        });
    }

    #[must_use]
    pub fn draft(&self) -> Option<&Draft> {
        match self {
            Self::Idle => None,
            Self::Editing(draft) => Some(draft),
        }
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    /// # Errors
    /// Returns `SyncError::NotEditing` when idle.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), SyncError> {
        match self {
            Self::Idle => Err(SyncError::NotEditing),
            Self::Editing(draft) => {
                draft.name = name.into();
                Ok(())
            }
        }
    }

    /// # Errors
    /// Returns `SyncError::NotEditing` when idle.
    pub fn set_city(&mut self, city: impl Into<String>) -> Result<(), SyncError> {
        match self {
            Self::Idle => Err(SyncError::NotEditing),
            Self::Editing(draft) => {
                draft.city = city.into();
                Ok(())
            }
        }
    }

    /// Id and body for the update call, without leaving the editing state.
    /// `None` when idle: nothing is sent.
    #[must_use]
    pub fn pending(&self) -> Option<(String, UserPatch)> {
        self.draft().map(|draft| (draft.id.clone(), draft.patch()))
    }

    /// Discard the draft.
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> User {
        User {
            id: "1".to_string(),
            name: "Ana".to_string(),
            city: "Lima".to_string(),
            email: "ana@example.com".to_string(),
            phone: "555-0100".to_string(),
            status: true,
            avatar: "https://example.com/ana.png".to_string(),
        }
    }

    #[test]
    fn open_copies_name_and_city() {
        let mut session = EditSession::default();
        session.open(&ana());

        assert_eq!(
            session.draft(),
            Some(&Draft {
                id: "1".to_string(),
                name: "Ana".to_string(),
                city: "Lima".to_string(),
            })
        );
    }

    #[test]
    fn pending_carries_draft_and_stays_editing() {
        let mut session = EditSession::default();
        session.open(&ana());
        session.set_city("Cusco").unwrap();

        let (id, patch) = session.pending().unwrap();
        assert_eq!(id, "1");
        assert_eq!(patch.name, "Ana");
        assert_eq!(patch.city, "Cusco");
        assert!(session.is_editing());
    }

    #[test]
    fn idle_has_nothing_pending() {
        let session = EditSession::default();
        assert!(session.pending().is_none());
    }

    #[test]
    fn cancel_discards_draft() {
        let mut session = EditSession::default();
        let user = ana();
        session.open(&user);
        session.set_name("Anna").unwrap();
        session.cancel();

        assert!(!session.is_editing());
        assert_eq!(user.name, "Ana");
    }

    #[test]
    fn setters_require_editing() {
        let mut session = EditSession::default();
        assert_eq!(session.set_name("x"), Err(SyncError::NotEditing));
        assert_eq!(session.set_city("x"), Err(SyncError::NotEditing));
    }

    #[test]
    fn reopen_replaces_draft() {
        let mut session = EditSession::default();
        session.open(&ana());
        session.set_name("changed").unwrap();

        let mut bob = ana();
        bob.id = "2".to_string();
        bob.name = "Bob".to_string();
        session.open(&bob);

        let draft = session.draft().unwrap();
        assert_eq!(draft.id, "2");
        assert_eq!(draft.name, "Bob");
    }
}
