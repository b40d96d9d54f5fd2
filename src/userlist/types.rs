use super::errors::StoreError;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A user record as owned by the remote collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub city: String,
    pub email: String,
    pub phone: String,
    pub status: bool,
    pub avatar: String,
}

/// Fields submitted when creating a record; the server assigns the id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub city: String,
    pub email: String,
    pub phone: String,
    pub status: bool,
    pub avatar: String,
}

/// Shape check equivalent to an `<input type="email">`.
#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

fn require(field: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::InvalidInput(format!("{field} is required")));
    }
    Ok(())
}

impl NewUser {
    /// Every text field is required; the e-mail must look like an address.
    ///
    /// # Errors
    /// Returns `StoreError::InvalidInput` naming the first offending field.
    pub fn validate(&self) -> Result<(), StoreError> {
        let required = [
            ("avatar", &self.avatar),
            ("name", &self.name),
            ("email", &self.email),
            ("city", &self.city),
            ("phone", &self.phone),
        ];
        for (field, value) in required {
            require(field, value)?;
        }

        if !valid_email(self.email.trim()) {
            return Err(StoreError::InvalidInput(format!(
                "invalid email: {}",
                self.email
            )));
        }

        Ok(())
    }

    /// True when `user` carries every submitted field.
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        self.name == user.name
            && self.city == user.city
            && self.email == user.email
            && self.phone == user.phone
            && self.status == user.status
            && self.avatar == user.avatar
    }
}

/// Partial update body, exactly `name` and `city`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    pub name: String,
    pub city: String,
}

impl UserPatch {
    /// Both editable fields stay required after an edit.
    ///
    /// # Errors
    /// Returns `StoreError::InvalidInput` naming the first blank field.
    pub fn validate(&self) -> Result<(), StoreError> {
        require("name", &self.name)?;
        require("city", &self.city)
    }
}
