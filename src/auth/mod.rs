//! Authentication context and the registered-users directory.
//!
//! Credentials here follow the demo fixture model: passwords are stored in
//! plaintext in the users list and compared directly. That is deliberate
//! fidelity to a toy dataset and is not fit for real credential handling.

pub mod reset;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::storage::{Storage, keys, load_or_default, persist};

/// Errors raised by authentication operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Email/password pair did not match a registered user.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// A user with this email is already registered.
    #[error("a user with this email already exists")]
    EmailTaken,
}

/// A registered user, as persisted in the users list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// User identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Sign-in email, unique within the directory.
    pub email: String,

    /// Plaintext password (demo fixture model; see module docs).
    pub password: String,
}

/// Public identity of a signed-in user. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Sign-in email.
    pub email: String,
}

impl From<&UserRecord> for User {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            email: record.email.clone(),
        }
    }
}

/// The persisted list of registered users.
#[derive(Debug)]
pub struct UserDirectory {
    users: Vec<UserRecord>,
    store: Arc<dyn Storage>,
}

impl UserDirectory {
    /// Restore the directory persisted in `store`, or start empty.
    pub fn load(store: Arc<dyn Storage>) -> Self {
        let users = load_or_default(store.as_ref(), keys::USERS);

        Self { users, store }
    }

    /// Register a new user and return their public identity.
    ///
    /// # Errors
    ///
    /// - [`AuthError::EmailTaken`]: a user with this email already exists.
    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        if self.find(email).is_some() {
            return Err(AuthError::EmailTaken);
        }

        let record = UserRecord {
            id: Uuid::now_v7().to_string(),
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        };

        let user = User::from(&record);

        tracing::info!(email, "registering user");

        self.users.push(record);
        self.save();

        Ok(user)
    }

    /// Look up a user by email.
    pub fn find(&self, email: &str) -> Option<&UserRecord> {
        self.users.iter().find(|user| user.email == email)
    }

    /// Check an email/password pair and return the matching identity.
    pub fn verify(&self, email: &str, password: &str) -> Option<User> {
        self.users
            .iter()
            .find(|user| user.email == email && user.password == password)
            .map(User::from)
    }

    /// Overwrite the stored password for `email`.
    ///
    /// Returns `true` if a matching user was updated.
    pub fn set_password(&mut self, email: &str, new_password: &str) -> bool {
        let Some(record) = self.users.iter_mut().find(|user| user.email == email) else {
            return false;
        };

        record.password = new_password.to_owned();
        self.save();

        true
    }

    /// Number of registered users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no users are registered.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn save(&self) {
        persist(self.store.as_ref(), keys::USERS, &self.users);
    }
}

/// The current session: who, if anyone, is signed in.
#[derive(Debug)]
pub struct AuthContext {
    current: Option<User>,
    store: Arc<dyn Storage>,
}

impl AuthContext {
    /// Restore the session persisted in `store`, or start signed out.
    pub fn load(store: Arc<dyn Storage>) -> Self {
        let current = load_or_default(store.as_ref(), keys::USER);

        Self { current, store }
    }

    /// Sign in against the directory.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidCredentials`]: no registered user matched the
    ///   email/password pair.
    pub fn login(
        &mut self,
        directory: &UserDirectory,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let user = directory
            .verify(email, password)
            .ok_or(AuthError::InvalidCredentials)?;

        tracing::info!(email, "user signed in");

        self.current = Some(user.clone());
        self.save();

        Ok(user)
    }

    /// Register a new user and sign them in.
    ///
    /// # Errors
    ///
    /// - [`AuthError::EmailTaken`]: a user with this email already exists.
    pub fn register(
        &mut self,
        directory: &mut UserDirectory,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let user = directory.register(name, email, password)?;

        self.current = Some(user.clone());
        self.save();

        Ok(user)
    }

    /// Sign out and drop the persisted session.
    pub fn logout(&mut self) {
        self.current = None;

        if let Err(error) = self.store.remove(keys::USER) {
            tracing::warn!(%error, "failed to remove persisted session");
        }
    }

    /// Merge updated identity fields into the current session.
    ///
    /// A no-op when signed out.
    pub fn update_user(&mut self, name: Option<&str>, email: Option<&str>) {
        let Some(user) = self.current.as_mut() else {
            return;
        };

        if let Some(name) = name {
            user.name = name.to_owned();
        }

        if let Some(email) = email {
            user.email = email.to_owned();
        }

        self.save();
    }

    /// The signed-in identity, if any.
    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// Whether a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    fn save(&self) {
        persist(self.store.as_ref(), keys::USER, &self.current);
    }
}
