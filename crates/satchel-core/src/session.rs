//! User identity and the document scope it selects.
//!
//! Login is a placeholder: no credential is checked. The identity exists only
//! to pick which persisted document collection is visible.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  persist::{self, Loaded},
  store::KvStore,
};

/// Key under which the logged-in user is persisted.
pub const USER_KEY: &str = "user";

/// The single email address that is granted the admin role.
pub const ADMIN_EMAIL: &str = "m@example.com";

// ─── Identity ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Admin,
  Student,
}

impl Role {
  pub fn for_email(email: &str) -> Self {
    if email == ADMIN_EMAIL { Self::Admin } else { Self::Student }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:  Option<String>,
  pub email: String,
  pub role:  Role,
}

impl User {
  /// Build a user with the role derived from `email`.
  pub fn new(name: Option<String>, email: impl Into<String>) -> Self {
    let email = email.into();
    let role = Role::for_email(&email);
    Self { name, email, role }
  }
}

// ─── Scope ───────────────────────────────────────────────────────────────────

/// The persistence namespace for documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
  /// Nobody is logged in.
  Guest,
  /// Documents belonging to the user with this email.
  User(String),
}

impl Scope {
  pub fn for_user(user: Option<&User>) -> Self {
    match user {
      Some(u) => Self::User(u.email.clone()),
      None => Self::Guest,
    }
  }

  /// The store key holding this scope's document collection.
  pub fn storage_key(&self) -> String {
    match self {
      Self::Guest => "documents_guest".to_owned(),
      Self::User(email) => format!("documents_{email}"),
    }
  }
}

impl fmt::Display for Scope {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Guest => f.write_str("guest"),
      Self::User(email) => f.write_str(email),
    }
  }
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// Tracks the logged-in user and persists it under [`USER_KEY`].
pub struct Session<S> {
  store: Arc<S>,
  user:  Option<User>,
}

impl<S: KvStore> Session<S> {
  /// Restore the session from the store. An unreadable or malformed stored
  /// user counts as logged out.
  pub fn open(store: Arc<S>) -> Self {
    let user = match persist::load_json::<_, User>(store.as_ref(), USER_KEY) {
      Loaded::Value(user) => Some(user),
      Loaded::Absent | Loaded::Failed => None,
    };
    Self { store, user }
  }

  pub fn current(&self) -> Option<&User> { self.user.as_ref() }

  pub fn scope(&self) -> Scope { Scope::for_user(self.user.as_ref()) }

  /// Log in as `email`, replacing any current user.
  pub fn login(&mut self, name: Option<String>, email: &str) -> Result<&User> {
    let email = email.trim();
    if email.is_empty() {
      return Err(Error::MissingEmail);
    }
    let name = name
      .map(|n| n.trim().to_owned())
      .filter(|n| !n.is_empty());

    let user = User::new(name, email);
    persist::save_json(self.store.as_ref(), USER_KEY, &user);
    tracing::info!(email = %user.email, role = ?user.role, "logged in");
    Ok(&*self.user.insert(user))
  }

  pub fn logout(&mut self) {
    if let Some(user) = self.user.take() {
      tracing::info!(email = %user.email, "logged out");
    }
    persist::remove(self.store.as_ref(), USER_KEY);
  }
}
