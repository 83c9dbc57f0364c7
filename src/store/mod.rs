//! User record store
//!
//! Owns the in-memory collection of user accounts, the login index, id
//! assignment and the persistence of the whole set to a single user file.
//! All access goes through a coarse-grained lock; flows that need to find a
//! record and then act on it hold one [`StoreGuard`] across both steps.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

mod error;
mod file;
mod model;

pub use error::StoreError;
pub use model::{FieldValue, Gender, Status, UserId, UserRecord};

use crate::hash::derive_user_id;

pub struct UserStore {
    inner: Mutex<Inner>,
}

struct Inner {
    users: BTreeMap<UserId, UserRecord>,
    logins: HashMap<String, UserId>,
}

impl UserStore {
    /// Create an empty store, for initializing a fresh user file.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                users: BTreeMap::new(),
                logins: HashMap::new(),
            }),
        }
    }

    /// Load an existing user file. A missing file is an `Io` error, a file
    /// that does not conform to the format a `Parse` error.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let records = file::load(path)?;

        let mut users = BTreeMap::new();
        let mut logins = HashMap::new();
        for record in records {
            logins.insert(record.login().to_string(), record.user_id());
            users.insert(record.user_id(), record);
        }

        Ok(Self {
            inner: Mutex::new(Inner { users, logins }),
        })
    }

    /// Write all records to `path`, replacing the file atomically. The lock
    /// is held for the duration of the write, so any [`StoreGuard`] must be
    /// dropped first (the lock is not reentrant). On failure the in-memory
    /// state is unchanged.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let guard = self.lock();
        let records: Vec<UserRecord> = guard.iter().cloned().collect();
        file::save(path, records)
    }

    /// Acquire the store lock for a multi-step critical section.
    pub fn lock(&self) -> StoreGuard<'_> {
        StoreGuard {
            inner: self.inner.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }

    pub fn create_and_add_user(
        &self,
        group_id: u32,
        login: &str,
        password_hash: &str,
    ) -> Result<UserId, StoreError> {
        self.lock().create_and_add_user(group_id, login, password_hash)
    }

    pub fn find_by_id(&self, user_id: UserId) -> Option<UserRecord> {
        self.lock().find_by_id(user_id).cloned()
    }

    pub fn find_by_login(&self, login: &str) -> Option<UserRecord> {
        self.lock().find_by_login(login).cloned()
    }

    pub fn update_field(
        &self,
        user_id: UserId,
        field: &str,
        value: FieldValue,
    ) -> Result<(), StoreError> {
        self.lock().update_field(user_id, field, value)
    }

    pub fn set_password_hash(&self, user_id: UserId, hash: &str) -> Result<(), StoreError> {
        self.lock().set_password_hash(user_id, hash)
    }

    pub fn delete_user(&self, user_id: UserId) -> Result<(), StoreError> {
        self.lock().delete_user(user_id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped access to the locked store. Dropping the guard releases the lock
/// on every exit path; record references obtained from a guard cannot
/// outlive it.
pub struct StoreGuard<'a> {
    inner: MutexGuard<'a, Inner>,
}

impl StoreGuard<'_> {
    /// Assign an id derived from the login and insert a new record carrying
    /// only the identity fields; everything else starts at its default.
    /// Either the record and both indices are updated together, or nothing
    /// changes.
    pub fn create_and_add_user(
        &mut self,
        group_id: u32,
        login: &str,
        password_hash: &str,
    ) -> Result<UserId, StoreError> {
        if self.inner.logins.contains_key(login) {
            return Err(StoreError::DuplicateLogin(login.to_string()));
        }
        let user_id = derive_user_id(login);
        // A distinct login hashing onto an occupied id falls in the same
        // uniqueness domain as a duplicate login.
        if self.inner.users.contains_key(&user_id) {
            return Err(StoreError::DuplicateLogin(login.to_string()));
        }

        let record = UserRecord::new(user_id, group_id, login, password_hash);
        self.inner.logins.insert(login.to_string(), user_id);
        self.inner.users.insert(user_id, record);
        Ok(user_id)
    }

    pub fn find_by_id(&self, user_id: UserId) -> Option<&UserRecord> {
        self.inner.users.get(&user_id)
    }

    /// Mutable record handle, valid only while this guard is held. The
    /// index keys (`user_id`, `login`) are not reachable for writing
    /// through it.
    pub fn find_by_id_mut(&mut self, user_id: UserId) -> Option<&mut UserRecord> {
        self.inner.users.get_mut(&user_id)
    }

    pub fn find_by_login(&self, login: &str) -> Option<&UserRecord> {
        let user_id = *self.inner.logins.get(login)?;
        self.inner.users.get(&user_id)
    }

    pub fn update_field(
        &mut self,
        user_id: UserId,
        field: &str,
        value: FieldValue,
    ) -> Result<(), StoreError> {
        let user = self
            .inner
            .users
            .get_mut(&user_id)
            .ok_or(StoreError::NotFound(user_id))?;
        user.apply_update(field, value)
    }

    pub fn set_password_hash(&mut self, user_id: UserId, hash: &str) -> Result<(), StoreError> {
        let user = self
            .inner
            .users
            .get_mut(&user_id)
            .ok_or(StoreError::NotFound(user_id))?;
        user.password_hash = hash.to_string();
        Ok(())
    }

    /// Remove the record from both indices.
    pub fn delete_user(&mut self, user_id: UserId) -> Result<(), StoreError> {
        let user = self
            .inner
            .users
            .remove(&user_id)
            .ok_or(StoreError::NotFound(user_id))?;
        self.inner.logins.remove(user.login());
        Ok(())
    }

    /// Records in ascending `user_id` order.
    pub fn iter(&self) -> impl Iterator<Item = &UserRecord> {
        self.inner.users.values()
    }

    pub fn len(&self) -> usize {
        self.inner.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.users.is_empty()
    }
}
