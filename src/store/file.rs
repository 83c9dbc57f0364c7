//! On-disk layout of the user file: versioned TOML with one `[[users]]`
//! table per record.

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use super::error::StoreError;
use super::model::UserRecord;

pub(super) const FORMAT_VERSION: u32 = 1;

fn default_version() -> u32 {
    FORMAT_VERSION
}

#[derive(Debug, Serialize, Deserialize)]
struct UsersFile {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    users: Vec<UserRecord>,
}

/// Parse the user file at `path`.
///
/// A missing file surfaces as `StoreError::Io` with kind `NotFound`, a file
/// that exists but does not conform to the format as `StoreError::Parse`.
pub(super) fn load(path: &Path) -> Result<Vec<UserRecord>, StoreError> {
    let contents = fs::read_to_string(path)?;
    let file: UsersFile =
        toml::from_str(&contents).map_err(|e| StoreError::Parse(e.to_string()))?;

    if file.version > FORMAT_VERSION {
        return Err(StoreError::Parse(format!(
            "unsupported user file version {}",
            file.version
        )));
    }

    let mut ids = HashSet::new();
    let mut logins = HashSet::new();
    for user in &file.users {
        if !ids.insert(user.user_id()) {
            return Err(StoreError::Parse(format!(
                "duplicate user id {}",
                user.user_id()
            )));
        }
        if !logins.insert(user.login().to_string()) {
            return Err(StoreError::Parse(format!(
                "duplicate login '{}'",
                user.login()
            )));
        }
    }

    Ok(file.users)
}

/// Serialize `users` to `path`, replacing the file atomically: the records
/// are written to a temporary file in the same directory and renamed into
/// place, so a concurrent reader never observes a partial write.
pub(super) fn save(path: &Path, users: Vec<UserRecord>) -> Result<(), StoreError> {
    let file = UsersFile {
        version: FORMAT_VERSION,
        users,
    };
    let contents = toml::to_string_pretty(&file)
        .map_err(|e| StoreError::Io(std::io::Error::other(e.to_string())))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}
