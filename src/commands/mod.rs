//! Command handlers. Each one loads the store from the user file named on
//! the command line, performs its operation (holding the store lock across
//! find-then-act sequences) and persists the result.

pub mod coerce;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::*;
use comfy_table::Table;

use crate::hash::hash_password;
use crate::store::{UserRecord, UserStore};

/// Arguments of the `add` command, in the order they appear on the command
/// line.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Path of the user file
    pub file: String,
    /// Group the new user belongs to
    pub group_id: u32,
    /// Initial status (I/A/W, full name, or numeric code)
    pub status: String,
    /// Unique login
    pub login: String,
    /// Plaintext password (only its hash is stored)
    pub password: String,
    /// Gender (M/F/U, full name, or numeric code)
    pub gender: String,
    /// Last name
    pub name: String,
    pub first_name: String,
    pub company_name: String,
    pub email: String,
    pub phone: String,
    pub timezone: String,
}

fn store_path(file: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(file).to_string())
}

fn load_store(path: &Path, debug: bool) -> Result<UserStore> {
    let store = UserStore::load(path)
        .with_context(|| format!("cannot load users from {}", path.display()))?;
    if debug {
        println!("loaded {} users from {}", store.len(), path.display());
    }
    Ok(store)
}

fn save_store(store: &UserStore, path: &Path) -> Result<()> {
    store.save(path).context("cannot write file")?;
    println!("{} user file was written", "OK:".green());
    Ok(())
}

/// `init <file>`: create an empty user file. Refuses to touch an existing
/// file, corrupt or not.
pub fn init_file(file: &str, _debug: bool) -> Result<()> {
    let path = store_path(file);
    if path.exists() {
        bail!("file already exists {}", path.display());
    }

    UserStore::new().save(&path).context("cannot write file")?;
    println!("{} created user file {}", "OK:".green(), path.display());
    Ok(())
}

/// `add <file> ...`: create the user, then fill the profile fields through a
/// record handle inside the same critical section.
pub fn add_user(args: &AddArgs, debug: bool) -> Result<()> {
    // Coerce before touching the store: bad enum text dies here.
    let status = coerce::parse_status(&args.status)?;
    let gender = coerce::parse_gender(&args.gender)?;

    let path = store_path(&args.file);
    let store = load_store(&path, debug)?;
    let password_hash = hash_password(&args.password);

    let user_id = {
        let mut users = store.lock();
        let user_id = users
            .create_and_add_user(args.group_id, &args.login, &password_hash)
            .context("cannot add user")?;
        let user = users
            .find_by_id_mut(user_id)
            .expect("created user is findable by id");
        user.status = status;
        user.gender = gender;
        user.last_name = args.name.clone();
        user.first_name = args.first_name.clone();
        user.company_name = args.company_name.clone();
        user.email = args.email.clone();
        user.phone = args.phone.clone();
        user.timezone = args.timezone.clone();
        user_id
    };

    println!("{} user was added, user_id {}", "OK:".green(), user_id);
    save_store(&store, &path)
}

/// `delete <file> <login>`: look the user up by login and remove it, as one
/// critical section.
pub fn delete_user(file: &str, login: &str, debug: bool) -> Result<()> {
    let path = store_path(file);
    let store = load_store(&path, debug)?;

    let user_id = {
        let mut users = store.lock();
        let Some(user) = users.find_by_login(login) else {
            bail!("cannot find user {login}");
        };
        let user_id = user.user_id();
        users.delete_user(user_id).context("cannot delete user")?;
        user_id
    };

    println!("{} user was deleted, user_id {}", "OK:".green(), user_id);
    save_store(&store, &path)
}

/// `update <file> <login> <field> <value>`: mutate one field. `password`
/// routes through the hasher; everything else goes to the store, which
/// rejects unknown or read-only fields.
pub fn update_user(file: &str, login: &str, field: &str, value: &str, debug: bool) -> Result<()> {
    let path = store_path(file);
    let store = load_store(&path, debug)?;

    {
        let mut users = store.lock();
        let Some(user) = users.find_by_login(login) else {
            bail!("cannot find user {login}");
        };
        let user_id = user.user_id();

        if field == "password" {
            users.set_password_hash(user_id, &hash_password(value))?;
        } else {
            let typed = coerce::coerce_update_value(field, value)?;
            users.update_field(user_id, field, typed)?;
        }
    }

    println!("{} field '{}' was updated", "OK:".green(), field);
    save_store(&store, &path)
}

/// `print <file> <login>`: render one user as a field/value table. Read
/// only, nothing is persisted.
pub fn print_user(file: &str, login: &str, debug: bool) -> Result<()> {
    let path = store_path(file);
    let store = load_store(&path, debug)?;

    let users = store.lock();
    let Some(user) = users.find_by_login(login) else {
        bail!("cannot find user {login}");
    };

    println!("{}", user_table(user));
    Ok(())
}

fn user_table(user: &UserRecord) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["field", "value"]);
    table.add_row(vec!["user_id".to_string(), user.user_id().to_string()]);
    table.add_row(vec!["group_id".to_string(), user.group_id().to_string()]);
    table.add_row(vec!["login".to_string(), user.login().to_string()]);
    table.add_row(vec!["status".to_string(), user.status.to_string()]);
    table.add_row(vec!["gender".to_string(), user.gender.to_string()]);
    table.add_row(vec!["name".to_string(), user.last_name.clone()]);
    table.add_row(vec!["first_name".to_string(), user.first_name.clone()]);
    table.add_row(vec!["company_name".to_string(), user.company_name.clone()]);
    table.add_row(vec!["email".to_string(), user.email.clone()]);
    table.add_row(vec!["phone".to_string(), user.phone.clone()]);
    table.add_row(vec!["timezone".to_string(), user.timezone.clone()]);
    table.add_row(vec!["password_hash".to_string(), user.password_hash.clone()]);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Gender, Status};

    #[test]
    fn user_table_shows_every_field() {
        let mut user = UserRecord::new(7, 1, "alice", "cafe01");
        user.status = Status::Active;
        user.gender = Gender::Female;
        user.last_name = "Doe".to_string();

        let rendered = user_table(&user).to_string();
        assert!(rendered.contains("alice"));
        assert!(rendered.contains("ACTIVE"));
        assert!(rendered.contains("FEMALE"));
        assert!(rendered.contains("Doe"));
        assert!(rendered.contains('7'));
    }

    #[test]
    fn tilde_paths_are_expanded() {
        let path = store_path("~/users.dat");
        assert!(!path.to_string_lossy().starts_with('~'));
    }
}
