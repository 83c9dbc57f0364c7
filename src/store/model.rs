use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::StoreError;

pub type UserId = u32;

/// Account status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    Inactive,
    Active,
    WaitingRegistration,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Inactive => "INACTIVE",
            Status::Active => "ACTIVE",
            Status::WaitingRegistration => "WAITING_REGISTRATION",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    #[default]
    Undef,
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Undef => "UNDEF",
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An already-typed value for `update_field`. Coercion from command-line
/// text happens in the front end; the store never parses strings.
#[derive(Debug, Clone)]
pub enum FieldValue {
    Status(Status),
    Gender(Gender),
    Text(String),
}

/// One user account.
///
/// `user_id` and `login` are the store's index keys and stay immutable
/// behind read accessors; everything else is free to mutate while a lock
/// guard is held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    user_id: UserId,
    group_id: u32,
    login: String,
    pub password_hash: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub timezone: String,
}

impl UserRecord {
    pub fn new(user_id: UserId, group_id: u32, login: &str, password_hash: &str) -> Self {
        Self {
            user_id,
            group_id,
            login: login.to_string(),
            password_hash: password_hash.to_string(),
            status: Status::default(),
            gender: Gender::default(),
            last_name: String::new(),
            first_name: String::new(),
            company_name: String::new(),
            email: String::new(),
            phone: String::new(),
            timezone: String::new(),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn group_id(&self) -> u32 {
        self.group_id
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    /// Apply an update to one of the recognized mutable fields. `email` and
    /// `phone` are set at creation and read-only afterwards; anything else
    /// unrecognized is rejected the same way.
    pub(crate) fn apply_update(&mut self, field: &str, value: FieldValue) -> Result<(), StoreError> {
        match (field, value) {
            ("status", FieldValue::Status(status)) => self.status = status,
            ("gender", FieldValue::Gender(gender)) => self.gender = gender,
            ("name", FieldValue::Text(text)) => self.last_name = text,
            ("first_name", FieldValue::Text(text)) => self.first_name = text,
            ("company_name", FieldValue::Text(text)) => self.company_name = text,
            ("timezone", FieldValue::Text(text)) => self.timezone = text,
            _ => return Err(StoreError::UnknownField(field.to_string())),
        }
        Ok(())
    }
}
