//! # User model: system users and clients
//!
//! One remote table holds both internal dashboard users and the shop's clients;
//! the [`Role`] flag (`Rol` on the wire, `0` or `1`) tells them apart.
//!
//! The wire format uses PascalCase keys (`IdUser`, `FirstName`, `Dni`, ...).
//! `Password` travels in plaintext because the remote API expects it that way.
//! `BirthDate` is optional and may come back as a full ISO timestamp; use
//! [`User::birth_date_input`] to get the `YYYY-MM-DD` part for date inputs.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::de;

/// Distinguishes internal users from clients in the shared users table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    SystemUser,
    Client,
}

impl Role {
    pub fn as_flag(self) -> u8 {
        match self {
            Role::SystemUser => 0,
            Role::Client => 1,
        }
    }

    pub fn from_flag(flag: i64) -> Option<Self> {
        match flag {
            0 => Some(Role::SystemUser),
            1 => Some(Role::Client),
            _ => None,
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_flag())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let flag = de::integer(deserializer)?;
        Role::from_flag(flag)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown role flag: {flag}")))
    }
}

/// A record of the users table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_user: Option<i64>,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub last_name: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub dni: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub address: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub phone: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub mail: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub password: String,
    #[serde(default)]
    pub rol: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
}

impl User {
    /// "First Last", trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// The date part of `BirthDate`, suitable for an `<input type="date">`.
    pub fn birth_date_input(&self) -> String {
        self.birth_date
            .as_deref()
            .map(|d| d.get(..10).unwrap_or(d).to_string())
            .unwrap_or_default()
    }
}

/// Login request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Credentials {
    /// Email or DNI.
    pub user_request: String,
    pub password: String,
}
