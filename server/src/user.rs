//! The user record and its client-safe projection.
//!
//! [`User`] is the full database row, including the password hash and
//! audit timestamps. [`User::to_info`] projects it into a [`UserInfo`]
//! that every successful handler returns; the id and the hash never
//! leave the server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Nested postal address document. Every field defaults to an empty
/// string; the whole structure is stored as one JSONB value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub house_no: String,
    pub street: String,
    pub city: String,
    pub pincode: String,
}

/// Full user record from the database.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    #[sqlx(json)]
    pub location: Location,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A fresh record with a generated id and current timestamps.
    pub fn new(email: String, name: String, password_hash: String, location: Location) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            password_hash,
            location,
            created_at: now,
            updated_at: now,
        }
    }

    /// Convert to the summary returned to clients.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            email: self.email.clone(),
            name: self.name.clone(),
            location: self.location.clone(),
        }
    }
}

/// User information safe to send to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub email: String,
    pub name: String,
    pub location: Location,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_deserializes_with_missing_fields() {
        let location: Location = serde_json::from_str(r#"{"city": "Mumbai"}"#).unwrap();
        assert_eq!(location.city, "Mumbai");
        assert_eq!(location.house_no, "");
        assert_eq!(location.pincode, "");
    }

    #[test]
    fn location_uses_camel_case_keys() {
        let location = Location {
            house_no: "12A".into(),
            ..Location::default()
        };
        let json = serde_json::to_value(&location).unwrap();
        assert_eq!(json["houseNo"], "12A");
    }

    #[test]
    fn info_omits_the_password_hash() {
        let user = User::new(
            "a@x.com".into(),
            "Ada".into(),
            "$argon2id$fake".into(),
            Location::default(),
        );
        let json = serde_json::to_value(user.to_info()).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["email"], "a@x.com");
    }
}
