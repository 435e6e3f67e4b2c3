//! Admin Account Model

use serde::{Deserialize, Serialize};
use shared::client::AdminInfo;

/// Merchant staff account for the inbox (one shop per account)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AdminAccount {
    pub id: i64,
    pub shop: String,
    pub username: String,
    pub display_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create admin account payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminAccountCreate {
    pub shop: String,
    pub username: String,
    pub password: String,
    pub display_name: Option<String>,
}

impl AdminAccount {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    /// Wire-safe view of the account (drops the hash)
    pub fn info(&self) -> AdminInfo {
        AdminInfo {
            id: self.id,
            shop: self.shop.clone(),
            username: self.username.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let hash = AdminAccount::hash_password("secret123").unwrap();
        let account = AdminAccount {
            id: 1,
            shop: "demo.myshopify.com".into(),
            username: "olivia".into(),
            display_name: "Olivia".into(),
            password_hash: hash,
            is_active: true,
            created_at: 0,
            updated_at: 0,
        };

        assert!(account.verify_password("secret123").unwrap());
        assert!(!account.verify_password("wrong").unwrap());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let account = AdminAccount {
            id: 1,
            shop: "demo.myshopify.com".into(),
            username: "olivia".into(),
            display_name: "Olivia".into(),
            password_hash: "$argon2id$fake".into(),
            is_active: true,
            created_at: 0,
            updated_at: 0,
        };

        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
