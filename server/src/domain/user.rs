//! User Entity
//!
//! Backing record for the toy login/signup forms. There are no sessions;
//! a successful login only echoes the account back.

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: i64,
}

/// Public view of a user, safe to return over HTTP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<&User> for Account {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl SignupForm {
    /// Trims fields and rejects blanks or an email without `@`.
    pub fn validate(self) -> DomainResult<SignupForm> {
        let name = self.name.trim().to_string();
        let email = normalize_email(&self.email);
        if name.is_empty() {
            return Err(DomainError::InvalidInput("name is required".to_string()));
        }
        if !email.contains('@') {
            return Err(DomainError::InvalidInput("email is invalid".to_string()));
        }
        if self.password.is_empty() {
            return Err(DomainError::InvalidInput("password is required".to_string()));
        }
        Ok(SignupForm {
            name,
            email,
            password: self.password,
        })
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// BLAKE3 digest of `email:password`, hex encoded
pub fn hash_password(email: &str, password: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(normalize_email(email).as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hasher.finalize().to_hex().to_string()
}

impl Entity for User {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted_by_email() {
        let a = hash_password("a@example.com", "secret");
        let b = hash_password("b@example.com", "secret");
        assert_ne!(a, b);
        assert_eq!(a, hash_password(" A@Example.com ", "secret"));
    }

    #[test]
    fn test_signup_validation() {
        let ok = SignupForm {
            name: " Ann ".to_string(),
            email: "Ann@Example.com".to_string(),
            password: "pw".to_string(),
        }
        .validate()
        .unwrap();
        assert_eq!(ok.name, "Ann");
        assert_eq!(ok.email, "ann@example.com");

        let bad = SignupForm {
            name: "Ann".to_string(),
            email: "not-an-email".to_string(),
            password: "pw".to_string(),
        }
        .validate();
        assert!(matches!(bad, Err(DomainError::InvalidInput(_))));
    }
}
