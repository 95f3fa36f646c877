use crate::errors::AppError;
use crate::models::{AppData, Role, UserRecord, UserStatus};
use axum::http::{header, HeaderMap};
use chrono::NaiveDate;
use sha2::{Digest, Sha256};
use uuid::Uuid;

pub fn new_salt() -> String {
    Uuid::new_v4().simple().to_string()
}

pub fn new_token() -> String {
    format!(
        "{}{}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    )
}

pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn verify_password(password: &str, user: &UserRecord) -> bool {
    hash_password(password, &user.salt) == user.password_hash
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Resolve the request's bearer token to a user.
pub fn authorize<'a>(data: &'a AppData, headers: &HeaderMap) -> Result<&'a UserRecord, AppError> {
    let token =
        bearer_token(headers).ok_or_else(|| AppError::unauthorized("Missing bearer token"))?;
    let user_id = data
        .sessions
        .get(token)
        .ok_or_else(|| AppError::unauthorized("Invalid or expired token"))?;
    data.user(*user_id)
        .ok_or_else(|| AppError::unauthorized("Invalid or expired token"))
}

pub fn require_admin(user: &UserRecord) -> Result<(), AppError> {
    if user.role == Role::Admin {
        Ok(())
    } else {
        Err(AppError::forbidden("Admin access required"))
    }
}

/// Seed the initial admin account when none with this email exists yet.
/// Returns true when the data changed and should be persisted.
pub fn seed_admin(data: &mut AppData, email: &str, password: &str, today: NaiveDate) -> bool {
    let email = normalize_email(email);
    if email.is_empty() || data.user_by_email(&email).is_some() {
        return false;
    }
    let salt = new_salt();
    let id = data.alloc_user_id();
    data.users.push(UserRecord {
        id,
        name: "Administrator".to_string(),
        email,
        password_hash: hash_password(password, &salt),
        salt,
        role: Role::Admin,
        status: UserStatus::Active,
        bio: String::new(),
        avatar_url: String::new(),
        joined: today,
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_is_deterministic_per_salt() {
        let first = hash_password("hunter22", "salt-a");
        assert_eq!(first, hash_password("hunter22", "salt-a"));
        assert_ne!(first, hash_password("hunter22", "salt-b"));
        assert_ne!(first, hash_password("hunter23", "salt-a"));
    }

    #[test]
    fn verify_checks_against_stored_salt() {
        let salt = "fixed-salt".to_string();
        let user = UserRecord {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: hash_password("hunter22", &salt),
            salt,
            role: Role::User,
            status: UserStatus::Active,
            bio: String::new(),
            avatar_url: String::new(),
            joined: "2024-01-01".parse().unwrap(),
        };
        assert!(verify_password("hunter22", &user));
        assert!(!verify_password("wrong", &user));
    }

    #[test]
    fn normalize_email_lowercases_and_trims() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    #[test]
    fn seed_admin_is_idempotent() {
        let mut data = AppData::default();
        let today = "2024-06-01".parse().unwrap();
        assert!(seed_admin(&mut data, "admin@example.com", "secret123", today));
        assert!(!seed_admin(&mut data, "admin@example.com", "secret123", today));
        assert_eq!(data.users.len(), 1);
        assert_eq!(data.users[0].role, Role::Admin);
    }
}
