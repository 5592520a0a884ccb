//! User Repository
//!
//! SQLite-backed accounts for the login/signup forms.

use async_trait::async_trait;
use rusqlite::{params, ErrorCode, OptionalExtension, Row};

use super::db::DbState;
use super::traits::{Repository, UserRepository};
use crate::domain::{hash_password, normalize_email, DomainError, DomainResult, SignupForm, User};

const USER_COLUMNS: &str = "id, name, email, password_hash, created_at";

#[derive(Clone)]
pub struct SqliteUserRepository {
    db: DbState,
}

impl SqliteUserRepository {
    pub fn new(db: DbState) -> Self {
        Self { db }
    }
}

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        created_at: row.get(4)?,
    })
}

#[async_trait]
impl Repository<User> for SqliteUserRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        self.db
            .run(move |conn| {
                let user = conn
                    .query_row(
                        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                        params![id],
                        row_to_user,
                    )
                    .optional()?;
                Ok(user)
            })
            .await
    }

    async fn count(&self) -> DomainResult<u64> {
        self.db
            .run(|conn| {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, form: &SignupForm) -> DomainResult<User> {
        let name = form.name.clone();
        let email = normalize_email(&form.email);
        let password_hash = hash_password(&email, &form.password);
        let created_at = chrono::Utc::now().timestamp();

        self.db
            .run(move |conn| {
                let inserted = conn.execute(
                    "INSERT INTO users (name, email, password_hash, created_at) VALUES (?1, ?2, ?3, ?4)",
                    params![name, email, password_hash, created_at],
                );

                match inserted {
                    Ok(_) => Ok(User {
                        id: conn.last_insert_rowid(),
                        name,
                        email,
                        password_hash,
                        created_at,
                    }),
                    Err(rusqlite::Error::SqliteFailure(err, _))
                        if err.code == ErrorCode::ConstraintViolation =>
                    {
                        Err(DomainError::Conflict(format!("{email} is already registered")))
                    }
                    Err(e) => Err(e.into()),
                }
            })
            .await
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let email = normalize_email(email);
        self.db
            .run(move |conn| {
                let user = conn
                    .query_row(
                        &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
                        params![email],
                        row_to_user,
                    )
                    .optional()?;
                Ok(user)
            })
            .await
    }
}
