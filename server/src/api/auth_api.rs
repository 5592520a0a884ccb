//! HTTP handlers for the login/signup forms
//!
//! Toy endpoints: accounts are stored, nothing else. No sessions or tokens.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::domain::{hash_password, Account, LoginForm, SignupForm};
use crate::error::AppError;
use crate::repository::UserRepository;
use crate::AppState;

pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(form): Json<SignupForm>,
) -> Result<(StatusCode, Json<Account>), AppError> {
    let form = form.validate()?;
    let user = state.users.create(&form).await?;
    info!("Registered account {}", user.id);

    Ok((StatusCode::CREATED, Json(Account::from(&user))))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(form): Json<LoginForm>,
) -> Result<Json<Account>, AppError> {
    let user = state
        .users
        .find_by_email(&form.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if user.password_hash != hash_password(&form.email, &form.password) {
        return Err(AppError::Unauthorized);
    }

    Ok(Json(Account::from(&user)))
}
