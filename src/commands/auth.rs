//! Auth Commands

use serde::Serialize;

use crate::models::Account;

use super::{endpoint, read_json, FetchError};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
pub struct LoginArgs<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct SignupArgs<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

// ========================
// Commands
// ========================

pub async fn login(args: &LoginArgs<'_>) -> Result<Account, FetchError> {
    let response = reqwest::Client::new()
        .post(endpoint("/login"))
        .json(args)
        .send()
        .await?;
    read_json(response).await
}

pub async fn signup(args: &SignupArgs<'_>) -> Result<Account, FetchError> {
    let response = reqwest::Client::new()
        .post(endpoint("/signup"))
        .json(args)
        .send()
        .await?;
    read_json(response).await
}
