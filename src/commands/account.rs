//! Account Commands
//!
//! `POST /register` and `POST /verify`, both answering `{success, message}`.

use serde::{Deserialize, Serialize};

// ========================
// Argument Structs
// ========================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterArgs {
    pub email: String,
    pub password: String,
}

impl RegisterArgs {
    /// Both fields are required
    pub fn new(email: &str, password: &str) -> Result<Self, &'static str> {
        if email.is_empty() || password.is_empty() {
            return Err("Enter both an email address and a password first.");
        }
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifyArgs {
    pub email: String,
    pub code: String,
}

impl VerifyArgs {
    pub fn new(email: &str, code: &str) -> Result<Self, &'static str> {
        if email.is_empty() || code.is_empty() {
            return Err("Enter both an email address and the verification code first.");
        }
        Ok(Self {
            email: email.to_string(),
            code: code.to_string(),
        })
    }
}

/// Reply shared by both account routes
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccountReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

// ========================
// Commands
// ========================

pub async fn register(origin: &str, args: &RegisterArgs) -> Result<AccountReply, String> {
    post_json(&format!("{}/register", origin), args).await
}

pub async fn verify(origin: &str, args: &VerifyArgs) -> Result<AccountReply, String> {
    post_json(&format!("{}/verify", origin), args).await
}

async fn post_json<T: Serialize>(url: &str, body: &T) -> Result<AccountReply, String> {
    let response = reqwest::Client::new()
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    response.json::<AccountReply>().await.map_err(|e| e.to_string())
}
