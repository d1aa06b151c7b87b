//! Account endpoints: sign-in and account creation
//!
//! Account endpoints report failures in-band as an `error` string in an
//! otherwise-200 response; those are surfaced as [`ClientError::Account`]
//! with the same user-facing wording the web front-end shows.

use crate::errors::{ClientError, Result};
use serde::{Deserialize, Serialize};

use super::client::LibraryClient;

/// Minimum username length accepted at account creation
pub const MIN_USERNAME_LEN: usize = 3;

/// Minimum password length accepted at account creation
pub const MIN_PASSWORD_LEN: usize = 6;

/// A signed-in account as reported by the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    pub account_id: i64,
    pub username: String,
    pub is_admin: bool,
}

#[derive(Serialize)]
struct CredentialPayload<'a> {
    username: &'a str,
    password: &'a str,
    email: Option<&'a str>,
}

#[derive(Deserialize)]
struct AccountResponse {
    error: Option<String>,
    username: Option<String>,
    account_id: Option<i64>,
    is_admin: Option<bool>,
}

impl LibraryClient {
    /// Sign in with an existing account
    pub async fn login(&self, username: &str, password: &str) -> Result<AccountProfile> {
        let payload = CredentialPayload {
            username,
            password,
            email: None,
        };
        let response: AccountResponse = self.post_json("login", &payload).await?;
        profile_from(response)
    }

    /// Create a new account and sign in
    pub async fn create_account(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> Result<AccountProfile> {
        if username.len() < MIN_USERNAME_LEN {
            return Err(ClientError::Validation(format!(
                "Username must be at least {} characters.",
                MIN_USERNAME_LEN
            )));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(ClientError::Validation(format!(
                "Password must be at least {} characters.",
                MIN_PASSWORD_LEN
            )));
        }

        let payload = CredentialPayload {
            username,
            password,
            email,
        };
        let response: AccountResponse = self.post_json("create_account", &payload).await?;
        profile_from(response)
    }
}

fn profile_from(response: AccountResponse) -> Result<AccountProfile> {
    if let Some(error) = response.error {
        return Err(ClientError::Account(friendly_account_error(&error)));
    }

    match (response.account_id, response.username) {
        (Some(account_id), Some(username)) => Ok(AccountProfile {
            account_id,
            username,
            is_admin: response.is_admin.unwrap_or(false),
        }),
        _ => Err(ClientError::Account(
            "Malformed response from account endpoint".to_string(),
        )),
    }
}

/// Map a raw API error string to the message shown to the user
pub fn friendly_account_error(error: &str) -> String {
    if error.contains("does not exist") {
        "An account with this username does not exist.".to_string()
    } else if error.contains("Incorrect password") {
        "The password you entered is incorrect.".to_string()
    } else if error.contains("already exists") {
        "An account with this username or email already exists.".to_string()
    } else {
        "An unexpected error occurred. Please try again.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friendly_account_errors() {
        assert!(friendly_account_error("Account does not exist").contains("does not exist"));
        assert!(friendly_account_error("Incorrect password for user").contains("incorrect"));
        assert!(friendly_account_error("Account already exists").contains("already exists"));
        assert!(friendly_account_error("boom").contains("unexpected"));
    }

    #[test]
    fn test_profile_from_success() {
        let response = AccountResponse {
            error: None,
            username: Some("reader1".to_string()),
            account_id: Some(42),
            is_admin: None,
        };
        let profile = profile_from(response).unwrap();
        assert_eq!(profile.account_id, 42);
        assert_eq!(profile.username, "reader1");
        assert!(!profile.is_admin);
    }

    #[test]
    fn test_profile_from_error_payload() {
        let response = AccountResponse {
            error: Some("Account does not exist".to_string()),
            username: None,
            account_id: None,
            is_admin: None,
        };
        let err = profile_from(response).unwrap_err();
        assert!(matches!(err, ClientError::Account(_)));
    }

    #[test]
    fn test_profile_from_malformed_payload() {
        let response = AccountResponse {
            error: None,
            username: None,
            account_id: Some(1),
            is_admin: Some(true),
        };
        assert!(profile_from(response).is_err());
    }
}
