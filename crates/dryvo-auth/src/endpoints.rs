//! Endpoint paths and response bodies of the session API.

use serde::Deserialize;
use serde_json::Value;

use dryvo_core::CredentialPair;

/// POST: log in with email and password.
pub const DIRECT_LOGIN: &str = "/login/direct";

/// POST: create an account and log in.
pub const REGISTER: &str = "/login/register";

/// POST: trade a one-time exchange token for a credential pair.
pub const EXCHANGE_TOKEN: &str = "/login/exchange_token";

/// GET: the user owning the attached access token.
pub const CURRENT_USER: &str = "/user/me";

/// Browser redirect: third-party (Facebook) login.
pub const EXTERNAL_LOGIN: &str = "/login/facebook";

/// Credential pair as issued by the login, register and exchange endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct IssuedTokens {
    pub auth_token: String,
    pub refresh_token: String,
}

impl IssuedTokens {
    pub fn pair(&self) -> CredentialPair {
        CredentialPair::new(&self.auth_token, &self.refresh_token)
    }
}

/// Response from the login and register endpoints.
///
/// `user` is handed on as received; it is `null` when the server omits it.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(flatten)]
    pub tokens: IssuedTokens,
    #[serde(default)]
    pub user: Value,
}

/// Response from the current-user endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct CurrentUserResponse {
    #[serde(default)]
    pub user: Option<Value>,
}
