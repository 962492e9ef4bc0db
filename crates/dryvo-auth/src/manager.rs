//! Session lifecycle management.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, info, instrument, warn};

use dryvo_core::error::{InvalidInputError, TransportError};
use dryvo_core::{
    ApiUrl, DEFAULT_ERROR, Error, ErrorChannel, Failure, SessionObserver, SessionUser, TokenStore,
    Transport, UrlOpener,
};

use crate::endpoints::{
    CURRENT_USER, CurrentUserResponse, DIRECT_LOGIN, EXCHANGE_TOKEN, IssuedTokens, LoginResponse,
    REGISTER,
};
use crate::external::external_auth_url;

/// Coordinates login, registration, token exchange, session probing and
/// logout.
///
/// Every operation settles its outcome before it resolves: on success the
/// observer has already been notified, and on failure the error channel has
/// already received the message. No operation returns a transport error to
/// its caller.
///
/// Cheap to clone; clones share their collaborators.
#[derive(Clone)]
pub struct SessionManager {
    api: ApiUrl,
    transport: Arc<dyn Transport>,
    tokens: TokenStore,
    observer: Arc<dyn SessionObserver>,
    errors: Arc<dyn ErrorChannel>,
    opener: Arc<dyn UrlOpener>,
}

impl SessionManager {
    /// Create a manager from its collaborators.
    ///
    /// `transport` is expected to authenticate with the credentials held in
    /// `tokens`.
    pub fn new(
        api: ApiUrl,
        transport: Arc<dyn Transport>,
        tokens: TokenStore,
        observer: Arc<dyn SessionObserver>,
        errors: Arc<dyn ErrorChannel>,
        opener: Arc<dyn UrlOpener>,
    ) -> Self {
        Self {
            api,
            transport,
            tokens,
            observer,
            errors,
            opener,
        }
    }

    /// Returns the token store credentials are persisted in.
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Resolves to the failure reported on the error channel: the server's
    /// message, or an empty message when there is none. Stored credentials
    /// are left untouched.
    #[instrument(skip(self, password))]
    pub async fn direct_login(&self, email: &str, password: &str) -> Result<SessionUser, Failure> {
        info!("Logging in");
        let body = json!({ "email": email, "password": password });
        self.login_or_register(DIRECT_LOGIN, &body).await
    }

    /// Create an account from caller-supplied fields and log in.
    ///
    /// Fields are sent as-is; validation is left to the server.
    ///
    /// # Errors
    ///
    /// Same contract as [`SessionManager::direct_login`].
    #[instrument(skip(self, fields))]
    pub async fn register(&self, fields: &Value) -> Result<SessionUser, Failure> {
        info!("Registering account");
        self.login_or_register(REGISTER, fields).await
    }

    /// Trade a one-time exchange token for credentials, then probe the
    /// session with them.
    ///
    /// Resolves to the probe's outcome.
    ///
    /// # Errors
    ///
    /// Any failure of the exchange itself is reported as [`DEFAULT_ERROR`],
    /// whatever its cause.
    #[instrument(skip(self, exchange_token))]
    pub async fn exchange_token(
        &self,
        exchange_token: &str,
    ) -> Result<Option<SessionUser>, Failure> {
        info!("Exchanging token");

        if let Err(e) = self.exchange(exchange_token).await {
            warn!(error = %e, "Token exchange failed");
            self.errors.reported(DEFAULT_ERROR);
            return Err(Failure::new(DEFAULT_ERROR));
        }

        Ok(self.fetch_session().await)
    }

    /// Check whether the stored credentials still identify a user.
    ///
    /// Resolves to `None` when they do not, for whatever reason. Nothing is
    /// reported in that case.
    #[instrument(skip(self))]
    pub async fn fetch_session(&self) -> Option<SessionUser> {
        match self.current_user().await {
            Ok(user) => {
                debug!(user_id = ?user.id(), "Session is valid");
                self.observer.session_started(&user);
                Some(user)
            }
            Err(e) => {
                debug!(error = %e, "No valid session");
                None
            }
        }
    }

    /// Remove the stored credentials and end the session.
    ///
    /// Storage failures are logged; the observer is notified regardless.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        info!("Logging out");
        if let Err(e) = self.tokens.clear().await {
            warn!(error = %e, "Failed to remove stored credentials");
        }
        self.observer.session_ended();
    }

    /// Open the third-party login page, optionally linking an existing
    /// account through `link_token`.
    pub fn open_external_auth_provider(&self, link_token: Option<&str>) {
        let url = external_auth_url(&self.api, link_token);
        debug!(linking = link_token.is_some_and(|t| !t.is_empty()), "Opening external login");
        self.opener.open(&url);
    }

    async fn login_or_register(&self, endpoint: &str, body: &Value) -> Result<SessionUser, Failure> {
        match self.issue_session(endpoint, body).await {
            Ok(user) => {
                self.observer.session_started(&user);
                info!(user_id = ?user.id(), "Session started");
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, endpoint, "Authentication failed");
                let failure = Failure::from_error(&e);
                self.errors.reported(failure.message());
                Err(failure)
            }
        }
    }

    /// POST `body`, persist the issued pair and return the user.
    async fn issue_session(&self, endpoint: &str, body: &Value) -> Result<SessionUser, Error> {
        let response: LoginResponse = decode(self.transport.post(endpoint, body).await?)?;
        self.tokens.set_tokens(&response.tokens.pair()).await?;
        Ok(SessionUser::new(response.user))
    }

    async fn exchange(&self, exchange_token: &str) -> Result<(), Error> {
        let body = json!({ "exchange_token": exchange_token });
        let issued: IssuedTokens = decode(self.transport.post(EXCHANGE_TOKEN, &body).await?)?;
        self.tokens.set_tokens(&issued.pair()).await
    }

    async fn current_user(&self) -> Result<SessionUser, Error> {
        let response: CurrentUserResponse = decode(self.transport.get(CURRENT_USER).await?)?;
        response.user.map(SessionUser::new).ok_or_else(|| {
            InvalidInputError::MissingField {
                field: "user".to_string(),
            }
            .into()
        })
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    serde_json::from_value(value).map_err(|e| {
        Error::Transport(TransportError::Decode {
            message: e.to_string(),
        })
    })
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("api", &self.api)
            .field("tokens", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
