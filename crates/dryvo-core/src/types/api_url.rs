//! API origin URL type.

use std::fmt;

use url::Url;

use crate::error::{Error, InvalidInputError};

/// The production API origin.
pub const DEFAULT_API_URL: &str = "https://dryvo.herokuapp.com";

/// Origin of the Dryvo API, onto which endpoint paths are joined.
///
/// Only `https` is accepted, except plain `http` against a loopback host.
/// A query or fragment is rejected.
///
/// ```
/// use dryvo_core::ApiUrl;
///
/// let api = ApiUrl::new("https://dryvo.herokuapp.com/").unwrap();
/// assert_eq!(api.endpoint("/login/direct"),
///            "https://dryvo.herokuapp.com/login/direct");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Parse and check an origin.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::ApiUrl`] naming the rejected input.
    pub fn new(input: impl AsRef<str>) -> Result<Self, Error> {
        let input = input.as_ref();
        let invalid = |reason: String| -> Error {
            InvalidInputError::ApiUrl {
                value: input.to_string(),
                reason,
            }
            .into()
        };

        let url = Url::parse(input).map_err(|e| invalid(e.to_string()))?;
        let loopback = matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"));
        match url.scheme() {
            "https" => {}
            "http" if loopback => {}
            scheme => return Err(invalid(format!("scheme '{}' not allowed", scheme))),
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("must not carry a query or fragment".to_string()));
        }

        Ok(Self(url))
    }

    /// Returns the full URL for an endpoint path such as `/user/me`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self, path.trim_start_matches('/'))
    }
}

impl Default for ApiUrl {
    fn default() -> Self {
        Self(Url::parse(DEFAULT_API_URL).expect("default API URL is valid"))
    }
}

/// The origin without its trailing slash.
impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str().trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_production_origin() {
        assert_eq!(ApiUrl::default().to_string(), DEFAULT_API_URL);
    }

    #[test]
    fn local_server_may_use_http() {
        let api = ApiUrl::new("http://localhost:5000").unwrap();
        assert_eq!(api.endpoint("/user/me"), "http://localhost:5000/user/me");
        assert!(ApiUrl::new("http://127.0.0.1:5000").is_ok());
    }

    #[test]
    fn endpoint_ignores_slashes() {
        let api = ApiUrl::new("https://dryvo.herokuapp.com/").unwrap();
        assert_eq!(api.endpoint("/user/me"), "https://dryvo.herokuapp.com/user/me");
        assert_eq!(api.endpoint("user/me"), "https://dryvo.herokuapp.com/user/me");
    }

    #[test]
    fn rejects_unusable_origins() {
        for input in [
            "http://dryvo.herokuapp.com",
            "/login/direct",
            "ftp://dryvo.herokuapp.com",
            "https://dryvo.herokuapp.com/?x=1",
            "https://dryvo.herokuapp.com/#top",
        ] {
            assert!(ApiUrl::new(input).is_err(), "{input}");
        }
    }
}
