//! Third-party login links.

use url::form_urlencoded;

use dryvo_core::ApiUrl;

use crate::endpoints::EXTERNAL_LOGIN;

/// Build the third-party login URL, optionally linking an existing account.
///
/// A missing or empty `link_token` yields a URL without a query string.
/// The token is form-url-encoded before it is appended. Server-issued tokens
/// only use characters that encoding leaves alone, so for them the link is
/// the plain `?token=<token>` concatenation.
pub fn external_auth_url(api: &ApiUrl, link_token: Option<&str>) -> String {
    let url = api.endpoint(EXTERNAL_LOGIN);
    match link_token.filter(|t| !t.is_empty()) {
        Some(token) => {
            let encoded: String = form_urlencoded::byte_serialize(token.as_bytes()).collect();
            format!("{}?token={}", url, encoded)
        }
        None => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_link_token() {
        let api = ApiUrl::default();
        assert_eq!(
            external_auth_url(&api, Some("abc123")),
            "https://dryvo.herokuapp.com/login/facebook?token=abc123"
        );
    }

    #[test]
    fn no_query_without_token() {
        let api = ApiUrl::default();
        let url = external_auth_url(&api, None);
        assert_eq!(url, "https://dryvo.herokuapp.com/login/facebook");
        assert_eq!(external_auth_url(&api, Some("")), url);
    }

    #[test]
    fn issued_tokens_pass_unchanged() {
        let api = ApiUrl::default();
        assert!(external_auth_url(&api, Some("eyJ0.a-b_c")).ends_with("?token=eyJ0.a-b_c"));
    }

    #[test]
    fn escapes_reserved_characters() {
        let api = ApiUrl::default();
        assert!(external_auth_url(&api, Some("a&b=c")).ends_with("?token=a%26b%3Dc"));
    }
}
