//! OAuth 2.0 implicit-flow handshake
//!
//! The implicit flow returns the access token directly in the redirect
//! URL's fragment; there is no code exchange and no refresh token. The
//! adapter opens the consent screen in a browsing context and later
//! recognizes the provider's redirect among the navigation events the host
//! forwards to it.

use core_sync::{Result, ServiceError};
use url::Url;

/// Interactive consent endpoint
pub const CONSENT_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Scope restricted to the application-private storage area
pub const APP_DATA_SCOPE: &str = "https://www.googleapis.com/auth/drive.appdata";

/// OAuth application registration.
///
/// Injected at construction time; [`Default`] supplies the built-in
/// registration.
#[derive(Debug, Clone)]
pub struct DriveConfig {
    /// OAuth client ID
    pub client_id: String,
    /// Public redirect URI the consent screen sends the fragment to
    pub redirect_uri: String,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            client_id: "287041339814-9f2bcb1qtfhfnmbpo5gcoldnnkpq63eh.apps.googleusercontent.com"
                .to_string(),
            redirect_uri: "https://uscsync.github.io/auth_googledrive.html".to_string(),
        }
    }
}

/// Build the consent-screen URL for the implicit flow.
pub fn consent_url(config: &DriveConfig) -> Result<String> {
    let mut url = Url::parse(CONSENT_URL)
        .map_err(|_| ServiceError::Validation("invalid consent endpoint URL"))?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("response_type", "token");
        query.append_pair("client_id", &config.client_id);
        query.append_pair("redirect_uri", &config.redirect_uri);
        query.append_pair("scope", APP_DATA_SCOPE);
    }

    Ok(url.to_string())
}

/// Outcome of matching a navigated URL against the redirect pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectCapture {
    /// The URL is unrelated to the authorization redirect.
    NotMatched,
    /// The URL is the authorization redirect. The fragment may or may not
    /// carry an access token.
    Matched { access_token: Option<String> },
}

/// Match `navigated` against `redirect_uri + "#"` and extract any
/// `access_token` from the fragment, which the provider encodes as a query
/// string.
pub fn capture_redirect(redirect_uri: &str, navigated: &str) -> RedirectCapture {
    let prefix = format!("{redirect_uri}#");
    let Some(fragment) = navigated.strip_prefix(prefix.as_str()) else {
        return RedirectCapture::NotMatched;
    };

    let access_token = url::form_urlencoded::parse(fragment.as_bytes())
        .find(|(key, _)| key == "access_token")
        .map(|(_, value)| value.into_owned());

    RedirectCapture::Matched { access_token }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DriveConfig {
        DriveConfig {
            client_id: "test-client".to_string(),
            redirect_uri: "https://example.com/auth.html".to_string(),
        }
    }

    #[test]
    fn test_consent_url_parameters() {
        let url = consent_url(&config()).unwrap();

        assert!(url.starts_with(CONSENT_URL));
        assert!(url.contains("response_type=token"));
        assert!(url.contains("client_id=test-client"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fexample.com%2Fauth.html"));
        assert!(url.contains("scope=https%3A%2F%2Fwww.googleapis.com%2Fauth%2Fdrive.appdata"));
    }

    #[test]
    fn test_capture_with_token() {
        let captured = capture_redirect(
            "https://example.com/auth.html",
            "https://example.com/auth.html#access_token=ABC&token_type=Bearer&expires_in=3599",
        );

        assert_eq!(
            captured,
            RedirectCapture::Matched {
                access_token: Some("ABC".to_string())
            }
        );
    }

    #[test]
    fn test_capture_without_token() {
        let captured = capture_redirect(
            "https://example.com/auth.html",
            "https://example.com/auth.html#error=access_denied",
        );

        assert_eq!(
            captured,
            RedirectCapture::Matched { access_token: None }
        );
    }

    #[test]
    fn test_unrelated_url_not_matched() {
        let captured = capture_redirect(
            "https://example.com/auth.html",
            "https://example.com/other#access_token=ABC",
        );
        assert_eq!(captured, RedirectCapture::NotMatched);
    }

    #[test]
    fn test_redirect_without_fragment_not_matched() {
        let captured = capture_redirect(
            "https://example.com/auth.html",
            "https://example.com/auth.html",
        );
        assert_eq!(captured, RedirectCapture::NotMatched);

        let query_style = capture_redirect(
            "https://example.com/auth.html",
            "https://example.com/auth.html?access_token=ABC",
        );
        assert_eq!(query_style, RedirectCapture::NotMatched);
    }

    #[test]
    fn test_percent_encoded_token_is_decoded() {
        let captured = capture_redirect(
            "https://example.com/auth.html",
            "https://example.com/auth.html#access_token=a%2Fb",
        );

        assert_eq!(
            captured,
            RedirectCapture::Matched {
                access_token: Some("a/b".to_string())
            }
        );
    }
}
