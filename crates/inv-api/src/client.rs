use std::sync::Arc;
use std::time::Duration;

use inv_auth::{AuthError, SessionStore};
use inv_config::ApiConfig;
use inv_core::identity::SessionIdentity;

use crate::error::ApiError;
use crate::http::check_response;

/// HTTP client for the inventory API.
///
/// Owns the connection pool, joins paths onto the configured base URL,
/// attaches the bearer token from the injected [`SessionStore`], and funnels
/// every response through the shared status check. An unauthorized response
/// anywhere tears the session down before the error is returned.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Create a client with the configured base URL and timeout.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(config: ApiConfig, session: Arc<SessionStore>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("inventra/0.1")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("reqwest client should build");
        Self {
            http,
            config,
            session,
        }
    }

    /// Authenticate and persist the session via the injected store.
    ///
    /// Login bypasses [`Self::execute`] on purpose: a rejected password must
    /// not tear down a session that is already established.
    ///
    /// # Errors
    ///
    /// See [`SessionStore::login`].
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SessionIdentity, AuthError> {
        self.session
            .login(
                &self.http,
                &self.config.endpoint("auth/login"),
                username,
                password,
            )
            .await
    }

    pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.get(self.config.endpoint(path))
    }

    pub(crate) fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.post(self.config.endpoint(path))
    }

    pub(crate) fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.patch(self.config.endpoint(path))
    }

    pub(crate) fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.delete(self.config.endpoint(path))
    }

    /// Attach the bearer token, send, and map the response.
    ///
    /// The token is read fresh from the session store for every request, so
    /// a token replaced outside this process is picked up immediately.
    pub(crate) async fn execute(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let request = match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await?;
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            self.session.teardown();
            return Err(ApiError::Unauthorized);
        }
        check_response(response).await
    }
}
