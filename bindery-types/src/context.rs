//! Per-request context passed to handlers.

use std::fmt;

use tokio_util::sync::CancellationToken;

/// Credentials for an external model hub.
///
/// Held explicitly in [`InvocationContext`] rather than read from process-wide
/// state, so each handler sees exactly the credentials its caller resolved.
#[derive(Clone, PartialEq, Eq)]
pub struct HubCredentials {
    token: String,
    endpoint: String,
}

impl HubCredentials {
    /// Credentials for `endpoint` using `token`.
    pub fn new(token: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Read the token from the environment variable `var`.
    ///
    /// Returns `None` when the variable is unset or blank.
    pub fn from_env(var: &str, endpoint: impl Into<String>) -> Option<Self> {
        let token = std::env::var(var).ok()?;
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        Some(Self::new(token, endpoint))
    }

    /// The raw access token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The hub base URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl fmt::Debug for HubCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubCredentials")
            .field("token", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Runtime context provided to handlers during one invocation.
#[derive(Debug, Clone, Default)]
pub struct InvocationContext {
    /// Identifier of the session or caller issuing the request.
    pub session_id: String,
    /// Hub credentials, when the caller resolved any.
    pub credentials: Option<HubCredentials>,
    /// Token for cooperative cancellation.
    pub cancellation_token: CancellationToken,
}

impl InvocationContext {
    /// A context for the given session with no credentials.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            ..Self::default()
        }
    }

    /// Attach hub credentials.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Option<HubCredentials>) -> Self {
        self.credentials = credentials;
        self
    }
}
