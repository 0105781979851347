// crates/portal-client/src/auth.rs
// Bearer token sources. Sign-in and refresh belong to the identity provider.

use std::sync::Arc;

/// Supplies the access token attached to outgoing requests
pub trait TokenSource: Send + Sync {
    /// Current access token, if the user is signed in
    fn access_token(&self) -> Option<String>;
}

/// No authentication (local python backend)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenSource for NoToken {
    fn access_token(&self) -> Option<String> {
        None
    }
}

/// Fixed token taken from config or the environment
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    /// Blank tokens are treated as absent
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let trimmed = token.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

impl TokenSource for StaticToken {
    fn access_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Pick a token source from an optional configured token
pub fn token_source(token: Option<&str>) -> Arc<dyn TokenSource> {
    match token.and_then(StaticToken::new) {
        Some(t) => Arc::new(t),
        None => Arc::new(NoToken),
    }
}
