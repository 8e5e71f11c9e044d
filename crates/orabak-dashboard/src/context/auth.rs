//! Credential context
//!
//! Login itself is handled by the backend; the console only carries the
//! resolved bearer token and reports whether it has one.

use orabak_client::resolve_token;
use orabak_core::ConsoleConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    token: Option<String>,
}

impl AuthContext {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    /// Resolve the token from the environment, then the config file
    pub fn resolve(config: &ConsoleConfig) -> Self {
        Self::new(resolve_token(config.token.as_deref()))
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Header label
    pub fn label(&self) -> &'static str {
        if self.is_authenticated() {
            "authenticated"
        } else {
            "anonymous"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(AuthContext::new(Some("t".into())).label(), "authenticated");
        assert_eq!(AuthContext::default().label(), "anonymous");
        assert_eq!(AuthContext::new(Some("abc".into())).token(), Some("abc"));
    }
}
